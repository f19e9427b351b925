//! pdfstruct CLI - document structure reconstruction tool

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfstruct::refine::{OpenAiRefiner, DEFAULT_MODEL};
use pdfstruct::render::{to_json, to_outline};
use pdfstruct::{
    CommandOcr, JsonFormat, OcrMode, PageSelection, ParseOptions, StructuredDocument, Structurer,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pdfstruct")]
#[command(version)]
#[command(
    about = "Reconstruct headings, sections and content placement from extracted PDF content",
    long_about = None
)]
struct Cli {
    /// Raw extraction dump (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Structure a raw extraction dump and write JSON
    Parse(ParseArgs),

    /// Print the section outline
    Outline {
        /// Raw extraction dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show document information and structure statistics
    Info {
        /// Raw extraction dump (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct ParseArgs {
    /// Raw extraction dump (JSON)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long, visible_alias = "out", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Page range (e.g., "1-5,8,10-12")
    #[arg(long, visible_alias = "page-range")]
    pages: Option<String>,

    /// Maximum number of pages to process
    #[arg(long)]
    max_pages: Option<usize>,

    /// OCR every page
    #[arg(long, conflicts_with = "ocr_if_needed")]
    ocr: bool,

    /// OCR only pages without text
    #[arg(long)]
    ocr_if_needed: bool,

    /// OCR program and arguments; {page} and {dpi} are substituted
    #[arg(long, value_name = "CMD")]
    ocr_command: Option<String>,

    /// Resolution for OCR rendering
    #[arg(long, default_value_t = 300)]
    dpi: u32,

    /// Refine the result with a chat model
    #[arg(long)]
    vision: bool,

    /// Model used for refinement
    #[arg(long, env = "PDFSTRUCT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// API key for refinement
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Do not guess title and authors from the first page
    #[arg(long)]
    no_title_detect: bool,

    /// Disable parallel page processing
    #[arg(long)]
    sequential: bool,
}

impl ParseArgs {
    fn with_defaults(input: PathBuf, output: Option<PathBuf>) -> Self {
        Self {
            input,
            output,
            compact: false,
            pages: None,
            max_pages: None,
            ocr: false,
            ocr_if_needed: false,
            ocr_command: None,
            dpi: 300,
            vision: false,
            model: DEFAULT_MODEL.to_string(),
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            no_title_detect: false,
            sequential: false,
        }
    }

    fn ocr_mode(&self) -> OcrMode {
        if self.ocr {
            OcrMode::Always
        } else if self.ocr_if_needed {
            OcrMode::IfNeeded
        } else {
            OcrMode::Never
        }
    }

    fn parse_options(&self) -> ParseOptions {
        let mut options = ParseOptions::new()
            .lenient()
            .with_ocr(self.ocr_mode())
            .with_ocr_dpi(self.dpi)
            .with_parallel(!self.sequential)
            .with_title_detection(!self.no_title_detect);
        if let Some(pages) = &self.pages {
            options = options.with_pages(PageSelection::parse(pages));
        }
        if let Some(max) = self.max_pages {
            options = options.with_max_pages(max);
        }
        options
    }

    fn structurer(&self) -> CliResult<Structurer> {
        let mut structurer = Structurer::new().with_options(self.parse_options());

        let mode = self.ocr_mode();
        if mode != OcrMode::Never {
            let command = self
                .ocr_command
                .as_deref()
                .ok_or("OCR requested but no --ocr-command given")?;
            let engine = CommandOcr::from_command_line(command.split_whitespace())?;
            structurer = structurer.with_ocr(engine, mode);
        }

        if self.vision {
            let key = self
                .api_key
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .ok_or("--vision requires OPENAI_API_KEY")?;
            let refiner = OpenAiRefiner::new(key)?.with_model(&self.model);
            structurer = structurer.with_refiner(refiner);
        }

        Ok(structurer)
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Some(Commands::Parse(args)) => cmd_parse(&args),
        Some(Commands::Outline { input }) => cmd_outline(&input),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: parse if input is provided
            if let Some(input) = cli.input {
                cmd_parse(&ParseArgs::with_defaults(input, cli.output))
            } else {
                println!("{}", "Usage: pdfstruct <FILE> [-o OUTPUT]".yellow());
                println!("       pdfstruct --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

fn load(input: &Path) -> CliResult<StructuredDocument> {
    let structurer = Structurer::new().with_options(ParseOptions::new().lenient());
    Ok(structurer.parse_file(input)?)
}

fn cmd_parse(args: &ParseArgs) -> CliResult<()> {
    let structurer = args.structurer()?;

    let pb = args.output.as_ref().map(|_| spinner("Structuring document..."));
    let doc = structurer.parse_file(&args.input)?;

    let format = if args.compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&doc, format)?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if let Some(path) = &args.output {
        fs::write(path, &json)?;
        let stats = doc.stats();
        println!(
            "{} {} ({} pages, {} sections)",
            "Saved to".green(),
            path.display(),
            stats.pages,
            stats.sections
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_outline(input: &Path) -> CliResult<()> {
    let doc = load(input)?;
    if doc.sections.is_empty() {
        println!("{}", "No sections found".yellow());
    } else {
        print!("{}", to_outline(&doc.sections));
    }
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult<()> {
    let doc = load(input)?;
    let meta = &doc.meta;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), meta.pages);

    if let Some(ref title) = meta.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if !meta.authors.is_empty() {
        println!("{}: {}", "Authors".bold(), meta.authors.join(", "));
    }
    if let Some(ref creator) = meta.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref producer) = meta.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(created) = meta.created() {
        println!("{}: {}", "Created".bold(), created.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    if let Some(modified) = meta.modified() {
        println!("{}: {}", "Modified".bold(), modified.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!(
        "{}: {}",
        "Outline".bold(),
        if meta.toc.is_empty() {
            "none (sections inferred from headings)".to_string()
        } else {
            format!("{} entries", meta.toc.len())
        }
    );

    let stats = doc.stats();

    println!();
    println!("{}", "Structure Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Sections".bold(), stats.sections);
    println!("{}: {}", "Headings".bold(), stats.headings);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Images".bold(), stats.images);
    println!("{}: {}", "Links".bold(), stats.links);
    println!(
        "{}: {} blocks, {} images, {} links",
        "Placed".bold(),
        stats.placed_blocks,
        stats.placed_images,
        stats.placed_links
    );
    if stats.unplaced() > 0 {
        println!("{}: {}", "Unplaced".yellow().bold(), stats.unplaced());
    }

    log::debug!("Stats: {}", serde_json::to_string(&stats)?);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfstruct".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document structure reconstruction tool");
    println!();
    println!("License: MIT");
}
