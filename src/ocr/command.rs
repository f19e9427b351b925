//! OCR through an external program.

use std::process::Command;

use super::OcrEngine;
use crate::error::{Error, Result};
use crate::model::RawPage;

/// Runs an external recognizer once per page and reads the text from stdout.
///
/// Arguments may contain the placeholders `{page}` (1-indexed page number)
/// and `{dpi}`, substituted before each run. A typical setup renders the page
/// and pipes it through tesseract in a small wrapper script.
#[derive(Debug, Clone)]
pub struct CommandOcr {
    program: String,
    args: Vec<String>,
}

impl CommandOcr {
    /// Create an engine for `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Build from a command line split into words; the first word is the program.
    pub fn from_command_line<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words = words.into_iter().map(Into::into);
        let program = words
            .next()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| Error::Ocr("empty OCR command".to_string()))?;
        Ok(Self {
            program,
            args: words.collect(),
        })
    }

    /// Append an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments with placeholders substituted for one run.
    pub fn resolved_args(&self, page: u32, dpi: u32) -> Vec<String> {
        let page = page.to_string();
        let dpi = dpi.to_string();
        self.args
            .iter()
            .map(|a| a.replace("{page}", &page).replace("{dpi}", &dpi))
            .collect()
    }
}

impl OcrEngine for CommandOcr {
    fn recognize(&self, page: &RawPage, dpi: u32) -> Result<String> {
        let output = Command::new(&self.program)
            .args(self.resolved_args(page.number, dpi))
            .output()
            .map_err(|e| Error::Ocr(format!("failed to run {}: {}", self.program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Ocr(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
