//! Rendering of structured documents.

mod json;
mod outline;

pub use json::{to_json, JsonFormat};
pub use outline::{outline_line, to_outline};
