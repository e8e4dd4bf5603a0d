//! Letter export: filename contract and document writers.
//!
//! Plain text is written here. PDF and word-processor documents are produced by
//! external writers; the only contract with them is the output text plus the
//! filename from `export_filename`.

pub mod handlers;

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Serializes as the file extension; deserializes leniently through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ExportFormat {
    #[serde(rename = "txt")]
    Text,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Text => "text/plain; charset=utf-8",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown export format '{0}'")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Text),
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for ExportFormat {
    type Error = UnknownFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `<subtype with whitespace runs as "_">_letter.<ext>`, e.g. `Admission_Letter_letter.pdf`.
pub fn export_filename(subtype: &str, format: ExportFormat) -> String {
    let stem = subtype.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{stem}_letter.{}", format.extension())
}

/// Turns the final letter text into document bytes.
pub trait DocumentWriter: Send + Sync {
    fn format(&self) -> ExportFormat;
    fn write(&self, text: &str) -> Vec<u8>;
}

pub struct PlainTextWriter;

impl DocumentWriter for PlainTextWriter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Text
    }

    fn write(&self, text: &str) -> Vec<u8> {
        text.as_bytes().to_vec()
    }
}

/// Writer for `format`, or `None` when that format is rendered by an external writer.
pub fn writer_for(format: ExportFormat) -> Option<Box<dyn DocumentWriter>> {
    match format {
        ExportFormat::Text => Some(Box::new(PlainTextWriter)),
        ExportFormat::Pdf | ExportFormat::Docx => None,
    }
}
