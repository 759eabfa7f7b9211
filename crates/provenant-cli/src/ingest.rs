//! Reading input files into documents.

use crate::error::{CliError, Result};
use provenant_domain::{DocumentFormat, DocumentMetadata, NerEntity, RawDocument};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Metadata declared on the command line
#[derive(Debug, Clone, Default)]
pub struct Declared {
    /// Declared license
    pub license: Option<String>,
    /// Declared document type
    pub document_type: Option<String>,
}

impl Declared {
    fn metadata(&self) -> DocumentMetadata {
        DocumentMetadata {
            license: self.license.clone(),
            document_type: self.document_type.clone(),
            ..Default::default()
        }
    }
}

/// Read a text-based file as a document.
///
/// Plain text, Markdown and HTML are read as text. Files without a known
/// extension are accepted when they hold valid UTF-8. Binary formats are
/// rejected.
pub fn read_document(path: &Path, declared: &Declared) -> Result<RawDocument> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::InvalidInput(format!("'{}' is not a file", path.display())))?;

    let format = DocumentFormat::from_filename(&filename);
    if !format.is_textual() && format != DocumentFormat::Other {
        return Err(CliError::InvalidInput(format!(
            "unsupported format '{}'",
            format
        )));
    }

    let bytes = fs::read(path)?;
    if format == DocumentFormat::Other && std::str::from_utf8(&bytes).is_err() {
        return Err(CliError::InvalidInput("file is not UTF-8 text".into()));
    }

    debug!("Read '{}' as {} ({} bytes)", filename, format, bytes.len());
    Ok(RawDocument::from_bytes(filename, &bytes).with_metadata(declared.metadata()))
}

/// Load entities from a JSON array produced by an external NER pass.
pub fn read_ner(path: &Path) -> Result<Vec<NerEntity>> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
