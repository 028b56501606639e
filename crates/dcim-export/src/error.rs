//! Error taxonomy for the export pipeline.

use thiserror::Error;

use crate::dcim::DcimError;

/// Errors surfaced by the pipeline and the encoders.
///
/// Every stage is fail-fast: the first error aborts the stage and the run.
#[derive(Error, Debug)]
pub enum ExportError {
    /// A value expected to be an address or address+prefix failed to parse.
    #[error("could not parse address {0:?}")]
    AddressParse(String),

    /// An upstream custom field did not have the expected shape.
    #[error("custom field {field}: expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// The DCIM client failed while a stage was fetching.
    #[error("{stage}: upstream fetch failed")]
    UpstreamFetch {
        stage: String,
        #[source]
        source: DcimError,
    },

    /// The machine collection could not be encoded.
    #[error("encode machine collection: {0}")]
    Encode(#[source] serde_json::Error),

    /// The intermediate encoding could not be decoded back into machines.
    #[error("decode machine collection: {0}")]
    Decode(#[source] serde_json::Error),

    /// CSV emission failed.
    #[error("CSV output: {0}")]
    Csv(#[from] csv::Error),

    /// Underlying file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Wrap a client failure with the stage that triggered the fetch.
    pub(crate) fn fetch(stage: impl Into<String>, source: DcimError) -> Self {
        Self::UpstreamFetch {
            stage: stage.into(),
            source,
        }
    }
}
