use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::SampleId;

/// Error type for corpus reads, query arguments, and export failures.
#[derive(Debug, Error)]
pub enum AlloyError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("note '{}' is unreadable: {reason}", path.display())]
    NoteUnreadable { path: PathBuf, reason: String },
    #[error("sample '{sample_id}' is unavailable: {reason}")]
    SampleUnavailable { sample_id: SampleId, reason: String },
    #[error("unknown dataset field '{0}'")]
    UnknownField(String),
    #[error("invalid predicate: {0}")]
    InvalidPredicate(String),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("export failed: {0}")]
    Export(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_item() {
        let err = AlloyError::UnknownField("Zz".to_string());
        assert_eq!(err.to_string(), "unknown dataset field 'Zz'");

        let err = AlloyError::NoteUnreadable {
            path: PathBuf::from("0001/0001DSC.md"),
            reason: "stream did not contain valid UTF-8".to_string(),
        };
        assert!(err.to_string().contains("0001DSC.md"));
    }
}
