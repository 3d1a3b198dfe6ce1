// core/src/error.rs
//
// Error taxonomy for loading, normalizing and writing word frequency maps.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a normalization run.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON{}: {source}", display_path(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing top-level key `{0}`")]
    MissingKey(&'static str),

    #[error("schema error: {0}")]
    Schema(String),

    #[error("id `{id}` referenced by {context} has no word in spool_map")]
    UnknownId { id: String, context: String },

    #[error("row `{source_id}` sums to zero; cannot normalize")]
    ZeroTotal { source_id: String },

    #[error("failed to serialize word map: {0}")]
    Serialize(#[source] serde_json::Error),
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" in {}", p.display()),
        None => String::new(),
    }
}

impl NormalizeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NormalizeError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, NormalizeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = NormalizeError::UnknownId {
            id: "5".into(),
            context: "row `1`".into(),
        };
        assert_eq!(
            e.to_string(),
            "id `5` referenced by row `1` has no word in spool_map"
        );

        let e = NormalizeError::ZeroTotal {
            source_id: "7".into(),
        };
        assert!(e.to_string().contains("`7`"));

        assert_eq!(
            NormalizeError::MissingKey("freq_mat").to_string(),
            "missing top-level key `freq_mat`"
        );
    }
}
