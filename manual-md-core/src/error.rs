//! Error types for conversion and for the batch pipeline.
//!
//! [`ConvertError`] covers everything that can go wrong while turning one parsed
//! manual into Markdown. Two kinds matter most:
//! - [`ConvertError::MissingField`]: a required field was not there when it had to be read.
//! - [`ConvertError::UnconsumedFields`]: a record carried fields the schema does not know.
//!   This keeps authored content from being dropped silently, so it aborts just like a
//!   lookup failure unless the caller decides otherwise (see [`ConvertError::is_unconsumed`]).
//!
//! [`PipelineError`] wraps filesystem, YAML and conversion failures with the manual they
//! belong to. Its messages name the manual only; the wrapped error is its `source()`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("{path} is missing required field `{field}`")]
    MissingField { path: String, field: &'static str },

    #[error("{path} still contains fields {fields:?}")]
    UnconsumedFields { path: String, fields: Vec<String> },

    #[error("{path} must be a mapping")]
    NotARecord { path: String },

    #[error("field `{field}` of {path} must be {expected}")]
    InvalidField {
        path: String,
        field: String,
        expected: &'static str,
    },

    #[error("pages `{first}` and `{second}` would both be written to {file_name}")]
    PageCollision {
        file_name: String,
        first: String,
        second: String,
    },

    #[error("section title `{title}` does not produce a usable file name")]
    EmptySlug { title: String },

    #[error("failed to serialize front-matter: {0}")]
    FrontMatter(#[from] serde_yaml::Error),
}

impl ConvertError {
    /// True for the warning-class error raised when a record was not fully drained.
    pub fn is_unconsumed(&self) -> bool {
        matches!(self, ConvertError::UnconsumedFields { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to list manuals in {path:?}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read manual {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manual {path:?}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to convert manual {path:?}")]
    Manual {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },
}

impl PipelineError {
    /// The conversion error behind this failure, if it is one.
    pub fn convert_error(&self) -> Option<&ConvertError> {
        match self {
            PipelineError::Manual { source, .. } => Some(source),
            _ => None,
        }
    }
}
