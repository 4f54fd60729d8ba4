//! Errors raised while loading content

use std::path::PathBuf;
use thiserror::Error;

use super::frontmatter::FrontMatterError;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("post not found: {0}")]
    NotFound(String),

    #[error("bad front-matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("no markdown extensions configured")]
    NoExtensions,

    #[error("invalid extension pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ContentError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
