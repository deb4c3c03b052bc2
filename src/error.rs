use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions that abort a run. Everything else is absorbed by the passes.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("source {path:?} could not be read")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("boundary marker {marker:?} found {found} time(s), need at least 2")]
    BoundaryNotFound { marker: &'static str, found: usize },
}
