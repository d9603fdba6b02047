use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::Variable;

#[derive(Debug, Error)]
pub enum Error {
    /// Constraint propagation left a variable without candidates.
    #[error("no candidate words left for {0}")]
    EmptyDomain(Variable),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
