use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A reducer was constructed without an override variables file.
    #[error("no override variables file configured")]
    MissingVarsFile,

    /// The override variables file could not be read.
    #[error("failed to read override variables from {path}")]
    VarsFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external stylesheet compiler rejected the reduced source.
    #[error("stylesheet compiler failed")]
    Compile(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, Error>;
