use thiserror::Error;

/// Failures of the collaborators around the pet. None of these ever reach the
/// player; the engine logs them and carries on with the in-memory state.
#[derive(Error, Debug)]
pub enum PetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("save file version {found} is newer than this build understands ({supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    #[error("could not resolve project directories")]
    NoProjectDirs,

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, PetError>;
