use crate::config::write_json_atomic;
use crate::error::{PetError, Result};
use crate::model::PetState;
use crate::ports::Persistence;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

pub const SAVE_VERSION: u32 = 1;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub state: PetState,
}

impl SaveFile {
    fn parse(raw: &str) -> Result<PetState> {
        let save: SaveFile = serde_json::from_str(raw)?;
        if save.version > SAVE_VERSION {
            return Err(PetError::UnsupportedVersion {
                found: save.version,
                supported: SAVE_VERSION,
            });
        }
        Ok(save.state)
    }
}

/// Pet snapshot stored as pretty JSON, replaced atomically on every save.
///
/// A file that cannot be read back is moved aside to `*.json.bad` before the
/// error is returned, so the fresh pet the engine falls back to never
/// overwrites the old lifetime record.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_aside_path(&self) -> PathBuf {
        self.path.with_extension("json.bad")
    }

    fn set_aside(&self) {
        let aside = self.set_aside_path();
        match fs::rename(&self.path, &aside) {
            Ok(()) => tracing::warn!(kept = %aside.display(), "unreadable save moved aside"),
            Err(e) => tracing::warn!(error = %e, "could not move unreadable save aside"),
        }
    }
}

impl Persistence for JsonFileStore {
    fn load(&mut self) -> Result<Option<PetState>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match SaveFile::parse(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                self.set_aside();
                Err(e)
            }
        }
    }

    fn save(&mut self, state: &PetState) -> Result<()> {
        write_json_atomic(
            &self.path,
            &SaveFile {
                version: SAVE_VERSION,
                state: state.clone(),
            },
        )
    }
}

/// Keeps the last saved snapshot in memory. `fail_reads` and `fail_writes`
/// make loads or saves error out, for exercising the engine's failure paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub saved: Option<PetState>,
    pub saves: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

impl MemoryStore {
    pub fn with_state(state: PetState) -> Self {
        Self {
            saved: Some(state),
            ..Self::default()
        }
    }
}

impl Persistence for MemoryStore {
    fn load(&mut self) -> Result<Option<PetState>> {
        if self.fail_reads {
            return Err(PetError::Unavailable("reads disabled".to_string()));
        }
        Ok(self.saved.clone())
    }

    fn save(&mut self, state: &PetState) -> Result<()> {
        if self.fail_writes {
            return Err(PetError::Unavailable("writes disabled".to_string()));
        }
        self.saved = Some(state.clone());
        self.saves += 1;
        Ok(())
    }
}
