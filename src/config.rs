use crate::error::{PetError, Result};
use chrono::Duration as ChronoDuration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub pet_name: String,
    pub sound_enabled: bool,
    pub music_enabled: bool,
    pub notifications_enabled: bool,
    /// Stat reminders are scheduled for any need below this value.
    pub reminder_threshold: f32,
    pub decay_interval_secs: u64,
    pub sleep_interval_secs: u64,
    pub action_cue_millis: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pet_name: "Doki".to_string(),
            sound_enabled: true,
            music_enabled: false,
            notifications_enabled: true,
            reminder_threshold: 30.0,
            decay_interval_secs: 30,
            sleep_interval_secs: 60,
            action_cue_millis: 2100,
        }
    }
}

/// The timing and reminder knobs the engine needs, lifted out of [`Settings`].
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub pet_name: String,
    pub decay_interval: ChronoDuration,
    pub sleep_interval: ChronoDuration,
    pub action_cue: ChronoDuration,
    pub notifications_enabled: bool,
    pub reminder_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for EngineConfig {
    fn from(s: &Settings) -> Self {
        Self {
            pet_name: s.pet_name.clone(),
            decay_interval: ChronoDuration::seconds(s.decay_interval_secs.max(1) as i64),
            sleep_interval: ChronoDuration::seconds(s.sleep_interval_secs.max(1) as i64),
            action_cue: ChronoDuration::milliseconds(s.action_cue_millis as i64),
            notifications_enabled: s.notifications_enabled,
            reminder_threshold: s.reminder_threshold,
        }
    }
}

pub struct Paths {
    pub save_path: PathBuf,
    pub settings_path: PathBuf,
    pub log_path: PathBuf,
}

pub fn project_paths() -> Result<Paths> {
    let proj =
        ProjectDirs::from("com", "dokigotchi", "Dokigotchi").ok_or(PetError::NoProjectDirs)?;
    let dir = proj.data_local_dir().to_path_buf();
    fs::create_dir_all(&dir).ok();
    Ok(Paths {
        save_path: dir.join("save.json"),
        settings_path: dir.join("settings.json"),
        log_path: dir.join("dokigotchi.log"),
    })
}

pub fn load_settings(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(s) => match serde_json::from_str::<Settings>(&s) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "bad settings file, using defaults");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    write_json_atomic(path, s)
}

/// Serialize `value` next to `path` and move it into place, so a crash mid-write
/// leaves the previous file intact.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let staging = path.with_extension("json.tmp");
    fs::write(&staging, serde_json::to_vec_pretty(value)?)?;
    // Windows refuses to rename over an existing file
    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }
    fs::rename(&staging, path)?;
    Ok(())
}
