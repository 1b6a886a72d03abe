//! Sound effects, background music and toasts.
//!
//! There is no audio device behind this: cues queue up and the host drains
//! them (the terminal host rings the bell and prints toasts). Owned by the
//! host and handed to the engine as its [`Feedback`].

use crate::ports::{Feedback, SoundEffect, ToastKind};
use std::collections::VecDeque;

const MAX_PENDING: usize = 64;

#[derive(Clone, Debug, PartialEq)]
pub enum Cue {
    Sound(SoundEffect),
    Toast { message: String, kind: ToastKind },
}

#[derive(Debug)]
pub struct SoundBoard {
    sound_enabled: bool,
    music_enabled: bool,
    music_playing: bool,
    started: bool,
    pending: VecDeque<Cue>,
}

impl SoundBoard {
    pub fn new(sound_enabled: bool, music_enabled: bool) -> Self {
        Self {
            sound_enabled,
            music_enabled,
            music_playing: false,
            started: false,
            pending: VecDeque::new(),
        }
    }

    pub fn start(&mut self) {
        self.started = true;
        if self.music_enabled {
            self.start_music();
        }
        tracing::debug!(sound = self.sound_enabled, music = self.music_enabled, "audio ready");
    }

    pub fn shutdown(&mut self) {
        self.stop_music();
        self.pending.clear();
        self.started = false;
        tracing::debug!("audio released");
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        tracing::info!(enabled = self.sound_enabled, "sound toggled");
        self.sound_enabled
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        if self.music_enabled {
            self.start_music();
        } else {
            self.stop_music();
        }
        tracing::info!(enabled = self.music_enabled, "music toggled");
        self.music_enabled
    }

    fn start_music(&mut self) {
        if self.started && !self.music_playing {
            self.music_playing = true;
        }
    }

    fn stop_music(&mut self) {
        self.music_playing = false;
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Cue> + '_ {
        self.pending.drain(..)
    }

    fn push(&mut self, cue: Cue) {
        if self.pending.len() >= MAX_PENDING {
            self.pending.pop_front();
        }
        self.pending.push_back(cue);
    }
}

impl Feedback for SoundBoard {
    fn play(&mut self, effect: SoundEffect) {
        if !self.sound_enabled {
            return;
        }
        tracing::trace!(?effect, "sound");
        self.push(Cue::Sound(effect));
    }

    fn toast(&mut self, message: &str, kind: ToastKind) {
        self.push(Cue::Toast {
            message: message.to_string(),
            kind,
        });
    }
}
