//! Dokigotchi: the simulation core of a virtual poodle.
//!
//! The pure rules (evolution table, mood, achievements, decay, actions, sleep)
//! operate on a [`model::PetState`] and report what happened as
//! [`sim::PetEvent`]s. The [`engine::Engine`] owns the timers and the
//! collaborators and turns those events into sounds, toasts, notifications
//! and saves.

pub mod achievements;
pub mod actions;
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod evolution;
pub mod model;
pub mod mood;
pub mod notify;
pub mod ports;
pub mod scheduler;
pub mod sim;
pub mod sleep;
pub mod storage;

pub use actions::{Action, Rejection};
pub use engine::Engine;
pub use model::{Mood, PetState};
