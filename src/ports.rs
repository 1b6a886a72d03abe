//! Seams between the pet core and the world around it.

use crate::error::Result;
use crate::model::PetState;
use chrono::{DateTime, Utc};
use std::cell::Cell;
use std::rc::Rc;

pub trait Persistence {
    fn load(&mut self) -> Result<Option<PetState>>;
    fn save(&mut self, state: &PetState) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Reminder {
    Hunger,
    Energy,
    Happiness,
    Cleanliness,
    Daily,
}

impl Reminder {
    pub const STATS: [Reminder; 4] = [
        Reminder::Hunger,
        Reminder::Energy,
        Reminder::Happiness,
        Reminder::Cleanliness,
    ];
}

/// Fire-and-forget notifications. Implementations swallow their own failures.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
    fn schedule_reminder(&mut self, reminder: Reminder, body: &str);
    fn cancel_reminder(&mut self, reminder: Reminder);
    fn cancel_all(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Eat,
    Play,
    Bath,
    Sleep,
    Pet,
    Achievement,
    LevelUp,
    GameWin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

pub trait Feedback {
    fn play(&mut self, effect: SoundEffect);
    fn toast(&mut self, message: &str, kind: ToastKind);
}

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug)]
pub struct ManualClock(Rc<Cell<DateTime<Utc>>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Rc::new(Cell::new(start)))
    }

    pub fn advance(&self, by: chrono::Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.0.get()
    }
}
