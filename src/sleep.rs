use crate::model::{LastAction, PetState};
use crate::sim::{derive, PetEvent};

pub const RECOVERY_PER_TICK: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SleepPhase {
    Awake,
    Asleep,
}

impl PetState {
    pub fn sleep_phase(&self) -> SleepPhase {
        if self.is_sleeping() {
            SleepPhase::Asleep
        } else {
            SleepPhase::Awake
        }
    }

    /// One recovery step. `None` means the pet is awake and the caller should
    /// stop its recovery timer.
    pub fn recovery_tick(&mut self) -> Option<Vec<PetEvent>> {
        if self.sleep_phase() == SleepPhase::Awake {
            return None;
        }
        let cap = self.cap();
        self.needs.energy = (self.needs.energy + RECOVERY_PER_TICK).min(cap);

        let mut events = Vec::new();
        if self.needs.energy >= cap {
            self.last_action = LastAction::None;
            self.sleep_start_time = None;
            tracing::info!(energy = self.needs.energy, "woke up rested");
            events.push(PetEvent::WokeRested);
        }
        events.extend(derive(self));
        Some(events)
    }
}
