use crate::achievements::{evaluate, Achievement};
use crate::actions::Action;
use crate::evolution::{bonus_for, decay_multiplier_for, should_evolve, stage_for_days, Stage};
use crate::model::PetState;
use crate::mood::classify;
use chrono::{DateTime, Duration as ChronoDuration, Utc};

/// Base loss per elapsed minute, before the stage multiplier.
#[derive(Clone, Copy, Debug)]
pub struct DecayRates {
    pub hunger: f32,
    pub energy: f32,
    pub happiness: f32,
    pub cleanliness: f32,
}

pub const BASE_DECAY: DecayRates = DecayRates {
    hunger: 3.0,
    energy: 2.0,
    happiness: 2.0,
    cleanliness: 1.0,
};

/// Something that happened while mutating the pet. The engine turns these into
/// sounds, toasts and notifications; nothing in here touches a collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum PetEvent {
    Performed(Action),
    BonusAwarded,
    Evolved { from: Stage, to: Stage },
    AchievementUnlocked(Achievement),
    WokeRested,
    Died { days_lived: i64, deaths: u32 },
}

/// Recompute everything derived from the raw needs. Every mutation path ends here.
pub fn derive(state: &mut PetState) -> Vec<PetEvent> {
    state.mood = classify(state);
    let unlocked = evaluate(state);
    state.achievements.extend(unlocked.iter().copied());
    unlocked
        .into_iter()
        .map(PetEvent::AchievementUnlocked)
        .collect()
}

impl PetState {
    /// Apply whole elapsed minutes of decay. Returns `None` when less than a
    /// minute has passed since the last application.
    pub fn decay_tick(&mut self, now: DateTime<Utc>) -> Option<Vec<PetEvent>> {
        let minutes = (now - self.last_update).num_minutes();
        if minutes < 1 {
            return None;
        }

        let prev_hunger = self.needs.hunger;
        let scale = decay_multiplier_for(self.evolution_stage) * minutes as f32;

        self.needs.hunger = (self.needs.hunger - BASE_DECAY.hunger * scale).max(0.0);
        if !self.is_sleeping() {
            self.needs.energy = (self.needs.energy - BASE_DECAY.energy * scale).max(0.0);
        }
        self.needs.happiness = (self.needs.happiness - BASE_DECAY.happiness * scale).max(0.0);
        self.needs.cleanliness =
            (self.needs.cleanliness - BASE_DECAY.cleanliness * scale).max(0.0);

        self.last_update = self.last_update + ChronoDuration::minutes(minutes);
        self.days_alive = self.compute_days_alive(now);

        let mut events = Vec::new();
        if let Some(ev) = self.maybe_evolve() {
            events.push(ev);
        }

        self.mood = classify(self);

        // only the tick that takes hunger from above zero down counts as a death
        if self.needs.all_zero() && prev_hunger > 0.0 {
            let days_lived = self.days_alive;
            let mut next = self.next_life(now);
            next.deaths += 1;
            *self = next;
            tracing::info!(days_lived, deaths = self.deaths, "pet died");
            events.push(PetEvent::Died {
                days_lived,
                deaths: self.deaths,
            });
        }

        events.extend(derive(self));
        tracing::debug!(
            minutes,
            hunger = self.needs.hunger,
            energy = self.needs.energy,
            happiness = self.needs.happiness,
            cleanliness = self.needs.cleanliness,
            "decay applied"
        );
        Some(events)
    }

    fn maybe_evolve(&mut self) -> Option<PetEvent> {
        if !should_evolve(self.evolution_stage, self.days_alive) {
            return None;
        }
        let from = self.evolution_stage;
        let to = stage_for_days(self.days_alive);
        // never walk backwards outside of a death reset
        if to < from {
            return None;
        }
        let bonus = bonus_for(to);
        self.evolution_stage = to;
        let cap = self.cap();
        self.needs.hunger = (self.needs.hunger + bonus.hunger).min(cap);
        self.needs.energy = (self.needs.energy + bonus.energy).min(cap);
        self.needs.happiness = (self.needs.happiness + bonus.happiness).min(cap);
        self.needs.cleanliness = (self.needs.cleanliness + bonus.cleanliness).min(cap);
        tracing::info!(?from, ?to, days = self.days_alive, "pet evolved");
        Some(PetEvent::Evolved { from, to })
    }
}
