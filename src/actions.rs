use crate::model::{clamp_stat, LastAction, PetState};
use crate::sim::{derive, PetEvent};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Feed,
    Play,
    Bathe,
    Pet,
    Sleep,
    Wake,
}

pub const MINI_GAME_BONUS: f32 = 20.0;

/// Why an action was refused. The message is what the player sees.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rejection {
    #[error("Zzz... let it sleep.")]
    Sleeping,
    #[error("It's stuffed. Save that for later.")]
    Full,
    #[error("It's worn out. Let it take a nap first.")]
    Exhausted,
    #[error("It's starving. Make it a snack first.")]
    Starving,
    #[error("A bath while it's asleep? Seriously?")]
    SleepingBath,
    #[error("Another bath? Any more and it'll smell of bleach.")]
    AlreadyClean,
    #[error("Bother it while it sleeps and it'll wake up cranky.")]
    SleepingPet,
    #[error("It's in a foul mood. It might bite.")]
    Grumpy,
    #[error("It's already asleep.")]
    AlreadyAsleep,
    #[error("It's way too energetic. Play with it to tire it out.")]
    TooEnergetic,
    #[error("It's filthy. Give it a bath before bed.")]
    TooDirty,
    #[error("Putting it to bed hungry? Feed it something first.")]
    HungryAtBedtime,
    #[error("It's already awake.")]
    AlreadyAwake,
}

impl PetState {
    /// Validate `action` against the current snapshot without touching it.
    pub fn check(&self, action: Action) -> Result<(), Rejection> {
        let cap = self.cap();
        let n = &self.needs;
        let asleep = self.is_sleeping();
        match action {
            Action::Feed => {
                if asleep {
                    return Err(Rejection::Sleeping);
                }
                if n.hunger >= cap - 5.0 {
                    return Err(Rejection::Full);
                }
            }
            Action::Play => {
                if asleep {
                    return Err(Rejection::Sleeping);
                }
                if n.energy < 20.0 {
                    return Err(Rejection::Exhausted);
                }
                if n.hunger < 20.0 {
                    return Err(Rejection::Starving);
                }
            }
            Action::Bathe => {
                if asleep {
                    return Err(Rejection::SleepingBath);
                }
                if n.cleanliness > cap - 5.0 {
                    return Err(Rejection::AlreadyClean);
                }
            }
            Action::Pet => {
                if asleep {
                    return Err(Rejection::SleepingPet);
                }
                if n.happiness < 10.0 {
                    return Err(Rejection::Grumpy);
                }
            }
            Action::Sleep => {
                if asleep {
                    return Err(Rejection::AlreadyAsleep);
                }
                if n.energy > 80.0 {
                    return Err(Rejection::TooEnergetic);
                }
                if n.cleanliness < 30.0 {
                    return Err(Rejection::TooDirty);
                }
                if n.hunger < 30.0 {
                    return Err(Rejection::HungryAtBedtime);
                }
            }
            Action::Wake => {
                if !asleep {
                    return Err(Rejection::AlreadyAwake);
                }
            }
        }
        Ok(())
    }

    /// Validate and apply one player action. A rejection leaves `self` untouched.
    pub fn apply_action(
        &mut self,
        action: Action,
        now: DateTime<Utc>,
    ) -> Result<Vec<PetEvent>, Rejection> {
        self.check(action)?;

        let cap = self.cap();
        let n = &mut self.needs;
        match action {
            Action::Feed => {
                n.hunger = clamp_stat(n.hunger + 20.0, cap);
                n.happiness = clamp_stat(n.happiness + 10.0, cap);
                n.cleanliness = clamp_stat(n.cleanliness - 5.0, cap);
                self.stats.times_fed += 1;
                self.last_action = LastAction::Eat;
            }
            Action::Play => {
                n.energy = clamp_stat(n.energy - 20.0, cap);
                n.happiness = clamp_stat(n.happiness + 20.0, cap);
                n.cleanliness = clamp_stat(n.cleanliness - 10.0, cap);
                n.hunger = clamp_stat(n.hunger - 15.0, cap);
                self.stats.times_played += 1;
                self.last_action = LastAction::Play;
            }
            Action::Bathe => {
                n.cleanliness = cap;
                n.happiness = clamp_stat(n.happiness - 5.0, cap);
                self.stats.times_bathed += 1;
                self.last_action = LastAction::Bathe;
            }
            Action::Pet => {
                n.happiness = clamp_stat(n.happiness + 15.0, cap);
                self.stats.times_petted += 1;
                self.last_action = LastAction::Pet;
            }
            Action::Sleep => {
                self.last_action = LastAction::Sleep;
                self.sleep_start_time = Some(now);
            }
            Action::Wake => {
                self.last_action = LastAction::None;
                self.sleep_start_time = None;
            }
        }

        let mut events = vec![PetEvent::Performed(action)];
        events.extend(derive(self));
        Ok(events)
    }

    /// Reward from a finished mini-game. No preconditions.
    pub fn mini_game_bonus(&mut self) -> Vec<PetEvent> {
        self.needs.happiness = clamp_stat(self.needs.happiness + MINI_GAME_BONUS, self.cap());
        let mut events = vec![PetEvent::BonusAwarded];
        events.extend(derive(self));
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::achievements::Achievement;
    use crate::evolution::Stage;
    use crate::model::{Mood, Needs};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap()
    }

    fn pet(h: f32, e: f32, hp: f32, c: f32) -> PetState {
        let mut p = PetState::new(now());
        p.needs = Needs {
            hunger: h,
            energy: e,
            happiness: hp,
            cleanliness: c,
        };
        p
    }

    fn asleep(mut p: PetState) -> PetState {
        p.last_action = LastAction::Sleep;
        p.sleep_start_time = Some(now());
        p
    }

    #[test]
    fn feed_from_seventy() {
        let mut p = pet(70.0, 100.0, 100.0, 100.0);
        let events = p.apply_action(Action::Feed, now()).unwrap();
        assert_eq!(events[0], PetEvent::Performed(Action::Feed));
        assert_eq!(p.needs.hunger, 90.0);
        assert_eq!(p.needs.happiness, 100.0);
        assert_eq!(p.needs.cleanliness, 95.0);
        assert_eq!(p.stats.times_fed, 1);
        assert_eq!(p.last_action, LastAction::Eat);
    }

    #[test]
    fn feed_rejected_once_full() {
        let mut p = pet(80.0, 100.0, 50.0, 100.0);
        p.apply_action(Action::Feed, now()).unwrap();
        assert_eq!(p.needs.hunger, 100.0);
        let before = p.clone();
        assert_eq!(p.apply_action(Action::Feed, now()), Err(Rejection::Full));
        assert_eq!(p, before);

        let mut p = pet(99.0, 100.0, 50.0, 100.0);
        assert_eq!(p.apply_action(Action::Feed, now()), Err(Rejection::Full));
        assert_eq!(p.stats.times_fed, 0);
    }

    #[test]
    fn feed_threshold_follows_stage_cap() {
        let mut p = pet(100.0, 100.0, 50.0, 100.0);
        p.evolution_stage = Stage::Young;
        assert!(p.apply_action(Action::Feed, now()).is_ok());
        assert_eq!(p.needs.hunger, 120.0);
    }

    #[test]
    fn play_preconditions_in_order() {
        assert_eq!(
            asleep(pet(10.0, 10.0, 50.0, 50.0)).check(Action::Play),
            Err(Rejection::Sleeping)
        );
        assert_eq!(pet(10.0, 19.0, 50.0, 50.0).check(Action::Play), Err(Rejection::Exhausted));
        assert_eq!(pet(19.0, 20.0, 50.0, 50.0).check(Action::Play), Err(Rejection::Starving));

        let mut p = pet(20.0, 20.0, 90.0, 5.0);
        p.apply_action(Action::Play, now()).unwrap();
        assert_eq!(p.needs.energy, 0.0);
        assert_eq!(p.needs.happiness, 100.0);
        assert_eq!(p.needs.cleanliness, 0.0);
        assert_eq!(p.needs.hunger, 5.0);
        assert_eq!(p.stats.times_played, 1);
    }

    #[test]
    fn bathe_fills_cleanliness_to_cap() {
        assert_eq!(
            asleep(pet(50.0, 50.0, 50.0, 50.0)).check(Action::Bathe),
            Err(Rejection::SleepingBath)
        );
        assert_eq!(pet(50.0, 50.0, 50.0, 96.0).check(Action::Bathe), Err(Rejection::AlreadyClean));

        let mut p = pet(50.0, 50.0, 3.0, 95.0);
        p.evolution_stage = Stage::Adult;
        p.apply_action(Action::Bathe, now()).unwrap();
        assert_eq!(p.needs.cleanliness, 150.0);
        assert_eq!(p.needs.happiness, 0.0);
        assert_eq!(p.stats.times_bathed, 1);
    }

    #[test]
    fn pet_needs_some_happiness() {
        assert_eq!(
            asleep(pet(50.0, 50.0, 50.0, 50.0)).check(Action::Pet),
            Err(Rejection::SleepingPet)
        );
        assert_eq!(pet(50.0, 50.0, 9.0, 50.0).check(Action::Pet), Err(Rejection::Grumpy));

        let mut p = pet(50.0, 50.0, 95.0, 50.0);
        p.apply_action(Action::Pet, now()).unwrap();
        assert_eq!(p.needs.happiness, 100.0);
        assert_eq!(p.stats.times_petted, 1);
    }

    #[test]
    fn sleep_preconditions() {
        assert_eq!(
            asleep(pet(50.0, 50.0, 50.0, 50.0)).check(Action::Sleep),
            Err(Rejection::AlreadyAsleep)
        );
        assert_eq!(pet(50.0, 81.0, 50.0, 50.0).check(Action::Sleep), Err(Rejection::TooEnergetic));
        assert_eq!(pet(50.0, 80.0, 50.0, 29.0).check(Action::Sleep), Err(Rejection::TooDirty));
        assert_eq!(
            pet(29.0, 80.0, 50.0, 30.0).check(Action::Sleep),
            Err(Rejection::HungryAtBedtime)
        );

        let mut p = pet(50.0, 75.0, 50.0, 50.0);
        p.mood = Mood::Sad;
        p.apply_action(Action::Sleep, now()).unwrap();
        assert!(p.is_sleeping());
        assert_eq!(p.sleep_start_time, Some(now()));
        assert_eq!(p.mood, Mood::Sad);
    }

    #[test]
    fn wake_requires_sleep_and_recomputes_mood() {
        assert_eq!(pet(50.0, 50.0, 50.0, 50.0).check(Action::Wake), Err(Rejection::AlreadyAwake));

        let mut p = asleep(pet(10.0, 50.0, 50.0, 50.0));
        p.mood = Mood::Happy;
        p.apply_action(Action::Wake, now()).unwrap();
        assert!(!p.is_sleeping());
        assert!(p.sleep_start_time.is_none());
        assert_eq!(p.mood, Mood::Hungry);
    }

    #[test]
    fn rejections_have_distinct_messages() {
        let all = [
            Rejection::Sleeping,
            Rejection::Full,
            Rejection::Exhausted,
            Rejection::Starving,
            Rejection::SleepingBath,
            Rejection::AlreadyClean,
            Rejection::SleepingPet,
            Rejection::Grumpy,
            Rejection::AlreadyAsleep,
            Rejection::TooEnergetic,
            Rejection::TooDirty,
            Rejection::HungryAtBedtime,
            Rejection::AlreadyAwake,
        ];
        let mut msgs: Vec<String> = all.iter().map(|r| r.to_string()).collect();
        msgs.sort();
        msgs.dedup();
        assert_eq!(msgs.len(), all.len());
    }

    #[test]
    fn bonus_ignores_sleep_and_caps() {
        let mut p = asleep(pet(50.0, 50.0, 90.0, 50.0));
        let events = p.mini_game_bonus();
        assert_eq!(events[0], PetEvent::BonusAwarded);
        assert_eq!(p.needs.happiness, 100.0);
    }

    #[test]
    fn master_chef_unlocks_on_fiftieth_meal() {
        let mut p = pet(10.0, 100.0, 50.0, 100.0);
        p.stats.times_fed = 49;
        let events = p.apply_action(Action::Feed, now()).unwrap();
        assert!(events.contains(&PetEvent::AchievementUnlocked(Achievement::MasterChef)));
        assert!(p.has_achievement(Achievement::MasterChef));
        let events = p.apply_action(Action::Feed, now()).unwrap();
        assert!(!events.contains(&PetEvent::AchievementUnlocked(Achievement::MasterChef)));
    }
}
