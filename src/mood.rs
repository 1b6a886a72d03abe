use crate::model::{Mood, PetState};

pub const HUNGRY_BELOW: f32 = 25.0;
pub const DIRTY_BELOW: f32 = 30.0;
pub const TIRED_BELOW: f32 = 30.0;

/// Mood for the current snapshot.
///
/// Thresholds are absolute, not scaled by the stage cap, so an elder with a
/// 200 cap reads as hungry at the same value as a baby. A sleeping pet keeps
/// whatever mood it fell asleep with.
pub fn classify(state: &PetState) -> Mood {
    if state.is_sleeping() {
        return state.mood;
    }
    let n = &state.needs;
    if n.hunger < HUNGRY_BELOW {
        return Mood::Hungry;
    }
    if n.cleanliness < DIRTY_BELOW {
        return Mood::Dirty;
    }
    if n.energy < TIRED_BELOW {
        return Mood::Tired;
    }
    let avg = n.average();
    if avg > 75.0 {
        Mood::Happy
    } else if avg > 50.0 {
        Mood::Normal
    } else if avg > 25.0 {
        Mood::Sad
    } else {
        Mood::Grumpy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::Stage;
    use crate::model::{LastAction, Needs};
    use chrono::Utc;

    fn with(h: f32, e: f32, hp: f32, c: f32) -> PetState {
        let mut p = PetState::new(Utc::now());
        p.needs = Needs {
            hunger: h,
            energy: e,
            happiness: hp,
            cleanliness: c,
        };
        p
    }

    #[test]
    fn urgent_needs_win_in_order() {
        assert_eq!(classify(&with(10.0, 10.0, 100.0, 10.0)), Mood::Hungry);
        assert_eq!(classify(&with(50.0, 10.0, 100.0, 10.0)), Mood::Dirty);
        assert_eq!(classify(&with(50.0, 10.0, 100.0, 50.0)), Mood::Tired);
    }

    #[test]
    fn average_bands() {
        assert_eq!(classify(&with(90.0, 90.0, 90.0, 90.0)), Mood::Happy);
        assert_eq!(classify(&with(60.0, 60.0, 60.0, 60.0)), Mood::Normal);
        assert_eq!(classify(&with(40.0, 40.0, 0.0, 40.0)), Mood::Sad);
        assert_eq!(classify(&with(30.0, 30.0, 0.0, 30.0)), Mood::Grumpy);
        // boundaries are strict
        assert_eq!(classify(&with(75.0, 75.0, 75.0, 75.0)), Mood::Normal);
    }

    #[test]
    fn sleep_freezes_mood() {
        let mut p = with(5.0, 5.0, 5.0, 5.0);
        p.mood = Mood::Happy;
        p.last_action = LastAction::Sleep;
        assert_eq!(classify(&p), Mood::Happy);
    }

    #[test]
    fn thresholds_ignore_stage_cap() {
        let mut p = with(24.0, 200.0, 200.0, 200.0);
        p.evolution_stage = Stage::Elder;
        assert_eq!(classify(&p), Mood::Hungry);
    }
}
