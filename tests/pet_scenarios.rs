//! End-to-end scenarios driving the engine through a manual clock.

use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use dokigotchi::achievements::Achievement;
use dokigotchi::audio::{Cue, SoundBoard};
use dokigotchi::config::EngineConfig;
use dokigotchi::evolution::{stage_for_days, Stage};
use dokigotchi::model::{LastAction, Needs};
use dokigotchi::notify::ReminderBoard;
use dokigotchi::ports::{ManualClock, SoundEffect};
use dokigotchi::sim::PetEvent;
use dokigotchi::storage::MemoryStore;
use dokigotchi::{Engine, PetState, Rejection};

type TestEngine = Engine<MemoryStore, ReminderBoard, SoundBoard, ManualClock>;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 10, 0, 0).unwrap()
}

fn start(state: PetState) -> (TestEngine, ManualClock) {
    let clock = ManualClock::new(t0());
    let mut e = Engine::new(
        EngineConfig::default(),
        clock.clone(),
        MemoryStore::with_state(state),
        ReminderBoard::new(),
        SoundBoard::new(true, false),
    );
    e.start();
    e.feedback_mut().drain().count();
    (e, clock)
}

fn pet_with(needs: Needs) -> PetState {
    let mut p = PetState::new(t0());
    p.needs = needs;
    p
}

fn sounds(e: &mut TestEngine) -> Vec<SoundEffect> {
    e.feedback_mut()
        .drain()
        .filter_map(|c| match c {
            Cue::Sound(s) => Some(s),
            Cue::Toast { .. } => None,
        })
        .collect()
}

#[test]
fn stage_lookup_reference_points() {
    assert_eq!(stage_for_days(0), Stage::Baby);
    assert_eq!(stage_for_days(7), Stage::Young);
    assert_eq!(stage_for_days(21), Stage::Adult);
    assert_eq!(stage_for_days(41), Stage::Elder);
    assert_eq!(stage_for_days(1_000_000), Stage::Elder);
}

#[test]
fn feeding_a_peckish_puppy() {
    let (mut e, _) = start(pet_with(Needs {
        hunger: 70.0,
        energy: 100.0,
        happiness: 100.0,
        cleanliness: 100.0,
    }));
    assert!(e.feed());
    let n = e.state().needs;
    assert_eq!(n.hunger, 90.0);
    assert_eq!(n.happiness, 100.0);
    assert_eq!(n.cleanliness, 95.0);
    assert_eq!(sounds(&mut e), vec![SoundEffect::Eat]);
}

#[test]
fn second_feed_is_rejected_once_full() {
    let (mut e, _) = start(pet_with(Needs {
        hunger: 80.0,
        energy: 50.0,
        happiness: 50.0,
        cleanliness: 50.0,
    }));
    assert!(e.feed());
    let after_first = e.state().clone();
    assert!(!e.feed());
    assert_eq!(e.state(), &after_first);
    assert_eq!(e.state().check(dokigotchi::Action::Feed), Err(Rejection::Full));
}

#[test]
fn sleep_energy_boundary() {
    let (mut e, _) = start(pet_with(Needs {
        hunger: 60.0,
        energy: 75.0,
        happiness: 60.0,
        cleanliness: 60.0,
    }));
    assert!(e.sleep());

    let (mut e, _) = start(pet_with(Needs {
        hunger: 60.0,
        energy: 81.0,
        happiness: 60.0,
        cleanliness: 60.0,
    }));
    assert_eq!(
        e.state().check(dokigotchi::Action::Sleep),
        Err(Rejection::TooEnergetic)
    );
    assert!(!e.sleep());
    assert_eq!(e.state().last_action, LastAction::None);
}

#[test]
fn six_recovery_ticks_wake_a_tired_puppy() {
    let (mut e, clock) = start(pet_with(Needs {
        hunger: 90.0,
        energy: 40.0,
        happiness: 90.0,
        cleanliness: 90.0,
    }));
    assert!(e.sleep());
    for tick in 1..=6 {
        clock.advance(ChronoDuration::seconds(60));
        e.advance();
        if tick < 6 {
            assert!(e.state().is_sleeping(), "woke early on tick {}", tick);
        }
    }
    assert_eq!(e.state().needs.energy, 100.0);
    assert_eq!(e.state().last_action, LastAction::None);
}

#[test]
fn starving_puppy_dies_once() {
    let mut p = PetState::new(t0() - ChronoDuration::days(2));
    p.last_update = t0();
    p.total_days_alive = 10;
    p.stats.times_fed = 12;
    p.achievements.push(Achievement::MasterChef);
    p.needs = Needs {
        hunger: 7.0,
        energy: 4.0,
        happiness: 4.0,
        cleanliness: 2.0,
    };
    let (mut e, clock) = start(p);

    // two minutes per decay run: everything bottoms out on the first one
    clock.advance(ChronoDuration::seconds(120));
    e.advance();
    let s = e.state();
    assert_eq!(s.deaths, 1);
    assert_eq!(s.total_days_alive, 12);
    assert_eq!(s.stats.times_fed, 12);
    assert!(s.has_achievement(Achievement::MasterChef));
    assert_eq!(s.evolution_stage, Stage::Baby);
    assert_eq!(s.days_alive, 0);
    assert_eq!(s.birth_date, t0() + ChronoDuration::seconds(120));
}

#[test]
fn consecutive_zero_ticks_only_kill_once() {
    let mut p = pet_with(Needs {
        hunger: 1.0,
        energy: 1.0,
        happiness: 1.0,
        cleanliness: 1.0,
    });
    let first = p.decay_tick(t0() + ChronoDuration::minutes(1)).unwrap();
    assert_eq!(
        first
            .iter()
            .filter(|e| matches!(e, PetEvent::Died { .. }))
            .count(),
        1
    );

    let mut zero = pet_with(Needs::full(0.0));
    for m in 1..=2 {
        let events = zero.decay_tick(t0() + ChronoDuration::minutes(m)).unwrap();
        assert!(!events.iter().any(|e| matches!(e, PetEvent::Died { .. })));
    }
    assert_eq!(zero.deaths, 0);
}

#[test]
fn a_week_old_pet_evolves_and_earns_week_survivor() {
    let mut p = PetState::new(t0() - ChronoDuration::days(7));
    p.last_update = t0();
    p.needs = Needs::full(60.0);
    let (mut e, clock) = start(p);
    assert_eq!(e.state().evolution_stage, Stage::Baby);

    clock.advance(ChronoDuration::seconds(60));
    e.advance();
    assert_eq!(e.state().evolution_stage, Stage::Young);
    assert!(e.state().has_achievement(Achievement::WeekSurvivor));
    // 60 - 3*1.2 + 30
    assert!((e.state().needs.hunger - 86.4).abs() < 1e-3);
    assert!(sounds(&mut e).contains(&SoundEffect::LevelUp));
}

#[test]
fn mini_game_bonus_reaches_achievements() {
    let (mut e, _) = start(pet_with(Needs {
        hunger: 100.0,
        energy: 100.0,
        happiness: 85.0,
        cleanliness: 100.0,
    }));
    e.mini_game_bonus();
    assert_eq!(e.state().needs.happiness, 100.0);
    assert!(e.state().has_achievement(Achievement::PerfectCare));
    let played = sounds(&mut e);
    assert_eq!(played, vec![SoundEffect::GameWin, SoundEffect::Achievement]);
}

#[test]
fn achievements_survive_death_and_reset() {
    let mut p = pet_with(Needs::full(1.0));
    p.achievements = vec![Achievement::Playmate, Achievement::WeekSurvivor];
    let (mut e, clock) = start(p);
    clock.advance(ChronoDuration::seconds(60));
    e.advance();
    assert_eq!(e.state().deaths, 1);
    e.reset();
    let held = &e.state().achievements;
    assert!(held.starts_with(&[Achievement::Playmate, Achievement::WeekSurvivor]));
}
