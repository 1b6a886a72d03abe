//! Life stages and the static evolution table.
//!
//! Every lookup is total: unknown or garbage input falls back to the first stage
//! so callers never have to handle a missing row.

use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    Baby,
    Young,
    Adult,
    Elder,
}

/// Flat amount added to every need when the pet reaches a stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageBonus {
    pub hunger: f32,
    pub energy: f32,
    pub happiness: f32,
    pub cleanliness: f32,
}

impl StageBonus {
    const fn uniform(v: f32) -> Self {
        Self {
            hunger: v,
            energy: v,
            happiness: v,
            cleanliness: v,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct StageInfo {
    pub stage: Stage,
    pub name: &'static str,
    pub emoji: &'static str,
    pub min_days: i64,
    /// Inclusive; `None` means the stage never ends.
    pub max_days: Option<i64>,
    pub max_stats: f32,
    pub decay_multiplier: f32,
    pub bonus: StageBonus,
    pub description: &'static str,
    /// `{name}` is replaced with the pet's name.
    pub evolution_message: &'static str,
    pub abilities: &'static [&'static str],
}

impl StageInfo {
    pub fn contains(&self, days: i64) -> bool {
        days >= self.min_days && self.max_days.map_or(true, |max| days <= max)
    }
}

pub static STAGES: [StageInfo; 4] = [
    StageInfo {
        stage: Stage::Baby,
        name: "Baby",
        emoji: "🐶",
        min_days: 0,
        max_days: Some(6),
        max_stats: 100.0,
        decay_multiplier: 1.2,
        bonus: StageBonus::uniform(20.0),
        description: "An adorable puppy that needs lots of care",
        evolution_message: "👶 {name} was born! An adorable baby",
        abilities: &["Extra cute", "Needs more care", "Stats decay 20% faster"],
    },
    StageInfo {
        stage: Stage::Young,
        name: "Young",
        emoji: "🐕",
        min_days: 7,
        max_days: Some(20),
        max_stats: 120.0,
        decay_multiplier: 1.0,
        bonus: StageBonus::uniform(30.0),
        description: "A young poodle full of energy",
        evolution_message: "🎉 {name} grew up! Now a young poodle",
        abilities: &["Energetic", "Learns fast", "Max stats: 120"],
    },
    StageInfo {
        stage: Stage::Adult,
        name: "Adult",
        emoji: "🦮",
        min_days: 21,
        max_days: Some(40),
        max_stats: 150.0,
        decay_multiplier: 0.8,
        bonus: StageBonus::uniform(50.0),
        description: "A wise and balanced adult poodle",
        evolution_message: "🌟 {name} evolved! A wise adult",
        abilities: &["Tough", "Balanced", "Max stats: 150", "Decays 20% slower"],
    },
    StageInfo {
        stage: Stage::Elder,
        name: "Elder",
        emoji: "🐕‍🦺",
        min_days: 41,
        max_days: None,
        max_stats: 200.0,
        decay_multiplier: 0.6,
        bonus: StageBonus::uniform(100.0),
        description: "An elder poodle full of experience and wisdom",
        evolution_message: "👴 {name} reached wisdom! A respected elder",
        abilities: &["Wise", "Very tough", "Max stats: 200", "Decays 40% slower"],
    },
];

impl Stage {
    pub fn info(self) -> &'static StageInfo {
        STAGES
            .iter()
            .find(|s| s.stage == self)
            .unwrap_or(&STAGES[0])
    }

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Baby => Some(Stage::Young),
            Stage::Young => Some(Stage::Adult),
            Stage::Adult => Some(Stage::Elder),
            Stage::Elder => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }
}

pub fn stage_for_days(days: i64) -> Stage {
    STAGES
        .iter()
        .find(|s| s.contains(days))
        .map(|s| s.stage)
        .unwrap_or(Stage::Baby)
}

pub fn should_evolve(current: Stage, days: i64) -> bool {
    stage_for_days(days) != current
}

pub fn cap_for(stage: Stage) -> f32 {
    stage.info().max_stats
}

pub fn decay_multiplier_for(stage: Stage) -> f32 {
    let m = stage.info().decay_multiplier;
    if m.is_finite() && m > 0.0 {
        m
    } else {
        1.0
    }
}

pub fn bonus_for(stage: Stage) -> StageBonus {
    stage.info().bonus
}

pub fn message_for(stage: Stage, pet_name: &str) -> String {
    stage.info().evolution_message.replace("{name}", pet_name)
}

pub fn description_for(stage: Stage) -> &'static str {
    stage.info().description
}

pub fn abilities_for(stage: Stage) -> &'static [&'static str] {
    stage.info().abilities
}

/// Days remaining before the next stage starts, `None` for the last stage.
pub fn days_until_next_stage(days: i64) -> Option<i64> {
    let next = stage_for_days(days).next()?;
    Some((next.info().min_days - days.max(0)).max(0))
}
