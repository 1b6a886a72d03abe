use crate::achievements::Achievement;
use crate::evolution::{cap_for, Stage};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Normal,
    Sad,
    Grumpy,
    Tired,
    Hungry,
    Dirty,
}

impl Mood {
    /// Label shown by the host, kept in the pet's native Spanish.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Feliz",
            Mood::Normal => "Normal",
            Mood::Sad => "Triste",
            Mood::Grumpy => "Malhumorado",
            Mood::Tired => "Cansado",
            Mood::Hungry => "Hambriento",
            Mood::Dirty => "Sucio",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LastAction {
    #[default]
    None,
    Eat,
    Play,
    Bathe,
    Pet,
    Sleep,
}

/// The four needs. All of them live in `[0, cap_for(stage)]`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Needs {
    pub hunger: f32,
    pub energy: f32,
    pub happiness: f32,
    pub cleanliness: f32,
}

impl Default for Needs {
    fn default() -> Self {
        Self::full(100.0)
    }
}

impl Needs {
    pub fn full(v: f32) -> Self {
        Self {
            hunger: v,
            energy: v,
            happiness: v,
            cleanliness: v,
        }
    }

    pub fn all_zero(&self) -> bool {
        self.hunger == 0.0 && self.energy == 0.0 && self.happiness == 0.0 && self.cleanliness == 0.0
    }

    pub fn all_at(&self, v: f32) -> bool {
        self.hunger == v && self.energy == v && self.happiness == v && self.cleanliness == v
    }

    pub fn average(&self) -> f32 {
        (self.hunger + self.energy + self.happiness + self.cleanliness) / 4.0
    }

    pub fn clamp_to(&mut self, cap: f32) {
        self.hunger = clamp_stat(self.hunger, cap);
        self.energy = clamp_stat(self.energy, cap);
        self.happiness = clamp_stat(self.happiness, cap);
        self.cleanliness = clamp_stat(self.cleanliness, cap);
    }
}

/// Clamp into `[0, cap]`; NaN from a corrupt save reads as empty.
pub fn clamp_stat(v: f32, cap: f32) -> f32 {
    if v.is_nan() {
        return 0.0;
    }
    v.clamp(0.0, cap)
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CareStats {
    pub times_fed: u32,
    pub times_played: u32,
    pub times_bathed: u32,
    pub times_petted: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PetState {
    #[serde(flatten)]
    pub needs: Needs,
    pub mood: Mood,
    #[serde(default)]
    pub last_action: LastAction,
    pub birth_date: DateTime<Utc>,
    #[serde(default)]
    pub days_alive: i64,
    #[serde(default)]
    pub total_days_alive: i64,
    #[serde(default)]
    pub deaths: u32,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub evolution_stage: Stage,
    #[serde(default)]
    pub stats: CareStats,
    pub last_update: DateTime<Utc>,
    #[serde(default)]
    pub sleep_start_time: Option<DateTime<Utc>>,
}

impl PetState {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            needs: Needs::default(),
            mood: Mood::Happy,
            last_action: LastAction::None,
            birth_date: now,
            days_alive: 0,
            total_days_alive: 0,
            deaths: 0,
            achievements: Vec::new(),
            evolution_stage: Stage::Baby,
            stats: CareStats::default(),
            last_update: now,
            sleep_start_time: None,
        }
    }

    /// A fresh life that keeps everything cumulative from `self`.
    pub fn next_life(&self, now: DateTime<Utc>) -> Self {
        Self {
            total_days_alive: self.total_days_alive + self.days_alive,
            deaths: self.deaths,
            achievements: self.achievements.clone(),
            stats: self.stats,
            ..Self::new(now)
        }
    }

    pub fn cap(&self) -> f32 {
        cap_for(self.evolution_stage)
    }

    pub fn is_sleeping(&self) -> bool {
        self.last_action == LastAction::Sleep
    }

    pub fn has_achievement(&self, a: Achievement) -> bool {
        self.achievements.contains(&a)
    }

    pub fn compute_days_alive(&self, now: DateTime<Utc>) -> i64 {
        days_between(self.birth_date, now)
    }

    /// Repair a snapshot coming from storage so every invariant holds again.
    pub fn sanitize(&mut self, now: DateTime<Utc>) {
        if self.birth_date > now {
            self.birth_date = now;
        }
        if self.last_update > now {
            self.last_update = now;
        }
        self.days_alive = self.compute_days_alive(now);
        self.total_days_alive = self.total_days_alive.max(0);
        self.needs.clamp_to(self.cap());
        if !self.is_sleeping() {
            self.sleep_start_time = None;
        }
        let mut seen = Vec::with_capacity(self.achievements.len());
        self.achievements.retain(|a| {
            if seen.contains(a) {
                false
            } else {
                seen.push(*a);
                true
            }
        });
    }

    pub fn summary(&self) -> LifeSummary {
        LifeSummary {
            stage: self.evolution_stage,
            days_alive: self.days_alive,
            total_days_alive: self.total_days_alive + self.days_alive,
            deaths: self.deaths,
            stats: self.stats,
            achievements_unlocked: self.achievements.len(),
            achievements_total: Achievement::ALL.len(),
        }
    }
}

pub fn days_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let elapsed = to - from;
    if elapsed < ChronoDuration::zero() {
        0
    } else {
        elapsed.num_days()
    }
}

/// Lifetime numbers for the stats screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifeSummary {
    pub stage: Stage,
    pub days_alive: i64,
    pub total_days_alive: i64,
    pub deaths: u32,
    pub stats: CareStats,
    pub achievements_unlocked: usize,
    pub achievements_total: usize,
}
