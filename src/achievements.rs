use crate::model::PetState;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    WeekSurvivor,
    MasterChef,
    Playmate,
    PerfectCare,
}

pub const WEEK_SURVIVOR_DAYS: i64 = 7;
pub const MASTER_CHEF_FEEDS: u32 = 50;
pub const PLAYMATE_GAMES: u32 = 30;

impl Achievement {
    pub const ALL: [Achievement; 4] = [
        Achievement::WeekSurvivor,
        Achievement::MasterChef,
        Achievement::Playmate,
        Achievement::PerfectCare,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Achievement::WeekSurvivor => "week_survivor",
            Achievement::MasterChef => "master_chef",
            Achievement::Playmate => "playmate",
            Achievement::PerfectCare => "perfect_care",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Achievement::WeekSurvivor => "Week Survivor",
            Achievement::MasterChef => "Master Chef",
            Achievement::Playmate => "Playmate",
            Achievement::PerfectCare => "Perfect Care",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Achievement::WeekSurvivor => "Survived 7 days",
            Achievement::MasterChef => "Fed 50 times",
            Achievement::Playmate => "Played 30 times",
            Achievement::PerfectCare => "All stats at maximum",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Achievement::WeekSurvivor => "🗓️",
            Achievement::MasterChef => "👨‍🍳",
            Achievement::Playmate => "🎾",
            Achievement::PerfectCare => "💯",
        }
    }

    fn qualifies(self, state: &PetState) -> bool {
        match self {
            Achievement::WeekSurvivor => state.days_alive >= WEEK_SURVIVOR_DAYS,
            Achievement::MasterChef => state.stats.times_fed >= MASTER_CHEF_FEEDS,
            Achievement::Playmate => state.stats.times_played >= PLAYMATE_GAMES,
            Achievement::PerfectCare => state.needs.all_at(state.cap()),
        }
    }
}

/// Achievements `state` qualifies for but does not hold yet, in display order.
pub fn evaluate(state: &PetState) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|a| !state.has_achievement(*a) && a.qualifies(state))
        .collect()
}
