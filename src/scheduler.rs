//! Cooperative timers for a single-threaded host.
//!
//! Each logical timer has one slot keyed by [`TimerId`]; starting a timer that is
//! already running replaces it, so at most one of each kind can ever be live.
//! Nothing fires on its own: the host asks [`Scheduler::take_due`] which timers
//! have come due and runs them in order.

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimerId {
    Decay,
    SleepRecovery,
    ActionCue,
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: DateTime<Utc>,
    period: Option<ChronoDuration>,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    timers: BTreeMap<TimerId, Timer>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire every `period`, first at `now + period`.
    pub fn start_interval(&mut self, id: TimerId, now: DateTime<Utc>, period: ChronoDuration) {
        let period = period.max(ChronoDuration::milliseconds(1));
        self.timers.insert(
            id,
            Timer {
                due: now + period,
                period: Some(period),
            },
        );
    }

    /// Fire once at `now + delay`.
    pub fn start_once(&mut self, id: TimerId, now: DateTime<Utc>, delay: ChronoDuration) {
        self.timers.insert(
            id,
            Timer {
                due: now + delay.max(ChronoDuration::zero()),
                period: None,
            },
        );
    }

    /// Returns whether a timer was actually running.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    pub fn active(&self) -> impl Iterator<Item = TimerId> + '_ {
        self.timers.keys().copied()
    }

    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.timers.values().map(|t| t.due).min()
    }

    /// Pop every timer due at `now`, earliest first. Interval timers are
    /// rescheduled past `now`; missed periods are folded into one firing.
    pub fn take_due(&mut self, now: DateTime<Utc>) -> Vec<TimerId> {
        let mut due: Vec<(DateTime<Utc>, TimerId)> = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .map(|(id, t)| (t.due, *id))
            .collect();
        due.sort();

        for (_, id) in &due {
            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            match timer.period {
                Some(period) => {
                    let step = period.num_milliseconds().max(1);
                    let behind = (now - timer.due).num_milliseconds();
                    let periods = behind / step + 1;
                    timer.due = timer.due + ChronoDuration::milliseconds(step * periods);
                }
                None => {
                    self.timers.remove(id);
                }
            }
        }

        due.into_iter().map(|(_, id)| id).collect()
    }

    /// Cancel everything. Returns how many timers were running.
    pub fn teardown(&mut self) -> usize {
        let n = self.timers.len();
        self.timers.clear();
        n
    }
}
