use crate::ports::{Notifier, Reminder};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub body: String,
}

/// Local notifier: immediate notices go to an outbox the host drains, and
/// reminders are tracked per kind so a later call can replace or cancel them.
#[derive(Debug, Default)]
pub struct ReminderBoard {
    outbox: Vec<Notice>,
    scheduled: BTreeMap<Reminder, String>,
}

impl ReminderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scheduled(&self) -> impl Iterator<Item = (Reminder, &str)> {
        self.scheduled.iter().map(|(r, b)| (*r, b.as_str()))
    }

    pub fn is_scheduled(&self, reminder: Reminder) -> bool {
        self.scheduled.contains_key(&reminder)
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Notice> + '_ {
        self.outbox.drain(..)
    }
}

impl Notifier for ReminderBoard {
    fn notify(&mut self, title: &str, body: &str) {
        tracing::info!(title, body, "notification");
        self.outbox.push(Notice {
            title: title.to_string(),
            body: body.to_string(),
        });
    }

    fn schedule_reminder(&mut self, reminder: Reminder, body: &str) {
        if self.scheduled.get(&reminder).map(String::as_str) != Some(body) {
            tracing::debug!(?reminder, body, "reminder scheduled");
        }
        self.scheduled.insert(reminder, body.to_string());
    }

    fn cancel_reminder(&mut self, reminder: Reminder) {
        if self.scheduled.remove(&reminder).is_some() {
            tracing::debug!(?reminder, "reminder cancelled");
        }
    }

    fn cancel_all(&mut self) {
        if !self.scheduled.is_empty() {
            tracing::debug!(count = self.scheduled.len(), "all reminders cancelled");
        }
        self.scheduled.clear();
    }
}
