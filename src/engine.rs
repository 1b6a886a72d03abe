//! The pet engine: owns the state, the timers and the collaborators.
//!
//! Every path that changes the pet ends in [`Engine::commit`], which turns the
//! pure-core events into side effects, refreshes stat reminders and writes the
//! snapshot. A collaborator failure is logged and never rolls anything back.

use crate::actions::Action;
use crate::config::EngineConfig;
use crate::evolution::message_for;
use crate::model::PetState;
use crate::ports::{Clock, Feedback, Notifier, Persistence, Reminder, SoundEffect, ToastKind};
use crate::scheduler::{Scheduler, TimerId};
use crate::sim::{derive, PetEvent};
use chrono::{DateTime, Utc};

pub struct Engine<P, N, F, C> {
    config: EngineConfig,
    state: PetState,
    scheduler: Scheduler,
    clock: C,
    persistence: P,
    notifier: N,
    feedback: F,
    action_cue: Option<Action>,
}

impl<P, N, F, C> Engine<P, N, F, C>
where
    P: Persistence,
    N: Notifier,
    F: Feedback,
    C: Clock,
{
    pub fn new(config: EngineConfig, clock: C, persistence: P, notifier: N, feedback: F) -> Self {
        let now = clock.now();
        Self {
            config,
            state: PetState::new(now),
            scheduler: Scheduler::new(),
            clock,
            persistence,
            notifier,
            feedback,
            action_cue: None,
        }
    }

    /// Load the saved pet (or hatch a new one), start the timers and catch up
    /// on the time spent away.
    pub fn start(&mut self) {
        let now = self.clock.now();
        self.state = match self.persistence.load() {
            Ok(Some(mut saved)) => {
                saved.sanitize(now);
                tracing::info!(
                    stage = ?saved.evolution_stage,
                    days = saved.days_alive,
                    "loaded saved pet"
                );
                saved
            }
            Ok(None) => {
                tracing::info!("no saved pet, starting fresh");
                PetState::new(now)
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not load saved pet, starting fresh");
                PetState::new(now)
            }
        };

        self.scheduler
            .start_interval(TimerId::Decay, now, self.config.decay_interval);
        if self.state.is_sleeping() {
            self.scheduler
                .start_interval(TimerId::SleepRecovery, now, self.config.sleep_interval);
        }
        if self.config.notifications_enabled {
            self.schedule_daily_reminder();
        }

        let events = self.state.decay_tick(now).unwrap_or_default();
        self.commit(events);
    }

    pub fn state(&self) -> &PetState {
        &self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// The action image currently on display, if any.
    pub fn action_cue(&self) -> Option<Action> {
        self.action_cue
    }

    pub fn next_wakeup(&self) -> Option<DateTime<Utc>> {
        self.scheduler.next_due()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn feedback_mut(&mut self) -> &mut F {
        &mut self.feedback
    }

    /// Run every timer that has come due. Returns how many fired.
    pub fn advance(&mut self) -> usize {
        let now = self.clock.now();
        let due = self.scheduler.take_due(now);
        for id in &due {
            match id {
                TimerId::Decay => {
                    if let Some(events) = self.state.decay_tick(now) {
                        self.commit(events);
                    }
                }
                TimerId::SleepRecovery => match self.state.recovery_tick() {
                    Some(events) => self.commit(events),
                    None => {
                        self.scheduler.cancel(TimerId::SleepRecovery);
                    }
                },
                TimerId::ActionCue => self.action_cue = None,
            }
        }
        due.len()
    }

    pub fn apply(&mut self, action: Action) -> bool {
        let now = self.clock.now();
        match self.state.apply_action(action, now) {
            Ok(events) => {
                tracing::info!(?action, mood = ?self.state.mood, "action applied");
                self.commit(events);
                true
            }
            Err(reason) => {
                tracing::debug!(?action, %reason, "action rejected");
                self.feedback.toast(&reason.to_string(), ToastKind::Error);
                false
            }
        }
    }

    pub fn feed(&mut self) -> bool {
        self.apply(Action::Feed)
    }

    pub fn play(&mut self) -> bool {
        self.apply(Action::Play)
    }

    pub fn bathe(&mut self) -> bool {
        self.apply(Action::Bathe)
    }

    pub fn pet(&mut self) -> bool {
        self.apply(Action::Pet)
    }

    pub fn sleep(&mut self) -> bool {
        self.apply(Action::Sleep)
    }

    pub fn wake(&mut self) -> bool {
        self.apply(Action::Wake)
    }

    /// Entry point for finished mini-games.
    pub fn mini_game_bonus(&mut self) {
        let events = self.state.mini_game_bonus();
        self.commit(events);
    }

    /// Start a new life, keeping cumulative counters and achievements.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        let next = self.state.next_life(now);
        self.restart_with(next);
    }

    /// Wipe everything, achievements included.
    pub fn factory_reset(&mut self) {
        let now = self.clock.now();
        self.restart_with(PetState::new(now));
    }

    fn restart_with(&mut self, mut next: PetState) {
        self.scheduler.cancel(TimerId::SleepRecovery);
        self.scheduler.cancel(TimerId::ActionCue);
        self.action_cue = None;
        self.notifier.cancel_all();
        let events = derive(&mut next);
        self.state = next;
        tracing::info!(total_days = self.state.total_days_alive, "pet reset");
        self.commit(events);
    }

    pub fn set_notifications_enabled(&mut self, on: bool) {
        self.config.notifications_enabled = on;
        if on {
            self.schedule_daily_reminder();
            self.sync_reminders();
        } else {
            self.notifier.cancel_all();
        }
    }

    /// Cancel every timer and write a final snapshot.
    pub fn shutdown(&mut self) {
        let cancelled = self.scheduler.teardown();
        self.action_cue = None;
        self.save();
        tracing::info!(cancelled, "engine stopped");
    }

    fn commit(&mut self, events: Vec<PetEvent>) {
        for ev in &events {
            self.dispatch(ev);
        }
        self.sync_reminders();
        self.save();
    }

    fn save(&mut self) {
        if let Err(e) = self.persistence.save(&self.state) {
            tracing::warn!(error = %e, "could not save pet");
        }
    }

    fn dispatch(&mut self, ev: &PetEvent) {
        let now = self.clock.now();
        let name = self.config.pet_name.clone();
        match ev {
            PetEvent::Performed(action) => {
                self.feedback.play(sound_for(*action));
                match action {
                    Action::Wake => {
                        self.scheduler.cancel(TimerId::SleepRecovery);
                    }
                    _ => {
                        if *action == Action::Sleep {
                            self.scheduler.start_interval(
                                TimerId::SleepRecovery,
                                now,
                                self.config.sleep_interval,
                            );
                        }
                        self.action_cue = Some(*action);
                        self.scheduler
                            .start_once(TimerId::ActionCue, now, self.config.action_cue);
                    }
                }
            }
            PetEvent::BonusAwarded => self.feedback.play(SoundEffect::GameWin),
            PetEvent::Evolved { to, .. } => {
                let msg = message_for(*to, &name);
                self.feedback.play(SoundEffect::LevelUp);
                self.feedback.toast(&msg, ToastKind::Success);
                self.notifier.notify("🌟 Evolution!", &msg);
            }
            PetEvent::AchievementUnlocked(a) => {
                tracing::info!(achievement = a.id(), "achievement unlocked");
                self.feedback
                    .toast(&format!("🏆 Achievement: {}!", a.title()), ToastKind::Success);
                self.feedback.play(SoundEffect::Achievement);
                self.notifier
                    .notify("🏆 Achievement unlocked", &format!("{} {}", a.badge(), a.description()));
            }
            PetEvent::WokeRested => {
                self.scheduler.cancel(TimerId::SleepRecovery);
                self.feedback.play(SoundEffect::Pet);
                self.feedback
                    .toast(&format!("😊 {} woke up rested", name), ToastKind::Success);
            }
            PetEvent::Died { .. } => {
                self.scheduler.cancel(TimerId::SleepRecovery);
                self.scheduler.cancel(TimerId::ActionCue);
                self.action_cue = None;
                self.feedback
                    .toast(&format!("💀 {} has died... RIP", name), ToastKind::Error);
                self.notifier.notify(
                    &format!("😢 {} died", name),
                    "Take better care of your next pet",
                );
                self.notifier.cancel_all();
            }
        }
    }

    fn schedule_daily_reminder(&mut self) {
        let body = format!("Don't forget to visit {} today!", self.config.pet_name);
        self.notifier.schedule_reminder(Reminder::Daily, &body);
    }

    fn sync_reminders(&mut self) {
        if !self.config.notifications_enabled {
            return;
        }
        let n = self.state.needs;
        let name = &self.config.pet_name;
        for reminder in Reminder::STATS {
            let (value, body) = match reminder {
                Reminder::Hunger => (n.hunger, format!("🍖 {} is hungry", name)),
                Reminder::Energy => (n.energy, format!("😴 {} is tired and needs a nap", name)),
                Reminder::Happiness => (n.happiness, format!("😢 {} misses you", name)),
                Reminder::Cleanliness => (n.cleanliness, format!("🛁 {} needs a bath", name)),
                Reminder::Daily => continue,
            };
            let sleeping_off_energy = reminder == Reminder::Energy && self.state.is_sleeping();
            if value < self.config.reminder_threshold && !sleeping_off_energy {
                self.notifier.schedule_reminder(reminder, &body);
            } else {
                self.notifier.cancel_reminder(reminder);
            }
        }
    }
}

fn sound_for(action: Action) -> SoundEffect {
    match action {
        Action::Feed => SoundEffect::Eat,
        Action::Play => SoundEffect::Play,
        Action::Bathe => SoundEffect::Bath,
        Action::Pet | Action::Wake => SoundEffect::Pet,
        Action::Sleep => SoundEffect::Sleep,
    }
}
