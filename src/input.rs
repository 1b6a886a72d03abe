use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use dokigotchi::Action;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Act(Action),
    MiniGameWin,
    ToggleMusic,
    ToggleSound,
    ToggleNotifications,
    Summary,
    Help,
    Reset,
    Quit,
}

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

/// Wait up to `timeout` for the first key, then take whatever else is queued.
pub(crate) fn collect_input(timeout: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();
    let mut wait = timeout;
    while event::poll(wait)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
        wait = Duration::ZERO;
    }
    Ok(out)
}

pub(crate) fn map_event_to_command(ev: &InputEvent) -> Option<Command> {
    if ev.mods.contains(KeyModifiers::CONTROL) {
        return match ev.key {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(Command::Quit),
            _ => None,
        };
    }
    let KeyCode::Char(ch) = ev.key else {
        return match ev.key {
            KeyCode::Esc => Some(Command::Quit),
            _ => None,
        };
    };
    match ch.to_ascii_lowercase() {
        'f' => Some(Command::Act(Action::Feed)),
        'p' => Some(Command::Act(Action::Play)),
        'b' => Some(Command::Act(Action::Bathe)),
        't' => Some(Command::Act(Action::Pet)),
        's' => Some(Command::Act(Action::Sleep)),
        'w' => Some(Command::Act(Action::Wake)),
        'g' => Some(Command::MiniGameWin),
        'm' => Some(Command::ToggleMusic),
        'x' => Some(Command::ToggleSound),
        'n' => Some(Command::ToggleNotifications),
        'i' => Some(Command::Summary),
        'h' | '?' => Some(Command::Help),
        'r' => Some(Command::Reset),
        'q' => Some(Command::Quit),
        _ => None,
    }
}
