use crate::input::{collect_input, map_event_to_command, Command};
use anyhow::Context;
use chrono::Utc;
use crossterm::{queue, style::Print, terminal};
use dokigotchi::audio::{Cue, SoundBoard};
use dokigotchi::config::{
    load_settings, project_paths, save_settings_atomic, EngineConfig, Paths, Settings,
};
use dokigotchi::evolution::{abilities_for, days_until_next_stage, description_for};
use dokigotchi::notify::ReminderBoard;
use dokigotchi::ports::{SystemClock, ToastKind};
use dokigotchi::storage::JsonFileStore;
use dokigotchi::{Engine, PetState};
use std::fs::OpenOptions;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

type PetEngine = Engine<JsonFileStore, ReminderBoard, SoundBoard, SystemClock>;

const MAX_WAIT: Duration = Duration::from_millis(250);

const HELP: &str = "f feed | p play | b bathe | t pet | s sleep | w wake | g mini-game win\n\
m music | x sound | n notifications | i stats | r reset | h help | q quit";

pub(crate) struct App {
    settings: Settings,
    paths: Paths,
    engine: PetEngine,
    out: Stdout,
    last_status: String,
    should_quit: bool,
}

impl App {
    fn init() -> anyhow::Result<Self> {
        let paths = project_paths().context("resolving data directory")?;
        init_logging(&paths)?;
        let settings = load_settings(&paths.settings_path);

        let mut sounds = SoundBoard::new(settings.sound_enabled, settings.music_enabled);
        sounds.start();

        let mut engine = Engine::new(
            EngineConfig::from(&settings),
            SystemClock,
            JsonFileStore::new(&paths.save_path),
            ReminderBoard::new(),
            sounds,
        );
        engine.start();
        tracing::info!(save = %paths.save_path.display(), "dokigotchi started");

        terminal::enable_raw_mode()?;

        Ok(Self {
            settings,
            paths,
            engine,
            out: io::stdout(),
            last_status: String::new(),
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        self.print_block(HELP)?;

        while !self.should_quit {
            let wait = match self.engine.next_wakeup() {
                Some(due) => (due - Utc::now()).to_std().unwrap_or(Duration::ZERO),
                None => MAX_WAIT,
            }
            .min(MAX_WAIT);

            for ev in collect_input(wait)? {
                if let Some(cmd) = map_event_to_command(&ev) {
                    self.handle(cmd)?;
                }
                if self.should_quit {
                    break;
                }
            }

            self.engine.advance();
            self.flush_feedback()?;
            self.print_status()?;
        }

        self.teardown()
    }

    fn handle(&mut self, cmd: Command) -> anyhow::Result<()> {
        match cmd {
            Command::Act(action) => {
                self.engine.apply(action);
            }
            Command::MiniGameWin => self.engine.mini_game_bonus(),
            Command::ToggleMusic => {
                self.settings.music_enabled = self.engine.feedback_mut().toggle_music();
                let msg = if self.settings.music_enabled { "music on" } else { "music off" };
                self.print_line(msg)?;
            }
            Command::ToggleSound => {
                self.settings.sound_enabled = self.engine.feedback_mut().toggle_sound();
                let msg = if self.settings.sound_enabled { "sound on" } else { "sound off" };
                self.print_line(msg)?;
            }
            Command::ToggleNotifications => {
                let on = !self.settings.notifications_enabled;
                self.settings.notifications_enabled = on;
                self.engine.set_notifications_enabled(on);
                self.print_line(if on { "notifications on" } else { "notifications off" })?;
            }
            Command::Summary => {
                let text = summary_text(self.engine.state());
                self.print_block(&text)?;
            }
            Command::Help => self.print_block(HELP)?,
            Command::Reset => {
                self.engine.reset();
                self.print_line("a new puppy has arrived")?;
            }
            Command::Quit => self.should_quit = true,
        }
        Ok(())
    }

    fn flush_feedback(&mut self) -> anyhow::Result<()> {
        let cues: Vec<Cue> = self.engine.feedback_mut().drain().collect();
        for cue in cues {
            match cue {
                Cue::Sound(_) => queue!(self.out, Print('\u{7}'))?,
                Cue::Toast { message, kind } => {
                    let tag = match kind {
                        ToastKind::Success => "[ok]",
                        ToastKind::Error => "[!!]",
                        ToastKind::Info => "[..]",
                    };
                    self.print_line(&format!("{} {}", tag, message))?;
                }
            }
        }
        let notices: Vec<_> = self.engine.notifier_mut().drain().collect();
        for n in notices {
            self.print_line(&format!("🔔 {}: {}", n.title, n.body))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn print_status(&mut self) -> anyhow::Result<()> {
        let status = status_line(&self.settings.pet_name, self.engine.state(), self.engine.action_cue());
        if status != self.last_status {
            self.print_line(&status)?;
            self.out.flush()?;
            self.last_status = status;
        }
        Ok(())
    }

    fn print_line(&mut self, s: &str) -> anyhow::Result<()> {
        queue!(self.out, Print(s), Print("\r\n"))?;
        Ok(())
    }

    fn print_block(&mut self, s: &str) -> anyhow::Result<()> {
        for line in s.lines() {
            self.print_line(line)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn teardown(&mut self) -> anyhow::Result<()> {
        self.engine.shutdown();
        self.engine.feedback_mut().shutdown();
        terminal::disable_raw_mode()?;
        save_settings_atomic(&self.paths.settings_path, &self.settings)?;
        Ok(())
    }
}

pub(crate) fn run() -> anyhow::Result<()> {
    let mut app = App::init()?;
    let res = app.run();
    if res.is_err() {
        let _ = terminal::disable_raw_mode();
    }
    res
}

fn init_logging(paths: &Paths) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_path)
        .with_context(|| format!("opening {}", paths.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dokigotchi=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn status_line(name: &str, st: &PetState, cue: Option<dokigotchi::Action>) -> String {
    let n = &st.needs;
    let mut line = format!(
        "{} {} [{}] {} | food {:.0} energy {:.0} joy {:.0} clean {:.0} /{:.0} | day {}",
        st.evolution_stage.info().emoji,
        name,
        st.evolution_stage.name(),
        st.mood.label(),
        n.hunger,
        n.energy,
        n.happiness,
        n.cleanliness,
        st.cap(),
        st.days_alive,
    );
    if st.is_sleeping() {
        line.push_str(" | Zzz");
    } else if let Some(action) = cue {
        line.push_str(&format!(" | {:?}!", action));
    }
    line
}

fn summary_text(st: &PetState) -> String {
    let s = st.summary();
    let mut out = format!(
        "{}: {}\nabilities: {}\n",
        s.stage.name(),
        description_for(s.stage),
        abilities_for(s.stage).join(", ")
    );
    match days_until_next_stage(s.days_alive) {
        Some(d) => out.push_str(&format!("next stage in {} days\n", d)),
        None => out.push_str("final stage reached\n"),
    }
    out.push_str(&format!(
        "days alive {} | lifetime days {} | deaths {}\n\
         fed {} | played {} | bathed {} | petted {}\n\
         achievements {}/{}",
        s.days_alive,
        s.total_days_alive,
        s.deaths,
        s.stats.times_fed,
        s.stats.times_played,
        s.stats.times_bathed,
        s.stats.times_petted,
        s.achievements_unlocked,
        s.achievements_total,
    ));
    for a in &st.achievements {
        out.push_str(&format!("\n  {} {}: {}", a.badge(), a.title(), a.description()));
    }
    out
}
