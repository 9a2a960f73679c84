mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{thread_rng, SeedableRng};

use pantheon::audio::SoundBank;
use pantheon::compute::{
    handle_input, init_state, return_to_menu, start_game, take_events, tick, toggle_music,
    toggle_pause, toggle_sounds,
};
use pantheon::config::GameConfig;
use pantheon::constants::TICKS_PER_SECOND;
use pantheon::entities::{GameState, GameStatus};
use pantheon::scene::draw_scene;
use pantheon::services::{play_events, Action, InputEvent};

use display::TerminalCanvas;

const FRAME: Duration = Duration::from_nanos(1_000_000_000 / TICKS_PER_SECOND as u64);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames (≈133 ms) is always
/// refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if any of `keys` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const SHIELD_KEYS: [KeyCode; 2] = [KeyCode::Char('k'), KeyCode::Char('K')];

// ── Command line ─────────────────────────────────────────────────────────────

/// Pantheon: a 2D action platformer, played in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Seed for level layouts and enemy behaviour.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Level a new game starts on.
    #[arg(
        long,
        value_name = "LEVEL",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..=10)
    )]
    level: u32,
    /// Disable sound effects and music.
    #[arg(long)]
    mute: bool,
    /// Disable music only.
    #[arg(long)]
    no_music: bool,
    /// Directory holding the sound assets.
    #[arg(long, value_name = "DIR", default_value = "sounds")]
    sounds: PathBuf,
    /// File receiving log output (the terminal is busy drawing the game).
    #[arg(long, value_name = "FILE", default_value = "pantheon.log")]
    log_file: PathBuf,
}

impl Cli {
    fn config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed,
            start_level: self.level,
            music_on: !self.mute && !self.no_music,
            sounds_on: !self.mute,
            sound_dir: self.sounds.clone(),
        }
        .normalized()
    }
}

/// Log to a file, `warn` and above unless RUST_LOG overrides.  Must run
/// before the terminal enters raw mode so the failure notice is readable.
fn init_logging(path: &Path) {
    let file = match File::create(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("logging disabled: cannot create {}: {err}", path.display());
            return;
        }
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init();
}

// ── Keys → commands ──────────────────────────────────────────────────────────

/// One-shot key meanings; held keys (move, shield) are handled separately.
enum Command {
    Quit,
    Start,
    Menu,
    Pause,
    Music,
    Sounds,
    Act(Action),
}

fn command_for(code: KeyCode, status: GameStatus) -> Option<Command> {
    let key = match code {
        KeyCode::Char(c) => Some(c.to_ascii_lowercase()),
        _ => None,
    };
    match status {
        GameStatus::Menu => match (code, key) {
            (KeyCode::Enter, _) => Some(Command::Start),
            (_, Some('m')) => Some(Command::Music),
            (_, Some('s')) => Some(Command::Sounds),
            (KeyCode::Esc, _) | (_, Some('q')) => Some(Command::Quit),
            _ => None,
        },
        GameStatus::Playing => match (code, key) {
            (KeyCode::Esc, _) | (_, Some('p')) => Some(Command::Pause),
            (KeyCode::Up, _) | (_, Some(' ')) | (_, Some('w')) => Some(Command::Act(Action::Jump)),
            (_, Some('j')) => Some(Command::Act(Action::Attack)),
            (_, Some('l')) => Some(Command::Act(Action::Ability)),
            (_, Some('i')) => Some(Command::Act(Action::Beam)),
            (_, Some('q')) => Some(Command::Quit),
            _ => None,
        },
        GameStatus::Paused => match (code, key) {
            (KeyCode::Esc, _) | (_, Some('p')) => Some(Command::Pause),
            (_, Some('m')) => Some(Command::Music),
            (_, Some('s')) => Some(Command::Sounds),
            (_, Some('q')) => Some(Command::Menu),
            _ => None,
        },
        GameStatus::GameOver | GameStatus::Victory => match (code, key) {
            (_, Some('r')) | (KeyCode::Enter, _) => Some(Command::Menu),
            (KeyCode::Esc, _) | (_, Some('q')) => Some(Command::Quit),
            _ => None,
        },
    }
}

// ── Game loop ────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Movement and shield are derived from
/// which keys are still "fresh" each frame and turned into press/release
/// events only when that set changes, so holding A + K works on terminals
/// with or without key-release reporting.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    // Cosmetic randomness stays off the simulation stream.
    let mut fx_rng = thread_rng();
    let mut audio = SoundBank::load_or_mute(&config.sound_dir);

    let (cols, rows) = terminal::size()?;
    let mut canvas = TerminalCanvas::new(cols, rows);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut walking: Option<Action> = None;
    let mut guarding = false;
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                        return Ok(());
                    }
                    match command_for(code, state.status) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Start) => *state = start_game(state, &mut rng),
                        Some(Command::Menu) => *state = return_to_menu(state),
                        Some(Command::Pause) => *state = toggle_pause(state),
                        Some(Command::Music) => *state = toggle_music(state),
                        Some(Command::Sounds) => *state = toggle_sounds(state),
                        Some(Command::Act(action)) => {
                            *state = handle_input(state, InputEvent::Press(action));
                        }
                        None => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held keys → press/release edges ──────────────────────────────────
        if state.status == GameStatus::Playing {
            let direction = if is_held(&key_frame, &LEFT_KEYS, frame) {
                Some(Action::Left)
            } else if is_held(&key_frame, &RIGHT_KEYS, frame) {
                Some(Action::Right)
            } else {
                None
            };
            if direction != walking {
                let input = match direction {
                    Some(action) => InputEvent::Press(action),
                    None => InputEvent::Release(walking.unwrap_or(Action::Left)),
                };
                *state = handle_input(state, input);
                walking = direction;
            }

            let shield = is_held(&key_frame, &SHIELD_KEYS, frame);
            if shield != guarding {
                let input = if shield {
                    InputEvent::Press(Action::Shield)
                } else {
                    InputEvent::Release(Action::Shield)
                };
                *state = handle_input(state, input);
                guarding = shield;
            }
        }

        *state = tick(state, &mut rng);
        let events = take_events(state);
        play_events(&mut audio, &events, state.settings);

        let (cols, rows) = terminal::size()?;
        canvas.resize(cols, rows);
        canvas.clear();
        draw_scene(&mut canvas, state, &mut fx_rng);
        canvas.present(out)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file);
    let config = cli.config();
    log::info!("starting with {config:?}");

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let mut state = init_state(&config);
    let result = game_loop(&mut out, &mut state, &config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        log::error!("terminal error: {err}");
    }
    result
}
