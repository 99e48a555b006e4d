mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
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
use rand::SeedableRng;

use display::TerminalRenderer;
use space_impact::config::SpawnMode;
use space_impact::input::{Input, LogicalKey};
use space_impact::{Playfield, SimulationLoop, Tuning};

#[derive(Parser, Debug)]
#[command(name = "space_impact", about = "Side-scrolling arcade shooter for the terminal")]
struct Args {
    /// Playfield width in pixels (one terminal column each)
    #[arg(long, default_value_t = 84.0)]
    width: f32,
    /// Playfield height in pixels (two per terminal row)
    #[arg(long, default_value_t = 48.0)]
    height: f32,
    /// JSON tuning file; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,
    /// Spawn formations instead of single enemies
    #[arg(long)]
    waves: bool,
    /// Write logs here; the terminal itself is busy drawing the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Held-key emulation ────────────────────────────────────────────────────────

/// Frames a press or repeat keeps a key down when no release arrives.
/// Auto-repeat runs at 15 Hz or faster, so four frames at 30 FPS is enough
/// to bridge the gap between repeats.
const HOLD_WINDOW: u64 = 4;

/// Last frame each key was reported pressed or repeating.
struct TerminalInput {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
}

impl TerminalInput {
    fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

impl Input for TerminalInput {
    fn is_down(&self, key: LogicalKey) -> bool {
        let codes: &[KeyCode] = match key {
            LogicalKey::Up => &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            LogicalKey::Down => &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
            LogicalKey::Left => &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            LogicalKey::Right => &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            LogicalKey::Fire => &[KeyCode::Char(' ')],
            LogicalKey::Confirm => &[KeyCode::Enter],
        };
        codes.iter().any(|code| self.is_held(code))
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        // stderr shares the screen with the game, so stay quiet unless asked
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init(),
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Key events only refresh `TerminalInput`; the simulation polls it once per
/// frame through the `Input` trait.  Quit and restart are host commands and
/// act immediately.
fn game_loop<W: Write>(
    out: &mut W,
    sim: &mut SimulationLoop,
    rx: &mpsc::Receiver<Event>,
    frame_budget: Duration,
) -> Result<()> {
    let field = sim.session().field;
    let mut renderer = TerminalRenderer::new(field.width, field.height);
    let mut input = TerminalInput { key_frame: HashMap::new(), frame: 0 };
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        input.frame += 1;

        // Input thread events since the last frame
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    input.key_frame.insert(code, input.frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                        KeyCode::Char('r') | KeyCode::Char('R') => {
                            sim.restart();
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    input.key_frame.insert(code, input.frame);
                }
                KeyEventKind::Release => {
                    input.key_frame.remove(&code);
                }
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;

        sim.frame(dt, &input, &mut renderer);
        renderer.present(out).context("drawing frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    let mut tuning = match &args.config {
        Some(path) => Tuning::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => Tuning::default(),
    };
    if args.waves {
        tuning.spawn.mode = SpawnMode::Waves;
    }
    let field = Playfield { width: args.width.max(16.0), height: args.height.max(16.0) };
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_budget = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    log::info!("starting: field {}x{}, seed {:?}, {} fps", field.width, field.height, args.seed, args.fps);

    let mut sim = SimulationLoop::new(tuning, field, rng);

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Real release events where the terminal supports them; otherwise the
    // hold window takes over.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking reads happen on their own thread; the loop only polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // game loop is gone
            }
        }
    });

    let result = game_loop(&mut out, &mut sim, &rx, frame_budget);

    // Restore the terminal even when the loop failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let session = sim.session();
    log::info!("exiting with status {:?}, score {}", session.status(), session.score);
    result
}
