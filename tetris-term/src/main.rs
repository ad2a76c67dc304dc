mod input;
mod term_render;

use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use console::Term;
use tetris_engine::{Engine, EngineConfig, GameSnapshot, LockReport, StepResult};
use tracing_subscriber::EnvFilter;

use crate::input::{spawn_keyboard_reader, Input};
use crate::term_render::{AnsiTermStyle, GameView, PlainTermStyle, TermRender, TermStyle, WellField};

const FRAME_INTERVAL: Duration = Duration::from_micros(16_667); // ~60 FPS
const FLASH_COUNT: usize = 3;
const FLASH_DELAY: Duration = Duration::from_millis(80);

/// tetris-term - falling-block puzzle in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid width
    #[arg(long, default_value_t = tetris_engine::COLS)]
    cols: usize,

    /// Grid height
    #[arg(long, default_value_t = tetris_engine::ROWS)]
    rows: usize,

    /// Milliseconds between automatic gravity steps
    #[arg(short, long, default_value_t = 500)]
    fall_interval_ms: u64,

    /// Seed for reproducible piece order
    #[arg(short, long)]
    seed: Option<u64>,

    /// Plain ASCII output without colours
    #[arg(long)]
    plain: bool,

    /// Print the final game snapshot as JSON on exit
    #[arg(long)]
    json: bool,
}

impl Args {
    fn engine_config(&self) -> EngineConfig {
        let config = EngineConfig::new()
            .with_dimensions(self.cols, self.rows)
            .with_fall_interval(Duration::from_millis(self.fall_interval_ms));
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Logs go to stderr so they don't tear the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let engine = Engine::new(args.engine_config()).context("Failed to create engine")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    let result = runtime.block_on(play(engine, args.plain));
    // The keyboard thread may still be blocked on a read
    runtime.shutdown_timeout(Duration::from_millis(100));
    let snapshot = result?;

    println!("Game Over! Your score: {}", snapshot.score);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}

async fn play(engine: Engine, plain: bool) -> anyhow::Result<GameSnapshot> {
    let term = Term::stdout();
    term.clear_screen()?;
    term.hide_cursor()?;
    let result = if plain {
        run(engine, &term, &PlainTermStyle).await
    } else {
        run(engine, &term, &AnsiTermStyle).await
    };
    term.show_cursor()?;
    result
}

// Drive the engine until game over or quit; returns the final snapshot
async fn run(
    mut engine: Engine,
    term: &Term,
    style: &impl TermStyle,
) -> anyhow::Result<GameSnapshot> {
    let (input_tx, input_rx) = flume::unbounded();
    let keyboard_task = spawn_keyboard_reader(input_tx);

    let mut interval = tokio::time::interval(FRAME_INTERVAL);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut last_tick = Instant::now();

    'game: loop {
        interval.tick().await;

        for input in input_rx.try_iter() {
            match input {
                Input::Command(command) => {
                    engine.apply(command);
                }
                Input::Quit => {
                    tracing::info!("Quit requested");
                    break 'game;
                }
            }
        }

        let now = Instant::now();
        let step = engine.tick(now - last_tick);
        last_tick = now;

        if let StepResult::Locked(report) | StepResult::GameOver(report) = &step
            && !report.cleared_rows.is_empty()
        {
            animate_line_clear(term, style, report, engine.score()).await?;
            // Animation time does not count towards the next gravity step
            last_tick = Instant::now();
        }

        render(term, style, &engine.snapshot())?;
        if !engine.is_running() {
            break;
        }
    }

    keyboard_task.abort();
    Ok(engine.snapshot())
}

fn render(term: &Term, style: &impl TermStyle, snapshot: &GameSnapshot) -> anyhow::Result<()> {
    let well = WellField::new(snapshot.composite(), snapshot.game_over);
    draw(term, style, well, snapshot.score)
}

// Flash the cleared rows on the pre-clear grid before the compacted grid is shown
async fn animate_line_clear(
    term: &Term,
    style: &impl TermStyle,
    report: &LockReport,
    score: u64,
) -> anyhow::Result<()> {
    for _ in 0..FLASH_COUNT {
        for frame in flash_frames(report) {
            draw(term, style, frame, score)?;
            tokio::time::sleep(FLASH_DELAY).await;
        }
    }
    Ok(())
}

/// One flash cycle: cleared rows highlighted, then the plain pre-clear grid
fn flash_frames(report: &LockReport) -> [WellField; 2] {
    [
        WellField::new(report.pre_clear.clone(), false).with_flash(&report.cleared_rows),
        WellField::new(report.pre_clear.clone(), false),
    ]
}

fn draw(term: &Term, style: &impl TermStyle, well: WellField, score: u64) -> anyhow::Result<()> {
    let view = GameView::new(well, side_panel(score));
    term.move_cursor_to(0, 0)?;
    for line in view.render(style) {
        term.write_line(&line)?;
    }
    term.flush()?;
    Ok(())
}

fn side_panel(score: u64) -> Vec<String> {
    vec![
        String::new(),
        format!("Score: {}", score),
        String::new(),
        "Controls:".to_string(),
        "  ← →  move".to_string(),
        "  ↓    soft drop".to_string(),
        "  ↑ x  rotate".to_string(),
        "  q    quit".to_string(),
    ]
}
