// sketchtty: tick-driven microcontroller sketch simulator

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use sketchtty::config::SimConfig;
use sketchtty::interpreter::engine::Simulation;
use sketchtty::scheduler::Scheduler;
use sketchtty::ui::App;

#[derive(Debug, Error)]
enum CliError {
    #[error("failed to read sketch '{path}': {source}")]
    ReadSketch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log file '{path}': {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Simulate a microcontroller sketch in the terminal
#[derive(Debug, Parser)]
#[command(name = "sketchtty", version, about)]
struct Cli {
    /// Sketch file (`.ino`) to simulate
    sketch: PathBuf,

    /// Config file (defaults to ~/.sketchtty/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the scheduler period in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Run without the TUI and print the serial output
    #[arg(long)]
    headless: bool,

    /// Number of ticks to run in headless mode
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Write logs to this file (TUI mode logs nowhere otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sketchtty=info"))
}

/// Install the tracing subscriber; the TUI owns stderr, so it only logs to a file
fn install_tracing(log_file: Option<&Path>, headless: bool) -> Result<(), CliError> {
    if let Some(path) = log_file {
        let file = File::create(path).map_err(|source| CliError::LogFile {
            path: path.to_path_buf(),
            source,
        })?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else if headless {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .try_init();
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SimConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => SimConfig::load_from(path)?,
        None => SimConfig::load().unwrap_or_default(),
    };
    if let Some(tick_ms) = cli.tick_ms {
        config.tick_ms = tick_ms;
        config.validate()?;
    }
    Ok(config)
}

fn run_headless(sim: &mut Simulation, scheduler: &mut Scheduler, ticks: u64, timestamps: bool) {
    scheduler.run_ticks(sim, ticks);

    for (timestamp, line) in sim.serial().lines() {
        if timestamps {
            println!("[{:>8} ms] {}", timestamp, line);
        } else {
            println!("{}", line);
        }
    }

    println!();
    println!(
        "after {} ticks ({} ms): phase {}, {} statements executed",
        ticks,
        scheduler.sim_time(),
        sim.phase(),
        sim.steps_executed()
    );
    for (id, pin) in sim.pins().sorted() {
        println!("  pin {:>4}  {:<12} {}", id.to_string(), pin.mode.to_string(), pin.level);
    }
    for binding in sim.peripherals().iter() {
        println!(
            "  {:<14} {}",
            binding.peripheral.id,
            if binding.is_active() { "on" } else { "off" }
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    install_tracing(cli.log_file.as_deref(), cli.headless)?;

    let config = load_config(&cli)?;
    let source = std::fs::read_to_string(&cli.sketch).map_err(|source| CliError::ReadSketch {
        path: cli.sketch.clone(),
        source,
    })?;

    let mut sim = Simulation::with_peripherals(config.peripheral_registry(), config.history_limit);
    let program = sim.load(&source);
    tracing::info!(
        sketch = %cli.sketch.display(),
        setup = program.setup.len(),
        loop_len = program.loop_body.len(),
        unrecognized = program.unrecognized_count(),
        "sketch loaded"
    );

    let mut scheduler = Scheduler::new(config.tick_ms);

    if cli.headless {
        run_headless(&mut sim, &mut scheduler, cli.ticks, config.serial_timestamps);
        return Ok(());
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(sim, scheduler, source)
        .with_source_path(cli.sketch.clone())
        .with_timestamps(config.serial_timestamps);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
