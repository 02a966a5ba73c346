//! Binary entrypoint for the Cavecraft CLI.
//!
//! Commands:
//! - `play [--new] [--seed <n>]` - resume the saved game (or start one) and read commands from stdin
//! - `init` - create a starter `cavecraft.toml`
//! - `status` - summarise the saved game without playing
//!
//! See the library crate docs for module-level details: `cavecraft::`.
use std::io::{BufRead, Write};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};

use cavecraft::adventure::actions;
use cavecraft::adventure::narration::render_plain;
use cavecraft::adventure::{JsonFileStore, Session, SessionStatus, SnapshotStore};
use cavecraft::config::Config;
use cavecraft::logutil::{escape_log, summarize_narration};

#[derive(Parser)]
#[command(name = "cavecraft")]
#[command(about = "A procedurally generated survival text adventure")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "cavecraft.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play, resuming the saved game when there is one
    Play {
        /// Ignore any saved game and start a fresh world
        #[arg(long)]
        new: bool,

        /// Seed for a fresh world (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a default configuration file
    Init,
    /// Show a summary of the saved game
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Init writes the config; everything else runs on defaults when it is absent.
    let config = match cli.command {
        Commands::Init => None,
        _ => Some(load_config(&cli.config)?),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Play { new, seed } => {
            let config = config.unwrap_or_default();
            play(&config, new, seed)?;
        }
        Commands::Init => {
            if std::path::Path::new(&cli.config).exists() {
                return Err(anyhow!("{} already exists; not overwriting", cli.config));
            }
            Config::create_default(&cli.config)?;
            info!("Wrote default configuration to {}", cli.config);
            println!("Created {}. Run `cavecraft play` to start.", cli.config);
        }
        Commands::Status => {
            let config = config.unwrap_or_default();
            show_status(&config)?;
        }
    }
    Ok(())
}

fn load_config(path: &str) -> Result<Config> {
    if std::path::Path::new(path).exists() {
        Config::load(path)
    } else {
        Ok(Config::default())
    }
}

fn play(config: &Config, new: bool, seed: Option<u64>) -> Result<()> {
    let store = JsonFileStore::new(&config.game.save_file);
    let resumed = if new {
        None
    } else {
        match store.load()? {
            Some(snapshot) => {
                let session = Session::restore(snapshot)?;
                if session.is_over() {
                    info!("saved game has ended; starting a new one");
                    None
                } else {
                    Some(session)
                }
            }
            None => None,
        }
    };

    let mut session = match resumed {
        Some(session) => {
            println!("Welcome back.");
            session
        }
        None => {
            let seed = seed
                .or(config.game.seed)
                .unwrap_or_else(rand::random::<u64>);
            println!("Welcome to Cavecraft. Type `help` for a list of commands.");
            Session::new(seed)
        }
    };
    print!("{}", render_plain(&actions::look(&mut session)));

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let mut lines = stdin.lock().lines();
    loop {
        print!("\n{}\n> ", session.status_line());
        stdout.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        match line.trim().to_lowercase().as_str() {
            "quit" | "exit" => break,
            "save" => {
                store.save(&session.snapshot())?;
                println!("Game saved.");
                continue;
            }
            _ => {}
        }
        let narration = session.handle_input(&line);
        info!("> {} => {}", escape_log(&line), summarize_narration(&narration));
        print!("{}", render_plain(&narration));
        if config.game.autosave {
            if let Err(e) = store.save(&session.snapshot()) {
                warn!("autosave to {} failed: {}", store.path().display(), e);
            }
        }
        if session.is_over() {
            break;
        }
    }
    store.save(&session.snapshot())?;
    Ok(())
}

fn show_status(config: &Config) -> Result<()> {
    let store = JsonFileStore::new(&config.game.save_file);
    let Some(snapshot) = store.load()? else {
        println!("No saved game at {}.", store.path().display());
        return Ok(());
    };
    println!("Cavecraft v{}", env!("CARGO_PKG_VERSION"));
    println!("Save file: {}", store.path().display());
    println!("Saved at: {}", snapshot.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
    let session = Session::restore(snapshot)?;
    println!("{}", session.status_line());
    println!("Rooms explored: {}", session.world().len());
    println!("Items carried: {}", session.player().inventory.len());
    match session.status() {
        SessionStatus::Playing => println!("Status: alive"),
        SessionStatus::Dead { cause } => println!("Status: dead ({})", cause),
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|c| c.logging.level_filter().ok())
            .unwrap_or(log::LevelFilter::Warn),
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    let file = config.as_ref().and_then(|c| c.logging.file.clone());
    match file.map(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
    }) {
        Some(Ok(f)) => {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
            // Interactive play keeps log lines off the terminal; piped runs still get them.
            let echo = !atty::is(atty::Stream::Stdout);
            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());
                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }
                if echo {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        }
        _ => {
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    }
    let _ = builder.try_init();
}
