//! dorf — run an elimination game between externally launched agents.
//!
//! Each positional argument is handed verbatim to `sh -c`, so an agent can be
//! a binary path or a full shell one-liner. Exactly 2 or 4 agents play.

use anyhow::Result;
use clap::Parser;

use dorf::prelude::*;

/// Turn-based grid elimination arena for external AI agent processes.
#[derive(Parser, Debug)]
#[command(name = "dorf")]
#[command(version, about, long_about = None)]
struct Args {
    /// Agent launch commands (exactly 2 or 4), each run via `sh -c`
    #[arg(required = true)]
    agents: Vec<String>,

    /// Board width in columns
    #[arg(long, default_value_t = 10)]
    width: i32,

    /// Board height in rows
    #[arg(long, default_value_t = 10)]
    height: i32,

    /// Suppress turn narration on stdout
    #[arg(short, long)]
    quiet: bool,

    /// Write a trace log file in the current directory
    #[arg(long)]
    log: bool,

    /// Pass agent stderr through to the console
    #[arg(long)]
    debug_agent_stderr: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.agents.len() != 2 && args.agents.len() != 4 {
        // Usage error before anything is spawned.
        clap::Error::raw(
            clap::error::ErrorKind::WrongNumberOfValues,
            format!(
                "expected exactly 2 or 4 agent commands, got {}\n",
                args.agents.len()
            ),
        )
        .exit();
    }
    if args.width <= 0 || args.height <= 0 {
        clap::Error::raw(
            clap::error::ErrorKind::InvalidValue,
            "board dimensions must be positive\n",
        )
        .exit();
    }

    // Flags take priority over DORF_* environment variables.
    let mut config = Configuration::from_env();
    if args.quiet {
        config = config.with_verbose(false);
    }
    if args.log {
        config = config.with_log(true);
    }
    if args.debug_agent_stderr {
        config = config.with_debug_agent_stderr(true);
    }

    let launcher = ShellLauncher::from_config(&config);
    let board = Board::new(args.width, args.height);

    let mut engine = TurnEngine::setup(&args.agents, board, &launcher, config)?;
    engine.run()?;
    Ok(())
}
