//! # dorf
//!
//! A turn-based elimination game on an eroding grid, where every player is an
//! independently launched external process talked to over pipes with a
//! line-based text protocol.
//!
//! The engine spawns one process per agent (`sh -c` on the given command
//! string), sends each its id and the initial board, then loops turns:
//! broadcast all positions, read one move token per live agent, resolve
//! vacate-then-move, eliminate whoever stepped off the board or onto an
//! exhausted cell, and stop when at most one agent is left.
//!
//! # Documentation Overview
//!
//! - The turn loop and its phase ordering live in [`engine`].
//! - The wire format (handshake, broadcast, move tokens) is in [`protocol`].
//! - Process lifecycle and the [`AgentLink`](agent_process::AgentLink)
//!   transport seam are in [`agent_process`].
//! - Grid state and geometry are in [`board`].
//!
//! # Usage Example
//!
//! ```no_run
//! use dorf::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let commands = vec!["./my_agent".to_string(), "python3 bot.py".to_string()];
//!     let launcher = ShellLauncher::default();
//!     let config = Configuration::new();
//!
//!     let mut engine = TurnEngine::setup(&commands, Board::new(10, 10), &launcher, config)?;
//!     match engine.run()? {
//!         Outcome::Winner { id, name } => println!("player {id} ({name}) wins"),
//!         Outcome::NoSurvivors => println!("nobody made it"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Agent Requirements
//!
//! An agent reads from stdin and writes whitespace-delimited tokens to
//! stdout:
//! - At startup it receives its id, the board dimensions, and the initial
//!   durability grid.
//! - Each turn it receives one `"<id> <row> <col>"` line per known agent
//!   (dead ones get `-1 -1`) and must answer exactly one of `row+`, `row-`,
//!   `col+`, `col-`. Anything else, including closing stdout, eliminates it.
#![warn(missing_docs)]

pub use anyhow;

pub mod agent;
pub mod agent_process;
pub mod board;
pub mod configuration;
pub mod engine;
mod logger;
pub mod protocol;

/// Commonly used types for quick access.
///
/// ```rust
/// use dorf::prelude::*;
/// ```
pub mod prelude {
    pub use crate::agent_process::{AgentLink, Launcher, ShellLauncher};
    pub use crate::board::{Board, Coord};
    pub use crate::configuration::Configuration;
    pub use crate::engine::{Outcome, TurnEngine};
}
