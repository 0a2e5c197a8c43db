//! Message shapes exchanged with agent processes.
//!
//! Everything on the wire is whitespace/line-delimited text, with no framing
//! or length prefix. Two outbound kinds (the one-time handshake and the
//! per-turn broadcast) and one inbound kind (a single move token). A
//! malformed agent output can desynchronize every later read on that stream;
//! that fragility is part of the protocol and is not repaired here.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::board::{Board, Coord};

/// A parsed move token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// `row+`: one row down.
    RowPlus,
    /// `row-`: one row up.
    RowMinus,
    /// `col+`: one column right.
    ColPlus,
    /// `col-`: one column left.
    ColMinus,
}

impl Move {
    /// The movement vector to add to the agent's current coordinate.
    pub fn vector(self) -> Coord {
        match self {
            Move::RowPlus => Coord::new(1, 0),
            Move::RowMinus => Coord::new(-1, 0),
            Move::ColPlus => Coord::new(0, 1),
            Move::ColMinus => Coord::new(0, -1),
        }
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row+" => Ok(Move::RowPlus),
            "row-" => Ok(Move::RowMinus),
            "col+" => Ok(Move::ColPlus),
            "col-" => Ok(Move::ColMinus),
            other => Err(anyhow::anyhow!("unrecognized move token: {other:?}")),
        }
    }
}

/// Encode the one-time Setup handshake: the agent's id, the board
/// dimensions, and the full initial durability grid.
pub fn encode_handshake(id: u32, board: &Board) -> String {
    let mut msg = String::new();
    let _ = writeln!(msg, "{id}");
    let _ = writeln!(msg, "{} {}", board.height(), board.width());
    for row in board.rows() {
        let line = row
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(msg, "{line}");
    }
    msg
}

/// Encode one per-turn broadcast: every live player's coordinate in live
/// order, then every dead agent with the sentinel, oldest elimination first.
pub fn encode_broadcast(live: &[(u32, Coord)], dead: &[u32]) -> String {
    let mut msg = String::new();
    for (id, coord) in live {
        let _ = writeln!(msg, "{id} {coord}");
    }
    for id in dead {
        let _ = writeln!(msg, "{id} {}", Coord::SENTINEL);
    }
    msg
}
