//! The turn engine: Setup → Playing → GameOver.
//!
//! The engine is fully sequential: each phase walks the roster one agent at a
//! time in a fixed order, and every read or write against an agent stream
//! blocks with no timeout. One unresponsive agent therefore stalls the whole
//! game; that is deliberate and not worked around here. The board and the
//! roster are owned by the engine alone, so the phase ordering is the only
//! thing correctness depends on.

use anyhow::Context;
use tracing::{debug, info, instrument, warn};

use crate::agent::Agent;
use crate::agent_process::{AgentLink, Launcher};
use crate::board::{Board, Coord};
use crate::configuration::Configuration;
use crate::protocol::{encode_broadcast, encode_handshake, Move};

/// Where a player stands in the elimination lifecycle.
///
/// A player starts `Live` and flips to `Dead` at most once, in place; the
/// dead roster is the set of `Dead` entries ordered by elimination number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// On the board, with the destination chosen this turn (if any).
    Live {
        /// Current position.
        coord: Coord,
        /// Destination computed in the decision phase, cleared every turn.
        pending: Option<Coord>,
    },
    /// Eliminated; `order` is the position in the dead roster (0 = first out).
    Dead {
        /// Elimination sequence number.
        order: usize,
    },
}

/// One roster entry: an agent plus its lifecycle status.
#[derive(Debug)]
pub struct Player<L: AgentLink> {
    /// The agent and its transport.
    pub agent: Agent<L>,
    /// Live or dead, updated in place.
    pub status: Status,
}

impl<L: AgentLink> Player<L> {
    /// True while the player is on the board.
    pub fn is_live(&self) -> bool {
        matches!(self.status, Status::Live { .. })
    }

    /// Current coordinate, if live.
    pub fn coord(&self) -> Option<Coord> {
        match self.status {
            Status::Live { coord, .. } => Some(coord),
            Status::Dead { .. } => None,
        }
    }
}

/// How the game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Exactly one agent outlived the rest.
    Winner {
        /// Winner's id.
        id: u32,
        /// Winner's launch command.
        name: String,
    },
    /// Everyone was eliminated in the final turn.
    NoSurvivors,
}

/// Drives one game from Setup through GameOver.
#[derive(Debug)]
pub struct TurnEngine<L: AgentLink> {
    board: Board,
    players: Vec<Player<L>>,
    config: Configuration,
    turn: u32,
    next_elimination: usize,
}

impl<L: AgentLink> TurnEngine<L> {
    /// Setup phase: launch one agent per command, assign ids and start
    /// corners in join order, then send every agent its handshake.
    ///
    /// # Errors
    /// A launch failure aborts the whole run; already-spawned processes are
    /// killed as their links drop.
    #[instrument(skip_all, fields(agents = commands.len()))]
    pub fn setup<F>(
        commands: &[String],
        board: Board,
        launcher: &F,
        config: Configuration,
    ) -> anyhow::Result<TurnEngine<L>>
    where
        F: Launcher<Link = L>,
    {
        if config.log {
            crate::logger::init_logger();
        }

        anyhow::ensure!(
            commands.len() == 2 || commands.len() == 4,
            "expected 2 or 4 agents, got {}",
            commands.len()
        );

        let corners = board.start_corners();
        let mut players = Vec::with_capacity(commands.len());
        for (i, command) in commands.iter().enumerate() {
            let link = launcher
                .launch(command)
                .with_context(|| format!("failed to launch agent {i} ({command})"))?;
            players.push(Player {
                agent: Agent::new(i as u32, command.clone(), link),
                status: Status::Live {
                    coord: corners[i],
                    pending: None,
                },
            });
            if config.verbose {
                println!("Added player ({command})");
            }
            info!(id = i, %command, start = %corners[i], "player joined");
        }

        let mut engine = TurnEngine {
            board,
            players,
            config,
            turn: 0,
            next_elimination: 0,
        };
        engine.send_handshakes();
        Ok(engine)
    }

    /// An agent that exits before reading its handshake is not a launch
    /// failure: the write is logged and the first decision phase will see
    /// EOF and eliminate it.
    fn send_handshakes(&mut self) {
        for player in &mut self.players {
            let msg = encode_handshake(player.agent.id, &self.board);
            if let Err(e) = player.agent.link.send(msg.as_bytes()) {
                warn!(id = player.agent.id, "handshake failed: {e:#}");
            }
        }
        debug!("handshakes sent");
    }

    /// Playing phase: loop turns until at most one agent is live, then run
    /// GameOver and report the outcome.
    pub fn run(&mut self) -> anyhow::Result<Outcome> {
        while self.live_count() > 1 {
            self.play_turn();
        }
        Ok(self.game_over())
    }

    /// One full Playing iteration: broadcast, decision, movement,
    /// elimination. Exposed so tests can step the game turn by turn.
    pub fn play_turn(&mut self) {
        self.turn += 1;
        if self.config.verbose {
            println!("Turn {}", self.turn);
        }
        debug!(turn = self.turn);

        self.broadcast_positions();
        self.read_decisions();
        self.resolve_movement();
        self.eliminate_losers();
    }

    /// Send every live agent the full position list: live players in roster
    /// order (receiver included), then dead agents with the sentinel, oldest
    /// elimination first.
    fn broadcast_positions(&mut self) {
        let live: Vec<(u32, Coord)> = self
            .players
            .iter()
            .filter_map(|p| p.coord().map(|c| (p.agent.id, c)))
            .collect();
        let msg = encode_broadcast(&live, &self.dead_ids());

        for player in self.players.iter_mut().filter(|p| p.is_live()) {
            // A broken pipe here means the agent already exited; the decision
            // phase will see EOF and eliminate it, so only log.
            if let Err(e) = player.agent.link.send(msg.as_bytes()) {
                warn!(id = player.agent.id, "broadcast failed: {e:#}");
            }
        }
    }

    /// Read one move token per live agent, in roster order. A valid token
    /// sets the player's pending destination; anything else (unknown token,
    /// EOF, read error) eliminates the agent on the spot, and it takes no
    /// part in the rest of this turn.
    fn read_decisions(&mut self) {
        for i in 0..self.players.len() {
            let Status::Live { coord, .. } = self.players[i].status else {
                continue;
            };

            let token = match self.players[i].agent.link.read_token() {
                Ok(token) => token,
                Err(e) => {
                    warn!(id = self.players[i].agent.id, "read failed: {e:#}");
                    None
                }
            };

            let mv = token.as_deref().and_then(|t| t.parse::<Move>().ok());
            if self.config.verbose {
                println!(
                    "Player {} moves '{}'",
                    self.players[i].agent.id,
                    token.as_deref().unwrap_or("")
                );
            }

            match mv {
                Some(mv) => {
                    self.players[i].status = Status::Live {
                        coord,
                        pending: Some(coord + mv.vector()),
                    };
                }
                None => {
                    info!(
                        id = self.players[i].agent.id,
                        token = token.as_deref(),
                        "invalid move"
                    );
                    self.eliminate(i);
                }
            }
        }
    }

    /// Apply every pending move: vacate the pre-move cell, then step onto
    /// the destination. Two agents leaving the same cell both decrement it;
    /// arriving somewhere never does.
    fn resolve_movement(&mut self) {
        for player in &mut self.players {
            let Status::Live {
                coord,
                pending: Some(dest),
            } = player.status
            else {
                continue;
            };
            self.board.vacate(coord);
            player.status = Status::Live {
                coord: dest,
                pending: None,
            };
        }
    }

    /// Eliminate every live agent now standing off the board or on an
    /// exhausted cell. Agents already eliminated in the decision phase are
    /// not reconsidered.
    fn eliminate_losers(&mut self) {
        for i in 0..self.players.len() {
            let Status::Live { coord, .. } = self.players[i].status else {
                continue;
            };
            if !self.board.in_bounds(coord) || self.board.durability_at(coord) <= 0 {
                if self.config.verbose {
                    println!("Player {} died at {{{coord}}}", self.players[i].agent.id);
                }
                self.eliminate(i);
            }
        }
    }

    /// Flip a player to Dead: request process termination once and append it
    /// to the dead roster.
    fn eliminate(&mut self, index: usize) {
        let player = &mut self.players[index];
        debug_assert!(player.is_live(), "player {} eliminated twice", player.agent.id);
        info!(id = player.agent.id, order = self.next_elimination, "eliminated");
        player.agent.link.request_termination();
        player.status = Status::Dead {
            order: self.next_elimination,
        };
        self.next_elimination += 1;
    }

    /// GameOver phase: report the winner (or that nobody survived) and ask
    /// any agent still live to stop.
    fn game_over(&mut self) -> Outcome {
        let outcome = match self.players.iter().find(|p| p.is_live()) {
            Some(p) => Outcome::Winner {
                id: p.agent.id,
                name: p.agent.name.clone(),
            },
            None => Outcome::NoSurvivors,
        };

        if self.config.verbose {
            println!("GAME OVER");
            match &outcome {
                Outcome::Winner { id, name } => println!("Winner: player {id} ({name})"),
                Outcome::NoSurvivors => println!("No survivors"),
            }
        }
        info!(?outcome, turns = self.turn);

        for player in self.players.iter_mut().filter(|p| p.is_live()) {
            player.agent.link.request_termination();
        }
        outcome
    }

    /// Number of players still on the board.
    pub fn live_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_live()).count()
    }

    /// Ids of dead agents in elimination order, oldest first.
    pub fn dead_ids(&self) -> Vec<u32> {
        let mut dead: Vec<(usize, u32)> = self
            .players
            .iter()
            .filter_map(|p| match p.status {
                Status::Dead { order } => Some((order, p.agent.id)),
                Status::Live { .. } => None,
            })
            .collect();
        dead.sort_unstable();
        dead.into_iter().map(|(_, id)| id).collect()
    }

    /// Completed Playing iterations so far.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The full roster, in join order.
    pub fn players(&self) -> &[Player<L>] {
        &self.players
    }

    /// The eroding board.
    pub fn board(&self) -> &Board {
        &self.board
    }
}
