//! Agent identity.

use crate::agent_process::AgentLink;

/// One player: a stable id, the launch command it was started from, and the
/// owned transport to its process.
///
/// Ids are assigned once, 0-based in join order, and never reused. An agent
/// is never duplicated or destroyed before the run ends; elimination only
/// moves it to the dead roster.
#[derive(Debug)]
pub struct Agent<L: AgentLink> {
    /// Stable 0-based id, assigned in join order at Setup.
    pub id: u32,
    /// The launch command string the agent was started from.
    pub name: String,
    /// Transport to the agent's process.
    pub link: L,
}

impl<L: AgentLink> Agent<L> {
    /// Bind an id and launch command to an already-connected link.
    pub fn new(id: u32, name: String, link: L) -> Agent<L> {
        Agent { id, name, link }
    }
}
