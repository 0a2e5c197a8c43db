//! Child process ownership and byte-stream transport for one agent.
//!
//! [`AgentProcess`] bundles the spawned process and its pipes into a single
//! owned resource: the process is killed when the bundle is dropped, so OS
//! handles are released on every exit path, including unwinding out of a
//! failed Setup. The [`AgentLink`] trait is the seam the engine talks
//! through; tests substitute scripted links for real processes.

use std::io::{BufReader, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use anyhow::Context;
use tracing::{debug, instrument, trace};

use crate::configuration::Configuration;

/// Blocking byte-stream transport to one agent.
///
/// Every operation blocks with no timeout; a hung agent stalls the caller.
pub trait AgentLink {
    /// Write `bytes` to the agent's input stream.
    fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()>;

    /// Read one whitespace-delimited token from the agent's output stream.
    ///
    /// Returns `Ok(None)` when the stream is closed before a token arrives;
    /// callers treat that as an invalid move, not as a transport failure.
    fn read_token(&mut self) -> anyhow::Result<Option<String>>;

    /// Ask the agent's process to stop. Best-effort and idempotent: no exit
    /// confirmation is awaited, and repeat calls are harmless.
    fn request_termination(&mut self);
}

/// Creates links for agent launch commands.
///
/// The production implementation is [`ShellLauncher`]; tests provide their
/// own to drive the engine without spawning processes.
pub trait Launcher {
    /// The transport this launcher produces.
    type Link: AgentLink;

    /// Launch the agent behind `command` and connect to it.
    fn launch(&self, command: &str) -> anyhow::Result<Self::Link>;
}

/// Launches each command through `sh -c`: the string is handed to the shell
/// verbatim, with no escaping, so quote characters inside it are the
/// caller's problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellLauncher {
    /// Pass agent stderr through to the console instead of capturing it.
    pub debug_agent_stderr: bool,
}

impl ShellLauncher {
    /// Build a launcher honoring the configuration's stderr debug flag.
    pub fn from_config(config: &Configuration) -> ShellLauncher {
        ShellLauncher {
            debug_agent_stderr: config.debug_agent_stderr,
        }
    }
}

impl Launcher for ShellLauncher {
    type Link = AgentProcess;

    fn launch(&self, command: &str) -> anyhow::Result<AgentProcess> {
        AgentProcess::launch(command, self.debug_agent_stderr)
    }
}

/// One spawned agent process plus its three pipe endpoints.
#[derive(Debug)]
pub struct AgentProcess {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    terminated: bool,
}

impl AgentProcess {
    /// Spawn `sh -c <command>` with all three stdio streams redirected to
    /// pipes owned by this bundle.
    ///
    /// The stderr pipe is held but never read (with `debug_agent_stderr` it
    /// is passed through to the console instead). A spawn failure here is
    /// fatal to the whole run.
    #[instrument(skip(debug_agent_stderr))]
    pub fn launch(command: &str, debug_agent_stderr: bool) -> anyhow::Result<AgentProcess> {
        let stderr = if debug_agent_stderr {
            Stdio::inherit()
        } else {
            Stdio::piped()
        };

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(stderr)
            .spawn()
            .with_context(|| format!("could not launch agent command {command:?}"))?;

        // Pipes are always requested above, so these cannot be None.
        let stdin = child.stdin.take().context("agent stdin pipe missing")?;
        let stdout = child.stdout.take().context("agent stdout pipe missing")?;

        debug!(pid = child.id(), "agent process launched");

        Ok(AgentProcess {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            terminated: false,
        })
    }
}

impl AgentLink for AgentProcess {
    fn send(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        self.stdin
            .write_all(bytes)
            .context("I/O error while writing to agent")?;
        self.stdin.flush().context("I/O error while flushing agent pipe")
    }

    fn read_token(&mut self) -> anyhow::Result<Option<String>> {
        let mut token = Vec::new();
        let mut byte = [0u8; 1];
        loop {
            let n = self
                .stdout
                .read(&mut byte)
                .context("I/O error while reading from agent")?;
            if n == 0 {
                // EOF: a partial token still counts, an empty one is "no token".
                break;
            }
            if byte[0].is_ascii_whitespace() {
                if token.is_empty() {
                    continue;
                }
                break;
            }
            token.push(byte[0]);
        }

        if token.is_empty() {
            return Ok(None);
        }
        let token = String::from_utf8(token).context("agent sent non-UTF-8 token")?;
        trace!(%token, "token read from agent");
        Ok(Some(token))
    }

    fn request_termination(&mut self) {
        if self.terminated {
            return;
        }
        self.terminated = true;
        debug!(pid = self.child.id(), "requesting agent termination");
        // Fire-and-forget: the kill may race with the process exiting on its
        // own, and we never wait for confirmation.
        let _ = self.child.kill();
        let _ = self.child.try_wait();
    }
}

impl Drop for AgentProcess {
    fn drop(&mut self) {
        self.request_termination();
    }
}
