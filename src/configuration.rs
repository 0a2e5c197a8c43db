//! Config for the game runner behaviors.
//!
//! Configuration can be created programmatically using [`Configuration::new()`]
//! or by reading environment variables using [`Configuration::from_env()`].
//!
//! # Environment Variables
//!
//! The following environment variables can be used to override configuration
//! values. All values are optional and case-insensitive. Set the value to
//! `"true"` to enable a flag.
//!
//! - `DORF_VERBOSE` — Narrate turns, moves and eliminations on stdout (default: `true`)
//! - `DORF_LOG` — Enable logging to a file (default: `false`)
//! - `DORF_DEBUG_AGENT_STDERR` — Pass agent stderr through for debugging (default: `false`)

/// Configuration for game runner behaviors.
#[derive(Debug, Clone, Copy)]
pub struct Configuration {
    pub(crate) verbose: bool,
    pub(crate) log: bool,
    pub(crate) debug_agent_stderr: bool,
}

impl Configuration {
    /// Create a new configuration with default parameters.
    ///
    /// By default:
    /// - Turn progress is narrated on stdout.
    /// - Logging to file is disabled.
    /// - Agent stderr output is discarded.
    pub fn new() -> Self {
        Self {
            verbose: true,
            log: false,
            debug_agent_stderr: false,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Recognized variables are `DORF_VERBOSE`, `DORF_LOG` and
    /// `DORF_DEBUG_AGENT_STDERR`; any other value (including unset) results
    /// in the default for that field.
    pub fn from_env() -> Self {
        fn get_env_flag(var: &str, default: bool) -> bool {
            match std::env::var(var) {
                Ok(val) => val.eq_ignore_ascii_case("true"),
                Err(_) => default,
            }
        }

        Self {
            verbose: get_env_flag("DORF_VERBOSE", true),
            log: get_env_flag("DORF_LOG", false),
            debug_agent_stderr: get_env_flag("DORF_DEBUG_AGENT_STDERR", false),
        }
    }

    /// Enable or disable stdout narration.
    pub fn with_verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Enable or disable logging to file.
    pub fn with_log(mut self, value: bool) -> Self {
        self.log = value;
        self
    }

    /// Enable or disable agent stderr passthrough (debug purposes only).
    pub fn with_debug_agent_stderr(mut self, value: bool) -> Self {
        self.debug_agent_stderr = value;
        self
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}
