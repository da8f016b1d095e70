//! Server configuration
//!
//! Bind address from the first CLI argument, then `RELAY_ADDR`, then the
//! default. Outbound queue depth from `RELAY_OUTBOUND_BUFFER`.

use tracing::warn;

/// Default server address
pub const DEFAULT_ADDR: &str = "127.0.0.1:8080";

/// Default per-connection outbound queue depth
pub const DEFAULT_OUTBOUND_BUFFER: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on
    pub addr: String,
    /// Frames queued per connection before sends start being dropped
    pub outbound_buffer: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            outbound_buffer: DEFAULT_OUTBOUND_BUFFER,
        }
    }
}

impl ServerConfig {
    /// Build from the process arguments and environment
    pub fn from_env() -> Self {
        Self::resolve(
            std::env::args().nth(1),
            std::env::var("RELAY_ADDR").ok(),
            std::env::var("RELAY_OUTBOUND_BUFFER").ok(),
        )
    }

    /// Build from explicit sources; `arg` beats `env_addr`
    pub fn resolve(
        arg: Option<String>,
        env_addr: Option<String>,
        env_buffer: Option<String>,
    ) -> Self {
        let addr = arg
            .or(env_addr)
            .unwrap_or_else(|| DEFAULT_ADDR.to_string());

        let outbound_buffer = match env_buffer {
            None => DEFAULT_OUTBOUND_BUFFER,
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(
                        "Ignoring RELAY_OUTBOUND_BUFFER={:?}, using {}",
                        raw, DEFAULT_OUTBOUND_BUFFER
                    );
                    DEFAULT_OUTBOUND_BUFFER
                }
            },
        };

        Self {
            addr,
            outbound_buffer,
        }
    }
}
