//! # Runtime
//!
//! Tokio runtime used by the workspace binaries.
//!
//! Composition itself is synchronous; the runtime only hosts the I/O around it (reading
//! stream files, driving provisioning handlers against a control plane).
//!
//! ## Profiles
//! * **Cli**: current-thread scheduler, no worker pool. Used by the `genu` binary.
//!
//! ## Example
//!
//! ```rust,ignore
//! #[genu_runtime::main(cli)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use genu_derive::main;

use anyhow::anyhow;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

const DEFAULT_THREAD_NAME: &str = "genu-main";

/// Configuration for a Tokio runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub thread_name: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::cli()
    }
}

impl RuntimeConfig {
    /// Single-threaded profile for one-shot command line runs.
    #[must_use]
    pub fn cli() -> Self {
        Self { thread_name: DEFAULT_THREAD_NAME.to_owned() }
    }

    #[must_use = "Customize the thread name"]
    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.thread_name =
            if name.trim().is_empty() { DEFAULT_THREAD_NAME.to_owned() } else { name };
        self
    }
}

/// Builds a current-thread Tokio runtime with all drivers enabled.
///
/// # Errors
/// Returns an error if the operating system refuses to create the runtime.
///
/// # Examples
///
/// ```rust
/// use genu_runtime::{RuntimeConfig, build_runtime};
///
/// let rt = build_runtime(&RuntimeConfig::cli())?;
/// let answer = rt.block_on(async { 40 + 2 });
/// assert_eq!(answer, 42);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_runtime(config: &RuntimeConfig) -> Result<Runtime> {
    debug!(config = ?config, "Building tokio runtime");

    Builder::new_current_thread()
        .thread_name(&config.thread_name)
        .enable_all()
        .build()
        .map_err(|e| anyhow!("Failed to initialize runtime: {e}"))
}
