//! hyperskin-core: configuration reconciliation for terminal tooling
//!
//! Reads hand-edited configuration files into structured models, applies
//! edits, and writes them back while keeping everything it does not own.
//!
//! # Main Entry Points
//!
//! - [`wt`] - Windows Terminal `settings.json` (JSONC)
//! - [`hyper`] - Hyper `.hyper.js` (JavaScript object literal)
//! - [`mcp`] - MCP server registry
//! - [`claude`] - Claude Code settings
//! - [`config`] - HyperSkin's own configuration and resolved paths

pub mod claude;
pub mod config;
pub mod errors;
pub mod events;
pub mod hyper;
pub mod jsliteral;
pub mod jsonc;
pub mod logging;
pub mod mcp;
pub mod merge;
pub mod wt;

// Re-export commonly used types at crate root for convenience
pub use claude::ClaudeError;
pub use config::{HyperskinConfig, Paths};
pub use errors::{ConfigError, HyperskinError, HyperskinResult};
pub use hyper::{HyperConfig, HyperError};
pub use jsliteral::{EvalError, Value};
pub use mcp::{McpError, McpServer, McpServerUpdate};
pub use merge::deep_merge;
pub use wt::{WtColorScheme, WtConfig, WtError, WtProfile};

// Re-export logging initialization
pub use logging::init_logging;
