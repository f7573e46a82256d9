pub mod errors;
pub mod settings;

pub use errors::ClaudeError;
pub use settings::{
    available_models, read_claude_settings, update_subagent_model, write_claude_settings,
};
