pub mod errors;
pub mod registry;
pub mod types;

pub use errors::McpError;
pub use registry::{add_server, list_servers, remove_server, toggle_server, update_server};
pub use types::{McpServer, McpServerUpdate};
