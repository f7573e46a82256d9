use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An MCP server entry as presented to callers.
///
/// On disk the name is the key of the `mcpServers` map and `enabled` is
/// stored inverted as `disabled`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpServer {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment variables in the order they were given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<Map<String, Value>>,
    pub enabled: bool,
}

impl McpServer {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            env: None,
            enabled: true,
        }
    }
}

/// Partial update of an MCP server. `None` fields are left unchanged.
///
/// Setting `name` to a different value renames the entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct McpServerUpdate {
    pub name: Option<String>,
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
    pub env: Option<Map<String, Value>>,
    pub enabled: Option<bool>,
}
