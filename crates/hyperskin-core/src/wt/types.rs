use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level settings HyperSkin reads and writes. Every other top-level key
/// in `settings.json` is passed through untouched.
pub const GLOBAL_KEYS: &[&str] = &[
    "defaultProfile",
    "theme",
    "alwaysShowTabs",
    "showTabsInTitlebar",
    "copyOnSelect",
    "copyFormatting",
    "wordDelimiters",
    "confirmCloseAllTabs",
    "startOnUserLogin",
    "initialPosition",
    "initialCols",
    "initialRows",
    "launchMode",
    "snapToGridOnResize",
    "useAcrylicInTabRow",
    "showTerminalTitleInTitlebar",
    "tabWidthMode",
    "disableAnimations",
];

/// Windows Terminal's own default `historySize`.
pub const DEFAULT_HISTORY_SIZE: u64 = 9001;

pub const UNNAMED_PROFILE: &str = "Unnamed";

/// The structured view of a Windows Terminal `settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WtConfig {
    /// Whitelisted top-level settings present in the file.
    pub globals: Map<String, Value>,
    pub profiles: WtProfiles,
    pub schemes: Vec<WtSchemeEntry>,
    /// Keybinding records, kept opaque. An empty list means "leave the
    /// file's actions alone" on write.
    pub actions: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WtProfiles {
    pub defaults: Map<String, Value>,
    pub list: Vec<WtProfile>,
}

/// A single entry of `profiles.list`.
///
/// Stored as the raw JSON object so keys HyperSkin does not know about, and
/// their order, survive a rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WtProfile {
    fields: Map<String, Value>,
}

impl WtProfile {
    /// Wrap a raw profile object, inserting `name: "Unnamed"` first when the
    /// profile has no `name` key.
    pub fn from_fields(fields: Map<String, Value>) -> Self {
        if fields.contains_key("name") {
            return Self { fields };
        }
        let mut named = Map::with_capacity(fields.len() + 1);
        named.insert("name".to_string(), Value::from(UNNAMED_PROFILE));
        named.extend(fields);
        Self { fields: named }
    }

    pub fn new(name: &str) -> Self {
        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::from(name));
        Self { fields }
    }

    pub fn name(&self) -> &str {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNNAMED_PROFILE)
    }

    pub fn guid(&self) -> Option<&str> {
        self.fields.get("guid").and_then(Value::as_str)
    }

    pub fn history_size(&self) -> Option<u64> {
        self.fields.get("historySize").and_then(Value::as_u64)
    }

    pub fn set_history_size(&mut self, size: u64) {
        self.fields
            .insert("historySize".to_string(), Value::from(size));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.fields.insert(key.to_string(), value);
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// A Windows Terminal color scheme. Every color is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WtColorScheme {
    pub name: String,
    pub background: String,
    pub foreground: String,
    pub cursor_color: String,
    pub selection_background: String,
    pub black: String,
    pub red: String,
    pub green: String,
    pub yellow: String,
    pub blue: String,
    pub purple: String,
    pub cyan: String,
    pub white: String,
    pub bright_black: String,
    pub bright_red: String,
    pub bright_green: String,
    pub bright_yellow: String,
    pub bright_blue: String,
    pub bright_purple: String,
    pub bright_cyan: String,
    pub bright_white: String,

    /// Keys beyond the 21 colors and name, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub static DEFAULT_WT_COLOR_SCHEME: LazyLock<WtColorScheme> = LazyLock::new(|| WtColorScheme {
    name: "HyperSkin Default".to_string(),
    background: "#0C0C0C".to_string(),
    foreground: "#CCCCCC".to_string(),
    cursor_color: "#FFFFFF".to_string(),
    selection_background: "#FFFFFF".to_string(),
    black: "#0C0C0C".to_string(),
    red: "#C50F1F".to_string(),
    green: "#13A10E".to_string(),
    yellow: "#C19C00".to_string(),
    blue: "#0037DA".to_string(),
    purple: "#881798".to_string(),
    cyan: "#3A96DD".to_string(),
    white: "#CCCCCC".to_string(),
    bright_black: "#767676".to_string(),
    bright_red: "#E74856".to_string(),
    bright_green: "#16C60C".to_string(),
    bright_yellow: "#F9F1A5".to_string(),
    bright_blue: "#3B78FF".to_string(),
    bright_purple: "#B4009E".to_string(),
    bright_cyan: "#61D6D6".to_string(),
    bright_white: "#F2F2F2".to_string(),
    extra: Map::new(),
});

/// An entry of the `schemes` array as found in the file.
///
/// Schemes HyperSkin writes are always [`WtColorScheme`]s. Entries the
/// user wrote that lack some colors (Windows Terminal treats `cursorColor`
/// and `selectionBackground` as optional) are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WtSchemeEntry {
    Complete(WtColorScheme),
    Raw(Value),
}

impl WtSchemeEntry {
    /// Classify a raw `schemes` element.
    pub fn from_value(value: Value) -> Self {
        match WtColorScheme::deserialize(&value) {
            Ok(scheme) => WtSchemeEntry::Complete(scheme),
            Err(_) => WtSchemeEntry::Raw(value),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            WtSchemeEntry::Complete(scheme) => Some(&scheme.name),
            WtSchemeEntry::Raw(value) => value.get("name").and_then(Value::as_str),
        }
    }

    pub fn background(&self) -> Option<&str> {
        match self {
            WtSchemeEntry::Complete(scheme) => Some(&scheme.background),
            WtSchemeEntry::Raw(value) => value.get("background").and_then(Value::as_str),
        }
    }

    pub fn foreground(&self) -> Option<&str> {
        match self {
            WtSchemeEntry::Complete(scheme) => Some(&scheme.foreground),
            WtSchemeEntry::Raw(value) => value.get("foreground").and_then(Value::as_str),
        }
    }

    pub fn as_complete(&self) -> Option<&WtColorScheme> {
        match self {
            WtSchemeEntry::Complete(scheme) => Some(scheme),
            WtSchemeEntry::Raw(_) => None,
        }
    }
}

impl From<WtColorScheme> for WtSchemeEntry {
    fn from(scheme: WtColorScheme) -> Self {
        WtSchemeEntry::Complete(scheme)
    }
}

impl WtConfig {
    /// Insert `scheme`, replacing any scheme with the same name.
    pub fn upsert_scheme(&mut self, scheme: WtColorScheme) {
        self.schemes.retain(|s| s.name() != Some(scheme.name.as_str()));
        self.schemes.push(WtSchemeEntry::Complete(scheme));
    }

    /// Remove the scheme called `name`. Returns false if there was none.
    pub fn remove_scheme(&mut self, name: &str) -> bool {
        let before = self.schemes.len();
        self.schemes.retain(|s| s.name() != Some(name));
        self.schemes.len() != before
    }

    /// Set `historySize` on the profile defaults and on every profile.
    pub fn set_history_size(&mut self, size: u64) {
        self.profiles
            .defaults
            .insert("historySize".to_string(), Value::from(size));
        for profile in &mut self.profiles.list {
            profile.set_history_size(size);
        }
    }
}
