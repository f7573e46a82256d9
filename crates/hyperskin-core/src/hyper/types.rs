use serde::{Serialize, Serializer};

use super::defaults::DEFAULT_HYPER_CONFIG;
use crate::jsliteral::{Object, Value};
use crate::merge::deep_merge;

/// A loaded Hyper configuration.
///
/// Wraps the exported object of a `.hyper.js` file after it has been
/// merged over the defaults. Unknown keys at any level are kept and written
/// back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct HyperConfig {
    root: Object,
}

impl Default for HyperConfig {
    fn default() -> Self {
        Self::from_overlay(&Value::Undefined)
    }
}

impl HyperConfig {
    /// Build a config by deep-merging `overlay` over the defaults.
    pub fn from_overlay(overlay: &Value) -> Self {
        match deep_merge(&DEFAULT_HYPER_CONFIG, overlay) {
            Value::Object(root) => Self { root },
            // Non-object overlays never reach here from the reader; fall
            // back to the defaults rather than storing a scalar root.
            _ => Self::from_overlay(&Value::Undefined),
        }
    }

    pub fn root(&self) -> &Object {
        &self.root
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }

    /// The `config` section.
    pub fn config(&self) -> Option<&Object> {
        self.root.get("config").and_then(Value::as_object)
    }

    pub fn config_value(&self, key: &str) -> Option<&Value> {
        self.config().and_then(|config| config.get(key))
    }

    /// Set a single key in the `config` section, creating the section if it
    /// was replaced by a non-object value.
    pub fn set_config_value(&mut self, key: &str, value: Value) {
        self.with_config(|config| {
            config.insert(key, value);
        });
    }

    /// Shallow-merge `overrides` into the `config` section.
    pub fn apply_overrides(&mut self, overrides: &Object) {
        self.with_config(|config| {
            for (key, value) in overrides.iter() {
                config.insert(key, value.clone());
            }
        });
    }

    /// Plugin names in load order. Non-string entries are skipped.
    pub fn plugins(&self) -> Vec<String> {
        self.string_list("plugins")
    }

    pub fn local_plugins(&self) -> Vec<String> {
        self.string_list("localPlugins")
    }

    /// Keymap entries as `(command, keys)` in file order.
    pub fn keymaps(&self) -> Vec<(String, String)> {
        self.root
            .get("keymaps")
            .and_then(Value::as_object)
            .map(|keymaps| {
                keymaps
                    .iter()
                    .filter_map(|(command, keys)| {
                        keys.as_str().map(|k| (command.to_string(), k.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugin_list()
            .is_some_and(|plugins| plugins.iter().any(|p| p.as_str() == Some(name)))
    }

    /// Append `name` to `plugins`. Returns false if it was already present.
    pub fn add_plugin(&mut self, name: &str) -> bool {
        if self.has_plugin(name) {
            return false;
        }
        self.with_plugin_list(|plugins| plugins.push(Value::from(name)));
        true
    }

    /// Remove the first occurrence of `name` from `plugins`.
    pub fn remove_plugin(&mut self, name: &str) -> bool {
        self.with_plugin_list(|plugins| {
            match plugins.iter().position(|p| p.as_str() == Some(name)) {
                Some(index) => {
                    plugins.remove(index);
                    true
                }
                None => false,
            }
        })
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.root
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn plugin_list(&self) -> Option<&Vec<Value>> {
        self.root.get("plugins").and_then(Value::as_array)
    }

    /// Run `f` on the `plugins` array, replacing a non-array value with an
    /// empty one. The key keeps its position in the root object.
    fn with_plugin_list<R>(&mut self, f: impl FnOnce(&mut Vec<Value>) -> R) -> R {
        let mut plugins = match self.root.get_mut("plugins") {
            Some(Value::Array(items)) => std::mem::take(items),
            _ => Vec::new(),
        };
        let result = f(&mut plugins);
        self.root.insert("plugins", Value::Array(plugins));
        result
    }

    /// Run `f` on the `config` section, replacing a non-object value with an
    /// empty one.
    fn with_config<R>(&mut self, f: impl FnOnce(&mut Object) -> R) -> R {
        let mut config = match self.root.get_mut("config") {
            Some(Value::Object(config)) => std::mem::take(config),
            _ => Object::new(),
        };
        let result = f(&mut config);
        self.root.insert("config", Value::Object(config));
        result
    }
}

impl Serialize for HyperConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root.serialize(serializer)
    }
}
