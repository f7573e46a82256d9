//! Plugin and theme operations on `.hyper.js`.
//!
//! Each operation re-reads the file, changes one thing and writes the whole
//! file back. A file that exists but cannot be evaluated is left untouched
//! and reported as `HyperError::Unevaluable`.

use std::path::Path;

use tracing::info;

use super::errors::HyperError;
use super::persistence::{read_hyper_config, try_read_hyper_config, write_hyper_config};
use crate::jsliteral::{Object, Value, parse_expression};

/// Plugin names from the `plugins` array, in load order.
pub fn list_plugins(path: &Path) -> Vec<String> {
    read_hyper_config(path).plugins()
}

/// Add `name` to `plugins`. Already-installed plugins are left alone and
/// the file is not rewritten.
pub fn install_plugin(path: &Path, name: &str) -> Result<(), HyperError> {
    let mut config = try_read_hyper_config(path)?;

    if !config.add_plugin(name) {
        info!(
            event = "core.hyper.plugin_already_installed",
            plugin = name
        );
        return Ok(());
    }

    write_hyper_config(&config, path)?;
    info!(event = "core.hyper.plugin_installed", plugin = name);
    Ok(())
}

/// Remove `name` from `plugins`.
///
/// # Errors
/// Returns `HyperError::PluginNotInstalled` if it is not in the list.
pub fn uninstall_plugin(path: &Path, name: &str) -> Result<(), HyperError> {
    let mut config = try_read_hyper_config(path)?;

    if !config.remove_plugin(name) {
        return Err(HyperError::PluginNotInstalled {
            name: name.to_string(),
        });
    }

    write_hyper_config(&config, path)?;
    info!(event = "core.hyper.plugin_uninstalled", plugin = name);
    Ok(())
}

/// Shallow-merge a theme's settings into the `config` section and write.
pub fn apply_theme_to_hyper(path: &Path, overrides: &Object) -> Result<(), HyperError> {
    let mut config = try_read_hyper_config(path)?;
    config.apply_overrides(overrides);
    write_hyper_config(&config, path)?;

    info!(
        event = "core.hyper.theme_applied",
        keys = overrides.len()
    );
    Ok(())
}

/// Set one `config` key from a JavaScript literal such as `16`, `'BEAM'`
/// or `['--login']`.
pub fn set_config_literal(path: &Path, key: &str, literal: &str) -> Result<(), HyperError> {
    let value = parse_expression(literal).map_err(|e| HyperError::InvalidValue {
        key: key.to_string(),
        source: e,
    })?;

    let mut config = try_read_hyper_config(path)?;
    config.set_config_value(key, value);
    write_hyper_config(&config, path)?;

    info!(event = "core.hyper.config_value_set", key = key);
    Ok(())
}

/// Read a single `config` key.
pub fn get_config_value(path: &Path, key: &str) -> Option<Value> {
    read_hyper_config(path).config_value(key).cloned()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn config_path(dir: &TempDir) -> std::path::PathBuf {
        dir.path().join(".hyper.js")
    }

    #[test]
    fn test_install_appends_in_order() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);

        install_plugin(&path, "hyper-snazzy").unwrap();
        install_plugin(&path, "hypercwd").unwrap();

        assert_eq!(list_plugins(&path), vec!["hyper-snazzy", "hypercwd"]);
    }

    #[test]
    fn test_install_existing_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        std::fs::write(&path, "module.exports = { plugins: ['hypercwd'] };\n").unwrap();

        install_plugin(&path, "hypercwd").unwrap();

        let source = std::fs::read_to_string(&path).unwrap();
        assert_eq!(source, "module.exports = { plugins: ['hypercwd'] };\n");
    }

    #[test]
    fn test_uninstall_missing_plugin_fails() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);

        let err = uninstall_plugin(&path, "hyper-snazzy").unwrap_err();
        assert!(matches!(err, HyperError::PluginNotInstalled { ref name } if name == "hyper-snazzy"));
        assert!(!path.exists());
    }

    #[test]
    fn test_uninstall_removes_plugin() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        install_plugin(&path, "a").unwrap();
        install_plugin(&path, "b").unwrap();

        uninstall_plugin(&path, "a").unwrap();
        assert_eq!(list_plugins(&path), vec!["b"]);
    }

    #[test]
    fn test_apply_theme_keeps_other_settings() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        std::fs::write(&path, "module.exports = { config: { fontSize: 20 } };").unwrap();

        let theme: Object = [("backgroundColor", Value::from("#1e1e2e"))]
            .into_iter()
            .collect();
        apply_theme_to_hyper(&path, &theme).unwrap();

        assert_eq!(
            get_config_value(&path, "backgroundColor"),
            Some(Value::from("#1e1e2e"))
        );
        assert_eq!(get_config_value(&path, "fontSize"), Some(Value::Number(20.0)));
    }

    #[test]
    fn test_edits_leave_unevaluable_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);
        let source = "module.exports = {\n  config: { shell: process.platform === 'win32' ? 'powershell.exe' : '' },\n  plugins: ['hypercwd'],\n};\n";
        std::fs::write(&path, source).unwrap();

        let theme: Object = [("backgroundColor", Value::from("#000"))].into_iter().collect();
        let results = [
            install_plugin(&path, "hyper-snazzy"),
            uninstall_plugin(&path, "hypercwd"),
            apply_theme_to_hyper(&path, &theme),
            set_config_literal(&path, "fontSize", "16"),
        ];
        for result in results {
            assert!(matches!(result, Err(HyperError::Unevaluable { .. })));
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), source);
    }

    #[test]
    fn test_set_config_literal() {
        let dir = TempDir::new().unwrap();
        let path = config_path(&dir);

        set_config_literal(&path, "shellArgs", "['--login', '-i']").unwrap();
        assert_eq!(
            get_config_value(&path, "shellArgs"),
            Some(Value::Array(vec!["--login".into(), "-i".into()]))
        );

        let err = set_config_literal(&path, "shell", "process.env.SHELL").unwrap_err();
        assert!(matches!(err, HyperError::InvalidValue { .. }));
    }
}
