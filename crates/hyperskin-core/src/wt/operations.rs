//! Read-modify-write operations on Windows Terminal settings.

use std::path::Path;

use tracing::info;

use super::errors::WtError;
use super::persistence::{read_wt_config, write_wt_config};
use super::types::{DEFAULT_HISTORY_SIZE, WtColorScheme, WtProfile, WtSchemeEntry};

pub fn list_profiles(path: &Path) -> Result<Vec<WtProfile>, WtError> {
    Ok(read_wt_config(path)?.profiles.list)
}

/// Schemes in file order, including entries that lack some colors.
pub fn list_schemes(path: &Path) -> Result<Vec<WtSchemeEntry>, WtError> {
    Ok(read_wt_config(path)?.schemes)
}

/// Add `scheme`, replacing any existing scheme with the same name.
pub fn add_scheme(path: &Path, scheme: WtColorScheme) -> Result<(), WtError> {
    let mut config = read_wt_config(path)?;
    let name = scheme.name.clone();
    config.upsert_scheme(scheme);
    write_wt_config(&config, path)?;

    info!(event = "core.wt.scheme_added", scheme = %name);
    Ok(())
}

/// Remove the scheme called `name`. Removing an unknown name is not an
/// error; the file is still rewritten.
pub fn remove_scheme(path: &Path, name: &str) -> Result<(), WtError> {
    let mut config = read_wt_config(path)?;
    let removed = config.remove_scheme(name);
    write_wt_config(&config, path)?;

    info!(
        event = "core.wt.scheme_removed",
        scheme = name,
        found = removed
    );
    Ok(())
}

/// Apply a theme's color scheme to Windows Terminal.
pub fn apply_scheme_to_wt(path: &Path, scheme: WtColorScheme) -> Result<(), WtError> {
    add_scheme(path, scheme)
}

/// Set `historySize` on the profile defaults and every profile.
///
/// Enabling applies `size`; disabling resets to [`DEFAULT_HISTORY_SIZE`]
/// regardless of `size`.
pub fn set_persistent_history(path: &Path, enabled: bool, size: u64) -> Result<(), WtError> {
    let effective = if enabled { size } else { DEFAULT_HISTORY_SIZE };

    let mut config = read_wt_config(path)?;
    config.set_history_size(effective);
    write_wt_config(&config, path)?;

    info!(
        event = "core.wt.history_updated",
        enabled = enabled,
        history_size = effective,
        profiles = config.profiles.list.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::wt::types::DEFAULT_WT_COLOR_SCHEME;

    const SETTINGS: &str = r#"{
    // user settings
    "theme": "dark",
    "profiles": {
        "defaults": { "historySize": 12000 },
        "list": [
            { "name": "PowerShell", "historySize": 500 },
            { "name": "Ubuntu", "guid": "{2c4de342-38b7-51cf-b940-2309a097f518}" },
        ]
    },
    "schemes": []
}"#;

    fn settings(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("settings.json");
        std::fs::write(&path, SETTINGS).unwrap();
        path
    }

    fn named(name: &str, background: &str) -> WtColorScheme {
        WtColorScheme {
            name: name.to_string(),
            background: background.to_string(),
            ..DEFAULT_WT_COLOR_SCHEME.clone()
        }
    }

    #[test]
    fn test_add_scheme_replaces_same_name() {
        let dir = TempDir::new().unwrap();
        let path = settings(&dir);

        add_scheme(&path, named("Dracula", "#282a36")).unwrap();
        add_scheme(&path, named("Nord", "#2e3440")).unwrap();
        add_scheme(&path, named("Dracula", "#1e1f29")).unwrap();

        let schemes = list_schemes(&path).unwrap();
        let dracula: Vec<_> = schemes
            .iter()
            .filter(|s| s.name() == Some("Dracula"))
            .collect();
        assert_eq!(dracula.len(), 1);
        assert_eq!(dracula[0].as_complete(), Some(&named("Dracula", "#1e1f29")));
        assert_eq!(schemes.len(), 2);
    }

    #[test]
    fn test_remove_unknown_scheme_is_ok() {
        let dir = TempDir::new().unwrap();
        let path = settings(&dir);
        add_scheme(&path, named("Nord", "#2e3440")).unwrap();

        remove_scheme(&path, "Solarized").unwrap();
        assert_eq!(list_schemes(&path).unwrap().len(), 1);

        remove_scheme(&path, "Nord").unwrap();
        assert!(list_schemes(&path).unwrap().is_empty());
    }

    #[test]
    fn test_apply_scheme_to_wt() {
        let dir = TempDir::new().unwrap();
        let path = settings(&dir);
        apply_scheme_to_wt(&path, DEFAULT_WT_COLOR_SCHEME.clone()).unwrap();
        assert_eq!(list_schemes(&path).unwrap()[0].name(), Some("HyperSkin Default"));
    }

    #[test]
    fn test_disable_history_resets_to_default_size() {
        let dir = TempDir::new().unwrap();
        let path = settings(&dir);

        set_persistent_history(&path, false, 99999).unwrap();

        let config = read_wt_config(&path).unwrap();
        assert_eq!(config.profiles.defaults.get("historySize"), Some(&json!(9001)));
        for profile in &config.profiles.list {
            assert_eq!(profile.history_size(), Some(9001), "{}", profile.name());
        }
    }

    #[test]
    fn test_enable_history_applies_size_everywhere() {
        let dir = TempDir::new().unwrap();
        let path = settings(&dir);

        set_persistent_history(&path, true, 50000).unwrap();

        let profiles = list_profiles(&path).unwrap();
        assert_eq!(profiles.len(), 2);
        assert!(profiles.iter().all(|p| p.history_size() == Some(50000)));
        assert_eq!(
            profiles[1].guid(),
            Some("{2c4de342-38b7-51cf-b940-2309a097f518}")
        );

        let config = read_wt_config(&path).unwrap();
        assert_eq!(config.globals.get("theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_partial_scheme_does_not_block_history_update() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r##"{
    "profiles": { "list": [ { "name": "cmd" } ] },
    "schemes": [ { "name": "Legacy", "background": "#000000", "foreground": "#FFFFFF" } ]
}"##,
        )
        .unwrap();

        assert_eq!(list_profiles(&path).unwrap().len(), 1);
        set_persistent_history(&path, true, 5000).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            written["schemes"],
            json!([{ "name": "Legacy", "background": "#000000", "foreground": "#FFFFFF" }])
        );
        assert_eq!(written["profiles"]["list"][0]["historySize"], json!(5000));

        add_scheme(&path, named("Nord", "#2e3440")).unwrap();
        let names: Vec<_> = list_schemes(&path)
            .unwrap()
            .iter()
            .map(|s| s.name().unwrap_or_default().to_string())
            .collect();
        assert_eq!(names, vec!["Legacy", "Nord"]);
    }
}
