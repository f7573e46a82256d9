use std::path::{Path, PathBuf};

use tracing::debug;

/// Package directories of the Windows Terminal channels, probed in order.
const CHANNEL_PACKAGES: &[&str] = &[
    "Microsoft.WindowsTerminal_8wekyb3d8bbwe",
    "Microsoft.WindowsTerminalPreview_8wekyb3d8bbwe",
    "Microsoft.WindowsTerminalCanary_8wekyb3d8bbwe",
];

/// Candidate `settings.json` paths under `%LOCALAPPDATA%`: stable, preview,
/// canary.
pub fn candidate_settings_paths(local_app_data: &Path) -> Vec<PathBuf> {
    CHANNEL_PACKAGES
        .iter()
        .map(|package| {
            local_app_data
                .join("Packages")
                .join(package)
                .join("LocalState")
                .join("settings.json")
        })
        .collect()
}

/// Return the first candidate that exists, or the stable-channel path when
/// none do. The returned file may not exist.
pub fn discover_settings_path(local_app_data: &Path) -> PathBuf {
    let candidates = candidate_settings_paths(local_app_data);

    if let Some(found) = candidates.iter().find(|candidate| candidate.exists()) {
        debug!(
            event = "core.wt.settings_discovered",
            path = %found.display()
        );
        return found.clone();
    }

    let stable = candidates[0].clone();
    debug!(
        event = "core.wt.settings_not_found",
        fallback = %stable.display()
    );
    stable
}
