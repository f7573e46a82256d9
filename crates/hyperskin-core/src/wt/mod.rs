//! Windows Terminal `settings.json` (JSONC).

pub mod discovery;
pub mod errors;
pub mod operations;
pub mod persistence;
pub mod types;

pub use discovery::{candidate_settings_paths, discover_settings_path};
pub use errors::WtError;
pub use operations::{
    add_scheme, apply_scheme_to_wt, list_profiles, list_schemes, remove_scheme,
    set_persistent_history,
};
pub use persistence::{read_wt_config, write_wt_config};
pub use types::{
    DEFAULT_HISTORY_SIZE, DEFAULT_WT_COLOR_SCHEME, GLOBAL_KEYS, WtColorScheme, WtConfig,
    WtProfile, WtProfiles, WtSchemeEntry,
};
