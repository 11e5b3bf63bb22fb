//! Export and logging preferences
//!
//! Settings are read from YAML or TOML and kept in a process-wide snapshot
//! that generation code can read through [`Settings::current`].

pub mod settings_struct;

pub use settings_struct::{
    update_settings_from_content, update_settings_from_file, CommonSettings, ExportSettings,
    Settings,
};
