pub mod error;
pub mod generator;
pub mod models;
pub mod settings;
pub mod utils;

pub use error::{Result, RouterGenError};

// Re-export the main entry points for easier access
pub use generator::{
    command_shortener, extra_cg, generate, lan_cg, merge_router_configs, to_json, to_script,
    wan_cg, ExportOptions,
};
pub use models::{Credentials, RouterConfig, StarState, VpnType};
pub use settings::Settings;
