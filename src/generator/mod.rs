pub mod compose;
pub mod export;
pub mod format;
pub mod lan;
pub mod merge;
pub mod primitives;
pub mod protocols;
pub mod wan;

// Re-export the composers
pub use compose::{extra_cg, generate};
pub use lan::lan_cg;
pub use wan::wan_cg;

// Re-export formatting and post-processing helpers
pub use export::{to_json, to_script, ExportOptions};
pub use format::{format_array_value, format_boolean_value, quote_value, Command};
pub use merge::{command_shortener, merge_router_configs};
