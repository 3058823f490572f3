pub mod environment;
pub mod location;
pub mod paths;
pub mod terminal;

pub use environment::{default_settings_path, resolve_settings_path};
pub use location::format_location;
pub use paths::{format_path_with_tilde, resolve_inventory_directory};
pub use terminal::sanitize_label;
