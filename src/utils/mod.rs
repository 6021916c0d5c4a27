pub mod layout;
pub mod list_navigation;
pub mod path;
pub mod text_input;

pub use layout::{cap_width, center_popup, pad};
pub use list_navigation::{SelectionNav, DEFAULT_PAGE_SIZE};
pub use path::{
    expand_path, format_path_for_display, get_config_dir, get_config_path, get_data_dir,
    get_home_dir, get_log_dir,
};
pub use text_input::TextInput;
