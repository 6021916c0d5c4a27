pub mod footer;
pub mod header;
pub mod sidebar;

pub use footer::Footer;
pub use header::Header;
pub use sidebar::{Sidebar, SidebarAction, SIDEBAR_WIDTH};
