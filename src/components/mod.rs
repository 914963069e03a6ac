pub mod gallery_host;
pub mod lightbox;
pub mod loader;
pub mod scroll_lock;
pub mod toast;
pub mod triggers;
