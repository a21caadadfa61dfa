/// Handler modules for outbound UI actions
pub mod share;

pub use share::{download_current, save_photo, share_current};
