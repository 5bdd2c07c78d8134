//! Command implementations

mod config;
mod down;
mod status;
mod up;

pub use config::execute as config;
pub use down::execute as down;
pub use status::execute as status;
pub use up::execute as up;
