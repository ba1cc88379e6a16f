pub mod config;
pub use config::*;

pub mod draw;
pub use draw::*;

pub mod rejection;
pub use rejection::*;

pub mod state;
pub use state::*;
