pub mod draw;
pub mod events;

pub use events::{Command, EventHandler, SearchTarget};
