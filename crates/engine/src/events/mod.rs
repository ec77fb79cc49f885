//! Topic-based event bus for lifecycle and map events.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::MapEvent;
