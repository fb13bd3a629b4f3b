//! `warehouse-events` — post-commit notification plumbing.
//!
//! Stores publish a notification after each successful mutation; consumers
//! (currently only the low-stock monitor) subscribe and react. Notifications
//! are informational: losing one never affects the mutation that produced it.

pub mod bus;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
