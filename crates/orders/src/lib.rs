//! `warehouse-orders` — order placement, the one business transaction in the
//! system. An order is not persisted: it either commits a stock decrement or
//! leaves state unchanged.

pub mod service;

pub use service::{OrderService, PlaceOrder};
