//! `warehouse-inventory` — the stock adjustment (restocking) service.

pub mod service;

pub use service::StockService;
