use chrono::{DateTime, Utc};

/// A domain notification.
///
/// Notifications are immutable facts about a committed mutation. They are not
/// persisted and carry no delivery guarantee beyond best-effort fan-out.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "warehouse.product.saved").
    fn event_type(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
