// Notification domain module
// Reminder kinds and the append-only notification record

pub mod record;

// Re-export main types for convenience
pub use record::{NewNotification, ReminderKind, CATEGORY_BREAK};
