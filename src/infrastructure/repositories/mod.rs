// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_break_session_repository;
pub mod postgres_notification_repository;
pub mod postgres_shift_repository;

pub use postgres_break_session_repository::PostgresBreakSessionStore;
pub use postgres_notification_repository::PostgresNotificationHistoryStore;
pub use postgres_shift_repository::PostgresShiftRepository;
