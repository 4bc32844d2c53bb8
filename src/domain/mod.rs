// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod breaks;
pub mod notifications;
pub mod repositories;
pub mod shift;
