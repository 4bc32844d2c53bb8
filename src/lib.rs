//! Breakwatch API Library
//!
//! Break scheduling and notification engine for the workforce management
//! platform: resolves agent shift schedules, derives break windows, and
//! drives the real-time reminder notifications.

pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod scheduler;
