// API layer module (adapters for controllers)
// Only the engine's operational surface lives here; the surrounding
// application's CRUD routes are out of scope

pub mod errors;
pub mod handlers;
