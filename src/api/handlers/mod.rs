// HTTP handlers for the engine's operational surface

pub mod scheduler;
