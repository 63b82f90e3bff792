//! Intake flows shared by the HTTP handlers

pub mod booking;
pub mod intent;
