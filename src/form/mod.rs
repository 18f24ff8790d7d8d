//! Intake form state and lifecycle orchestration

pub mod session;
pub mod state;
