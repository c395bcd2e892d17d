//! Command implementations

pub mod menu;
pub mod session;
