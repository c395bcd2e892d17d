//! Infrastructure layer: concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: browser automation, SSH,
//! process execution, HTTP probing, filesystem access, configuration
//! loading, and embedded assets.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod assets;
pub mod browser;
pub mod command_runner;
pub mod config;
pub mod fs;
pub mod network;
pub mod ssh;
