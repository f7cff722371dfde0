//! Utility functions for the reporter core

pub mod sanitize;
pub mod time;
