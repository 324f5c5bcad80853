//! Event handlers for keyboard and mouse input.

pub mod keyboard;
pub mod mouse;
