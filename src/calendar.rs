//! Calendar events and how they read on screen.

pub mod format;
pub mod model;
