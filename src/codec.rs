//! The pixel payload read by the calendar shader.

pub mod metadata;
pub mod pattern;
pub mod pixel;
pub mod schema;
