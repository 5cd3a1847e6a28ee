//! Command handlers.

pub mod completions;
pub mod scaffold;
