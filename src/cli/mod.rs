//! Command implementations and terminal rendering.

pub mod console;
pub mod quote;
pub mod rate;
pub mod setup;
pub mod ui;
