//! Terminal output: formatter trait, console helpers and per-view renderers.

pub mod community;
pub mod console;
pub mod features;
pub mod formatter;
