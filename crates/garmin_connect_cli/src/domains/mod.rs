//! Domain modules holding the operations the CLI dispatches to.
//!
//! - [`activities`]: list, view, weather, export, delete and rename

pub mod activities;
