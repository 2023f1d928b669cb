//! Book catalogue service.
//!
//! Wires the books module into the kit crates and drives the process lifecycle.

pub mod bootstrap;
pub mod modules;
