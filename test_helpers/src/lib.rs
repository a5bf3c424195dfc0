//! Test helpers shared across the workspace.
//!
//! Fixture documents are written and read inside a [`figment::Jail`], so
//! tests never touch the real working directory or environment.

pub mod figment;
