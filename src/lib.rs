//! Gloomhold - turn-based tactical combat core

pub mod battle;
pub mod core;
