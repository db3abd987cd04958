//! Crafting Engine - probabilistic crafting resolution

pub mod core;
pub mod crafting;
