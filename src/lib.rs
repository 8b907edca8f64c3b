//! A reveal card for the terminal: a matrix-rain splash screen with a
//! simulated loading bar, a locked card that opens on click, and a short
//! celebration burst. All animation state comes from a seeded deterministic
//! generator, so field layouts and progress timings are reproducible.

pub mod config;
pub mod engine;
pub mod page;
pub mod render;
