//! CodeOrbit - Interactive 3D Code Graph Explorer
//!
//! Loads a scanned dependency graph, places its nodes in 3D space and lets
//! the user filter, search and inspect it in a Bevy viewer.

pub mod appearance;
pub mod cli;
pub mod config;
pub mod error;
pub mod layout;
pub mod models;
pub mod store;
pub mod visualization;
