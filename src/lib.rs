//! Recipe browsing and "what can I cook" matching.
//!
//! The heart of the crate is [`matcher::matches`], a loose, symmetric notion
//! of two ingredient names meaning the same thing. Recipe ranking
//! ([`scoring`]) and pantry/shopping-list deduplication ([`lists`]) are both
//! built on it.

pub mod config;
pub mod error;
pub mod executor;
pub mod lists;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod scoring;
pub mod search;
pub mod sources;
pub mod state;
