//! # Corpsman
//!
//! An offline clinical query resolution engine for trauma-care guideline
//! corpora, built for constrained hardware.
//!
//! ## Features
//!
//! - Pure Rust implementation, no network access
//! - BM25-ranked lexical search over segmented guideline text
//! - Direct weight-scaled drug-dose computation from a static formulary
//! - One-deep clarification dialogue for underspecified queries
//! - Strict resolution precedence: dose, clarification, corpus search
//! - Binary snapshots to skip index rebuilds at startup
//!
//! The entry point is [`engine::QueryEngine`]: recognized text in, one
//! speakable response string out.

pub mod analysis;
pub mod corpus;
pub mod dialogue;
pub mod dose;
pub mod engine;
pub mod error;
pub mod index;
pub mod snapshot;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
