//! # rankprep Core
//!
//! Domain types, traits, and error definitions for preparing dialogue
//! batches ahead of a ranking model. This crate has no knowledge of any
//! concrete component: it defines the batch model and the name-keyed
//! registry that the other crates build against.
//!
//! ## Design Philosophy
//!
//! Every batch transform is a [`BatchComponent`]. Implementations live in
//! their own crates and are made discoverable by registering a factory
//! under a stable string name. This enables:
//! - Instantiating components from pipeline configuration by name
//! - Easy testing with stub components
//! - Clean dependency graph (all crates depend inward on core)

pub mod component;
pub mod dialogue;
pub mod error;

// Re-export key types at crate root for ergonomics
pub use component::{BatchComponent, ComponentFactory, ComponentOptions, ComponentRegistry};
pub use dialogue::{ComposedBatch, DialogueBatch, History, Utterance, check_columns};
pub use error::{BatchError, ComponentError, Error, Result};
