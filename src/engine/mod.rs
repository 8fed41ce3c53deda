//! Test orchestration layer.
//!
//! This module provides types for:
//! - Per-adapter outcomes ([`TestOutcome`], [`FailureReason`])
//! - The adapters of one discovery pass ([`Generation`])
//! - Progress notifications ([`EngineEvent`], [`EngineObserver`])
//! - Running tests ([`TestEngine`])

mod error;
mod event;
mod generation;
mod outcome;
mod runner;

pub use error::EngineError;
pub use event::{EngineEvent, EngineObserver, NoopObserver};
pub use generation::{AdapterEntry, Completion, Generation};
pub use outcome::{FailureReason, TestOutcome};
pub use runner::{BatchStatus, EngineSettings, TestEngine};
