//! Core types for the wizard
//!
//! This module provides the fundamental types used throughout the crate:
//! - `LoopState` / `Termination` - Agent loop state machine
//! - `AgentEvent` / `EventSink` - Progress reporting
//! - `WizardError` - Error types

pub mod error;
pub mod output;
pub mod state;

pub use error::{WizardError, WizardResult};
pub use output::{AgentEvent, EventSink, NoopSink};
pub use state::{LoopState, Termination};
