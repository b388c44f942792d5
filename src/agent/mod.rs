//! Weekend Wizard agent
//!
//! - `Agent` - Bounded ReAct loop plus the review pass
//! - `ActionDecoder` - Model text to `Decision`, with one repair attempt
//! - `Reflector` - One-shot answer review
//! - `AgentConfig` - Builder for prompt, step cap and sampling

pub mod agent_loop;
pub mod config;
pub mod decoder;
pub mod reflection;
pub mod system_prompt;

pub use agent_loop::{Agent, QueryOutcome, STEP_LIMIT_ANSWER};
pub use config::AgentConfig;
pub use decoder::{extract_json, ActionDecoder, Decision};
pub use reflection::{Reflector, Review, APPROVAL_SENTINEL};
pub use system_prompt::{system_prompt, SYSTEM_TEMPLATE};
