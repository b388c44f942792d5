//! Bounded ReAct loop
//!
//! One query runs through `Thinking -> (ToolCall | Final | StepExhausted) -> Done`:
//! - each step asks the [`ActionDecoder`] for a decision
//! - tool calls append the decision and a `Result of <tool>: <payload>` observation
//! - unknown tools get a corrective message listing the valid names
//! - after `max_steps` decisions without a final answer, a fixed fallback is used
//!
//! The answer is then passed once through the [`Reflector`].

use std::sync::Arc;

use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::core::{AgentEvent, EventSink, LoopState, Termination, WizardResult};
use crate::llm::{LlmProvider, Message};
use crate::tools::{ToolRegistry, ToolResult};

use super::config::AgentConfig;
use super::decoder::{ActionDecoder, Decision};
use super::reflection::Reflector;

/// Answer used when the step cap is reached
pub const STEP_LIMIT_ANSWER: &str =
    "I reached the step limit. Please try a simpler or more specific prompt.";

/// Everything the loop produced for one query
#[derive(Debug, Clone)]
pub struct QueryOutcome {
    /// Answer before reflection
    pub answer: String,
    pub termination: Termination,
    /// Full conversation, system prompt first
    pub history: Vec<Message>,
    /// Number of decisions requested
    pub steps: usize,
    /// Every state the loop passed through, ending in `Done`
    pub states: Vec<LoopState>,
}

/// The Weekend Wizard agent
///
/// Holds explicit handles to the model and the read-only tool registry.
/// History is created fresh for every query and dropped afterwards.
pub struct Agent {
    tools: Arc<ToolRegistry>,
    config: AgentConfig,
    decoder: ActionDecoder,
    reflector: Reflector,
}

impl Agent {
    pub fn new(llm: Arc<dyn LlmProvider>, tools: Arc<ToolRegistry>, config: AgentConfig) -> Self {
        let decoder = ActionDecoder::new(llm.clone(), config.sampling);
        let reflector = Reflector::new(llm, config.sampling);
        Self {
            tools,
            config,
            decoder,
            reflector,
        }
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Answer one user query: run the loop, then the review pass
    pub async fn handle(&self, query: &str, sink: &dyn EventSink) -> WizardResult<String> {
        let span = tracing::info_span!("query", id = %Uuid::new_v4());

        async move {
            tracing::info!("[Agent] Query: {}", query);
            let outcome = self.run_query(query, sink).await?;

            let answer = match self.reflector.review(&outcome.answer).await {
                Ok(review) => review.apply(outcome.answer),
                Err(e) => {
                    tracing::warn!("[Agent] Reflection failed, keeping answer: {}", e);
                    outcome.answer
                }
            };

            Ok(answer)
        }
        .instrument(span)
        .await
    }

    /// Run the bounded decision loop without reflection
    ///
    /// Tool failures never end the loop; only a failed model request does.
    pub async fn run_query(&self, query: &str, sink: &dyn EventSink) -> WizardResult<QueryOutcome> {
        let mut history = vec![
            Message::system(self.config.system_prompt.clone()),
            Message::user(query),
        ];
        let mut state = self.next_state(0);
        let mut states = Vec::new();
        let mut answer = None;
        let mut pending_args = Value::Null;
        let mut steps = 0;

        while !state.is_terminal() {
            states.push(state.clone());
            state = match state {
                LoopState::Thinking => {
                    sink.emit(&AgentEvent::Thinking { step: steps });
                    let decision = self.decoder.decide(&history).await?;
                    steps += 1;

                    let call = decision.to_json().to_string();
                    match decision {
                        Decision::Final { answer: text } => {
                            answer = Some(text);
                            LoopState::Final
                        }
                        Decision::ToolCall { name, args } => {
                            history.push(Message::assistant(call));
                            if self.tools.contains(&name) {
                                pending_args = Value::Object(args);
                                LoopState::tool_call(name)
                            } else {
                                tracing::info!("[Agent] Step {}: unknown tool '{}'", steps, name);
                                sink.emit(&AgentEvent::UnknownTool { name: name.clone() });
                                history.push(Message::user(self.unknown_tool_message(&name)));
                                self.next_state(steps)
                            }
                        }
                    }
                }
                LoopState::ToolCall { tool_name } => {
                    tracing::info!("[Agent] Step {}: calling '{}'", steps, tool_name);
                    let args = std::mem::take(&mut pending_args);
                    let observation = self.call_tool(&tool_name, &args, sink).await;
                    history.push(Message::user(observation));
                    self.next_state(steps)
                }
                terminal => terminal,
            };
        }

        let (answer, termination) = match answer {
            Some(text) => (text, Termination::FinalAnswer),
            None => {
                tracing::warn!("[Agent] No final answer after {} steps", steps);
                (STEP_LIMIT_ANSWER.to_string(), Termination::StepLimit)
            }
        };
        states.push(state);
        states.push(LoopState::Done);
        tracing::debug!("[Agent] Loop finished: {:?}", states);

        sink.emit(&AgentEvent::Answer {
            text: answer.clone(),
        });

        Ok(QueryOutcome {
            answer,
            termination,
            history,
            steps,
            states,
        })
    }

    /// Keep thinking while the step budget lasts
    fn next_state(&self, steps: usize) -> LoopState {
        if steps < self.config.max_steps {
            LoopState::Thinking
        } else {
            LoopState::StepExhausted
        }
    }

    /// Execute one tool and render its `Result of <tool>: <payload>` observation
    async fn call_tool(&self, name: &str, args: &Value, sink: &dyn EventSink) -> String {
        sink.emit(&AgentEvent::ToolStart {
            name: name.to_string(),
            args: args.clone(),
        });

        let result = match self.tools.execute(name, args).await {
            Ok(payload) => ToolResult::success(payload),
            Err(e) => {
                tracing::warn!("[Agent] Tool '{}' failed: {:#}", name, e);
                ToolResult::error(format!("{:#}", e))
            }
        };

        sink.emit(&AgentEvent::ToolEnd {
            name: name.to_string(),
            is_error: result.is_error,
        });
        format!("Result of {}: {}", name, result.to_observation())
    }

    fn unknown_tool_message(&self, name: &str) -> String {
        let available = self
            .tools
            .tool_names()
            .iter()
            .map(|n| format!("'{}'", n))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "Tool '{}' does not exist. Available tools: [{}]. Please use a valid tool or produce a final answer.",
            name, available
        )
    }
}
