//! Interactive read-answer loop

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::agent::Agent;
use crate::core::WizardResult;

use super::console::Console;

/// Inputs that end the session (case-insensitive)
pub const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

/// What a line of user input asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Query(String),
    Empty,
    Exit,
}

impl Input {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Input::Empty
        } else if EXIT_WORDS.contains(&trimmed.to_lowercase().as_str()) {
            Input::Exit
        } else {
            Input::Query(trimmed.to_string())
        }
    }
}

/// Why the session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    ExitWord,
    EndOfInput,
    Interrupted,
}

/// Run the session on stdin until an exit word, end of input or Ctrl-C
///
/// Ctrl-C ends the session both at the prompt and while a query is running.
pub async fn run_session(agent: &Agent, console: &Console) -> WizardResult<SessionEnd> {
    let input = BufReader::new(tokio::io::stdin());
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("[Session] Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    drive(agent, console, input, interrupt).await
}

/// Read-answer loop over any line source
///
/// Each query is handled to completion before the next prompt. A failed
/// model request is reported and the session continues. `interrupt` is
/// polled for the whole session; once it resolves the session ends, even
/// in the middle of a query.
pub async fn drive<R, F>(
    agent: &Agent,
    console: &Console,
    input: R,
    interrupt: F,
) -> WizardResult<SessionEnd>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = ()>,
{
    let mut lines = input.lines();
    tokio::pin!(interrupt);

    let end = loop {
        console.print_prompt();

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut interrupt => {
                console.println();
                break SessionEnd::Interrupted;
            }
        };

        let Some(line) = line else {
            console.println();
            break SessionEnd::EndOfInput;
        };

        let query = match Input::parse(&line) {
            Input::Empty => continue,
            Input::Exit => break SessionEnd::ExitWord,
            Input::Query(query) => query,
        };

        let result = tokio::select! {
            result = agent.handle(&query, console) => result,
            _ = &mut interrupt => {
                tracing::info!("[Session] Query abandoned");
                console.end_trail();
                break SessionEnd::Interrupted;
            }
        };

        match result {
            Ok(answer) => {
                console.end_trail();
                console.print_answer(&answer);
            }
            Err(e) => {
                tracing::error!("[Session] Query failed: {}", e);
                console.end_trail();
                console.print_error(&e.to_string());
            }
        }
    };

    tracing::info!("[Session] Ended: {:?}", end);
    Ok(end)
}
