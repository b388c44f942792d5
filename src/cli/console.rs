use colored::*;
use std::io::{self, Write};

use crate::core::{AgentEvent, EventSink};

const EXAMPLE_PROMPTS: [&str; 4] = [
    "Plan a cozy Saturday in NYC at (40.7128, -74.0060) with mystery books",
    "What is the weather at (37.7749, -122.4194)?",
    "Give me a trivia question",
    "Plan a fun Sunday in London (use the city name)",
];

/// Console handles all terminal I/O with colored formatting
pub struct Console {
    user_color: Color,
    wizard_color: Color,
    trail_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            wizard_color: Color::Green,
            trail_color: Color::Magenta,
        }
    }

    /// Print a welcome banner with the model and tool inventory
    pub fn print_banner(&self, model: &str, host: &str, tool_names: &[&str]) {
        println!("{}", "=".repeat(50).bright_blue());
        println!(
            "{}",
            "       Weekend Wizard  - Powered by Ollama".bright_blue().bold()
        );
        println!("{}", "=".repeat(50).bright_blue());
        println!("  Model : {}  (via {})", model.bold(), host);
        println!("  Tools : {}", tool_names.join(", "));
        println!("{}", "=".repeat(50).bright_blue());
        println!();
        println!("{}", "Example prompts:".bold());
        for prompt in EXAMPLE_PROMPTS {
            println!("  {}", prompt.bright_black());
        }
        println!();
        println!("Type 'exit' to quit.");
        println!();
    }

    /// Print the input prompt (without newline)
    pub fn print_prompt(&self) {
        print!("{} ", "You:".color(self.user_color).bold());
        let _ = io::stdout().flush();
    }

    /// Close the progress trail opened by the first `Thinking` event
    pub fn end_trail(&self) {
        println!("{}", "]".color(self.trail_color));
        println!();
    }

    /// Print the wizard's answer followed by a separator
    pub fn print_answer(&self, answer: &str) {
        println!("{}", "Wizard:".color(self.wizard_color).bold());
        println!("{}", answer);
        println!();
        self.print_separator();
        println!();
    }

    /// Print a newline
    pub fn println(&self) {
        println!();
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Print a separator line
    pub fn print_separator(&self) {
        println!("{}", "-".repeat(50).bright_black());
    }

    /// Print the closing line
    pub fn print_goodbye(&self) {
        println!();
        println!(
            "{}",
            "Have a great weekend! See you next time!"
                .color(self.wizard_color)
                .bold()
        );
    }

    /// Print what to do when the model service is down
    pub fn print_unreachable(&self, host: &str, model: &str) {
        eprintln!();
        eprintln!(
            "{} Cannot connect to Ollama at {}",
            "[ERROR]".red().bold(),
            host
        );
        eprintln!("  1. Install Ollama from: https://ollama.com");
        eprintln!("  2. Start it:  ollama serve");
        eprintln!("  3. Pull the model: ollama pull {}", model);
        eprintln!("  Then re-run weekend-wizard.");
        eprintln!();
    }

    fn print_trail(&self, mark: &str) {
        print!("{}", mark.color(self.trail_color));
        let _ = io::stdout().flush();
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws the progress trail: `[Wizard is thinking` then `.` per tool call
/// and `?` per unknown tool
impl EventSink for Console {
    fn emit(&self, event: &AgentEvent) {
        match event {
            AgentEvent::Thinking { step: 0 } => self.print_trail("\n[Wizard is thinking"),
            AgentEvent::ToolStart { .. } => self.print_trail("."),
            AgentEvent::UnknownTool { .. } => self.print_trail("?"),
            _ => {}
        }
    }
}
