use colored::*;

use crate::client::LettaMessage;

/// Maximum characters of a tool return shown before truncation
const TOOL_PREVIEW_CHARS: usize = 100;

/// Console handles terminal output for the demo programs
pub struct Console {
    user_color: Color,
    agent_color: Color,
}

impl Console {
    /// Create a new Console with default colors
    pub fn new() -> Self {
        Self {
            user_color: Color::Cyan,
            agent_color: Color::Green,
        }
    }

    /// Print a user message with colored formatting
    pub fn print_user(&self, message: &str) {
        println!("{} {}", "User:".color(self.user_color).bold(), message);
    }

    /// Print an agent reply
    pub fn print_agent(&self, message: &str) {
        println!(
            "{} {}",
            "Agent:".color(self.agent_color).bold(),
            message.color(self.agent_color)
        );
    }

    /// Print a tool call made by the agent
    pub fn print_tool_call(&self, name: &str, arguments: &str) {
        println!("{} {}({})", "Tool call:".magenta().bold(), name, arguments);
    }

    /// Print a (truncated) tool return
    pub fn print_tool_result(&self, output: &str, is_error: bool) {
        let preview: String = output.chars().take(TOOL_PREVIEW_CHARS).collect();
        let suffix = if output.chars().count() > TOOL_PREVIEW_CHARS {
            "..."
        } else {
            ""
        };
        let label = if is_error {
            "Tool error:".red().bold()
        } else {
            "Tool result:".blue().bold()
        };
        println!("{} {}{}", label, preview, suffix);
    }

    /// Print every message of an agent turn
    pub fn print_messages(&self, messages: &[LettaMessage]) {
        for message in messages {
            match message {
                LettaMessage::AssistantMessage { content } => self.print_agent(&content.as_text()),
                LettaMessage::ReasoningMessage { reasoning } => {
                    println!("{} {}", "Thinking:".bright_black(), reasoning.bright_black());
                }
                LettaMessage::ToolCallMessage { tool_call }
                | LettaMessage::ApprovalRequestMessage { tool_call } => {
                    self.print_tool_call(&tool_call.name, &tool_call.arguments);
                }
                LettaMessage::ToolReturnMessage {
                    tool_return,
                    status,
                } => {
                    let is_error = status.as_deref() == Some("error");
                    self.print_tool_result(tool_return, is_error);
                }
                _ => {}
            }
        }
    }

    /// Print a newline
    pub fn println(&self) {
        println!();
    }

    /// Print a system message (setup steps, info)
    pub fn print_system(&self, message: &str) {
        println!("{} {}", "System:".yellow().bold(), message);
    }

    /// Print an error message
    pub fn print_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    /// Print a banner with a title
    pub fn print_banner(&self, title: &str) {
        println!("{}", "=".repeat(60).bright_blue());
        println!("{}", format!("  {}", title).bright_blue().bold());
        println!("{}", "=".repeat(60).bright_blue());
        println!();
    }

    /// Print a separator line
    pub fn print_separator(&self) {
        println!("{}", "-".repeat(60).bright_black());
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
