//! Console backend for development
//!
//! Prints emails to the console instead of sending them. Selected by setting
//! the mail server to `console`.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::email::{Email, EmailError, EmailSender};

const BOX_WIDTH: usize = 51;

/// Console email backend for development
#[derive(Debug, Clone, Default)]
pub struct ConsoleBackend {
    /// Whether to log email content in debug mode
    verbose: bool,
}

impl ConsoleBackend {
    /// Create a new console backend
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a verbose console backend that logs full email content
    #[must_use]
    pub const fn verbose() -> Self {
        Self { verbose: true }
    }
}

fn truncate(line: &str) -> String {
    if line.chars().count() > BOX_WIDTH {
        let head: String = line.chars().take(BOX_WIDTH - 3).collect();
        format!("{head}...")
    } else {
        line.to_string()
    }
}

#[async_trait]
impl EmailSender for ConsoleBackend {
    async fn send(&self, email: Email) -> Result<(), EmailError> {
        email.validate()?;

        let from = email.from.as_ref().ok_or(EmailError::NoSender)?;
        let subject = email.subject.as_ref().ok_or(EmailError::NoSubject)?;

        info!(
            from = %from,
            to = ?email.to,
            subject = %subject,
            "Console email sent"
        );

        if self.verbose {
            if let Some(text) = &email.text {
                debug!(text = %text, "Email text content");
            }

            if let Some(html) = &email.html {
                debug!(html = %html, "Email HTML content");
            }
        }

        println!("\n╭─────────────────────────────────────────────────────╮");
        println!("│ Console Email                                       │");
        println!("├─────────────────────────────────────────────────────┤");
        println!("│ From:    {:<43} │", truncate(from));
        println!("│ To:      {:<43} │", truncate(&email.to.join(", ")));
        println!("│ Subject: {:<43} │", truncate(subject));
        println!("├─────────────────────────────────────────────────────┤");

        if let Some(text) = &email.text {
            for line in text.lines() {
                println!("│ {:<51} │", truncate(line));
            }
            println!("├─────────────────────────────────────────────────────┤");
        }

        if let Some(html) = &email.html {
            let summary = format!("HTML Content ({} lines)", html.lines().count());
            println!("│ {summary:<51} │");
        }

        println!("╰─────────────────────────────────────────────────────╯\n");

        Ok(())
    }
}
