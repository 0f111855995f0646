//! Text I/O boundary between the session and the user

use crate::weather::Severity;
use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// How a line should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Info,
    Options,
    Data,
    Error,
    /// A weather reading, tinted by how hot or cold it is
    Reading(Severity),
}

#[async_trait]
pub trait Console: Send {
    fn emit(&mut self, style: Style, text: &str);

    /// Show `prompt` and wait for one line. `None` once input is exhausted.
    async fn ask_line(&mut self, prompt: &str) -> std::io::Result<Option<String>>;
}

/// Colored stdout plus line-buffered stdin
pub struct Terminal {
    lines: Lines<BufReader<Stdin>>,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for Terminal {
    fn emit(&mut self, style: Style, text: &str) {
        match style {
            Style::Info => println!("{}", text.green()),
            Style::Options => println!("\n{}", text.blue()),
            Style::Data => println!("\n{}", text.magenta()),
            Style::Error => println!("\n{}", text.red()),
            Style::Reading(Severity::Cold) => println!("\n{}", text.cyan()),
            Style::Reading(Severity::Hot) => println!("\n{}", text.red()),
            Style::Reading(Severity::Normal) => println!("\n{}", text.magenta()),
        }
    }

    async fn ask_line(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("\n{}", prompt.yellow());
        std::io::stdout().flush()?;
        self.lines.next_line().await
    }
}
