//! The choose-from-list step shared by menus, profiles and city search

use crate::console::{Console, Style};
use crate::prompt::{Listing, Selection};

/// Outcome of a choose-from-list step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Position among the listing's real rows
    Row(usize),
    Exit,
    /// Input ended before a valid choice was made
    Closed,
}

/// Show `listing`, read a line, and repeat until it names a row or Exit.
/// Retries are unbounded.
pub async fn choose<C>(console: &mut C, listing: &Listing, question: &str) -> std::io::Result<Choice>
where
    C: Console + ?Sized,
{
    let rendered = listing.to_string();
    loop {
        console.emit(Style::Options, &rendered);
        let Some(line) = console.ask_line(question).await? else {
            return Ok(Choice::Closed);
        };

        match listing.resolve(&line) {
            Selection::Row(position) => return Ok(Choice::Row(position)),
            Selection::Exit => return Ok(Choice::Exit),
            Selection::Invalid => {
                tracing::debug!(input = %line, "Rejected menu input");
                console.emit(
                    Style::Error,
                    &format!("Invalid option '{}'.\nPlease select a valid option.", line.trim()),
                );
            }
        }
    }
}
