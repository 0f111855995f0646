//! Numbered listings with a trailing Exit entry

use super::node::MenuNode;
use std::fmt;

/// Selector of the synthetic Exit entry. Stays put however many rows precede it.
pub const EXIT_SELECTOR: &str = "9";
pub const EXIT_LABEL: &str = "Exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub selector: String,
    pub label: String,
    /// Selector came from the node rather than its position
    fixed: bool,
}

/// What a line of input picked out of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Position among the real rows
    Row(usize),
    Exit,
    Invalid,
}

/// Rendered rows, the last of which is always Exit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    rows: Vec<ListingRow>,
}

impl Listing {
    /// Build from `(fixed selector, label)` pairs; rows without a fixed
    /// selector are numbered by position.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (Option<String>, String)>,
    {
        let mut rows: Vec<ListingRow> = entries
            .into_iter()
            .enumerate()
            .map(|(position, (selector, label))| ListingRow {
                fixed: selector.is_some(),
                selector: selector.unwrap_or_else(|| position.to_string()),
                label,
            })
            .collect();
        rows.push(ListingRow {
            selector: EXIT_SELECTOR.to_string(),
            label: EXIT_LABEL.to_string(),
            fixed: true,
        });
        Self { rows }
    }

    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::from_entries(labels.into_iter().map(|label| (None, label)))
    }

    #[cfg(test)]
    pub fn rows(&self) -> &[ListingRow] {
        &self.rows
    }

    /// The Exit selector always wins, then fixed selectors, then positions.
    pub fn resolve(&self, input: &str) -> Selection {
        let input = input.trim();
        if input == EXIT_SELECTOR {
            return Selection::Exit;
        }
        let real = &self.rows[..self.rows.len() - 1];
        real.iter()
            .position(|row| row.fixed && row.selector == input)
            .or_else(|| real.iter().position(|row| row.selector == input))
            .map_or(Selection::Invalid, Selection::Row)
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", row.selector, row.label)?;
        }
        Ok(())
    }
}

pub fn render<'a, I>(nodes: I) -> Listing
where
    I: IntoIterator<Item = &'a MenuNode>,
{
    Listing::from_entries(
        nodes
            .into_iter()
            .map(|node| (node.selector.clone(), node.label.clone())),
    )
}
