use crate::core::{Matcher, MatchError};
use crate::models::{DeclarationTally, ParseSideError, Side};
use std::path::Path;
use thiserror::Error;

/// Line that closes the registration section and, optionally, the likes section
pub const SENTINEL: &str = "END";

/// Errors that can occur while reading a roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("line {line}: missing side for '{name}'")]
    MissingSide { line: usize, name: String },

    #[error("line {line}: {source}")]
    InvalidSide {
        line: usize,
        #[source]
        source: ParseSideError,
    },

    #[error("line {line}: unexpected token '{token}' after side")]
    TrailingToken { line: usize, token: String },

    #[error("registration section is not terminated by 'END'")]
    Unterminated,

    #[error("line {line}: {source}")]
    Match {
        line: usize,
        #[source]
        source: MatchError,
    },

    #[error("failed to read roster file: {0}")]
    Io(#[from] std::io::Error),
}

/// Registration record: `name side`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
    pub line: usize,
    pub name: String,
    pub side: Side,
}

/// Declaration record: `name like1 like2 ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterLikes {
    pub line: usize,
    pub name: String,
    pub likes: Vec<String>,
}

/// Parsed roster, records in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    pub entries: Vec<RosterEntry>,
    pub declarations: Vec<RosterLikes>,
}

/// Counts from applying a roster to a matcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RosterSummary {
    pub participants: usize,
    pub declarations: usize,
    pub tally: DeclarationTally,
}

fn meaningful_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
}

/// Parse the two-section roster format
///
/// ```text
/// alice left
/// bob right
/// END
/// alice bob
/// bob alice
/// END
/// ```
pub fn parse_roster(input: &str) -> Result<Roster, RosterError> {
    let mut roster = Roster::default();
    let mut lines = meaningful_lines(input);

    let mut terminated = false;
    for (line, text) in lines.by_ref() {
        if text == SENTINEL {
            terminated = true;
            break;
        }
        let mut tokens = text.split_whitespace();
        let name = tokens.next().unwrap_or_default().to_string();
        let side = tokens
            .next()
            .ok_or_else(|| RosterError::MissingSide { line, name: name.clone() })?
            .parse::<Side>()
            .map_err(|source| RosterError::InvalidSide { line, source })?;
        if let Some(token) = tokens.next() {
            return Err(RosterError::TrailingToken { line, token: token.to_string() });
        }
        roster.entries.push(RosterEntry { line, name, side });
    }
    if !terminated {
        return Err(RosterError::Unterminated);
    }

    for (line, text) in lines {
        if text == SENTINEL {
            break;
        }
        let mut tokens = text.split_whitespace().map(str::to_string);
        let name = tokens.next().unwrap_or_default();
        roster.declarations.push(RosterLikes {
            line,
            name,
            likes: tokens.collect(),
        });
    }

    Ok(roster)
}

impl Roster {
    /// Register every entry, then process declarations in order
    pub fn apply(&self, matcher: &mut Matcher) -> Result<RosterSummary, RosterError> {
        for entry in &self.entries {
            matcher.register(&entry.name, entry.side);
        }

        let mut tally = DeclarationTally::default();
        for record in &self.declarations {
            let outcome = matcher
                .declare_all(&record.name, record.likes.as_slice())
                .map_err(|source| RosterError::Match { line: record.line, source })?;
            tally.merge(outcome);
        }

        Ok(RosterSummary {
            participants: self.entries.len(),
            declarations: self.declarations.len(),
            tally,
        })
    }
}

/// Read, parse and apply a roster file
pub fn load_roster_file<P: AsRef<Path>>(
    path: P,
    matcher: &mut Matcher,
) -> Result<RosterSummary, RosterError> {
    let input = std::fs::read_to_string(path.as_ref())?;
    let summary = parse_roster(&input)?.apply(matcher)?;
    tracing::info!(
        "Loaded roster {}: {} participants, {} declaration lines, {} mutual edges",
        path.as_ref().display(),
        summary.participants,
        summary.declarations,
        matcher.graph().edge_count()
    );
    Ok(summary)
}
