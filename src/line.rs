//! Line normalization for MARC21 textual exports.
//!
//! Raw input is a multi-line string. A line whose first whitespace-delimited
//! segment is a 3-digit tag starts a new field; any other non-blank line is
//! a continuation of the most recent field and is merged into its content.
//! Exports typically separate the tag, the two indicator positions, and the
//! subfield content with tabs (`245\t1\t0\t$a Title`), but space-separated
//! layouts are accepted too.
//!
//! After normalization, every `700` added-author entry that introduces an
//! author name (`$a`) without a relator role (`$e`) gets a synthetic role
//! line inserted directly after it, carrying the [`NOT_MENTIONED`] sentinel.
//! This guarantees the positional pairing invariant the post-processing step
//! relies on: one contribution per author name, at the same sequence index.

use crate::error::ParseWarning;
use crate::subfield::has_code;

/// Placeholder role synthesized for an added author entry with no explicit
/// relator subfield.
pub const NOT_MENTIONED: &str = "not mentioned";

/// One normalized field line: a tag, its two indicators, and the subfield
/// content with continuations already merged in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// Field tag (3 digits). Empty for an orphan continuation, which then
    /// matches no template.
    pub tag: String,
    /// First indicator position, `' '` when the export leaves it blank.
    pub indicator1: char,
    /// Second indicator position, `' '` when the export leaves it blank.
    pub indicator2: char,
    /// Subfield content, e.g. `$a The Odyssey$b an epic poem`.
    pub content: String,
}

/// Turn raw multi-line text into an ordered sequence of [`SourceLine`]s.
///
/// Blank lines are ignored. Continuation lines are merged, space-joined,
/// into the preceding field's content, so a logical subfield value split
/// across physical lines is recovered intact as long as `$code` markers are
/// not themselves split. A continuation before any tagged line produces an
/// [`ParseWarning::OrphanContinuation`] and an empty-tag line.
///
/// Synthetic `$e not mentioned` role lines are inserted after incomplete
/// `700` author entries (see module docs); insertion preserves the relative
/// order of all original lines.
#[must_use]
pub fn normalize(raw: &str) -> (Vec<SourceLine>, Vec<ParseWarning>) {
    let mut lines: Vec<SourceLine> = Vec::new();
    let mut warnings = Vec::new();
    let mut seen_tag = false;

    for physical in raw.lines() {
        if physical.trim().is_empty() {
            continue;
        }

        if let Some(line) = split_tagged(physical) {
            seen_tag = true;
            lines.push(line);
        } else if seen_tag {
            // Continuation of the current field.
            if let Some(last) = lines.last_mut() {
                if !last.content.is_empty() {
                    last.content.push(' ');
                }
                last.content.push_str(physical.trim());
            }
        } else {
            warnings.push(ParseWarning::OrphanContinuation {
                line: physical.trim().to_string(),
            });
            lines.push(SourceLine {
                tag: String::new(),
                indicator1: ' ',
                indicator2: ' ',
                content: physical.trim().to_string(),
            });
        }
    }

    insert_missing_roles(&mut lines);
    (lines, warnings)
}

/// Split a tag-prefixed line into its parts, or return `None` for a
/// continuation line.
fn split_tagged(line: &str) -> Option<SourceLine> {
    let first = line.split_whitespace().next()?;
    if first.chars().count() != 3 || !first.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if line.contains('\t') {
        let cells: Vec<&str> = line.split('\t').collect();
        let indicator1 = indicator_from(cells.get(1).copied());
        let indicator2 = indicator_from(cells.get(2).copied());
        let content = if cells.len() > 3 {
            cells[3..].join(" ").trim().to_string()
        } else {
            String::new()
        };
        return Some(SourceLine {
            tag: first.to_string(),
            indicator1,
            indicator2,
            content,
        });
    }

    // Space-separated layout: indicators are the single-character tokens
    // between the tag and the first subfield marker.
    let rest = line
        .split_once(first)
        .map_or("", |(_, rest)| rest)
        .trim_start();
    let (indicator1, indicator2, content) = match rest.find('$') {
        Some(pos) => {
            let mut tokens = rest[..pos].split_whitespace();
            (
                indicator_from(tokens.next()),
                indicator_from(tokens.next()),
                rest[pos..].trim().to_string(),
            )
        }
        None => (' ', ' ', rest.trim().to_string()),
    };
    Some(SourceLine {
        tag: first.to_string(),
        indicator1,
        indicator2,
        content,
    })
}

fn indicator_from(cell: Option<&str>) -> char {
    cell.and_then(|c| c.trim().chars().next()).unwrap_or(' ')
}

/// Insert a synthetic `$e not mentioned` line after every `700` entry with
/// first indicator `1` that introduces `$a` but has no role, neither inline
/// nor on the immediately following `700` line.
fn insert_missing_roles(lines: &mut Vec<SourceLine>) {
    let mut i = 0;
    while i < lines.len() {
        let needs_role = {
            let line = &lines[i];
            line.tag == "700"
                && line.indicator1 == '1'
                && has_code(&line.content, 'a')
                && !has_code(&line.content, 'e')
                && !lines
                    .get(i + 1)
                    .is_some_and(|next| next.tag == "700" && has_code(&next.content, 'e'))
        };
        if needs_role {
            let (indicator1, indicator2) = (lines[i].indicator1, lines[i].indicator2);
            lines.insert(
                i + 1,
                SourceLine {
                    tag: "700".to_string(),
                    indicator1,
                    indicator2,
                    content: format!("$e {NOT_MENTIONED}"),
                },
            );
            i += 1;
        }
        i += 1;
    }
}
