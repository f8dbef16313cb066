//! Document Splicer: edits the resume's own line structure in place.
//!
//! # Edit model
//! Every edit is planned against the immutable locate-time numbering first (`plan_edits`),
//! then applied as one batch (`apply_edits`):
//! - An `Insert` carries an *anchor*: the original line its content goes in front of.
//!   Anchors past the end are clamped to the end. Equal anchors keep plan order,
//!   which is always skills, then the experience sentence, then the summary sentence.
//! - An `AppendToLine` rewrites one original line in place and shifts nothing.
//!
//! Header-derived positions are original line numbers. The fallbacks used when a
//! header is missing are fixed *output* slots (2 for skills, 3 for the experience
//! sentence, 4 for the summary sentence) counted past the name and contact lines, where
//! every block planned earlier counts as one slot. `slot_anchor` turns a slot into an
//! anchor.
//!
//! The splicer never fails.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tailoring::matcher::MatchResult;
use crate::tailoring::sanitize::sanitize_text;
use crate::tailoring::sections::SectionIndex;
use crate::tailoring::taxonomy::SectionAliases;

/// Output slot of the skills block when there is no skills header.
pub const SKILLS_SLOT: usize = 2;
/// Output slot of the experience sentence when there is no experience or summary header.
pub const EXPERIENCE_SLOT: usize = 3;
/// Output slot of the summary sentence when there is no summary or skills header.
pub const SUMMARY_SLOT: usize = 4;

const BULLET_PREFIX: &str = "- ";

/// A single planned change, expressed in original line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    Insert { anchor: usize, lines: Vec<String> },
    AppendToLine { line: usize, suffix: String },
}

/// How an existing skills block lists its entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillsStyle {
    Bullets,
    CommaList,
}

impl SkillsStyle {
    /// Bullets if the block contains a hyphen or bullet character anywhere.
    pub fn detect(block_text: &str) -> Self {
        if block_text.contains('-') || block_text.contains('•') {
            SkillsStyle::Bullets
        } else {
            SkillsStyle::CommaList
        }
    }
}

/// Tailors `lines` for the given job and returns the finished, sanitized document.
pub fn splice<S: AsRef<str>>(
    lines: &[S],
    index: &SectionIndex,
    result: &MatchResult,
    job_title: &str,
    company: &str,
    aliases: &SectionAliases,
) -> Vec<String> {
    let edits = plan_edits(lines, index, result, job_title, company, aliases);
    let spliced = apply_edits(lines, &edits);
    spliced
        .iter()
        .map(|line| sanitize_text(line))
        .collect()
}

/// Computes every edit against the original numbering without touching the document.
pub fn plan_edits<S: AsRef<str>>(
    lines: &[S],
    index: &SectionIndex,
    result: &MatchResult,
    job_title: &str,
    company: &str,
    aliases: &SectionAliases,
) -> Vec<Edit> {
    let mut edits = Vec::with_capacity(3);

    if let Some(edit) = plan_skills(lines, index, result, aliases) {
        edits.push(edit);
    }

    let experience_anchor = index
        .experience_line
        .or(index.summary_line)
        .unwrap_or_else(|| slot_anchor(EXPERIENCE_SLOT, &edits, lines.len()));
    edits.push(Edit::Insert {
        anchor: experience_anchor,
        lines: vec![experience_sentence(result, job_title, company)],
    });

    let summary_anchor = match (index.summary_line, index.skills_line) {
        // Experience sentence further down: keep the first summary line on top.
        (Some(summary), _) => match index.experience_line {
            Some(_) if experience_anchor > summary => summary + 1,
            _ => summary,
        },
        (None, Some(skills)) => skills + 1,
        (None, None) => slot_anchor(SUMMARY_SLOT, &edits, lines.len()),
    };
    edits.push(Edit::Insert {
        anchor: summary_anchor,
        lines: vec![summary_sentence(result)],
    });

    edits
}

/// Anchor that puts a new insert at output position `slot`, given the edits already
/// planned. Each earlier `Insert` counts as one position however many lines it holds.
/// Clamped to `len`.
pub fn slot_anchor(slot: usize, planned: &[Edit], len: usize) -> usize {
    let mut anchors: Vec<usize> = planned
        .iter()
        .filter_map(|edit| match edit {
            Edit::Insert { anchor, .. } => Some((*anchor).min(len)),
            Edit::AppendToLine { .. } => None,
        })
        .collect();
    anchors.sort_unstable();

    let mut taken = 0;
    let mut pending = anchors.into_iter().peekable();
    for line in 0..len {
        while pending.next_if(|anchor| *anchor == line).is_some() {
            taken += 1;
        }
        if taken >= slot {
            return line;
        }
        taken += 1;
    }
    len
}

/// Applies a batch of planned edits and returns the new line sequence.
pub fn apply_edits<S: AsRef<str>>(lines: &[S], edits: &[Edit]) -> Vec<String> {
    let mut base: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
    let len = base.len();

    let mut inserts: Vec<(usize, &[String])> = Vec::new();
    for edit in edits {
        match edit {
            Edit::AppendToLine { line, suffix } => {
                if let Some(target) = base.get_mut(*line) {
                    target.push_str(suffix);
                }
            }
            Edit::Insert {
                anchor,
                lines: new_lines,
            } => inserts.push(((*anchor).min(len), new_lines.as_slice())),
        }
    }
    // Stable: equal anchors keep plan order.
    inserts.sort_by_key(|(anchor, _)| *anchor);

    let inserted: usize = inserts.iter().map(|(_, l)| l.len()).sum();
    let mut out = Vec::with_capacity(len + inserted);
    let mut pending = inserts.into_iter().peekable();

    for (i, line) in base.into_iter().enumerate() {
        while let Some((_, new_lines)) = pending.next_if(|(anchor, _)| *anchor == i) {
            out.extend(new_lines.iter().cloned());
        }
        out.push(line);
    }
    for (_, new_lines) in pending {
        out.extend(new_lines.iter().cloned());
    }

    out
}

/// `Experience: Applied {experience} to projects aligned with {title} at {company}`
pub fn experience_sentence(result: &MatchResult, job_title: &str, company: &str) -> String {
    format!(
        "Experience: Applied {} to projects aligned with {job_title} at {company}",
        result.experience
    )
}

/// `Summary: {emphasis}`
pub fn summary_sentence(result: &MatchResult) -> String {
    format!("Summary: {}", result.emphasis)
}

/// End of the skills block starting at `start`: the first blank or header line,
/// or the document length.
pub fn skills_block_end<S: AsRef<str>>(
    lines: &[S],
    start: usize,
    aliases: &SectionAliases,
) -> usize {
    lines
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, line)| {
            let line: &str = line.as_ref();
            line.trim().is_empty() || aliases.matches_any(line)
        })
        .map(|(i, _)| i)
        .unwrap_or(lines.len())
}

fn plan_skills<S: AsRef<str>>(
    lines: &[S],
    index: &SectionIndex,
    result: &MatchResult,
    aliases: &SectionAliases,
) -> Option<Edit> {
    let Some(start) = index.skills_line else {
        debug!("no skills section found, adding skills below the header lines");
        // Planned even when empty: it still holds its slot for the sentences below.
        return Some(Edit::Insert {
            anchor: slot_anchor(SKILLS_SLOT, &[], lines.len()),
            lines: result.skills.iter().map(|s| bullet(s)).collect(),
        });
    };

    let start = start.min(lines.len());
    let end = skills_block_end(lines, start, aliases);
    let existing = lines[start..end]
        .iter()
        .map(|l| l.as_ref())
        .collect::<Vec<&str>>()
        .join("\n");
    let existing_lower = existing.to_lowercase();

    let new_skills: Vec<&str> = result
        .skills
        .iter()
        .filter(|skill| !existing_lower.contains(skill.to_lowercase().as_str()))
        .map(String::as_str)
        .collect();

    if new_skills.is_empty() {
        debug!("no new skills to add to skills section");
        return None;
    }
    debug!(end, new_skills = ?new_skills, "appending new skills to skills section");

    match SkillsStyle::detect(&existing) {
        SkillsStyle::Bullets => Some(Edit::Insert {
            anchor: end,
            lines: new_skills.iter().map(|s| bullet(s)).collect(),
        }),
        SkillsStyle::CommaList => Some(Edit::AppendToLine {
            // `end >= start >= 1`: the header line itself when the block is empty.
            line: end.saturating_sub(1),
            suffix: format!(", {}", new_skills.join(", ")),
        }),
    }
}

fn bullet(skill: &str) -> String {
    format!("{BULLET_PREFIX}{skill}")
}
