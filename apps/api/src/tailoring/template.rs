//! Template Renderer: lays the matched signals out in a fixed five-section resume
//! instead of editing the original document.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::document::{Block, BlockStyle};
use crate::tailoring::matcher::MatchResult;
use crate::tailoring::sanitize::sanitize_text;

const DEFAULT_NAME: &str = "Your Name";
const DEFAULT_CONTACT: &str = "email@example.com | (123) 456-7890";
const EDUCATION_PLACEHOLDER: &str = "Relevant education details";

static EXPERIENCE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)experience|work experience|professional experience")
        .expect("valid experience heading pattern")
});
static EDUCATION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)education|degree").expect("valid education heading pattern"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeHeader {
    pub name: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceSection {
    pub headline: String,
    /// Everything after the original experience heading, verbatim.
    pub carried_over: Option<String>,
}

/// The reformatted resume: header, summary, skills, experience, education.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredDocument {
    pub header: ResumeHeader,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: ExperienceSection,
    pub education: String,
}

/// Builds the template document from the original resume lines and the match result.
pub fn render<S: AsRef<str>>(
    resume_lines: &[S],
    result: &MatchResult,
    job_title: &str,
    company: &str,
) -> StructuredDocument {
    let lines: Vec<&str> = resume_lines.iter().map(|l| l.as_ref()).collect();

    let name = lines
        .first()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .unwrap_or(DEFAULT_NAME)
        .to_string();

    let contact_parts: Vec<&str> = lines
        .iter()
        .skip(1)
        .take(2)
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    let contact = if contact_parts.is_empty() {
        DEFAULT_CONTACT.to_string()
    } else {
        contact_parts.join(" | ")
    };

    StructuredDocument {
        header: ResumeHeader { name, contact },
        summary: result.emphasis.clone(),
        skills: result.skills.iter().cloned().collect(),
        experience: ExperienceSection {
            headline: format!(
                "Applied {} to projects aligned with {job_title} at {company}",
                result.experience
            ),
            carried_over: text_after_first_match(&lines, &EXPERIENCE_HEADING),
        },
        education: text_after_first_match(&lines, &EDUCATION_HEADING)
            .unwrap_or_else(|| EDUCATION_PLACEHOLDER.to_string()),
    }
}

/// All lines after the first one matching `pattern`, joined by newlines.
fn text_after_first_match(lines: &[&str], pattern: &Regex) -> Option<String> {
    let heading = lines.iter().position(|l| pattern.is_match(l))?;
    Some(lines[heading + 1..].join("\n"))
}

impl StructuredDocument {
    /// Render blocks in template order. Text is sanitized for the PDF fonts.
    pub fn to_blocks(&self) -> Vec<Block> {
        let mut blocks = vec![
            Block::new(BlockStyle::Title, sanitize_text(&self.header.name)),
            Block::new(BlockStyle::Subtitle, sanitize_text(&self.header.contact)),
            Block::spacer(),
            Block::new(BlockStyle::Heading, "Professional Summary"),
            Block::new(BlockStyle::Indented, sanitize_text(&self.summary)),
            Block::spacer(),
            Block::new(BlockStyle::Heading, "Skills"),
        ];
        blocks.extend(
            self.skills
                .iter()
                .map(|s| Block::new(BlockStyle::Indented, sanitize_text(&format!("- {s}")))),
        );
        blocks.push(Block::spacer());

        blocks.push(Block::new(BlockStyle::Heading, "Experience"));
        blocks.push(Block::new(
            BlockStyle::Indented,
            sanitize_text(&self.experience.headline),
        ));
        if let Some(carried) = &self.experience.carried_over {
            blocks.push(Block::new(BlockStyle::Indented, sanitize_text(carried)));
        }
        blocks.push(Block::spacer());

        blocks.push(Block::new(BlockStyle::Heading, "Education"));
        blocks.push(Block::new(BlockStyle::Indented, sanitize_text(&self.education)));
        blocks
    }

    /// Plain-text view of the template, one section after another.
    pub fn to_text(&self) -> String {
        self.to_blocks()
            .into_iter()
            .map(|b| b.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
