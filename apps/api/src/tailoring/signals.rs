//! Signal Extractor: pulls recognised skills and an experience-duration phrase out of free text.
//!
//! Used identically on the job description and on the resume. Pure: no I/O, no state.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::tailoring::taxonomy::SkillTaxonomy;

/// Used when the text never states a duration of experience.
pub const FALLBACK_EXPERIENCE: &str = "relevant experience";

static EXPERIENCE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\d+\+?\s*years?\s*(?:of)?\s*experience").expect("valid experience pattern")
});

/// Ordered, case-insensitively distinct skill labels. Order is taxonomy order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(Vec<String>);

impl SkillSet {
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|s| s.eq_ignore_ascii_case(label))
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Appends `label` unless an equal label (ignoring case) is already present.
    pub fn push(&mut self, label: impl Into<String>) {
        let label = label.into();
        if !self.contains(&label) {
            self.0.push(label);
        }
    }
}

impl FromIterator<String> for SkillSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut set = SkillSet::default();
        for label in iter {
            set.push(label);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SkillSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Skills and stated experience extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSignals {
    pub skills: SkillSet,
    pub experience_phrase: String,
}

/// Extracts signals from `text` against `taxonomy`.
pub fn extract(text: &str, taxonomy: &SkillTaxonomy) -> ExtractedSignals {
    let tokens = tokenize(text);

    let skills = taxonomy
        .labels()
        .iter()
        .filter(|label| contains_phrase(&tokens, &tokenize(label)))
        .cloned()
        .collect();

    ExtractedSignals {
        skills,
        experience_phrase: find_experience_phrase(text),
    }
}

/// Lowercase word tokens; every run of non-alphanumeric characters (except `_`) is a boundary.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// First verbatim match of the experience-duration pattern, or the fallback literal.
pub fn find_experience_phrase(text: &str) -> String {
    EXPERIENCE_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_EXPERIENCE.to_string())
}

/// True if `phrase` occurs as a contiguous run inside `tokens`.
fn contains_phrase(tokens: &[String], phrase: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens.windows(phrase.len()).any(|window| window == phrase)
}
