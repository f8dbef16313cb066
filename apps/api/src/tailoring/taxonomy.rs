//! Static lookup tables for the tailoring core: the recognised skill labels and the
//! header aliases used to find Skills / Experience / Summary sections in a resume.
//!
//! Both are plain data. Extending the taxonomy never changes extraction logic.

use serde::{Deserialize, Serialize};

/// Built-in skill labels. Order here is the order every `SkillSet` is reported in.
pub const DEFAULT_SKILLS: &[&str] = &[
    "JavaScript",
    "Python",
    "React",
    "Node",
    "SQL",
    "Java",
    "TypeScript",
    "AWS",
    "Docker",
    "Git",
    "HTML",
    "CSS",
    "Angular",
    "Vue",
    "MongoDB",
    "Postgres",
    "Linux",
    "DevOps",
    "Agile",
    "Communication",
    "Teamwork",
    "Leadership",
    "Problem-Solving",
    "Project Management",
    "Analysis",
    "Adobe Creative Suite",
    "Photoshop",
    "Illustrator",
];

pub const SKILLS_HEADERS: &[&str] = &[
    "skills",
    "technical skills",
    "key skills",
    "core competencies",
    "skill set",
    "SKILLS",
    "Skills:",
    "Technical Skills:",
    "skill summary",
];

pub const EXPERIENCE_HEADERS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment history",
    "EXPERIENCE",
    "Experience:",
];

pub const SUMMARY_HEADERS: &[&str] = &[
    "summary",
    "professional summary",
    "objective",
    "profile",
    "SUMMARY",
    "Summary:",
];

/// The fixed vocabulary of recognised skills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillTaxonomy {
    labels: Vec<String>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::from_labels(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillTaxonomy {
    /// Builds a taxonomy from arbitrary labels. Blank labels and case-insensitive
    /// duplicates are dropped; the first spelling wins.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut taxonomy = Self { labels: Vec::new() };
        taxonomy.extend(labels);
        taxonomy
    }

    /// Appends labels after the existing ones (used for `EXTRA_SKILLS`).
    pub fn extend<I, S>(&mut self, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for label in labels {
            let label = label.as_ref().trim();
            if label.is_empty() || self.contains(label) {
                continue;
            }
            self.labels.push(label.to_string());
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l.eq_ignore_ascii_case(label))
    }
}

/// The three kinds of section header the locator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Skills,
    Experience,
    Summary,
}

/// Header alias lists per section kind. Matching is case-insensitive substring.
#[derive(Debug, Clone)]
pub struct SectionAliases {
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub summary: Vec<String>,
}

impl Default for SectionAliases {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_lowercase()).collect();
        Self {
            skills: owned(SKILLS_HEADERS),
            experience: owned(EXPERIENCE_HEADERS),
            summary: owned(SUMMARY_HEADERS),
        }
    }
}

impl SectionAliases {
    pub fn for_kind(&self, kind: SectionKind) -> &[String] {
        match kind {
            SectionKind::Skills => &self.skills,
            SectionKind::Experience => &self.experience,
            SectionKind::Summary => &self.summary,
        }
    }

    /// True if `line` contains an alias of `kind`.
    pub fn matches(&self, kind: SectionKind, line: &str) -> bool {
        let line = line.trim().to_lowercase();
        self.for_kind(kind)
            .iter()
            .any(|alias| line.contains(alias.to_lowercase().as_str()))
    }

    /// True if `line` contains an alias of any kind.
    pub fn matches_any(&self, line: &str) -> bool {
        [SectionKind::Skills, SectionKind::Experience, SectionKind::Summary]
            .into_iter()
            .any(|kind| self.matches(kind, line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_taxonomy_keeps_table_order() {
        let taxonomy = SkillTaxonomy::default();
        assert_eq!(taxonomy.labels().len(), DEFAULT_SKILLS.len());
        assert_eq!(taxonomy.labels()[0], "JavaScript");
        assert_eq!(taxonomy.labels().last().unwrap(), "Illustrator");
    }

    #[test]
    fn test_extend_skips_case_insensitive_duplicates() {
        let mut taxonomy = SkillTaxonomy::default();
        taxonomy.extend(["python", " Rust ", "", "Kubernetes", "rust"]);
        assert_eq!(taxonomy.labels().len(), DEFAULT_SKILLS.len() + 2);
        assert_eq!(taxonomy.labels()[DEFAULT_SKILLS.len()], "Rust");
        assert!(taxonomy.contains("KUBERNETES"));
    }

    #[test]
    fn test_aliases_match_case_insensitive_substring() {
        let aliases = SectionAliases::default();
        assert!(aliases.matches(SectionKind::Skills, "  TECHNICAL SKILLS  "));
        assert!(aliases.matches(SectionKind::Experience, "Professional Experience"));
        assert!(aliases.matches(SectionKind::Summary, "Career Objective"));
        assert!(!aliases.matches(SectionKind::Summary, "Education"));
    }

    #[test]
    fn test_skill_summary_line_matches_two_kinds() {
        let aliases = SectionAliases::default();
        assert!(aliases.matches(SectionKind::Skills, "Skill Summary"));
        assert!(aliases.matches(SectionKind::Summary, "Skill Summary"));
    }

    #[test]
    fn test_matches_any_rejects_plain_content() {
        let aliases = SectionAliases::default();
        assert!(!aliases.matches_any("- Python"));
        assert!(aliases.matches_any("EXPERIENCE"));
    }
}
