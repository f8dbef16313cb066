//! Matcher: compares job signals against resume signals and writes the emphasis narrative.

use serde::{Deserialize, Serialize};

use crate::tailoring::signals::{ExtractedSignals, SkillSet};

/// Number of job skills missing from the resume that are still surfaced.
const GAP_SKILL_LIMIT: usize = 2;
/// Number of matched skills quoted in the emphasis sentence.
const EMPHASIS_SKILL_LIMIT: usize = 3;

/// Outcome of matching one resume against one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Matched skills first, then up to two job skills the resume lacks.
    pub skills: SkillSet,
    /// The candidate's own experience phrase.
    pub experience: String,
    pub emphasis: String,
}

/// Matches resume signals against job signals.
pub fn match_signals(job: &ExtractedSignals, resume: &ExtractedSignals) -> MatchResult {
    let matched = matched_skills(job, resume);
    let gaps = gap_skills(job, resume);

    let mut skills = SkillSet::default();
    for label in matched.iter().chain(gaps.iter()) {
        skills.push(label.clone());
    }

    let experience = resume.experience_phrase.clone();
    let emphasis = build_emphasis(&experience, &matched);

    MatchResult {
        skills,
        experience,
        emphasis,
    }
}

/// Resume skills that the job also asks for, in resume (taxonomy) order.
pub fn matched_skills(job: &ExtractedSignals, resume: &ExtractedSignals) -> SkillSet {
    resume
        .skills
        .iter()
        .filter(|label| job.skills.contains(label))
        .cloned()
        .collect()
}

/// First job skills absent from the resume.
pub fn gap_skills(job: &ExtractedSignals, resume: &ExtractedSignals) -> SkillSet {
    job.skills
        .iter()
        .filter(|label| !resume.skills.contains(label))
        .take(GAP_SKILL_LIMIT)
        .cloned()
        .collect()
}

fn build_emphasis(experience: &str, matched: &SkillSet) -> String {
    if matched.is_empty() {
        return format!("Adapt {experience} to highlight transferable skills for the role");
    }
    let top: Vec<&str> = matched
        .iter()
        .take(EMPHASIS_SKILL_LIMIT)
        .map(String::as_str)
        .collect();
    format!(
        "Leverage {experience} with strong skills in {} to meet job demands",
        top.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tailoring::signals::FALLBACK_EXPERIENCE;

    fn signals(skills: &[&str], experience: &str) -> ExtractedSignals {
        ExtractedSignals {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_phrase: experience.to_string(),
        }
    }

    fn names(set: &SkillSet) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_matched_then_gap_skills() {
        let job = signals(&["Python", "SQL"], "5+ years experience");
        let resume = signals(&["Python"], "3 years of experience");

        let result = match_signals(&job, &resume);
        assert_eq!(names(&result.skills), vec!["Python", "SQL"]);
        assert_eq!(result.experience, "3 years of experience");
        assert_eq!(
            result.emphasis,
            "Leverage 3 years of experience with strong skills in Python to meet job demands"
        );
    }

    #[test]
    fn test_gap_skills_limited_to_two_in_job_order() {
        let job = signals(&["JavaScript", "React", "SQL", "AWS"], FALLBACK_EXPERIENCE);
        let resume = signals(&["Python"], FALLBACK_EXPERIENCE);

        let result = match_signals(&job, &resume);
        assert_eq!(names(&result.skills), vec!["JavaScript", "React"]);
        assert_eq!(
            result.emphasis,
            "Adapt relevant experience to highlight transferable skills for the role"
        );
    }

    #[test]
    fn test_emphasis_quotes_at_most_three_skills() {
        let all = ["JavaScript", "Python", "React", "Node"];
        let result = match_signals(&signals(&all, "x"), &signals(&all, "2 years experience"));
        assert!(result.emphasis.contains("JavaScript, Python, React to meet"));
        assert!(!result.emphasis.contains("Node"));
        assert_eq!(result.skills.len(), 4);
    }

    #[test]
    fn test_matched_detection_is_symmetric_as_sets() {
        let a = signals(&["Python", "SQL", "Docker"], "x");
        let b = signals(&["SQL", "Docker", "Git"], "y");

        let owned = |s: Vec<&str>| s.into_iter().map(String::from).collect::<Vec<_>>();
        let mut ab = owned(names(&matched_skills(&a, &b)));
        let mut ba = owned(names(&matched_skills(&b, &a)));
        ab.sort();
        ba.sort();
        assert_eq!(ab, ba);
    }

    #[test]
    fn test_case_insensitive_label_equality() {
        let job = signals(&["python"], "x");
        let resume = signals(&["Python"], "x");
        let result = match_signals(&job, &resume);
        assert_eq!(names(&result.skills), vec!["Python"]);
    }

    #[test]
    fn test_no_job_skills_yields_empty_skill_list() {
        let result = match_signals(&signals(&[], "x"), &signals(&["Git"], "x"));
        assert!(result.skills.is_empty());
        assert!(result.emphasis.starts_with("Adapt"));
    }
}
