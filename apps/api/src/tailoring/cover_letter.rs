use crate::models::job::JobPosting;
use crate::tailoring::matcher::MatchResult;
use crate::tailoring::sanitize::sanitize_text;

const COVER_LETTER_SKILLS: usize = 3;

/// Writes the cover letter for `job` from the match result. Output is sanitized.
pub fn write_cover_letter(job: &JobPosting, result: &MatchResult) -> String {
    let skills: Vec<&str> = result
        .skills
        .iter()
        .take(COVER_LETTER_SKILLS)
        .map(String::as_str)
        .collect();

    let letter = format!(
        "Dear Hiring Manager,\n\n\
         I am excited to apply for the {title} position at {company}. \
         With {experience}, my experience includes {skills}, \
         which directly supports the requirements of this role. {emphasis}, \
         and I am eager to apply these strengths to contribute to {company}'s success.\n\n\
         Attached is my resume, updated to showcase my qualifications aligned with this position. \
         Thank you for your consideration, and I look forward to discussing \
         how I can add value to your team.\n\n\
         Sincerely,\n[Your Name]",
        title = job.title,
        company = job.company,
        experience = result.experience,
        skills = skills.join(", "),
        emphasis = result.emphasis,
    );

    sanitize_text(&letter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tailoring::signals::SkillSet;

    #[test]
    fn test_cover_letter_interpolates_job_and_match() {
        let job = JobPosting {
            title: "Data Engineer".to_string(),
            company: "Acme\u{2122}".to_string(),
            description: String::new(),
        };
        let result = MatchResult {
            skills: ["Python", "SQL", "AWS", "Docker"]
                .iter()
                .map(|s| s.to_string())
                .collect::<SkillSet>(),
            experience: "5 years of experience".to_string(),
            emphasis: "Leverage 5 years of experience with strong skills in Python \
                       to meet job demands"
                .to_string(),
        };

        let letter = write_cover_letter(&job, &result);
        assert!(letter.starts_with("Dear Hiring Manager,\n\n"));
        assert!(letter.contains("the Data Engineer position at Acme."));
        assert!(letter.contains(
            "With 5 years of experience, my experience includes Python, SQL, AWS, which"
        ));
        assert!(letter.contains("to meet job demands, and I am eager"));
        assert!(letter.contains("contribute to Acme's success."));
        assert!(!letter.contains("Docker"));
        assert!(letter.ends_with("Sincerely,\n[Your Name]"));
    }
}
