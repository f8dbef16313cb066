use serde::{Deserialize, Serialize};

/// Placeholder for any job field the source page did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Job posting data as returned by a `JobSource`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub description: String,
}

impl JobPosting {
    /// Builds a posting, replacing missing or blank fields with `"N/A"`.
    pub fn from_parts(
        title: Option<String>,
        company: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            title: or_not_available(title),
            company: or_not_available(company),
            description: or_not_available(description),
        }
    }
}

fn or_not_available(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
