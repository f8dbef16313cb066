//! Job posting fetcher: downloads a public job page and pulls title, company and
//! description out of its HTML.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::job::JobPosting;

/// CSS class of the company link on a public job page.
pub const COMPANY_CLASS: &str = "topcard__org-name-link";
/// CSS class of the description container on a public job page.
pub const DESCRIPTION_CLASS: &str = "description__text";

static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b([^>]*?)(/?)>").expect("valid tag pattern")
});
static CLASS_ATTR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bclass\s*=\s*["']([^"']*)["']"#).expect("valid class pattern")
});
static LINE_BREAK_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|ul|ol|section|h[1-6])\s*>|<li\b[^>]*>")
        .expect("valid line break pattern")
});
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid any-tag pattern"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("valid entity pattern")
});

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("job page returned status {0}")]
    Status(u16),
}

/// Fetches a job posting by URL.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<JobPosting, FetchError>;
}

/// Plain HTTP fetch of a server-rendered job page.
#[derive(Clone)]
pub struct HttpJobSource {
    client: Client,
}

impl HttpJobSource {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl JobSource for HttpJobSource {
    async fn fetch(&self, url: &str) -> Result<JobPosting, FetchError> {
        info!("Fetching job page: {url}");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let html = response.text().await?;
        debug!("Job page fetched: {} bytes", html.len());

        let posting = parse_job_page(&html);
        info!(
            "Scraped job: title={:?} company={:?} description_len={}",
            posting.title,
            posting.company,
            posting.description.len()
        );
        Ok(posting)
    }
}

/// Extracts the posting fields from raw HTML. Anything missing becomes `"N/A"`.
pub fn parse_job_page(html: &str) -> JobPosting {
    let title = element_inner_html(html, |name, _| name.eq_ignore_ascii_case("h1"));
    let company = element_inner_html(html, |_, attrs| has_class(attrs, COMPANY_CLASS));
    let description = element_inner_html(html, |_, attrs| has_class(attrs, DESCRIPTION_CLASS));

    JobPosting::from_parts(
        title.map(|h| html_to_text(&h)),
        company.map(|h| html_to_text(&h)),
        description.map(|h| html_to_text(&h)),
    )
}

/// Inner HTML of the first element whose opening tag satisfies `wanted(name, attrs)`.
/// Nested elements of the same name are balanced; an unclosed element runs to the end.
fn element_inner_html<F>(html: &str, wanted: F) -> Option<String>
where
    F: Fn(&str, &str) -> bool,
{
    let mut tags = TAG.captures_iter(html);

    let (name, inner_start) = loop {
        let caps = tags.next()?;
        let is_closing = !caps[1].is_empty();
        if !is_closing && wanted(&caps[2], &caps[3]) {
            let name = caps[2].to_lowercase();
            if !caps[4].is_empty() || VOID_TAGS.contains(&name.as_str()) {
                return Some(String::new());
            }
            let end = caps.get(0).map(|m| m.end()).unwrap_or(html.len());
            break (name, end);
        }
    };

    let mut depth = 1usize;
    for caps in tags {
        if !caps[2].eq_ignore_ascii_case(&name) {
            continue;
        }
        if !caps[1].is_empty() {
            depth -= 1;
            if depth == 0 {
                let start = caps.get(0).map(|m| m.start()).unwrap_or(html.len());
                return Some(html[inner_start..start].to_string());
            }
        } else if caps[4].is_empty() {
            depth += 1;
        }
    }

    Some(html[inner_start..].to_string())
}

fn has_class(attrs: &str, class: &str) -> bool {
    CLASS_ATTR
        .captures(attrs)
        .map(|caps| caps[1].split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

/// Converts an HTML fragment to text: block boundaries become newlines, tags are
/// dropped, entities decoded, lines trimmed and blank lines removed.
pub fn html_to_text(fragment: &str) -> String {
    let with_breaks = LINE_BREAK_TAG.replace_all(fragment, "\n");
    let stripped = ANY_TAG.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);

    let lines: Vec<&str> = decoded
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    lines.join("\n")
}

fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures| {
            let entity = &caps[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
