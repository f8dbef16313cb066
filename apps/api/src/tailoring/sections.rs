//! Section Locator: finds Skills / Experience / Summary headers in a line-oriented resume.
//!
//! Each recorded position is the index of the line immediately *after* the header.
//! The first header of each kind wins; kinds are tracked independently, so one line
//! may open more than one kind (e.g. "Skill Summary").

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tailoring::taxonomy::{SectionAliases, SectionKind};

/// Positions of the first header of each kind, as `header_index + 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionIndex {
    pub skills_line: Option<usize>,
    pub experience_line: Option<usize>,
    pub summary_line: Option<usize>,
}

impl SectionIndex {
    pub fn get(&self, kind: SectionKind) -> Option<usize> {
        match kind {
            SectionKind::Skills => self.skills_line,
            SectionKind::Experience => self.experience_line,
            SectionKind::Summary => self.summary_line,
        }
    }

    fn slot(&mut self, kind: SectionKind) -> &mut Option<usize> {
        match kind {
            SectionKind::Skills => &mut self.skills_line,
            SectionKind::Experience => &mut self.experience_line,
            SectionKind::Summary => &mut self.summary_line,
        }
    }
}

/// Scans `lines` once, top to bottom. Never mutates the document.
pub fn locate<S: AsRef<str>>(lines: &[S], aliases: &SectionAliases) -> SectionIndex {
    let mut index = SectionIndex::default();

    for (i, line) in lines.iter().enumerate() {
        let line: &str = line.as_ref();
        for kind in [SectionKind::Skills, SectionKind::Experience, SectionKind::Summary] {
            let slot = index.slot(kind);
            if slot.is_none() && aliases.matches(kind, line) {
                *slot = Some(i + 1);
                debug!(section = ?kind, line = i, header = line, "found section header");
            }
        }
    }

    index
}
