// Resume tailoring core.
// Implements: signal extraction, matching, section location, splicing, template layout and
// the cover letter.
// Core modules are pure and never fail; only `pipeline` talks to collaborators.

pub mod cover_letter;
pub mod handlers;
pub mod matcher;
pub mod pipeline;
pub mod sanitize;
pub mod sections;
pub mod signals;
pub mod splicer;
pub mod taxonomy;
pub mod template;
