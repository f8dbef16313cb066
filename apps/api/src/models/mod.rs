pub mod document;
pub mod job;
