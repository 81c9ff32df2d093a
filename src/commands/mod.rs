pub mod bench;
pub mod completions;
pub mod report;
pub mod write;
