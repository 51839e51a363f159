pub mod report;
pub mod synthesizer;
