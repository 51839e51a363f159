pub mod machine;
pub mod processing;
pub mod step;
