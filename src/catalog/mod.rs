pub mod movies;
pub mod questions;
pub mod recommendations;
