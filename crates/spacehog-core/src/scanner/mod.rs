pub mod sample;
pub mod walk;

pub use sample::sample;
pub use walk::{compile_ignore_patterns, walk, WalkStatus};
