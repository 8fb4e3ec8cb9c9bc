// src/core/mod.rs

pub mod json;
pub mod locate;
pub mod normalize;
pub mod sanitize;

pub use json::{parse, ParsedTree};
pub use locate::{locate, Span};
