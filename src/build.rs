mod builder;
mod catalog;
mod highlight;
mod markdown;
mod mathjax;
mod metadata;
mod post;
mod template;

pub use builder::{BuildResult, Builder};
