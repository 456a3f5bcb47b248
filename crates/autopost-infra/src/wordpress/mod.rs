//! Publishing to WordPress.

mod client;

pub use client::{PublishError, WordPressConfig, WordPressPublisher};
