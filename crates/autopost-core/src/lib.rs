//! # Autopost Core
//!
//! The domain layer of autopost.
//! Holds the block-markup render engine, the submission pipeline and the
//! ports every adapter implements. Nothing in here talks to the network or
//! a database.

pub mod domain;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod render;

pub use error::{DomainError, RenderError, RepoError};
pub use pipeline::{OutcomeStatus, PipelineSettings, SubmissionOutcome, SubmissionPipeline};
pub use render::{RenderedPost, render_post};
