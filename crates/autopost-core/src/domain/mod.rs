//! Domain entities - the core business objects.

mod alignment;
mod history;
mod image;
mod submission;
mod template;

pub use alignment::{Alignment, ParseAlignmentError};
pub use history::{HistoryRecord, NewHistoryEntry, PostStats, STATUS_PUBLISHED};
pub use image::{
    ContentImage, FeaturedImage, ImageCandidate, ImageQuery, ImageSource, select_images,
};
pub use submission::{ContentSubmission, split_tags};
pub use template::{DEFAULT_TEMPLATE_MARKUP, DEFAULT_TEMPLATE_NAME, Template, TemplateMap};
