//! Block-markup rendering.
//!
//! A submission is merged into a template in three steps: the template is
//! canonicalized to `@slot@` placeholders ([`grammar`]), every slot value is
//! formatted ([`fields`]), and the values are substituted in a single pass.
//! Images aligned to `bottom` are appended after the whole document.

mod engine;
pub mod fields;
pub mod grammar;
pub mod images;
mod slots;

pub use engine::{RenderedPost, fallback_document, render_post};
pub use images::normalize_content_images;
pub use slots::{POSITIONAL_IMAGE_SLOTS, Slot, SlotValues};
