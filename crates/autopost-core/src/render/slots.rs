use std::collections::HashMap;

/// Number of `content_image_N` slots a template may reference.
pub const POSITIONAL_IMAGE_SLOTS: usize = 3;

/// The closed set of placeholder names a template can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Title,
    Content,
    Tags,
    FeaturedImage,
    ContentImages,
    ImageAlignment,
    ContentImageAlignment,
    Date,
    ContentImage1,
    ContentImage2,
    ContentImage3,
}

impl Slot {
    pub const ALL: [Slot; 11] = [
        Slot::Title,
        Slot::Content,
        Slot::Tags,
        Slot::FeaturedImage,
        Slot::ContentImages,
        Slot::ImageAlignment,
        Slot::ContentImageAlignment,
        Slot::Date,
        Slot::ContentImage1,
        Slot::ContentImage2,
        Slot::ContentImage3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Title => "title",
            Slot::Content => "content",
            Slot::Tags => "tags",
            Slot::FeaturedImage => "featured_image",
            Slot::ContentImages => "content_images",
            Slot::ImageAlignment => "image_alignment",
            Slot::ContentImageAlignment => "content_image_alignment",
            Slot::Date => "date",
            Slot::ContentImage1 => "content_image_1",
            Slot::ContentImage2 => "content_image_2",
            Slot::ContentImage3 => "content_image_3",
        }
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }

    /// Slot for the `n`th inline image, 1-based.
    pub fn positional(n: usize) -> Option<Slot> {
        match n {
            1 => Some(Slot::ContentImage1),
            2 => Some(Slot::ContentImage2),
            3 => Some(Slot::ContentImage3),
            _ => None,
        }
    }
}

/// Rendered value for each slot of one submission.
#[derive(Debug, Clone, Default)]
pub struct SlotValues {
    values: HashMap<Slot, String>,
}

impl SlotValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        self.values.insert(slot, value.into());
    }

    pub fn get(&self, slot: Slot) -> Option<&str> {
        self.values.get(&slot).map(String::as_str)
    }

    /// Resolve a placeholder name. Unknown names and unset slots give `None`.
    pub fn lookup(&self, name: &str) -> Option<&str> {
        Slot::from_name(name).and_then(|slot| self.get(slot))
    }
}
