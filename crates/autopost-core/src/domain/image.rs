use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Alignment;

/// Stock photo provider used to illustrate a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    #[default]
    Pexels,
    Unsplash,
}

impl ImageSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageSource::Pexels => "pexels",
            ImageSource::Unsplash => "unsplash",
        }
    }

    /// Human-facing name, used in generated alt text.
    pub fn label(self) -> &'static str {
        match self {
            ImageSource::Pexels => "Pexels",
            ImageSource::Unsplash => "Unsplash",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSource {
    type Err = crate::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pexels" => Ok(ImageSource::Pexels),
            "unsplash" => Ok(ImageSource::Unsplash),
            other => Err(crate::DomainError::Validation(format!(
                "Unknown image source: {other}"
            ))),
        }
    }
}

/// An image returned by a stock photo search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

impl ImageCandidate {
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn meets(&self, min_width: u32, min_height: u32) -> bool {
        self.width >= min_width && self.height >= min_height
    }
}

/// The lead image of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedImage {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl FeaturedImage {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }
}

impl From<ImageCandidate> for FeaturedImage {
    fn from(candidate: ImageCandidate) -> Self {
        Self {
            url: candidate.url,
            width: Some(candidate.width),
            height: Some(candidate.height),
        }
    }
}

/// An image placed in the body of a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentImage {
    pub url: String,
    pub alignment: Alignment,
}

impl ContentImage {
    pub fn new(url: impl Into<String>, alignment: Alignment) -> Self {
        Self {
            url: url.into(),
            alignment,
        }
    }
}

/// Parameters of a stock photo search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub keywords: String,
    pub source: ImageSource,
    pub count: usize,
    pub min_width: u32,
    pub min_height: u32,
}

/// Pick `count` images out of a search result.
///
/// Candidates meeting the minimum size come first, in upstream order. If
/// too few qualify, the rest is padded with the largest remaining candidates
/// by area.
pub fn select_images(
    candidates: Vec<ImageCandidate>,
    count: usize,
    min_width: u32,
    min_height: u32,
) -> Vec<ImageCandidate> {
    let (mut selected, mut rest): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|c| c.meets(min_width, min_height));

    selected.truncate(count);
    if selected.len() < count {
        rest.sort_by(|a, b| b.area().cmp(&a.area()));
        let missing = count - selected.len();
        selected.extend(rest.into_iter().take(missing));
    }

    selected
}
