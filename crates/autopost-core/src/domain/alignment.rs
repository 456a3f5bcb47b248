use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Image alignment as understood by the WordPress block editor.
///
/// `Bottom` is not a CSS alignment: it moves a content image to the end of
/// the document and renders it centered there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
    Wide,
    Full,
    Bottom,
}

impl Alignment {
    pub const ALL: [Alignment; 7] = [
        Alignment::None,
        Alignment::Left,
        Alignment::Center,
        Alignment::Right,
        Alignment::Wide,
        Alignment::Full,
        Alignment::Bottom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Alignment::None => "none",
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Wide => "wide",
            Alignment::Full => "full",
            Alignment::Bottom => "bottom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Alignment::None => "No alignment",
            Alignment::Left => "Align left",
            Alignment::Center => "Align center",
            Alignment::Right => "Align right",
            Alignment::Wide => "Wide width",
            Alignment::Full => "Full width",
            Alignment::Bottom => "End of post",
        }
    }

    pub fn is_bottom(self) -> bool {
        self == Alignment::Bottom
    }

    /// Value of the `align` attribute in the block annotation JSON.
    pub fn block_align(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Bottom => Some("center"),
            other => Some(other.as_str()),
        }
    }

    /// CSS class the block editor emits on the figure for this alignment.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("alignleft"),
            Alignment::Center | Alignment::Bottom => Some("aligncenter"),
            Alignment::Right => Some("alignright"),
            Alignment::Wide => Some("alignwide"),
            Alignment::Full => Some("alignfull"),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown alignment: {0}")]
pub struct ParseAlignmentError(pub String);

impl FromStr for Alignment {
    type Err = ParseAlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Ok(Alignment::None);
        }
        Alignment::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| ParseAlignmentError(s.to_string()))
    }
}
