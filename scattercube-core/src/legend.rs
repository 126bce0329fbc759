//! Legend panel content

use crate::color::{CategoryColorMap, Color};
use crate::error::{Error, Result};
use crate::point::Category;
use serde::{Deserialize, Serialize};

/// Screen corner a legend panel is aligned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    LeftTop,
    #[default]
    RightTop,
    LeftBottom,
    RightBottom,
}

/// One colored label line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
}

/// Static legend handed to the host's panel widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: String,
    pub anchor: Anchor,
    /// Panel position in normalized screen coordinates
    pub position: [f32; 2],
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Pair each category name with its color, in category order
    pub fn from_categories(
        title: impl Into<String>,
        category_names: &[String],
        colors: &CategoryColorMap,
    ) -> Result<Self> {
        let entries = category_names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                colors
                    .get(Category(i))
                    .map(|color| LegendEntry {
                        label: name.clone(),
                        color,
                    })
                    .ok_or(Error::UnmappedCategory {
                        index: i,
                        category: Category(i),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            title: title.into(),
            anchor: Anchor::default(),
            position: [0.8, 0.9],
            entries,
        })
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_position(mut self, position: [f32; 2]) -> Self {
        self.position = position;
        self
    }
}
