//! Named color ranges

use colorbar_common::color::parse_color;
use colorbar_common::types::Color;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::error::ColorbarScaleError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Scheme {
    #[strum(serialize = "category10")]
    #[serde(rename = "category10")]
    Category10,
    Viridis,
    Blues,
    #[strum(serialize = "rdylbu")]
    #[serde(rename = "rdylbu")]
    RdYlBu,
}

impl Scheme {
    /// Whether the scheme is meant for categorical data
    pub fn is_categorical(&self) -> bool {
        matches!(self, Scheme::Category10)
    }

    fn hex_colors(&self) -> &'static [&'static str] {
        match self {
            Scheme::Category10 => &[
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ],
            Scheme::Viridis => &[
                "#440154", "#472d7b", "#3b528b", "#2c728e", "#21918c", "#28ae80", "#5ec962",
                "#addc30", "#fde725",
            ],
            Scheme::Blues => &[
                "#f7fbff", "#deebf7", "#c6dbef", "#9ecae1", "#6baed6", "#4292c6", "#2171b5",
                "#08519c", "#08306b",
            ],
            Scheme::RdYlBu => &[
                "#a50026", "#d73027", "#f46d43", "#fdae61", "#fee090", "#ffffbf", "#e0f3f8",
                "#abd9e9", "#74add1", "#4575b4", "#313695",
            ],
        }
    }

    pub fn colors(&self) -> Result<Vec<Color>, ColorbarScaleError> {
        Ok(self
            .hex_colors()
            .iter()
            .map(|c| parse_color(c))
            .collect::<Result<Vec<_>, _>>()?)
    }

    pub fn names() -> Vec<String> {
        Scheme::iter().map(|s| s.to_string()).collect()
    }
}

/// Looks up a scheme by name
pub fn scheme(name: &str) -> Result<Vec<Color>, ColorbarScaleError> {
    let scheme: Scheme = name
        .parse()
        .map_err(|_| ColorbarScaleError::UnknownScheme(name.to_string()))?;
    scheme.colors()
}
