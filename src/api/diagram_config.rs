use serde::{Deserialize, Serialize};

use crate::core::DiagramGeometry;
use crate::error::{DiagramError, DiagramResult};

/// Public diagram bootstrap configuration.
///
/// Serializable so hosts can keep the canvas setup next to their own
/// settings. Missing fields take the standard survey canvas values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramConfig {
    #[serde(default = "default_km_stones_ui_distance")]
    pub km_stones_ui_distance: f64,
    #[serde(default = "default_stone_margin_px")]
    pub stone_margin_px: f64,
    #[serde(default = "default_top_offset_descending_px")]
    pub top_offset_descending_px: f64,
    #[serde(default = "default_top_offset_ascending_px")]
    pub top_offset_ascending_px: f64,
    /// Icons can only be dropped in upload mode.
    #[serde(default)]
    pub enable_drag: bool,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            km_stones_ui_distance: default_km_stones_ui_distance(),
            stone_margin_px: default_stone_margin_px(),
            top_offset_descending_px: default_top_offset_descending_px(),
            top_offset_ascending_px: default_top_offset_ascending_px(),
            enable_drag: false,
        }
    }
}

impl DiagramConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_drag_enabled(mut self, enable_drag: bool) -> Self {
        self.enable_drag = enable_drag;
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: DiagramGeometry) -> Self {
        self.km_stones_ui_distance = geometry.km_stones_ui_distance;
        self.stone_margin_px = geometry.stone_margin_px;
        self.top_offset_descending_px = geometry.top_offset_descending_px;
        self.top_offset_ascending_px = geometry.top_offset_ascending_px;
        self
    }

    #[must_use]
    pub fn geometry(&self) -> DiagramGeometry {
        DiagramGeometry {
            km_stones_ui_distance: self.km_stones_ui_distance,
            stone_margin_px: self.stone_margin_px,
            top_offset_descending_px: self.top_offset_descending_px,
            top_offset_ascending_px: self.top_offset_ascending_px,
        }
    }

    pub fn from_json_str(input: &str) -> DiagramResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            DiagramError::InvalidConfig(format!("failed to parse diagram config json: {e}"))
        })
    }
}

fn default_km_stones_ui_distance() -> f64 {
    DiagramGeometry::default().km_stones_ui_distance
}

fn default_stone_margin_px() -> f64 {
    DiagramGeometry::default().stone_margin_px
}

fn default_top_offset_descending_px() -> f64 {
    DiagramGeometry::default().top_offset_descending_px
}

fn default_top_offset_ascending_px() -> f64 {
    DiagramGeometry::default().top_offset_ascending_px
}
