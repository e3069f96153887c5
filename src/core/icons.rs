use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{DiagramError, DiagramResult};

/// Published icon list. Shared by reference and never mutated after publish.
pub type IconList = Rc<[PlacedIcon]>;

/// Orientation code chosen in the edit dialog (1, 2 or 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct IconOrientation(u8);

impl IconOrientation {
    pub const ONE: Self = Self(1);
    pub const TWO: Self = Self(2);
    pub const THREE: Self = Self(3);

    /// Maps a dialog code to an orientation. Codes other than 1 and 2 share
    /// the third orientation.
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::ONE,
            2 => Self::TWO,
            _ => Self::THREE,
        }
    }

    #[must_use]
    pub fn code(self) -> u8 {
        self.0
    }

    /// Left margin of the icon on the canvas.
    #[must_use]
    pub fn margin_px(self) -> u32 {
        match self.0 {
            1 => 45,
            2 => 125,
            _ => 75,
        }
    }
}

impl Default for IconOrientation {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<u8> for IconOrientation {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1..=3 => Ok(Self(code)),
            other => Err(format!("icon orientation must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<IconOrientation> for u8 {
    fn from(orientation: IconOrientation) -> Self {
        orientation.0
    }
}

/// Road-furniture icon placed on the diagram canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedIcon {
    pub image_index: usize,
    pub image_distance: f64,
    pub image_orientation: IconOrientation,
    pub image_width: f64,
    pub image_margin: u32,
    pub image_pos: i64,
    pub image_name: String,
    pub road_length: f64,
}

impl PlacedIcon {
    /// Serializes a list the way the `dragDrop` form field stores it.
    pub fn list_to_json(icons: &[PlacedIcon]) -> DiagramResult<String> {
        serde_json::to_string(icons)
            .map_err(|e| DiagramError::Serialization(format!("failed to serialize icons: {e}")))
    }

    pub fn list_from_json(input: &str) -> DiagramResult<Vec<PlacedIcon>> {
        serde_json::from_str(input)
            .map_err(|e| DiagramError::Serialization(format!("failed to parse icons: {e}")))
    }
}

/// Turns a dragged element's class list into the icon name.
///
/// Removes the first `roadComponents`, `droppedRoadComponents` and
/// `ng-star-inserted`, then uppercases and trims.
#[must_use]
pub fn sanitize_image_name(class_name: &str) -> String {
    ["roadComponents", "droppedRoadComponents", "ng-star-inserted"]
        .iter()
        .fold(class_name.to_owned(), |name, marker| name.replacen(marker, "", 1))
        .to_uppercase()
        .trim()
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn margins_follow_orientation() {
        assert_eq!(IconOrientation::from_code(1).margin_px(), 45);
        assert_eq!(IconOrientation::from_code(2).margin_px(), 125);
        assert_eq!(IconOrientation::from_code(3).margin_px(), 75);
        assert_eq!(IconOrientation::from_code(9), IconOrientation::THREE);
    }

    #[test]
    fn image_name_drops_framework_classes() {
        assert_eq!(
            sanitize_image_name("roadComponents busStop ng-star-inserted"),
            "BUSSTOP"
        );
        assert_eq!(
            sanitize_image_name("droppedRoadComponents intersection"),
            "INTERSECTION"
        );
    }

    #[test]
    fn orientation_rejects_out_of_range_json() {
        let parsed: Result<IconOrientation, _> = serde_json::from_str("4");
        assert!(parsed.is_err());
        let parsed: IconOrientation = serde_json::from_str("2").expect("valid orientation");
        assert_eq!(parsed, IconOrientation::TWO);
    }
}
