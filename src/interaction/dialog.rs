use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::survey::parse_leading_int;
use crate::core::{IconOrientation, PlacedIcon};

/// Values the edit dialog form starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogInitialValues {
    pub is_reset: bool,
    pub image_distance: f64,
    pub image_orientation: IconOrientation,
    pub image_width: f64,
    pub image_pos: i64,
    pub road_length: f64,
}

impl DialogInitialValues {
    /// Blank form for a new placement.
    #[must_use]
    pub fn reset() -> Self {
        Self {
            is_reset: true,
            image_distance: 0.0,
            image_orientation: IconOrientation::ONE,
            image_width: 1.0,
            image_pos: 0,
            road_length: 1.0,
        }
    }

    /// Form pre-filled from an icon being moved. Zero values and a missing
    /// icon fall back to the blank defaults.
    #[must_use]
    pub fn from_icon(icon: Option<&PlacedIcon>) -> Self {
        let defaults = Self::reset();
        let non_zero = |value: f64, fallback: f64| if value != 0.0 { value } else { fallback };
        match icon {
            Some(icon) => Self {
                is_reset: false,
                image_distance: non_zero(icon.image_distance, defaults.image_distance),
                image_orientation: icon.image_orientation,
                image_width: non_zero(icon.image_width, defaults.image_width),
                image_pos: icon.image_pos,
                road_length: defaults.road_length,
            },
            None => Self {
                is_reset: false,
                ..defaults
            },
        }
    }
}

/// Arguments the dialog is opened with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogRequest {
    pub form_type: String,
    pub is_update_image: bool,
}

/// Everything the dialog collaborator receives for one drop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogPrompt {
    pub request: DialogRequest,
    pub initial_values: DialogInitialValues,
    pub intersection: bool,
}

/// Button the user closed the dialog with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DialogStatus {
    Add,
    Update,
    Delete,
    /// Cancel or any status the coordinator does not act on.
    Dismissed,
}

impl DialogStatus {
    #[must_use]
    pub fn parse(status: &str) -> Self {
        match status.trim().to_uppercase().as_str() {
            "ADD" => Self::Add,
            "UPDATE" => Self::Update,
            "DELETE" => Self::Delete,
            _ => Self::Dismissed,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Dismissed => "cancel",
        }
    }
}

impl From<String> for DialogStatus {
    fn from(status: String) -> Self {
        Self::parse(&status)
    }
}

impl From<DialogStatus> for String {
    fn from(status: DialogStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// Single answer of the edit dialog.
///
/// Numeric properties accept JSON numbers or numeric text; unreadable values
/// read as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResult {
    pub status: DialogStatus,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub property_distance: f64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub property_orientation: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub property_width: f64,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub property_position: i64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub road_length: f64,
}

impl DialogResult {
    #[must_use]
    pub fn new(status: DialogStatus) -> Self {
        Self {
            status,
            property_distance: 0.0,
            property_orientation: 1,
            property_width: 1.0,
            property_position: 0,
            road_length: 1.0,
        }
    }

    #[must_use]
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.property_distance = distance;
        self
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: i64) -> Self {
        self.property_orientation = orientation;
        self
    }

    #[must_use]
    pub fn with_width(mut self, width: f64) -> Self {
        self.property_width = width;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: i64) -> Self {
        self.property_position = position;
        self
    }

    #[must_use]
    pub fn with_road_length(mut self, road_length: f64) -> Self {
        self.road_length = road_length;
        self
    }
}

/// Modal edit dialog owned by the host UI.
///
/// The coordinator pushes the initial values and the intersection flag, then
/// opens the dialog. The host reports the single close event back through
/// `DiagramBinding::dialog_closed`.
pub trait EditDialog {
    fn set_initial_values(&mut self, values: &DialogInitialValues);
    fn set_intersection(&mut self, intersection: bool);
    fn open(&mut self, request: &DialogRequest);
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|value| value.trunc() as i64))
            .unwrap_or(0),
        Value::String(text) => parse_leading_int(&text).unwrap_or(0),
        _ => 0,
    })
}
