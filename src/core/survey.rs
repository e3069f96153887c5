use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{DiagramError, DiagramResult};

/// Survey step record as it travels on the survey-data bus.
///
/// The eight measurement keys are typed fields; every other key the survey
/// carries (including the diagram form keys echoed back by the diagram) is
/// kept, in order, in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyData {
    #[serde(default, deserialize_with = "text_or_number")]
    pub nearest_stone_no1: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub nearest_stone_no2: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub distance_from_plot1: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub distance_from_plot2: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub plot_width: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub plot_depth: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub stone_position1: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub stone_position2: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl SurveyData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_stones(
        mut self,
        stone1: impl std::fmt::Display,
        stone2: impl std::fmt::Display,
    ) -> Self {
        self.nearest_stone_no1 = stone1.to_string();
        self.nearest_stone_no2 = stone2.to_string();
        self
    }

    #[must_use]
    pub fn with_distances(
        mut self,
        distance1: impl std::fmt::Display,
        distance2: impl std::fmt::Display,
    ) -> Self {
        self.distance_from_plot1 = distance1.to_string();
        self.distance_from_plot2 = distance2.to_string();
        self
    }

    #[must_use]
    pub fn with_plot(
        mut self,
        width: impl std::fmt::Display,
        depth: impl std::fmt::Display,
    ) -> Self {
        self.plot_width = width.to_string();
        self.plot_depth = depth.to_string();
        self
    }

    #[must_use]
    pub fn with_positions(
        mut self,
        position1: impl std::fmt::Display,
        position2: impl std::fmt::Display,
    ) -> Self {
        self.stone_position1 = position1.to_string();
        self.stone_position2 = position2.to_string();
        self
    }

    /// Parses a survey record from its JSON bus representation.
    pub fn from_json_str(input: &str) -> DiagramResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            DiagramError::Serialization(format!("failed to parse survey data json: {e}"))
        })
    }

    /// Flattens the record into one ordered map, measurement keys first.
    ///
    /// Measurements are emitted as the stored text, extra keys unchanged.
    #[must_use]
    pub fn to_value_map(&self) -> IndexMap<String, Value> {
        let mut map = IndexMap::with_capacity(8 + self.extra.len());
        for (key, text) in [
            ("nearestStoneNo1", &self.nearest_stone_no1),
            ("nearestStoneNo2", &self.nearest_stone_no2),
            ("distanceFromPlot1", &self.distance_from_plot1),
            ("distanceFromPlot2", &self.distance_from_plot2),
            ("plotWidth", &self.plot_width),
            ("plotDepth", &self.plot_depth),
            ("stonePosition1", &self.stone_position1),
            ("stonePosition2", &self.stone_position2),
        ] {
            map.insert(key.to_owned(), Value::String(text.clone()));
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        map
    }

    /// Validates the measurement fields into numbers.
    ///
    /// Empty text reads as 0. Text without a leading integer is rejected.
    pub fn measurements(&self) -> DiagramResult<SurveyMeasurements> {
        Ok(SurveyMeasurements {
            nearest_stone1: measurement("nearestStoneNo1", &self.nearest_stone_no1)?,
            nearest_stone2: measurement("nearestStoneNo2", &self.nearest_stone_no2)?,
            distance_from_plot1: measurement("distanceFromPlot1", &self.distance_from_plot1)?,
            distance_from_plot2: measurement("distanceFromPlot2", &self.distance_from_plot2)?,
            plot_width: measurement("plotWidth", &self.plot_width)?,
            plot_depth: measurement("plotDepth", &self.plot_depth)?,
            stone_position1: StonePosition::parse(&self.stone_position1),
            stone_position2: StonePosition::parse(&self.stone_position2),
        })
    }
}

/// Side of the city/origin a kilometer stone sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StonePosition {
    /// Survey code `1`.
    LeftOfOrigin,
    /// Survey code `2`.
    RightOfOrigin,
}

impl StonePosition {
    /// Reads a survey position code. Anything other than 1 or 2 is unknown.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let code = text.trim().parse::<f64>().ok()?;
        if code == 1.0 {
            Some(Self::LeftOfOrigin)
        } else if code == 2.0 {
            Some(Self::RightOfOrigin)
        } else {
            None
        }
    }
}

/// Validated numeric view of a [`SurveyData`] record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyMeasurements {
    pub nearest_stone1: i64,
    pub nearest_stone2: i64,
    pub distance_from_plot1: i64,
    pub distance_from_plot2: i64,
    pub plot_width: i64,
    pub plot_depth: i64,
    pub stone_position1: Option<StonePosition>,
    pub stone_position2: Option<StonePosition>,
}

fn measurement(field: &'static str, text: &str) -> DiagramResult<i64> {
    if text.trim().is_empty() {
        return Ok(0);
    }
    parse_leading_int(text).ok_or_else(|| DiagramError::InvalidNumber {
        field,
        value: text.to_owned(),
    })
}

/// Reads the leading integer of `text`: optional whitespace and sign, then the
/// longest run of ASCII digits. Trailing text is ignored.
pub(crate) fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(text) => Ok(text),
        Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected text or number, got {other}"
        ))),
    }
}
