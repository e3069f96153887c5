use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bus::{Subject, UpdateOrigin};
use crate::core::{PlotPlacement, PlotSide, SurveyData};
use crate::error::{DiagramError, DiagramResult};

/// Keys of the diagram form, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormField {
    KmStone1,
    KmStone2,
    PlotChainageNumber,
    PlotPlacementA,
    PlotPlacementB,
    PlotSide,
    DragDrop,
}

impl FormField {
    pub const ALL: [Self; 7] = [
        Self::KmStone1,
        Self::KmStone2,
        Self::PlotChainageNumber,
        Self::PlotPlacementA,
        Self::PlotPlacementB,
        Self::PlotSide,
        Self::DragDrop,
    ];

    /// Key used on the survey bus.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::KmStone1 => "KMStone1",
            Self::KmStone2 => "KMStone2",
            Self::PlotChainageNumber => "plotChainageNumber",
            Self::PlotPlacementA => "plotPlacementA",
            Self::PlotPlacementB => "plotPlacementB",
            Self::PlotSide => "plotSide",
            Self::DragDrop => "dragDrop",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormValue {
    Integer(i64),
    Side(PlotSide),
    Text(String),
}

impl FormValue {
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Integer(value) => Value::from(*value),
            Self::Side(side) => Value::String(side.as_str().to_owned()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// Values held by the diagram form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagramFormState {
    #[serde(flatten)]
    pub placement: PlotPlacement,
    #[serde(rename = "dragDrop")]
    pub drag_drop: String,
}

impl Default for DiagramFormState {
    fn default() -> Self {
        Self {
            placement: PlotPlacement::default(),
            drag_drop: "[]".to_owned(),
        }
    }
}

impl DiagramFormState {
    #[must_use]
    pub fn get(&self, field: FormField) -> FormValue {
        let placement = &self.placement;
        match field {
            FormField::KmStone1 => FormValue::Integer(placement.km_stone1),
            FormField::KmStone2 => FormValue::Integer(placement.km_stone2),
            FormField::PlotChainageNumber => FormValue::Integer(placement.plot_chainage_number),
            FormField::PlotPlacementA => FormValue::Integer(placement.plot_placement_a),
            FormField::PlotPlacementB => FormValue::Integer(placement.plot_placement_b),
            FormField::PlotSide => FormValue::Side(placement.plot_side),
            FormField::DragDrop => FormValue::Text(self.drag_drop.clone()),
        }
    }

    /// Stores `value`; returns whether the field changed.
    pub fn set(&mut self, field: FormField, value: FormValue) -> DiagramResult<bool> {
        let placement = &mut self.placement;
        let changed = match (field, value) {
            (FormField::KmStone1, FormValue::Integer(v)) => replace(&mut placement.km_stone1, v),
            (FormField::KmStone2, FormValue::Integer(v)) => replace(&mut placement.km_stone2, v),
            (FormField::PlotChainageNumber, FormValue::Integer(v)) => {
                replace(&mut placement.plot_chainage_number, v)
            }
            (FormField::PlotPlacementA, FormValue::Integer(v)) => {
                replace(&mut placement.plot_placement_a, v)
            }
            (FormField::PlotPlacementB, FormValue::Integer(v)) => {
                replace(&mut placement.plot_placement_b, v)
            }
            (FormField::PlotSide, FormValue::Side(side)) => {
                replace(&mut placement.plot_side, side)
            }
            (FormField::DragDrop, FormValue::Text(text)) => replace(&mut self.drag_drop, text),
            (field, _) => return Err(DiagramError::FormValueMismatch { field: field.key() }),
        };
        Ok(changed)
    }

    /// Form values keyed the way the survey bus stores them.
    #[must_use]
    pub fn to_value_map(&self) -> IndexMap<String, Value> {
        FormField::ALL
            .into_iter()
            .map(|field| (field.key().to_owned(), self.get(field).to_json()))
            .collect()
    }

    /// Whether any form value differs from the survey record, comparing
    /// numbers and numeric text by value.
    #[must_use]
    pub fn differs_from(&self, survey: &SurveyData) -> bool {
        FormField::ALL.into_iter().any(|field| {
            !loosely_equal(&self.get(field).to_json(), survey.extra.get(field.key()))
        })
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

fn loosely_equal(form_value: &Value, survey_value: Option<&Value>) -> bool {
    let Some(survey_value) = survey_value else {
        return false;
    };
    if form_value == survey_value {
        return true;
    }
    match (form_value, survey_value) {
        (Value::Number(number), Value::String(text))
        | (Value::String(text), Value::Number(number)) => {
            let trimmed = text.trim();
            let parsed = if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            };
            parsed.is_some() && parsed == number.as_f64()
        }
        _ => false,
    }
}

/// Form values the diagram wants published on the survey bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormEcho {
    pub values: IndexMap<String, Value>,
    pub origin: UpdateOrigin,
}

/// Reactive form surface: keyed get/patch plus a change stream.
///
/// Every patch call that changes at least one value publishes the whole state
/// once on [`DiagramForm::changes`].
#[derive(Default)]
pub struct DiagramForm {
    state: DiagramFormState,
    changes: Subject<DiagramFormState>,
}

impl DiagramForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DiagramFormState {
        &self.state
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> FormValue {
        self.state.get(field)
    }

    #[must_use]
    pub fn get_by_key(&self, key: &str) -> Option<FormValue> {
        FormField::from_key(key).map(|field| self.state.get(field))
    }

    /// Change stream. Observers must not call back into the owning diagram.
    #[must_use]
    pub fn changes(&self) -> &Subject<DiagramFormState> {
        &self.changes
    }

    pub fn patch(&mut self, field: FormField, value: FormValue) -> DiagramResult<bool> {
        self.patch_many([(field, value)])
    }

    /// Applies several values as one batch. Nothing is applied when any value
    /// has the wrong kind for its field.
    pub fn patch_many(
        &mut self,
        values: impl IntoIterator<Item = (FormField, FormValue)>,
    ) -> DiagramResult<bool> {
        let mut next = self.state.clone();
        let mut changed = false;
        for (field, value) in values {
            changed |= next.set(field, value)?;
        }
        if changed {
            self.state = next;
            self.changes.publish(self.state.clone());
        }
        Ok(changed)
    }

    /// Batch patch of every placement field.
    pub fn apply_placement(&mut self, placement: PlotPlacement) -> bool {
        if self.state.placement == placement {
            return false;
        }
        self.state.placement = placement;
        self.changes.publish(self.state.clone());
        true
    }
}
