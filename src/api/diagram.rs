use indexmap::IndexMap;
use serde_json::Value;

use crate::core::{ChainageOrder, PlacedIcon, PlacementRule, SurveyData, UiOffsets};
use crate::error::DiagramResult;
use crate::interaction::DropEvent;

use super::config_validation::validate_diagram_config;
use super::{DiagramConfig, DiagramForm, DiagramFormState};

/// Headless state of one survey diagram.
///
/// `SurveyDiagram` owns the diagram form, the derived canvas offsets, the
/// placed-icon list and the canvas container. It never talks to the buses
/// itself: operations return what should be published and
/// [`DiagramBinding`](super::DiagramBinding) does the publishing.
pub struct SurveyDiagram {
    pub(super) config: DiagramConfig,
    pub(super) form: DiagramForm,
    pub(super) offsets: UiOffsets,
    pub(super) last_rule: Option<PlacementRule>,
    pub(super) diagram_data: IndexMap<String, Value>,
    pub(super) change_detection_snapshot: SurveyData,
    pub(super) icons: Vec<PlacedIcon>,
    pub(super) canvas_items: Vec<String>,
    pub(super) discarded_items: Vec<String>,
    pub(super) pending_drop: Option<DropEvent>,
}

impl SurveyDiagram {
    pub fn new(config: DiagramConfig) -> DiagramResult<Self> {
        let config = validate_diagram_config(config)?;
        Ok(Self {
            config,
            form: DiagramForm::new(),
            offsets: UiOffsets::default(),
            last_rule: None,
            diagram_data: IndexMap::new(),
            change_detection_snapshot: SurveyData::default(),
            icons: Vec::new(),
            canvas_items: Vec::new(),
            discarded_items: Vec::new(),
            pending_drop: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> DiagramConfig {
        self.config
    }

    #[must_use]
    pub fn form(&self) -> &DiagramForm {
        &self.form
    }

    #[must_use]
    pub fn form_state(&self) -> &DiagramFormState {
        self.form.state()
    }

    #[must_use]
    pub fn ui_offsets(&self) -> UiOffsets {
        self.offsets
    }

    #[must_use]
    pub fn chainage_order(&self) -> ChainageOrder {
        self.offsets.chainage_order
    }

    /// Rule applied by the latest successful reconciliation.
    #[must_use]
    pub fn last_rule(&self) -> Option<&PlacementRule> {
        self.last_rule.as_ref()
    }

    /// Every survey key seen so far, for the rendering layer.
    ///
    /// The eight measurement keys hold the text [`SurveyData`] stores for
    /// them: a JSON number `5` reads back as `"5"` and `null` as `""`. Every
    /// other key keeps its original value.
    #[must_use]
    pub fn diagram_data(&self) -> &IndexMap<String, Value> {
        &self.diagram_data
    }

    #[must_use]
    pub fn icons(&self) -> &[PlacedIcon] {
        &self.icons
    }

    /// Entries of the canvas drop container.
    #[must_use]
    pub fn canvas_items(&self) -> &[String] {
        &self.canvas_items
    }

    #[must_use]
    pub fn discarded_items(&self) -> &[String] {
        &self.discarded_items
    }

    #[must_use]
    pub fn has_pending_drop(&self) -> bool {
        self.pending_drop.is_some()
    }
}
