use tracing::{debug, trace, warn};

use crate::bus::{SurveyUpdate, UpdateOrigin};
use crate::core::{PlacedIcon, Reconciliation, SurveyData, reconcile};
use crate::error::DiagramResult;

use super::{FormEcho, FormField, FormValue, SurveyDiagram};

impl SurveyDiagram {
    /// Handles one survey-bus update.
    ///
    /// The update becomes the change-detection snapshot. Updates echoed by a
    /// reconciliation are only acknowledged; everything else is reconciled.
    /// Invalid survey input is logged and leaves the diagram unchanged.
    /// Returns the form values to publish when the form now differs from the
    /// survey data.
    pub fn apply_survey_update(&mut self, update: &SurveyUpdate) -> Option<FormEcho> {
        self.change_detection_snapshot = update.data.clone();
        if update.origin == UpdateOrigin::Reconciler {
            trace!("acknowledged reconciliation echo");
            return None;
        }

        if let Err(err) = self.reconcile_survey(&update.data) {
            warn!(error = %err, "skipping diagram reconciliation for invalid survey data");
            return None;
        }
        self.form_echo(UpdateOrigin::Reconciler)
    }

    /// Recomputes the form placement and canvas offsets from `data`.
    pub fn reconcile_survey(&mut self, data: &SurveyData) -> DiagramResult<Reconciliation> {
        let measurements = data.measurements()?;
        let reconciliation = reconcile(&measurements, self.config.geometry());

        self.form.apply_placement(reconciliation.placement);
        self.offsets = reconciliation.offsets;
        self.last_rule = Some(reconciliation.rule);
        for (key, value) in data.to_value_map() {
            self.diagram_data.insert(key, value);
        }

        debug!(
            regime = ?reconciliation.rule.regime,
            relation = ?reconciliation.rule.relation,
            ordering = ?reconciliation.rule.ordering,
            km_stone1 = reconciliation.placement.km_stone1,
            km_stone2 = reconciliation.placement.km_stone2,
            plot_side = reconciliation.placement.plot_side.as_str(),
            "reconciled survey diagram"
        );
        Ok(reconciliation)
    }

    /// Form values to publish, if the form differs from the last survey data.
    #[must_use]
    pub fn form_echo(&self, origin: UpdateOrigin) -> Option<FormEcho> {
        let state = self.form.state();
        if !state.differs_from(&self.change_detection_snapshot) {
            return None;
        }
        Some(FormEcho {
            values: state.to_value_map(),
            origin,
        })
    }

    /// Edit made through the diagram form.
    pub fn edit_form_field(
        &mut self,
        field: FormField,
        value: FormValue,
    ) -> DiagramResult<Option<FormEcho>> {
        self.form.patch(field, value)?;
        Ok(self.form_echo(UpdateOrigin::FormEdit))
    }

    /// Mirrors a published icon list into the `dragDrop` form field.
    pub fn sync_icon_list(&mut self, icons: &[PlacedIcon]) -> Option<FormEcho> {
        let json = match PlacedIcon::list_to_json(icons) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "skipping dragDrop sync");
                return None;
            }
        };
        if let Err(err) = self.form.patch(FormField::DragDrop, FormValue::Text(json)) {
            warn!(error = %err, "skipping dragDrop sync");
            return None;
        }
        trace!(count = icons.len(), "synced dragDrop form field");
        self.form_echo(UpdateOrigin::FormEdit)
    }
}
