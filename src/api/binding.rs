use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::bus::{ImageOverlayBus, SubscriptionSet, SurveyDataBus, SurveyUpdate};
use crate::core::IconList;
use crate::error::DiagramResult;
use crate::interaction::{DialogResult, DropEvent, EditDialog};

use super::{FormEcho, FormField, FormValue, SurveyDiagram};

/// Connects a [`SurveyDiagram`] to the shared buses and the edit dialog.
///
/// * survey bus -> reconciliation -> echo of changed form values, tagged
///   [`UpdateOrigin::Reconciler`](crate::bus::UpdateOrigin::Reconciler) so it
///   is acknowledged instead of reconciled;
/// * overlay bus -> `dragDrop` form field -> echo tagged
///   [`UpdateOrigin::FormEdit`](crate::bus::UpdateOrigin::FormEdit);
/// * drop -> dialog -> answer -> icon list published on the overlay bus.
///
/// [`DiagramBinding::teardown`] (or dropping the binding) unregisters every
/// observer at once.
pub struct DiagramBinding<D: EditDialog> {
    diagram: Rc<RefCell<SurveyDiagram>>,
    survey_bus: SurveyDataBus,
    overlay_bus: ImageOverlayBus,
    dialog: D,
    subscriptions: SubscriptionSet,
    torn_down: Rc<Cell<bool>>,
}

impl<D: EditDialog> DiagramBinding<D> {
    /// Wires `diagram` to the buses.
    ///
    /// The current overlay list is loaded once. When the survey bus already
    /// holds data it is reconciled immediately, then the icon list is mirrored
    /// into the form. Nothing is published while the survey bus is empty.
    pub fn attach(
        diagram: SurveyDiagram,
        survey_bus: SurveyDataBus,
        overlay_bus: ImageOverlayBus,
        dialog: D,
    ) -> Self {
        let diagram = Rc::new(RefCell::new(diagram));
        let torn_down = Rc::new(Cell::new(false));
        let initial_icons = overlay_bus.current();
        diagram.borrow_mut().load_icons(&initial_icons);

        let mut subscriptions = SubscriptionSet::new();
        subscriptions.add(survey_bus.subscribe(survey_observer(
            Rc::downgrade(&diagram),
            survey_bus.clone(),
            Rc::clone(&torn_down),
        )));
        subscriptions.add(overlay_bus.subscribe(overlay_observer(
            Rc::downgrade(&diagram),
            survey_bus.clone(),
            Rc::clone(&torn_down),
        )));

        let binding = Self {
            diagram,
            survey_bus,
            overlay_bus,
            dialog,
            subscriptions,
            torn_down,
        };

        if let Some(update) = binding.survey_bus.current_update() {
            let echo = binding.diagram.borrow_mut().apply_survey_update(&update);
            publish_echo(&binding.survey_bus, echo);
        }
        let echo = binding.diagram.borrow_mut().sync_icon_list(&initial_icons);
        publish_icon_echo(&binding.survey_bus, echo);

        debug!(
            observers = binding.subscriptions.len(),
            icons = initial_icons.len(),
            "survey diagram attached"
        );
        binding
    }

    /// Read access to the diagram state. Do not hold it across bus calls.
    #[must_use]
    pub fn diagram(&self) -> Ref<'_, SurveyDiagram> {
        self.diagram.borrow()
    }

    #[must_use]
    pub fn dialog(&self) -> &D {
        &self.dialog
    }

    #[must_use]
    pub fn dialog_mut(&mut self) -> &mut D {
        &mut self.dialog
    }

    #[must_use]
    pub fn survey_bus(&self) -> &SurveyDataBus {
        &self.survey_bus
    }

    #[must_use]
    pub fn overlay_bus(&self) -> &ImageOverlayBus {
        &self.overlay_bus
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down.get()
    }

    /// Handles a finished drag gesture by opening the edit dialog.
    pub fn on_drop(&mut self, event: DropEvent) -> DiagramResult<()> {
        let prompt = self.diagram.borrow_mut().begin_drop(event)?;
        self.dialog.set_initial_values(&prompt.initial_values);
        self.dialog.set_intersection(prompt.intersection);
        self.dialog.open(&prompt.request);
        Ok(())
    }

    /// Delivers the dialog's single close event.
    pub fn dialog_closed(&mut self, result: Option<DialogResult>) {
        if self.torn_down.get() {
            return;
        }
        let published = self.diagram.borrow_mut().finish_drop(result.as_ref());
        if let Some(icons) = published {
            self.overlay_bus.publish(icons);
        }
    }

    /// Applies a user edit of a diagram form field.
    pub fn edit_form_field(&mut self, field: FormField, value: FormValue) -> DiagramResult<()> {
        let echo = self.diagram.borrow_mut().edit_form_field(field, value)?;
        if !self.torn_down.get() {
            publish_echo(&self.survey_bus, echo);
        }
        Ok(())
    }

    /// Unregisters every observer. Later bus traffic no longer reaches the
    /// diagram.
    pub fn teardown(&mut self) {
        if self.torn_down.replace(true) {
            return;
        }
        self.subscriptions.teardown();
        debug!("survey diagram torn down");
    }
}

impl<D: EditDialog> Drop for DiagramBinding<D> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn survey_observer(
    diagram: Weak<RefCell<SurveyDiagram>>,
    survey_bus: SurveyDataBus,
    torn_down: Rc<Cell<bool>>,
) -> impl FnMut(&SurveyUpdate) + 'static {
    move |update| {
        if torn_down.get() {
            return;
        }
        let Some(diagram) = diagram.upgrade() else {
            return;
        };
        let echo = diagram.borrow_mut().apply_survey_update(update);
        publish_echo(&survey_bus, echo);
    }
}

fn overlay_observer(
    diagram: Weak<RefCell<SurveyDiagram>>,
    survey_bus: SurveyDataBus,
    torn_down: Rc<Cell<bool>>,
) -> impl FnMut(&IconList) + 'static {
    move |icons| {
        if torn_down.get() {
            return;
        }
        let Some(diagram) = diagram.upgrade() else {
            return;
        };
        let echo = diagram.borrow_mut().sync_icon_list(icons);
        publish_icon_echo(&survey_bus, echo);
    }
}

/// Icon-list echoes wait for survey data: the next reconciliation echo carries
/// `dragDrop` along with the placement fields.
fn publish_icon_echo(survey_bus: &SurveyDataBus, echo: Option<FormEcho>) {
    if survey_bus.current().is_none() {
        trace!("no survey data yet, holding dragDrop echo");
        return;
    }
    publish_echo(survey_bus, echo);
}

fn publish_echo(survey_bus: &SurveyDataBus, echo: Option<FormEcho>) {
    if let Some(echo) = echo {
        trace!(origin = ?echo.origin, "publishing diagram form values");
        survey_bus.set_step_form_data(echo.values, echo.origin);
    }
}
