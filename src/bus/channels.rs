use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::core::{IconList, PlacedIcon, SurveyData};

use super::{Subject, Subscription};

/// Who produced a survey-bus update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateOrigin {
    /// Survey form or any other component.
    External,
    /// Echo of a diagram reconciliation. Never reconciled again.
    Reconciler,
    /// Edit made through the diagram form, including icon list sync.
    FormEdit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyUpdate {
    pub data: SurveyData,
    pub origin: UpdateOrigin,
}

/// Shared survey-data bus.
#[derive(Clone, Default)]
pub struct SurveyDataBus {
    subject: Subject<SurveyUpdate>,
}

impl SurveyDataBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bus that already holds `data`, as if another component published it.
    #[must_use]
    pub fn with_data(data: SurveyData) -> Self {
        Self {
            subject: Subject::with_value(SurveyUpdate {
                data,
                origin: UpdateOrigin::External,
            }),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<SurveyData> {
        self.subject.current().map(|update| update.data)
    }

    #[must_use]
    pub fn current_update(&self) -> Option<SurveyUpdate> {
        self.subject.current()
    }

    pub fn publish(&self, data: SurveyData) {
        self.publish_with_origin(data, UpdateOrigin::External);
    }

    pub fn publish_with_origin(&self, data: SurveyData, origin: UpdateOrigin) {
        trace!(?origin, "survey bus publish");
        self.subject.publish(SurveyUpdate { data, origin });
    }

    /// Merges form values into the current survey data and publishes it.
    pub fn set_step_form_data(&self, values: IndexMap<String, Value>, origin: UpdateOrigin) {
        let mut data = self.current().unwrap_or_default();
        data.extra.extend(values);
        self.publish_with_origin(data, origin);
    }

    #[must_use = "dropping the subscription unregisters the observer"]
    pub fn subscribe(&self, callback: impl FnMut(&SurveyUpdate) + 'static) -> Subscription {
        self.subject.subscribe(callback)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }
}

/// Shared image-overlay bus carrying the placed-icon list.
#[derive(Clone, Default)]
pub struct ImageOverlayBus {
    subject: Subject<IconList>,
}

impl ImageOverlayBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_icons(icons: Vec<PlacedIcon>) -> Self {
        Self {
            subject: Subject::with_value(IconList::from(icons)),
        }
    }

    /// Last published list; empty when nothing was published yet.
    #[must_use]
    pub fn current(&self) -> IconList {
        self.subject
            .current()
            .unwrap_or_else(|| IconList::from(Vec::new()))
    }

    pub fn publish(&self, icons: IconList) {
        trace!(count = icons.len(), "image overlay publish");
        self.subject.publish(icons);
    }

    #[must_use = "dropping the subscription unregisters the observer"]
    pub fn subscribe(&self, callback: impl FnMut(&IconList) + 'static) -> Subscription {
        self.subject.subscribe(callback)
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.subject.observer_count()
    }
}
