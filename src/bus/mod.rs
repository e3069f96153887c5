//! In-process buses shared between the diagram and the rest of the survey UI.

mod channels;
mod subject;
mod subscription;

pub use channels::{ImageOverlayBus, SurveyDataBus, SurveyUpdate, UpdateOrigin};
pub use subject::{ObserverId, Subject};
pub use subscription::{Subscription, SubscriptionSet};
