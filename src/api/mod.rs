mod binding;
mod config_validation;
mod diagram;
mod diagram_config;
mod drop_controller;
mod form;
mod reconcile_controller;

pub use binding::DiagramBinding;
pub use diagram::SurveyDiagram;
pub use diagram_config::DiagramConfig;
pub use form::{DiagramForm, DiagramFormState, FormEcho, FormField, FormValue};
