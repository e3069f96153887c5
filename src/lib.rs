//! survey-diagram: headless engine behind the road/plot survey diagram.
//!
//! The crate keeps a strict split between pure survey arithmetic (`core`),
//! the contracts with the host UI (`interaction`), in-process buses (`bus`)
//! and the stateful diagram facade that ties them together (`api`).

pub mod api;
pub mod bus;
pub mod core;
pub mod error;
pub mod interaction;
pub mod telemetry;

pub use api::{DiagramBinding, DiagramConfig, SurveyDiagram};
pub use error::{DiagramError, DiagramResult};
