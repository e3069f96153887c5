pub mod icons;
pub mod placement;
pub mod reconcile;
pub mod survey;

pub use icons::{IconList, IconOrientation, PlacedIcon, sanitize_image_name};
pub use placement::{
    ChainageOrder, DistanceAnchor, DistanceRegime, LONG_REGIME_THRESHOLD, PLACEMENT_RULES,
    PlacementRule, PlotSide, StoneOrdering, StoneRef, StoneRelation, placement_rule,
};
pub use reconcile::{DiagramGeometry, PlotPlacement, Reconciliation, UiOffsets, reconcile};
pub use survey::{StonePosition, SurveyData, SurveyMeasurements};
