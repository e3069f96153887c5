use serde::{Deserialize, Serialize};

use super::placement::{
    ChainageOrder, DistanceAnchor, DistanceRegime, PlacementRule, PlotSide, StoneOrdering,
    StoneRef, StoneRelation, placement_rule,
};
use super::survey::SurveyMeasurements;

/// Canvas constants the UI offsets are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramGeometry {
    /// Horizontal baseline between the two stones.
    pub km_stones_ui_distance: f64,
    /// Fixed margin left of stone 1.
    pub stone_margin_px: f64,
    /// Plot label offset below stone 1 when chainage descends.
    pub top_offset_descending_px: f64,
    /// Plot label offset below stone 1 when chainage ascends.
    pub top_offset_ascending_px: f64,
}

impl Default for DiagramGeometry {
    fn default() -> Self {
        Self {
            km_stones_ui_distance: 600.0,
            stone_margin_px: 45.0,
            top_offset_descending_px: 80.0,
            top_offset_ascending_px: 30.0,
        }
    }
}

/// Stone numbers and plot placement derived from a survey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlotPlacement {
    #[serde(rename = "KMStone1")]
    pub km_stone1: i64,
    #[serde(rename = "KMStone2")]
    pub km_stone2: i64,
    #[serde(rename = "plotChainageNumber")]
    pub plot_chainage_number: i64,
    #[serde(rename = "plotPlacementA")]
    pub plot_placement_a: i64,
    #[serde(rename = "plotPlacementB")]
    pub plot_placement_b: i64,
    #[serde(rename = "plotSide")]
    pub plot_side: PlotSide,
}

/// Pixel offsets consumed by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UiOffsets {
    pub chainage_order: ChainageOrder,
    pub km_stone1_ui_distance: f64,
    pub km_stone2_ui_distance: f64,
    pub top_ui_distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub placement: PlotPlacement,
    pub offsets: UiOffsets,
    pub rule: PlacementRule,
}

/// Derives stone numbers, plot placement and canvas offsets from a survey.
///
/// Pure: the same measurements and geometry always give the same result.
#[must_use]
pub fn reconcile(measurements: &SurveyMeasurements, geometry: DiagramGeometry) -> Reconciliation {
    let regime = DistanceRegime::classify(measurements.distance_from_plot1);
    let relation =
        StoneRelation::classify(measurements.stone_position1, measurements.stone_position2);
    let ordering =
        StoneOrdering::classify(measurements.nearest_stone1, measurements.nearest_stone2);
    let rule = *placement_rule(regime, relation, ordering);

    let (rolled_stones, stone1_distance) = regime.split_distance(measurements.distance_from_plot1);
    let distance = |anchor: DistanceAnchor| match anchor {
        DistanceAnchor::Stone1 => stone1_distance,
        DistanceAnchor::Stone2 => measurements.distance_from_plot2,
    };

    let km_stone1 = measurements
        .nearest_stone1
        .saturating_add(rule.stone1_roll.saturating_mul(rolled_stones))
        .saturating_add(rule.stone1_offset);
    let km_stone2 = km_stone1.saturating_add(rule.stone2_step);
    let plot_chainage_number = match rule.chainage_from {
        StoneRef::Stone1 => km_stone1,
        StoneRef::Stone2 => km_stone2,
    };

    let anchor = distance(rule.anchor);
    let width = measurements.plot_width;
    let placement = PlotPlacement {
        km_stone1,
        km_stone2,
        plot_chainage_number,
        plot_placement_a: anchor.saturating_add(rule.placement_a_widths.saturating_mul(width)),
        plot_placement_b: anchor.saturating_add(rule.placement_b_widths.saturating_mul(width)),
        plot_side: rule.side,
    };

    let (stone1_anchor, stone2_anchor) = relation.ui_anchors();
    let km_stone1_ui_distance = geometry.km_stones_ui_distance
        - geometry.stone_margin_px
        - distance(stone1_anchor) as f64 / 2.0;
    let km_stone2_ui_distance =
        geometry.km_stones_ui_distance + distance(stone2_anchor) as f64 / 2.0;
    let chainage_order = rule.side.chainage_order();
    let top_ui_distance = km_stone1_ui_distance
        + match chainage_order {
            ChainageOrder::Descending => geometry.top_offset_descending_px,
            ChainageOrder::Ascending => geometry.top_offset_ascending_px,
        };

    Reconciliation {
        placement,
        offsets: UiOffsets {
            chainage_order,
            km_stone1_ui_distance,
            km_stone2_ui_distance,
            top_ui_distance,
        },
        rule,
    }
}
