use std::collections::HashSet;

use approx::assert_relative_eq;
use survey_diagram::core::{
    ChainageOrder, DiagramGeometry, DistanceRegime, PLACEMENT_RULES, PlotSide, StoneOrdering,
    StoneRelation, SurveyData, reconcile,
};
use survey_diagram::error::DiagramError;

fn reconcile_survey(data: &SurveyData) -> survey_diagram::core::Reconciliation {
    let measurements = data.measurements().expect("valid survey");
    reconcile(&measurements, DiagramGeometry::default())
}

fn survey(
    stones: (i64, i64),
    distances: (i64, i64),
    width: i64,
    positions: (u8, u8),
) -> SurveyData {
    SurveyData::new()
        .with_stones(stones.0, stones.1)
        .with_distances(distances.0, distances.1)
        .with_plot(width, 10)
        .with_positions(positions.0, positions.1)
}

#[test]
fn left_right_ascending_stones_chain_from_stone1() {
    let result = reconcile_survey(&survey((5, 7), (300, 400), 20, (1, 2)));
    let placement = result.placement;

    assert_eq!(result.rule.regime, DistanceRegime::Short);
    assert_eq!(result.rule.relation, StoneRelation::LeftRight);
    assert_eq!(placement.km_stone1, 5);
    assert_eq!(placement.km_stone2, 6);
    assert_eq!(placement.plot_chainage_number, 5);
    assert_eq!(placement.plot_placement_a, 300);
    assert_eq!(placement.plot_placement_b, 320);
    assert_eq!(placement.plot_side, PlotSide::Lhs);
    assert_eq!(result.offsets.chainage_order, ChainageOrder::Ascending);
    assert_relative_eq!(result.offsets.km_stone1_ui_distance, 405.0);
    assert_relative_eq!(result.offsets.km_stone2_ui_distance, 800.0);
    assert_relative_eq!(result.offsets.top_ui_distance, 435.0);
}

#[test]
fn left_right_descending_stones_chain_from_stone2() {
    let result = reconcile_survey(&survey((7, 5), (300, 400), 20, (1, 2)));
    let placement = result.placement;

    assert_eq!(placement.km_stone1, 7);
    assert_eq!(placement.km_stone2, 6);
    assert_eq!(placement.plot_chainage_number, 6);
    assert_eq!(placement.plot_placement_a, 400);
    assert_eq!(placement.plot_placement_b, 380);
    assert_eq!(placement.plot_side, PlotSide::Rhs);
    assert_eq!(result.offsets.chainage_order, ChainageOrder::Descending);
    assert_relative_eq!(result.offsets.top_ui_distance, 405.0 + 80.0);
}

#[test]
fn right_left_swaps_the_canvas_distances() {
    let result = reconcile_survey(&survey((5, 7), (300, 400), 20, (2, 1)));
    let placement = result.placement;

    assert_eq!(result.rule.relation, StoneRelation::RightLeft);
    assert_eq!(placement.km_stone1, 6);
    assert_eq!(placement.km_stone2, 5);
    assert_eq!(placement.plot_chainage_number, 5);
    assert_eq!(placement.plot_placement_a, 320);
    assert_eq!(placement.plot_placement_b, 300);
    assert_eq!(placement.plot_side, PlotSide::Rhs);
    assert_relative_eq!(result.offsets.km_stone1_ui_distance, 355.0);
    assert_relative_eq!(result.offsets.km_stone2_ui_distance, 750.0);
    assert_relative_eq!(result.offsets.top_ui_distance, 435.0);
}

#[test]
fn left_left_descending_stones_chain_upwards() {
    let result = reconcile_survey(&survey((7, 5), (300, 400), 20, (1, 1)));
    let placement = result.placement;

    assert_eq!(result.rule.relation, StoneRelation::LeftLeft);
    assert_eq!(placement.km_stone1, 7);
    assert_eq!(placement.km_stone2, 8);
    assert_eq!(placement.plot_chainage_number, 7);
    assert_eq!(placement.plot_placement_a, 300);
    assert_eq!(placement.plot_placement_b, 320);
    assert_eq!(placement.plot_side, PlotSide::Lhs);
}

#[test]
fn right_right_ascending_stones_place_from_stone2() {
    let result = reconcile_survey(&survey((5, 7), (300, 400), 20, (2, 2)));
    let placement = result.placement;

    assert_eq!(result.rule.relation, StoneRelation::RightRight);
    assert_eq!(placement.km_stone1, 4);
    assert_eq!(placement.km_stone2, 5);
    assert_eq!(placement.plot_chainage_number, 4);
    assert_eq!(placement.plot_placement_a, 380);
    assert_eq!(placement.plot_placement_b, 400);
    assert_eq!(placement.plot_side, PlotSide::Lhs);
    assert_relative_eq!(result.offsets.top_ui_distance, 355.0 + 30.0);
}

#[test]
fn long_regime_rolls_thousands_into_stone_numbers() {
    let result = reconcile_survey(&survey((5, 7), (2350, 400), 20, (1, 2)));
    let placement = result.placement;

    assert_eq!(result.rule.regime, DistanceRegime::Long);
    assert_eq!(placement.km_stone1, 7);
    assert_eq!(placement.km_stone2, 8);
    assert_eq!(placement.plot_chainage_number, 7);
    assert_eq!(placement.plot_placement_a, 350);
    assert_eq!(placement.plot_placement_b, 370);
    assert_relative_eq!(result.offsets.km_stone1_ui_distance, 380.0);
    assert_relative_eq!(result.offsets.km_stone2_ui_distance, 800.0);
}

#[test]
fn long_regime_right_right_descending_chains_from_stone1() {
    let result = reconcile_survey(&survey((9, 5), (1200, 400), 20, (2, 2)));
    let placement = result.placement;

    assert_eq!(placement.km_stone1, 11);
    assert_eq!(placement.km_stone2, 10);
    assert_eq!(placement.plot_chainage_number, 11);
    assert_eq!(placement.plot_placement_a, 220);
    assert_eq!(placement.plot_placement_b, 200);
    assert_eq!(placement.plot_side, PlotSide::Rhs);
    assert_relative_eq!(result.offsets.km_stone2_ui_distance, 700.0);
}

#[test]
fn long_regime_right_left_descending_steps_back_past_the_rolled_stones() {
    let result = reconcile_survey(&survey((9, 5), (1200, 400), 20, (2, 1)));
    let placement = result.placement;

    assert_eq!(placement.km_stone1, 7);
    assert_eq!(placement.km_stone2, 8);
    assert_eq!(placement.plot_chainage_number, 7);
    assert_eq!(placement.plot_placement_a, 380);
    assert_eq!(placement.plot_placement_b, 400);
    assert_eq!(placement.plot_side, PlotSide::Lhs);
}

#[test]
fn regime_boundary_resets_the_remainder_and_shifts_one_stone() {
    let below = reconcile_survey(&survey((5, 7), (999, 400), 20, (1, 2))).placement;
    let at = reconcile_survey(&survey((5, 7), (1000, 400), 20, (1, 2))).placement;

    assert_eq!(below.plot_placement_a, 999);
    assert_eq!(below.km_stone1, 5);
    assert_eq!(at.plot_placement_a, 0);
    assert_eq!(at.km_stone1, below.km_stone1 + 1);
    assert_eq!(at.km_stone2, below.km_stone2 + 1);
}

#[test]
fn unknown_positions_are_treated_as_right_right() {
    let unknown = reconcile_survey(&survey((5, 7), (300, 400), 20, (0, 3)));
    let right_right = reconcile_survey(&survey((5, 7), (300, 400), 20, (2, 2)));

    assert_eq!(unknown.rule.relation, StoneRelation::RightRight);
    assert_eq!(unknown.placement, right_right.placement);
    assert_eq!(unknown.offsets, right_right.offsets);
}

#[test]
fn empty_distance_from_plot2_reads_as_zero() {
    let data = SurveyData::new()
        .with_stones(7, 5)
        .with_distances(300, "")
        .with_plot(20, "")
        .with_positions(1, 2);
    let result = reconcile_survey(&data);

    assert_eq!(result.placement.plot_placement_a, 0);
    assert_eq!(result.placement.plot_placement_b, -20);
    assert_relative_eq!(result.offsets.km_stone2_ui_distance, 600.0);
}

#[test]
fn non_numeric_distance_from_plot2_is_rejected() {
    let data = SurveyData::new()
        .with_stones(5, 7)
        .with_distances(300, "far")
        .with_plot(20, 10)
        .with_positions(1, 2);

    match data.measurements() {
        Err(DiagramError::InvalidNumber { field, value }) => {
            assert_eq!(field, "distanceFromPlot2");
            assert_eq!(value, "far");
        }
        other => panic!("expected invalid number, got {other:?}"),
    }
}

#[test]
fn survey_json_accepts_numbers_and_keeps_extra_keys() {
    let data = SurveyData::from_json_str(
        r#"{
            "nearestStoneNo1": 5,
            "nearestStoneNo2": "7",
            "distanceFromPlot1": "300",
            "distanceFromPlot2": null,
            "plotWidth": 20,
            "plotDepth": "15",
            "stonePosition1": 1,
            "stonePosition2": "2",
            "surveyor": "field team"
        }"#,
    )
    .expect("survey json");

    assert_eq!(data.nearest_stone_no1, "5");
    assert_eq!(data.distance_from_plot2, "");
    assert_eq!(
        data.extra.get("surveyor"),
        Some(&serde_json::Value::from("field team"))
    );

    let measurements = data.measurements().expect("valid survey");
    assert_eq!(measurements.plot_depth, 15);
    assert_eq!(measurements.distance_from_plot2, 0);
}

struct RowCase {
    regime: DistanceRegime,
    relation: StoneRelation,
    ordering: StoneOrdering,
    stones: (i64, i64),
    distance_from_plot1: i64,
    positions: (u8, u8),
    km_stones: (i64, i64),
    chainage: i64,
    placements: (i64, i64),
    side: PlotSide,
    ui_distances: (f64, f64),
}

#[allow(clippy::too_many_arguments)]
fn case(
    regime: DistanceRegime,
    relation: StoneRelation,
    ordering: StoneOrdering,
    positions: (u8, u8),
    km_stones: (i64, i64),
    chainage: i64,
    placements: (i64, i64),
    side: PlotSide,
    ui_distances: (f64, f64),
) -> RowCase {
    let stones = match ordering {
        StoneOrdering::Stone1Greater => (9, 5),
        StoneOrdering::Stone1NotGreater => (5, 9),
    };
    let distance_from_plot1 = match regime {
        DistanceRegime::Short => 300,
        DistanceRegime::Long => 2350,
    };
    RowCase {
        regime,
        relation,
        ordering,
        stones,
        distance_from_plot1,
        positions,
        km_stones,
        chainage,
        placements,
        side,
        ui_distances,
    }
}

#[rustfmt::skip]
fn row_cases() -> Vec<RowCase> {
    use DistanceRegime::{Long, Short};
    use PlotSide::{Lhs, Rhs};
    use StoneOrdering::{Stone1Greater as Gt, Stone1NotGreater as Le};
    use StoneRelation::{LeftLeft as Aa, LeftRight as Ab, RightLeft as Ba, RightRight as Bb};

    // d2 = 400 and w = 20 throughout; the long regime rolls q = 2 with d1' = 350.
    vec![
        case(Short, Ab, Gt, (1, 2), (9, 8),   8,  (400, 380), Rhs, (405.0, 800.0)),
        case(Short, Ab, Le, (1, 2), (5, 6),   5,  (300, 320), Lhs, (405.0, 800.0)),
        case(Short, Ba, Gt, (2, 1), (8, 9),   8,  (380, 400), Lhs, (355.0, 750.0)),
        case(Short, Ba, Le, (2, 1), (6, 5),   5,  (320, 300), Rhs, (355.0, 750.0)),
        case(Short, Aa, Gt, (1, 1), (9, 10),  9,  (300, 320), Lhs, (405.0, 800.0)),
        case(Short, Aa, Le, (1, 1), (5, 4),   4,  (400, 380), Rhs, (405.0, 800.0)),
        case(Short, Bb, Gt, (2, 2), (10, 9),  9,  (320, 300), Rhs, (355.0, 750.0)),
        case(Short, Bb, Le, (2, 2), (4, 5),   4,  (380, 400), Lhs, (355.0, 750.0)),
        case(Long,  Ab, Gt, (1, 2), (7, 6),   6,  (400, 380), Rhs, (380.0, 800.0)),
        case(Long,  Ab, Le, (1, 2), (7, 8),   7,  (350, 370), Lhs, (380.0, 800.0)),
        case(Long,  Ba, Gt, (2, 1), (6, 7),   6,  (380, 400), Lhs, (355.0, 775.0)),
        case(Long,  Ba, Le, (2, 1), (8, 7),   7,  (370, 350), Rhs, (355.0, 775.0)),
        case(Long,  Aa, Gt, (1, 1), (11, 12), 11, (350, 370), Lhs, (380.0, 800.0)),
        case(Long,  Aa, Le, (1, 1), (3, 2),   2,  (400, 380), Rhs, (380.0, 800.0)),
        case(Long,  Bb, Gt, (2, 2), (12, 11), 12, (370, 350), Rhs, (355.0, 775.0)),
        case(Long,  Bb, Le, (2, 2), (2, 3),   2,  (380, 400), Lhs, (355.0, 775.0)),
    ]
}

#[test]
fn every_placement_rule_matches_its_expected_row() {
    let cases = row_cases();
    let covered: HashSet<_> = cases
        .iter()
        .map(|case| (case.regime, case.relation, case.ordering))
        .collect();
    assert_eq!(covered.len(), PLACEMENT_RULES.len());

    for case in &cases {
        let data = survey(case.stones, (case.distance_from_plot1, 400), 20, case.positions);
        let result = reconcile_survey(&data);
        let placement = result.placement;
        let row = (case.regime, case.relation, case.ordering);

        assert_eq!(
            (result.rule.regime, result.rule.relation, result.rule.ordering),
            row
        );
        assert_eq!((placement.km_stone1, placement.km_stone2), case.km_stones, "{row:?}");
        assert_eq!(placement.plot_chainage_number, case.chainage, "{row:?}");
        assert_eq!(
            (placement.plot_placement_a, placement.plot_placement_b),
            case.placements,
            "{row:?}"
        );
        assert_eq!(placement.plot_side, case.side, "{row:?}");
        assert_relative_eq!(result.offsets.km_stone1_ui_distance, case.ui_distances.0);
        assert_relative_eq!(result.offsets.km_stone2_ui_distance, case.ui_distances.1);
    }
}
