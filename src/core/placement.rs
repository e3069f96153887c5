//! Kilometer-stone placement rules.
//!
//! Every survey configuration maps to exactly one row of [`PLACEMENT_RULES`],
//! keyed by distance regime, stone-position relation and stone-number ordering.

use serde::{Deserialize, Serialize};

use super::survey::StonePosition;

/// Distance from stone 1 at which the plot rolls over into further stones.
pub const LONG_REGIME_THRESHOLD: i64 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceRegime {
    /// `distanceFromPlot1 < 1000`: distances are used as-is.
    Short,
    /// `distanceFromPlot1 >= 1000`: the remainder is placed and the whole
    /// thousands shift the stone numbers.
    Long,
}

impl DistanceRegime {
    #[must_use]
    pub fn classify(distance_from_plot1: i64) -> Self {
        if distance_from_plot1 < LONG_REGIME_THRESHOLD {
            Self::Short
        } else {
            Self::Long
        }
    }

    /// Splits the stone-1 distance into `(rolled_stones, remaining_distance)`.
    #[must_use]
    pub fn split_distance(self, distance_from_plot1: i64) -> (i64, i64) {
        match self {
            Self::Short => (0, distance_from_plot1),
            Self::Long => (
                distance_from_plot1.div_euclid(LONG_REGIME_THRESHOLD),
                distance_from_plot1.rem_euclid(LONG_REGIME_THRESHOLD),
            ),
        }
    }
}

/// Where the two nearest stones sit relative to the city/origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoneRelation {
    /// Stone 1 left, stone 2 right (`AB`).
    LeftRight,
    /// Stone 1 right, stone 2 left (`BA`).
    RightLeft,
    /// Both left (`AA`).
    LeftLeft,
    /// Both right (`BB`), also used for any unknown combination.
    RightRight,
}

impl StoneRelation {
    #[must_use]
    pub fn classify(position1: Option<StonePosition>, position2: Option<StonePosition>) -> Self {
        use StonePosition::{LeftOfOrigin, RightOfOrigin};

        match (position1, position2) {
            (Some(LeftOfOrigin), Some(RightOfOrigin)) => Self::LeftRight,
            (Some(RightOfOrigin), Some(LeftOfOrigin)) => Self::RightLeft,
            (Some(LeftOfOrigin), Some(LeftOfOrigin)) => Self::LeftLeft,
            _ => Self::RightRight,
        }
    }

    /// Distances drawn next to stone 1 and stone 2 on the canvas.
    #[must_use]
    pub fn ui_anchors(self) -> (DistanceAnchor, DistanceAnchor) {
        match self {
            Self::LeftRight | Self::LeftLeft => (DistanceAnchor::Stone1, DistanceAnchor::Stone2),
            Self::RightLeft | Self::RightRight => {
                (DistanceAnchor::Stone2, DistanceAnchor::Stone1)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoneOrdering {
    Stone1Greater,
    Stone1NotGreater,
}

impl StoneOrdering {
    #[must_use]
    pub fn classify(nearest_stone1: i64, nearest_stone2: i64) -> Self {
        if nearest_stone1 > nearest_stone2 {
            Self::Stone1Greater
        } else {
            Self::Stone1NotGreater
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StoneRef {
    Stone1,
    Stone2,
}

/// Survey distance a value is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceAnchor {
    /// `distanceFromPlot1`, reduced modulo 1000 in the long regime.
    Stone1,
    /// `distanceFromPlot2`.
    Stone2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlotSide {
    #[default]
    #[serde(rename = "LHS")]
    Lhs,
    #[serde(rename = "RHS")]
    Rhs,
}

impl PlotSide {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lhs => "LHS",
            Self::Rhs => "RHS",
        }
    }

    #[must_use]
    pub fn chainage_order(self) -> ChainageOrder {
        match self {
            Self::Lhs => ChainageOrder::Ascending,
            Self::Rhs => ChainageOrder::Descending,
        }
    }
}

/// Direction in which plot numbering increases on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChainageOrder {
    #[default]
    Ascending,
    Descending,
}

impl ChainageOrder {
    #[must_use]
    pub fn sign(self) -> i8 {
        match self {
            Self::Ascending => 1,
            Self::Descending => -1,
        }
    }
}

/// One row of the placement table.
///
/// With `n1 = nearestStoneNo1`, `q` the rolled thousands and `w = plotWidth`:
/// `KMStone1 = n1 + stone1_roll * q + stone1_offset`,
/// `KMStone2 = KMStone1 + stone2_step`,
/// `plotPlacementA = anchor + placement_a_widths * w` and likewise for B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRule {
    pub regime: DistanceRegime,
    pub relation: StoneRelation,
    pub ordering: StoneOrdering,
    pub stone1_roll: i64,
    pub stone1_offset: i64,
    pub stone2_step: i64,
    pub chainage_from: StoneRef,
    pub anchor: DistanceAnchor,
    pub placement_a_widths: i64,
    pub placement_b_widths: i64,
    pub side: PlotSide,
}

#[allow(clippy::too_many_arguments)]
const fn rule(
    regime: DistanceRegime,
    relation: StoneRelation,
    ordering: StoneOrdering,
    stone1_roll: i64,
    stone1_offset: i64,
    stone2_step: i64,
    chainage_from: StoneRef,
    anchor: DistanceAnchor,
    placement_widths: (i64, i64),
    side: PlotSide,
) -> PlacementRule {
    PlacementRule {
        regime,
        relation,
        ordering,
        stone1_roll,
        stone1_offset,
        stone2_step,
        chainage_from,
        anchor,
        placement_a_widths: placement_widths.0,
        placement_b_widths: placement_widths.1,
        side,
    }
}

use DistanceAnchor as D;
use DistanceRegime::{Long, Short};
use PlotSide::{Lhs, Rhs};
use StoneOrdering::{Stone1Greater as Gt, Stone1NotGreater as Le};
use StoneRef::{Stone1 as K1, Stone2 as K2};
use StoneRelation::{LeftLeft as Aa, LeftRight as Ab, RightLeft as Ba, RightRight as Bb};

/// Rows are ordered so that [`placement_rule`] can index them directly.
#[rustfmt::skip]
pub static PLACEMENT_RULES: [PlacementRule; 16] = [
    //   regime rel  order roll off step chain anchor     (A, B)    side
    rule(Short, Ab, Gt,  0,  0, -1, K2, D::Stone2, (0, -1), Rhs),
    rule(Short, Ab, Le,  0,  0,  1, K1, D::Stone1, (0, 1),  Lhs),
    rule(Short, Ba, Gt,  0, -1,  1, K1, D::Stone2, (-1, 0), Lhs),
    rule(Short, Ba, Le,  0,  1, -1, K2, D::Stone1, (1, 0),  Rhs),
    rule(Short, Aa, Gt,  0,  0,  1, K1, D::Stone1, (0, 1),  Lhs),
    rule(Short, Aa, Le,  0,  0, -1, K2, D::Stone2, (0, -1), Rhs),
    rule(Short, Bb, Gt,  0,  1, -1, K2, D::Stone1, (1, 0),  Rhs),
    rule(Short, Bb, Le,  0, -1,  1, K1, D::Stone2, (-1, 0), Lhs),
    rule(Long,  Ab, Gt, -1,  0, -1, K2, D::Stone2, (0, -1), Rhs),
    rule(Long,  Ab, Le,  1,  0,  1, K1, D::Stone1, (0, 1),  Lhs),
    rule(Long,  Ba, Gt, -1, -1,  1, K1, D::Stone2, (-1, 0), Lhs),
    rule(Long,  Ba, Le,  1,  1, -1, K2, D::Stone1, (1, 0),  Rhs),
    rule(Long,  Aa, Gt,  1,  0,  1, K1, D::Stone1, (0, 1),  Lhs),
    rule(Long,  Aa, Le, -1,  0, -1, K2, D::Stone2, (0, -1), Rhs),
    rule(Long,  Bb, Gt,  1,  1, -1, K1, D::Stone1, (1, 0),  Rhs),
    rule(Long,  Bb, Le, -1, -1,  1, K1, D::Stone2, (-1, 0), Lhs),
];

/// Looks up the rule for a classified survey configuration.
#[must_use]
pub fn placement_rule(
    regime: DistanceRegime,
    relation: StoneRelation,
    ordering: StoneOrdering,
) -> &'static PlacementRule {
    let regime_index = match regime {
        Short => 0,
        Long => 1,
    };
    let relation_index = match relation {
        Ab => 0,
        Ba => 1,
        Aa => 2,
        Bb => 3,
    };
    let ordering_index = match ordering {
        Gt => 0,
        Le => 1,
    };
    &PLACEMENT_RULES[regime_index * 8 + relation_index * 2 + ordering_index]
}
