use crate::decompose::standard_shanten;
use crate::error::ShantenResult;
use crate::hand::Hand;
use crate::special::{seven_pairs_shanten, thirteen_orphans_shanten};
use serde::Serialize;

/// Winning shape a shanten number was measured against.
///
/// Declaration order is also the tie-break order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Standard,        // 4面子1雀頭
    SevenPairs,      // 七対子
    ThirteenOrphans, // 国士無双
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shanten {
    pub value: i8,
    pub shape: Shape,
}

/// Per-shape results. The special shapes are `None` when they were not
/// evaluated at all (open hand, or not 13/14 tiles).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ShantenReport {
    pub standard: i8,
    pub seven_pairs: Option<i8>,
    pub thirteen_orphans: Option<i8>,
}

impl ShantenReport {
    /// Minimum over the evaluated shapes; the earlier shape wins a tie.
    pub fn best(&self) -> Shanten {
        let mut best = Shanten {
            value: self.standard,
            shape: Shape::Standard,
        };
        let candidates = [
            (self.seven_pairs, Shape::SevenPairs),
            (self.thirteen_orphans, Shape::ThirteenOrphans),
        ];
        for (value, shape) in candidates {
            if let Some(v) = value {
                if v < best.value {
                    best = Shanten { value: v, shape };
                }
            }
        }
        best
    }
}

/// Evaluate every shape that applies to `hand`.
///
/// `concealed` is false once the player has an open meld. The standard shape
/// is always evaluated first, so a hand that is not 3n+1 tiles (a 14-tile
/// hand included) fails with `InvalidHandSize` before the special shapes
/// are looked at.
pub fn evaluate(hand: &Hand, concealed: bool) -> ShantenResult<ShantenReport> {
    let standard = standard_shanten(hand)?;

    let specials_apply = concealed && matches!(hand.total(), 13 | 14);
    let (seven_pairs, thirteen_orphans) = if specials_apply {
        (
            Some(seven_pairs_shanten(hand)?),
            Some(thirteen_orphans_shanten(hand)?),
        )
    } else {
        (None, None)
    };

    Ok(ShantenReport {
        standard,
        seven_pairs,
        thirteen_orphans,
    })
}

pub fn best_shanten(hand: &Hand, concealed: bool) -> ShantenResult<Shanten> {
    Ok(evaluate(hand, concealed)?.best())
}
