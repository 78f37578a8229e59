use crate::error::{ShantenError, ShantenResult};
use crate::hand::Hand;
use crate::tile::TileKind;
use std::sync::LazyLock;

/// 国士無双の13種（么九牌を1枚ずつ）
pub static THIRTEEN_ORPHANS: LazyLock<Hand> = LazyLock::new(kokushi_orphans);

fn kokushi_orphans() -> Hand {
    let mut v = Hand::empty();
    for k in TileKind::all().filter(|k| k.is_orphan()) {
        v.insert(k);
    }
    v
}

/// 七対子・国士は 13 枚か 14 枚の門前手でしか評価しない
fn require_full_hand(hand: &Hand) -> ShantenResult<()> {
    match hand.total() {
        13 | 14 => Ok(()),
        n => Err(ShantenError::InvalidHandSize {
            expected: "13 or 14 tiles",
            actual: n,
        }),
    }
}

/// `6 - kinds held twice or more`. A quad is still one kind.
pub fn seven_pairs_shanten(hand: &Hand) -> ShantenResult<i8> {
    require_full_hand(hand)?;
    let pairs = hand.iter().filter(|&(_, c)| c >= 2).count();
    Ok(6 - pairs as i8)
}

/// `(12 with a duplicate orphan, else 13) - distinct orphans held`
pub fn thirteen_orphans_shanten(hand: &Hand) -> ShantenResult<i8> {
    require_full_hand(hand)?;

    let overlap = hand.intersect(&THIRTEEN_ORPHANS);
    let has_duplicate = !hand.subtract(&overlap).intersect(&overlap).is_empty();
    let base = if has_duplicate { 12 } else { 13 };

    Ok(base - overlap.total() as i8)
}
