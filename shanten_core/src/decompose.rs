use crate::error::{ShantenError, ShantenResult};
use crate::hand::Hand;
use crate::meld::{melds_for, pairs_for, Meld, Partial};
use crate::tile::Group;

/// 搭子・対子として数える上限（面子枠4つ分）
const PARTIAL_CAP: usize = 4;

/// What the greedy strip found in one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupDecomposition {
    pub group: Group,
    pub melds: Vec<Meld>,
    pub partials: Vec<Partial>,
    /// 孤立牌（面子にも搭子にもならなかった残り）
    pub residue: Hand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub num_tiles: usize,
    pub groups: Vec<GroupDecomposition>,
}

impl Decomposition {
    pub fn meld_count(&self) -> usize {
        self.groups.iter().map(|g| g.melds.len()).sum()
    }

    pub fn partial_count(&self) -> usize {
        self.groups.iter().map(|g| g.partials.len()).sum()
    }

    /// `2*(n-1)/3 - 2*melds - min(4, partials)`
    ///
    /// 13, 10, 7, 4, 1 tiles start from 8, 6, 4, 2, 0. The 4-cap covers the
    /// eyes too; there is no separate slot for the pair.
    pub fn shanten(&self) -> i8 {
        if self.num_tiles == 1 {
            return 0;
        }
        let base = (2 * (self.num_tiles - 1) / 3) as i8;
        base - 2 * self.meld_count() as i8 - self.partial_count().min(PARTIAL_CAP) as i8
    }
}

/// Strip melds, then partials, from one group of `hand`.
///
/// Both passes walk the canonical tables in order and take each entry as
/// many times as it still fits. This is a fixed-order heuristic and can miss
/// a better split on rare shapes.
pub fn decompose_group(hand: &Hand, group: Group) -> GroupDecomposition {
    let mut residue = hand.restrict(group);
    let melds = strip(&mut residue, melds_for(group), Meld::as_hand);
    let partials = strip(&mut residue, pairs_for(group), Partial::as_hand);

    GroupDecomposition {
        group,
        melds,
        partials,
        residue,
    }
}

/// Decompose a concealed portion of 3n+1 tiles over all four groups.
pub fn decompose(hand: &Hand) -> ShantenResult<Decomposition> {
    let num_tiles = hand.total();
    if num_tiles % 3 != 1 {
        return Err(ShantenError::InvalidHandSize {
            expected: "3n+1 tiles",
            actual: num_tiles,
        });
    }

    let groups = Group::ALL
        .iter()
        .map(|&g| decompose_group(hand, g))
        .collect();

    Ok(Decomposition { num_tiles, groups })
}

/// 標準形（4面子1雀頭）の向聴数
pub fn standard_shanten(hand: &Hand) -> ShantenResult<i8> {
    Ok(decompose(hand)?.shanten())
}

/// 先頭から順に、含まれている間は取り除き続ける
fn strip<T: Copy>(residue: &mut Hand, table: &[T], as_hand: impl Fn(&T) -> Hand) -> Vec<T> {
    let mut found = vec![];
    for item in table {
        let shape = as_hand(item);
        while residue.contains_subset(&shape) {
            *residue = residue.subtract(&shape);
            found.push(*item);
        }
    }
    found
}
