use crate::engine::{best_shanten, evaluate, Shanten, ShantenReport};
use crate::error::{ShantenError, ShantenResult};
use crate::hand::{Hand, MAX_COPIES};
use crate::meld::{Meld, MeldKind};
use crate::tile::TileKind;
use serde::Serialize;
use std::collections::BTreeSet;

/// Tile kinds another player's discard could be claimed with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Claims {
    pub chow: BTreeSet<TileKind>,
    pub pung: BTreeSet<TileKind>,
    pub kong: BTreeSet<TileKind>,
}

/// Whether `t` completes a chow with two concealed tiles of its suit.
pub fn can_claim_chow(hand: &Hand, t: TileKind) -> bool {
    if t.is_honor() {
        return false;
    }
    let held = |d: i8| t.offset(d).is_some_and(|k| hand.count(k) > 0);

    (held(-2) && held(-1)) || (held(-1) && held(1)) || (held(1) && held(2))
}

pub fn claimable_chow(hand: &Hand) -> BTreeSet<TileKind> {
    TileKind::all().filter(|&t| can_claim_chow(hand, t)).collect()
}

pub fn claimable_pung(hand: &Hand) -> BTreeSet<TileKind> {
    hand.iter()
        .filter(|&(_, c)| c >= 2)
        .map(|(k, _)| k)
        .collect()
}

/// 大明槓・暗槓（3枚か4枚）と加槓（ポン済み）の対象
pub fn claimable_kong(hand: &Hand, melds: &[Meld]) -> BTreeSet<TileKind> {
    let mut kong: BTreeSet<TileKind> = hand
        .iter()
        .filter(|&(_, c)| c >= 3)
        .map(|(k, _)| k)
        .collect();
    kong.extend(
        melds
            .iter()
            .filter(|m| m.kind() == MeldKind::Pung)
            .map(|m| m.first()),
    );
    kong
}

pub fn claims(hand: &Hand, melds: &[Meld]) -> Claims {
    Claims {
        chow: claimable_chow(hand),
        pung: claimable_pung(hand),
        kong: claimable_kong(hand, melds),
    }
}

/// A meld set aside from the concealed tiles. Only a concealed kong has
/// `open == false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeldCall {
    pub meld: Meld,
    pub open: bool,
}

/// Concealed tiles plus the melds already declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerHand {
    concealed: Hand,
    melds: Vec<MeldCall>,
}

impl PlayerHand {
    pub fn new(concealed: Hand, melds: Vec<MeldCall>) -> ShantenResult<Self> {
        let hand = PlayerHand { concealed, melds };
        for k in TileKind::all() {
            if hand.held(k) > MAX_COPIES as usize {
                return Err(ShantenError::invalid_hand(format!(
                    "more than {} copies of {}",
                    MAX_COPIES, k
                )));
            }
        }
        Ok(hand)
    }

    pub fn concealed(&self) -> &Hand {
        &self.concealed
    }

    pub fn melds(&self) -> &[MeldCall] {
        &self.melds
    }

    /// 門前か（暗槓は門前を崩さない）
    pub fn is_concealed(&self) -> bool {
        self.melds.iter().all(|m| !m.open)
    }

    pub fn draw(&mut self, t: TileKind) -> ShantenResult<()> {
        if self.held(t) >= MAX_COPIES as usize {
            return Err(ShantenError::invalid_hand(format!(
                "a fifth {} cannot be drawn",
                t
            )));
        }
        self.concealed.add(t)
    }

    pub fn discard(&mut self, t: TileKind) -> ShantenResult<()> {
        self.take(t, 1)
    }

    /// チー: `first` is the lowest tile of the resulting chow.
    pub fn claim_chow(&mut self, discard: TileKind, first: TileKind) -> ShantenResult<()> {
        let meld = Meld::chow(first).map_err(|e| ShantenError::illegal_claim(e.to_string()))?;
        if !meld.contains(discard) {
            return Err(ShantenError::illegal_claim(format!(
                "{} is not part of {}",
                discard, meld
            )));
        }
        self.check_claimed_copy(discard)?;

        let mut needed = meld.as_hand();
        needed.remove(discard)?;
        if !self.concealed.contains_subset(&needed) {
            return Err(ShantenError::illegal_claim(format!(
                "{} is not held for {}",
                needed, meld
            )));
        }
        self.concealed = self.concealed.subtract(&needed);
        self.melds.push(MeldCall { meld, open: true });
        Ok(())
    }

    /// ポン
    pub fn claim_pung(&mut self, discard: TileKind) -> ShantenResult<()> {
        self.check_claimed_copy(discard)?;
        self.take(discard, 2)?;
        self.melds.push(MeldCall {
            meld: Meld::pung(discard),
            open: true,
        });
        Ok(())
    }

    /// 大明槓
    pub fn claim_kong(&mut self, discard: TileKind) -> ShantenResult<()> {
        self.check_claimed_copy(discard)?;
        self.take(discard, 3)?;
        self.melds.push(MeldCall {
            meld: Meld::kong(discard),
            open: true,
        });
        Ok(())
    }

    /// 暗槓
    pub fn declare_concealed_kong(&mut self, t: TileKind) -> ShantenResult<()> {
        self.take(t, 4)?;
        self.melds.push(MeldCall {
            meld: Meld::kong(t),
            open: false,
        });
        Ok(())
    }

    /// 加槓: move a concealed copy onto an open pung.
    pub fn add_kong(&mut self, t: TileKind) -> ShantenResult<()> {
        let pos = self
            .melds
            .iter()
            .position(|m| m.meld.kind() == MeldKind::Pung && m.meld.first() == t)
            .ok_or_else(|| ShantenError::illegal_claim(format!("no pung of {}", t)))?;
        self.take(t, 1)?;
        self.melds[pos].meld = self.melds[pos].meld.extend_to_kong()?;
        Ok(())
    }

    pub fn can_claim_chow(&self, t: TileKind) -> bool {
        can_claim_chow(&self.concealed, t)
    }

    /// Recomputed from the current tiles on every call.
    pub fn claims(&self) -> Claims {
        let melds: Vec<Meld> = self.melds.iter().map(|m| m.meld).collect();
        claims(&self.concealed, &melds)
    }

    pub fn shanten(&self) -> ShantenResult<Shanten> {
        best_shanten(&self.concealed, self.is_concealed())
    }

    pub fn report(&self) -> ShantenResult<ShantenReport> {
        evaluate(&self.concealed, self.is_concealed())
    }

    /// Copies of `t` in the concealed tiles and the declared melds.
    fn held(&self, t: TileKind) -> usize {
        let in_melds: usize = self
            .melds
            .iter()
            .map(|m| m.meld.tiles().iter().filter(|&&k| k == t).count())
            .sum();
        self.concealed.count(t) as usize + in_melds
    }

    fn check_claimed_copy(&self, discard: TileKind) -> ShantenResult<()> {
        if self.held(discard) >= MAX_COPIES as usize {
            return Err(ShantenError::illegal_claim(format!(
                "all copies of {} are already held",
                discard
            )));
        }
        Ok(())
    }

    fn take(&mut self, t: TileKind, n: u8) -> ShantenResult<()> {
        if self.concealed.count(t) < n {
            return Err(ShantenError::illegal_claim(format!(
                "{} copies of {} needed, {} held",
                n,
                t,
                self.concealed.count(t)
            )));
        }
        for _ in 0..n {
            self.concealed.remove(t)?;
        }
        Ok(())
    }
}
