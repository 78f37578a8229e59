use crate::error::{ShantenError, ShantenResult};
use crate::tile::{format_tiles, parse_tiles, Group, TileKind, NUM_KINDS};
use std::fmt;
use std::str::FromStr;

/// 1種あたりの最大枚数
pub const MAX_COPIES: u8 = 4;

/// A multiset of tile kinds: a count in `0..=4` per kind.
///
/// Every operation returns a fresh value; nothing here mutates a hand that
/// another evaluation might be reading.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand {
    counts: [u8; NUM_KINDS],
}

impl Hand {
    pub const fn empty() -> Self {
        Hand {
            counts: [0; NUM_KINDS],
        }
    }

    /// Build from raw per-kind counts (index = tile kind id).
    pub fn from_counts(counts: &[u8]) -> ShantenResult<Self> {
        if counts.len() != NUM_KINDS {
            return Err(ShantenError::invalid_hand(format!(
                "expected {} counts, got {}",
                NUM_KINDS,
                counts.len()
            )));
        }
        let mut hand = Hand::empty();
        for (i, &c) in counts.iter().enumerate() {
            if c > MAX_COPIES {
                return Err(ShantenError::invalid_hand(format!(
                    "{} copies of kind {}",
                    c, i
                )));
            }
            hand.counts[i] = c;
        }
        Ok(hand)
    }

    pub fn from_tiles<I>(tiles: I) -> ShantenResult<Self>
    where
        I: IntoIterator<Item = TileKind>,
    {
        let mut hand = Hand::empty();
        for t in tiles {
            hand.add(t)?;
        }
        Ok(hand)
    }

    #[inline]
    pub fn count(&self, t: TileKind) -> u8 {
        self.counts[t.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    /// Number of kinds held at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn add(&mut self, t: TileKind) -> ShantenResult<()> {
        let c = &mut self.counts[t.index()];
        if *c >= MAX_COPIES {
            return Err(ShantenError::invalid_hand(format!(
                "more than {} copies of {}",
                MAX_COPIES, t
            )));
        }
        *c += 1;
        Ok(())
    }

    /// Increment without the copy check, for the static meld/pair tables.
    pub(crate) fn insert(&mut self, t: TileKind) {
        debug_assert!(self.counts[t.index()] < MAX_COPIES);
        self.counts[t.index()] += 1;
    }

    pub fn remove(&mut self, t: TileKind) -> ShantenResult<()> {
        let c = &mut self.counts[t.index()];
        if *c == 0 {
            return Err(ShantenError::invalid_hand(format!("{} is not in hand", t)));
        }
        *c -= 1;
        Ok(())
    }

    /// Per-kind minimum.
    pub fn intersect(&self, other: &Hand) -> Hand {
        self.zip_with(other, |a, b| a.min(b))
    }

    /// Per-kind difference, clamped at zero.
    pub fn subtract(&self, other: &Hand) -> Hand {
        self.zip_with(other, |a, b| a.saturating_sub(b))
    }

    /// Per-kind maximum.
    pub fn union(&self, other: &Hand) -> Hand {
        self.zip_with(other, |a, b| a.max(b))
    }

    pub fn contains_subset(&self, other: &Hand) -> bool {
        self.intersect(other) == *other
    }

    /// Only the tiles of one group.
    pub fn restrict(&self, group: Group) -> Hand {
        let mut part = Hand::empty();
        for k in group.kinds() {
            part.counts[k.index()] = self.counts[k.index()];
        }
        part
    }

    /// Held kinds with their counts, in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (TileKind, u8)> + '_ {
        TileKind::all()
            .map(move |k| (k, self.counts[k.index()]))
            .filter(|&(_, c)| c > 0)
    }

    /// Expanded, sorted tile list.
    pub fn tiles(&self) -> Vec<TileKind> {
        let mut v = Vec::with_capacity(self.total());
        for (k, c) in self.iter() {
            v.extend(std::iter::repeat(k).take(c as usize));
        }
        v
    }

    fn zip_with(&self, other: &Hand, f: impl Fn(u8, u8) -> u8) -> Hand {
        let mut out = Hand::empty();
        for i in 0..NUM_KINDS {
            out.counts[i] = f(self.counts[i], other.counts[i]);
        }
        out
    }
}

impl Default for Hand {
    fn default() -> Self {
        Hand::empty()
    }
}

impl FromStr for Hand {
    type Err = ShantenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hand::from_tiles(parse_tiles(s)?)
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tiles(&self.tiles()))
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hand({})", self)
    }
}
