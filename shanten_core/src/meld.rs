use crate::error::{ShantenError, ShantenResult};
use crate::hand::Hand;
use crate::tile::{format_tiles, Group, Suit, TileKind};
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    Chow, // 順子
    Pung, // 刻子
    Kong, // 槓子
}

impl MeldKind {
    /// Pung or chow for three tiles; `None` if they form neither.
    pub fn classify(tiles: [TileKind; 3]) -> Option<MeldKind> {
        let mut t = tiles;
        t.sort();

        if t[0] == t[1] && t[1] == t[2] {
            return Some(MeldKind::Pung);
        }
        if t[0].offset(1) == Some(t[1]) && t[1].offset(1) == Some(t[2]) {
            return Some(MeldKind::Chow);
        }
        None
    }
}

/// A committed group, identified by its kind and lowest tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Meld {
    kind: MeldKind,
    first: TileKind,
}

impl Meld {
    pub fn pung(t: TileKind) -> Self {
        Meld {
            kind: MeldKind::Pung,
            first: t,
        }
    }

    pub fn kong(t: TileKind) -> Self {
        Meld {
            kind: MeldKind::Kong,
            first: t,
        }
    }

    /// Chow starting at `first`; fails for honors and ranks 8-9.
    pub fn chow(first: TileKind) -> ShantenResult<Self> {
        if first.offset(2).is_none() {
            return Err(ShantenError::invalid_hand(format!(
                "no chow starts at {}",
                first
            )));
        }
        Ok(Meld {
            kind: MeldKind::Chow,
            first,
        })
    }

    /// 3枚なら刻子/順子、同一4枚なら槓子
    pub fn from_tiles(tiles: &[TileKind]) -> ShantenResult<Self> {
        match *tiles {
            [a, b, c] => {
                let first = a.min(b).min(c);
                match MeldKind::classify([a, b, c]) {
                    Some(MeldKind::Chow) => Meld::chow(first),
                    Some(_) => Ok(Meld::pung(first)),
                    None => Err(ShantenError::invalid_hand(format!(
                        "{} is not a meld",
                        format_tiles(tiles)
                    ))),
                }
            }
            [a, b, c, d] if a == b && b == c && c == d => Ok(Meld::kong(a)),
            _ => Err(ShantenError::invalid_hand(format!(
                "{} is not a meld",
                format_tiles(tiles)
            ))),
        }
    }

    pub fn kind(&self) -> MeldKind {
        self.kind
    }

    pub fn first(&self) -> TileKind {
        self.first
    }

    pub fn tiles(&self) -> Vec<TileKind> {
        match self.kind {
            MeldKind::Pung => vec![self.first; 3],
            MeldKind::Kong => vec![self.first; 4],
            MeldKind::Chow => (0..3).filter_map(|d| self.first.offset(d)).collect(),
        }
    }

    pub fn as_hand(&self) -> Hand {
        let mut hand = Hand::empty();
        for t in self.tiles() {
            hand.insert(t);
        }
        hand
    }

    pub fn contains(&self, t: TileKind) -> bool {
        self.tiles().contains(&t)
    }

    /// 加槓: an exposed pung becomes a kong.
    pub fn extend_to_kong(&self) -> ShantenResult<Meld> {
        match self.kind {
            MeldKind::Pung => Ok(Meld::kong(self.first)),
            _ => Err(ShantenError::illegal_claim(format!(
                "{} is not a pung",
                self
            ))),
        }
    }
}

impl fmt::Display for Meld {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tiles(&self.tiles()))
    }
}

/// Classification of a two-tile partial group by rank gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PairKind {
    SimplePair,          // 対子
    SerialPair,          // 両面搭子
    TerminalSerialPair,  // 辺張搭子
    SeparatedSerialPair, // 嵌張搭子
    Unrelated,           // 無関係
}

impl PairKind {
    pub fn classify(a: TileKind, b: TileKind) -> PairKind {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if low == high {
            return PairKind::SimplePair;
        }
        if low.suit().is_none() || low.suit() != high.suit() {
            return PairKind::Unrelated;
        }

        let (lr, hr) = match (low.rank(), high.rank()) {
            (Some(l), Some(h)) => (l, h),
            _ => return PairKind::Unrelated,
        };
        match hr - lr {
            1 if lr == 1 || hr == 9 => PairKind::TerminalSerialPair,
            1 => PairKind::SerialPair,
            2 => PairKind::SeparatedSerialPair,
            _ => PairKind::Unrelated,
        }
    }
}

/// Two tiles one step away from a meld (or the eyes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Partial {
    low: TileKind,
    high: TileKind,
}

impl Partial {
    pub fn new(a: TileKind, b: TileKind) -> Self {
        if a <= b {
            Partial { low: a, high: b }
        } else {
            Partial { low: b, high: a }
        }
    }

    /// Terminal reclassification happens here, not in the tables.
    pub fn kind(&self) -> PairKind {
        PairKind::classify(self.low, self.high)
    }

    /// 雀頭になりうる対子か
    pub fn is_eyes(&self) -> bool {
        self.low == self.high
    }

    pub fn tiles(&self) -> [TileKind; 2] {
        [self.low, self.high]
    }

    pub fn as_hand(&self) -> Hand {
        let mut hand = Hand::empty();
        hand.insert(self.low);
        hand.insert(self.high);
        hand
    }

    /// Tile kinds that would turn this partial into a meld.
    pub fn completions(&self) -> Vec<TileKind> {
        match self.kind() {
            PairKind::SimplePair => vec![self.low],
            PairKind::SerialPair | PairKind::TerminalSerialPair => {
                [self.low.offset(-1), self.high.offset(1)]
                    .into_iter()
                    .flatten()
                    .collect()
            }
            PairKind::SeparatedSerialPair => self.low.offset(1).into_iter().collect(),
            PairKind::Unrelated => vec![],
        }
    }
}

impl fmt::Display for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_tiles(&self.tiles()))
    }
}

// ===== 全面子・全搭子の静的テーブル（Group の順に並ぶ） =====

static MELD_TABLES: LazyLock<[Vec<Meld>; 4]> =
    LazyLock::new(|| Group::ALL.map(build_melds));

static PAIR_TABLES: LazyLock<[Vec<Partial>; 4]> =
    LazyLock::new(|| Group::ALL.map(build_pairs));

/// 111, 123, 222, 234, ..., 777, 789, 888, 999 / 字牌は刻子のみ
fn build_melds(group: Group) -> Vec<Meld> {
    let kinds: Vec<TileKind> = group.kinds().collect();
    let mut melds = vec![];
    for (i, &k) in kinds.iter().enumerate() {
        melds.push(Meld::pung(k));
        if group != Group::Honors && i + 2 < kinds.len() {
            melds.push(Meld {
                kind: MeldKind::Chow,
                first: k,
            });
        }
    }
    melds
}

/// 11, 12, 13, 22, 23, 24, ..., 88, 89, 99 / 字牌は対子のみ
fn build_pairs(group: Group) -> Vec<Partial> {
    let kinds: Vec<TileKind> = group.kinds().collect();
    let mut pairs = vec![];
    for (i, &k) in kinds.iter().enumerate() {
        pairs.push(Partial::new(k, k));
        if group == Group::Honors {
            continue;
        }
        for gap in 1..=2 {
            if let Some(&other) = kinds.get(i + gap) {
                pairs.push(Partial::new(k, other));
            }
        }
    }
    pairs
}

pub fn melds_for(group: Group) -> &'static [Meld] {
    &MELD_TABLES[group as usize]
}

pub fn pairs_for(group: Group) -> &'static [Partial] {
    &PAIR_TABLES[group as usize]
}

/// The 16 canonical melds of one suit (9 pungs, 7 chows), pung before chow per rank.
pub fn all_melds_for_suit(suit: Suit) -> &'static [Meld] {
    melds_for(suit.into())
}

/// The 7 honor pungs.
pub fn all_melds_for_honors() -> &'static [Meld] {
    melds_for(Group::Honors)
}

/// The 24 canonical partials of one suit (9 pairs, 8 gap 1, 7 gap 2), in rank order.
pub fn all_pairs_for_suit(suit: Suit) -> &'static [Partial] {
    pairs_for(suit.into())
}

/// The 7 honor pairs.
pub fn all_pairs_for_honors() -> &'static [Partial] {
    pairs_for(Group::Honors)
}

/// Every kind held three or more times, once each.
pub fn possible_pungs(hand: &Hand) -> Vec<Meld> {
    hand.iter()
        .filter(|&(_, c)| c >= 3)
        .map(|(k, _)| Meld::pung(k))
        .collect()
}

/// Every chow the hand contains, repeated by how many disjoint copies it holds.
pub fn possible_chows(hand: &Hand) -> Vec<Meld> {
    let mut chows = vec![];
    for suit in Suit::ALL {
        for m in all_melds_for_suit(suit) {
            if m.kind != MeldKind::Chow {
                continue;
            }
            let copies = m.tiles().iter().map(|&t| hand.count(t)).min().unwrap_or(0);
            chows.extend(std::iter::repeat(*m).take(copies as usize));
        }
    }
    chows
}
