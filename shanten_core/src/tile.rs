use crate::error::{ShantenError, ShantenResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// 牌の種類数（数牌27 + 字牌7）
pub const NUM_KINDS: usize = 34;

const HONOR_BASE: u8 = 27;
const DRAGON_BASE: u8 = 31;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Characters, // 萬子
    Circles,    // 筒子
    Bamboos,    // 索子
}

impl Suit {
    pub const ALL: [Suit; 3] = [Suit::Characters, Suit::Circles, Suit::Bamboos];

    pub fn letter(self) -> char {
        match self {
            Suit::Characters => 'm',
            Suit::Circles => 'p',
            Suit::Bamboos => 's',
        }
    }

    fn from_letter(c: char) -> Option<Self> {
        match c {
            'm' => Some(Suit::Characters),
            'p' => Some(Suit::Circles),
            's' => Some(Suit::Bamboos),
            _ => None,
        }
    }

    const fn base(self) -> u8 {
        self as u8 * 9
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

impl Honor {
    pub const ALL: [Honor; 7] = [
        Honor::East,
        Honor::South,
        Honor::West,
        Honor::North,
        Honor::White,
        Honor::Green,
        Honor::Red,
    ];

    pub fn code(self) -> char {
        match self {
            Honor::East => 'E',
            Honor::South => 'S',
            Honor::West => 'W',
            Honor::North => 'N',
            Honor::White => 'P',
            Honor::Green => 'F',
            Honor::Red => 'C',
        }
    }

    /// ASCII コードと漢字表記の両方を受け付ける
    fn from_char(c: char) -> Option<Self> {
        match c {
            'E' | '東' => Some(Honor::East),
            'S' | '南' => Some(Honor::South),
            'W' | '西' => Some(Honor::West),
            'N' | '北' => Some(Honor::North),
            'P' | '白' => Some(Honor::White),
            'F' | '発' | '發' => Some(Honor::Green),
            'C' | '中' => Some(Honor::Red),
            _ => None,
        }
    }
}

/// The four independent groups a hand is decomposed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Group {
    Characters,
    Circles,
    Bamboos,
    Honors,
}

impl Group {
    pub const ALL: [Group; 4] = [
        Group::Characters,
        Group::Circles,
        Group::Bamboos,
        Group::Honors,
    ];

    pub fn suit(self) -> Option<Suit> {
        match self {
            Group::Characters => Some(Suit::Characters),
            Group::Circles => Some(Suit::Circles),
            Group::Bamboos => Some(Suit::Bamboos),
            Group::Honors => None,
        }
    }

    /// Tile kinds belonging to this group, in canonical order.
    pub fn kinds(self) -> impl Iterator<Item = TileKind> {
        let range = match self.suit() {
            Some(s) => s.base()..s.base() + 9,
            None => HONOR_BASE..NUM_KINDS as u8,
        };
        range.map(TileKind)
    }
}

impl From<Suit> for Group {
    fn from(s: Suit) -> Self {
        match s {
            Suit::Characters => Group::Characters,
            Suit::Circles => Group::Circles,
            Suit::Bamboos => Group::Bamboos,
        }
    }
}

/// One of the 34 tile kinds.
///
/// Index layout: 0-8 characters 1-9, 9-17 circles 1-9, 18-26 bamboos 1-9,
/// 27-30 winds (E S W N), 31-33 dragons (white green red). Ordering by index
/// is the canonical sort order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKind(u8);

impl TileKind {
    pub fn suited(suit: Suit, rank: u8) -> ShantenResult<Self> {
        if !(1..=9).contains(&rank) {
            return Err(ShantenError::invalid_hand(format!(
                "rank out of range: {}",
                rank
            )));
        }
        Ok(TileKind(suit.base() + rank - 1))
    }

    pub const fn honor(h: Honor) -> Self {
        TileKind(HONOR_BASE + h as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub fn all() -> impl Iterator<Item = TileKind> {
        (0..NUM_KINDS as u8).map(TileKind)
    }

    #[inline]
    pub const fn is_honor(self) -> bool {
        self.0 >= HONOR_BASE
    }

    #[inline]
    pub const fn is_wind(self) -> bool {
        self.0 >= HONOR_BASE && self.0 < DRAGON_BASE
    }

    #[inline]
    pub const fn is_dragon(self) -> bool {
        self.0 >= DRAGON_BASE
    }

    #[inline]
    pub const fn is_suited(self) -> bool {
        self.0 < HONOR_BASE
    }

    pub fn is_suit(self, suit: Suit) -> bool {
        self.suit() == Some(suit)
    }

    /// 老頭牌（数牌の1・9）
    #[inline]
    pub const fn is_terminal(self) -> bool {
        self.is_suited() && matches!(self.0 % 9, 0 | 8)
    }

    /// 中張牌（数牌の2-8）
    #[inline]
    pub const fn is_simple(self) -> bool {
        self.is_suited() && !self.is_terminal()
    }

    /// 么九牌（老頭牌 + 字牌）
    #[inline]
    pub const fn is_orphan(self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    pub fn suit(self) -> Option<Suit> {
        match self.0 / 9 {
            0 => Some(Suit::Characters),
            1 => Some(Suit::Circles),
            2 => Some(Suit::Bamboos),
            _ => None,
        }
    }

    /// Rank 1-9 of a suited tile; `None` for honors.
    pub fn rank(self) -> Option<u8> {
        self.is_suited().then_some(self.0 % 9 + 1)
    }

    pub fn as_honor(self) -> Option<Honor> {
        if self.is_honor() {
            Some(Honor::ALL[(self.0 - HONOR_BASE) as usize])
        } else {
            None
        }
    }

    /// Same-suit neighbour `delta` ranks away. Honors have no neighbours.
    pub fn offset(self, delta: i8) -> Option<Self> {
        let suit = self.suit()?;
        let rank = self.rank()? as i8 + delta;
        if (1..=9).contains(&rank) {
            Some(TileKind(suit.base() + rank as u8 - 1))
        } else {
            None
        }
    }

    /// `"1m"`..`"9s"`, `"E"`/`"東"` など1枚分のコードを変換する
    pub fn from_code(code: &str) -> ShantenResult<Self> {
        let mut chars = code.chars();
        let (first, second) = match (chars.next(), chars.next(), chars.next()) {
            (Some(a), b, None) => (a, b),
            _ => return Err(ShantenError::parse(code, "invalid tile code")),
        };

        match second {
            None => Honor::from_char(first)
                .map(TileKind::honor)
                .ok_or_else(|| ShantenError::parse(code, "invalid honor")),
            Some(letter) => {
                let suit = Suit::from_letter(letter)
                    .ok_or_else(|| ShantenError::parse(code, "invalid suit"))?;
                let rank = parse_rank(first).ok_or_else(|| ShantenError::parse(code, "invalid number"))?;
                TileKind::suited(suit, rank)
            }
        }
    }
}

/// 赤5（"0"）は通常の5として扱う
fn parse_rank(c: char) -> Option<u8> {
    match c.to_digit(10)? {
        0 => Some(5),
        n => Some(n as u8),
    }
}

impl TryFrom<u8> for TileKind {
    type Error = ShantenError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        if (id as usize) < NUM_KINDS {
            Ok(TileKind(id))
        } else {
            Err(ShantenError::invalid_hand(format!("unknown tile kind: {}", id)))
        }
    }
}

impl FromStr for TileKind {
    type Err = ShantenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TileKind::from_code(s)
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.suit() {
            Some(suit) => write!(f, "{}{}", self.0 % 9 + 1, suit.letter()),
            None => write!(f, "{}", Honor::ALL[(self.0 - HONOR_BASE) as usize].code()),
        }
    }
}

impl fmt::Debug for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl Serialize for TileKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)
    }
}

/// Parse a compact pattern such as `"3899m3457p88s南白発"` or `"123m EEE"`.
///
/// Digits accumulate until a suit letter closes the run; honors are single
/// characters. Whitespace is ignored.
pub fn parse_tiles(pattern: &str) -> ShantenResult<Vec<TileKind>> {
    let mut tiles = vec![];
    let mut pending: Vec<u8> = vec![];

    for c in pattern.chars() {
        if c.is_whitespace() {
            continue;
        }
        if let Some(rank) = parse_rank(c) {
            pending.push(rank);
            continue;
        }
        if let Some(suit) = Suit::from_letter(c) {
            if pending.is_empty() {
                return Err(ShantenError::parse(pattern, format!("suit '{}' without numbers", c)));
            }
            for rank in pending.drain(..) {
                tiles.push(TileKind::suited(suit, rank)?);
            }
            continue;
        }
        if let Some(h) = Honor::from_char(c) {
            if !pending.is_empty() {
                return Err(ShantenError::parse(pattern, "numbers without a suit"));
            }
            tiles.push(TileKind::honor(h));
            continue;
        }
        return Err(ShantenError::parse(pattern, format!("unexpected character '{}'", c)));
    }

    if !pending.is_empty() {
        return Err(ShantenError::parse(pattern, "numbers without a suit"));
    }
    Ok(tiles)
}

/// Inverse of [`parse_tiles`], in canonical order with ASCII honor codes.
pub fn format_tiles(tiles: &[TileKind]) -> String {
    let mut sorted = tiles.to_vec();
    sorted.sort();

    let mut out = String::new();
    for suit in Suit::ALL {
        let ranks: Vec<u8> = sorted
            .iter()
            .filter(|t| t.is_suit(suit))
            .filter_map(|t| t.rank())
            .collect();
        if ranks.is_empty() {
            continue;
        }
        for r in ranks {
            out.push(char::from(b'0' + r));
        }
        out.push(suit.letter());
    }
    for h in sorted.iter().filter_map(|t| t.as_honor()) {
        out.push(h.code());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(code: &str) -> TileKind {
        TileKind::from_code(code).unwrap()
    }

    #[test]
    fn every_kind_has_exactly_one_class() {
        for k in TileKind::all() {
            let classes = [k.is_terminal(), k.is_simple(), k.is_honor()];
            assert_eq!(classes.iter().filter(|&&c| c).count(), 1, "{}", k);

            let groups = [
                k.is_suit(Suit::Characters),
                k.is_suit(Suit::Circles),
                k.is_suit(Suit::Bamboos),
                k.is_wind(),
                k.is_dragon(),
            ];
            assert_eq!(groups.iter().filter(|&&g| g).count(), 1, "{}", k);
        }
    }

    #[test]
    fn terminals_and_simples() {
        let flags: Vec<bool> = Group::Characters.kinds().map(|k| k.is_terminal()).collect();
        assert_eq!(
            flags,
            vec![true, false, false, false, false, false, false, false, true]
        );
        assert!(t("5p").is_simple());
        assert!(!t("9s").is_simple());
        assert!(!t("C").is_simple());
        assert!(t("1s").is_orphan());
        assert!(t("N").is_orphan());
    }

    #[test]
    fn rank_of_suited_and_honor() {
        assert_eq!(t("1m").rank(), Some(1));
        assert_eq!(t("2p").rank(), Some(2));
        assert_eq!(t("3s").rank(), Some(3));
        assert_eq!(t("E").rank(), None);
    }

    #[test]
    fn code_round_trip() {
        for k in TileKind::all() {
            assert_eq!(t(&k.to_string()), k);
        }
        assert_eq!(t("東"), TileKind::honor(Honor::East));
        assert_eq!(t("発"), TileKind::honor(Honor::Green));
        assert_eq!(t("0p"), t("5p"));
    }

    #[test]
    fn invalid_codes() {
        assert!(TileKind::from_code("").is_err());
        assert!(TileKind::from_code("1x").is_err());
        assert!(TileKind::from_code("X").is_err());
        assert!(TileKind::from_code("11m").is_err());
        assert!(TileKind::try_from(34u8).is_err());
        assert!(TileKind::try_from(33u8).is_ok());
    }

    #[test]
    fn offsets_stay_in_suit() {
        assert_eq!(t("8m").offset(1), Some(t("9m")));
        assert_eq!(t("9m").offset(1), None);
        assert_eq!(t("1p").offset(-1), None);
        assert_eq!(t("3s").offset(-2), Some(t("1s")));
        assert_eq!(t("E").offset(1), None);
    }

    #[test]
    fn parse_pattern() {
        let tiles = parse_tiles("3899m3457p88s南白発").unwrap();
        assert_eq!(tiles.len(), 13);
        assert_eq!(tiles[0], t("3m"));
        assert_eq!(tiles[10], t("S"));
        assert_eq!(tiles[12], t("F"));

        assert_eq!(parse_tiles("123m EEE").unwrap().len(), 6);
        assert!(parse_tiles("123").is_err());
        assert!(parse_tiles("12E").is_err());
        assert!(parse_tiles("m").is_err());
        assert!(parse_tiles("1z").is_err());
    }

    #[test]
    fn format_is_canonical() {
        let tiles = parse_tiles("中1s白東1p発1m").unwrap();
        assert_eq!(format_tiles(&tiles), "1m1p1sEPFC");
        assert_eq!(format_tiles(&parse_tiles("3899m3457p88sSPF").unwrap()), "3899m3457p88sSPF");
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&vec![t("7p"), t("W")]).unwrap();
        assert_eq!(json, r#"["7p","W"]"#);
        let back: Vec<TileKind> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![t("7p"), t("W")]);
        assert!(serde_json::from_str::<TileKind>(r#""0z""#).is_err());
    }
}
