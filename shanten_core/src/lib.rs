use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeldType {
    CHI,
    PON,
    MINKAN,
    ANKAN,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalledMeld {
    #[serde(rename = "type")]
    pub meld_type: MeldType,
    pub tiles: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    /// 手牌（副露を除く）
    pub tiles: Vec<String>,
    #[serde(default)]
    pub melds: Vec<CalledMeld>,
}

#[derive(Debug, Serialize)]
pub struct MeldBreakdown {
    pub kind: MeldKind,
    pub tiles: String,
}

#[derive(Debug, Serialize)]
pub struct PartialBreakdown {
    pub kind: PairKind,
    pub tiles: String,
    /// 面子（対子なら刻子）にする牌
    pub completions: Vec<TileKind>,
}

#[derive(Debug, Serialize)]
pub struct GroupBreakdown {
    pub group: Group,
    pub melds: Vec<MeldBreakdown>,
    pub partials: Vec<PartialBreakdown>,
    pub isolated: Vec<TileKind>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResult {
    pub shanten: i8,
    pub shape: Shape,
    pub standard: i8,
    pub seven_pairs: Option<i8>,
    pub thirteen_orphans: Option<i8>,
    pub concealed: bool,
    pub decomposition: Vec<GroupBreakdown>,
    pub claims: Claims,
}

mod analyze;
pub mod claim;
pub mod decompose;
pub mod engine;
pub mod error;
pub mod hand;
pub mod meld;
pub mod special;
pub mod tile;

pub use analyze::{analyze, player_hand};
pub use claim::{Claims, MeldCall, PlayerHand};
pub use engine::{best_shanten, evaluate, Shanten, ShantenReport, Shape};
pub use error::{ShantenError, ShantenResult};
pub use hand::Hand;
pub use meld::{Meld, MeldKind, PairKind, Partial};
pub use tile::{format_tiles, parse_tiles, Group, Honor, Suit, TileKind};
