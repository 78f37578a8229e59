use crate::claim::{MeldCall, PlayerHand};
use crate::decompose::{decompose, GroupDecomposition};
use crate::error::{ShantenError, ShantenResult};
use crate::hand::Hand;
use crate::meld::{Meld, MeldKind};
use crate::tile::TileKind;
use crate::{
    AnalyzeRequest, AnalyzeResult, CalledMeld, GroupBreakdown, MeldBreakdown, MeldType,
    PartialBreakdown,
};

pub fn analyze(req: &AnalyzeRequest) -> ShantenResult<AnalyzeResult> {
    let player = player_hand(req)?;

    let report = player.report()?;
    let best = report.best();
    let decomposition = decompose(player.concealed())?;

    Ok(AnalyzeResult {
        shanten: best.value,
        shape: best.shape,
        standard: report.standard,
        seven_pairs: report.seven_pairs,
        thirteen_orphans: report.thirteen_orphans,
        concealed: player.is_concealed(),
        decomposition: decomposition.groups.iter().map(breakdown).collect(),
        claims: player.claims(),
    })
}

/// リクエストから手牌と副露を組み立てる
pub fn player_hand(req: &AnalyzeRequest) -> ShantenResult<PlayerHand> {
    let tiles = parse_codes(&req.tiles)?;
    let concealed = Hand::from_tiles(tiles)?;

    let melds = req
        .melds
        .iter()
        .map(meld_call)
        .collect::<ShantenResult<Vec<_>>>()?;

    PlayerHand::new(concealed, melds)
}

fn parse_codes(codes: &[String]) -> ShantenResult<Vec<TileKind>> {
    codes.iter().map(|s| TileKind::from_code(s)).collect()
}

fn meld_call(m: &CalledMeld) -> ShantenResult<MeldCall> {
    let tiles = parse_codes(&m.tiles)?;
    let meld = Meld::from_tiles(&tiles)?;

    let expected = match m.meld_type {
        MeldType::CHI => MeldKind::Chow,
        MeldType::PON => MeldKind::Pung,
        MeldType::MINKAN | MeldType::ANKAN => MeldKind::Kong,
    };
    if meld.kind() != expected {
        return Err(ShantenError::invalid_hand(format!(
            "{:?} cannot be {}",
            m.meld_type, meld
        )));
    }

    Ok(MeldCall {
        meld,
        // ANKAN は門前扱いのまま
        open: m.meld_type != MeldType::ANKAN,
    })
}

fn breakdown(g: &GroupDecomposition) -> GroupBreakdown {
    GroupBreakdown {
        group: g.group,
        melds: g
            .melds
            .iter()
            .map(|m| MeldBreakdown {
                kind: m.kind(),
                tiles: m.to_string(),
            })
            .collect(),
        partials: g
            .partials
            .iter()
            .map(|p| PartialBreakdown {
                kind: p.kind(),
                tiles: p.to_string(),
                completions: p.completions(),
            })
            .collect(),
        isolated: g.residue.tiles(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Shape;
    use crate::meld::PairKind;
    use crate::tile::Group;

    fn codes(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn request(tiles: &[&str], melds: Vec<CalledMeld>) -> AnalyzeRequest {
        AnalyzeRequest {
            tiles: codes(tiles),
            melds,
        }
    }

    fn t(code: &str) -> TileKind {
        TileKind::from_code(code).unwrap()
    }

    #[test]
    fn concealed_hand() {
        let req = request(
            &["1m", "1m", "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", "9m", "9m"],
            vec![],
        );
        let res = analyze(&req).unwrap();
        assert_eq!(res.shanten, 0);
        assert_eq!(res.shape, Shape::Standard);
        assert!(res.concealed);
        assert!(res.seven_pairs.is_some());

        let chars = &res.decomposition[0];
        assert_eq!(chars.group, Group::Characters);
        let melds: Vec<&str> = chars.melds.iter().map(|m| m.tiles.as_str()).collect();
        assert_eq!(melds, vec!["111m", "234m", "567m", "999m"]);
        assert_eq!(chars.melds[0].kind, MeldKind::Pung);
        assert_eq!(chars.melds[1].kind, MeldKind::Chow);
        assert_eq!(chars.isolated, vec![t("8m")]);
        assert_eq!(res.claims.chow.len(), 9);
    }

    #[test]
    fn open_pung_skips_special_shapes() {
        let req = request(
            &["1m", "1m", "3m", "3m", "5p", "5p", "7p", "7p", "9s", "9s"],
            vec![CalledMeld {
                meld_type: MeldType::PON,
                tiles: codes(&["E", "E", "E"]),
            }],
        );
        let res = analyze(&req).unwrap();
        assert!(!res.concealed);
        assert_eq!(res.seven_pairs, None);
        assert_eq!(res.thirteen_orphans, None);
        assert!(res.claims.kong.contains(&t("E")));
    }

    #[test]
    fn concealed_kong_keeps_the_hand_concealed() {
        let req = request(
            &["1m", "9m", "1p", "9p", "1s", "9s", "S", "W", "N", "P"],
            vec![CalledMeld {
                meld_type: MeldType::ANKAN,
                tiles: codes(&["C", "C", "C", "C"]),
            }],
        );
        let player = player_hand(&req).unwrap();
        assert!(player.is_concealed());
        // 10 concealed tiles: special shapes are not evaluated
        let res = analyze(&req).unwrap();
        assert_eq!(res.thirteen_orphans, None);
    }

    #[test]
    fn partials_carry_kind_and_completions() {
        let req = request(
            &["3m", "8m", "9m", "9m", "3p", "4p", "5p", "7p", "8s", "8s", "S", "F", "F"],
            vec![],
        );
        let res = analyze(&req).unwrap();

        let chars = &res.decomposition[0];
        assert_eq!(chars.partials.len(), 1);
        assert_eq!(chars.partials[0].tiles, "89m");
        assert_eq!(chars.partials[0].kind, PairKind::TerminalSerialPair);
        assert_eq!(chars.partials[0].completions, vec![t("7m")]);
        assert_eq!(chars.isolated, vec![t("3m"), t("9m")]);

        let honors = &res.decomposition[3];
        assert_eq!(honors.partials[0].kind, PairKind::SimplePair);
        assert_eq!(honors.partials[0].completions, vec![t("F")]);
    }

    #[test]
    fn red_five_is_a_five() {
        let req = request(&["0m"], vec![]);
        let res = analyze(&req).unwrap();
        assert_eq!(res.decomposition[0].isolated, vec![t("5m")]);
    }

    #[test]
    fn rejects_bad_input() {
        let bad_code = request(&["1x"], vec![]);
        assert!(matches!(analyze(&bad_code), Err(ShantenError::Parse { .. })));

        let bad_size = request(&["1m", "2m"], vec![]);
        assert!(matches!(
            analyze(&bad_size),
            Err(ShantenError::InvalidHandSize { actual: 2, .. })
        ));

        let mislabelled = request(
            &["1m"],
            vec![CalledMeld {
                meld_type: MeldType::PON,
                tiles: codes(&["1p", "2p", "3p"]),
            }],
        );
        assert!(matches!(analyze(&mislabelled), Err(ShantenError::InvalidHand { .. })));

        let fifth = request(
            &["1m", "1m"],
            vec![CalledMeld {
                meld_type: MeldType::PON,
                tiles: codes(&["1m", "1m", "1m"]),
            }],
        );
        assert!(analyze(&fifth).is_err());
    }
}
