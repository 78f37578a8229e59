use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShantenError {
    /// 枚数が評価形の前提（3n+1 / 13・14枚）を満たさない
    InvalidHandSize { expected: &'static str, actual: usize },
    /// 生のカウント列から手牌を作れない（5枚目、範囲外の牌種など）
    InvalidHand { message: String },
    /// 牌コード・牌パターン文字列のパースエラー
    Parse { input: String, message: String },
    /// 手牌が鳴き・槓・打牌を支えられない
    IllegalClaim { message: String },
}

impl ShantenError {
    pub(crate) fn invalid_hand(message: impl Into<String>) -> Self {
        ShantenError::InvalidHand {
            message: message.into(),
        }
    }

    pub(crate) fn parse(input: &str, message: impl Into<String>) -> Self {
        ShantenError::Parse {
            input: input.to_owned(),
            message: message.into(),
        }
    }

    pub(crate) fn illegal_claim(message: impl Into<String>) -> Self {
        ShantenError::IllegalClaim {
            message: message.into(),
        }
    }
}

impl fmt::Display for ShantenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShantenError::InvalidHandSize { expected, actual } => {
                write!(f, "Invalid hand size: expected {}, got {}", expected, actual)
            }
            ShantenError::InvalidHand { message } => {
                write!(f, "Invalid hand: {}", message)
            }
            ShantenError::Parse { input, message } => {
                write!(f, "Parse error on '{}': {}", input, message)
            }
            ShantenError::IllegalClaim { message } => {
                write!(f, "Illegal claim: {}", message)
            }
        }
    }
}

impl std::error::Error for ShantenError {}

pub type ShantenResult<T> = Result<T, ShantenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let e = ShantenError::InvalidHandSize {
            expected: "3n+1 tiles",
            actual: 14,
        };
        assert_eq!(e.to_string(), "Invalid hand size: expected 3n+1 tiles, got 14");

        let e = ShantenError::parse("0x", "invalid suit");
        assert_eq!(e.to_string(), "Parse error on '0x': invalid suit");
    }
}
