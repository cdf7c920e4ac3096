//! Move history strings such as `A3B3A2`: a side letter followed by a
//! single column digit, repeated. Lets a stateless caller describe a position.
use serde::{Deserialize, Serialize};

use crate::board::Side;
use crate::error::GameError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypedMove {
    pub side: Side,
    pub column: usize,
}

pub fn parse_history(history: &str) -> Result<Vec<TypedMove>, GameError> {
    let history = history.trim();
    if history.is_empty() {
        return Ok(Vec::new());
    }
    let chars: Vec<char> = history.chars().collect();
    let mut moves = Vec::with_capacity(chars.len() / 2);
    let mut idx = 0;
    while idx < chars.len() {
        let letter = chars[idx];
        let side = match letter {
            'A' | 'a' => Side::PlayerA,
            'B' | 'b' => Side::PlayerB,
            _ => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: format!("expected A or B, found {letter}"),
                })
            }
        };
        idx += 1;
        let column = match chars.get(idx).and_then(|c| c.to_digit(10)) {
            Some(digit) => digit as usize,
            None => {
                return Err(GameError::ParseMove {
                    position: idx,
                    reason: match chars.get(idx) {
                        Some(c) => format!("expected column digit, found {c}"),
                        None => "missing column number".to_string(),
                    },
                })
            }
        };
        moves.push(TypedMove { side, column });
        idx += 1;
    }
    Ok(moves)
}

pub fn format_history(moves: &[TypedMove]) -> String {
    moves
        .iter()
        .map(|mv| format!("{}{}", mv.side.symbol(), mv.column))
        .collect()
}
