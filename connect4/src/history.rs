//! Textual move history, e.g. `P3C3P4`.
//!
//! Each move is a side letter (`P` player, `C` computer, either case)
//! followed by a single column digit.
use crate::board::{Board, Chip, Position};
use crate::error::GameError;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TypedMove {
    pub chip: Chip,
    pub column: usize,
}

/// Parses `history` for a board `columns` wide. Errors carry the character
/// offset of the offending token.
pub fn parse_history(history: &str, columns: usize) -> Result<Vec<TypedMove>, GameError> {
    let history = history.trim();
    let mut tokens = history.chars().enumerate();
    let mut moves = Vec::with_capacity(history.len() / 2);

    while let Some((at, side)) = tokens.next() {
        let chip = Chip::from_symbol(side)
            .ok_or_else(|| malformed(at, format!("expected P or C, found {side}")))?;
        let (at, digit) = tokens
            .next()
            .ok_or_else(|| malformed(at + 1, "missing column number".to_string()))?;
        let column = digit
            .to_digit(10)
            .ok_or_else(|| malformed(at, format!("expected column digit, found {digit}")))?
            as usize;
        if column >= columns {
            return Err(malformed(
                at,
                format!("column {column} is outside 0-{}", columns.saturating_sub(1)),
            ));
        }
        moves.push(TypedMove { chip, column });
    }
    Ok(moves)
}

fn malformed(position: usize, reason: String) -> GameError {
    GameError::ParseMove { position, reason }
}

/// Applies `moves` in order. Stops at the first rejected drop.
pub fn replay(board: &mut Board, moves: &[TypedMove]) -> Result<Option<Position>, GameError> {
    let mut last = None;
    for mv in moves {
        last = Some(board.drop_chip(mv.chip, mv.column)?);
    }
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_case() {
        let moves = parse_history("P3c4p0", 7).unwrap();
        assert_eq!(
            moves,
            vec![
                TypedMove { chip: Chip::Player, column: 3 },
                TypedMove { chip: Chip::Computer, column: 4 },
                TypedMove { chip: Chip::Player, column: 0 },
            ]
        );
    }

    #[test]
    fn blank_history_is_empty() {
        assert!(parse_history("", 7).unwrap().is_empty());
        assert!(parse_history("   ", 7).unwrap().is_empty());
    }

    #[test]
    fn reports_offending_offset() {
        assert_eq!(
            parse_history("P3X1", 7),
            Err(GameError::ParseMove {
                position: 2,
                reason: "expected P or C, found X".to_string(),
            })
        );
        assert!(matches!(
            parse_history("P3C", 7),
            Err(GameError::ParseMove { position: 3, .. })
        ));
        assert!(matches!(
            parse_history("Pa", 7),
            Err(GameError::ParseMove { position: 1, .. })
        ));
    }

    #[test]
    fn rejects_columns_beyond_board_width() {
        assert_eq!(
            parse_history("P3C7", 7),
            Err(GameError::ParseMove {
                position: 3,
                reason: "column 7 is outside 0-6".to_string(),
            })
        );
        assert!(parse_history("P3C4", 4).is_err());
        assert_eq!(parse_history("P3C4", 5).unwrap().len(), 2);
    }

    #[test]
    fn replay_places_chips() {
        let mut board = Board::standard();
        let moves = parse_history("P3C3P4", 7).unwrap();
        let last = replay(&mut board, &moves).unwrap();
        assert_eq!(last, Some(Position { column: 4, row: 0 }));
        assert_eq!(board.get(3, 1), Some(Chip::Computer));
        assert_eq!(board.moves_played(), 3);
    }

    #[test]
    fn replay_surfaces_board_errors() {
        let mut board = Board::new(4, 4).unwrap();
        let moves = [TypedMove { chip: Chip::Player, column: 5 }];
        assert_eq!(
            replay(&mut board, &moves),
            Err(GameError::ColumnOutOfRange { column: 5 })
        );

        let mut board = Board::standard();
        let moves = parse_history("P0P0P0P0C1", 7).unwrap();
        assert_eq!(replay(&mut board, &moves), Err(GameError::GameOver));
    }
}
