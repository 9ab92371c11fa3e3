//! Square name conversions (`e4` <-> index).

use crate::game_state::chess_types::{file_of, rank_of, square_of, Square};

/// Parse a square name such as "e4" into an index.
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let &[file, rank] = square.as_bytes() else {
        return Err(format!("Invalid algebraic square: {square}"));
    };

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok(square_of(file - b'a', rank - b'1'))
}

/// Convert an index to its name, rejecting anything off the board.
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square > 63 {
        return Err(format!("Square index out of bounds: {square}"));
    }
    Ok(square_name(square))
}

/// Name of an on-board square. Callers guarantee `square < 64`.
#[inline]
pub fn square_name(square: Square) -> String {
    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn corner_squares_convert_both_ways() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_to_algebraic(28).expect("28 should convert"), "e4");
    }

    #[test]
    fn malformed_names_are_rejected() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(square_to_algebraic(64).is_err());
    }
}
