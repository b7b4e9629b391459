//! Vector shapes for every piece type.
//!
//! Coordinates are fractions of the cell edge measured from the top-left
//! corner of the cell, so a glyph scales with any step size.

use crate::board::PieceType;

pub type Point = (f64, f64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RingStyle {
    /// Filled with the piece color and outlined with its stroke color.
    Solid,
    /// Outline only, in the stroke color of the piece.
    Ornament,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ring {
    pub center: Point,
    pub radius: f64,
    pub style: RingStyle,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Glyph {
    /// Closed polygon outline, stroked and never filled. Empty for circle-only
    /// glyphs.
    pub outline: &'static [Point],
    /// Drawn after the outline, in order.
    pub rings: &'static [Ring],
    /// Whether the type number is written over the glyph.
    pub numeral: bool,
}

const CENTER: Point = (0.5, 0.5);

const fn solid(center: Point, radius: f64) -> Ring {
    Ring { center, radius, style: RingStyle::Solid }
}

const fn ornament(center: Point, radius: f64) -> Ring {
    Ring { center, radius, style: RingStyle::Ornament }
}

pub const WARPLING: Glyph = Glyph {
    outline: &[],
    rings: &[solid(CENTER, 3.0 / 8.0)],
    numeral: false,
};

pub const KING: Glyph = Glyph {
    outline: &[(0.25, 0.25), (0.5, 0.5), (0.75, 0.25), (0.75, 0.75), (0.25, 0.75)],
    rings: &[solid(CENTER, 3.0 / 16.0)],
    numeral: false,
};

pub const KNIGHT: Glyph = Glyph {
    outline: &[
        (0.4, 0.25), (0.5, 0.25), (0.75, 0.4), (0.75, 0.6),
        (0.5, 0.6), (0.6, 0.75), (0.25, 0.75),
    ],
    rings: &[],
    numeral: false,
};

pub const ROOK: Glyph = Glyph {
    outline: &[
        (0.25, 0.75), (0.25, 0.25), (0.35, 0.25), (0.35, 0.35), (0.45, 0.35), (0.45, 0.25),
        (0.55, 0.25), (0.55, 0.35), (0.65, 0.35), (0.65, 0.25), (0.75, 0.25), (0.75, 0.75),
    ],
    rings: &[],
    numeral: false,
};

pub const BISHOP: Glyph = Glyph {
    outline: &[(0.5, 0.2), (0.7, 0.45), (0.6, 0.75), (0.4, 0.75), (0.3, 0.45)],
    rings: &[ornament((0.5, 0.5), 0.08)],
    numeral: false,
};

pub const QUEEN: Glyph = Glyph {
    outline: &[
        (0.25, 0.75), (0.2, 0.3), (0.35, 0.5), (0.5, 0.25),
        (0.65, 0.5), (0.8, 0.3), (0.75, 0.75),
    ],
    rings: &[
        ornament((0.2, 0.3), 1.0 / 16.0),
        ornament((0.5, 0.25), 1.0 / 16.0),
        ornament((0.8, 0.3), 1.0 / 16.0),
    ],
    numeral: false,
};

pub const FALLBACK: Glyph = Glyph {
    outline: &[],
    rings: &[solid(CENTER, 3.0 / 8.0)],
    numeral: true,
};

/// Glyph for a piece type, `None` for empty squares.
pub fn glyph(kind: PieceType) -> Option<&'static Glyph> {
    match kind {
        PieceType::Empty => None,
        PieceType::Warpling => Some(&WARPLING),
        PieceType::King => Some(&KING),
        PieceType::Knight => Some(&KNIGHT),
        PieceType::Rook => Some(&ROOK),
        PieceType::Bishop => Some(&BISHOP),
        PieceType::Queen => Some(&QUEEN),
        PieceType::Other(_) => Some(&FALLBACK),
    }
}

#[cfg(test)]
mod test {
    use crate::board::PieceType;
    use crate::glyph::{glyph, RingStyle, FALLBACK};

    const NAMED: [PieceType; 6] = [
        PieceType::Warpling, PieceType::King, PieceType::Knight,
        PieceType::Rook, PieceType::Bishop, PieceType::Queen,
    ];

    #[test]
    fn test_empty_has_no_glyph() {
        assert_eq!(glyph(PieceType::Empty), None);
    }

    #[test]
    fn test_unknown_types_fall_back() {
        for n in [7, 8, 13, 200] {
            assert_eq!(glyph(PieceType::Other(n)), Some(&FALLBACK));
        }
        assert!(FALLBACK.numeral);
    }

    #[test]
    fn test_named_glyphs_stay_inside_cell() {
        for kind in NAMED {
            let g = glyph(kind).unwrap();
            assert!(!g.numeral, "{:?}", kind);
            for &(x, y) in g.outline {
                assert!((0.0..=1.0).contains(&x) && (0.0..=1.0).contains(&y), "{:?}", kind);
            }
            for ring in g.rings {
                let (x, y) = ring.center;
                assert!(x - ring.radius >= 0.0 && x + ring.radius <= 1.0, "{:?}", kind);
                assert!(y - ring.radius >= 0.0 && y + ring.radius <= 1.0, "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_polygon_pieces() {
        for kind in [PieceType::King, PieceType::Knight, PieceType::Rook, PieceType::Bishop, PieceType::Queen] {
            assert!(glyph(kind).unwrap().outline.len() >= 3, "{:?}", kind);
        }
        assert!(glyph(PieceType::Warpling).unwrap().outline.is_empty());
    }

    #[test]
    fn test_ornaments() {
        let ornaments = |kind| glyph(kind).unwrap().rings.iter().filter(|r| r.style == RingStyle::Ornament).count();
        assert_eq!(ornaments(PieceType::Bishop), 1);
        assert_eq!(ornaments(PieceType::Queen), 3);
        assert_eq!(ornaments(PieceType::King), 0);
        assert_eq!(ornaments(PieceType::Rook), 0);
    }
}
