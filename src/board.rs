use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::BoardError;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;
/// Largest number of cells a board may be allocated with.
pub const MAX_CELLS: usize = 1 << 16;

/// Side a piece belongs to. Encoded on the wire as `-1`, `0` and `1`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Color {
    #[default]
    Empty,
    White,
    Black,
}

impl TryFrom<i8> for Color {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Color::Empty),
            0 => Ok(Color::White),
            1 => Ok(Color::Black),
            x => Err(format!("unknown piece color {}", x)),
        }
    }
}

impl From<Color> for i8 {
    fn from(color: Color) -> Self {
        match color {
            Color::Empty => -1,
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

/// Unit type as numbered by the game server. Types without a glyph of their
/// own (generals, lances, barriers...) arrive as `Other`, whatever the number.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum PieceType {
    #[default]
    Empty,
    Warpling,
    King,
    Knight,
    Rook,
    Bishop,
    Queen,
    Other(i64),
}

impl From<i64> for PieceType {
    fn from(value: i64) -> Self {
        match value {
            0 => PieceType::Empty,
            1 => PieceType::Warpling,
            2 => PieceType::King,
            3 => PieceType::Knight,
            4 => PieceType::Rook,
            5 => PieceType::Bishop,
            6 => PieceType::Queen,
            x => PieceType::Other(x),
        }
    }
}

impl From<PieceType> for i64 {
    fn from(kind: PieceType) -> Self {
        match kind {
            PieceType::Empty => 0,
            PieceType::Warpling => 1,
            PieceType::King => 2,
            PieceType::Knight => 3,
            PieceType::Rook => 4,
            PieceType::Bishop => 5,
            PieceType::Queen => 6,
            PieceType::Other(x) => x,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Piece {
    pub color: Color,
    #[serde(rename = "type")]
    pub kind: PieceType,
}

impl Piece {
    pub const EMPTY: Piece = Piece { color: Color::Empty, kind: PieceType::Empty };

    pub fn new(color: Color, kind: PieceType) -> Self {
        Piece { color, kind }
    }

    pub fn is_empty(&self) -> bool {
        self.kind == PieceType::Empty
    }

    fn icon(&self) -> char {
        let icon = match self.kind {
            PieceType::Empty => return ' ',
            PieceType::Warpling => 'W',
            PieceType::King => 'K',
            PieceType::Knight => 'N',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Queen => 'Q',
            PieceType::Other(x) => return u32::try_from(x).ok().and_then(|d| char::from_digit(d, 10)).unwrap_or('?'),
        };
        if self.color == Color::Black { icon.to_ascii_lowercase() } else { icon }
    }
}

/// One entry of the server's unit list. Everything besides position, type
/// and color (ids, names, move graphs) is ignored.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UnitRecord {
    #[serde(rename = "type")]
    pub kind: PieceType,
    pub color: Color,
    pub x: i64,
    pub y: i64,
}

fn default_width() -> usize {
    DEFAULT_WIDTH
}

fn default_height() -> usize {
    DEFAULT_HEIGHT
}

#[derive(Debug, serde::Deserialize)]
pub struct UnitList {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    pub units: Vec<UnitRecord>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum BoardDocument {
    Grid(Vec<Vec<Piece>>),
    Units(UnitList),
}

/// Column-major grid of pieces, `squares[column][row]`. Every cell holds a
/// piece; unoccupied cells hold `Piece::EMPTY`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(try_from = "BoardDocument")]
pub struct Board {
    squares: Vec<Vec<Piece>>,
    width: usize,
    height: usize,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Result<Board, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::Empty { width, height });
        }
        if width.checked_mul(height).map_or(true, |cells| cells > MAX_CELLS) {
            return Err(BoardError::TooLarge { width, height, limit: MAX_CELLS });
        }
        Ok(Board { squares: vec![vec![Piece::EMPTY; height]; width], width, height })
    }

    pub fn from_columns(columns: Vec<Vec<Piece>>) -> Result<Board, BoardError> {
        let width = columns.len();
        let height = columns.first().map(|c| c.len()).unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(BoardError::Empty { width, height });
        }
        if let Some((column, c)) = columns.iter().enumerate().find(|(_, c)| c.len() != height) {
            return Err(BoardError::Ragged { column, expected: height, found: c.len() });
        }
        Ok(Board { squares: columns, width, height })
    }

    pub fn from_units(width: usize, height: usize, units: &[UnitRecord]) -> Result<Board, BoardError> {
        let mut board = Board::new(width, height)?;
        for unit in units {
            board.place(unit.x, unit.y, Piece::new(unit.color, unit.kind))?;
        }
        Ok(board)
    }

    pub fn from_json(json: &str) -> Result<Board, BoardError> {
        let document: BoardDocument = serde_json::from_str(json)?;
        Board::try_from(document)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, column: usize, row: usize) -> Option<&Piece> {
        self.squares.get(column).and_then(|c| c.get(row))
    }

    pub fn set(&mut self, column: usize, row: usize, piece: Piece) -> Result<(), BoardError> {
        self.place(column as i64, row as i64, piece)
    }

    fn place(&mut self, x: i64, y: i64, piece: Piece) -> Result<(), BoardError> {
        let (width, height) = (self.width, self.height);
        let square = usize::try_from(x).ok()
            .zip(usize::try_from(y).ok())
            .and_then(|(column, row)| self.squares.get_mut(column)?.get_mut(row));
        match square {
            Some(square) => {
                *square = piece;
                Ok(())
            }
            None => Err(BoardError::OutOfBounds { x, y, width, height }),
        }
    }

    /// Cells in drawing order: column by column, top to bottom.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, &Piece)> + '_ {
        self.squares.iter().enumerate()
            .flat_map(|(column, c)| c.iter().enumerate().map(move |(row, p)| (column, row, p)))
    }

    pub fn occupied(&self) -> usize {
        self.cells().filter(|(_, _, p)| !p.is_empty()).count()
    }
}

impl TryFrom<BoardDocument> for Board {
    type Error = BoardError;

    fn try_from(document: BoardDocument) -> Result<Self, Self::Error> {
        match document {
            BoardDocument::Grid(columns) => Board::from_columns(columns),
            BoardDocument::Units(list) => Board::from_units(list.width, list.height, &list.units),
        }
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error> where S: Serializer {
        serializer.collect_seq(&self.squares)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            if row > 0 {
                writeln!(f)?;
            }
            for column in 0..self.width {
                write!(f, "{}", self.squares[column][row].icon())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use crate::board::{Board, Color, Piece, PieceType};
    use crate::error::BoardError;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 10).unwrap();
        assert_eq!(board.cells().count(), 100);
        assert_eq!(board.occupied(), 0);
        assert!(board.cells().all(|(_, _, p)| *p == Piece::EMPTY));
    }

    #[test]
    fn test_zero_sized_board() {
        assert!(matches!(Board::new(0, 4), Err(BoardError::Empty { width: 0, height: 4 })));
        assert!(matches!(Board::from_columns(Vec::new()), Err(BoardError::Empty { .. })));
    }

    #[test]
    fn test_decode_grid() {
        let json = r#"[
            [{"color": -1, "type": 0}, {"color": 0, "type": 2}],
            [{"color": 1, "type": 1}, {"color": 1, "type": 9}]
        ]"#;
        let board = Board::from_json(json).unwrap();
        assert_eq!(board.width(), 2);
        assert_eq!(board.height(), 2);
        assert_eq!(board.get(0, 1), Some(&Piece::new(Color::White, PieceType::King)));
        assert_eq!(board.get(1, 0), Some(&Piece::new(Color::Black, PieceType::Warpling)));
        assert_eq!(board.get(1, 1), Some(&Piece::new(Color::Black, PieceType::Other(9))));
        assert_eq!(board.get(2, 0), None);
    }

    #[test]
    fn test_decode_ragged_grid() {
        let json = r#"[[{"color": -1, "type": 0}], []]"#;
        match Board::from_json(json) {
            Err(BoardError::Ragged { column, expected, found }) => assert_eq!((column, expected, found), (1, 1, 0)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_color() {
        let json = r#"[[{"color": 7, "type": 1}]]"#;
        assert!(matches!(Board::from_json(json), Err(BoardError::Json(_))));
    }

    #[test]
    fn test_decode_unit_list() {
        let json = r#"{
            "units": [
                {"ID": 1, "name": "Warpling", "type": 1, "color": 0, "x": 5, "y": 5, "moves": [], "abilities": []},
                {"ID": 2, "name": "Knight", "type": 3, "color": 1, "x": 6, "y": 6, "moves": [], "abilities": []}
            ]
        }"#;
        let board = Board::from_json(json).unwrap();
        assert_eq!((board.width(), board.height()), (10, 10));
        assert_eq!(board.occupied(), 2);
        assert_eq!(board.get(5, 5), Some(&Piece::new(Color::White, PieceType::Warpling)));
        assert_eq!(board.get(6, 6), Some(&Piece::new(Color::Black, PieceType::Knight)));
    }

    #[test]
    fn test_unit_outside_board() {
        let json = r#"{"width": 4, "height": 4, "units": [{"type": 2, "color": 0, "x": -1, "y": 2}]}"#;
        match Board::from_json(json) {
            Err(BoardError::OutOfBounds { x, y, width, height }) => assert_eq!((x, y, width, height), (-1, 2, 4, 4)),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_serialize_roundtrip_keeps_layout() {
        let mut board = Board::new(3, 2).unwrap();
        board.set(2, 1, Piece::new(Color::Black, PieceType::Queen)).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with(r#"[[{"color":-1,"type":0}"#));
        assert_eq!(Board::from_json(&json).unwrap(), board);
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut board = Board::new(3, 3).unwrap();
        assert!(board.set(3, 0, Piece::new(Color::White, PieceType::Rook)).is_err());
        assert_eq!(board.occupied(), 0);
    }

    #[test]
    fn test_to_string() {
        let mut board = Board::new(3, 2).unwrap();
        board.set(0, 0, Piece::new(Color::White, PieceType::King)).unwrap();
        board.set(1, 0, Piece::new(Color::Black, PieceType::Knight)).unwrap();
        board.set(2, 1, Piece::new(Color::Black, PieceType::Other(7))).unwrap();
        board.set(0, 1, Piece::new(Color::Black, PieceType::Other(12))).unwrap();
        assert_eq!(board.to_string(), "Kn \n? 7");
    }

    #[test]
    fn test_oversized_unit_list() {
        let result = Board::from_json(r#"{"width": 18446744073709551615, "height": 2, "units": []}"#);
        assert!(matches!(result, Err(BoardError::TooLarge { height: 2, .. })));
        assert!(matches!(Board::new(100_000, 100_000), Err(BoardError::TooLarge { .. })));
        assert!(serde_json::from_str::<Board>(r#"{"width": 4096, "height": 4096, "units": []}"#).is_err());
        assert_eq!(Board::new(256, 256).unwrap().cells().count(), 256 * 256);
    }

    #[test]
    fn test_decode_out_of_range_type() {
        let board = Board::from_json(r#"[[{"color": 0, "type": 300}, {"color": 1, "type": -4}]]"#).unwrap();
        assert_eq!(board.get(0, 0), Some(&Piece::new(Color::White, PieceType::Other(300))));
        assert_eq!(board.get(0, 1), Some(&Piece::new(Color::Black, PieceType::Other(-4))));
        assert_eq!(board.to_string(), "?\n?");
        assert_eq!(serde_json::to_string(&board).unwrap(), r#"[[{"color":0,"type":300},{"color":1,"type":-4}]]"#);
    }
}
