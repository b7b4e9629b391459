use crate::board::Board;

/// A board as pushed by the game server, either on its own or wrapped in a
/// message envelope alongside other fields.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub enum BoardMessage {
    Envelope { board: Board },
    Bare(Board),
}

impl BoardMessage {
    pub fn into_board(self) -> Board {
        match self {
            BoardMessage::Envelope { board } => board,
            BoardMessage::Bare(board) => board,
        }
    }
}
