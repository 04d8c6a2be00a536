use cozy_chess::{Board as CozyBoard, Color, File, Move, Piece, Square};
use crate::error::BoardError;

/// Board state backed by cozy-chess. Treated as immutable by the search:
/// successors are derived with [`Position::apply`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: CozyBoard,
}

impl Position {
    pub fn startpos() -> Self {
        Self { board: CozyBoard::default() }
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        CozyBoard::from_fen(fen.trim(), false)
            .map(|b| Self { board: b })
            .map_err(|e| BoardError::InvalidFen { fen: fen.to_string(), reason: format!("{e:?}") })
    }

    pub fn board(&self) -> &CozyBoard { &self.board }

    pub fn fen(&self) -> String { format!("{}", self.board) }

    pub fn side_to_move(&self) -> Color { self.board.side_to_move() }

    pub fn piece_count(&self, piece: Piece, color: Color) -> u32 {
        let bb = self.board.colors(color) & self.board.pieces(piece);
        bb.into_iter().count() as u32
    }

    // Legal moves in cozy-chess generation order. The order is stable for a
    // given position and decides minimax ties.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves: Vec<Move> = Vec::with_capacity(64);
        self.board.generate_moves(|ml| { moves.extend(ml); false });
        moves
    }

    pub fn has_legal_moves(&self) -> bool {
        let mut any = false;
        self.board.generate_moves(|ml| { any = !ml.is_empty(); any });
        any
    }

    pub fn in_check(&self) -> bool { !self.board.checkers().is_empty() }

    pub fn is_checkmate(&self) -> bool { self.in_check() && !self.has_legal_moves() }

    /// Successor position after `mv`. `mv` must be legal here.
    pub fn apply(&self, mv: Move) -> Position {
        let mut child = self.board.clone();
        child.play(mv);
        Self { board: child }
    }

    /// Standard UCI text for a legal move of this position.
    ///
    /// cozy-chess encodes castling as the king capturing its own rook
    /// (`e1h1`); puzzle files use the king's destination square (`e1g1`).
    pub fn uci(&self, mv: Move) -> String {
        let mut to = mv.to;
        let castles = self.board.piece_on(mv.from) == Some(Piece::King)
            && self.board.color_on(mv.to) == Some(self.board.side_to_move());
        if castles {
            let kingside = (mv.to.file() as u8) > (mv.from.file() as u8);
            let file = if kingside { File::G } else { File::C };
            to = Square::new(file, mv.from.rank());
        }
        format!("{}", Move { from: mv.from, to, promotion: mv.promotion })
    }

    pub fn find_move(&self, mv_uci: &str) -> Option<Move> {
        let mut found = None;
        self.board.generate_moves(|moves| {
            for m in moves {
                if self.uci(m) == mv_uci { found = Some(m); break; }
            }
            found.is_some()
        });
        found
    }

    pub fn play_uci(&mut self, mv_uci: &str) -> Result<(), BoardError> {
        match self.find_move(mv_uci) {
            Some(m) => { self.board.play(m); Ok(()) }
            None => Err(BoardError::IllegalMove { uci: mv_uci.to_string(), fen: self.fen() }),
        }
    }

    pub fn from_start_and_moves(moves: &[&str]) -> Result<Self, BoardError> {
        let mut pos = Self::startpos();
        for m in moves { pos.play_uci(m)?; }
        Ok(pos)
    }
}
