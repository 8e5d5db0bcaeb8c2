//! board.rs：
//! - 定義陣營（Side）、棋種（PieceKind）、棋子（Piece）與棋盤（Board）資料結構。
//! - 僅負責盤面狀態的建立、查詢與放置，不含走法產生與對局流程。
//! - 自訂開局的擺放設定（Placement）與邊界、重複檢查也集中於此。
use crate::*;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Display, EnumIter, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub side: Side,
    pub kind: PieceKind,
}

impl Piece {
    /// Unicode 棋子符號，供呼叫端顯示用
    pub fn symbol(&self) -> char {
        match (self.side, self.kind) {
            (Side::White, PieceKind::King) => '♔',
            (Side::White, PieceKind::Queen) => '♕',
            (Side::White, PieceKind::Rook) => '♖',
            (Side::White, PieceKind::Bishop) => '♗',
            (Side::White, PieceKind::Knight) => '♘',
            (Side::White, PieceKind::Pawn) => '♙',
            (Side::Black, PieceKind::King) => '♚',
            (Side::Black, PieceKind::Queen) => '♛',
            (Side::Black, PieceKind::Rook) => '♜',
            (Side::Black, PieceKind::Bishop) => '♝',
            (Side::Black, PieceKind::Knight) => '♞',
            (Side::Black, PieceKind::Pawn) => '♟',
        }
    }
}

/// 被吃棋子的計分價值；吃王直接結束對局，不走計分路徑
pub fn material_value(kind: PieceKind) -> MaterialValue {
    match kind {
        PieceKind::Pawn => 1,
        PieceKind::Knight => 3,
        PieceKind::Bishop => 3,
        PieceKind::Rook => 5,
        PieceKind::Queen => 9,
        PieceKind::King => 0,
    }
}

/// 自訂開局的單一擺放，座標以數字表示，載入時才檢查邊界
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub side: Side,
    pub kind: PieceKind,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

// 後排棋種，由 col 0 到 col 7
const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    pub fn empty() -> Self {
        Board::default()
    }

    /// 標準開局：黑方在 row 0/1，白方在 row 6/7（白方朝 row 減少的方向前進）
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for col in 0..BOARD_SIZE {
            board.squares[0][col] = Some(Piece {
                side: Side::Black,
                kind: BACK_RANK[col],
            });
            board.squares[1][col] = Some(Piece {
                side: Side::Black,
                kind: PieceKind::Pawn,
            });
            board.squares[6][col] = Some(Piece {
                side: Side::White,
                kind: PieceKind::Pawn,
            });
            board.squares[7][col] = Some(Piece {
                side: Side::White,
                kind: BACK_RANK[col],
            });
        }
        board
    }

    /// 依擺放設定建立棋盤，重複座標回傳錯誤
    pub fn from_placements(placements: &[Placement]) -> Result<Self, Error> {
        let func = "Board::from_placements";

        let mut board = Board::empty();
        for p in placements {
            let square = Square::new(p.row, p.col).map_err(|e| Error::Wrap {
                func,
                source: Box::new(e),
            })?;
            if board.piece_at(square).is_some() {
                return Err(Error::DuplicatePlacement {
                    func,
                    row: p.row,
                    col: p.col,
                });
            }
            board.set_piece(
                square,
                Some(Piece {
                    side: p.side,
                    kind: p.kind,
                }),
            );
        }
        Ok(board)
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.row()][square.col()]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.row()][square.col()] = piece;
    }

    /// 列出指定陣營所有棋子的位置，掃描順序為 row 再 col
    pub fn pieces_of(&self, side: Side) -> Vec<(Square, Piece)> {
        let mut result = Vec::new();
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Some(piece) = self.squares[row][col] {
                    if piece.side == side {
                        // row/col 皆在範圍內，建構不會失敗
                        if let Ok(square) = Square::new(row, col) {
                            result.push((square, piece));
                        }
                    }
                }
            }
        }
        result
    }
}
