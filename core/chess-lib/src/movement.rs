//! movement.rs：
//! - 負責各棋種的走法產生：幾何、阻擋與吃子判定。
//! - 僅做「擬合法」判定：不檢查會不會送王，也不管現在輪到誰走。
//! - 盤面層級的搬子（move_piece）也放於此；走法驗證由呼叫端先行。
use crate::*;

// 直向與斜向，滑行棋種共用
const ORTHOGONALS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONALS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
// 八個單位方向，皇后滑行與國王單步共用
const ALL_DIRECTIONS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
const KNIGHT_JUMPS: [(isize, isize); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// 列出 from 位置棋子的所有擬合法目的格；空格回傳空陣列
/// 不檢查行動方，任何有棋子的格子都能查詢
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, from, piece.side),
        PieceKind::Knight => step_moves(board, from, piece.side, &KNIGHT_JUMPS),
        PieceKind::Bishop => sliding_moves(board, from, piece.side, &DIAGONALS),
        PieceKind::Rook => sliding_moves(board, from, piece.side, &ORTHOGONALS),
        PieceKind::Queen => sliding_moves(board, from, piece.side, &ALL_DIRECTIONS),
        PieceKind::King => step_moves(board, from, piece.side, &ALL_DIRECTIONS),
    }
}

/// 將 from 的棋子搬到 to，回傳被吃掉的敵方棋子（若有）
/// 不重算走法幾何，呼叫端須先以 legal_moves 過濾目的格
pub fn move_piece(board: &mut Board, from: Square, to: Square) -> Result<Option<Piece>, Error> {
    let func = "move_piece";

    if from == to {
        return Ok(None); // 原地不動
    }
    let Some(piece) = board.piece_at(from) else {
        return Err(Error::EmptySquare { func, square: from });
    };
    let captured = match board.piece_at(to) {
        Some(target) if target.side != piece.side => Some(target),
        // 空格，或呼叫端違反前置條件踩到己方棋子，皆不算吃子
        _ => None,
    };
    board.set_piece(to, Some(piece));
    board.set_piece(from, None);
    Ok(captured)
}

use inner::*;
mod inner {
    use super::*;

    /// 兵的走法：直走一格限空格，斜前兩格限吃敵子
    /// 白方朝 row 減少的方向前進，黑方相反
    pub fn pawn_moves(board: &Board, from: Square, side: Side) -> Vec<Square> {
        let dir: isize = match side {
            Side::White => -1,
            Side::Black => 1,
        };
        let mut moves = Vec::new();
        if let Some(to) = from.offset(dir, 0) {
            if board.piece_at(to).is_none() {
                moves.push(to);
            }
        }
        for d_col in [-1, 1] {
            if let Some(to) = from.offset(dir, d_col) {
                if let Some(target) = board.piece_at(to) {
                    if target.side != side {
                        moves.push(to);
                    }
                }
            }
        }
        moves
    }

    /// 單步型棋種（騎士、國王）：目的格為空或敵子即可
    pub fn step_moves(
        board: &Board,
        from: Square,
        side: Side,
        offsets: &[(isize, isize)],
    ) -> Vec<Square> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in offsets {
            let Some(to) = from.offset(d_row, d_col) else {
                continue;
            };
            match board.piece_at(to) {
                None => moves.push(to),
                Some(target) if target.side != side => moves.push(to),
                Some(_) => {}
            }
        }
        moves
    }

    /// 滑行型棋種（主教、城堡、皇后）：沿各方向前進直到邊界
    /// 遇己方棋子在其前一格停下，遇敵子吃下後停下
    pub fn sliding_moves(
        board: &Board,
        from: Square,
        side: Side,
        directions: &[(isize, isize)],
    ) -> Vec<Square> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in directions {
            let mut current = from;
            while let Some(to) = current.offset(d_row, d_col) {
                match board.piece_at(to) {
                    None => {
                        moves.push(to);
                        current = to;
                    }
                    Some(target) => {
                        if target.side != side {
                            moves.push(to);
                        }
                        break;
                    }
                }
            }
        }
        moves
    }
}
