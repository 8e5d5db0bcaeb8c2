//! ai.rs：
//! - 電腦方的走法選擇：把陣營所有擬合法走法攤平後均勻抽選一步。
//! - 不含搜尋與局面評估；亂數來源由呼叫端注入，方便測試重現。
use crate::*;
use rand::prelude::IndexedRandom;

/// 列出陣營所有 (from, to) 擬合法走法
pub fn all_moves(board: &Board, side: Side) -> Vec<Move> {
    let mut moves = Vec::new();
    for (from, _) in board.pieces_of(side) {
        for to in legal_moves(board, from) {
            moves.push(Move { from, to });
        }
    }
    moves
}

/// 均勻隨機挑一步；無步可走回傳 None
pub fn choose_move(board: &Board, side: Side, rng: &mut impl rand::Rng) -> Option<Move> {
    all_moves(board, side).as_slice().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    fn board_with(pieces: &[(usize, usize, Side, PieceKind)]) -> Board {
        let mut board = Board::empty();
        for &(row, col, side, kind) in pieces {
            board.set_piece(sq(row, col), Some(Piece { side, kind }));
        }
        board
    }

    #[test]
    fn test_all_moves_counts() {
        // 騎士 8 步 + 兵 1 步；敵方棋子不計入
        let board = board_with(&[
            (4, 4, Side::White, PieceKind::Knight),
            (1, 0, Side::White, PieceKind::Pawn),
            (0, 4, Side::Black, PieceKind::Queen),
        ]);
        assert_eq!(all_moves(&board, Side::White).len(), 9);

        // 標準開局雙方各 8 兵 * 1 + 2 騎士 * 2 = 12 步
        let standard = Board::standard();
        assert_eq!(all_moves(&standard, Side::White).len(), 12);
        assert_eq!(all_moves(&standard, Side::Black).len(), 12);
    }

    #[test]
    fn test_choose_move_none_when_stuck() {
        // 黑兵在底排：直走出界、無敵子可吃
        let board = board_with(&[(7, 0, Side::Black, PieceKind::Pawn)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(choose_move(&board, Side::Black, &mut rng), None);
        // 沒有任何棋子的陣營也一樣
        assert_eq!(choose_move(&board, Side::White, &mut rng), None);
    }

    #[test]
    fn test_choose_move_always_legal() {
        let board = Board::standard();
        let candidates: BTreeSet<_> = all_moves(&board, Side::White)
            .into_iter()
            .map(|m| (m.from, m.to))
            .collect();

        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = BTreeSet::new();
        for _ in 0..100 {
            let mv = choose_move(&board, Side::White, &mut rng).unwrap();
            assert!(candidates.contains(&(mv.from, mv.to)));
            seen.insert((mv.from, mv.to));
        }
        // 100 次抽選應該碰到不只一種走法
        assert!(seen.len() > 1, "抽選結果過於集中: {:?}", seen);
    }

    #[test]
    fn test_choose_move_deterministic_with_seed() {
        let board = Board::standard();
        let a = choose_move(&board, Side::Black, &mut StdRng::seed_from_u64(7));
        let b = choose_move(&board, Side::Black, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
