// 對局錯誤型別，攜帶 function name 與 context，支援來源錯誤巢狀
use crate::*;
use thiserror::Error;

/// 對局核心錯誤型別
#[derive(Debug, Error)]
pub enum Error {
    #[error("`{func}`: 座標 ({row},{col}) 超出棋盤")]
    SquareOffBoard {
        func: &'static str,
        row: usize,
        col: usize,
    },

    #[error("`{func}`: 位置 {square:?} 無棋子")]
    EmptySquare {
        func: &'static str,
        square: Square,
    },

    #[error("`{func}`: 位置 {square:?} 的棋子不屬於行動方")]
    NotYourTurn {
        func: &'static str,
        square: Square,
    },

    #[error("`{func}`: {from:?} 的棋子不能走到 {to:?}")]
    IllegalMove {
        func: &'static str,
        from: Square,
        to: Square,
    },

    #[error("`{func}`: 對局已結束")]
    GameEnded { func: &'static str },

    #[error("`{func}`: 電腦回合尚未完成")]
    AgentReplyPending { func: &'static str },

    #[error("`{func}`: 座標 ({row},{col}) 重複擺放棋子")]
    DuplicatePlacement {
        func: &'static str,
        row: usize,
        col: usize,
    },

    #[error("`{func}`: 設定檔解析失敗: {source}")]
    Config {
        func: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("`{func}`: 包裝: {source}")]
    Wrap {
        func: &'static str,
        #[source]
        source: Box<Error>,
    },
}

pub fn root_error(err: &Error) -> &Error {
    let mut err = err;
    while let Error::Wrap { source, .. } = err {
        err = source.as_ref();
    }
    err
}
