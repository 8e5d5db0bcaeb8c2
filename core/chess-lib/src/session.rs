//! session.rs：
//! - 對局流程：回合交替、走子驗證與套用、計分、吃王終局與重新開始。
//! - 電腦回合的延遲回覆也在此管理；亂數與時鐘皆由呼叫端注入。
//! - 不負責走法幾何（movement.rs）與隨機抽選（ai.rs）本身。
use crate::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_WHITE_NAME: &str = "White";
pub const DEFAULT_BLACK_NAME: &str = "Black";
pub const DEFAULT_HUMAN_NAME: &str = "Player";
pub const DEFAULT_AGENT_NAME: &str = "Computer";

/// 人類走完後電腦回覆前的固定延遲，留時間給呼叫端畫盤面
pub const AGENT_REPLY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    LocalTwoPlayer,
    PlayerVsAgent {
        agent_side: Side,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: MaterialValue,
    pub matches_won: MatchCount,
}

/// 對局設定；名字留空會落回預設值
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct GameConfig {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub white_name: Option<PlayerName>,
    #[serde(default)]
    pub black_name: Option<PlayerName>,
    /// 未指定時使用標準開局
    #[serde(default)]
    pub placements: Option<Vec<Placement>>,
}

impl GameConfig {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let func = "GameConfig::from_toml";

        toml::from_str(text).map_err(|source| Error::Config { func, source })
    }
}

/// 走子結果，錯誤（拒絕）另以 Error 表示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Quiet,
    Capture { value: MaterialValue },
    GameOver { winner: PlayerName },
}

/// 輪詢電腦回覆的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentReply {
    /// 沒有排程中的電腦回合
    Idle,
    /// 延遲未到
    NotDue,
    Moved {
        mv: Move,
        outcome: MoveOutcome,
    },
    /// 電腦無步可走，讓手交還對手
    Passed,
}

/// 時鐘介面：對局只讀取單調遞增的經過時間，測試可注入假時鐘
pub trait Clock {
    fn now(&self) -> Duration;
}

/// 以建立時刻為原點的系統時鐘
#[derive(Debug)]
pub struct SystemClock {
    origin: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: std::time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

// 排程中的電腦回合；due 於第一次輪詢時依時鐘定錨
#[derive(Debug, Clone, Copy)]
struct PendingReply {
    due: Option<Duration>,
}

#[derive(Debug)]
pub struct GameSession {
    board: Board,
    initial_board: Board,
    mode: Mode,
    white_name: PlayerName,
    black_name: PlayerName,
    white_score: Score,
    black_score: Score,
    active_side: Side,
    active: bool,
    pending_reply: Option<PendingReply>,
}

impl GameSession {
    /// 建立新對局：盤面就位、白方先行、分數歸零
    pub fn new(config: GameConfig) -> Result<Self, Error> {
        let func = "GameSession::new";

        let board = match &config.placements {
            Some(placements) => Board::from_placements(placements).map_err(|e| Error::Wrap {
                func,
                source: Box::new(e),
            })?,
            None => Board::standard(),
        };
        let (white_name, black_name) =
            resolve_names(config.mode, config.white_name, config.black_name);
        let mut session = GameSession {
            initial_board: board.clone(),
            board,
            mode: config.mode,
            white_name,
            black_name,
            white_score: Score::default(),
            black_score: Score::default(),
            active_side: Side::White,
            active: true,
            pending_reply: None,
        };
        // 電腦執白時，開局第一手就是排程中的電腦回合
        session.arm_reply_if_agent_turn();
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn score(&self, side: Side) -> Score {
        match side {
            Side::White => self.white_score,
            Side::Black => self.black_score,
        }
    }

    pub fn player_name(&self, side: Side) -> &str {
        match side {
            Side::White => &self.white_name,
            Side::Black => &self.black_name,
        }
    }

    pub fn reply_pending(&self) -> bool {
        self.pending_reply.is_some()
    }

    /// 驗證並套用一步棋；任何拒絕都不改動任何狀態
    pub fn attempt_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome, Error> {
        let func = "GameSession::attempt_move";

        if !self.active {
            return Err(Error::GameEnded { func });
        }
        if self.pending_reply.is_some() {
            return Err(Error::AgentReplyPending { func });
        }
        let Some(piece) = self.board.piece_at(from) else {
            return Err(Error::EmptySquare { func, square: from });
        };
        if piece.side != self.active_side {
            return Err(Error::NotYourTurn { func, square: from });
        }
        if !legal_moves(&self.board, from).contains(&to) {
            return Err(Error::IllegalMove { func, from, to });
        }
        apply_move(self, from, to).map_err(|e| Error::Wrap {
            func,
            source: Box::new(e),
        })
    }

    /// 輪詢排程中的電腦回合；延遲到點才抽選並套用走法
    /// 非電腦回合時回傳 Idle，呼叫端可以放心每個 frame 輪詢
    pub fn poll_agent(
        &mut self,
        clock: &impl Clock,
        rng: &mut impl rand::Rng,
    ) -> Result<AgentReply, Error> {
        let func = "GameSession::poll_agent";

        let Some(pending) = self.pending_reply else {
            return Ok(AgentReply::Idle);
        };
        if !self.active {
            // 終局不會留著排程，防禦性檢查
            self.pending_reply = None;
            return Err(Error::GameEnded { func });
        }
        let Mode::PlayerVsAgent { agent_side } = self.mode else {
            self.pending_reply = None;
            return Ok(AgentReply::Idle);
        };
        match pending.due {
            // 第一次輪詢才定錨延遲，讓呼叫端先畫完前一步
            None => {
                self.pending_reply = Some(PendingReply {
                    due: Some(clock.now() + AGENT_REPLY_DELAY),
                });
                Ok(AgentReply::NotDue)
            }
            Some(due) if clock.now() < due => Ok(AgentReply::NotDue),
            Some(_) => {
                self.pending_reply = None;
                match choose_move(&self.board, agent_side, rng) {
                    None => {
                        // 無步可走：讓手。不判和也不判輸，對局繼續
                        self.active_side = agent_side.opponent();
                        Ok(AgentReply::Passed)
                    }
                    Some(mv) => {
                        let outcome =
                            apply_move(self, mv.from, mv.to).map_err(|e| Error::Wrap {
                                func,
                                source: Box::new(e),
                            })?;
                        Ok(AgentReply::Moved { mv, outcome })
                    }
                }
            }
        }
    }

    /// 盤面回到起始佈局、輪到白方、恢復進行中；分數保留
    pub fn restart(&mut self) {
        self.board = self.initial_board.clone();
        self.active_side = Side::White;
        self.active = true;
        self.pending_reply = None;
        self.arm_reply_if_agent_turn();
    }

    fn score_mut(&mut self, side: Side) -> &mut Score {
        match side {
            Side::White => &mut self.white_score,
            Side::Black => &mut self.black_score,
        }
    }

    fn arm_reply_if_agent_turn(&mut self) {
        if let Mode::PlayerVsAgent { agent_side } = self.mode {
            if self.active && self.active_side == agent_side {
                self.pending_reply = Some(PendingReply { due: None });
            }
        }
    }
}

use inner::*;
mod inner {
    use super::*;

    /// 套用一步已驗證的走法：吃子計分、吃王終局、搬子與回合交替
    pub fn apply_move(
        session: &mut GameSession,
        from: Square,
        to: Square,
    ) -> Result<MoveOutcome, Error> {
        let func = "apply_move";

        let Some(piece) = session.board.piece_at(from) else {
            return Err(Error::EmptySquare { func, square: from });
        };
        let captured = move_piece(&mut session.board, from, to).map_err(|e| Error::Wrap {
            func,
            source: Box::new(e),
        })?;
        let outcome = match captured {
            Some(target) if target.kind == PieceKind::King => {
                // 吃王：終局、勝場 +1；吃王本身不計分
                session.active = false;
                session.score_mut(piece.side).matches_won += 1;
                MoveOutcome::GameOver {
                    winner: session.player_name(piece.side).to_string(),
                }
            }
            Some(target) => {
                let value = material_value(target.kind);
                session.score_mut(piece.side).points += value;
                MoveOutcome::Capture { value }
            }
            None => MoveOutcome::Quiet,
        };
        if session.active {
            session.active_side = session.active_side.opponent();
            session.arm_reply_if_agent_turn();
        }
        Ok(outcome)
    }

    /// 名字留空或全空白時落回預設值；電腦方預設叫 Computer
    pub fn resolve_names(
        mode: Mode,
        white: Option<PlayerName>,
        black: Option<PlayerName>,
    ) -> (PlayerName, PlayerName) {
        let (white_default, black_default) = match mode {
            Mode::LocalTwoPlayer => (DEFAULT_WHITE_NAME, DEFAULT_BLACK_NAME),
            Mode::PlayerVsAgent {
                agent_side: Side::White,
            } => (DEFAULT_AGENT_NAME, DEFAULT_HUMAN_NAME),
            Mode::PlayerVsAgent {
                agent_side: Side::Black,
            } => (DEFAULT_HUMAN_NAME, DEFAULT_AGENT_NAME),
        };
        (
            name_or(white, white_default),
            name_or(black, black_default),
        )
    }

    fn name_or(name: Option<PlayerName>, default: &str) -> PlayerName {
        match name {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => default.to_string(),
        }
    }
}
