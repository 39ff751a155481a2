//! Движок раздачи: ставки, переход стадий, решения ботов, шоудаун.
//!
//! Высокоуровневый объект: `HandEngine`
//! Основные операции:
//!   - `request_hand` – запустить новую раздачу
//!   - `advance` – один шаг машины состояний
//!   - `submit_human_action` – действие человека, когда движок его ждёт

pub mod actions;
pub mod betting;
pub mod config;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod policy;
pub mod pot;
pub mod showdown;
pub mod validation;

pub use actions::Action;
pub use config::{BotDecisionTable, BotProfile, ConfigError, EngineConfig, StageOdds, TableDefaults};
pub use errors::{EngineError, ErrorClass};
pub use game_loop::{HandEngine, HandStatus, SeatRequest};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use policy::{ActionPolicy, BotPolicy, HumanPolicy, PolicyDecision, PublicState};
pub use pot::{Payout, PotLedger};
pub use showdown::{RandomWinnerSelector, WinnerSelector};

use crate::domain::Card;

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource: Send {
    /// Перемешать карты (равномерно по всем перестановкам).
    fn shuffle(&mut self, cards: &mut [Card]);

    /// Равномерное число из [0, 1).
    fn roll(&mut self) -> f64;

    /// Равномерный индекс из `0..upper`. `upper` должен быть > 0.
    fn pick(&mut self, upper: usize) -> usize;
}
