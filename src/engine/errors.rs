use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ActorId, Chips};

/// Класс ошибки: определяет, как на неё реагирует движок.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorClass {
    /// Ошибка ввода игрока: отклоняем действие, раздача продолжается.
    UserInput,
    /// Неверная конфигурация: раздача не начинается.
    Configuration,
    /// Нарушен внутренний инвариант: раздача прерывается с откатом балансов.
    InternalInvariant,
}

/// Ошибки движка раздачи.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Некорректная конфигурация раздачи: {0}")]
    InvalidConfiguration(String),

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Движок сейчас не ждёт действия человека")]
    NotAwaitingInput,

    #[error("Недопустимое действие: {0}")]
    IllegalAction(&'static str),

    #[error("Недостаточно фишек: нужно {needed}, есть {available}")]
    InsufficientBalance { needed: Chips, available: Chips },

    #[error("Невозможно выполнить check – нужно уравнять {to_call}")]
    CannotCheck { to_call: Chips },

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    CannotCall,

    #[error("Размер рейза слишком мал: нужно больше {to_call}")]
    RaiseTooSmall { to_call: Chips },

    #[error("Лимит повышений на этой улице исчерпан")]
    RaiseCapReached,

    #[error("Колода пуста")]
    DeckExhausted,

    #[error("Некорректный взнос {amount} от участника {actor_id}")]
    InvalidContribution { actor_id: ActorId, amount: Chips },

    #[error("Нарушен баланс фишек: ожидалось {expected}, получено {actual}")]
    PotMismatch { expected: Chips, actual: Chips },

    #[error("Политика бота {actor_id} выдала недопустимое действие")]
    PolicyContractViolation {
        actor_id: ActorId,
        #[source]
        source: Box<EngineError>,
    },

    #[error("Селектор победителей вернул некорректный набор: {0:?}")]
    InvalidWinnerSet(Vec<ActorId>),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}

impl EngineError {
    pub fn class(&self) -> ErrorClass {
        use EngineError::*;

        match self {
            InvalidConfiguration(_) => ErrorClass::Configuration,

            HandAlreadyInProgress
            | NoActiveHand
            | NotAwaitingInput
            | IllegalAction(_)
            | InsufficientBalance { .. }
            | CannotCheck { .. }
            | CannotCall
            | RaiseTooSmall { .. }
            | RaiseCapReached => ErrorClass::UserInput,

            DeckExhausted
            | InvalidContribution { .. }
            | PotMismatch { .. }
            | PolicyContractViolation { .. }
            | InvalidWinnerSet(_)
            | Internal(_) => ErrorClass::InternalInvariant,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.class() == ErrorClass::InternalInvariant
    }
}
