// src/time_ctrl/clock.rs
//! Локальный таймер хода (shot clock) для участника, которого ждём.

use serde::{Deserialize, Serialize};

use crate::domain::ActorId;

/// Состояние таймера текущего хода.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TurnClock {
    /// Чей ход сейчас идёт под таймером (None – таймер не запущен).
    pub current_actor: Option<ActorId>,
    /// Сколько секунд ещё осталось на этот ход.
    pub remaining_secs: u32,
}

/// Результат "протекания" времени.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeoutState {
    /// Время ещё не вышло.
    Ongoing { remaining_secs: u32 },
    /// Время на ход исчерпано – нужен авто-check или авто-fold.
    TimedOut { actor_id: ActorId },
    /// Сейчас нет хода под таймером.
    NoActiveActor,
}

impl TurnClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Начать ход участника с лимитом `limit_secs`.
    pub fn start_turn(&mut self, actor_id: ActorId, limit_secs: u32) {
        self.current_actor = Some(actor_id);
        self.remaining_secs = limit_secs;
    }

    /// Очистить таймер (участник сходил сам).
    pub fn clear(&mut self) {
        self.current_actor = None;
        self.remaining_secs = 0;
    }

    pub fn is_running(&self) -> bool {
        self.current_actor.is_some()
    }

    /// Симулируем протекание `delta_secs` для текущего участника.
    /// После `TimedOut` таймер сбрасывается.
    pub fn elapse(&mut self, delta_secs: u32) -> TimeoutState {
        let actor_id = match self.current_actor {
            Some(id) => id,
            None => return TimeoutState::NoActiveActor,
        };

        if delta_secs < self.remaining_secs {
            self.remaining_secs -= delta_secs;
            return TimeoutState::Ongoing {
                remaining_secs: self.remaining_secs,
            };
        }

        self.clear();
        TimeoutState::TimedOut { actor_id }
    }
}
