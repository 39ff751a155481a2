use serde::{Deserialize, Serialize};

use crate::domain::{ActorId, Chips, Stage};

/// Состояние раунда ставок на конкретной улице.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    /// Улица, к которой относится этот раунд.
    pub stage: Stage,
    /// Минимальный колл: максимальный `round_commitment` среди не сбросивших.
    pub minimum_call: Chips,
    /// Сколько раз на этой улице повышали.
    pub raises: u8,
    /// Последний агрессор (bet/raise/all-in выше колла).
    pub last_aggressor: Option<ActorId>,
    /// Очередь тех, кто ещё должен сделать действие на этой улице.
    pub to_act: Vec<ActorId>,
}

impl BettingRound {
    pub fn new(stage: Stage, minimum_call: Chips, to_act: Vec<ActorId>) -> Self {
        Self {
            stage,
            minimum_call,
            raises: 0,
            last_aggressor: None,
            to_act,
        }
    }

    /// Чей сейчас ход.
    pub fn current(&self) -> Option<ActorId> {
        self.to_act.first().copied()
    }

    /// Убрать участника из очереди, если он там есть.
    pub fn mark_acted(&mut self, actor_id: ActorId) {
        self.to_act.retain(|a| *a != actor_id);
    }

    /// Обновить состояние после повышения и перезапустить очередь
    /// (новую очередь формирует движок).
    pub fn on_raise(&mut self, actor_id: ActorId, new_minimum: Chips, new_to_act: Vec<ActorId>) {
        self.minimum_call = new_minimum;
        self.raises = self.raises.saturating_add(1);
        self.last_aggressor = Some(actor_id);
        self.to_act = new_to_act;
    }

    /// Раунд завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
