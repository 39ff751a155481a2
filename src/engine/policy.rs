use serde::{Deserialize, Serialize};

use crate::domain::{ActorId, Chips, Stage};
use crate::engine::actions::Action;
use crate::engine::config::BotDecisionTable;
use crate::engine::RandomSource;

/// Что видит участник в момент решения. Чужих карманных карт тут нет.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicState {
    pub actor_id: ActorId,
    pub stage: Stage,
    pub pot_total: Chips,
    /// Максимальный `round_commitment` среди не сбросивших.
    pub minimum_call: Chips,
    /// Сколько этому участнику не хватает до колла.
    pub to_call: Chips,
    pub balance: Chips,
    pub round_commitment: Chips,
    pub blind_amount: Chips,
    /// Можно ли ещё повышать на этой улице.
    pub can_raise: bool,
    /// Сколько соперников ещё в раздаче.
    pub opponents_in_hand: usize,
}

/// Ответ политики.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyDecision {
    Act(Action),
    /// Решение придёт извне (`submit_human_action`).
    AwaitExternal,
}

/// Кто принимает решение за участника.
pub trait ActionPolicy: Send {
    fn decide(&mut self, state: &PublicState, rng: &mut dyn RandomSource) -> PolicyDecision;
}

/// Человек: движок приостанавливается и ждёт запрос действия.
#[derive(Clone, Copy, Debug, Default)]
pub struct HumanPolicy;

impl ActionPolicy for HumanPolicy {
    fn decide(&mut self, _state: &PublicState, _rng: &mut dyn RandomSource) -> PolicyDecision {
        PolicyDecision::AwaitExternal
    }
}

/// Бот со случайной таблицей решений.
///
/// Выбирает fold / check / raise по вероятностям улицы и подгоняет выбор
/// под легальное действие: check превращается в call, если есть что
/// уравнивать, call и raise – в all-in, если стека не хватает.
#[derive(Clone, Debug)]
pub struct BotPolicy {
    table: BotDecisionTable,
}

impl BotPolicy {
    pub fn new(table: BotDecisionTable) -> Self {
        Self { table }
    }

    fn passive(state: &PublicState) -> Action {
        if state.to_call.is_zero() {
            Action::Check
        } else if state.balance > state.to_call {
            Action::Call
        } else {
            Action::AllIn
        }
    }

    fn aggressive(&self, state: &PublicState) -> Action {
        if !state.can_raise {
            return Self::passive(state);
        }

        let raise_by = Chips(state.blind_amount.0.saturating_mul(self.table.raise_blinds));
        let amount = state.to_call + raise_by;

        if amount >= state.balance {
            Action::AllIn
        } else if state.to_call.is_zero() {
            Action::Bet(amount)
        } else {
            Action::Raise(amount)
        }
    }
}

impl ActionPolicy for BotPolicy {
    fn decide(&mut self, state: &PublicState, rng: &mut dyn RandomSource) -> PolicyDecision {
        let odds = self.table.for_stage(state.stage);
        // Веса нормируются на сумму: доля повышения – ровно `raise / total`.
        let total = odds.fold + odds.check + odds.raise;
        if total <= 0.0 {
            return PolicyDecision::Act(Self::passive(state));
        }
        let roll = rng.roll() * total;

        let action = if roll < odds.fold {
            Action::Fold
        } else if roll < odds.fold + odds.check {
            Self::passive(state)
        } else {
            self.aggressive(state)
        };

        PolicyDecision::Act(action)
    }
}
