use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{ActorId, HandId, TableId};

/// Стадия раздачи. Порядок объявления = порядок прохождения,
/// поэтому `Ord` можно использовать для проверки монотонности.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    /// Остался один претендент (или человек сбросил карты) – банк
    /// разыгрывается без открытия оставшихся карт.
    FoldedOut,
}

impl Stage {
    /// Следующая улица ставок (или шоудаун после ривера).
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::PreFlop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::Showdown),
            Stage::Showdown | Stage::FoldedOut => None,
        }
    }

    /// Сколько общих карт открывается при переходе НА эту стадию.
    pub fn cards_revealed(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Showdown | Stage::FoldedOut)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::PreFlop => "PRE_FLOP",
            Stage::Flop => "FLOP",
            Stage::Turn => "TURN",
            Stage::River => "RIVER",
            Stage::Showdown => "SHOWDOWN",
            Stage::FoldedOut => "FOLDED_OUT",
        };
        f.write_str(s)
    }
}

/// Итог раздачи для конкретного участника.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorHandResult {
    pub actor_id: ActorId,
    pub opening_balance: Chips,
    pub closing_balance: Chips,
    /// Сколько выиграл из банка.
    pub won: Chips,
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    /// Финальная стадия: `Showdown` или `FoldedOut`.
    pub final_stage: Stage,
    /// Последняя улица ставок, до которой дошла раздача.
    pub last_betting_stage: Stage,
    pub board: Vec<Card>,
    pub pot_awarded: Chips,
    /// Победители в порядке хода; первый получает остаток от деления.
    pub winners: Vec<ActorId>,
    /// Открытые карты претендентов (только при шоудауне).
    pub revealed_hands: Vec<(ActorId, Vec<Card>)>,
    pub results: Vec<ActorHandResult>,
}

impl HandSummary {
    pub fn closing_balances(&self) -> Vec<(ActorId, Chips)> {
        self.results
            .iter()
            .map(|r| (r.actor_id, r.closing_balance))
            .collect()
    }

    pub fn result_for(&self, actor_id: ActorId) -> Option<&ActorHandResult> {
        self.results.iter().find(|r| r.actor_id == actor_id)
    }
}
