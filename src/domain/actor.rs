use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::ActorId;

/// Кто принимает решения за участника.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActorKind {
    /// Живой игрок: движок ждёт его действие извне.
    Human,
    /// Бот: решение принимается синхронно политикой.
    Bot,
}

/// Состояние участника в рамках одной раздачи.
///
/// Баланс переживает раздачу (его потом пишут обратно в банкролл),
/// всё остальное сбрасывается при старте следующей.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorState {
    pub id: ActorId,
    pub display_name: String,
    pub kind: ActorKind,
    /// Фишки, которые ещё не поставлены.
    pub balance: Chips,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Вклад на текущей улице.
    pub round_commitment: Chips,
    /// Вклад за всю раздачу.
    pub total_commitment: Chips,
    pub folded: bool,
    pub is_all_in: bool,
}

impl ActorState {
    pub fn new(id: ActorId, display_name: impl Into<String>, kind: ActorKind, balance: Chips) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            kind,
            balance,
            hole_cards: Vec::new(),
            round_commitment: Chips::ZERO,
            total_commitment: Chips::ZERO,
            folded: false,
            is_all_in: false,
        }
    }

    pub fn is_human(&self) -> bool {
        self.kind == ActorKind::Human
    }

    /// Ещё претендует на банк.
    pub fn is_in_hand(&self) -> bool {
        !self.folded
    }

    /// Может ли ещё делать ставки на этой раздаче.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.is_all_in
    }

    /// Перенести фишки из стека в текущую ставку. Вызывающий обязан
    /// проверить, что баланса хватает.
    pub(crate) fn commit(&mut self, amount: Chips) -> Option<()> {
        let balance = self.balance.checked_sub(amount)?;
        let round = self.round_commitment.checked_add(amount)?;
        let total = self.total_commitment.checked_add(amount)?;

        self.balance = balance;
        self.round_commitment = round;
        self.total_commitment = total;
        if self.balance.is_zero() {
            self.is_all_in = true;
        }
        Some(())
    }

    /// Сброс под новую раздачу.
    pub(crate) fn reset_for_hand(&mut self) {
        self.hole_cards.clear();
        self.round_commitment = Chips::ZERO;
        self.total_commitment = Chips::ZERO;
        self.folded = false;
        self.is_all_in = false;
    }
}
