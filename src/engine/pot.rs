use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ActorId, Chips};
use crate::engine::errors::EngineError;

/// Выплата одному победителю.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub actor_id: ActorId,
    pub amount: Chips,
}

/// Банк раздачи: общий размер и вклад каждого участника.
///
/// Это чистый накопитель. Балансы он не читает – проверка, что фишек
/// хватает, лежит на движке.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotLedger {
    total: Chips,
    contributions: BTreeMap<ActorId, Chips>,
}

impl PotLedger {
    /// Пустой банк для набора участников раздачи.
    pub fn new<I>(actors: I) -> Self
    where
        I: IntoIterator<Item = ActorId>,
    {
        Self {
            total: Chips::ZERO,
            contributions: actors.into_iter().map(|id| (id, Chips::ZERO)).collect(),
        }
    }

    pub fn total(&self) -> Chips {
        self.total
    }

    pub fn contribution_of(&self, actor_id: ActorId) -> Option<Chips> {
        self.contributions.get(&actor_id).copied()
    }

    pub fn contributions(&self) -> impl Iterator<Item = (ActorId, Chips)> + '_ {
        self.contributions.iter().map(|(id, c)| (*id, *c))
    }

    /// Добавить взнос участника. Либо меняются и total, и вклад, либо ничего.
    pub fn add_contribution(&mut self, actor_id: ActorId, amount: Chips) -> Result<(), EngineError> {
        let invalid = EngineError::InvalidContribution { actor_id, amount };

        let current = self.contributions.get(&actor_id).copied().ok_or(invalid)?;
        let new_total = self
            .total
            .checked_add(amount)
            .ok_or(EngineError::InvalidContribution { actor_id, amount })?;
        let new_contribution = current
            .checked_add(amount)
            .ok_or(EngineError::InvalidContribution { actor_id, amount })?;

        self.total = new_total;
        self.contributions.insert(actor_id, new_contribution);
        Ok(())
    }

    /// Проверка: total == сумме вкладов.
    pub fn verify(&self) -> Result<(), EngineError> {
        let sum: Chips = self.contributions.values().sum();
        if sum != self.total {
            return Err(EngineError::PotMismatch {
                expected: sum,
                actual: self.total,
            });
        }
        Ok(())
    }

    /// Разыграть банк между победителями.
    ///
    /// Делим поровну; остаток от деления целиком получает первый победитель
    /// в переданном порядке. После вызова банк пуст.
    pub fn resolve(&mut self, winners: &[ActorId]) -> Result<Vec<Payout>, EngineError> {
        self.verify()?;

        let mut seen = Vec::with_capacity(winners.len());
        for id in winners {
            if seen.contains(id) || !self.contributions.contains_key(id) {
                return Err(EngineError::InvalidWinnerSet(winners.to_vec()));
            }
            seen.push(*id);
        }
        if winners.is_empty() {
            return Err(EngineError::InvalidWinnerSet(Vec::new()));
        }

        let (share, remainder) = self.total.split(winners.len() as u64);
        let payouts = winners
            .iter()
            .enumerate()
            .map(|(i, &actor_id)| Payout {
                actor_id,
                amount: if i == 0 { share + remainder } else { share },
            })
            .collect();

        self.reset();
        Ok(payouts)
    }

    /// Обнулить банк, не трогая список участников.
    pub fn reset(&mut self) {
        self.total = Chips::ZERO;
        for c in self.contributions.values_mut() {
            *c = Chips::ZERO;
        }
    }
}
