use serde::{Deserialize, Serialize};

use crate::domain::{ActorId, Card, Chips, HandId, Stage, TableId};
use crate::engine::actions::Action;
use crate::engine::pot::Payout;

/// Тип события в раздаче. Одно событие на каждый переход состояния.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        table_id: TableId,
        hand_id: HandId,
        blind_amount: Chips,
        actors: Vec<ActorId>,
    },

    /// Все внесли блайнд.
    BlindsPosted {
        contributions: Vec<(ActorId, Chips)>,
        pot_after: Chips,
    },

    /// Движок ждёт действие человека.
    AwaitingHuman { actor_id: ActorId },

    /// Человек не успел – за него сходили автоматически.
    HumanTimedOut { actor_id: ActorId, action: Action },

    /// Действие участника.
    ActorActed {
        actor_id: ActorId,
        action: Action,
        resulting_commitment: Chips,
        balance_after: Chips,
        pot_after: Chips,
    },

    /// Переход на новую стадию и открытые на ней общие карты.
    StageAdvanced {
        stage: Stage,
        revealed_community_cards: Vec<Card>,
    },

    /// Банк разыгран.
    HandResolved {
        winners: Vec<ActorId>,
        pot_awarded: Chips,
        payouts: Vec<Payout>,
        closing_balances: Vec<(ActorId, Chips)>,
    },

    /// Раздача прервана, балансы откатаны к стартовым.
    HandAborted {
        reason: String,
        restored_balances: Vec<(ActorId, Chips)>,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// События начиная с индекса `from` (для опроса снаружи).
    pub fn since(&self, from: u32) -> &[HandEvent] {
        let start = (from as usize).min(self.events.len());
        &self.events[start..]
    }

    /// Все действия участника в порядке появления.
    pub fn actions_of(&self, actor_id: ActorId) -> impl Iterator<Item = &Action> + '_ {
        self.events.iter().filter_map(move |e| match &e.kind {
            HandEventKind::ActorActed { actor_id: id, action, .. } if *id == actor_id => Some(action),
            _ => None,
        })
    }
}
