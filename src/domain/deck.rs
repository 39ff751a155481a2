use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank, Suit};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

pub const DECK_SIZE: usize = 52;

/// Колода на одну раздачу.
///
/// Карты берутся с конца вектора (pop). Колода не "перезапускается":
/// для новой раздачи создаётся новая через `new_shuffled`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    drawn: usize,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке:
    /// Hearts 2..A, Diamonds 2..A, Clubs 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Deck { cards, drawn: 0 }
    }

    /// Новая колода, перемешанная переданным RNG.
    pub fn new_shuffled(rng: &mut dyn RandomSource) -> Self {
        let mut deck = Self::standard_52();
        rng.shuffle(&mut deck.cards);
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Сколько карт уже взято с момента перемешивания.
    pub fn drawn(&self) -> usize {
        self.drawn
    }

    /// Оставшиеся карты (сверху колоды = последний элемент).
    pub fn remaining(&self) -> &[Card] {
        &self.cards
    }

    /// Взять одну карту сверху колоды.
    pub fn draw(&mut self) -> Result<Card, EngineError> {
        let card = self.cards.pop().ok_or(EngineError::DeckExhausted)?;
        self.drawn += 1;
        Ok(card)
    }

    /// Взять n карт сверху. Либо все n, либо ошибка без изменения колоды.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        if self.cards.len() < n {
            return Err(EngineError::DeckExhausted);
        }
        let mut taken = Vec::with_capacity(n);
        for _ in 0..n {
            taken.push(self.draw()?);
        }
        Ok(taken)
    }
}
