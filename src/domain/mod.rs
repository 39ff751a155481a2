//! Доменная модель: карты, колода, фишки, участники, стадии, банкролл.

pub mod actor;
pub mod bankroll;
pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;

// Базовые идентификаторы.
pub type ActorId = u64;
pub type TableId = u64;
pub type HandId = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Card и т.п.
pub use actor::*;
pub use bankroll::*;
pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
