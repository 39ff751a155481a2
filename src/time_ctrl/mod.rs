// src/time_ctrl/mod.rs
//! Контроль времени хода человека.
//!
//! Ботам таймер не нужен: они решают синхронно. Для человека движок
//! запускает `TurnClock`, а орхестратор сообщает, сколько прошло времени.

pub mod clock;

pub use clock::{TimeoutState, TurnClock};
