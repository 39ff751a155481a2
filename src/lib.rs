//! Движок жизненного цикла покерной раздачи.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, участники, итоги раздачи, банкролл;
//! - `engine` – банк, ставки, политики действий, машина стадий (`HandEngine`);
//! - `time_ctrl` – таймер хода человека;
//! - `infra` – RNG, id, хранилище банкролла;
//! - `api` – сериализуемые команды и снимки для клиента.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod time_ctrl;

pub use engine::{EngineError, HandEngine, HandStatus};
