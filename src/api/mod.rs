//! Внешний API движка раздачи.
//!
//! - команды (commands.rs) – всё, что меняет состояние стола;
//! - DTO (dto.rs) – снимки раздачи для клиента;
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;

pub use commands::*;
pub use dto::*;
pub use errors::*;
