//! Инфраструктурный слой вокруг движка:
//! - генерация ID;
//! - RNG-реализации для движка;
//! - хранилище банкролла и сериализация доступа к нему;
//! - настройка логов для бинарников.

pub mod bankroll;
pub mod ids;
pub mod logging;
pub mod persistence;
pub mod rng;
pub mod rng_seed;

pub use bankroll::{BankrollLease, BankrollLedger, LoginOutcome};
pub use ids::*;
pub use logging::init_tracing;
pub use persistence::{BankrollError, BankrollStore, InMemoryBankrollStore, JsonFileBankrollStore};
pub use rng::*;
pub use rng_seed::RngSeed;
