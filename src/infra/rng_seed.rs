//! RngSeed — доменно-разделённый seed для RNG стола.
//!
//! Позволяет:
//!   - хранить базовый seed (u64 или [u8;32])
//!   - делать детерминированное hash-reseeding:
//!         new = H(domain || old || table_id || hand_id || index)
//!   - создавать DeterministicRng из seed
//!
//! Так у каждого стола свой независимый поток случайности.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::rng::DeterministicRng;

const DOMAIN: &[u8] = b"POKER_HAND_ENGINE_RNG_V1";

/// 32-байтовый seed для RNG.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RngSeed {
    pub bytes: [u8; 32],
}

impl RngSeed {
    /// Создать seed из 32 байт.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self { bytes }
    }

    /// Создать seed из u64 (для удобства тестов).
    pub fn from_u64(x: u64) -> Self {
        let mut b = [0u8; 32];
        b[..8].copy_from_slice(&x.to_le_bytes());
        Self { bytes: b }
    }

    /// Доменное хэш-расширение с включением контекста.
    ///
    /// Пример вызова:
    ///     new_seed = old_seed.derive(table, hand, index)
    pub fn derive(&self, table_id: u64, hand_id: u64, index: u64) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(DOMAIN);
        hasher.update(self.bytes);
        hasher.update(table_id.to_le_bytes());
        hasher.update(hand_id.to_le_bytes());
        hasher.update(index.to_le_bytes());

        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        Self { bytes: out }
    }

    /// Создать DeterministicRng из seed.
    pub fn to_rng(&self) -> DeterministicRng {
        DeterministicRng::from_seed_bytes(self.bytes)
    }
}
