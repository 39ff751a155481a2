//! Банкролл пользователя между раздачами и ежедневный бонус.
//!
//! Движок раздачи про это ничего не знает: он получает стартовый баланс
//! и отдаёт финальный. Бонус начисляет слой логина/сессии.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Стартовый баланс нового пользователя.
pub const NEW_USER_BALANCE: Chips = Chips(1_000);

/// Размер ежедневного бонуса.
pub const DAILY_BONUS: Chips = Chips(500);

/// То, что хранится по каждому пользователю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BankrollRecord {
    pub balance: Chips,
    pub last_bonus_date: Option<NaiveDate>,
}

impl BankrollRecord {
    pub fn new_user() -> Self {
        Self {
            balance: NEW_USER_BALANCE,
            last_bonus_date: None,
        }
    }

    /// Применить ежедневный бонус. Возвращает начисленную сумму (0, если
    /// сегодня бонус уже был).
    pub fn apply_daily_bonus(&mut self, today: NaiveDate) -> Chips {
        let grant = daily_bonus(today, self.last_bonus_date);
        self.balance += grant.granted;
        self.last_bonus_date = Some(grant.last_bonus_date);
        grant.granted
    }
}

impl Default for BankrollRecord {
    fn default() -> Self {
        Self::new_user()
    }
}

/// Результат проверки бонуса.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BonusGrant {
    pub granted: Chips,
    pub last_bonus_date: NaiveDate,
}

/// Чистая функция: `(сегодня, дата последнего бонуса) -> (начислено, новая дата)`.
///
/// Бонус выдаётся один раз на календарный день.
pub fn daily_bonus(today: NaiveDate, last_bonus_date: Option<NaiveDate>) -> BonusGrant {
    match last_bonus_date {
        Some(last) if last == today => BonusGrant {
            granted: Chips::ZERO,
            last_bonus_date: last,
        },
        _ => BonusGrant {
            granted: DAILY_BONUS,
            last_bonus_date: today,
        },
    }
}
