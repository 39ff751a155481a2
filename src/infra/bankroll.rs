//! Сериализованный доступ к банкроллу.
//!
//! На одну раздачу – ровно одно чтение (`open_session`) и одна запись
//! (`close_session`). Пока сессия пользователя открыта, вторая сессия или
//! логин для него же отклоняются, иначе параллельные раздачи затрут
//! баланс друг друга.

use std::collections::BTreeSet;
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::domain::{BankrollRecord, Chips};
use crate::infra::ids::ExternalId;
use crate::infra::persistence::{BankrollError, BankrollStore};

/// Итог логина.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoginOutcome {
    pub record: BankrollRecord,
    pub bonus_granted: Chips,
    pub is_new_user: bool,
}

/// Открытая сессия: стартовый баланс на одну раздачу.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "сессию нужно закрыть через close_session"]
pub struct BankrollLease {
    user: ExternalId,
    record: BankrollRecord,
}

impl BankrollLease {
    pub fn user(&self) -> &ExternalId {
        &self.user
    }

    pub fn opening_balance(&self) -> Chips {
        self.record.balance
    }
}

pub struct BankrollLedger<S: BankrollStore> {
    store: Mutex<S>,
    busy: Mutex<BTreeSet<ExternalId>>,
}

impl<S: BankrollStore> BankrollLedger<S> {
    pub fn new(store: S) -> Self {
        Self {
            store: Mutex::new(store),
            busy: Mutex::new(BTreeSet::new()),
        }
    }

    /// Логин: создать пользователя при необходимости и начислить
    /// ежедневный бонус.
    pub fn login(&self, user: &ExternalId, today: NaiveDate) -> Result<LoginOutcome, BankrollError> {
        let busy = self.busy.lock().map_err(|_| BankrollError::Poisoned)?;
        if busy.contains(user) {
            return Err(BankrollError::SessionBusy(user.clone()));
        }

        let mut store = self.store.lock().map_err(|_| BankrollError::Poisoned)?;
        let existing = store.load(user)?;
        let is_new_user = existing.is_none();
        let mut record = existing.unwrap_or_default();

        let bonus_granted = record.apply_daily_bonus(today);
        store.save(user, &record)?;
        drop(busy);

        info!(user = %user, balance = %record.balance, bonus = %bonus_granted, is_new_user, "login");

        Ok(LoginOutcome {
            record,
            bonus_granted,
            is_new_user,
        })
    }

    /// Открыть сессию на раздачу: прочитать баланс и занять пользователя.
    pub fn open_session(&self, user: &ExternalId) -> Result<BankrollLease, BankrollError> {
        let mut busy = self.busy.lock().map_err(|_| BankrollError::Poisoned)?;
        if busy.contains(user) {
            return Err(BankrollError::SessionBusy(user.clone()));
        }

        let record = {
            let store = self.store.lock().map_err(|_| BankrollError::Poisoned)?;
            store.load(user)?.unwrap_or_default()
        };
        busy.insert(user.clone());

        Ok(BankrollLease {
            user: user.clone(),
            record,
        })
    }

    /// Закрыть сессию: записать финальный баланс и освободить пользователя.
    pub fn close_session(
        &self,
        lease: BankrollLease,
        closing_balance: Chips,
    ) -> Result<BankrollRecord, BankrollError> {
        let mut busy = self.busy.lock().map_err(|_| BankrollError::Poisoned)?;
        if !busy.contains(&lease.user) {
            return Err(BankrollError::NoSession(lease.user));
        }

        let record = BankrollRecord {
            balance: closing_balance,
            last_bonus_date: lease.record.last_bonus_date,
        };
        let saved = self
            .store
            .lock()
            .map_err(|_| BankrollError::Poisoned)
            .and_then(|mut store| store.save(&lease.user, &record));
        // Аренда уже поглощена: пользователя освобождаем и при ошибке записи.
        busy.remove(&lease.user);
        if let Err(e) = saved {
            warn!(user = %lease.user, closing = %closing_balance, error = %e, "bankroll write failed");
            return Err(e);
        }

        info!(
            user = %lease.user,
            opening = %lease.record.balance,
            closing = %closing_balance,
            "bankroll session closed"
        );
        Ok(record)
    }

    /// Прочитать запись без открытия сессии (для отображения).
    pub fn peek(&self, user: &ExternalId) -> Result<Option<BankrollRecord>, BankrollError> {
        let store = self.store.lock().map_err(|_| BankrollError::Poisoned)?;
        store.load(user)
    }

    pub fn is_busy(&self, user: &ExternalId) -> Result<bool, BankrollError> {
        let busy = self.busy.lock().map_err(|_| BankrollError::Poisoned)?;
        Ok(busy.contains(user))
    }
}
