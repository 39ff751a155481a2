use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::BankrollRecord;
use crate::infra::ids::ExternalId;

/// Ошибки хранилища банкролла.
#[derive(Debug, Error)]
pub enum BankrollError {
    #[error("ошибка ввода-вывода {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("банкролл не разобран: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("у пользователя {0} уже идёт сессия")]
    SessionBusy(ExternalId),

    #[error("у пользователя {0} нет открытой сессии")]
    NoSession(ExternalId),

    #[error("хранилище банкролла недоступно (lock poisoned)")]
    Poisoned,
}

/// Абстракция хранилища банкролла.
///
/// Формат хранения – забота реализации. Движок раздачи про хранилище не
/// знает; читают и пишут его на границах раздачи.
pub trait BankrollStore: Send {
    /// Загрузить запись пользователя (None – пользователь новый).
    fn load(&self, user: &ExternalId) -> Result<Option<BankrollRecord>, BankrollError>;

    /// Сохранить запись пользователя.
    fn save(&mut self, user: &ExternalId, record: &BankrollRecord) -> Result<(), BankrollError>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryBankrollStore {
    records: BTreeMap<ExternalId, BankrollRecord>,
}

impl InMemoryBankrollStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BankrollStore for InMemoryBankrollStore {
    fn load(&self, user: &ExternalId) -> Result<Option<BankrollRecord>, BankrollError> {
        Ok(self.records.get(user).cloned())
    }

    fn save(&mut self, user: &ExternalId, record: &BankrollRecord) -> Result<(), BankrollError> {
        self.records.insert(user.clone(), record.clone());
        Ok(())
    }
}

/// Хранилище в одном JSON-файле: `{ "логин": { "balance": .., "last_bonus_date": .. } }`.
#[derive(Debug, Clone)]
pub struct JsonFileBankrollStore {
    path: PathBuf,
}

impl JsonFileBankrollStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `bankroll.json` -> `bankroll.json.tmp`, в той же папке.
    pub fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn read_all(&self) -> Result<BTreeMap<String, BankrollRecord>, BankrollError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(source) => Err(BankrollError::Io {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

impl BankrollStore for JsonFileBankrollStore {
    fn load(&self, user: &ExternalId) -> Result<Option<BankrollRecord>, BankrollError> {
        Ok(self.read_all()?.remove(user.as_str()))
    }

    fn save(&mut self, user: &ExternalId, record: &BankrollRecord) -> Result<(), BankrollError> {
        let mut all = self.read_all()?;
        all.insert(user.0.clone(), record.clone());
        let raw = serde_json::to_string_pretty(&all)?;

        // Сначала во временный файл рядом, потом rename: файл всегда цельный.
        let tmp = self.tmp_path();
        fs::write(&tmp, raw).map_err(|source| BankrollError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            BankrollError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}
