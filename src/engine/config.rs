//! Конфигурация движка раздачи.
//!
//! Всё, кроме `WinnerSelector`, сериализуется в JSON: селектор
//! подставляется кодом (`HandEngine::with_winner_selector`).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, Stage, DECK_SIZE};

/// Максимум участников, при котором хватает колоды: 2 * n + 5 <= 52.
pub const MAX_SUPPORTED_ACTORS: usize = (DECK_SIZE - 5) / 2;

/// Ошибки загрузки/проверки конфига.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("не удалось прочитать конфиг {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("конфиг не разобран: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("некорректный конфиг: {0}")]
    Invalid(String),
}

/// Вероятности решений бота на одной улице.
///
/// Бот бросает число из `[0, fold + check + raise)`: ниже `fold` – сброс,
/// дальше `check` – чек/колл, остаток длиной `raise` – повышение.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct StageOdds {
    pub fold: f64,
    pub check: f64,
    pub raise: f64,
}

impl StageOdds {
    pub const fn new(fold: f64, check: f64, raise: f64) -> Self {
        Self { fold, check, raise }
    }

    fn validate(&self, stage: Stage) -> Result<(), ConfigError> {
        for p in [self.fold, self.check, self.raise] {
            if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "вероятность {p} на {stage} вне [0, 1]"
                )));
            }
        }
        let sum = self.fold + self.check + self.raise;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ConfigError::Invalid(format!(
                "вероятности на {stage} дают в сумме {sum}, а не 1"
            )));
        }
        Ok(())
    }
}

impl Default for StageOdds {
    /// 20% fold, 50% check/call, 30% raise.
    fn default() -> Self {
        Self::new(0.2, 0.5, 0.3)
    }
}

/// Таблица решений бота по улицам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BotDecisionTable {
    pub pre_flop: StageOdds,
    pub flop: StageOdds,
    pub turn: StageOdds,
    pub river: StageOdds,
    /// Размер повышения в блайндах (поверх колла).
    pub raise_blinds: u64,
}

impl BotDecisionTable {
    /// Одинаковые вероятности на всех улицах.
    pub fn uniform(odds: StageOdds) -> Self {
        Self {
            pre_flop: odds,
            flop: odds,
            turn: odds,
            river: odds,
            raise_blinds: 1,
        }
    }

    pub fn for_stage(&self, stage: Stage) -> StageOdds {
        match stage {
            Stage::PreFlop => self.pre_flop,
            Stage::Flop => self.flop,
            Stage::Turn => self.turn,
            Stage::River | Stage::Showdown | Stage::FoldedOut => self.river,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pre_flop.validate(Stage::PreFlop)?;
        self.flop.validate(Stage::Flop)?;
        self.turn.validate(Stage::Turn)?;
        self.river.validate(Stage::River)?;
        if self.raise_blinds == 0 {
            return Err(ConfigError::Invalid("raise_blinds должен быть >= 1".into()));
        }
        Ok(())
    }
}

impl Default for BotDecisionTable {
    fn default() -> Self {
        Self::uniform(StageOdds::default())
    }
}

/// Параметры движка, задаются при создании.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Блайнд по умолчанию (обязательный взнос каждого на старте).
    pub blind_amount: Chips,
    pub max_actors: usize,
    pub bot_decision_table: BotDecisionTable,
    /// Сколько повышений разрешено на одной улице.
    pub max_raises_per_stage: u8,
    /// Fold человека сразу завершает раздачу.
    pub human_fold_ends_hand: bool,
    /// Таймаут хода человека (авто-check/fold). `None` – ждём бесконечно.
    pub human_action_timeout_secs: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            blind_amount: Chips(50),
            max_actors: 7,
            bot_decision_table: BotDecisionTable::default(),
            max_raises_per_stage: 3,
            human_fold_ends_hand: true,
            human_action_timeout_secs: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.blind_amount.is_zero() {
            return Err(ConfigError::Invalid("блайнд должен быть > 0".into()));
        }
        if !(2..=MAX_SUPPORTED_ACTORS).contains(&self.max_actors) {
            return Err(ConfigError::Invalid(format!(
                "max_actors должен быть в 2..={MAX_SUPPORTED_ACTORS}, а не {}",
                self.max_actors
            )));
        }
        if self.human_action_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid("таймаут хода должен быть > 0".into()));
        }
        self.bot_decision_table.validate()
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }
}

/// Бот за столом по умолчанию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotProfile {
    pub name: String,
    pub balance: Chips,
}

/// Состав стола для CLI: кто сидит против человека.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableDefaults {
    pub bots: Vec<BotProfile>,
}

impl Default for TableDefaults {
    fn default() -> Self {
        Self {
            bots: vec![
                BotProfile {
                    name: "Bot Mike".into(),
                    balance: Chips(5_000),
                },
                BotProfile {
                    name: "Bot Sarah".into(),
                    balance: Chips(8_500),
                },
            ],
        }
    }
}
