use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;

/// Действие участника.
///
/// Суммы в `Bet`/`Raise` – это приращение ставки на текущей улице
/// (сколько фишек кладётся сейчас), а не итоговый размер ставки.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    Fold,
    Check,
    Call,
    /// Bet, когда уравнивать нечего.
    Bet(Chips),
    /// Повышение поверх текущего минимального колла.
    Raise(Chips),
    /// Поставить весь оставшийся стек.
    AllIn,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fold => f.write_str("FOLD"),
            Action::Check => f.write_str("CHECK"),
            Action::Call => f.write_str("CALL"),
            Action::Bet(n) => write!(f, "BET {n}"),
            Action::Raise(n) => write!(f, "RAISE {n}"),
            Action::AllIn => f.write_str("ALL-IN"),
        }
    }
}
