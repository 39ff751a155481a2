use crate::domain::{ActorState, Chips};
use crate::engine::actions::Action;
use crate::engine::betting::BettingRound;
use crate::engine::errors::EngineError;

/// Проверить действие и вернуть то, которое реально будет применено.
///
/// Единственная подстановка: `Call`, на который не хватает фишек,
/// превращается в `AllIn` на весь остаток.
pub fn resolve_action(
    actor: &ActorState,
    action: Action,
    betting: &BettingRound,
    max_raises: u8,
) -> Result<Action, EngineError> {
    if !actor.can_act() {
        return Err(EngineError::IllegalAction("участник уже не может действовать"));
    }

    let balance = actor.balance;
    let to_call = amount_to_call(actor, betting);

    match action {
        Action::Fold => Ok(Action::Fold),

        Action::Check => {
            if to_call.is_zero() {
                Ok(Action::Check)
            } else {
                Err(EngineError::CannotCheck { to_call })
            }
        }

        Action::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else if balance < to_call {
                // Не хватает на колл – это all-in на остаток.
                Ok(Action::AllIn)
            } else {
                Ok(Action::Call)
            }
        }

        Action::Bet(amount) => {
            if amount.is_zero() {
                return Err(EngineError::IllegalAction("ставка должна быть больше нуля"));
            }
            if !to_call.is_zero() {
                return Err(EngineError::IllegalAction(
                    "bet возможен только когда нечего уравнивать",
                ));
            }
            ensure_covered(amount, balance)?;
            ensure_raise_allowed(betting, max_raises)?;
            Ok(action)
        }

        Action::Raise(amount) => {
            if amount.is_zero() {
                return Err(EngineError::IllegalAction("рейз должен быть больше нуля"));
            }
            ensure_covered(amount, balance)?;
            if amount <= to_call {
                return Err(EngineError::RaiseTooSmall { to_call });
            }
            ensure_raise_allowed(betting, max_raises)?;
            Ok(action)
        }

        Action::AllIn => {
            if balance.is_zero() {
                return Err(EngineError::IllegalAction("нечего ставить"));
            }
            Ok(Action::AllIn)
        }
    }
}

/// Сколько фишек нужно добавить, чтобы уравнять минимальный колл.
pub fn amount_to_call(actor: &ActorState, betting: &BettingRound) -> Chips {
    betting.minimum_call.saturating_sub(actor.round_commitment)
}

/// Сколько фишек реально уйдёт в банк при этом (уже проверенном) действии.
pub fn contribution_for(actor: &ActorState, action: Action, betting: &BettingRound) -> Chips {
    match action {
        Action::Fold | Action::Check => Chips::ZERO,
        Action::Call => amount_to_call(actor, betting),
        Action::Bet(n) | Action::Raise(n) => n,
        Action::AllIn => actor.balance,
    }
}

fn ensure_covered(amount: Chips, balance: Chips) -> Result<(), EngineError> {
    if amount > balance {
        return Err(EngineError::InsufficientBalance {
            needed: amount,
            available: balance,
        });
    }
    Ok(())
}

fn ensure_raise_allowed(betting: &BettingRound, max_raises: u8) -> Result<(), EngineError> {
    if betting.raises >= max_raises {
        return Err(EngineError::RaiseCapReached);
    }
    Ok(())
}
