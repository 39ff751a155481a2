use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{ActorId, ActorKind, Chips, HandId};
use crate::engine::{Action, HandEngine, SeatRequest};

use super::dto::{build_snapshot, CommandResponse};
use super::errors::ApiError;

/// Место в новой раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSpec {
    pub id: ActorId,
    pub display_name: String,
    pub opening_balance: Chips,
    pub kind: ActorKind,
}

impl From<SeatSpec> for SeatRequest {
    fn from(spec: SeatSpec) -> Self {
        match spec.kind {
            ActorKind::Human => SeatRequest::human(spec.id, spec.display_name, spec.opening_balance),
            ActorKind::Bot => SeatRequest::bot(spec.id, spec.display_name, spec.opening_balance),
        }
    }
}

/// Команды к столу.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Запустить новую раздачу. Без `blind_amount` берётся блайнд из конфига.
    RequestHand {
        hand_id: HandId,
        seats: Vec<SeatSpec>,
        blind_amount: Option<Chips>,
    },

    /// Один шаг машины состояний.
    Advance,

    /// Шагать, пока не понадобится человек или раздача не закончится.
    RunUntilBlocked,

    /// Действие человека.
    SubmitHumanAction { action: Action },

    /// Прошло время на ход человека.
    ElapseHumanTime { delta_secs: u32 },

    /// Ничего не менять: отдать события начиная с `from` и снимок.
    /// Работает в любом статусе, в том числе после прерванной раздачи.
    EventsSince { from: u32 },
}

/// Выполнить команду над движком стола.
///
/// `viewer` – чьими глазами собирать снимок (обычно id человека).
/// В ответе – только события, появившиеся за эту команду.
///
/// При ошибке события в ответ не попадают. Если раздача прервана
/// (`ErrorClass::InternalInvariant`), `HandAborted` и откатанные балансы
/// забираются через `EventsSince` с последнего известного индекса.
pub fn execute(
    engine: &mut HandEngine,
    viewer: Option<ActorId>,
    command: Command,
) -> Result<CommandResponse, ApiError> {
    // Новая раздача начинает историю заново.
    let from = match command {
        Command::RequestHand { .. } => 0,
        Command::EventsSince { from } => from,
        _ => engine.history().len() as u32,
    };

    match command {
        Command::RequestHand {
            hand_id,
            seats,
            blind_amount,
        } => {
            let blind = blind_amount.unwrap_or(engine.config().blind_amount);
            let seats = seats.into_iter().map(SeatRequest::from).collect();
            engine.request_hand(hand_id, seats, blind)?;
        }
        Command::Advance => {
            engine.advance()?;
        }
        Command::RunUntilBlocked => {
            engine.run_until_blocked()?;
        }
        Command::SubmitHumanAction { action } => {
            engine.submit_human_action(action)?;
        }
        Command::ElapseHumanTime { delta_secs } => {
            engine.elapse_human_time(delta_secs)?;
        }
        Command::EventsSince { .. } => {}
    }

    let events = engine.events_since(from).to_vec();
    debug!(
        table_id = engine.table_id(),
        hand_id = engine.hand_id(),
        events = events.len(),
        "command executed"
    );

    Ok(CommandResponse {
        table_id: engine.table_id(),
        events,
        snapshot: build_snapshot(engine, viewer),
    })
}

/// Разобрать команду из JSON и выполнить её.
pub fn execute_json(
    engine: &mut HandEngine,
    viewer: Option<ActorId>,
    raw: &str,
) -> Result<CommandResponse, ApiError> {
    let command: Command = serde_json::from_str(raw)?;
    execute(engine, viewer, command)
}
