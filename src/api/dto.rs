use serde::{Deserialize, Serialize};

use crate::domain::{ActorId, ActorKind, ActorState, Card, Chips, HandId, HandSummary, Stage, TableId};
use crate::engine::{HandEngine, HandEvent, HandStatus};

/// DTO статуса раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandStatusDto {
    Idle,
    Ongoing,
    AwaitingHuman { actor_id: ActorId },
    Finished { summary: HandSummary },
    Aborted,
}

impl From<&HandStatus> for HandStatusDto {
    fn from(status: &HandStatus) -> Self {
        match status {
            HandStatus::Idle => HandStatusDto::Idle,
            HandStatus::Ongoing => HandStatusDto::Ongoing,
            HandStatus::AwaitingHuman(id) => HandStatusDto::AwaitingHuman { actor_id: *id },
            HandStatus::Finished(summary) => HandStatusDto::Finished {
                summary: summary.clone(),
            },
            HandStatus::Aborted => HandStatusDto::Aborted,
        }
    }
}

/// DTO участника раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActorViewDto {
    pub actor_id: ActorId,
    pub display_name: String,
    pub kind: ActorKind,
    pub balance: Chips,
    pub round_commitment: Chips,
    pub total_commitment: Chips,
    pub folded: bool,
    pub is_all_in: bool,
    /// Карманные карты – только для самого зрителя или после шоудауна.
    pub hole_cards: Option<Vec<Card>>,
}

/// Снимок раздачи глазами конкретного зрителя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSnapshotDto {
    pub table_id: TableId,
    pub hand_id: HandId,
    pub status: HandStatusDto,
    pub stage: Stage,
    pub board: Vec<Card>,
    pub pot_total: Chips,
    pub minimum_call: Chips,
    /// Чей ход (если раздача идёт).
    pub current_actor: Option<ActorId>,
    pub actors: Vec<ActorViewDto>,
    /// Сколько событий в истории; следующий опрос – с этого индекса.
    pub next_event_index: u32,
}

/// Ответ на команду: новый статус, события команды и снимок.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CommandResponse {
    pub table_id: TableId,
    pub events: Vec<HandEvent>,
    pub snapshot: HandSnapshotDto,
}

/// Собрать снимок раздачи. Чужие карманные карты скрыты, пока
/// раздача не дошла до шоудауна.
pub fn build_snapshot(engine: &HandEngine, viewer: Option<ActorId>) -> HandSnapshotDto {
    let revealed: &[(ActorId, Vec<Card>)] = match engine.status() {
        HandStatus::Finished(summary) => &summary.revealed_hands,
        _ => &[],
    };

    let actors = engine
        .actors()
        .iter()
        .map(|a| build_actor_view(a, viewer, revealed))
        .collect();

    HandSnapshotDto {
        table_id: engine.table_id(),
        hand_id: engine.hand_id(),
        status: engine.status().into(),
        stage: engine.stage(),
        board: engine.board().to_vec(),
        pot_total: engine.pot().total(),
        minimum_call: engine.minimum_call(),
        current_actor: engine.current_actor(),
        actors,
        next_event_index: engine.history().len() as u32,
    }
}

fn build_actor_view(
    actor: &ActorState,
    viewer: Option<ActorId>,
    revealed: &[(ActorId, Vec<Card>)],
) -> ActorViewDto {
    let hole_cards = if viewer == Some(actor.id) && !actor.hole_cards.is_empty() {
        Some(actor.hole_cards.clone())
    } else {
        revealed
            .iter()
            .find(|(id, _)| *id == actor.id)
            .map(|(_, cards)| cards.clone())
    };

    ActorViewDto {
        actor_id: actor.id,
        display_name: actor.display_name.clone(),
        kind: actor.kind,
        balance: actor.balance,
        round_commitment: actor.round_commitment,
        total_commitment: actor.total_commitment,
        folded: actor.folded,
        is_all_in: actor.is_all_in,
        hole_cards,
    }
}
