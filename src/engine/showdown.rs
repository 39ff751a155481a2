//! Выбор победителей на шоудауне.
//!
//! Сравнения рук здесь нет: селектор подключается снаружи, и настоящий
//! эвалюатор можно подставить, не трогая машину состояний.

use crate::domain::{ActorId, ActorState, Card};
use crate::engine::RandomSource;

pub trait WinnerSelector: Send {
    /// `contenders` – не сбросившие участники в порядке хода.
    /// Вернуть нужно непустое подмножество их id.
    fn select(
        &mut self,
        contenders: &[&ActorState],
        board: &[Card],
        rng: &mut dyn RandomSource,
    ) -> Vec<ActorId>;
}

/// Заглушка: победитель выбирается равновероятно, карты не смотрятся.
///
/// НЕ является правилом покера. Результат не зависит от силы руки и
/// годится только для симуляции, пока нет эвалюатора.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomWinnerSelector;

impl WinnerSelector for RandomWinnerSelector {
    fn select(
        &mut self,
        contenders: &[&ActorState],
        _board: &[Card],
        rng: &mut dyn RandomSource,
    ) -> Vec<ActorId> {
        if contenders.is_empty() {
            return Vec::new();
        }
        let idx = rng.pick(contenders.len());
        vec![contenders[idx].id]
    }
}
