use tracing::{debug, error, info, warn};

use crate::domain::{
    ActorHandResult, ActorId, ActorKind, ActorState, Card, Chips, Deck, HandId, HandSummary, Stage,
    TableId,
};
use crate::engine::actions::Action;
use crate::engine::betting::BettingRound;
use crate::engine::config::EngineConfig;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEvent, HandEventKind, HandHistory};
use crate::engine::policy::{ActionPolicy, BotPolicy, HumanPolicy, PolicyDecision, PublicState};
use crate::engine::pot::PotLedger;
use crate::engine::showdown::{RandomWinnerSelector, WinnerSelector};
use crate::engine::validation::{amount_to_call, contribution_for, resolve_action};
use crate::engine::RandomSource;
use crate::time_ctrl::{TimeoutState, TurnClock};

/// Статус раздачи для внешнего кода.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStatus {
    /// Раздачи нет.
    Idle,
    /// Раздача идёт, можно вызывать `advance`.
    Ongoing,
    /// Движок приостановлен до `submit_human_action`.
    AwaitingHuman(ActorId),
    /// Банк разыгран.
    Finished(HandSummary),
    /// Раздача прервана из-за нарушения инварианта, балансы откатаны.
    Aborted,
}

impl HandStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, HandStatus::Finished(_) | HandStatus::Aborted)
    }
}

/// Заявка на место в раздаче.
pub struct SeatRequest {
    pub id: ActorId,
    pub display_name: String,
    pub opening_balance: Chips,
    pub kind: ActorKind,
    /// Своя политика вместо стандартной для этого `kind`.
    pub policy: Option<Box<dyn ActionPolicy>>,
}

impl SeatRequest {
    pub fn human(id: ActorId, display_name: impl Into<String>, opening_balance: Chips) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            opening_balance,
            kind: ActorKind::Human,
            policy: None,
        }
    }

    pub fn bot(id: ActorId, display_name: impl Into<String>, opening_balance: Chips) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            opening_balance,
            kind: ActorKind::Bot,
            policy: None,
        }
    }

    pub fn with_policy(mut self, policy: Box<dyn ActionPolicy>) -> Self {
        self.policy = Some(policy);
        self
    }
}

/// Движок одной раздачи за одним столом.
///
/// Владеет колодой, банком и участниками. Между столами ничего не делит:
/// на каждый стол – свой экземпляр со своим RNG.
pub struct HandEngine {
    table_id: TableId,
    hand_id: HandId,
    config: EngineConfig,
    rng: Box<dyn RandomSource>,
    winner_selector: Box<dyn WinnerSelector>,
    status: HandStatus,
    stage: Stage,
    blind_amount: Chips,
    deck: Deck,
    board: Vec<Card>,
    pot: PotLedger,
    betting: BettingRound,
    /// Участники в порядке хода: человек первым, потом боты.
    actors: Vec<ActorState>,
    policies: Vec<Box<dyn ActionPolicy>>,
    /// Балансы до блайндов, параллельно `actors`. Для отката.
    opening_balances: Vec<Chips>,
    history: HandHistory,
    clock: TurnClock,
}

impl HandEngine {
    pub fn new(
        table_id: TableId,
        config: EngineConfig,
        rng: Box<dyn RandomSource>,
    ) -> Result<Self, EngineError> {
        config
            .validate()
            .map_err(|e| EngineError::InvalidConfiguration(e.to_string()))?;

        Ok(Self {
            table_id,
            hand_id: 0,
            blind_amount: config.blind_amount,
            config,
            rng,
            winner_selector: Box::new(RandomWinnerSelector),
            status: HandStatus::Idle,
            stage: Stage::PreFlop,
            deck: Deck::standard_52(),
            board: Vec::new(),
            pot: PotLedger::default(),
            betting: BettingRound::new(Stage::PreFlop, Chips::ZERO, Vec::new()),
            actors: Vec::new(),
            policies: Vec::new(),
            opening_balances: Vec::new(),
            history: HandHistory::new(),
            clock: TurnClock::new(),
        })
    }

    /// Подменить правило выбора победителей на шоудауне.
    pub fn with_winner_selector(mut self, selector: Box<dyn WinnerSelector>) -> Self {
        self.winner_selector = selector;
        self
    }

    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    pub fn hand_id(&self) -> HandId {
        self.hand_id
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn status(&self) -> &HandStatus {
        &self.status
    }

    pub fn is_hand_active(&self) -> bool {
        matches!(self.status, HandStatus::Ongoing | HandStatus::AwaitingHuman(_))
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn blind_amount(&self) -> Chips {
        self.blind_amount
    }

    pub fn board(&self) -> &[Card] {
        &self.board
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn pot(&self) -> &PotLedger {
        &self.pot
    }

    pub fn actors(&self) -> &[ActorState] {
        &self.actors
    }

    pub fn actor(&self, actor_id: ActorId) -> Option<&ActorState> {
        self.actors.iter().find(|a| a.id == actor_id)
    }

    pub fn minimum_call(&self) -> Chips {
        self.betting.minimum_call
    }

    /// Чей сейчас ход (если раздача идёт).
    pub fn current_actor(&self) -> Option<ActorId> {
        if self.is_hand_active() {
            self.betting.current()
        } else {
            None
        }
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn events_since(&self, index: u32) -> &[HandEvent] {
        self.history.since(index)
    }

    /// Текущие балансы всех участников.
    pub fn closing_balances(&self) -> Vec<(ActorId, Chips)> {
        self.actors.iter().map(|a| (a.id, a.balance)).collect()
    }

    /// Сумма стартовых балансов раздачи.
    pub fn opening_total(&self) -> Chips {
        self.opening_balances.iter().sum()
    }

    pub fn turn_clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Публичное состояние с точки зрения участника.
    pub fn public_state_for(&self, actor_id: ActorId) -> Option<PublicState> {
        let idx = self.actors.iter().position(|a| a.id == actor_id)?;
        Some(self.public_state(idx))
    }

    /// Старт новой раздачи:
    /// - проверяет состав и блайнд;
    /// - все вносят блайнд;
    /// - раздаёт карманные карты;
    /// - настраивает раунд ставок префлопа.
    ///
    /// Сам ход не делает – для этого `advance`.
    pub fn request_hand(
        &mut self,
        hand_id: HandId,
        seats: Vec<SeatRequest>,
        blind_amount: Chips,
    ) -> Result<HandStatus, EngineError> {
        if self.is_hand_active() {
            return Err(EngineError::HandAlreadyInProgress);
        }
        self.validate_seats(&seats, blind_amount)?;

        // Человек ходит первым, боты – в порядке конфигурации.
        let (humans, bots): (Vec<_>, Vec<_>) =
            seats.into_iter().partition(|s| s.kind == ActorKind::Human);

        self.hand_id = hand_id;
        self.blind_amount = blind_amount;
        self.actors.clear();
        self.policies.clear();
        self.opening_balances.clear();

        for seat in humans.into_iter().chain(bots) {
            let policy: Box<dyn ActionPolicy> = match (seat.policy, seat.kind) {
                (Some(p), _) => p,
                (None, ActorKind::Human) => Box::new(HumanPolicy),
                (None, ActorKind::Bot) => {
                    Box::new(BotPolicy::new(self.config.bot_decision_table.clone()))
                }
            };
            let mut actor = ActorState::new(seat.id, seat.display_name, seat.kind, seat.opening_balance);
            actor.reset_for_hand();
            self.opening_balances.push(seat.opening_balance);
            self.actors.push(actor);
            self.policies.push(policy);
        }

        self.deck = Deck::new_shuffled(self.rng.as_mut());
        self.board.clear();
        self.pot = PotLedger::new(self.actors.iter().map(|a| a.id));
        self.stage = Stage::PreFlop;
        self.history = HandHistory::new();
        self.clock.clear();
        self.status = HandStatus::Ongoing;

        self.history.push(HandEventKind::HandStarted {
            table_id: self.table_id,
            hand_id,
            blind_amount,
            actors: self.actors.iter().map(|a| a.id).collect(),
        });

        if let Err(e) = self.open_hand(blind_amount) {
            return Err(self.abort(e));
        }

        info!(
            table_id = self.table_id,
            hand_id,
            actors = self.actors.len(),
            blind = %blind_amount,
            pot = %self.pot.total(),
            "hand started"
        );

        Ok(self.status.clone())
    }

    fn validate_seats(&self, seats: &[SeatRequest], blind_amount: Chips) -> Result<(), EngineError> {
        let invalid = |msg: String| Err(EngineError::InvalidConfiguration(msg));

        if blind_amount.is_zero() {
            return invalid("блайнд должен быть > 0".into());
        }
        if seats.len() < 2 {
            return invalid(format!("нужно минимум 2 участника, а не {}", seats.len()));
        }
        if seats.len() > self.config.max_actors {
            return invalid(format!(
                "участников {} больше лимита {}",
                seats.len(),
                self.config.max_actors
            ));
        }
        if seats.iter().filter(|s| s.kind == ActorKind::Human).count() > 1 {
            return invalid("за столом может быть только один человек".into());
        }
        if checked_total(seats.iter().map(|s| s.opening_balance)).is_none() {
            return invalid("сумма стартовых балансов не помещается в u64".into());
        }
        for (i, seat) in seats.iter().enumerate() {
            if seats[..i].iter().any(|s| s.id == seat.id) {
                return invalid(format!("повторяется участник {}", seat.id));
            }
            if seat.opening_balance < blind_amount {
                return invalid(format!(
                    "у участника {} баланс {} меньше блайнда {}",
                    seat.id, seat.opening_balance, blind_amount
                ));
            }
        }
        Ok(())
    }

    /// Блайнды + раздача карманных карт + очередь префлопа.
    fn open_hand(&mut self, blind_amount: Chips) -> Result<(), EngineError> {
        let mut contributions = Vec::with_capacity(self.actors.len());
        for idx in 0..self.actors.len() {
            self.contribute(idx, blind_amount)?;
            contributions.push((self.actors[idx].id, blind_amount));
        }
        self.check_conservation()?;

        self.history.push(HandEventKind::BlindsPosted {
            contributions,
            pot_after: self.pot.total(),
        });

        // По 2 карты, по кругу.
        for _round in 0..2 {
            for idx in 0..self.actors.len() {
                let card = self.deck.draw()?;
                self.actors[idx].hole_cards.push(card);
            }
        }

        self.betting = BettingRound::new(Stage::PreFlop, blind_amount, self.eligible_in_order());
        Ok(())
    }

    /// Один шаг машины состояний: одно решение участника, один переход
    /// стадии или розыгрыш банка.
    pub fn advance(&mut self) -> Result<HandStatus, EngineError> {
        match &self.status {
            HandStatus::Ongoing => {}
            HandStatus::AwaitingHuman(id) => return Ok(HandStatus::AwaitingHuman(*id)),
            HandStatus::Idle | HandStatus::Finished(_) | HandStatus::Aborted => {
                return Err(EngineError::NoActiveHand)
            }
        }

        match self.step() {
            Ok(status) => Ok(status),
            Err(e) if e.is_fatal() => Err(self.abort(e)),
            Err(e) => Err(e),
        }
    }

    /// Крутить `advance`, пока не понадобится человек или раздача не закончится.
    pub fn run_until_blocked(&mut self) -> Result<HandStatus, EngineError> {
        loop {
            match self.advance()? {
                HandStatus::Ongoing => continue,
                other => return Ok(other),
            }
        }
    }

    /// Действие человека. Допустимо только пока движок его ждёт.
    ///
    /// Нелегальное действие отклоняется, состояние не меняется, движок
    /// продолжает ждать.
    pub fn submit_human_action(&mut self, action: Action) -> Result<HandStatus, EngineError> {
        let actor_id = match self.status {
            HandStatus::AwaitingHuman(id) => id,
            _ => return Err(EngineError::NotAwaitingInput),
        };
        let idx = self.index_of(actor_id)?;

        let effective = match resolve_action(
            &self.actors[idx],
            action,
            &self.betting,
            self.config.max_raises_per_stage,
        ) {
            Ok(a) => a,
            Err(e) => {
                warn!(
                    table_id = self.table_id,
                    hand_id = self.hand_id,
                    actor_id,
                    %action,
                    error = %e,
                    "human action rejected"
                );
                return Err(e);
            }
        };

        self.clock.clear();
        self.status = HandStatus::Ongoing;

        match self.apply(idx, effective) {
            Ok(status) => Ok(status),
            Err(e) if e.is_fatal() => Err(self.abort(e)),
            Err(e) => Err(e),
        }
    }

    /// Сообщить движку, что прошло `delta_secs` секунд ожидания человека.
    ///
    /// Если таймаут хода настроен и истёк – авто-check (когда уравнивать
    /// нечего) или авто-fold.
    pub fn elapse_human_time(&mut self, delta_secs: u32) -> Result<HandStatus, EngineError> {
        let actor_id = match self.status {
            HandStatus::AwaitingHuman(id) => id,
            _ => return Err(EngineError::NotAwaitingInput),
        };

        match self.clock.elapse(delta_secs) {
            TimeoutState::Ongoing { .. } | TimeoutState::NoActiveActor => {
                Ok(HandStatus::AwaitingHuman(actor_id))
            }
            TimeoutState::TimedOut { .. } => {
                let idx = self.index_of(actor_id)?;
                let action = if amount_to_call(&self.actors[idx], &self.betting).is_zero() {
                    Action::Check
                } else {
                    Action::Fold
                };

                warn!(
                    table_id = self.table_id,
                    hand_id = self.hand_id,
                    actor_id,
                    %action,
                    "human turn timed out"
                );
                self.history.push(HandEventKind::HumanTimedOut { actor_id, action });
                self.submit_human_action(action)
            }
        }
    }

    fn step(&mut self) -> Result<HandStatus, EngineError> {
        if self.contenders_count() <= 1 {
            return self.resolve_folded_out();
        }
        if self.betting.is_round_complete() {
            return self.advance_stage();
        }

        let actor_id = self
            .betting
            .current()
            .ok_or(EngineError::Internal("пустая очередь хода"))?;
        let idx = self.index_of(actor_id)?;
        let state = self.public_state(idx);

        let decision = self.policies[idx].decide(&state, self.rng.as_mut());

        match decision {
            PolicyDecision::AwaitExternal => {
                if let Some(limit) = self.config.human_action_timeout_secs {
                    self.clock.start_turn(actor_id, limit);
                }
                self.status = HandStatus::AwaitingHuman(actor_id);
                self.history.push(HandEventKind::AwaitingHuman { actor_id });
                debug!(table_id = self.table_id, hand_id = self.hand_id, actor_id, "awaiting human");
                Ok(HandStatus::AwaitingHuman(actor_id))
            }
            PolicyDecision::Act(action) => {
                let effective = resolve_action(
                    &self.actors[idx],
                    action,
                    &self.betting,
                    self.config.max_raises_per_stage,
                )
                .map_err(|e| EngineError::PolicyContractViolation {
                    actor_id,
                    source: Box::new(e),
                })?;
                self.apply(idx, effective)
            }
        }
    }

    /// Применить уже проверенное действие.
    fn apply(&mut self, idx: usize, action: Action) -> Result<HandStatus, EngineError> {
        let actor_id = self.actors[idx].id;
        let previous_minimum = self.betting.minimum_call;
        let amount = contribution_for(&self.actors[idx], action, &self.betting);

        if action == Action::Fold {
            self.actors[idx].folded = true;
        }
        self.contribute(idx, amount)?;
        self.betting.mark_acted(actor_id);

        let commitment = self.actors[idx].round_commitment;
        if commitment > previous_minimum {
            // Повышение: все остальные, кто может ходить, должны ответить.
            let queue = self.queue_after(idx);
            self.betting.on_raise(actor_id, commitment, queue);
        }

        self.history.push(HandEventKind::ActorActed {
            actor_id,
            action,
            resulting_commitment: commitment,
            balance_after: self.actors[idx].balance,
            pot_after: self.pot.total(),
        });
        debug!(
            table_id = self.table_id,
            hand_id = self.hand_id,
            actor_id,
            %action,
            commitment = %commitment,
            pot = %self.pot.total(),
            "actor acted"
        );

        self.check_conservation()?;

        let human_quit =
            action == Action::Fold && self.actors[idx].is_human() && self.config.human_fold_ends_hand;
        if human_quit || self.contenders_count() <= 1 {
            return self.resolve_folded_out();
        }

        Ok(HandStatus::Ongoing)
    }

    /// Перенести фишки участника в банк. Банк меняется первым: если он
    /// отказал, у участника ничего не списано.
    fn contribute(&mut self, idx: usize, amount: Chips) -> Result<(), EngineError> {
        if amount.is_zero() {
            return Ok(());
        }
        let actor_id = self.actors[idx].id;
        if amount > self.actors[idx].balance {
            return Err(EngineError::InvalidContribution { actor_id, amount });
        }
        self.pot.add_contribution(actor_id, amount)?;
        self.actors[idx]
            .commit(amount)
            .ok_or(EngineError::InvalidContribution { actor_id, amount })
    }

    /// Переход на следующую стадию: открыть карты, сбросить ставки улицы.
    fn advance_stage(&mut self) -> Result<HandStatus, EngineError> {
        let next = self
            .stage
            .next()
            .ok_or(EngineError::Internal("переход со стадии без продолжения"))?;

        if next == Stage::Showdown {
            return self.resolve_showdown();
        }

        let revealed = self.deck.draw_n(next.cards_revealed())?;
        self.board.extend_from_slice(&revealed);
        self.stage = next;

        for actor in self.actors.iter_mut() {
            actor.round_commitment = Chips::ZERO;
        }

        // Если ходить может меньше двоих – ставок на улице нет, карты
        // открываются дальше.
        let eligible = self.eligible_in_order();
        let queue = if eligible.len() >= 2 { eligible } else { Vec::new() };
        self.betting = BettingRound::new(next, Chips::ZERO, queue);

        self.history.push(HandEventKind::StageAdvanced {
            stage: next,
            revealed_community_cards: revealed.clone(),
        });
        info!(
            table_id = self.table_id,
            hand_id = self.hand_id,
            stage = %next,
            board = ?self.board.iter().map(Card::to_string).collect::<Vec<_>>(),
            "stage advanced"
        );

        Ok(HandStatus::Ongoing)
    }

    fn resolve_showdown(&mut self) -> Result<HandStatus, EngineError> {
        let last_betting_stage = self.stage;
        self.stage = Stage::Showdown;
        self.history.push(HandEventKind::StageAdvanced {
            stage: Stage::Showdown,
            revealed_community_cards: Vec::new(),
        });

        let contenders: Vec<&ActorState> = self.actors.iter().filter(|a| a.is_in_hand()).collect();
        let selected = self
            .winner_selector
            .select(&contenders, &self.board, self.rng.as_mut());

        let unknown = selected
            .iter()
            .any(|id| !contenders.iter().any(|a| a.id == *id));
        // Порядок победителей = порядок хода, дубли отбрасываются.
        let winners: Vec<ActorId> = contenders
            .iter()
            .map(|a| a.id)
            .filter(|id| selected.contains(id))
            .collect();

        if unknown || winners.is_empty() {
            return Err(EngineError::InvalidWinnerSet(selected));
        }

        self.settle(winners, last_betting_stage)
    }

    /// Остался один претендент или человек вышел из раздачи.
    fn resolve_folded_out(&mut self) -> Result<HandStatus, EngineError> {
        let last_betting_stage = self.stage;
        self.stage = Stage::FoldedOut;
        self.history.push(HandEventKind::StageAdvanced {
            stage: Stage::FoldedOut,
            revealed_community_cards: Vec::new(),
        });

        let winners: Vec<ActorId> = self
            .actors
            .iter()
            .filter(|a| a.is_in_hand())
            .map(|a| a.id)
            .collect();

        self.settle(winners, last_betting_stage)
    }

    /// Выплатить банк, закрыть раздачу.
    fn settle(&mut self, winners: Vec<ActorId>, last_betting_stage: Stage) -> Result<HandStatus, EngineError> {
        let pot_awarded = self.pot.total();
        let payouts = self.pot.resolve(&winners)?;

        for payout in &payouts {
            let idx = self.index_of(payout.actor_id)?;
            let actor = &mut self.actors[idx];
            actor.balance = actor
                .balance
                .checked_add(payout.amount)
                .ok_or(EngineError::Internal("переполнение баланса при выплате"))?;
        }
        self.check_conservation()?;

        let results: Vec<ActorHandResult> = self
            .actors
            .iter()
            .zip(self.opening_balances.iter())
            .map(|(a, opening)| {
                let won = payouts
                    .iter()
                    .filter(|p| p.actor_id == a.id)
                    .map(|p| p.amount)
                    .sum();
                ActorHandResult {
                    actor_id: a.id,
                    opening_balance: *opening,
                    closing_balance: a.balance,
                    won,
                    is_winner: winners.contains(&a.id),
                }
            })
            .collect();

        let revealed_hands = if self.stage == Stage::Showdown {
            self.actors
                .iter()
                .filter(|a| a.is_in_hand())
                .map(|a| (a.id, a.hole_cards.clone()))
                .collect()
        } else {
            Vec::new()
        };

        let summary = HandSummary {
            hand_id: self.hand_id,
            table_id: self.table_id,
            final_stage: self.stage,
            last_betting_stage,
            board: self.board.clone(),
            pot_awarded,
            winners: winners.clone(),
            revealed_hands,
            results,
        };

        self.history.push(HandEventKind::HandResolved {
            winners,
            pot_awarded,
            payouts,
            closing_balances: summary.closing_balances(),
        });

        // Карманные карты после раздачи никому не принадлежат.
        for actor in self.actors.iter_mut() {
            actor.hole_cards.clear();
            actor.round_commitment = Chips::ZERO;
        }
        self.betting.to_act.clear();
        self.clock.clear();

        info!(
            table_id = self.table_id,
            hand_id = self.hand_id,
            stage = %summary.final_stage,
            pot = %pot_awarded,
            winners = ?summary.winners,
            "hand resolved"
        );

        self.status = HandStatus::Finished(summary.clone());
        Ok(HandStatus::Finished(summary))
    }

    /// Прервать раздачу: вернуть всем стартовые балансы, обнулить банк.
    fn abort(&mut self, err: EngineError) -> EngineError {
        for (actor, opening) in self.actors.iter_mut().zip(self.opening_balances.iter()) {
            actor.balance = *opening;
            actor.reset_for_hand();
        }
        self.pot.reset();
        self.board.clear();
        self.betting.to_act.clear();
        self.clock.clear();

        let restored_balances = self.closing_balances();
        self.history.push(HandEventKind::HandAborted {
            reason: err.to_string(),
            restored_balances,
        });
        self.status = HandStatus::Aborted;

        error!(
            table_id = self.table_id,
            hand_id = self.hand_id,
            error = %err,
            "hand aborted, balances restored"
        );
        err
    }

    /// Сумма балансов + банк должна равняться сумме стартовых балансов.
    ///
    /// Суммы считаются без насыщения: переполнение само по себе расхождение.
    fn check_conservation(&self) -> Result<(), EngineError> {
        self.pot.verify()?;
        let expected = checked_total(self.opening_balances.iter().copied())
            .ok_or(EngineError::Internal("переполнение суммы стартовых балансов"))?;
        let actual = checked_total(
            self.actors
                .iter()
                .map(|a| a.balance)
                .chain(std::iter::once(self.pot.total())),
        )
        .ok_or(EngineError::PotMismatch {
            expected,
            actual: Chips(u64::MAX),
        })?;
        if actual != expected {
            return Err(EngineError::PotMismatch { expected, actual });
        }
        Ok(())
    }

    fn public_state(&self, idx: usize) -> PublicState {
        let actor = &self.actors[idx];
        let contenders = self.contenders_count();
        PublicState {
            actor_id: actor.id,
            stage: self.stage,
            pot_total: self.pot.total(),
            minimum_call: self.betting.minimum_call,
            to_call: amount_to_call(actor, &self.betting),
            balance: actor.balance,
            round_commitment: actor.round_commitment,
            blind_amount: self.blind_amount,
            can_raise: self.betting.raises < self.config.max_raises_per_stage,
            opponents_in_hand: if actor.is_in_hand() {
                contenders.saturating_sub(1)
            } else {
                contenders
            },
        }
    }

    fn index_of(&self, actor_id: ActorId) -> Result<usize, EngineError> {
        self.actors
            .iter()
            .position(|a| a.id == actor_id)
            .ok_or(EngineError::Internal("участник не найден"))
    }

    fn contenders_count(&self) -> usize {
        self.actors.iter().filter(|a| a.is_in_hand()).count()
    }

    /// Кто может ходить, в порядке хода.
    fn eligible_in_order(&self) -> Vec<ActorId> {
        self.actors
            .iter()
            .filter(|a| a.can_act())
            .map(|a| a.id)
            .collect()
    }

    /// Очередь после повышения: начиная со следующего за агрессором по кругу.
    fn queue_after(&self, raiser_idx: usize) -> Vec<ActorId> {
        let n = self.actors.len();
        (1..n)
            .map(|offset| &self.actors[(raiser_idx + offset) % n])
            .filter(|a| a.can_act())
            .map(|a| a.id)
            .collect()
    }
}

fn checked_total(amounts: impl IntoIterator<Item = Chips>) -> Option<Chips> {
    amounts
        .into_iter()
        .try_fold(Chips::ZERO, |acc, c| acc.checked_add(c))
}
