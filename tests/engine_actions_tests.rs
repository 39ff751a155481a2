use poker_hand_engine::domain::{ActorKind, ActorState, Card, Chips, Stage};
use poker_hand_engine::engine::{
    betting::BettingRound,
    validation::{amount_to_call, contribution_for, resolve_action},
    Action, ActionPolicy, BotDecisionTable, BotPolicy, ConfigError, EngineConfig, EngineError,
    HumanPolicy, PolicyDecision, PublicState, RandomSource, StageOdds,
};

/// RNG для тестов политики: `roll` всегда возвращает одно и то же.
struct FixedRoll(f64);

impl RandomSource for FixedRoll {
    fn shuffle(&mut self, _cards: &mut [Card]) {}

    fn roll(&mut self) -> f64 {
        self.0
    }

    fn pick(&mut self, _upper: usize) -> usize {
        0
    }
}

fn actor(balance: u64, round_commitment: u64) -> ActorState {
    let mut a = ActorState::new(1, "Alice", ActorKind::Human, Chips(balance));
    a.round_commitment = Chips(round_commitment);
    a
}

fn round(minimum_call: u64) -> BettingRound {
    BettingRound::new(Stage::Flop, Chips(minimum_call), vec![1, 2, 3])
}

fn state(to_call: u64, balance: u64, can_raise: bool) -> PublicState {
    PublicState {
        actor_id: 2,
        stage: Stage::PreFlop,
        pot_total: Chips(150),
        minimum_call: Chips(to_call),
        to_call: Chips(to_call),
        balance: Chips(balance),
        round_commitment: Chips::ZERO,
        blind_amount: Chips(50),
        can_raise,
        opponents_in_hand: 2,
    }
}

//
// validation.rs
//
#[test]
fn check_only_when_nothing_to_call() {
    let a = actor(1_000, 50);
    assert_eq!(resolve_action(&a, Action::Check, &round(50), 3).unwrap(), Action::Check);

    let err = resolve_action(&a, Action::Check, &round(150), 3).unwrap_err();
    assert!(matches!(err, EngineError::CannotCheck { to_call } if to_call == Chips(100)));
}

#[test]
fn call_requires_something_to_call() {
    let a = actor(1_000, 0);
    assert!(matches!(
        resolve_action(&a, Action::Call, &round(0), 3),
        Err(EngineError::CannotCall)
    ));
    assert_eq!(resolve_action(&a, Action::Call, &round(100), 3).unwrap(), Action::Call);
}

#[test]
fn short_call_becomes_all_in() {
    let a = actor(30, 0);
    assert_eq!(resolve_action(&a, Action::Call, &round(50), 3).unwrap(), Action::AllIn);
    assert_eq!(contribution_for(&a, Action::AllIn, &round(50)), Chips(30));
}

#[test]
fn bet_only_opens_the_street() {
    let a = actor(1_000, 0);
    assert_eq!(
        resolve_action(&a, Action::Bet(Chips(100)), &round(0), 3).unwrap(),
        Action::Bet(Chips(100))
    );
    assert!(matches!(
        resolve_action(&a, Action::Bet(Chips(100)), &round(50), 3),
        Err(EngineError::IllegalAction(_))
    ));
    assert!(matches!(
        resolve_action(&a, Action::Bet(Chips::ZERO), &round(0), 3),
        Err(EngineError::IllegalAction(_))
    ));
}

#[test]
fn bet_above_balance_is_insufficient() {
    let a = actor(80, 0);
    let err = resolve_action(&a, Action::Bet(Chips(100)), &round(0), 3).unwrap_err();
    assert!(matches!(
        err,
        EngineError::InsufficientBalance { needed, available }
            if needed == Chips(100) && available == Chips(80)
    ));
}

#[test]
fn raise_must_exceed_amount_to_call() {
    let a = actor(1_000, 0);
    assert!(matches!(
        resolve_action(&a, Action::Raise(Chips(50)), &round(50), 3),
        Err(EngineError::RaiseTooSmall { .. })
    ));
    assert_eq!(
        resolve_action(&a, Action::Raise(Chips(100)), &round(50), 3).unwrap(),
        Action::Raise(Chips(100))
    );
}

#[test]
fn raise_cap_blocks_further_raises_but_not_all_in() {
    let a = actor(1_000, 0);
    let mut betting = round(50);
    betting.raises = 3;

    assert!(matches!(
        resolve_action(&a, Action::Raise(Chips(100)), &betting, 3),
        Err(EngineError::RaiseCapReached)
    ));
    assert_eq!(resolve_action(&a, Action::AllIn, &betting, 3).unwrap(), Action::AllIn);
}

#[test]
fn folded_or_empty_actor_cannot_act() {
    let mut folded = actor(1_000, 0);
    folded.folded = true;
    assert!(matches!(
        resolve_action(&folded, Action::Check, &round(0), 3),
        Err(EngineError::IllegalAction(_))
    ));

    let broke = actor(0, 0);
    assert!(matches!(
        resolve_action(&broke, Action::AllIn, &round(0), 3),
        Err(EngineError::IllegalAction(_))
    ));
}

#[test]
fn contribution_matches_action() {
    let a = actor(1_000, 50);
    let betting = round(150);
    assert_eq!(amount_to_call(&a, &betting), Chips(100));
    assert_eq!(contribution_for(&a, Action::Fold, &betting), Chips::ZERO);
    assert_eq!(contribution_for(&a, Action::Call, &betting), Chips(100));
    assert_eq!(contribution_for(&a, Action::Raise(Chips(300)), &betting), Chips(300));
    assert_eq!(contribution_for(&a, Action::AllIn, &betting), Chips(1_000));
}

#[test]
fn error_classes() {
    assert!(!EngineError::CannotCall.is_fatal());
    assert!(!EngineError::RaiseCapReached.is_fatal());
    assert!(EngineError::DeckExhausted.is_fatal());
    assert!(EngineError::PotMismatch {
        expected: Chips(1),
        actual: Chips(2)
    }
    .is_fatal());
    assert!(!EngineError::InvalidConfiguration("x".into()).is_fatal());
}

//
// betting.rs
//
#[test]
fn betting_round_queue_and_raise() {
    let mut br = BettingRound::new(Stage::PreFlop, Chips(50), vec![1, 2, 3]);
    assert_eq!(br.current(), Some(1));
    assert!(!br.is_round_complete());

    br.mark_acted(1);
    assert_eq!(br.to_act, vec![2, 3]);

    br.on_raise(2, Chips(150), vec![3, 1]);
    assert_eq!(br.minimum_call, Chips(150));
    assert_eq!(br.raises, 1);
    assert_eq!(br.last_aggressor, Some(2));
    assert_eq!(br.current(), Some(3));

    br.mark_acted(3);
    br.mark_acted(1);
    assert!(br.is_round_complete());
    assert_eq!(br.current(), None);
}

//
// policy.rs
//
#[test]
fn human_policy_always_waits() {
    let mut p = HumanPolicy;
    let mut rng = FixedRoll(0.0);
    assert_eq!(p.decide(&state(0, 1_000, true), &mut rng), PolicyDecision::AwaitExternal);
}

#[test]
fn bot_folds_on_low_roll() {
    let mut p = BotPolicy::new(BotDecisionTable::default());
    let mut rng = FixedRoll(0.1);
    assert_eq!(
        p.decide(&state(50, 1_000, true), &mut rng),
        PolicyDecision::Act(Action::Fold)
    );
}

#[test]
fn bot_passive_choice_adapts_to_situation() {
    let mut p = BotPolicy::new(BotDecisionTable::default());
    let mut rng = FixedRoll(0.5);

    assert_eq!(p.decide(&state(0, 1_000, true), &mut rng), PolicyDecision::Act(Action::Check));
    assert_eq!(p.decide(&state(50, 1_000, true), &mut rng), PolicyDecision::Act(Action::Call));
    assert_eq!(p.decide(&state(50, 30, true), &mut rng), PolicyDecision::Act(Action::AllIn));
}

#[test]
fn bot_aggressive_choice_bets_or_raises_one_blind() {
    let mut p = BotPolicy::new(BotDecisionTable::default());
    let mut rng = FixedRoll(0.9);

    assert_eq!(
        p.decide(&state(0, 1_000, true), &mut rng),
        PolicyDecision::Act(Action::Bet(Chips(50)))
    );
    assert_eq!(
        p.decide(&state(50, 1_000, true), &mut rng),
        PolicyDecision::Act(Action::Raise(Chips(100)))
    );
    // На повышение не хватает – all-in.
    assert_eq!(
        p.decide(&state(50, 100, true), &mut rng),
        PolicyDecision::Act(Action::AllIn)
    );
    // Лимит повышений – остаётся колл.
    assert_eq!(
        p.decide(&state(50, 1_000, false), &mut rng),
        PolicyDecision::Act(Action::Call)
    );
}

#[test]
fn bot_raise_share_follows_raise_weight() {
    // Без веса повышения бросок 0.9 попадает в чек/колл.
    let mut p = BotPolicy::new(BotDecisionTable::uniform(StageOdds::new(0.0, 0.5, 0.0)));
    let mut rng = FixedRoll(0.9);
    assert_eq!(p.decide(&state(0, 1_000, true), &mut rng), PolicyDecision::Act(Action::Check));

    // Только повышение.
    let mut p = BotPolicy::new(BotDecisionTable::uniform(StageOdds::new(0.0, 0.0, 2.0)));
    let mut rng = FixedRoll(0.0);
    assert_eq!(
        p.decide(&state(0, 1_000, true), &mut rng),
        PolicyDecision::Act(Action::Bet(Chips(50)))
    );

    // Все веса нулевые – пассивный ход.
    let mut p = BotPolicy::new(BotDecisionTable::uniform(StageOdds::new(0.0, 0.0, 0.0)));
    assert_eq!(p.decide(&state(50, 1_000, true), &mut rng), PolicyDecision::Act(Action::Call));
}

//
// config.rs
//
#[test]
fn default_config_is_valid() {
    let config = EngineConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.blind_amount, Chips(50));
    assert_eq!(config.bot_decision_table.pre_flop, StageOdds::new(0.2, 0.5, 0.3));
}

#[test]
fn config_rejects_bad_odds_and_limits() {
    let mut config = EngineConfig::default();
    config.bot_decision_table.flop = StageOdds::new(0.5, 0.5, 0.5);
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let config = EngineConfig {
        max_actors: 1,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());

    let config = EngineConfig {
        blind_amount: Chips::ZERO,
        ..EngineConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn config_from_partial_json_keeps_defaults() {
    let config = EngineConfig::from_json_str(r#"{"blind_amount": 100, "max_raises_per_stage": 1}"#)
        .expect("valid config");
    assert_eq!(config.blind_amount, Chips(100));
    assert_eq!(config.max_raises_per_stage, 1);
    assert_eq!(config.max_actors, EngineConfig::default().max_actors);
    assert!(config.human_fold_ends_hand);

    assert!(matches!(
        EngineConfig::from_json_str("{not json"),
        Err(ConfigError::Parse(_))
    ));
}
