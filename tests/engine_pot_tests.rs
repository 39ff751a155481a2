use poker_hand_engine::domain::Chips;
use poker_hand_engine::engine::{EngineError, Payout, PotLedger};

fn ledger_with(contributions: &[(u64, u64)]) -> PotLedger {
    let mut pot = PotLedger::new(contributions.iter().map(|(id, _)| *id));
    for &(id, amount) in contributions {
        pot.add_contribution(id, Chips(amount)).expect("contribution");
    }
    pot
}

#[test]
fn contributions_accumulate_total() {
    let pot = ledger_with(&[(1, 50), (2, 50), (3, 50)]);
    assert_eq!(pot.total(), Chips(150));
    assert_eq!(pot.contribution_of(2), Some(Chips(50)));
    assert!(pot.verify().is_ok());
}

#[test]
fn unknown_actor_contribution_changes_nothing() {
    let mut pot = ledger_with(&[(1, 50)]);
    let err = pot.add_contribution(99, Chips(10)).unwrap_err();
    assert!(matches!(err, EngineError::InvalidContribution { actor_id: 99, .. }));
    assert_eq!(pot.total(), Chips(50));
    assert_eq!(pot.contribution_of(99), None);
}

#[test]
fn overflowing_contribution_changes_nothing() {
    let mut pot = ledger_with(&[(1, 50), (2, 0)]);
    assert!(pot.add_contribution(2, Chips(u64::MAX)).is_err());
    assert_eq!(pot.total(), Chips(50));
    assert_eq!(pot.contribution_of(2), Some(Chips::ZERO));
}

#[test]
fn resolve_splits_evenly_between_two_winners() {
    let mut pot = ledger_with(&[(1, 50), (2, 50), (3, 50)]);
    let payouts = pot.resolve(&[2, 3]).expect("resolve");
    assert_eq!(
        payouts,
        vec![
            Payout { actor_id: 2, amount: Chips(75) },
            Payout { actor_id: 3, amount: Chips(75) },
        ]
    );
    assert_eq!(pot.total(), Chips::ZERO);
}

#[test]
fn remainder_goes_to_first_winner() {
    let mut pot = ledger_with(&[(1, 40), (2, 30), (3, 30)]);
    let payouts = pot.resolve(&[3, 1, 2]).expect("resolve");
    let amounts: Vec<Chips> = payouts.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![Chips(34), Chips(33), Chips(33)]);

    let paid: Chips = amounts.iter().sum();
    assert_eq!(paid, Chips(100));
}

#[test]
fn invalid_winner_sets_are_rejected_without_paying() {
    let mut pot = ledger_with(&[(1, 50), (2, 50)]);

    assert!(matches!(pot.resolve(&[]), Err(EngineError::InvalidWinnerSet(_))));
    assert!(matches!(pot.resolve(&[1, 1]), Err(EngineError::InvalidWinnerSet(_))));
    assert!(matches!(pot.resolve(&[7]), Err(EngineError::InvalidWinnerSet(_))));

    // Банк не тронут.
    assert_eq!(pot.total(), Chips(100));
}

#[test]
fn reset_keeps_participants() {
    let mut pot = ledger_with(&[(1, 50), (2, 50)]);
    pot.reset();
    assert_eq!(pot.total(), Chips::ZERO);
    assert_eq!(pot.contribution_of(1), Some(Chips::ZERO));
    pot.add_contribution(1, Chips(10)).expect("still known");
}
