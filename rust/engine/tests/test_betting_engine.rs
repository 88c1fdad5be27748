use poker_combat::betting::{
    calculate_call_amount, initialize_betting_state, process_betting_action, ActionRejection,
    BettingRound, BettingState, CombatAction,
};
use poker_combat::config::BlindConfig;
use poker_combat::player::{PerSide, Side};

// Player posts the small blind, opponent the big blind.
fn preflop() -> BettingState {
    initialize_betting_state(BlindConfig::default(), Side::Player)
}

fn assert_pot_matches_commitments(state: &BettingState) {
    assert_eq!(state.pot, state.committed.player + state.committed.opponent);
}

#[test]
fn defend_when_owed_is_rejected_without_change() {
    let s = preflop();
    let r = process_betting_action(&s, Side::Player, CombatAction::Defend, 94.5);
    assert_eq!(r.rejection, Some(ActionRejection::CallOwed { owed: 5.0 }));
    assert!(!r.is_round_complete);
    assert_eq!(r.new_state, s);
}

#[test]
fn engage_matches_the_bet_and_closes_the_round() {
    let s = preflop();
    let r = process_betting_action(&s, Side::Player, CombatAction::Engage, 94.5);
    assert!(r.is_round_complete);
    assert_eq!(r.new_state.bets, PerSide::splat(10.0));
    assert_eq!(r.new_state.pot, 21.0);
    assert_pot_matches_commitments(&r.new_state);
}

#[test]
fn bet_then_call_on_the_flop() {
    let s = preflop().next_round(BettingRound::Flop);
    let bet = process_betting_action(&s, Side::Opponent, CombatAction::Attack(Some(20.0)), 89.5);
    assert!(!bet.is_round_complete);
    assert_eq!(bet.new_state.current_bet, 20.0);
    assert_eq!(bet.new_state.last_aggressor, Some(Side::Opponent));
    assert_eq!(calculate_call_amount(&bet.new_state, Side::Player), 20.0);

    let call = process_betting_action(&bet.new_state, Side::Player, CombatAction::Engage, 89.5);
    assert!(call.is_round_complete);
    assert_eq!(call.new_state.pot, 56.0);
    assert_pot_matches_commitments(&call.new_state);
}

#[test]
fn raise_requires_a_full_increment() {
    let s = preflop().next_round(BettingRound::Turn);
    let bet = process_betting_action(&s, Side::Player, CombatAction::Attack(None), 80.0);
    assert_eq!(bet.new_state.current_bet, 10.0);

    let small = process_betting_action(
        &bet.new_state,
        Side::Opponent,
        CombatAction::CounterAttack(Some(15.0)),
        80.0,
    );
    assert_eq!(
        small.rejection,
        Some(ActionRejection::BelowMinimum {
            amount: 15.0,
            minimum: 20.0
        })
    );

    let raise = process_betting_action(
        &bet.new_state,
        Side::Opponent,
        CombatAction::CounterAttack(None),
        80.0,
    );
    assert!(!raise.is_rejected());
    assert_eq!(raise.new_state.current_bet, 20.0);
    assert_eq!(raise.new_state.last_aggressor, Some(Side::Opponent));
}

#[test]
fn check_closes_only_an_unopened_round() {
    let s = preflop().next_round(BettingRound::River);
    let check = process_betting_action(&s, Side::Player, CombatAction::Defend, 50.0);
    assert!(check.is_round_complete);
    assert_eq!(check.new_state, s);
}

#[test]
fn unaffordable_bet_is_rejected() {
    let s = preflop().next_round(BettingRound::Flop);
    let r = process_betting_action(&s, Side::Player, CombatAction::Attack(Some(40.0)), 30.0);
    assert_eq!(
        r.rejection,
        Some(ActionRejection::Unaffordable {
            required: 40.0,
            available: 30.0
        })
    );
    assert_eq!(r.new_state, s);
}

#[test]
fn short_call_is_rejected() {
    let s = preflop().next_round(BettingRound::Flop);
    let bet = process_betting_action(&s, Side::Opponent, CombatAction::Attack(Some(50.0)), 89.5);
    let r = process_betting_action(&bet.new_state, Side::Player, CombatAction::Engage, 30.0);
    assert!(matches!(r.rejection, Some(ActionRejection::Unaffordable { .. })));
}

#[test]
fn brace_reports_the_small_blind_penalty() {
    let s = preflop();
    let r = process_betting_action(&s, Side::Player, CombatAction::Brace, 94.5);
    assert!(r.is_round_complete);
    assert_eq!(r.winner, Some(Side::Opponent));
    assert_eq!(r.hp_lost, Some(5.0));
    assert_eq!(r.new_state, s);
}

#[test]
fn commitments_never_decrease() {
    let mut state = preflop();
    let script = [
        (Side::Player, CombatAction::CounterAttack(Some(30.0))),
        (Side::Opponent, CombatAction::CounterAttack(Some(60.0))),
        (Side::Player, CombatAction::Engage),
    ];
    for (side, action) in script {
        let before = state.committed;
        let r = process_betting_action(&state, side, action, 200.0);
        assert!(!r.is_rejected(), "{side} {action} was rejected: {:?}", r.rejection);
        assert!(r.new_state.committed.player >= before.player);
        assert!(r.new_state.committed.opponent >= before.opponent);
        assert_pot_matches_commitments(&r.new_state);
        state = r.new_state;
    }
    assert_eq!(state.committed, PerSide::splat(60.5));
}
