use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::BlindConfig;
use crate::phase::CombatPhase;
use crate::player::{Hp, PerSide, Side};

/// Betting street. Each betting-eligible combat phase opens exactly one.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BettingRound {
    /// Before any community card (Spell/Pet phase)
    Preflop,
    /// After the first three community cards (Faith)
    Flop,
    /// After the fourth community card (Foresight)
    Turn,
    /// After the fifth community card (Destiny)
    River,
}

/// A stake-commitment action. Amounts are the actor's total bet for the round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CombatAction {
    /// Fold: concede the round and take the small-blind penalty.
    Brace,
    /// Check. Only legal when nothing is owed.
    Defend,
    /// Call the outstanding bet.
    Engage,
    /// Bet; `None` means the minimum bet.
    Attack(Option<Hp>),
    /// Raise; `None` means the minimum raise.
    CounterAttack(Option<Hp>),
}

impl fmt::Display for CombatAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Brace => write!(f, "braces"),
            Self::Defend => write!(f, "defends"),
            Self::Engage => write!(f, "engages"),
            Self::Attack(Some(amount)) => write!(f, "attacks for {amount}"),
            Self::Attack(None) => write!(f, "attacks"),
            Self::CounterAttack(Some(amount)) => write!(f, "counter-attacks to {amount}"),
            Self::CounterAttack(None) => write!(f, "counter-attacks"),
        }
    }
}

/// Why an action was refused. The state that came with it is returned untouched.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum ActionRejection {
    #[error("cannot defend while {owed} is owed")]
    CallOwed { owed: Hp },
    #[error("action needs {required} health but only {available} remains")]
    Unaffordable { required: Hp, available: Hp },
    #[error("amount {amount} is below the minimum of {minimum}")]
    BelowMinimum { amount: Hp, minimum: Hp },
    #[error("amount {amount} is not a valid stake")]
    InvalidAmount { amount: Hp },
    #[error("it is not {actor}'s turn")]
    NotYourTurn { actor: Side },
    #[error("no betting round is open during {phase:?}")]
    NoBettingRound { phase: CombatPhase },
    #[error("the betting round of {phase:?} is still open")]
    RoundInProgress { phase: CombatPhase },
}

/// Stakes of the hand in progress.
///
/// `pot` always equals the sum of `committed`; commitments only grow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BettingState {
    pub pot: Hp,
    /// Bet every side must match to stay in this round.
    pub current_bet: Hp,
    /// Each side's bet in the current round.
    pub bets: PerSide<Hp>,
    /// Each side's total commitment this hand, blinds and antes included.
    pub committed: PerSide<Hp>,
    pub round: BettingRound,
    pub last_aggressor: Option<Side>,
    pub blinds: BlindConfig,
}

impl BettingState {
    /// Opens `round`: per-round bets reset, commitments and pot carry over.
    pub fn next_round(&self, round: BettingRound) -> BettingState {
        BettingState {
            current_bet: 0.0,
            bets: PerSide::splat(0.0),
            round,
            last_aggressor: None,
            ..*self
        }
    }

    fn commit(&mut self, side: Side, additional: Hp) {
        self.bets[side] += additional;
        self.committed[side] += additional;
        self.pot += additional;
    }
}

/// Outcome of [`process_betting_action`].
#[derive(Debug, Clone, PartialEq)]
pub struct BettingResult {
    pub new_state: BettingState,
    pub is_round_complete: bool,
    /// Set when the action ended the hand (a fold).
    pub winner: Option<Side>,
    /// Health the folding side loses.
    pub hp_lost: Option<Hp>,
    /// Set when the action was illegal; `new_state` is then the input state.
    pub rejection: Option<ActionRejection>,
}

impl BettingResult {
    fn advanced(new_state: BettingState, is_round_complete: bool) -> Self {
        Self {
            new_state,
            is_round_complete,
            winner: None,
            hp_lost: None,
            rejection: None,
        }
    }

    fn rejected(state: &BettingState, reason: ActionRejection) -> Self {
        Self {
            new_state: *state,
            is_round_complete: false,
            winner: None,
            hp_lost: None,
            rejection: Some(reason),
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }
}

/// Posts blinds and antes for a new hand and opens the pre-flop round.
pub fn initialize_betting_state(blinds: BlindConfig, small_blind: Side) -> BettingState {
    let big_blind = small_blind.opponent();
    let mut bets = PerSide::splat(0.0);
    bets[small_blind] = blinds.small_blind;
    bets[big_blind] = blinds.big_blind;
    let committed = bets.map(|_, bet| bet + blinds.ante);
    BettingState {
        pot: blinds.small_blind + blinds.big_blind + blinds.ante * 2.0,
        current_bet: blinds.big_blind,
        bets,
        committed,
        round: BettingRound::Preflop,
        last_aggressor: None,
        blinds,
    }
}

pub fn calculate_min_bet(state: &BettingState) -> Hp {
    state.blinds.big_blind.max(state.current_bet)
}

pub fn calculate_min_raise(state: &BettingState) -> Hp {
    state.current_bet + state.blinds.big_blind
}

/// Health `side` must add to match the current bet.
pub fn calculate_call_amount(state: &BettingState, side: Side) -> Hp {
    (state.current_bet - state.bets[side]).max(0.0)
}

pub fn can_afford_bet(health: Hp, amount: Hp) -> bool {
    health >= amount
}

/// Applies `action` by `actor`, whose remaining health is `actor_health`.
///
/// Pure: illegal actions come back as the unchanged state with
/// `is_round_complete == false` and a [`ActionRejection`].
pub fn process_betting_action(
    state: &BettingState,
    actor: Side,
    action: CombatAction,
    actor_health: Hp,
) -> BettingResult {
    let result = match action {
        CombatAction::Brace => BettingResult {
            new_state: *state,
            is_round_complete: true,
            winner: Some(actor.opponent()),
            hp_lost: Some(state.blinds.small_blind),
            rejection: None,
        },
        CombatAction::Defend => {
            let owed = calculate_call_amount(state, actor);
            if owed > 0.0 {
                BettingResult::rejected(state, ActionRejection::CallOwed { owed })
            } else {
                BettingResult::advanced(*state, state.last_aggressor.is_none())
            }
        }
        CombatAction::Engage => {
            let owed = calculate_call_amount(state, actor);
            if !can_afford_bet(actor_health, owed) {
                BettingResult::rejected(
                    state,
                    ActionRejection::Unaffordable {
                        required: owed,
                        available: actor_health,
                    },
                )
            } else {
                let mut next = *state;
                next.commit(actor, owed);
                BettingResult::advanced(next, true)
            }
        }
        CombatAction::Attack(amount) => {
            let target = amount.unwrap_or_else(|| calculate_min_bet(state));
            aggress(state, actor, target, calculate_min_bet(state), actor_health)
        }
        CombatAction::CounterAttack(amount) => {
            let target = amount.unwrap_or_else(|| calculate_min_raise(state));
            aggress(state, actor, target, calculate_min_raise(state), actor_health)
        }
    };

    match &result.rejection {
        Some(reason) => tracing::debug!(
            side = %actor,
            action = %action,
            round = ?state.round,
            %reason,
            "betting action rejected"
        ),
        None => tracing::debug!(
            side = %actor,
            action = %action,
            round = ?state.round,
            pot = result.new_state.pot,
            current_bet = result.new_state.current_bet,
            complete = result.is_round_complete,
            "betting action applied"
        ),
    }
    result
}

// Shared by bet and raise: raise the actor's round bet to `target`.
fn aggress(
    state: &BettingState,
    actor: Side,
    target: Hp,
    minimum: Hp,
    actor_health: Hp,
) -> BettingResult {
    if !target.is_finite() || target < 0.0 {
        return BettingResult::rejected(state, ActionRejection::InvalidAmount { amount: target });
    }
    let additional = target - state.bets[actor];
    if !can_afford_bet(actor_health, additional) {
        return BettingResult::rejected(
            state,
            ActionRejection::Unaffordable {
                required: additional,
                available: actor_health,
            },
        );
    }
    // Committing everything may fall short of the minimum, but must still top the current bet.
    let is_shove = additional == actor_health && target > state.current_bet;
    if additional <= 0.0 || (target < minimum && !is_shove) {
        return BettingResult::rejected(
            state,
            ActionRejection::BelowMinimum {
                amount: target,
                minimum,
            },
        );
    }

    let mut next = *state;
    next.commit(actor, additional);
    next.current_bet = target;
    next.last_aggressor = Some(actor);
    BettingResult::advanced(next, false)
}
