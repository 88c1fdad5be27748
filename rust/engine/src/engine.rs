use crate::betting::{
    initialize_betting_state, process_betting_action, ActionRejection, BettingRound, BettingState,
    CombatAction,
};
use crate::cache::HandCache;
use crate::cards::Card;
use crate::config::CombatConfig;
use crate::deck::Deck;
use crate::errors::CombatError;
use crate::hand::{find_best_hand, EvaluatedHand};
use crate::phase::{is_betting_phase, starting_phase, CombatPhase, PhaseState};
use crate::player::{Hp, PerSide, Side};
use crate::pot::{calculate_side_pots, is_all_in};
use crate::record::{ActionRecord, CombatRecord};
use crate::resolution::{
    apply_first_strike, resolve_all_in_showdown, resolve_fold, resolve_showdown, CombatResolution,
};

/// Who sits where and with how much health when a combat starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSetup {
    pub small_blind: Side,
    /// Health before blinds and antes.
    pub health: PerSide<Hp>,
    /// Side that receives the opening blow, if any.
    pub first_strike: Option<Side>,
    pub skip_mulligan: bool,
}

/// Snapshot of one combat that chains the pure engine functions.
///
/// Nothing is mutated in place: every step takes `&self` and returns the
/// next snapshot, so hosts can preview actions freely.
///
/// # Examples
///
/// ```
/// use poker_combat::betting::CombatAction;
/// use poker_combat::config::CombatConfig;
/// use poker_combat::engine::{CombatTable, TableSetup};
/// use poker_combat::player::{PerSide, Side};
///
/// let setup = TableSetup {
///     small_blind: Side::Player,
///     health: PerSide::new(100.0, 100.0),
///     first_strike: None,
///     skip_mulligan: true,
/// };
/// let table = CombatTable::deal(CombatConfig::default(), setup, 42).unwrap();
/// let table = table.act(Side::Player, CombatAction::Brace).unwrap();
/// let resolution = table.resolution().unwrap();
/// assert_eq!(resolution.final_health[Side::Player], 95.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CombatTable {
    config: CombatConfig,
    setup: TableSetup,
    health: PerSide<Hp>,
    hole: PerSide<Vec<Card>>,
    /// Every community card, revealed progressively by phase.
    board: Vec<Card>,
    phase: PhaseState,
    betting: BettingState,
    actions: Vec<ActionRecord>,
    seed: Option<u64>,
    /// Cards drawn from the seeded deck by mulligans, after the initial nine.
    redrawn: usize,
    mulliganed: PerSide<bool>,
    resolution: Option<CombatResolution>,
}

impl CombatTable {
    /// Table with cards dealt by the host. `board` holds the five community
    /// cards in reveal order.
    pub fn new(
        config: CombatConfig,
        setup: TableSetup,
        hole: PerSide<Vec<Card>>,
        board: Vec<Card>,
    ) -> Self {
        let forced_all_in = setup
            .health
            .iter()
            .any(|(_, &hp)| is_all_in(hp, &config.blinds));
        let phase = starting_phase(setup.first_strike.is_some(), setup.skip_mulligan, forced_all_in);
        tracing::debug!(?phase, forced_all_in, "combat table opened");
        let mut table = Self {
            health: setup.health,
            phase: PhaseState::enter(phase, setup.small_blind),
            betting: unposted(&config),
            config,
            setup,
            hole,
            board,
            actions: Vec::new(),
            seed: None,
            redrawn: 0,
            mulliganed: PerSide::splat(false),
            resolution: None,
        };
        if phase == CombatPhase::SpellPet {
            table.post_preflop_blinds();
        }
        table
    }

    /// Shuffles a seeded deck and deals both hands and the full board.
    pub fn deal(config: CombatConfig, setup: TableSetup, seed: u64) -> Result<Self, CombatError> {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        let player = deck.deal_hole_cards()?;
        let opponent = deck.deal_hole_cards()?;
        let board = deck.deal_community(5)?;
        let mut table = Self::new(
            config,
            setup,
            PerSide::new(player.to_vec(), opponent.to_vec()),
            board,
        );
        table.seed = Some(seed);
        Ok(table)
    }

    pub fn phase(&self) -> &PhaseState {
        &self.phase
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    pub fn health(&self) -> PerSide<Hp> {
        self.health
    }

    pub fn hole_cards(&self, side: Side) -> &[Card] {
        &self.hole[side]
    }

    pub fn resolution(&self) -> Option<&CombatResolution> {
        self.resolution.as_ref()
    }

    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }

    /// Community cards face up in the current phase.
    pub fn visible_community(&self) -> &[Card] {
        let n = self.phase.community_revealed.min(self.board.len());
        &self.board[..n]
    }

    /// Health `side` can still put at stake this hand.
    pub fn remaining_health(&self, side: Side) -> Hp {
        (self.health[side] - self.betting.committed[side]).max(0.0)
    }

    /// Whether a side can no longer cover the minimum bet.
    pub fn is_all_in(&self) -> bool {
        Side::BOTH
            .iter()
            .any(|&side| is_all_in(self.remaining_health(side), &self.config.blinds))
    }

    /// Whether the current phase is waiting on a betting action.
    pub fn is_betting_open(&self) -> bool {
        self.resolution.is_none()
            && is_betting_phase(self.phase.phase)
            && self.phase.active.is_some()
    }

    /// Current best hand of `side` from the visible cards, for display.
    pub fn current_hand(&self, side: Side, cache: &mut HandCache) -> EvaluatedHand {
        cache.get_or_evaluate(&self.hole[side], self.visible_community())
    }

    /// Applies a betting action by `side`.
    ///
    /// A completed round moves on to the next phase; a fold resolves the combat.
    pub fn act(&self, side: Side, action: CombatAction) -> Result<CombatTable, ActionRejection> {
        let phase = self.phase.phase;
        if !self.is_betting_open() {
            return Err(ActionRejection::NoBettingRound { phase });
        }
        if self.phase.active != Some(side) {
            return Err(ActionRejection::NotYourTurn { actor: side });
        }

        let result =
            process_betting_action(&self.betting, side, action, self.remaining_health(side));
        if let Some(reason) = result.rejection {
            return Err(reason);
        }

        let mut next = self.clone();
        next.betting = result.new_state;
        next.actions.push(ActionRecord {
            side,
            round: self.betting.round,
            action,
        });

        if result.winner.is_some() {
            next.resolution = Some(resolve_fold(side, self.health, &self.config.blinds));
            next.phase = PhaseState::enter(CombatPhase::Resolution, self.setup.small_blind);
            return Ok(next);
        }
        if result.is_round_complete {
            return Ok(next.open_next_phase());
        }
        next.phase = next.phase.pass_turn();
        Ok(next)
    }

    /// Moves past a phase that solicits no betting: first strike, mulligan,
    /// or a betting phase whose cards run out because a side is all-in.
    pub fn advance(&self) -> Result<CombatTable, ActionRejection> {
        let phase = self.phase.phase;
        if self.phase.is_terminal() || self.resolution.is_some() {
            return Err(ActionRejection::NoBettingRound { phase });
        }
        if self.is_betting_open() {
            return Err(ActionRejection::RoundInProgress { phase });
        }

        let mut next = self.clone();
        if phase == CombatPhase::FirstStrike {
            if let Some(target) = self.setup.first_strike {
                next.health[target] =
                    apply_first_strike(self.health[target], self.config.first_strike_damage);
                tracing::debug!(%target, health = next.health[target], "first strike landed");
            }
        }
        Ok(next.open_next_phase())
    }

    /// Replaces the hole cards of `side` whose `keep` flag is false with
    /// fresh cards from the seeded deck. Each side may mulligan once.
    pub fn mulligan(&self, side: Side, keep: [bool; 2]) -> Result<CombatTable, CombatError> {
        if self.phase.phase != CombatPhase::Mulligan {
            return Err(CombatError::MulliganRejected(format!(
                "phase is {:?}",
                self.phase.phase
            )));
        }
        let seed = self.seed.ok_or_else(|| {
            CombatError::MulliganRejected("cards were dealt by the host".to_string())
        })?;
        if self.mulliganed[side] {
            return Err(CombatError::MulliganRejected(format!(
                "{side} already took a mulligan"
            )));
        }

        let replaced = keep.iter().filter(|&&kept| !kept).count();
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        deck.deal_community(DEALT_CARDS + self.redrawn)?;
        let mut fresh = deck.deal_community(replaced)?.into_iter();

        let mut next = self.clone();
        for (card, &kept) in next.hole[side].iter_mut().zip(keep.iter()) {
            if !kept {
                if let Some(new_card) = fresh.next() {
                    *card = new_card;
                }
            }
        }
        next.redrawn += replaced;
        next.mulliganed[side] = true;
        tracing::debug!(%side, replaced, "mulligan taken");
        Ok(next)
    }

    /// Hand history of this combat so far.
    pub fn to_record(&self, combat_id: String) -> CombatRecord {
        CombatRecord {
            seed: self.seed,
            actions: self.actions.clone(),
            community: self.visible_community().to_vec(),
            resolution: self.resolution.clone(),
            ..CombatRecord::new(combat_id)
        }
    }

    fn open_next_phase(mut self) -> CombatTable {
        self.phase = self.phase.advance(self.setup.small_blind);
        match self.phase.phase {
            CombatPhase::Resolution => self.resolve(),
            CombatPhase::SpellPet => self.post_preflop_blinds(),
            _ => {
                if let Some(round) = self.phase.betting_round {
                    self.betting = self.betting.next_round(round);
                }
            }
        }
        if self.is_all_in() {
            self.phase.active = None;
        }
        self
    }

    // Blinds go in on entering SpellPet, against health after any first strike.
    fn post_preflop_blinds(&mut self) {
        self.betting = post_blinds(&self.config, self.setup.small_blind, self.health);
        if self.is_all_in() {
            self.phase.active = None;
        }
        tracing::debug!(pot = self.betting.pot, all_in = self.is_all_in(), "blinds posted");
    }

    fn resolve(&mut self) {
        let community = self.visible_community();
        let hands = PerSide::new(
            find_best_hand(&self.hole.player, community),
            find_best_hand(&self.hole.opponent, community),
        );
        let committed = self.betting.committed;
        let resolution = if committed.player == committed.opponent {
            resolve_showdown(hands, committed, self.health)
        } else {
            let remaining = PerSide::new(
                self.remaining_health(Side::Player),
                self.remaining_health(Side::Opponent),
            );
            let pots = calculate_side_pots(
                committed,
                remaining,
                self.betting.pot,
                &self.config.blinds,
            );
            resolve_all_in_showdown(hands, &pots, self.health)
        };
        self.resolution = Some(resolution);
    }
}

// Two hole cards each plus the five-card board.
const DEALT_CARDS: usize = 9;

// Betting state before any blind is posted.
fn unposted(config: &CombatConfig) -> BettingState {
    BettingState {
        pot: 0.0,
        current_bet: 0.0,
        bets: PerSide::splat(0.0),
        committed: PerSide::splat(0.0),
        round: BettingRound::Preflop,
        last_aggressor: None,
        blinds: config.blinds,
    }
}

// Blinds and antes, capped at what each side actually has.
fn post_blinds(config: &CombatConfig, small_blind: Side, health: PerSide<Hp>) -> BettingState {
    let mut state = initialize_betting_state(config.blinds, small_blind);
    for side in Side::BOTH {
        let available = health[side].max(0.0);
        let over = state.committed[side] - available;
        if over > 0.0 {
            state.committed[side] = available;
            state.bets[side] = (state.bets[side] - over).max(0.0);
            state.pot -= over;
        }
    }
    state
}
