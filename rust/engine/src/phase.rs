use serde::{Deserialize, Serialize};

use crate::betting::BettingRound;
use crate::player::Side;
use crate::turn::get_active_player;

/// Stages of one combat, in order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatPhase {
    /// Opening blow before any cards, only when a first strike was granted.
    FirstStrike,
    /// Hole cards may be replaced. No betting.
    Mulligan,
    /// Pre-flop betting.
    SpellPet,
    /// Flop: three community cards.
    Faith,
    /// Turn: fourth community card.
    Foresight,
    /// River: fifth community card.
    Destiny,
    /// Showdown. Terminal.
    Resolution,
}

pub const PHASE_ORDER: [CombatPhase; 7] = [
    CombatPhase::FirstStrike,
    CombatPhase::Mulligan,
    CombatPhase::SpellPet,
    CombatPhase::Faith,
    CombatPhase::Foresight,
    CombatPhase::Destiny,
    CombatPhase::Resolution,
];

/// Following phase; Resolution maps to itself.
pub fn get_next_phase(phase: CombatPhase) -> CombatPhase {
    match phase {
        CombatPhase::FirstStrike => CombatPhase::Mulligan,
        CombatPhase::Mulligan => CombatPhase::SpellPet,
        CombatPhase::SpellPet => CombatPhase::Faith,
        CombatPhase::Faith => CombatPhase::Foresight,
        CombatPhase::Foresight => CombatPhase::Destiny,
        CombatPhase::Destiny | CombatPhase::Resolution => CombatPhase::Resolution,
    }
}

pub fn get_betting_round_for_phase(phase: CombatPhase) -> Option<BettingRound> {
    match phase {
        CombatPhase::SpellPet => Some(BettingRound::Preflop),
        CombatPhase::Faith => Some(BettingRound::Flop),
        CombatPhase::Foresight => Some(BettingRound::Turn),
        CombatPhase::Destiny => Some(BettingRound::River),
        CombatPhase::FirstStrike | CombatPhase::Mulligan | CombatPhase::Resolution => None,
    }
}

/// Community cards that should be face up once `phase` has begun.
pub fn get_total_community_cards_for_phase(phase: CombatPhase) -> usize {
    match phase {
        CombatPhase::FirstStrike | CombatPhase::Mulligan | CombatPhase::SpellPet => 0,
        CombatPhase::Faith => 3,
        CombatPhase::Foresight => 4,
        CombatPhase::Destiny | CombatPhase::Resolution => 5,
    }
}

/// Whether `phase` solicits betting actions.
pub fn is_betting_phase(phase: CombatPhase) -> bool {
    get_betting_round_for_phase(phase).is_some()
}

/// Phase a new combat opens in.
///
/// A forced all-in skips straight to the cards; otherwise a granted first
/// strike comes first, then the mulligan unless it is skipped.
pub fn starting_phase(first_strike: bool, skip_mulligan: bool, forced_all_in: bool) -> CombatPhase {
    if forced_all_in {
        CombatPhase::SpellPet
    } else if first_strike {
        CombatPhase::FirstStrike
    } else if skip_mulligan {
        CombatPhase::SpellPet
    } else {
        CombatPhase::Mulligan
    }
}

/// Where the combat stands in the phase sequence.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PhaseState {
    pub phase: CombatPhase,
    pub betting_round: Option<BettingRound>,
    /// Side whose action is pending, if any.
    pub active: Option<Side>,
    /// Actions taken in this phase.
    pub turn: u32,
    pub community_revealed: usize,
}

impl PhaseState {
    pub fn enter(phase: CombatPhase, small_blind: Side) -> Self {
        Self {
            phase,
            betting_round: get_betting_round_for_phase(phase),
            active: get_active_player(phase, small_blind),
            turn: 0,
            community_revealed: get_total_community_cards_for_phase(phase),
        }
    }

    pub fn advance(&self, small_blind: Side) -> Self {
        let next = Self::enter(get_next_phase(self.phase), small_blind);
        tracing::debug!(from = ?self.phase, to = ?next.phase, active = ?next.active, "phase advanced");
        next
    }

    /// Hands the action to the other side within the same phase.
    pub fn pass_turn(&self) -> Self {
        Self {
            active: self.active.map(Side::opponent),
            turn: self.turn + 1,
            ..*self
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == CombatPhase::Resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_advances_one_step_and_clamps() {
        let walked: Vec<CombatPhase> = PHASE_ORDER.iter().map(|&p| get_next_phase(p)).collect();
        assert_eq!(&walked[..6], &PHASE_ORDER[1..]);
        assert_eq!(walked[6], CombatPhase::Resolution);
    }

    #[test]
    fn only_four_phases_bet() {
        let betting: Vec<CombatPhase> = PHASE_ORDER
            .iter()
            .copied()
            .filter(|&p| is_betting_phase(p))
            .collect();
        assert_eq!(
            betting,
            vec![
                CombatPhase::SpellPet,
                CombatPhase::Faith,
                CombatPhase::Foresight,
                CombatPhase::Destiny
            ]
        );
    }

    #[test]
    fn community_count_never_decreases() {
        let counts: Vec<usize> = PHASE_ORDER
            .iter()
            .map(|&p| get_total_community_cards_for_phase(p))
            .collect();
        assert_eq!(counts, vec![0, 0, 0, 3, 4, 5, 5]);
        assert!(counts.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn starting_phase_precedence() {
        assert_eq!(starting_phase(true, true, true), CombatPhase::SpellPet);
        assert_eq!(starting_phase(true, false, false), CombatPhase::FirstStrike);
        assert_eq!(starting_phase(false, true, false), CombatPhase::SpellPet);
        assert_eq!(starting_phase(false, false, false), CombatPhase::Mulligan);
    }

    #[test]
    fn phase_state_tracks_turns() {
        let s = PhaseState::enter(CombatPhase::SpellPet, Side::Player);
        assert_eq!(s.active, Some(Side::Player));
        assert_eq!(s.betting_round, Some(BettingRound::Preflop));
        let s = s.pass_turn();
        assert_eq!(s.active, Some(Side::Opponent));
        assert_eq!(s.turn, 1);
        let s = s.advance(Side::Player);
        assert_eq!(s.phase, CombatPhase::Faith);
        assert_eq!(s.turn, 0);
        assert_eq!(s.community_revealed, 3);
    }
}
