use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::BlindConfig;
use crate::player::{Hp, PerSide, Side};

/// A slice of the pot and the sides that may win it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: Hp,
    pub eligible: BTreeSet<Side>,
    pub is_main: bool,
}

/// The pot split into the contested main pot and uncontested side pots.
///
/// `main_pot + Σ side_pots.amount` equals the pot it was calculated from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotState {
    pub main_pot: Hp,
    /// Never contains the main pot.
    pub side_pots: Vec<SidePot>,
    pub all_in: BTreeSet<Side>,
}

impl PotState {
    pub fn total(&self) -> Hp {
        self.main_pot + self.side_pots.iter().map(|p| p.amount).sum::<Hp>()
    }

    /// Every pot, main first.
    pub fn pots(&self) -> impl Iterator<Item = SidePot> + '_ {
        let main = SidePot {
            amount: self.main_pot,
            eligible: Side::BOTH.into_iter().collect(),
            is_main: true,
        };
        std::iter::once(main).chain(self.side_pots.iter().cloned())
    }

    /// No further betting is possible once any side is all-in.
    pub fn is_all_in_showdown(&self) -> bool {
        !self.all_in.is_empty()
    }
}

/// A side is all-in once it can no longer cover the standard minimum bet.
pub fn is_all_in(health: Hp, blinds: &BlindConfig) -> bool {
    health < blinds.big_blind
}

/// Splits `current_pot` given each side's total commitment this hand.
///
/// Whatever one side committed beyond the other's total can never be called,
/// so it becomes a side pot that only its owner is eligible for.
pub fn calculate_side_pots(
    committed: PerSide<Hp>,
    remaining_health: PerSide<Hp>,
    current_pot: Hp,
    blinds: &BlindConfig,
) -> PotState {
    let excess = (committed.player - committed.opponent).abs();
    let all_in: BTreeSet<Side> = remaining_health
        .iter()
        .filter(|(_, health)| is_all_in(**health, blinds))
        .map(|(side, _)| side)
        .collect();

    let mut side_pots = Vec::new();
    if excess > 0.0 {
        let owner = if committed.player > committed.opponent {
            Side::Player
        } else {
            Side::Opponent
        };
        side_pots.push(SidePot {
            amount: excess,
            eligible: BTreeSet::from([owner]),
            is_main: false,
        });
    }

    let state = PotState {
        main_pot: current_pot - excess,
        side_pots,
        all_in,
    };
    tracing::debug!(
        main_pot = state.main_pot,
        side_pots = state.side_pots.len(),
        all_in = ?state.all_in,
        "pots calculated"
    );
    state
}

/// Pays every pot out. `winner == None` is a draw and splits the main pot.
///
/// A side pot goes to the winner only if the winner is eligible for it,
/// otherwise back to its eligible owners. Nothing is created or lost.
pub fn award_pots(pots: &PotState, winner: Option<Side>) -> PerSide<Hp> {
    let mut payouts = PerSide::splat(0.0);
    for pot in pots.pots() {
        match winner {
            Some(side) if pot.eligible.contains(&side) => payouts[side] += pot.amount,
            _ => {
                let share = pot.amount / pot.eligible.len().max(1) as Hp;
                for &side in &pot.eligible {
                    payouts[side] += share;
                }
            }
        }
    }
    tracing::debug!(
        player = payouts.player,
        opponent = payouts.opponent,
        ?winner,
        "pots awarded"
    );
    payouts
}
