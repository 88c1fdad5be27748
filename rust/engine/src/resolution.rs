use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::config::BlindConfig;
use crate::hand::{compare_hands, EvaluatedHand};
use crate::player::{Hp, PerSide, Side};
use crate::pot::{award_pots, PotState};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Side(Side),
    Draw,
}

impl Winner {
    pub fn side(self) -> Option<Side> {
        match self {
            Winner::Side(side) => Some(side),
            Winner::Draw => None,
        }
    }
}

/// How the combat ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Showdown,
    Fold,
}

/// Final outcome of one combat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatResolution {
    pub winner: Winner,
    pub termination: Termination,
    /// Both hands at showdown; `None` on a fold since nothing is revealed.
    pub hands: PerSide<Option<EvaluatedHand>>,
    /// Damage each side takes.
    pub damage: PerSide<Hp>,
    /// Health after damage, floored at 0.
    pub final_health: PerSide<Hp>,
    pub folded: Option<Side>,
}

/// Winner by hand strength alone.
pub fn showdown_winner(hands: &PerSide<EvaluatedHand>) -> Winner {
    match compare_hands(&hands.player, &hands.opponent) {
        Ordering::Greater => Winner::Side(Side::Player),
        Ordering::Less => Winner::Side(Side::Opponent),
        Ordering::Equal => Winner::Draw,
    }
}

/// Showdown: the loser takes the whole pot (both commitments) as damage,
/// the winner takes none. A draw hurts nobody.
pub fn resolve_showdown(
    hands: PerSide<EvaluatedHand>,
    committed: PerSide<Hp>,
    health: PerSide<Hp>,
) -> CombatResolution {
    let winner = showdown_winner(&hands);
    let pot = committed.player + committed.opponent;
    let damage = damage_to_loser(winner, pot);
    finish_showdown(winner, hands, damage, health)
}

/// Showdown with an all-in: only what the winner is awarded hurts the loser.
/// Uncalled excess handed back by [`award_pots`] is not damage.
pub fn resolve_all_in_showdown(
    hands: PerSide<EvaluatedHand>,
    pots: &PotState,
    health: PerSide<Hp>,
) -> CombatResolution {
    let winner = showdown_winner(&hands);
    let damage = match winner.side() {
        Some(side) => {
            let awarded = award_pots(pots, Some(side))[side];
            let returned: Hp = pots
                .side_pots
                .iter()
                .filter(|pot| pot.eligible.contains(&side))
                .map(|pot| pot.amount)
                .sum();
            damage_to_loser(winner, awarded - returned)
        }
        None => PerSide::splat(0.0),
    };
    finish_showdown(winner, hands, damage, health)
}

/// Fold: the folder takes the small-blind penalty, never the pot.
pub fn resolve_fold(folder: Side, health: PerSide<Hp>, blinds: &BlindConfig) -> CombatResolution {
    let mut damage = PerSide::splat(0.0);
    damage[folder] = blinds.small_blind;
    let resolution = CombatResolution {
        winner: Winner::Side(folder.opponent()),
        termination: Termination::Fold,
        hands: PerSide::new(None, None),
        damage,
        final_health: apply_damage(health, damage),
        folded: Some(folder),
    };
    tracing::debug!(%folder, penalty = blinds.small_blind, "combat resolved by fold");
    resolution
}

pub fn is_hero_dead(health: Hp) -> bool {
    health <= 0.0
}

/// `None` while both sides stand; a draw if both fell together.
pub fn get_winner_from_health(health: PerSide<Hp>) -> Option<Winner> {
    match (is_hero_dead(health.player), is_hero_dead(health.opponent)) {
        (true, true) => Some(Winner::Draw),
        (true, false) => Some(Winner::Side(Side::Opponent)),
        (false, true) => Some(Winner::Side(Side::Player)),
        (false, false) => None,
    }
}

/// Opening blow. Never lethal: the target keeps at least 1 health.
pub fn apply_first_strike(health: Hp, damage: Hp) -> Hp {
    (health - damage).max(1.0)
}

fn damage_to_loser(winner: Winner, amount: Hp) -> PerSide<Hp> {
    let mut damage = PerSide::splat(0.0);
    if let Winner::Side(side) = winner {
        damage[side.opponent()] = amount;
    }
    damage
}

fn apply_damage(health: PerSide<Hp>, damage: PerSide<Hp>) -> PerSide<Hp> {
    health.map(|side, hp| (hp - damage[side]).max(0.0))
}

fn finish_showdown(
    winner: Winner,
    hands: PerSide<EvaluatedHand>,
    damage: PerSide<Hp>,
    health: PerSide<Hp>,
) -> CombatResolution {
    tracing::debug!(
        ?winner,
        player_hand = ?hands.player.rank,
        opponent_hand = ?hands.opponent.rank,
        player_damage = damage.player,
        opponent_damage = damage.opponent,
        "combat resolved at showdown"
    );
    CombatResolution {
        winner,
        termination: Termination::Showdown,
        hands: hands.map(|_, hand| Some(hand)),
        damage,
        final_health: apply_damage(health, damage),
        folded: None,
    }
}
