use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Health points. Stakes, pots and damage are all measured in health.
///
/// Every amount the engine produces is a multiple of the half-point ante,
/// which `f64` represents exactly, so sums compare with `==`.
pub type Hp = f64;

/// One of the two combatants in a heads-up encounter.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Player, Side::Opponent];

    /// The other combatant.
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => f.write_str("player"),
            Side::Opponent => f.write_str("opponent"),
        }
    }
}

/// A value held once per side, indexable by [`Side`].
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub player: T,
    pub opponent: T,
}

impl<T> PerSide<T> {
    pub const fn new(player: T, opponent: T) -> Self {
        Self { player, opponent }
    }

    pub fn map<U>(self, mut f: impl FnMut(Side, T) -> U) -> PerSide<U> {
        PerSide {
            player: f(Side::Player, self.player),
            opponent: f(Side::Opponent, self.opponent),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Player, &self.player), (Side::Opponent, &self.opponent)].into_iter()
    }
}

impl<T: Clone> PerSide<T> {
    pub fn splat(value: T) -> Self {
        Self {
            player: value.clone(),
            opponent: value,
        }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Player => &self.player,
            Side::Opponent => &self.opponent,
        }
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Player => &mut self.player,
            Side::Opponent => &mut self.opponent,
        }
    }
}

/// Blind position, fixed for the whole match.
/// The small blind acts first before the flop, the big blind acts first after it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    SmallBlind,
    BigBlind,
}

impl Position {
    /// Side that holds this position.
    pub fn holder(self, small_blind: Side) -> Side {
        match self {
            Position::SmallBlind => small_blind,
            Position::BigBlind => small_blind.opponent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_is_an_involution() {
        for side in Side::BOTH {
            assert_ne!(side.opponent(), side);
            assert_eq!(side.opponent().opponent(), side);
        }
    }

    #[test]
    fn per_side_indexing_and_map() {
        let mut stakes = PerSide::new(5.0, 10.0);
        stakes[Side::Opponent] += 2.5;
        assert_eq!(stakes[Side::Player], 5.0);
        assert_eq!(stakes[Side::Opponent], 12.5);
        let doubled = stakes.map(|_, v| v * 2.0);
        assert_eq!(doubled, PerSide::new(10.0, 25.0));
    }

    #[test]
    fn positions_follow_the_small_blind() {
        assert_eq!(Position::SmallBlind.holder(Side::Player), Side::Player);
        assert_eq!(Position::BigBlind.holder(Side::Opponent), Side::Player);
    }
}
