use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Hand tiers, weakest first. The discriminant is the tier number 1..=10.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum HandRank {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    /// Ace-high straight flush.
    RoyalFlush = 10,
}

impl HandRank {
    pub const ALL: [HandRank; 10] = [
        HandRank::HighCard,
        HandRank::OnePair,
        HandRank::TwoPair,
        HandRank::ThreeOfAKind,
        HandRank::Straight,
        HandRank::Flush,
        HandRank::FullHouse,
        HandRank::FourOfAKind,
        HandRank::StraightFlush,
        HandRank::RoyalFlush,
    ];

    pub fn tier(self) -> u8 {
        self as u8
    }

    /// Fixed damage multiplier used for non-pot-based scaling.
    pub fn multiplier(self) -> f64 {
        match self {
            HandRank::HighCard => 1.0,
            HandRank::OnePair => 1.05,
            HandRank::TwoPair => 1.1,
            HandRank::ThreeOfAKind => 1.15,
            HandRank::Straight => 1.2,
            HandRank::Flush => 1.3,
            HandRank::FullHouse => 1.4,
            HandRank::FourOfAKind => 1.6,
            HandRank::StraightFlush => 1.8,
            HandRank::RoyalFlush => 2.0,
        }
    }

    /// Themed name shown in combat. High card has none.
    pub fn display_name(self) -> &'static str {
        match self {
            HandRank::HighCard => "",
            HandRank::OnePair => "Rune Mark",
            HandRank::TwoPair => "Dual Runes",
            HandRank::ThreeOfAKind => "Thor's Hammer",
            HandRank::Straight => "Fate's Path",
            HandRank::Flush => "Odin's Eye",
            HandRank::FullHouse => "Valhalla's Blessing",
            HandRank::FourOfAKind => "Godly Power",
            HandRank::StraightFlush => "Divine Alignment",
            HandRank::RoyalFlush => "RAGNAROK",
        }
    }

    pub fn traditional_name(self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        }
    }

    /// "Themed (Traditional)", or just the traditional name when there is no themed one.
    pub fn combined_name(self) -> String {
        let themed = self.display_name();
        let traditional = self.traditional_name();
        if themed.is_empty() || themed == traditional {
            traditional.to_string()
        } else {
            format!("{themed} ({traditional})")
        }
    }

    // Straights carry no kickers; they compare on the effective high card alone.
    fn is_straight_family(self) -> bool {
        matches!(self, HandRank::Straight | HandRank::StraightFlush)
    }
}

/// Result of evaluating a hand. Produced fresh by every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedHand {
    pub rank: HandRank,
    /// Cards grouped by multiplicity (largest group first), then by value descending.
    pub cards: Vec<Card>,
    /// Highest card for comparison purposes; the wheel reports its Five.
    /// `None` only for a placeholder built from no cards at all.
    pub high_card: Option<Card>,
    pub multiplier: f64,
    pub display_name: String,
}

impl EvaluatedHand {
    /// Numeric value of [`Self::high_card`], 0 when there is none.
    pub fn effective_high(&self) -> u8 {
        self.high_card.map(|c| c.value()).unwrap_or(0)
    }

    // Interim ranking for fewer than five cards. Never used to resolve combat.
    fn placeholder(mut cards: Vec<Card>) -> Self {
        cards.sort_by(|a, b| b.rank.cmp(&a.rank));
        Self {
            rank: HandRank::HighCard,
            high_card: cards.first().copied(),
            cards,
            multiplier: HandRank::HighCard.multiplier(),
            display_name: HandRank::HighCard.display_name().to_string(),
        }
    }
}

/// Evaluates exactly five cards.
pub fn evaluate_five_card_hand(cards: &[Card; 5]) -> EvaluatedHand {
    let mut sorted = *cards;
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank));
    let values: [u8; 5] = sorted.map(|c| c.value());

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let is_regular_straight = values.windows(2).all(|w| w[0] == w[1] + 1);
    let is_wheel = values == [14, 5, 4, 3, 2];
    let is_straight = is_regular_straight || is_wheel;

    let counts = rank_counts(cards);
    let mut groups: Vec<u8> = counts.iter().copied().filter(|&n| n > 0).collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    let largest = groups[0];
    let second = groups.get(1).copied().unwrap_or(0);

    let rank = if is_flush && is_straight && values[0] == 14 && values[4] == 10 {
        HandRank::RoyalFlush
    } else if is_flush && is_straight {
        HandRank::StraightFlush
    } else if largest == 4 {
        HandRank::FourOfAKind
    } else if largest == 3 && second == 2 {
        HandRank::FullHouse
    } else if is_flush {
        HandRank::Flush
    } else if is_straight {
        HandRank::Straight
    } else if largest == 3 {
        HandRank::ThreeOfAKind
    } else if largest == 2 && second == 2 {
        HandRank::TwoPair
    } else if largest == 2 {
        HandRank::OnePair
    } else {
        HandRank::HighCard
    };

    let high_card = if is_wheel {
        sorted.iter().copied().find(|c| c.rank == Rank::Five)
    } else {
        Some(sorted[0])
    };

    EvaluatedHand {
        rank,
        cards: sort_for_tiebreak(&sorted, &counts),
        high_card,
        multiplier: rank.multiplier(),
        display_name: rank.display_name().to_string(),
    }
}

/// Slice entry point for callers that do not hold a fixed-size array.
///
/// # Panics
///
/// Panics unless `cards` holds exactly five cards. A different count is a
/// bug in the caller, not a game state.
pub fn evaluate_cards(cards: &[Card]) -> EvaluatedHand {
    match <&[Card; 5]>::try_from(cards) {
        Ok(five) => evaluate_five_card_hand(five),
        Err(_) => panic!("expected 5 cards, got {}", cards.len()),
    }
}

/// Best five-card hand from hole and community cards.
///
/// With five or more cards every five-card subset is evaluated and the
/// strongest under [`compare_hands`] is kept (the first one found on ties).
/// With fewer than five cards a high-card placeholder is returned for display.
pub fn find_best_hand(hole: &[Card], community: &[Card]) -> EvaluatedHand {
    let all: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
    if all.len() < 5 {
        return EvaluatedHand::placeholder(all);
    }

    let mut best: Option<EvaluatedHand> = None;
    for subset in five_card_subsets(&all) {
        let candidate = evaluate_five_card_hand(&subset);
        best = match best {
            Some(current) if compare_hands(&candidate, &current) != Ordering::Greater => {
                Some(current)
            }
            _ => Some(candidate),
        };
    }
    // all.len() >= 5 guarantees at least one subset
    let best = best.unwrap_or_else(|| EvaluatedHand::placeholder(all));
    tracing::trace!(rank = ?best.rank, high = best.effective_high(), "best hand selected");
    best
}

/// Total order over evaluated hands: tier first, then the effective high card
/// for straights, otherwise the tie-break ordered cards position by position.
pub fn compare_hands(a: &EvaluatedHand, b: &EvaluatedHand) -> Ordering {
    match a.rank.cmp(&b.rank) {
        Ordering::Equal => {}
        ord => return ord,
    }
    if a.rank.is_straight_family() {
        return a.effective_high().cmp(&b.effective_high());
    }
    a.cards
        .iter()
        .zip(b.cards.iter())
        .map(|(x, y)| x.value().cmp(&y.value()))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn rank_counts(cards: &[Card]) -> [u8; 15] {
    let mut counts = [0u8; 15]; // 2..14 used
    for c in cards {
        counts[c.value() as usize] += 1;
    }
    counts
}

// Pairs and trips lead, so a pair of Queens outranks a pair of Sevens with an Ace kicker.
fn sort_for_tiebreak(sorted_desc: &[Card], counts: &[u8; 15]) -> Vec<Card> {
    let mut cards = sorted_desc.to_vec();
    cards.sort_by(|a, b| {
        let ca = counts[a.value() as usize];
        let cb = counts[b.value() as usize];
        cb.cmp(&ca).then_with(|| b.rank.cmp(&a.rank))
    });
    cards
}

fn five_card_subsets(cards: &[Card]) -> Vec<[Card; 5]> {
    let n = cards.len();
    let mut out = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                for l in k + 1..n {
                    for m in l + 1..n {
                        out.push([cards[i], cards[j], cards[k], cards[l], cards[m]]);
                    }
                }
            }
        }
    }
    out
}
