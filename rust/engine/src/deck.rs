use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::CombatError;

/// Reproducible 52-card deck for hosts that let the engine deal.
/// The same seed always produces the same sequence of shuffles.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        self.position = 0;
    }

    pub fn deal_card(&mut self) -> Option<Card> {
        let c = self.cards.get(self.position).copied()?;
        self.position += 1;
        Some(c)
    }

    pub fn deal_hole_cards(&mut self) -> Result<[Card; 2], CombatError> {
        let cards = self.deal_community(2)?;
        Ok([cards[0], cards[1]])
    }

    /// Deals `n` cards, or none at all if fewer than `n` remain.
    pub fn deal_community(&mut self, n: usize) -> Result<Vec<Card>, CombatError> {
        let remaining = self.remaining();
        if remaining < n {
            return Err(CombatError::DeckExhausted {
                needed: n,
                remaining,
            });
        }
        let dealt = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(dealt)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
