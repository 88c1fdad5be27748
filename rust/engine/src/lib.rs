//! # poker-combat-engine: Heads-up Poker Combat Resolution
//!
//! A deterministic engine that resolves a duel between two sides as a hand of
//! heads-up hold'em played for health instead of chips. Provides hand
//! evaluation, betting state transitions, side pots, phase sequencing and
//! damage resolution as pure functions over plain values.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Five-card evaluation, best-of-n selection and comparison
//! - [`cache`] - Bounded memo for best-hand lookups
//! - [`betting`] - Blinds, minimum bets and the betting state machine
//! - [`pot`] - All-in detection, side pots and payouts
//! - [`phase`] - Combat phase sequence and community card reveals
//! - [`turn`] - Which side acts in each phase
//! - [`resolution`] - Showdown and fold outcomes as damage
//! - [`engine`] - [`engine::CombatTable`], chaining the above for one combat
//! - [`record`] - JSON line hand histories
//! - [`config`] - Blind structure and engine settings from TOML
//! - [`logging`] - Tracing setup and a capturing subscriber for tests
//! - [`errors`] - Error types for configuration and dealing
//!
//! ## Quick Start
//!
//! ```rust
//! use poker_combat::cards::{Card, Rank, Suit};
//! use poker_combat::hand::{find_best_hand, HandRank};
//!
//! let hole = [
//!     Card::new(Rank::Ace, Suit::Hearts),
//!     Card::new(Rank::King, Suit::Hearts),
//! ];
//! let board = [
//!     Card::new(Rank::Queen, Suit::Hearts),
//!     Card::new(Rank::Jack, Suit::Hearts),
//!     Card::new(Rank::Ten, Suit::Hearts),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! let best = find_best_hand(&hole, &board);
//! assert_eq!(best.rank, HandRank::RoyalFlush);
//! assert_eq!(best.multiplier, 2.0);
//! ```
//!
//! ## Betting
//!
//! Illegal actions never panic; they come back with the unchanged state and
//! the reason:
//!
//! ```rust
//! use poker_combat::betting::{initialize_betting_state, process_betting_action, CombatAction};
//! use poker_combat::config::BlindConfig;
//! use poker_combat::player::Side;
//!
//! let state = initialize_betting_state(BlindConfig::default(), Side::Player);
//! assert_eq!(state.pot, 16.0);
//!
//! let result = process_betting_action(&state, Side::Player, CombatAction::Defend, 94.5);
//! assert!(result.is_rejected());
//! assert_eq!(result.new_state, state);
//! ```
//!
//! ## Deterministic Dealing
//!
//! ```rust
//! use poker_combat::deck::Deck;
//!
//! let mut a = Deck::new_with_seed(42);
//! let mut b = Deck::new_with_seed(42);
//! a.shuffle();
//! b.shuffle();
//! assert_eq!(a.deal_card(), b.deal_card());
//! ```

pub mod betting;
pub mod cache;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logging;
pub mod phase;
pub mod player;
pub mod pot;
pub mod record;
pub mod resolution;
pub mod turn;
