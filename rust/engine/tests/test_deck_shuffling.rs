use std::collections::HashSet;

use poker_combat::deck::Deck;

#[test]
fn different_seeds_differ() {
    let mut a = Deck::new_with_seed(1);
    let mut b = Deck::new_with_seed(2);
    a.shuffle();
    b.shuffle();
    let da = a.deal_community(10).expect("deal");
    let db = b.deal_community(10).expect("deal");
    assert_ne!(da, db);
}

#[test]
fn a_combat_deal_uses_nine_distinct_cards() {
    let mut deck = Deck::new_with_seed(99);
    deck.shuffle();
    let mut seen = HashSet::new();
    seen.extend(deck.deal_hole_cards().expect("hole"));
    seen.extend(deck.deal_hole_cards().expect("hole"));
    seen.extend(deck.deal_community(5).expect("board"));
    assert_eq!(seen.len(), 9);
    assert_eq!(deck.remaining(), 43);
}

#[test]
fn reshuffle_restores_a_full_deck() {
    let mut deck = Deck::new_with_seed(3);
    deck.shuffle();
    deck.deal_community(20).expect("deal");
    deck.shuffle();
    assert_eq!(deck.remaining(), 52);
}
