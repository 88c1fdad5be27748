use std::collections::BTreeSet;

use poker_combat::config::BlindConfig;
use poker_combat::player::{Hp, PerSide, Side};
use poker_combat::pot::{award_pots, calculate_side_pots, is_all_in};
use proptest::prelude::*;

#[test]
fn excess_over_an_all_in_becomes_a_side_pot() {
    // X (player) is all-in for 30; Y (opponent) put in 50.
    let pots = calculate_side_pots(
        PerSide::new(30.0, 50.0),
        PerSide::new(0.0, 40.0),
        80.0,
        &BlindConfig::default(),
    );
    assert_eq!(pots.main_pot, 60.0);
    assert_eq!(pots.side_pots.len(), 1);
    assert_eq!(pots.side_pots[0].amount, 20.0);
    assert_eq!(pots.side_pots[0].eligible, BTreeSet::from([Side::Opponent]));
    assert!(pots.is_all_in_showdown());

    let paid = award_pots(&pots, Some(Side::Player));
    assert_eq!(paid, PerSide::new(60.0, 20.0));

    let paid = award_pots(&pots, Some(Side::Opponent));
    assert_eq!(paid, PerSide::new(0.0, 80.0));
}

#[test]
fn opponent_all_in_mirrors_the_split() {
    let pots = calculate_side_pots(
        PerSide::new(45.0, 25.0),
        PerSide::new(55.0, 5.0),
        70.0,
        &BlindConfig::default(),
    );
    assert_eq!(pots.main_pot, 50.0);
    assert_eq!(pots.side_pots[0].eligible, BTreeSet::from([Side::Player]));
    assert_eq!(pots.all_in, BTreeSet::from([Side::Opponent]));
    assert_eq!(award_pots(&pots, Some(Side::Opponent)), PerSide::new(20.0, 50.0));
}

#[test]
fn all_in_threshold_is_the_big_blind() {
    let blinds = BlindConfig {
        small_blind: 10.0,
        big_blind: 20.0,
        ante: 0.0,
    };
    assert!(is_all_in(19.5, &blinds));
    assert!(!is_all_in(20.0, &blinds));
}

fn half_steps(max: u32) -> impl Strategy<Value = Hp> {
    (0..=max * 2).prop_map(|n| n as Hp / 2.0)
}

proptest! {
    #[test]
    fn payouts_conserve_the_pot(
        player in half_steps(200),
        opponent in half_steps(200),
        winner in prop_oneof![
            Just(None),
            Just(Some(Side::Player)),
            Just(Some(Side::Opponent)),
        ],
    ) {
        let committed = PerSide::new(player, opponent);
        let pot = player + opponent;
        let pots = calculate_side_pots(committed, PerSide::splat(0.0), pot, &BlindConfig::default());
        prop_assert_eq!(pots.total(), pot);
        prop_assert!(pots.side_pots.len() <= 1);

        let paid = award_pots(&pots, winner);
        prop_assert_eq!(paid.player + paid.opponent, pot);
        prop_assert!(paid.player >= 0.0 && paid.opponent >= 0.0);
    }

    #[test]
    fn winner_takes_at_most_the_matched_stake(
        player in half_steps(200),
        opponent in half_steps(200),
    ) {
        let committed = PerSide::new(player, opponent);
        let pots = calculate_side_pots(
            committed,
            PerSide::splat(0.0),
            player + opponent,
            &BlindConfig::default(),
        );
        let paid = award_pots(&pots, Some(Side::Player));
        prop_assert!(paid.player <= player + player.min(opponent));
    }
}
