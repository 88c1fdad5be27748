use poker_combat::betting::{BettingRound, CombatAction};
use poker_combat::config::CombatConfig;
use poker_combat::engine::{CombatTable, TableSetup};
use poker_combat::player::{PerSide, Side};
use poker_combat::record::{format_combat_id, CombatLog, CombatRecord};
use poker_combat::resolution::Termination;

fn finished_table() -> CombatTable {
    let setup = TableSetup {
        small_blind: Side::Player,
        health: PerSide::splat(100.0),
        first_strike: None,
        skip_mulligan: true,
    };
    CombatTable::deal(CombatConfig::default(), setup, 11)
        .expect("deal")
        .act(Side::Player, CombatAction::Engage)
        .expect("call")
        .act(Side::Player, CombatAction::Attack(None))
        .expect("bet")
        .act(Side::Opponent, CombatAction::Brace)
        .expect("fold")
}

#[test]
fn json_line_ends_with_lf_only() {
    let record = finished_table().to_record(format_combat_id("20250102", 1));
    let line = record.to_json_line().expect("encode");
    assert!(line.ends_with('\n'));
    assert!(!line.contains('\r'));
    assert_eq!(line.matches('\n').count(), 1);
}

#[test]
fn record_captures_actions_and_outcome() {
    let record = finished_table().to_record("20250102-000002".to_string());
    assert_eq!(record.seed, Some(11));
    assert_eq!(record.actions.len(), 3);
    assert_eq!(record.actions[0].round, BettingRound::Preflop);
    assert_eq!(record.actions[1].round, BettingRound::Flop);
    assert_eq!(record.actions[2].action, CombatAction::Brace);
    assert_eq!(record.community.len(), 5);
    let resolution = record.resolution.as_ref().expect("resolution");
    assert_eq!(resolution.termination, Termination::Fold);
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let mut record = CombatRecord::new("20250102-000010".to_string());
    let line = record.to_json_line().expect("encode");
    let parsed = CombatRecord::from_json_line(&line).expect("decode");
    assert!(parsed.ts.is_some());
    assert!(record.ts.is_none());

    record.ts = Some("2025-01-02T03:04:05Z".to_string());
    let line = record.to_json_line().expect("encode");
    let parsed = CombatRecord::from_json_line(&line).expect("decode");
    assert_eq!(parsed.ts.as_deref(), Some("2025-01-02T03:04:05Z"));
}

#[test]
fn decoded_record_matches_the_encoded_one() {
    let record = finished_table().to_record("20250102-000003".to_string());
    let line = record.to_json_line().expect("encode");
    let mut parsed = CombatRecord::from_json_line(&line).expect("decode");
    parsed.ts = None;
    assert_eq!(parsed, record);
}

#[test]
fn combat_ids_are_sequential() {
    let mut log = CombatLog::new("20250102");
    assert_eq!(log.next_id(), "20250102-000001");
    assert_eq!(log.next_id(), "20250102-000002");
}
