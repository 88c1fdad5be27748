use poker_combat::betting::{initialize_betting_state, process_betting_action, CombatAction};
use poker_combat::config::BlindConfig;
use poker_combat::logging::TestLogSubscriber;
use poker_combat::player::Side;
use tracing::Level;

#[test]
fn rejected_action_is_logged_with_its_reason() {
    let subscriber = TestLogSubscriber::new();
    let state = initialize_betting_state(BlindConfig::default(), Side::Player);

    let result = subscriber.capture(|| {
        process_betting_action(&state, Side::Player, CombatAction::Defend, 94.5)
    });
    assert!(result.is_rejected());

    let entries = subscriber.entries();
    let rejected = entries
        .iter()
        .find(|e| e.message.contains("betting action rejected"))
        .expect("rejection event");
    assert_eq!(rejected.level, Level::DEBUG);
    assert_eq!(rejected.field("side"), Some("player"));
    assert_eq!(rejected.field("reason"), Some("cannot defend while 5 is owed"));
}

#[test]
fn accepted_action_reports_the_new_pot() {
    let subscriber = TestLogSubscriber::new();
    let state = initialize_betting_state(BlindConfig::default(), Side::Player);

    subscriber.capture(|| process_betting_action(&state, Side::Player, CombatAction::Engage, 94.5));

    let entries = subscriber.entries();
    let applied = entries
        .iter()
        .find(|e| e.message.contains("betting action applied"))
        .expect("applied event");
    assert_eq!(applied.field("pot"), Some("21.0"));
    assert_eq!(applied.field("complete"), Some("true"));
    assert!(applied.target.starts_with("poker_combat"));
}

#[test]
fn logging_does_not_change_results() {
    let subscriber = TestLogSubscriber::new();
    let state = initialize_betting_state(BlindConfig::default(), Side::Opponent);
    let action = CombatAction::CounterAttack(None);

    let quiet = process_betting_action(&state, Side::Opponent, action, 94.5);
    let logged = subscriber.capture(|| process_betting_action(&state, Side::Opponent, action, 94.5));
    assert_eq!(quiet, logged);
    assert!(!subscriber.entries().is_empty());
}

#[test]
fn init_logging_installs_once() {
    let first = poker_combat::logging::init_logging();
    assert_eq!(poker_combat::logging::init_logging(), first);
}
