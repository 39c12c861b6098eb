use super::common::*;
use crate::workflows::loot::{
    ItemId, LootEntry, RollCeiling, RollEngine, RollOutcome, RollTally, HIGH_QUALITY_OFFSET,
};
use std::sync::Arc;

fn roll_engine(game: &Arc<FakeGame>) -> RollEngine<FakeGame, FakeGame, FakeGame> {
    RollEngine::new(game.clone(), game.clone(), game.clone())
}

#[test]
fn need_under_greed_ceiling_submits_greed() {
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![entry(10, 0, RollCeiling::UpToGreed)]),
    );
    let mut engine = roll_engine(&game);

    let result = engine.process_one_tick(RollOutcome::Needed, &plain_config());

    assert!(result.processed);
    assert_eq!(game.submissions(), vec![(RollOutcome::Greeded, 0)]);
    assert_eq!(result.tally.greed, 1);
}

#[test]
fn repeated_slot_is_demoted_to_pass_and_need_is_reversed() {
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![entry(10, 3, RollCeiling::UpToNeed)])
            .dropping_submissions(),
    );
    let mut engine = roll_engine(&game);
    let config = plain_config();

    let first = engine.process_one_tick(RollOutcome::Needed, &config);
    assert_eq!(first.tally.need, 1);

    let second = engine.process_one_tick(RollOutcome::Needed, &config);
    let submission = second.submitted.expect("second attempt submits");
    assert!(submission.emergency_pass);
    assert_eq!(submission.outcome, RollOutcome::Passed);
    assert_eq!(
        second.tally,
        RollTally {
            need: 0,
            greed: 0,
            pass: 1
        }
    );
    assert_eq!(
        game.submissions(),
        vec![(RollOutcome::Needed, 3), (RollOutcome::Passed, 3)]
    );
}

#[test]
fn retry_guard_opt_out_resubmits_the_same_roll() {
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![entry(10, 3, RollCeiling::UpToNeed)])
            .dropping_submissions(),
    );
    let mut engine = roll_engine(&game);
    let mut config = plain_config();
    config.never_emergency_pass = true;

    engine.process_one_tick(RollOutcome::Needed, &config);
    let second = engine.process_one_tick(RollOutcome::Needed, &config);

    assert_eq!(second.tally.need, 2);
    assert_eq!(
        game.submissions(),
        vec![(RollOutcome::Needed, 3), (RollOutcome::Needed, 3)]
    );
}

#[test]
fn empty_window_is_a_no_op() {
    let game = Arc::new(FakeGame::new());
    let mut engine = roll_engine(&game);

    for _ in 0..3 {
        let result = engine.process_one_tick(RollOutcome::Needed, &plain_config());
        assert!(!result.processed);
        assert!(result.submitted.is_none());
    }
    assert!(game.submissions().is_empty());
    assert!(engine.last_attempt().is_none());
}

#[test]
fn entries_are_processed_in_window_order_one_per_call() {
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_item(material(20, "Twine"))
            .with_window(vec![
                entry(10, 0, RollCeiling::UpToNeed),
                entry(20, 1, RollCeiling::UpToGreed),
            ]),
    );
    let mut engine = roll_engine(&game);
    let config = plain_config();

    assert!(engine.process_one_tick(RollOutcome::Needed, &config).processed);
    assert!(engine.process_one_tick(RollOutcome::Needed, &config).processed);
    assert!(!engine.process_one_tick(RollOutcome::Needed, &config).processed);

    assert_eq!(
        game.submissions(),
        vec![(RollOutcome::Needed, 0), (RollOutcome::Greeded, 1)]
    );
    let tally = engine.take_tally();
    assert_eq!(tally.to_string(), "Need 1 item, greed 1 item, pass 0 items.");
    assert_eq!(engine.tally(), RollTally::default());
}

#[test]
fn high_quality_ids_resolve_to_the_base_item() {
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![entry(
                10 + HIGH_QUALITY_OFFSET,
                0,
                RollCeiling::UpToNeed,
            )]),
    );
    let mut engine = roll_engine(&game);

    let result = engine.process_one_tick(RollOutcome::Needed, &plain_config());

    let submission = result.submitted.expect("entry submitted");
    assert_eq!(submission.item_id, ItemId(10));
    assert_eq!(submission.outcome, RollOutcome::Needed);
}

#[test]
fn unresolvable_entry_is_passed() {
    let game = Arc::new(FakeGame::new().with_window(vec![entry(77, 0, RollCeiling::UpToNeed)]));
    let mut engine = roll_engine(&game);

    engine.process_one_tick(RollOutcome::Needed, &plain_config());

    assert_eq!(game.submissions(), vec![(RollOutcome::Passed, 0)]);
}

fn weekly_entry(id: u32, slot: u32) -> LootEntry {
    let mut entry = entry(id, slot, RollCeiling::UpToNeed);
    entry.weekly_restricted = true;
    entry
}

#[test]
fn weekly_locked_entries_are_skipped_when_opted_in() {
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_item(material(20, "Twine"))
            .with_window(vec![weekly_entry(10, 0), entry(20, 1, RollCeiling::UpToNeed)]),
    );
    let mut engine = roll_engine(&game);
    let mut config = plain_config();
    config.restrictions.weekly_lockout = true;

    engine.process_one_tick(RollOutcome::Needed, &config);
    let result = engine.process_one_tick(RollOutcome::Needed, &config);

    assert!(!result.processed);
    assert_eq!(game.submissions(), vec![(RollOutcome::Needed, 1)]);
}

#[test]
fn item_rule_exempts_entry_from_weekly_filter() {
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![weekly_entry(10, 0)]),
    );
    let mut engine = roll_engine(&game);
    let mut config = plain_config();
    config.restrictions.weekly_lockout = true;
    config.rules.push(item_rule(10, RollOutcome::Greeded));

    engine.process_one_tick(RollOutcome::Needed, &config);

    assert_eq!(game.submissions(), vec![(RollOutcome::Greeded, 0)]);
}

#[test]
fn weekly_filter_ignores_capped_entries_and_unlockables_mode() {
    let mut capped = weekly_entry(10, 0);
    capped.weekly_cap_reached = true;
    capped.ceiling = RollCeiling::UpToPass;
    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![capped]),
    );
    let mut engine = roll_engine(&game);
    let mut config = plain_config();
    config.restrictions.weekly_lockout = true;

    engine.process_one_tick(RollOutcome::Needed, &config);
    assert_eq!(game.submissions(), vec![(RollOutcome::Passed, 0)]);

    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![weekly_entry(10, 0)]),
    );
    let mut engine = roll_engine(&game);
    config.restrictions.unlockables_only = true;

    assert!(engine.process_one_tick(RollOutcome::Needed, &config).processed);
}

#[test]
fn decided_and_unavailable_entries_are_skipped() {
    let mut decided = entry(10, 0, RollCeiling::UpToNeed);
    decided.already_decided = true;
    let mut missing_chest = entry(10, 1, RollCeiling::UpToNeed);
    missing_chest.available = false;
    let empty = entry(0, 2, RollCeiling::UpToNeed);

    let game = Arc::new(
        FakeGame::new()
            .with_item(gear(10, "Augmented Coat", 610))
            .with_window(vec![decided, missing_chest, empty]),
    );
    let mut engine = roll_engine(&game);

    assert!(!engine.process_one_tick(RollOutcome::Needed, &plain_config()).processed);
    assert!(game.submissions().is_empty());
}
