//! Night resolution tests.
//!
//! These tests drive a scripted eight-player table through the engine and
//! verify the interactions between night abilities:
//! - Protection stops elimination and nothing else
//! - Several eliminators resolve independently and one target dies once
//! - Blocking voids the blocked player's action for the night
//! - Hacks falsify exactly one investigation and expire at dawn
//! - Watching reports whom the watched player targeted
//! - Resolution order depends only on roles and seats

use saboteur_engine::core::{ActorRejection, TargetRejection};
use saboteur_engine::night::NightStage;
use saboteur_engine::{
    Ballot, EngineError, GamePhase, NightAction, NightOutcome, NightResult, Note, PlayerId,
    RoleId, RulesConfig, RulesEngine,
};

const SABOTEUR: PlayerId = PlayerId::new(0);
const HACKER: PlayerId = PlayerId::new(1);
const MEDIC: PlayerId = PlayerId::new(2);
const INVESTIGATOR: PlayerId = PlayerId::new(3);
const PROFESSOR: PlayerId = PlayerId::new(4);
const INNOVATOR: PlayerId = PlayerId::new(5);
const SECURITY: PlayerId = PlayerId::new(6);
const STUDENT: PlayerId = PlayerId::new(7);

fn table() -> RulesEngine {
    let names = ["Sam", "Hal", "Mia", "Ivy", "Pat", "Nia", "Sid", "Stu"];
    let roles = [
        RoleId::SABOTEUR,
        RoleId::HACKER,
        RoleId::MEDIC,
        RoleId::INVESTIGATOR,
        RoleId::PROFESSOR,
        RoleId::INNOVATOR,
        RoleId::SECURITY,
        RoleId::STUDENT,
    ];
    let mut engine = RulesEngine::with_seed(RulesConfig::default(), 17).unwrap();
    engine.assign_roles_in_order(&names, &roles).unwrap();
    engine
}

/// Submit the given actions, skip for everyone else still pending, resolve.
fn run_night(engine: &mut RulesEngine, actions: &[(PlayerId, NightAction)]) -> Vec<NightResult> {
    for (actor, action) in actions {
        engine.submit_night_action(*actor, action.clone()).unwrap();
    }
    let pending = engine.night().unwrap().pending().to_vec();
    for actor in pending {
        engine.submit_night_action(actor, NightAction::Skip).unwrap();
    }
    engine.resolve_night().unwrap()
}

/// Everyone abstains; the next night opens.
fn quiet_day(engine: &mut RulesEngine) {
    let voters: Vec<_> = engine.roster_view().living().map(|s| s.id).collect();
    for voter in voters {
        engine.submit_vote(voter, Ballot::Abstain).unwrap();
    }
    engine.resolve_day().unwrap();
    assert_eq!(engine.phase(), GamePhase::Night);
}

fn outcome_of(results: &[NightResult], actor: PlayerId) -> &NightOutcome {
    &results
        .iter()
        .find(|r| r.actor == actor)
        .expect("actor should have a result")
        .outcome
}

// =============================================================================
// Protection
// =============================================================================

/// Protecting the target stops the elimination but not an investigation.
#[test]
fn test_protection_only_stops_elimination() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (SABOTEUR, NightAction::Eliminate { target: STUDENT }),
        (MEDIC, NightAction::Protect { target: STUDENT }),
        (INVESTIGATOR, NightAction::Investigate { target: STUDENT }),
    ]);

    assert_eq!(
        outcome_of(&results, SABOTEUR),
        &NightOutcome::EliminationPrevented { target: STUDENT }
    );
    assert_eq!(
        outcome_of(&results, INVESTIGATOR),
        &NightOutcome::Investigated { target: STUDENT, suspicious: false }
    );
    assert!(engine.session().roster().is_alive(STUDENT));
    assert_eq!(engine.session().last_night_elimination(), None);
}

/// Protecting a blocked, watched saboteur changes neither the block nor
/// the watch report.
#[test]
fn test_protection_ignores_block_and_watch() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (MEDIC, NightAction::Protect { target: SABOTEUR }),
        (SECURITY, NightAction::Block { target: SABOTEUR }),
        (INVESTIGATOR, NightAction::Watch { target: MEDIC }),
        (SABOTEUR, NightAction::Eliminate { target: STUDENT }),
    ]);

    assert_eq!(outcome_of(&results, SECURITY), &NightOutcome::Blocked { target: SABOTEUR });
    assert_eq!(outcome_of(&results, SABOTEUR), &NightOutcome::ActionBlocked);
    assert_eq!(
        outcome_of(&results, INVESTIGATOR),
        &NightOutcome::Watched { target: MEDIC, visited: Some(SABOTEUR) }
    );
    assert!(engine.session().roster().is_alive(STUDENT));
}

/// Protection lasts one night only.
#[test]
fn test_protection_expires() {
    let mut engine = table();
    run_night(&mut engine, &[(MEDIC, NightAction::Protect { target: STUDENT })]);
    quiet_day(&mut engine);

    let results = run_night(&mut engine, &[(SABOTEUR, NightAction::Eliminate { target: STUDENT })]);
    assert_eq!(
        outcome_of(&results, SABOTEUR),
        &NightOutcome::Eliminated { target: STUDENT }
    );
    assert!(!engine.session().roster().is_alive(STUDENT));
    assert_eq!(engine.session().last_night_elimination(), Some(STUDENT));
}

// =============================================================================
// Blocking
// =============================================================================

/// A blocked saboteur eliminates nobody.
#[test]
fn test_block_voids_elimination() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (SECURITY, NightAction::Block { target: SABOTEUR }),
        (SABOTEUR, NightAction::Eliminate { target: STUDENT }),
    ]);

    assert_eq!(outcome_of(&results, SECURITY), &NightOutcome::Blocked { target: SABOTEUR });
    assert_eq!(outcome_of(&results, SABOTEUR), &NightOutcome::ActionBlocked);
    assert!(engine.session().roster().is_alive(STUDENT));
}

/// Blocking the medic resolves first, so the protection never lands.
#[test]
fn test_block_voids_protection() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (SECURITY, NightAction::Block { target: MEDIC }),
        (MEDIC, NightAction::Protect { target: STUDENT }),
        (SABOTEUR, NightAction::Eliminate { target: STUDENT }),
    ]);

    assert_eq!(outcome_of(&results, MEDIC), &NightOutcome::ActionBlocked);
    assert_eq!(outcome_of(&results, SABOTEUR), &NightOutcome::Eliminated { target: STUDENT });
    assert!(!engine.session().roster().is_alive(STUDENT));
}

/// A blocked investigator keeps the charge and learns nothing.
#[test]
fn test_blocked_action_spends_nothing() {
    let mut engine = table();
    run_night(&mut engine, &[
        (SECURITY, NightAction::Block { target: INVESTIGATOR }),
        (INVESTIGATOR, NightAction::Investigate { target: SABOTEUR }),
    ]);

    let investigator = &engine.session().roster()[INVESTIGATOR];
    assert_eq!(investigator.charges, Some(3));
    assert!(investigator.notes.is_empty());
    assert!(!investigator.blocked);
}

// =============================================================================
// Hacking
// =============================================================================

/// A hack frames an innocent for one night, then results revert.
#[test]
fn test_hack_frames_for_one_night() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (HACKER, NightAction::Hack { target: STUDENT, suspicious: true }),
        (INVESTIGATOR, NightAction::Investigate { target: STUDENT }),
    ]);
    assert_eq!(
        outcome_of(&results, INVESTIGATOR),
        &NightOutcome::Investigated { target: STUDENT, suspicious: true }
    );
    assert!(engine.session().hacked_targets().is_empty());

    quiet_day(&mut engine);
    let results = run_night(&mut engine, &[(INVESTIGATOR, NightAction::Investigate { target: STUDENT })]);
    assert_eq!(
        outcome_of(&results, INVESTIGATOR),
        &NightOutcome::Investigated { target: STUDENT, suspicious: false }
    );

    let notes = &engine.session().roster()[INVESTIGATOR].notes;
    assert_eq!(
        notes,
        &vec![
            Note::Investigation { round: 1, target: STUDENT, suspicious: true },
            Note::Investigation { round: 2, target: STUDENT, suspicious: false },
        ]
    );
}

/// A hack can also clear an evil player.
#[test]
fn test_hack_clears_saboteur() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (HACKER, NightAction::Hack { target: SABOTEUR, suspicious: false }),
        (INVESTIGATOR, NightAction::Investigate { target: SABOTEUR }),
    ]);
    assert_eq!(
        outcome_of(&results, INVESTIGATOR),
        &NightOutcome::Investigated { target: SABOTEUR, suspicious: false }
    );
}

/// Without a hack, investigation reads the real team.
#[test]
fn test_investigation_reads_real_team() {
    let mut engine = table();
    let results = run_night(&mut engine, &[(INVESTIGATOR, NightAction::Investigate { target: HACKER })]);
    assert_eq!(
        outcome_of(&results, INVESTIGATOR),
        &NightOutcome::Investigated { target: HACKER, suspicious: true }
    );
}

// =============================================================================
// Watching
// =============================================================================

/// Watching the saboteur reveals whom they visited.
#[test]
fn test_watch_reports_visit() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (SECURITY, NightAction::Watch { target: SABOTEUR }),
        (SABOTEUR, NightAction::Eliminate { target: PROFESSOR }),
    ]);

    assert_eq!(
        outcome_of(&results, SECURITY),
        &NightOutcome::Watched { target: SABOTEUR, visited: Some(PROFESSOR) }
    );
    assert_eq!(
        engine.session().roster()[SECURITY].notes,
        vec![Note::Watch { round: 1, target: SABOTEUR, visited: Some(PROFESSOR) }]
    );
}

/// Watching someone who stayed home reports no visit.
#[test]
fn test_watch_idle_player() {
    let mut engine = table();
    let results = run_night(&mut engine, &[(INVESTIGATOR, NightAction::Watch { target: STUDENT })]);

    assert_eq!(
        outcome_of(&results, INVESTIGATOR),
        &NightOutcome::Watched { target: STUDENT, visited: None }
    );
    // Watching draws on the shared charge pool
    assert_eq!(engine.session().roster()[INVESTIGATOR].charges, Some(2));
}

// =============================================================================
// Ordering
// =============================================================================

/// Results come back in (priority, seat) order regardless of submission order.
#[test]
fn test_resolution_order() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (INVESTIGATOR, NightAction::Investigate { target: HACKER }),
        (SABOTEUR, NightAction::Eliminate { target: STUDENT }),
        (SECURITY, NightAction::Watch { target: SABOTEUR }),
    ]);

    let order: Vec<_> = results.iter().map(|r| r.actor).collect();
    assert_eq!(
        order,
        vec![SECURITY, MEDIC, HACKER, SABOTEUR, INVESTIGATOR, INNOVATOR, PROFESSOR, STUDENT]
    );
}

/// Identical submissions in a different order produce identical results.
#[test]
fn test_resolution_is_deterministic() {
    let actions = [
        (SABOTEUR, NightAction::Eliminate { target: INNOVATOR }),
        (MEDIC, NightAction::Protect { target: MEDIC }),
        (HACKER, NightAction::Hack { target: MEDIC, suspicious: true }),
        (INVESTIGATOR, NightAction::Investigate { target: MEDIC }),
        (SECURITY, NightAction::Watch { target: HACKER }),
        (INNOVATOR, NightAction::Invent { invention: "Jammer".into() }),
    ];
    let mut reversed = actions.clone();
    reversed.reverse();

    let mut first = table();
    let mut second = table();
    let a = run_night(&mut first, &actions);
    let b = run_night(&mut second, &reversed);

    assert_eq!(a, b);
    assert_eq!(
        first.session().roster()[INNOVATOR].alive,
        second.session().roster()[INNOVATOR].alive
    );
}

// =============================================================================
// Resources and contract
// =============================================================================

/// The investigator runs out after three uses and then sits nights out.
#[test]
fn test_investigator_charges_run_out() {
    let mut engine = table();
    for _ in 0..3 {
        run_night(&mut engine, &[(INVESTIGATOR, NightAction::Investigate { target: STUDENT })]);
        quiet_day(&mut engine);
    }

    assert_eq!(engine.session().roster()[INVESTIGATOR].charges, Some(0));
    assert_eq!(
        engine.submit_night_action(INVESTIGATOR, NightAction::Investigate { target: STUDENT }),
        Err(EngineError::InvalidActor { actor: INVESTIGATOR, reason: ActorRejection::OutOfCharges })
    );
    assert!(engine
        .legal_night_targets(INVESTIGATOR, saboteur_engine::Ability::Investigate)
        .is_empty());
    assert!(!engine.night().unwrap().pending().contains(&INVESTIGATOR));
    assert_eq!(
        engine.submit_night_action(INVESTIGATOR, NightAction::Skip),
        Err(EngineError::InvalidActor { actor: INVESTIGATOR, reason: ActorRejection::OutOfCharges })
    );
    let skipped = run_night(&mut engine, &[]);
    assert_eq!(outcome_of(&skipped, INVESTIGATOR), &NightOutcome::Skipped);
}

/// The medic can protect themselves once per game.
#[test]
fn test_medic_self_protect_once() {
    let mut engine = table();
    let results = run_night(&mut engine, &[
        (MEDIC, NightAction::Protect { target: MEDIC }),
        (SABOTEUR, NightAction::Eliminate { target: MEDIC }),
    ]);
    assert_eq!(
        outcome_of(&results, SABOTEUR),
        &NightOutcome::EliminationPrevented { target: MEDIC }
    );
    quiet_day(&mut engine);

    assert_eq!(
        engine.submit_night_action(MEDIC, NightAction::Protect { target: MEDIC }),
        Err(EngineError::InvalidTarget { target: MEDIC, reason: TargetRejection::SelfProtectExhausted })
    );
    assert!(!engine
        .legal_night_targets(MEDIC, saboteur_engine::Ability::Protect)
        .contains(&MEDIC));
}

/// Dead players can neither act nor be targeted.
#[test]
fn test_dead_players_excluded() {
    let mut engine = table();
    run_night(&mut engine, &[(SABOTEUR, NightAction::Eliminate { target: INVESTIGATOR })]);
    quiet_day(&mut engine);

    assert!(!engine.night().unwrap().pending().contains(&INVESTIGATOR));
    assert_eq!(
        engine.submit_night_action(INVESTIGATOR, NightAction::Skip),
        Err(EngineError::InvalidActor { actor: INVESTIGATOR, reason: ActorRejection::Dead })
    );
    assert_eq!(
        engine.submit_night_action(SECURITY, NightAction::Watch { target: INVESTIGATOR }),
        Err(EngineError::InvalidTarget { target: INVESTIGATOR, reason: TargetRejection::Dead })
    );
}

/// Resolving before everyone has acted is refused and changes nothing.
#[test]
fn test_resolve_waits_for_everyone() {
    let mut engine = table();
    engine
        .submit_night_action(SABOTEUR, NightAction::Eliminate { target: STUDENT })
        .unwrap();

    assert_eq!(engine.resolve_night(), Err(EngineError::ActionsPending { pending: 5 }));
    assert_eq!(engine.phase(), GamePhase::Night);
    assert_eq!(engine.night().unwrap().stage(), NightStage::Collecting);
    assert!(engine.session().roster().is_alive(STUDENT));
}

/// Inventions persist across nights.
#[test]
fn test_inventions_persist() {
    let mut engine = table();
    run_night(&mut engine, &[(INNOVATOR, NightAction::Invent { invention: "Drone".into() })]);
    quiet_day(&mut engine);
    run_night(&mut engine, &[(INNOVATOR, NightAction::Invent { invention: "Scanner".into() })]);

    let inventions = engine.session().inventions();
    assert_eq!(inventions.len(), 2);
    assert_eq!(inventions[0].name, "Drone");
    assert_eq!(inventions[0].creator, INNOVATOR);
    assert_eq!(inventions[1].round, 2);
}

// =============================================================================
// Multiple eliminators
// =============================================================================

/// Eight seats with two saboteurs: 0 and 1 Saboteur, 2 Medic,
/// 3 Investigator, 4 Professor, 5-7 Students.
fn two_saboteur_table() -> RulesEngine {
    let names = ["Sam", "Sal", "Mia", "Ivy", "Pat", "Stu", "Sue", "Sol"];
    let roles = [
        RoleId::SABOTEUR,
        RoleId::SABOTEUR,
        RoleId::MEDIC,
        RoleId::INVESTIGATOR,
        RoleId::PROFESSOR,
        RoleId::STUDENT,
        RoleId::STUDENT,
        RoleId::STUDENT,
    ];
    let mut engine = RulesEngine::with_seed(RulesConfig::default(), 5).unwrap();
    engine.assign_roles_in_order(&names, &roles).unwrap();
    engine
}

/// Two eliminators on one target: the first kills, the second is reported
/// as a repeat, and one death is recorded.
#[test]
fn test_shared_target_dies_once() {
    let mut engine = two_saboteur_table();
    let first = PlayerId::new(0);
    let second = PlayerId::new(1);
    let target = PlayerId::new(5);

    let results = run_night(&mut engine, &[
        (first, NightAction::Eliminate { target }),
        (second, NightAction::Eliminate { target }),
    ]);

    assert_eq!(outcome_of(&results, first), &NightOutcome::Eliminated { target });
    assert_eq!(outcome_of(&results, second), &NightOutcome::AlreadyEliminated { target });
    let eliminated: Vec<_> = results.iter().filter_map(NightResult::eliminated).collect();
    assert_eq!(eliminated, vec![target]);
    assert_eq!(engine.session().eliminations_in(1).count(), 1);
    assert!(!engine.session().roster().is_alive(target));
}

/// Two eliminators on different targets both succeed.
#[test]
fn test_separate_targets_both_die() {
    let mut engine = two_saboteur_table();
    let first = PlayerId::new(0);
    let second = PlayerId::new(1);

    let results = run_night(&mut engine, &[
        (first, NightAction::Eliminate { target: PlayerId::new(5) }),
        (second, NightAction::Eliminate { target: PlayerId::new(6) }),
    ]);

    let eliminated: Vec<_> = results.iter().filter_map(NightResult::eliminated).collect();
    assert_eq!(eliminated, vec![PlayerId::new(5), PlayerId::new(6)]);
    assert_eq!(engine.session().eliminations_in(1).count(), 2);
    assert_eq!(engine.session().roster().living_count(), 6);
}
