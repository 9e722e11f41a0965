//! Property tests for scoring and bed invariants.

use chrono::{Duration, Utc};
use medboard_core::config::GameSettings;
use medboard_core::engine::GameEngine;
use medboard_core::models::Hospital;
use proptest::prelude::*;

const TEAMS: [&str; 3] = ["Mercy", "General", "Valley"];

/// One hospital's move in a round: which option to pick and how long to take.
#[derive(Debug, Clone)]
struct Move {
    option: usize,
    delay_secs: i64,
}

fn move_strategy() -> impl Strategy<Value = Move> {
    (0usize..3, 0i64..40).prop_map(|(option, delay_secs)| Move { option, delay_secs })
}

fn rounds_strategy() -> impl Strategy<Value = Vec<Vec<Move>>> {
    prop::collection::vec(prop::collection::vec(move_strategy(), TEAMS.len()), 1..40)
}

fn assert_beds_consistent(hospital: &Hospital) {
    for dept in hospital.departments() {
        assert!(dept.occupied_beds() <= dept.total_beds());
        assert_eq!(dept.available_beds(), dept.total_beds() - dept.occupied_beds());
        assert_eq!(dept.patients().len() as u32, dept.occupied_beds());
    }
}

proptest! {
    #[test]
    fn prop_scoring_and_beds(seed in any::<u64>(), rounds in rounds_strategy()) {
        let settings = GameSettings { max_rounds: 100, ..GameSettings::default() };
        let mut engine = GameEngine::with_settings(settings, Some(seed)).unwrap();
        engine.initialize_game(&TEAMS).unwrap();

        let mut resolved = [0u32; 3];
        for (round, moves) in rounds.iter().enumerate() {
            let t0 = Utc::now();
            prop_assert_eq!(engine.start_new_round_at(t0).unwrap(), round as u32 + 1);

            for (i, mv) in moves.iter().enumerate() {
                let name = TEAMS[i];
                let patient = engine.current_patient(name).unwrap().clone();
                let chosen = patient.options[mv.option % patient.options.len()].clone();
                let before = engine.hospital(name).unwrap().clone();

                let outcome = engine.submit_diagnosis(name, &chosen, t0 + Duration::seconds(mv.delay_secs));
                let after = engine.hospital(name).unwrap();
                resolved[i] += 1;

                prop_assert!(outcome.success);
                prop_assert_eq!(after.score() - before.score(), outcome.points);
                prop_assert!(engine.current_patient(name).is_none());

                if chosen != patient.correct_dept {
                    prop_assert_eq!(outcome.points, -((patient.points / 2) as i64));
                    prop_assert_eq!(after.diagnosis_wrong(), before.diagnosis_wrong() + 1);
                } else if outcome.admitted {
                    let bonus = if mv.delay_secs < 15 { 1 } else { 0 };
                    prop_assert_eq!(outcome.points, patient.points as i64 + bonus);
                    prop_assert_eq!(after.diagnosis_correct(), before.diagnosis_correct() + 1);
                } else {
                    prop_assert_eq!(outcome.points, -1);
                    prop_assert_eq!(after.referred_count(), before.referred_count() + 1);
                    prop_assert_eq!(
                        after.diagnosis_correct() + after.diagnosis_wrong(),
                        before.diagnosis_correct() + before.diagnosis_wrong()
                    );
                    prop_assert_eq!(
                        before.department(&chosen).unwrap().available_beds(),
                        0
                    );
                }

                prop_assert!(after.referred_count() >= before.referred_count());
                prop_assert!(after.diagnosis_correct() >= before.diagnosis_correct());
                prop_assert!(after.diagnosis_wrong() >= before.diagnosis_wrong());
                assert_beds_consistent(after);
            }
        }

        for (i, name) in TEAMS.iter().enumerate() {
            let hospital = engine.hospital(name).unwrap();
            // Referrals resolve a submission without counting as a diagnosis.
            prop_assert_eq!(
                hospital.diagnosis_correct() + hospital.diagnosis_wrong() + hospital.referred_count(),
                resolved[i]
            );
        }
        prop_assert!(engine.log().len() <= 50);
    }

    #[test]
    fn prop_rankings_sorted_and_stable(seed in any::<u64>(), rounds in rounds_strategy()) {
        let settings = GameSettings { max_rounds: 100, ..GameSettings::default() };
        let mut engine = GameEngine::with_settings(settings, Some(seed)).unwrap();
        engine.initialize_game(&TEAMS).unwrap();

        for moves in &rounds {
            let t0 = Utc::now();
            engine.start_new_round_at(t0).unwrap();
            for (i, mv) in moves.iter().enumerate() {
                let patient = engine.current_patient(TEAMS[i]).unwrap();
                let chosen = patient.options[mv.option % patient.options.len()].clone();
                engine.submit_diagnosis(TEAMS[i], &chosen, t0 + Duration::seconds(mv.delay_secs));
            }
        }

        let rankings = engine.get_rankings();
        prop_assert_eq!(rankings.len(), TEAMS.len());
        for (pos, pair) in rankings.windows(2).enumerate() {
            prop_assert!(pair[0].score >= pair[1].score);
            if pair[0].score == pair[1].score {
                let first = TEAMS.iter().position(|t| *t == pair[0].name).unwrap();
                let second = TEAMS.iter().position(|t| *t == pair[1].name).unwrap();
                prop_assert!(first < second);
            }
            prop_assert_eq!(pair[0].rank, pos + 1);
        }
    }

    #[test]
    fn prop_log_is_bounded(messages in prop::collection::vec("[a-z]{1,12}", 0..120)) {
        let mut engine = GameEngine::with_seed(0);
        engine.initialize_game(&["A", "B"]).unwrap();
        for message in &messages {
            engine.add_to_log(message);
        }

        let total = messages.len() + 1;
        prop_assert_eq!(engine.log().len(), total.min(50));
        if let Some(last) = messages.last() {
            let newest = engine.recent_log(1);
            prop_assert!(newest[0].ends_with(last.as_str()));
        }
    }
}
