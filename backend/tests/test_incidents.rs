//! Tests for the incident model

use race_sim_core::incidents::{apply_event, victim_cap, IncidentEventConfig, LapWindow, VictimCount, VictimWeighting};
use race_sim_core::models::IncidentOutcome;
use race_sim_core::rng::Replacement;
use race_sim_core::{roster, Attribute, CompetitorProfile, RaceEvent, RaceState, RngManager, SkillTier};

fn field(n: usize) -> Vec<CompetitorProfile> {
    (0..n)
        .map(|i| {
            CompetitorProfile::new(format!("Driver {}", i), i as u32, "Team", "Ford", SkillTier::Mid)
                .with_skill(Attribute::Aggression, 2.0 + i as f64 * 0.8)
                .with_skill(Attribute::ChaosSurvival, 9.0 - i as f64)
                .with_skill(Attribute::Recovery, 5.0)
        })
        .collect()
}

fn pileup(min: usize, max: usize) -> IncidentEventConfig {
    IncidentEventConfig {
        name: "pileup".to_string(),
        laps: LapWindow::from_lap(1),
        probability: 1.0,
        lap_probabilities: Default::default(),
        once_per_race: false,
        victims: VictimCount { min, max },
        weighting: VictimWeighting::InverseSurvival {
            survival: Attribute::ChaosSurvival,
            scale: Attribute::Aggression,
        },
        replacement: Replacement::Without,
        retire_probability: 1.0,
        marks_early_incident: false,
    }
}

#[test]
fn test_victim_cap() {
    assert_eq!(victim_cap(12, 20, 2), 12);
    assert_eq!(victim_cap(12, 5, 2), 3);
    assert_eq!(victim_cap(3, 2, 2), 0);
    assert_eq!(victim_cap(3, 0, 2), 0);
}

#[test]
fn test_floor_of_two_on_five_removes_at_most_three() {
    let roster = field(5);
    let event = pileup(6, 12);

    for seed in 1..200 {
        let mut rng = RngManager::new(seed);
        let mut state = RaceState::new(&roster, &[], &mut rng);

        let report = apply_event(0, &event, 1, 2, &mut state, &mut rng).unwrap();

        assert_eq!(report.retired, 3);
        assert_eq!(state.running_count(), 2);
    }
}

#[test]
fn test_floor_holds_across_repeated_firings() {
    let roster = field(8);
    let event = pileup(1, 3);
    let mut rng = RngManager::new(77);
    let mut state = RaceState::new(&roster, &[], &mut rng);

    for lap in 1..=50 {
        apply_event(0, &event, lap, 2, &mut state, &mut rng);
        assert!(state.running_count() >= 2);
    }

    // Once at the floor, firings still bring out cautions
    assert_eq!(state.running_count(), 2);
    assert_eq!(state.caution_laps().len(), 50);
}

#[test]
fn test_no_runners_no_caution() {
    let roster = field(3);
    let mut rng = RngManager::new(5);
    let mut state = RaceState::new(&roster, &[], &mut rng);
    for i in 0..3 {
        state.competitor_mut(i).retire();
    }

    assert!(apply_event(0, &pileup(1, 1), 4, 0, &mut state, &mut rng).is_none());
    assert!(state.caution_laps().is_empty());
}

#[test]
fn test_zero_probability_never_fires() {
    let roster = field(6);
    let mut event = pileup(1, 1);
    event.probability = 0.0;
    let mut rng = RngManager::new(5);
    let mut state = RaceState::new(&roster, &[], &mut rng);

    for lap in 1..=100 {
        assert!(apply_event(0, &event, lap, 0, &mut state, &mut rng).is_none());
    }
    assert_eq!(state.running_count(), 6);
}

#[test]
fn test_lap_override_controls_firing() {
    let roster = field(6);
    let mut event = pileup(1, 1);
    event.probability = 0.0;
    event.lap_probabilities.insert(2, 1.0);
    let mut rng = RngManager::new(5);
    let mut state = RaceState::new(&roster, &[], &mut rng);

    assert!(apply_event(0, &event, 1, 0, &mut state, &mut rng).is_none());
    assert!(apply_event(0, &event, 2, 0, &mut state, &mut rng).is_some());
    assert!(apply_event(0, &event, 3, 0, &mut state, &mut rng).is_none());
}

#[test]
fn test_high_risk_drivers_collected_more_often() {
    let roster = field(8);
    let event = pileup(1, 1);
    let mut hits = vec![0u32; roster.len()];

    for seed in 1..=4000 {
        let mut rng = RngManager::new(seed);
        let mut state = RaceState::new(&roster, &[], &mut rng);
        apply_event(0, &event, 1, 0, &mut state, &mut rng);
        for (i, c) in state.competitors().iter().enumerate() {
            if !c.is_running() {
                hits[i] += 1;
            }
        }
    }

    // Driver 7: most aggressive, worst survival
    assert!(hits[7] > hits[0] * 3, "{:?}", hits);
}

#[test]
fn test_severity_split_on_road_course() {
    let roster = roster::road_course_field();
    let mut event = race_sim_core::ArchetypeConfig::road_course().incident_events[0].clone();
    event.probability = 1.0;

    let (mut retired, mut damaged) = (0usize, 0usize);
    for seed in 1..=3000 {
        let mut rng = RngManager::new(seed);
        let mut state = RaceState::new(&roster, &[], &mut rng);
        if let Some(report) = apply_event(0, &event, 1, 2, &mut state, &mut rng) {
            retired += report.retired;
            damaged += report.damaged;
        }
    }

    let share = retired as f64 / (retired + damaged) as f64;
    assert!((share - 0.6).abs() < 0.03, "retired share {}", share);
}

#[test]
fn test_logged_victims_match_state() {
    let roster = field(10);
    let mut rng = RngManager::new(31);
    let mut state = RaceState::new(&roster, &[], &mut rng).with_event_log();

    apply_event(0, &pileup(4, 4), 3, 2, &mut state, &mut rng);

    let log = state.event_log().unwrap();
    let victims = match &log.events()[0] {
        RaceEvent::Incident { lap, victims, .. } => {
            assert_eq!(*lap, 3);
            victims.clone()
        }
        other => panic!("unexpected event {:?}", other),
    };

    assert_eq!(victims.len(), 4);
    for victim in victims {
        assert_eq!(victim.outcome, IncidentOutcome::Retired);
        let competitor = state
            .competitors()
            .iter()
            .find(|c| c.name() == victim.name)
            .unwrap();
        assert!(!competitor.is_running());
        assert!(competitor.involved_in_incident());
    }
}
