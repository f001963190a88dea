//! Whole-game scenarios on the virtual clock.

use recall::challenge::EngineStatus;
use recall::config::ChallengeConfig;
use recall::driver::ManualDriver;
use recall::model::challenge_vocabulary;
use recall::session::FailureCause;
use recall::{Color, DisplayCommand, Game, GameConfig, Gesture, Phase, StatusMessage};
use std::time::Duration;

const TARGETS: [&str; 3] = ["marker1", "marker2", "marker3"];

fn driver_with(config: GameConfig, seed: u64) -> ManualDriver {
    let mut driver = ManualDriver::new(Game::seeded(config, seed).unwrap());
    driver.acquire_targets(TARGETS);
    driver
}

fn plain(seed: u64) -> ManualDriver {
    driver_with(GameConfig::default().without_challenges(), seed)
}

fn always_challenge(seed: u64) -> ManualDriver {
    let challenge = ChallengeConfig {
        trigger_chance: 1.0,
        ..ChallengeConfig::default()
    };
    driver_with(GameConfig::default().with_challenge(challenge), seed)
}

fn wait_for(driver: &mut ManualDriver, phase: Phase) {
    let reached = driver.run_until(
        |game| game.session().phase() == phase,
        Duration::from_secs(60),
    );
    assert!(reached, "never reached {phase}");
}

fn sequence(driver: &ManualDriver) -> Vec<Color> {
    driver.game().session().state().sequence.as_slice().to_vec()
}

fn submit_and_unlock(driver: &mut ManualDriver, color: Color) {
    driver.submit(color);
    driver.advance(Duration::from_millis(300));
}

fn play_round(driver: &mut ManualDriver) {
    wait_for(driver, Phase::AwaitingInput);
    let colors = sequence(driver);
    let last = colors.len() - 1;
    for (i, color) in colors.into_iter().enumerate() {
        if i == last {
            driver.submit(color);
        } else {
            submit_and_unlock(driver, color);
        }
    }
}

fn wrong_for(color: Color) -> Color {
    Color::ALL
        .into_iter()
        .find(|candidate| *candidate != color)
        .unwrap()
}

#[test]
fn first_round_then_wrong_color_ends_at_level_two() {
    let mut driver = plain(11);

    wait_for(&mut driver, Phase::AwaitingInput);
    let first = sequence(&driver)[0];
    driver.submit(first);

    let state = driver.game().session().state();
    assert_eq!(state.phase, Phase::RoundComplete);
    assert_eq!(state.score, 10);
    assert_eq!(state.combo, 1);
    assert!(driver
        .presented()
        .contains(&DisplayCommand::status(StatusMessage::WellDone { bonus: 10 })));

    wait_for(&mut driver, Phase::Displaying);
    assert_eq!(driver.game().session().state().level, 2);
    assert_eq!(sequence(&driver).len(), 2);
    assert_eq!(sequence(&driver)[0], first);

    wait_for(&mut driver, Phase::AwaitingInput);
    driver.submit(wrong_for(first));

    let summary = driver.game().summary();
    assert_eq!(summary.phase, Phase::GameOver);
    assert_eq!(summary.level, 2);
    assert_eq!(summary.score, 10);
    assert_eq!(summary.combo, 0);
    assert_eq!(
        summary.failure,
        Some(FailureCause::WrongColor {
            expected: first,
            submitted: wrong_for(first),
        })
    );
    assert_eq!(
        driver.presented().last(),
        Some(&DisplayCommand::ShowGameOver {
            level: 2,
            score: 10
        })
    );
    assert_eq!(driver.pending_timers(), 0);
}

#[test]
fn playback_flashes_every_color_in_order() {
    let mut driver = plain(4);
    play_round(&mut driver);
    play_round(&mut driver);
    driver.take_presented();

    wait_for(&mut driver, Phase::AwaitingInput);
    let shown: Vec<Color> = driver
        .take_presented()
        .into_iter()
        .filter_map(|command| match command {
            DisplayCommand::ShowSequenceStep { color } => Some(color),
            _ => None,
        })
        .collect();

    assert_eq!(shown, sequence(&driver));
    assert_eq!(shown.len(), 3);
}

#[test]
fn input_during_playback_is_ignored() {
    let mut driver = plain(8);
    driver.advance(Duration::from_millis(3_000));
    assert_eq!(driver.game().session().phase(), Phase::Displaying);

    for color in Color::ALL {
        driver.submit(color);
    }

    let state = driver.game().session().state();
    assert_eq!(state.player_progress, 0);
    assert_eq!(state.phase, Phase::Displaying);
}

#[test]
fn submissions_are_locked_until_feedback_clears() {
    let mut driver = plain(21);
    play_round(&mut driver);
    wait_for(&mut driver, Phase::AwaitingInput);

    let colors = sequence(&driver);
    driver.submit(colors[0]);
    // Locked: even the right colour is dropped.
    driver.submit(colors[1]);
    assert_eq!(driver.game().session().state().player_progress, 1);

    driver.advance(Duration::from_millis(300));
    driver.submit(colors[1]);
    assert_eq!(driver.game().session().phase(), Phase::RoundComplete);
}

#[test]
fn repeat_costs_points_once_per_round_and_keeps_progress() {
    let mut driver = plain(5);
    play_round(&mut driver);
    wait_for(&mut driver, Phase::AwaitingInput);
    let colors = sequence(&driver);

    submit_and_unlock(&mut driver, colors[0]);
    driver.repeat();

    let state = driver.game().session().state();
    assert_eq!(state.phase, Phase::Displaying);
    assert_eq!(state.score, 0);
    assert!(state.repeat_used_this_round);
    assert!(driver
        .presented()
        .contains(&DisplayCommand::status(StatusMessage::Replaying { penalty: 10 })));

    wait_for(&mut driver, Phase::AwaitingInput);
    assert_eq!(driver.game().session().state().player_progress, 1);

    driver.take_presented();
    driver.repeat();
    assert_eq!(driver.game().session().phase(), Phase::AwaitingInput);
    assert_eq!(
        driver.take_presented(),
        vec![DisplayCommand::status(StatusMessage::RepeatAlreadyUsed)]
    );

    driver.submit(colors[1]);
    assert_eq!(driver.game().session().phase(), Phase::RoundComplete);
    assert_eq!(driver.game().session().state().score, 20);
}

#[test]
fn repeat_allowance_resets_each_round() {
    let mut driver = plain(6);
    wait_for(&mut driver, Phase::AwaitingInput);
    driver.repeat();
    play_round(&mut driver);

    wait_for(&mut driver, Phase::AwaitingInput);
    assert!(!driver.game().session().state().repeat_used_this_round);
    driver.repeat();
    assert_eq!(driver.game().session().phase(), Phase::Displaying);
}

#[test]
fn open_palm_gesture_requests_a_repeat() {
    let mut driver = plain(9);
    wait_for(&mut driver, Phase::AwaitingInput);

    driver.gesture(Gesture::OpenPalm);

    assert_eq!(driver.game().session().phase(), Phase::Displaying);
    assert!(driver.game().session().state().repeat_used_this_round);
}

#[test]
fn rejected_repeat_notice_clears_after_a_moment() {
    let mut driver = plain(7);
    wait_for(&mut driver, Phase::AwaitingInput);
    driver.repeat();
    wait_for(&mut driver, Phase::AwaitingInput);
    driver.take_presented();

    driver.repeat();
    assert_eq!(
        driver.take_presented(),
        vec![DisplayCommand::status(StatusMessage::RepeatAlreadyUsed)]
    );

    driver.advance(Duration::from_millis(1_499));
    assert!(driver.presented().is_empty());
    driver.advance(Duration::from_millis(1));
    assert_eq!(
        driver.take_presented(),
        vec![DisplayCommand::status(StatusMessage::YourTurn)]
    );
    assert_eq!(driver.game().session().phase(), Phase::AwaitingInput);
    assert_eq!(driver.pending_timers(), 0);
}

fn target_for(color: Color) -> String {
    GameConfig::default()
        .readiness
        .click_colors
        .into_iter()
        .find_map(|(target, c)| (c == color).then_some(target))
        .unwrap()
}

#[test]
fn clicks_on_a_hidden_target_are_ignored() {
    let mut driver = plain(14);
    wait_for(&mut driver, Phase::AwaitingInput);
    let target = target_for(sequence(&driver)[0]);

    driver.set_visible(target.as_str(), false);
    driver.click(target.as_str());

    let state = driver.game().session().state();
    assert_eq!(state.phase, Phase::AwaitingInput);
    assert_eq!(state.player_progress, 0);
    assert!(!state.input_locked);

    driver.set_visible(target.as_str(), true);
    driver.click(target.as_str());

    let state = driver.game().session().state();
    assert_eq!(state.phase, Phase::RoundComplete);
    assert_eq!(state.score, 10);
}

#[test]
fn no_challenge_while_the_sequence_plays_or_input_is_locked() {
    let challenge = ChallengeConfig {
        trigger_chance: 1.0,
        check_interval_ms: 100,
        arm_delay_ms: 1,
        ..ChallengeConfig::default()
    };
    let mut driver = driver_with(GameConfig::default().with_challenge(challenge), 21);
    wait_for(&mut driver, Phase::AwaitingInput);
    driver.submit(sequence(&driver)[0]);

    // Round complete, lead-in and playback span many checks.
    let mut seen = Vec::new();
    while driver.game().session().phase() != Phase::AwaitingInput {
        driver.advance(Duration::from_millis(10));
        let phase = driver.game().session().phase();
        assert_ne!(phase, Phase::ChallengeActive);
        if seen.last() != Some(&phase) {
            seen.push(phase);
        }
    }
    assert_eq!(
        seen,
        vec![Phase::RoundComplete, Phase::Displaying, Phase::AwaitingInput]
    );
    assert_eq!(driver.game().engine().status(), EngineStatus::Running);

    // Three checks fall inside the lock after a correct, non-final colour.
    driver.submit(sequence(&driver)[0]);
    for _ in 0..29 {
        driver.advance(Duration::from_millis(10));
        let state = driver.game().session().state();
        assert_ne!(state.phase, Phase::ChallengeActive);
        assert!(state.input_locked);
    }

    driver.advance(Duration::from_millis(20));
    assert_eq!(driver.game().session().phase(), Phase::ChallengeActive);
    assert_eq!(driver.game().session().state().player_progress, 1);
}

#[test]
fn no_challenge_before_first_round_completes() {
    let mut driver = always_challenge(2);
    wait_for(&mut driver, Phase::AwaitingInput);

    driver.advance(Duration::from_secs(120));

    assert_eq!(driver.game().session().phase(), Phase::AwaitingInput);
    assert_eq!(driver.game().engine().status(), EngineStatus::Dormant);
}

/// Complete round one, reach round two's turn and answer one colour.
fn mid_sequence_in_round_two(driver: &mut ManualDriver) -> Vec<Color> {
    play_round(driver);
    assert_eq!(driver.game().engine().status(), EngineStatus::Arming);
    wait_for(driver, Phase::AwaitingInput);
    let colors = sequence(driver);
    submit_and_unlock(driver, colors[0]);
    colors
}

#[test]
fn challenge_timeout_preempts_a_mid_sequence_turn() {
    let mut driver = always_challenge(3);
    mid_sequence_in_round_two(&mut driver);

    wait_for(&mut driver, Phase::ChallengeActive);
    let challenge = *driver.game().engine().challenge().unwrap();
    assert_eq!(challenge.seconds_left, 4);
    assert_eq!(challenge.created_during_round, 2);
    assert_ne!(challenge.gesture, Gesture::OpenPalm);
    assert!(driver.presented().contains(&DisplayCommand::ShowChallenge {
        gesture: challenge.gesture,
        seconds_left: 4,
    }));

    // Colours and repeats do nothing while the challenge is up.
    driver.submit(Color::Red);
    driver.repeat();
    driver.gesture(Gesture::OpenPalm);
    assert_eq!(driver.game().session().state().player_progress, 1);

    wait_for(&mut driver, Phase::GameOver);

    let summary = driver.game().summary();
    assert_eq!(
        summary.failure,
        Some(FailureCause::ChallengeMissed {
            gesture: challenge.gesture
        })
    );
    assert_eq!(summary.score, 10);
    assert_eq!(summary.level, 2);
    assert_eq!(driver.game().engine().status(), EngineStatus::Halted);
    assert_eq!(driver.pending_timers(), 0);

    let countdown: Vec<u32> = driver
        .presented()
        .iter()
        .filter_map(|command| match command {
            DisplayCommand::UpdateChallengeCountdown(left) => Some(*left),
            _ => None,
        })
        .collect();
    assert_eq!(countdown, vec![3, 2, 1, 0]);
}

#[test]
fn answered_challenge_pays_bonus_and_resumes_the_turn() {
    let mut driver = always_challenge(3);
    let colors = mid_sequence_in_round_two(&mut driver);

    wait_for(&mut driver, Phase::ChallengeActive);
    let gesture = driver.game().engine().challenge().unwrap().gesture;

    // Wrong gestures don't end anything.
    let other = challenge_vocabulary()
        .into_iter()
        .find(|candidate| *candidate != gesture)
        .unwrap();
    driver.gesture(other);
    assert_eq!(driver.game().session().phase(), Phase::ChallengeActive);

    driver.advance(Duration::from_millis(1_000));
    driver.gesture(gesture);

    let state = driver.game().session().state();
    assert_eq!(state.score, 10 + 20 + 5 * 3);
    assert_eq!(state.phase, Phase::ChallengeActive);
    assert!(driver.game().engine().challenge().is_none());

    driver.advance(Duration::from_millis(2_000));
    let state = driver.game().session().state();
    assert_eq!(state.phase, Phase::AwaitingInput);
    assert_eq!(state.player_progress, 1);
    assert_eq!(sequence(&driver), colors);

    driver.submit(colors[1]);
    assert_eq!(driver.game().session().phase(), Phase::RoundComplete);
}

#[test]
fn classifier_loss_withdraws_the_challenge_without_penalty() {
    let mut driver = always_challenge(3);
    mid_sequence_in_round_two(&mut driver);
    wait_for(&mut driver, Phase::ChallengeActive);
    let score = driver.game().session().state().score;

    driver.send(recall::GameEvent::ClassifierUnavailable {
        reason: "camera unplugged".to_string(),
    });

    assert_eq!(driver.game().engine().status(), EngineStatus::Disabled);
    assert_eq!(driver.game().session().phase(), Phase::AwaitingInput);
    assert_eq!(driver.game().session().state().score, score);
    assert!(driver.presented().contains(&DisplayCommand::HideChallenge));

    driver.advance(Duration::from_secs(120));
    assert_eq!(driver.game().session().phase(), Phase::AwaitingInput);
}

#[test]
fn losing_a_target_after_start_changes_nothing() {
    let mut driver = plain(12);
    wait_for(&mut driver, Phase::AwaitingInput);
    let before = driver.game().summary();

    driver.send(recall::GameEvent::TargetReported {
        target: "marker1".to_string(),
        visible: false,
    });
    driver.send(recall::GameEvent::TargetReported {
        target: "marker1".to_string(),
        visible: true,
    });

    assert_eq!(driver.game().summary(), before);
}

#[test]
fn history_records_the_phase_path() {
    let mut driver = plain(13);
    play_round(&mut driver);
    wait_for(&mut driver, Phase::AwaitingInput);
    driver.submit(wrong_for(sequence(&driver)[0]));

    let path = driver.game().session().history().path();
    assert_eq!(
        path,
        vec![
            Phase::AwaitingReady,
            Phase::Displaying,
            Phase::AwaitingInput,
            Phase::RoundComplete,
            Phase::Displaying,
            Phase::AwaitingInput,
            Phase::GameOver,
        ]
    );
}
