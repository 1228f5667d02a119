//! Property tests for the simulation invariants

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use space_dodger::consts::START_LIVES;
use space_dodger::sim::{Craft, GameEvent, GamePhase, GameState, TickInput, tick};

/// Random per-tick input: mostly ascend taps, occasional pause and start
fn input_strategy() -> impl Strategy<Value = TickInput> {
    (prop::bool::weighted(0.2), prop::bool::weighted(0.02), prop::bool::weighted(0.02))
        .prop_map(|(ascend, toggle_pause, start)| TickInput {
            ascend,
            toggle_pause,
            start,
        })
}

fn started_state(seed: u64, high_score: u64) -> (GameState, Pcg32) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut state = GameState::new(high_score, &mut rng);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..TickInput::default()
        },
        &mut rng,
    );
    (state, rng)
}

proptest! {
    #[test]
    fn craft_stays_in_viewport(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..600),
    ) {
        let (mut state, mut rng) = started_state(seed, 0);
        for input in &inputs {
            tick(&mut state, input, &mut rng);
            prop_assert!(state.craft.y >= 0.0);
            prop_assert!(state.craft.y <= Craft::max_y());
        }
    }

    #[test]
    fn score_counts_exits_and_lives_count_hits(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..800),
    ) {
        let (mut state, mut rng) = started_state(seed, 0);
        state.drain_events();

        for input in &inputs {
            let before_score = state.score;
            let before_lives = state.lives;
            let restarted = input.start && state.game_over;

            tick(&mut state, input, &mut rng);
            let events = state.drain_events();
            if restarted {
                continue;
            }

            let scored = events.iter().filter(|e| **e == GameEvent::Scored).count() as u64;
            let hits = events.iter().filter(|e| **e == GameEvent::Hit).count() as u8;
            prop_assert_eq!(state.score, before_score + scored);
            prop_assert_eq!(state.lives, before_lives - hits);
        }
    }

    #[test]
    fn ascend_is_ignored_after_game_over(
        seed in any::<u64>(),
        extra in 1usize..50,
    ) {
        let (mut state, mut rng) = started_state(seed, 0);
        state.lives = 1;
        for _ in 0..100_000 {
            if state.game_over {
                break;
            }
            tick(&mut state, &TickInput::default(), &mut rng);
        }
        prop_assert_eq!(state.phase(), GamePhase::GameOver);
        prop_assert_eq!(state.lives, 0);

        let craft = state.craft;
        let ascend = TickInput { ascend: true, ..TickInput::default() };
        for _ in 0..extra {
            tick(&mut state, &ascend, &mut rng);
            prop_assert_eq!(state.craft, craft);
            prop_assert_eq!(state.phase(), GamePhase::GameOver);
        }
    }

    #[test]
    fn high_score_is_running_max(
        seed in any::<u64>(),
        initial in 0u64..40,
        sessions in 1usize..4,
    ) {
        let (mut state, mut rng) = started_state(seed, initial);
        let mut best = initial;
        let start = TickInput { start: true, ..TickInput::default() };

        for _ in 0..sessions {
            for _ in 0..100_000 {
                if state.game_over {
                    break;
                }
                tick(&mut state, &TickInput::default(), &mut rng);
            }
            best = best.max(state.score);
            // Game-over processing runs on the following tick
            tick(&mut state, &TickInput::default(), &mut rng);
            prop_assert_eq!(state.high_score, best);

            tick(&mut state, &start, &mut rng);
            prop_assert_eq!(state.score, 0);
            prop_assert_eq!(state.lives, START_LIVES);
            prop_assert!(state.started);
            prop_assert_eq!(state.high_score, best);
        }
    }
}
