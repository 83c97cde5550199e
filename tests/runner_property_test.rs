//! Property tests: collision geometry and score bookkeeping over arbitrary
//! input sequences.

use proptest::prelude::*;
use sleep_runner::runner::collision::{check_collision, Aabb, Geometry};
use sleep_runner::runner::logic::tick_runner;
use sleep_runner::runner::Timeline;
use sleep_runner::{GameMode, RunnerConfig, RunnerGame, RunnerInput, Track};

#[derive(Debug, Clone, Copy)]
enum Op {
    Input(RunnerInput),
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        1 => Just(Op::Input(RunnerInput::Start)),
        3 => Just(Op::Input(RunnerInput::Jump)),
        1 => Just(Op::Input(RunnerInput::Reset)),
        6 => (1u64..800).prop_map(Op::Advance),
    ]
}

fn geometry_strategy() -> impl Strategy<Value = Geometry> {
    (
        -100.0..100.0f64,
        -200.0..200.0f64,
        1.0..100.0f64,
        1.0..100.0f64,
        1.0..100.0f64,
        1.0..100.0f64,
    )
        .prop_map(
            |(ground_level, player_left, player_width, player_height, obstacle_width, obstacle_height)| {
                Geometry {
                    ground_level,
                    player_left,
                    player_width,
                    player_height,
                    obstacle_width,
                    obstacle_height,
                }
            },
        )
}

fn aabb_strategy() -> impl Strategy<Value = Aabb> {
    (-500.0..500.0f64, -500.0..500.0f64, 0.1..200.0f64, 0.1..200.0f64)
        .prop_map(|(left, bottom, w, h)| Aabb::new(left, bottom, w, h))
}

proptest! {
    #[test]
    fn prop_overlap_is_symmetric(a in aabb_strategy(), b in aabb_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn prop_shared_vertical_edge_never_collides(
        g in geometry_strategy(),
        player_offset in -300.0..300.0f64,
    ) {
        // obstacleLeft == playerRight
        let touching_right = g.player_left + g.player_width;
        prop_assert!(!check_collision(&g, player_offset, touching_right));

        // obstacleRight == playerLeft
        let player = g.player_box(player_offset);
        let obstacle = Aabb {
            left: player.left - g.obstacle_width,
            right: player.left,
            bottom: g.ground_level,
            top: g.ground_level + g.obstacle_height,
        };
        prop_assert!(!player.overlaps(&obstacle));
    }

    #[test]
    fn prop_standing_on_obstacle_top_never_collides(
        g in geometry_strategy(),
        obstacle_offset in -300.0..300.0f64,
    ) {
        // playerBottom == obstacleTop
        let player = Aabb {
            left: g.player_left,
            right: g.player_left + g.player_width,
            bottom: g.ground_level + g.obstacle_height,
            top: g.ground_level + g.obstacle_height + g.player_height,
        };
        prop_assert!(!player.overlaps(&g.obstacle_box(obstacle_offset)));
    }

    #[test]
    fn prop_score_and_high_score_bookkeeping(ops in prop::collection::vec(op_strategy(), 1..80)) {
        let config = RunnerConfig::default();
        let mut clock = Timeline::new(config.clock_step_ms);
        let mut game = RunnerGame::new(config);
        let mut best_at_game_over = 0u32;

        for op in ops {
            let before_mode = game.mode();
            let before_score = game.score();

            match op {
                Op::Input(input) => game.process_input(input, &mut clock),
                Op::Advance(ms) => {
                    tick_runner(&mut game, &mut clock, ms);
                }
            }

            match (before_mode, game.mode()) {
                (GameMode::Running, GameMode::Running) => {
                    prop_assert!(game.score() >= before_score);
                }
                (GameMode::Running, GameMode::Over) => {
                    prop_assert!(game.score() >= before_score);
                    best_at_game_over = best_at_game_over.max(game.score());
                }
                (GameMode::Over, GameMode::Over) => {
                    prop_assert_eq!(game.score(), before_score);
                }
                (GameMode::Ready, GameMode::Running) | (GameMode::Over, GameMode::Ready) => {
                    prop_assert_eq!(game.score(), 0);
                }
                (GameMode::Ready, GameMode::Ready) => {}
                (from, to) => {
                    prop_assert!(false, "illegal transition {:?} -> {:?}", from, to);
                }
            }

            prop_assert_eq!(game.high_score(), best_at_game_over);
            prop_assert!(clock.active_on(Track::Player) <= 1);
            prop_assert!(clock.active_on(Track::Obstacle) <= 1);
            if game.mode() != GameMode::Running {
                prop_assert_eq!(clock.active_count(), 0);
            }
        }
    }

    #[test]
    fn prop_reset_restores_resting_values(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let config = RunnerConfig::default();
        let obstacle_start = config.obstacle_start;
        let mut clock = Timeline::new(config.clock_step_ms);
        let mut game = RunnerGame::new(config);

        for op in ops {
            match op {
                Op::Input(input) => game.process_input(input, &mut clock),
                Op::Advance(ms) => {
                    tick_runner(&mut game, &mut clock, ms);
                }
            }
        }

        let was_over = game.mode() == GameMode::Over;
        game.reset(&mut clock);
        if was_over {
            prop_assert_eq!(game.mode(), GameMode::Ready);
            prop_assert_eq!(game.score(), 0);
            prop_assert_eq!(game.tracker().player_offset(), 0.0);
            prop_assert_eq!(game.tracker().obstacle_offset(), obstacle_start);
            prop_assert_eq!(clock.active_count(), 0);
        }
    }
}
