#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::bird::{Bird, WingPose};
use flappy_evo::simulation::episode::{
    AbortHandle, Episode, EpisodeStatus, Frame, NullRenderer, SceneRenderer, Termination,
    run_episode,
};
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::pipe::Pipe;
use flappy_evo::simulation::policy::{FnPolicy, Observation};

fn never_jump(_: Observation) -> f32 {
    0.0
}

fn always_jump(_: Observation) -> f32 {
    1.0
}

fn hover(observation: Observation) -> f32 {
    if observation.height > 400.0 { 1.0 } else { 0.0 }
}

fn idle_population(
    fitness: &mut [f32],
) -> impl Iterator<Item = (FnPolicy<fn(Observation) -> f32>, &mut f32)> {
    fitness
        .iter_mut()
        .map(|f| (FnPolicy(never_jump as fn(Observation) -> f32), f))
}

/// Ticks a lone bird with a fixed jump decision until it leaves the playfield.
fn ticks_until_out_of_bounds(params: &Params, jumps: bool) -> u32 {
    let mut bird = Bird::new(params.bird_start_x, params.bird_start_y);
    let mut ticks = 0;
    loop {
        bird.advance(params);
        ticks += 1;
        if jumps {
            bird.jump(params);
        }
        if bird.is_out_of_bounds(params) {
            return ticks;
        }
    }
}

#[derive(Default)]
struct CountingRenderer {
    frames: usize,
    last_alive: usize,
}

impl SceneRenderer for CountingRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        assert_eq!(frame.alive, frame.birds.len());
        self.frames += 1;
        self.last_alive = frame.alive;
    }
}

#[test]
fn test_new_episode_layout() {
    let params = Params::default();
    let mut fitness = vec![0.0; 5];
    let episode = Episode::new(&params, idle_population(&mut fitness), 3, 0);

    assert_eq!(episode.alive(), 5);
    assert_eq!(episode.generation(), 3);
    assert_eq!(episode.status(), EpisodeStatus::Running);
    assert_eq!(episode.pipes.len(), 1);
    assert_eq!(episode.pipes[0].x, params.pipe_spawn_x);
    assert_eq!(episode.score, 0);
    for bird in episode.birds() {
        assert_eq!((bird.x, bird.y), (params.bird_start_x, params.bird_start_y));
    }
}

#[test]
fn test_empty_population_is_extinct() {
    let params = Params::default();
    let mut episode = Episode::new(&params, idle_population(&mut []), 1, 0);

    assert_eq!(
        episode.tick(),
        EpisodeStatus::Terminated(Termination::Extinct)
    );
    assert_eq!(episode.ticks(), 0);
    // terminated episodes ignore further ticks
    assert_eq!(
        episode.tick(),
        EpisodeStatus::Terminated(Termination::Extinct)
    );
}

#[test]
fn test_score_cap_stops_before_ground_moves() {
    let params = Params::default();
    let mut fitness = vec![0.0];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);

    episode.score = params.score_cap;
    episode.pipes[0] = Pipe::new(params.bird_start_x - 1.0, 300.0, &params);
    let ground_x = episode.ground.x1;

    let status = episode.tick();

    assert_eq!(status, EpisodeStatus::Terminated(Termination::ScoreCap));
    assert_eq!(episode.score, params.score_cap + 1);
    assert_eq!(episode.ground.x1, ground_x);
    assert!(episode.pipes[0].passed);
    drop(episode);
    assert!((fitness[0] - (params.survival_reward + params.pass_reward)).abs() < 1e-5);
}

#[test]
fn test_whole_population_dies_on_one_pipe() {
    let params = Params::default();
    let mut fitness = vec![0.0; 4];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);

    // opening spans 50..250, every bird sits on the lower pipe
    episode.pipes[0] = Pipe::new(params.bird_start_x, 50.0, &params);

    let status = episode.tick();

    assert_eq!(status, EpisodeStatus::Terminated(Termination::Extinct));
    assert_eq!(episode.alive(), 0);
    assert_eq!(episode.pipes.len(), 1);
    assert_eq!(episode.pipes[0].x, params.bird_start_x);
    assert_eq!(episode.summary().pipe_deaths, 4);
    drop(episode);

    let expected = params.survival_reward - params.collision_penalty;
    for f in fitness {
        assert!((f - expected).abs() < 1e-5, "fitness {f}");
    }
}

#[test]
fn test_passing_a_pipe_spawns_exactly_one() {
    let params = Params::default();
    let mut fitness = vec![0.0; 2];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 9);
    episode.pipes[0] = Pipe::new(params.bird_start_x - 1.0, 300.0, &params);

    episode.tick();
    assert_eq!(episode.score, 1);
    assert_eq!(episode.pipes.len(), 2);
    assert!(episode.pipes[0].passed);
    assert!(!episode.pipes[1].passed);
    assert_eq!(episode.pipes[1].x, params.pipe_spawn_x);

    episode.tick();
    assert_eq!(episode.score, 1);
    assert_eq!(episode.pipes.len(), 2);
    assert!(episode.pipes[0].passed);
    drop(episode);

    let expected = 2.0 * params.survival_reward + params.pass_reward;
    for f in fitness {
        assert!((f - expected).abs() < 1e-5, "fitness {f}");
    }
}

#[test]
fn test_active_pipe_switches_after_leader_clears_first() {
    let params = Params::default();
    let mut fitness = vec![0.0];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);

    // pipe is 104 pixels wide; the bird sits at x = 230
    episode.pipes = vec![
        Pipe::new(130.0, 300.0, &params),
        Pipe::new(400.0, 300.0, &params),
    ];
    assert_eq!(episode.active_pipe(), Some(0));

    episode.pipes[0].x = 120.0;
    assert_eq!(episode.active_pipe(), Some(1));

    episode.pipes.truncate(1);
    assert_eq!(episode.active_pipe(), Some(0));
}

#[test]
fn test_off_screen_pipe_is_retired() {
    let params = Params::default();
    let mut fitness = vec![0.0];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);

    episode.pipes = vec![
        Pipe::new(-105.0, 300.0, &params),
        Pipe::new(params.pipe_spawn_x, 300.0, &params),
    ];
    episode.pipes[0].passed = true;

    episode.tick();

    assert_eq!(episode.pipes.len(), 1);
    assert_eq!(episode.pipes[0].x, params.pipe_spawn_x - params.pipe_velocity);
}

#[test]
fn test_abort_stops_at_next_tick() {
    let params = Params::default();
    let mut fitness = vec![0.0; 3];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);

    episode.tick();
    episode.abort_handle().abort();

    assert_eq!(
        episode.tick(),
        EpisodeStatus::Terminated(Termination::Aborted)
    );
    assert_eq!(episode.ticks(), 1);
    assert_eq!(episode.summary().termination, Some(Termination::Aborted));
}

#[test]
fn test_shared_abort_handle() {
    let params = Params::default();
    let abort = AbortHandle::new();
    abort.abort();

    let mut fitness = vec![0.0; 3];
    let mut renderer = CountingRenderer::default();
    let summary = run_episode(
        &params,
        idle_population(&mut fitness),
        1,
        0,
        &mut renderer,
        &abort,
    );

    assert_eq!(summary.termination, Some(Termination::Aborted));
    assert_eq!(summary.ticks, 0);
    assert_eq!(renderer.frames, 0);
}

#[test]
fn test_same_seed_same_episode() {
    let params = Params::default();

    let play = |seed: u64| {
        let mut fitness = vec![0.0f32; 8];
        let population = fitness
            .iter_mut()
            .map(|f| (FnPolicy(hover), f));
        let mut episode = Episode::new(&params, population, 1, seed);

        let mut gaps = Vec::new();
        while episode.ticks() < 3000 && episode.tick().is_running() {
            for pipe in &episode.pipes {
                if !gaps.contains(&pipe.gap_y) {
                    gaps.push(pipe.gap_y);
                }
            }
        }
        let summary = episode.summary();
        drop(episode);
        (summary, gaps, fitness)
    };

    assert_eq!(play(11), play(11));
}

#[test]
fn test_fitness_follows_its_bird() {
    let params = Params::default();
    let mut idle = 0.0f32;
    let mut eager = 0.0f32;

    let population: Vec<(FnPolicy<fn(Observation) -> f32>, &mut f32)> = vec![
        (FnPolicy(never_jump as fn(Observation) -> f32), &mut idle),
        (FnPolicy(always_jump as fn(Observation) -> f32), &mut eager),
    ];
    let mut episode = Episode::new(&params, population, 1, 0);
    let ids: Vec<_> = episode.agent_ids().collect();

    let mut first_removal = None;
    while episode.tick().is_running() {
        if first_removal.is_none() && episode.alive() == 1 {
            first_removal = Some(episode.ticks());
            assert!(episode.bird(ids[0]).is_none());
            assert!(episode.bird(ids[1]).is_some());
        }
    }
    let summary = episode.summary();
    drop(episode);

    let idle_ticks = ticks_until_out_of_bounds(&params, false);
    let eager_ticks = ticks_until_out_of_bounds(&params, true);
    assert!(idle_ticks < eager_ticks);
    assert_eq!(first_removal, Some(u64::from(idle_ticks)));
    assert_eq!(summary.bounds_deaths, 2);
    assert_eq!(summary.score, 0);

    assert!((idle - idle_ticks as f32 * params.survival_reward).abs() < 1e-4);
    assert!((eager - eager_ticks as f32 * params.survival_reward).abs() < 1e-4);
}

#[test]
fn test_run_episode_renders_every_live_tick() {
    let params = Params::default();
    let mut fitness = vec![0.0; 2];
    let mut renderer = CountingRenderer::default();

    let summary = run_episode(
        &params,
        idle_population(&mut fitness),
        4,
        0,
        &mut renderer,
        &AbortHandle::new(),
    );

    assert_eq!(summary.generation, 4);
    assert_eq!(summary.termination, Some(Termination::Extinct));
    assert_eq!(renderer.frames as u64, summary.ticks);
    assert_eq!(renderer.last_alive, 0);
}

#[test]
fn test_null_renderer_episode_finishes() {
    let params = Params::default();
    let mut fitness = vec![0.0; 10];
    let population = fitness.iter_mut().map(|f| (FnPolicy(hover), f));

    let summary = run_episode(
        &params,
        population,
        1,
        3,
        &mut NullRenderer,
        &AbortHandle::new(),
    );

    match summary.termination {
        Some(Termination::Extinct) => {
            assert_eq!(summary.pipe_deaths + summary.bounds_deaths, 10);
        }
        Some(Termination::ScoreCap) => assert_eq!(summary.score, params.score_cap + 1),
        other => panic!("unexpected termination {other:?}"),
    }
}

#[test]
fn test_wings_flap_after_collisions() {
    let params = Params::default();
    let mut fitness = vec![0.0];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);

    // pose each tick collides with is the one left by the previous tick
    let mut poses = Vec::new();
    for _ in 0..6 {
        poses.push(episode.birds().next().map(|bird| bird.pose));
        episode.tick();
    }

    let up = Some(WingPose::Up);
    assert_eq!(poses, vec![up, up, up, up, up, Some(WingPose::Level)]);
    assert_eq!(episode.frame().birds[0].pose, WingPose::Level);
}

#[test]
fn test_raised_wing_collides_before_it_flaps() {
    let params = Params::default();
    let mut fitness = vec![0.0];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);
    episode.pipes[0] = Pipe::new(params.bird_start_x, 300.0, &params);

    let id = episode.agent_ids().next().expect("one bird");
    let bird = episode.bird_mut(id).expect("bird alive");
    // falls 1.5 to y = 294, where only the raised wing reaches the upper pipe
    bird.y = 292.5;
    bird.jump_height = bird.y;
    bird.flap_ticks = params.animation_ticks - 1;
    bird.pose = WingPose::Up;

    let status = episode.tick();

    assert_eq!(status, EpisodeStatus::Terminated(Termination::Extinct));
    assert_eq!(episode.summary().pipe_deaths, 1);
}

#[test]
fn test_level_wing_clears_the_same_spot() {
    let params = Params::default();
    let mut fitness = vec![0.0];
    let mut episode = Episode::new(&params, idle_population(&mut fitness), 1, 0);
    episode.pipes[0] = Pipe::new(params.bird_start_x, 300.0, &params);

    let id = episode.agent_ids().next().expect("one bird");
    let bird = episode.bird_mut(id).expect("bird alive");
    bird.y = 292.5;
    bird.jump_height = bird.y;
    bird.flap_ticks = params.animation_ticks;
    bird.pose = WingPose::Level;

    assert_eq!(episode.tick(), EpisodeStatus::Running);
    assert_eq!(episode.alive(), 1);
    assert_eq!(episode.bird(id).map(|bird| bird.y), Some(294.0));
}
