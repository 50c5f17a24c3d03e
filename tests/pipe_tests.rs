#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::pipe::Pipe;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_spawned_gaps_stay_in_range() {
    let params = Params::default();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..1000 {
        let pipe = Pipe::spawn(params.pipe_spawn_x, &mut rng, &params);
        assert!(pipe.gap_y >= params.gap_min as f32);
        assert!(pipe.gap_y < params.gap_max as f32);
        assert_eq!(pipe.gap_y, pipe.gap_y.trunc());
        assert_eq!(pipe.x, params.pipe_spawn_x);
        assert!(!pipe.passed);
    }
}

#[test]
fn test_pipe_extents() {
    let params = Params::default();
    let pipe = Pipe::new(400.0, 300.0, &params);

    // pipe sprite is 640 pixels tall
    assert_eq!(pipe.top, 300.0 - 640.0);
    assert_eq!(pipe.bottom, 300.0 + params.pipe_gap);
    assert_eq!(pipe.trailing_edge(), 504.0);
}

#[test]
fn test_gap_is_clamped() {
    let params = Params::default();

    assert_eq!(Pipe::new(0.0, 10.0, &params).gap_y, params.gap_min as f32);
    assert_eq!(Pipe::new(0.0, 1000.0, &params).gap_y, params.gap_max as f32);
}

#[test]
fn test_spawn_is_reproducible() {
    let params = Params::default();
    let mut first = StdRng::seed_from_u64(7);
    let mut second = StdRng::seed_from_u64(7);

    let a: Vec<f32> = (0..50)
        .map(|_| Pipe::spawn(0.0, &mut first, &params).gap_y)
        .collect();
    let b: Vec<f32> = (0..50)
        .map(|_| Pipe::spawn(0.0, &mut second, &params).gap_y)
        .collect();

    assert_eq!(a, b);
}

#[test]
fn test_pipe_scrolls_left() {
    let params = Params::default();
    let mut pipe = Pipe::new(600.0, 200.0, &params);

    pipe.advance(&params);
    pipe.advance(&params);

    assert_eq!(pipe.x, 600.0 - 2.0 * params.pipe_velocity);
    assert_eq!(pipe.gap_y, 200.0);
}

#[test]
fn test_off_screen_only_after_trailing_edge_leaves() {
    let params = Params::default();

    assert!(!Pipe::new(-50.0, 200.0, &params).is_off_screen());
    assert!(!Pipe::new(-104.0, 200.0, &params).is_off_screen());
    assert!(Pipe::new(-104.5, 200.0, &params).is_off_screen());
}
