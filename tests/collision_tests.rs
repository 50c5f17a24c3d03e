#![allow(missing_docs)]

use flappy_evo::simulation::bird::{Bird, WingPose};
use flappy_evo::simulation::collision::collides;
use flappy_evo::simulation::params::Params;
use flappy_evo::simulation::pipe::Pipe;
use flappy_evo::simulation::silhouette::Silhouette;
use flappy_evo::simulation::sprites::{self, Silhouettes};

#[test]
fn test_disjoint_silhouettes_do_not_overlap() {
    let a = Silhouette::filled(4, 4);
    let b = Silhouette::filled(4, 4);

    assert!(!a.overlaps(&b, (4, 0)));
    assert!(!a.overlaps(&b, (0, -4)));
    assert!(!a.overlaps(&b, (100, 100)));
}

#[test]
fn test_touching_corner_overlaps() {
    let a = Silhouette::filled(4, 4);
    let b = Silhouette::filled(4, 4);

    assert_eq!(a.overlap(&b, (3, 3)), Some((3, 3)));
    assert_eq!(a.overlap(&b, (-3, -3)), Some((0, 0)));
    assert!(a.overlaps(&a.clone(), (0, 0)));
}

#[test]
fn test_transparent_pixels_never_collide() {
    let hollow = Silhouette::from_fn(5, 5, |x, y| x == 0 || y == 0 || x == 4 || y == 4);
    let dot = Silhouette::filled(1, 1);

    assert!(!hollow.overlaps(&dot, (2, 2)));
    assert!(hollow.overlaps(&dot, (4, 2)));
}

#[test]
fn test_alpha_threshold() {
    let rgba = [0, 0, 0, 127, 0, 0, 0, 128];
    let silhouette = Silhouette::from_rgba(2, 1, &rgba);

    assert!(!silhouette.get(0, 0));
    assert!(silhouette.get(1, 0));
    assert_eq!(silhouette.count(), 1);
}

#[test]
fn test_sprite_silhouettes_match_sprite_sizes() {
    let silhouettes = Silhouettes::new();

    for pose in WingPose::ALL {
        let bird = silhouettes.bird(pose);
        assert_eq!((bird.width(), bird.height()), (sprites::BIRD_WIDTH, sprites::BIRD_HEIGHT));
        assert!(bird.count() > 0);
    }
    assert_eq!(
        silhouettes.pipe_top(),
        &silhouettes.pipe_bottom().flipped_vertically()
    );
    // the pipe body is fully opaque
    assert!(silhouettes.pipe_bottom().get(sprites::PIPE_WIDTH / 2, sprites::PIPE_HEIGHT - 1));
}

#[test]
fn test_bird_inside_gap_is_clear() {
    let params = Params::default();
    let silhouettes = Silhouettes::new();
    let pipe = Pipe::new(params.bird_start_x, 300.0, &params);

    // opening spans 300..500, bird is 48 pixels tall
    let bird = Bird::new(params.bird_start_x, 376.0);
    assert!(!collides(&bird, &pipe, &silhouettes));
}

#[test]
fn test_bird_hits_upper_and_lower_pipe() {
    let params = Params::default();
    let silhouettes = Silhouettes::new();
    let pipe = Pipe::new(params.bird_start_x, 300.0, &params);

    let high = Bird::new(params.bird_start_x, 280.0);
    assert!(collides(&high, &pipe, &silhouettes));

    let low = Bird::new(params.bird_start_x, 480.0);
    assert!(collides(&low, &pipe, &silhouettes));
}

#[test]
fn test_pipe_far_away_is_clear() {
    let params = Params::default();
    let silhouettes = Silhouettes::new();
    let pipe = Pipe::new(params.pipe_spawn_x, 300.0, &params);

    let bird = Bird::new(params.bird_start_x, 100.0);
    assert!(!collides(&bird, &pipe, &silhouettes));
}

#[test]
fn test_wing_pose_changes_silhouette() {
    let params = Params::default();
    let silhouettes = Silhouettes::new();
    let pipe = Pipe::new(params.bird_start_x, 300.0, &params);

    // only the raised wing reaches the bottom rows of the upper pipe
    let mut bird = Bird::new(params.bird_start_x, 294.0);

    bird.pose = WingPose::Up;
    assert!(collides(&bird, &pipe, &silhouettes));

    bird.pose = WingPose::Level;
    assert!(!collides(&bird, &pipe, &silhouettes));

    bird.pose = WingPose::Down;
    assert!(!collides(&bird, &pipe, &silhouettes));
}

#[test]
fn test_tilt_does_not_change_silhouette() {
    let params = Params::default();
    let silhouettes = Silhouettes::new();
    let pipe = Pipe::new(params.bird_start_x, 300.0, &params);

    for y in [280.0, 294.0, 376.0, 480.0] {
        let mut bird = Bird::new(params.bird_start_x, y);
        let level = collides(&bird, &pipe, &silhouettes);

        bird.tilt = params.min_tilt;
        assert_eq!(collides(&bird, &pipe, &silhouettes), level);

        bird.tilt = params.max_tilt;
        assert_eq!(collides(&bird, &pipe, &silhouettes), level);
    }
}
