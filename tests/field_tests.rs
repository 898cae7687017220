//! Integration tests for the particle field.
//!
//! These drive the public API end to end: a frame driver on a manual clock,
//! input through the queue, and drawing onto a raster canvas.

use driftfield::integrator::{self, DAMPING};
use driftfield::pointer::{idle_sweep, ENGAGED_TIMEOUT_MS};
use driftfield::prelude::*;
use driftfield::render::{link_alpha, links};
use driftfield::{InputEvent, Particle, PointerTracker, SimulationSpace, SpawnContext};

const START_MS: f64 = 1_700_000_000_000.0;

fn driver_with(
    config: FieldConfig,
    env: HostEnvironment,
    width: f32,
    height: f32,
) -> (FrameDriver<ManualClock>, ManualClock) {
    let context = SimulationContext::new(config, env, width, height, 1.0);
    let clock = ManualClock::new(START_MS);
    (FrameDriver::new(context, clock.clone()), clock)
}

fn moved(x: f32, y: f32, timestamp_ms: f64) -> InputEvent {
    InputEvent::PointerMoved { x, y, timestamp_ms }
}

// ============================================================================
// Idle sweep
// ============================================================================

#[test]
fn test_idle_sweep_is_pure() {
    for &t in &[0.0, 1234.5, START_MS] {
        assert_eq!(idle_sweep(t, 800.0, 600.0), idle_sweep(t, 800.0, 600.0));
    }
    // At t = 0: cos(0) = 1, sin(0) = 0
    let p = idle_sweep(0.0, 1000.0, 500.0);
    assert!((p.x - (500.0 + 240.0)).abs() < 1e-3);
    assert!((p.y - 250.0).abs() < 1e-3);
}

#[test]
fn test_idle_sweep_stays_inside_viewport() {
    for i in 0..500 {
        let p = idle_sweep(i as f64 * 97.0, 640.0, 480.0);
        assert!(p.x >= 0.0 && p.x <= 640.0);
        assert!(p.y >= 0.0 && p.y <= 480.0);
    }
}

#[test]
fn test_driver_follows_sweep_when_idle() {
    let (mut driver, clock) = driver_with(
        FieldConfig::default().with_seed(1),
        HostEnvironment::default(),
        800.0,
        600.0,
    );
    let mut canvas = RasterCanvas::new(800.0, 600.0, 1.0);
    clock.advance(16.0);
    driver.tick(&mut canvas);

    let tracker = driver.context().tracker();
    assert_eq!(tracker.mode(), PointerMode::Idle);
    assert_eq!(tracker.target(), idle_sweep(clock.now_ms(), 800.0, 600.0));
}

// ============================================================================
// Damping
// ============================================================================

#[test]
fn test_damping_shrinks_velocity_geometrically() {
    let mut v = Vec2::new(3.0, -4.0);
    let mut previous = v.length();
    for n in 1..=50 {
        v = integrator::damp(v);
        let len = v.length();
        assert!(len < previous);
        let expected = 5.0 * DAMPING.powi(n);
        assert!((len - expected).abs() < 1e-4 * 5.0);
        previous = len;
    }
    assert!(previous < 0.1);
}

// ============================================================================
// Attraction
// ============================================================================

#[test]
fn test_attraction_zero_at_and_beyond_radius() {
    let target = Vec2::new(100.0, 100.0);
    for mode in [PointerMode::Engaged, PointerMode::Idle] {
        for d in [140.0, 140.5, 500.0] {
            let pos = target + Vec2::new(d, 0.0);
            assert_eq!(
                integrator::attraction_force(pos, target, mode, 140.0, 0.6),
                Vec2::ZERO
            );
        }
        let inside = target + Vec2::new(139.0, 0.0);
        assert!(integrator::attraction_force(inside, target, mode, 140.0, 0.6).x < 0.0);
    }
}

#[test]
fn test_attraction_pulls_field_toward_pointer() {
    let config = FieldConfig::default()
        .with_seed(9)
        .with_particle_count(60)
        .with_drift_strength(0.0);
    let (mut driver, clock) = driver_with(config, HostEnvironment::default(), 400.0, 400.0);
    let mut canvas = RasterCanvas::new(400.0, 400.0, 1.0);
    let pointer = Vec2::new(200.0, 200.0);

    let in_reach: Vec<usize> = driver
        .context()
        .space()
        .particles()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.position.distance(pointer) < 140.0)
        .map(|(i, _)| i)
        .collect();
    assert!(!in_reach.is_empty());

    let mean_distance = |space: &SimulationSpace| {
        let particles = space.particles();
        in_reach
            .iter()
            .map(|&i| particles[i].position.distance(pointer))
            .sum::<f32>()
            / in_reach.len() as f32
    };
    let before = mean_distance(driver.context().space());

    let sender = driver.sender();
    for _ in 0..120 {
        sender.send(moved(pointer.x, pointer.y, clock.now_ms()));
        clock.advance(16.0);
        driver.tick(&mut canvas);
    }
    assert_eq!(driver.context().tracker().mode(), PointerMode::Engaged);
    assert!(mean_distance(driver.context().space()) < before - 5.0);
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn test_link_alpha_symmetric_and_no_self_links() {
    let mut spawn = SpawnContext::new(Some(4));
    let mut space = SimulationSpace::new(300.0, 300.0);
    space.initialize(40, 0.2, &mut spawn);
    let particles = space.particles();

    for a in particles {
        for b in particles {
            let ab = link_alpha(a.position.distance(b.position), 160.0, 0.7);
            let ba = link_alpha(b.position.distance(a.position), 160.0, 0.7);
            assert_eq!(ab, ba);
        }
    }

    let found = links(particles, 160.0, 0.7);
    assert!(!found.is_empty());
    for link in &found {
        assert!(link.a < link.b);
        assert!(link.alpha > 0.0 && link.alpha <= 0.7);
    }
}

#[test]
fn test_coincident_particles_link_at_max_alpha() {
    let p = Particle::at(Vec2::new(5.0, 5.0), Vec2::ZERO);
    let found = links(&[p, p], 160.0, 0.7);
    assert_eq!(found.len(), 1);
    assert!((found[0].alpha - 0.7).abs() < 1e-6);
    assert_eq!(link_alpha(160.0, 160.0, 0.7), None);
}

// ============================================================================
// Engagement timeout
// ============================================================================

#[test]
fn test_engagement_expires_at_timeout() {
    let mut tracker = PointerTracker::new(0.12, false);
    let t = 5_000.0;
    tracker.apply(&moved(10.0, 10.0, t));

    tracker.update(t + ENGAGED_TIMEOUT_MS - 1.0, 800.0, 600.0);
    assert_eq!(tracker.mode(), PointerMode::Engaged);

    tracker.update(t + ENGAGED_TIMEOUT_MS, 800.0, 600.0);
    assert_eq!(tracker.mode(), PointerMode::Idle);
}

#[test]
fn test_driver_drops_engagement_without_moves() {
    let (mut driver, clock) = driver_with(
        FieldConfig::default().with_seed(2),
        HostEnvironment::default(),
        640.0,
        480.0,
    );
    let mut canvas = RasterCanvas::new(640.0, 480.0, 1.0);

    driver.sender().send(moved(100.0, 100.0, clock.now_ms()));
    driver.tick(&mut canvas);
    assert_eq!(driver.context().tracker().mode(), PointerMode::Engaged);

    clock.advance(ENGAGED_TIMEOUT_MS - 1.0);
    driver.tick(&mut canvas);
    assert_eq!(driver.context().tracker().mode(), PointerMode::Engaged);

    clock.advance(1.0);
    driver.tick(&mut canvas);
    assert_eq!(driver.context().tracker().mode(), PointerMode::Idle);
}

#[test]
fn test_driver_pointer_leave_resumes_sweep() {
    let (mut driver, clock) = driver_with(
        FieldConfig::default().with_seed(4),
        HostEnvironment::default(),
        800.0,
        600.0,
    );
    let mut canvas = RasterCanvas::new(800.0, 600.0, 1.0);

    driver.sender().send(moved(120.0, 80.0, clock.now_ms()));
    driver.tick(&mut canvas);
    assert_eq!(driver.context().tracker().mode(), PointerMode::Engaged);

    clock.advance(16.0);
    driver.sender().send(InputEvent::PointerLeft);
    driver.tick(&mut canvas);

    let tracker = driver.context().tracker();
    assert_eq!(tracker.mode(), PointerMode::Idle);
    assert_eq!(tracker.target(), idle_sweep(clock.now_ms(), 800.0, 600.0));
}

#[test]
fn test_driver_pointer_leave_freezes_target_with_reduced_motion() {
    let env = HostEnvironment::default().with_reduced_motion(Some(true));
    let (mut driver, clock) = driver_with(FieldConfig::default().with_seed(4), env, 800.0, 600.0);
    let mut canvas = RasterCanvas::new(800.0, 600.0, 1.0);

    driver.sender().send(moved(120.0, 80.0, clock.now_ms()));
    driver.tick(&mut canvas);
    clock.advance(16.0);
    driver.sender().send(InputEvent::PointerLeft);

    for _ in 0..100 {
        driver.tick(&mut canvas);
        let tracker = driver.context().tracker();
        assert_eq!(tracker.mode(), PointerMode::Inactive);
        assert_eq!(tracker.target(), Vec2::new(120.0, 80.0));
        clock.advance(16.0);
    }
}

// ============================================================================
// Resize
// ============================================================================

#[test]
fn test_resize_respawns_inside_new_bounds() {
    let config = FieldConfig::default().with_seed(11).with_particle_count(150);
    let (mut driver, _) = driver_with(config, HostEnvironment::default(), 1280.0, 720.0);
    let mut canvas = RasterCanvas::new(1280.0, 720.0, 1.0);

    driver.sender().send(InputEvent::Resized {
        width: 200.0,
        height: 100.0,
        scale_factor: 1.5,
    });
    driver.tick(&mut canvas);

    let space = driver.context().space();
    assert_eq!(space.len(), 150);
    for p in space.particles() {
        assert!(p.origin.x >= 0.0 && p.origin.x < 200.0);
        assert!(p.origin.y >= 0.0 && p.origin.y < 100.0);
    }
    assert_eq!(canvas.pixel_size(), (300, 150));
}

#[test]
fn test_density_change_alone_resizes_canvas() {
    let (mut driver, _) = driver_with(
        FieldConfig::default().with_seed(12),
        HostEnvironment::default(),
        100.0,
        50.0,
    );
    let mut canvas = RasterCanvas::new(100.0, 50.0, 1.0);
    driver.tick(&mut canvas);

    driver.sender().send(InputEvent::Resized {
        width: 100.0,
        height: 50.0,
        scale_factor: 2.0,
    });
    driver.tick(&mut canvas);
    assert_eq!(canvas.pixel_size(), (200, 100));
}

#[test]
fn test_coarse_device_resize_keeps_reduced_count() {
    let env = HostEnvironment::default().with_coarse_pointer(true);
    let config = FieldConfig::for_device(env.device_class()).with_seed(5);
    let (mut driver, _) = driver_with(config, env, 390.0, 844.0);
    let mut canvas = RasterCanvas::new(390.0, 844.0, 3.0);

    driver.sender().send(InputEvent::Resized {
        width: 844.0,
        height: 390.0,
        scale_factor: 3.0,
    });
    driver.tick(&mut canvas);
    assert_eq!(driver.context().space().len(), 25);
}

// ============================================================================
// Reduced motion
// ============================================================================

#[test]
fn test_reduced_motion_without_input_stays_inactive() {
    let env = HostEnvironment::default().with_reduced_motion(Some(true));
    let (mut driver, clock) = driver_with(FieldConfig::default().with_seed(3), env, 800.0, 600.0);
    let mut canvas = RasterCanvas::new(800.0, 600.0, 1.0);

    let initial_target = driver.context().tracker().target();
    for _ in 0..200 {
        clock.advance(16.0);
        driver.tick(&mut canvas);
        let tracker = driver.context().tracker();
        assert_eq!(tracker.mode(), PointerMode::Inactive);
        assert_eq!(tracker.target(), initial_target);
    }
}

#[test]
fn test_reduced_motion_still_engages_on_movement() {
    let env = HostEnvironment::default().with_reduced_motion(Some(true));
    let (mut driver, clock) = driver_with(FieldConfig::default().with_seed(3), env, 800.0, 600.0);
    let mut canvas = RasterCanvas::new(800.0, 600.0, 1.0);

    driver.sender().send(moved(400.0, 300.0, clock.now_ms()));
    driver.tick(&mut canvas);
    assert_eq!(driver.context().tracker().mode(), PointerMode::Engaged);

    clock.advance(ENGAGED_TIMEOUT_MS);
    driver.tick(&mut canvas);
    assert_eq!(driver.context().tracker().mode(), PointerMode::Inactive);
}

// ============================================================================
// Frame driver
// ============================================================================

#[test]
fn test_seeded_runs_are_reproducible() {
    let run = || {
        let (mut driver, clock) = driver_with(
            FieldConfig::default().with_seed(42),
            HostEnvironment::default(),
            500.0,
            500.0,
        );
        let mut canvas = RasterCanvas::new(500.0, 500.0, 1.0);
        for _ in 0..30 {
            clock.advance(16.0);
            driver.tick(&mut canvas);
        }
        driver
            .context()
            .space()
            .particles()
            .iter()
            .map(|p| p.position)
            .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_stop_from_another_thread() {
    let (mut driver, _) = driver_with(
        FieldConfig::default().with_seed(8).with_particle_count(10),
        HostEnvironment::default(),
        100.0,
        100.0,
    );
    let mut canvas = RasterCanvas::new(100.0, 100.0, 1.0);
    let handle = driver.stop_handle();

    std::thread::spawn(move || handle.stop())
        .join()
        .expect("stop thread panicked");

    assert!(!driver.is_running());
    assert_eq!(driver.run_frames(10, &mut canvas), 0);
}

#[test]
fn test_snapshot_writes_png() {
    let (mut driver, _) = driver_with(
        FieldConfig::default().with_seed(6).with_particle_count(30),
        HostEnvironment::default(),
        64.0,
        48.0,
    );
    let mut canvas = RasterCanvas::new(64.0, 48.0, 2.0);
    driver.run_frames(3, &mut canvas);

    let path = std::env::temp_dir().join(format!("driftfield-test-{}.png", std::process::id()));
    canvas.save_png(&path).expect("snapshot should encode");

    let decoded = image::open(&path).expect("snapshot should decode").to_rgba8();
    assert_eq!(decoded.dimensions(), (128, 96));
    assert_eq!(decoded.as_raw().as_slice(), canvas.pixels());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_config_from_json_drives_field() {
    let config = FieldConfig::from_json_str(r#"{ "particle_count": 12, "seed": 1 }"#)
        .expect("valid config");
    let (driver, _) = driver_with(config, HostEnvironment::default(), 300.0, 200.0);
    assert_eq!(driver.context().space().len(), 12);
    assert_eq!(driver.context().config().max_link_distance, 160.0);
}
