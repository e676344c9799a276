// End-to-end scenarios through the public scene API.

use glam::Vec2;
use neon_ripple::consts::*;
use neon_ripple::platform::{EventQueue, FixedTicker, FrameLoop};
use neon_ripple::sim::{PALETTE, PointerEvent, ripple_lifetime, velocity_magnitude};
use neon_ripple::{DrawCommand, NeonRippleScene, RecordingSurface, Settings};

fn scene_with(settings: Settings) -> NeonRippleScene {
    NeonRippleScene::new(settings, 1080.0, 1920.0)
}

#[test]
fn tap_is_evicted_after_lifetime_and_afterglow() {
    let mut scene = scene_with(Settings::default());
    let id = scene
        .handle_pointer(&PointerEvent::down(0, Vec2::new(100.0, 100.0), 0))
        .unwrap();
    scene.handle_pointer(&PointerEvent::up(0, Vec2::new(100.0, 100.0), 500));

    let ripple = scene.store().ripple(id).unwrap();
    assert_eq!(ripple.press_duration, 500);

    scene.frame(2600);
    assert_eq!(scene.state_description(), "ripples:1");
    scene.frame(500 + 1600 + 700 + 1);
    assert_eq!(scene.state_description(), "ripples:0");
}

#[test]
fn rapid_taps_cycle_palette_only_with_multi_color() {
    let mut multi = scene_with(Settings::default());
    for (i, t) in [0u64, 40].into_iter().enumerate() {
        multi.handle_pointer(&PointerEvent::down(i as u32, Vec2::ZERO, t));
        multi.handle_pointer(&PointerEvent::up(i as u32, Vec2::ZERO, t + 20));
    }
    let colors: Vec<_> = multi.store().ripples().iter().map(|r| r.color).collect();
    assert_eq!(colors, vec![PALETTE[0], PALETTE[1]]);

    let mut single = scene_with(Settings {
        multi_color: false,
        ..Settings::default()
    });
    for (i, t) in [0u64, 40].into_iter().enumerate() {
        single.handle_pointer(&PointerEvent::down(i as u32, Vec2::ZERO, t));
        single.handle_pointer(&PointerEvent::up(i as u32, Vec2::ZERO, t + 20));
    }
    assert!(single.store().ripples().iter().all(|r| r.color == PALETTE[0]));
}

#[test]
fn zero_dt_move_samples_are_safe() {
    let mut scene = scene_with(Settings::default());
    let id = scene
        .handle_pointer(&PointerEvent::down(0, Vec2::new(10.0, 10.0), 100))
        .unwrap();
    for _ in 0..5 {
        scene.handle_pointer(&PointerEvent::moved(0, Vec2::new(10.0, 10.0), 100));
    }
    assert_eq!(scene.store().ripple(id).unwrap().velocity, Vec2::ZERO);
    let cmds = scene.frame(200);
    assert_eq!(cmds.len(), 1);
}

#[test]
fn fast_drag_lifetime_is_capped() {
    let mut scene = scene_with(Settings::default());
    let id = scene.handle_pointer(&PointerEvent::down(0, Vec2::ZERO, 0)).unwrap();
    // 1000 px in 1 ms
    scene.handle_pointer(&PointerEvent::moved(0, Vec2::new(1000.0, 0.0), 1));
    scene.handle_pointer(&PointerEvent::cancel(0, 1));

    let ripple = scene.store().ripple(id).unwrap();
    assert_eq!(velocity_magnitude(ripple.velocity), MAX_VELOCITY_MAGNITUDE);
    let bonus = ripple.lifetime() - ripple_lifetime(ripple.press_duration, 0.0);
    assert!(bonus <= (VELOCITY_BONUS_SCALE * MAX_VELOCITY_MAGNITUDE) as u64);
}

#[test]
fn cancelled_gesture_still_ages_out() {
    let mut scene = scene_with(Settings::default());
    scene.handle_pointer(&PointerEvent::down(7, Vec2::ZERO, 0));
    scene.handle_pointer(&PointerEvent::cancel(7, 300));
    assert_eq!(scene.gestures().active_pointers(), 0);

    // lifetime 1600 + 180
    scene.frame(1780 + AFTERGLOW_DURATION);
    assert_eq!(scene.state_description(), "ripples:1");
    scene.frame(1780 + AFTERGLOW_DURATION + 1);
    assert_eq!(scene.state_description(), "ripples:0");
}

#[test]
fn drag_with_trails_draws_particles_under_ripple() {
    let mut scene = scene_with(Settings {
        particle_trails: true,
        ..Settings::default()
    });
    scene.handle_pointer(&PointerEvent::down(0, Vec2::ZERO, 0));
    for i in 1..=4u64 {
        scene.handle_pointer(&PointerEvent::moved(0, Vec2::new(i as f32 * 10.0, 0.0), i * 16));
    }
    let cmds = scene.frame(80);
    assert_eq!(cmds.len(), 5);
    assert!(cmds[..4].iter().all(|c| matches!(c, DrawCommand::FillCircle { .. })));
    assert!(matches!(cmds[4], DrawCommand::RadialGradientCircle { .. }));

    // Particles gone, ripple still up
    let cmds = scene.frame(64 + TRAIL_PARTICLE_LIFETIME + 1);
    assert_eq!(cmds.len(), 1);
}

#[test]
fn long_held_drag_keeps_emitting_trails() {
    let mut scene = scene_with(Settings {
        particle_trails: true,
        ..Settings::default()
    });
    scene.handle_pointer(&PointerEvent::down(0, Vec2::new(100.0, 100.0), 0));
    let mut t = 0;
    while t < 4000 {
        t += 16;
        scene.handle_pointer(&PointerEvent::moved(0, Vec2::new(100.0 + t as f32 * 0.05, 100.0), t));
        scene.frame(t);
    }
    // The held ripple aged out while the finger stayed down
    assert_eq!(scene.state_description(), "ripples:0");

    scene.handle_pointer(&PointerEvent::moved(0, Vec2::new(400.0, 100.0), t + 16));
    assert!(scene.store().particle_count() > 0);
    let cmds = scene.frame(t + 16);
    assert!(cmds.iter().any(|c| matches!(c, DrawCommand::FillCircle { .. })));
}

#[test]
fn headless_loop_runs_session_to_empty() {
    let mut scene = scene_with(Settings::default());
    let mut queue: EventQueue = [
        PointerEvent::down(0, Vec2::new(200.0, 300.0), 0),
        PointerEvent::down(1, Vec2::new(600.0, 900.0), 30),
        PointerEvent::up(0, Vec2::new(200.0, 300.0), 120),
        PointerEvent::up(1, Vec2::new(640.0, 900.0), 200),
    ]
    .into_iter()
    .collect();
    let mut surface = RecordingSurface::new();
    let mut frame_loop = FrameLoop::new(FixedTicker::new(0, 16));

    // ~4.8s, well past both ripples
    let stats = frame_loop.run_for(300, &mut scene, &mut queue, &mut surface);
    assert_eq!(stats.events, 4);
    assert_eq!(stats.peak_ripples, 2);
    assert!(stats.draw_commands > 0);
    assert_eq!(scene.state_description(), "ripples:0");
    assert!(!scene.needs_frame());
    assert!(surface.commands.is_empty());
}
