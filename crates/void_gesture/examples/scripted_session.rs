//! Scripted gesture session
//!
//! A fake capture thread sweeps the right hand across the frame, then
//! extends both hands and pulls them together. The controller ticks on its
//! timer and the resulting transform is logged.
//!
//! Run with: RUST_LOG=debug cargo run -p void_gesture --example scripted_session

use glam::{Vec2, Vec3};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use void_gesture::prelude::*;

const TORSO_Z: f32 = 2.0;

fn frame(left_z: f32, right_z: f32, right_pixel: Vec2) -> SkeletonFrame {
    SkeletonFrame {
        left_hand: JointSample::new(Vec3::new(-0.3, 0.0, left_z), Vec2::new(220.0, 260.0)),
        right_hand: JointSample::new(Vec3::new(0.3, 0.0, right_z), right_pixel),
        torso: JointSample::new(Vec3::new(0.0, 0.0, TORSO_Z), Vec2::new(320.0, 240.0)),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = GestureConfig::default();
    let skeleton = Arc::new(SharedSkeleton::new());
    let controller = Arc::new(ManipulationController::new(config));
    controller.set_viewport(1280.0, 960.0);

    let events = controller.subscribe();

    let capture = {
        let skeleton = Arc::clone(&skeleton);
        thread::spawn(move || {
            // Right hand out, sweeping left to right
            for step in 0..40 {
                let x = 320.0 + step as f32 * 4.0;
                skeleton.publish(frame(2.1, 1.2, Vec2::new(x, 240.0)));
                thread::sleep(Duration::from_millis(15));
            }
            // User steps out of view briefly
            skeleton.lose_user();
            thread::sleep(Duration::from_millis(50));
            // Both hands out, right hand moving right to left
            for step in 0..40 {
                let x = 480.0 - step as f32 * 3.0;
                skeleton.publish(frame(1.2, 1.2, Vec2::new(x, 240.0)));
                thread::sleep(Duration::from_millis(15));
            }
            skeleton.publish(frame(2.1, 2.1, Vec2::new(320.0, 240.0)));
        })
    };

    let mut gesture_loop =
        GestureLoop::new(Arc::clone(&controller), skeleton.clone())?.with_tick_limit(150);
    let ticks = gesture_loop.run()?;

    if capture.join().is_err() {
        log::error!("Capture thread panicked");
    }

    let started = events.try_iter().filter(|e| e.is_start()).count();
    let transform = controller.current_transform();
    let (axis, angle) = transform.axis_angle();

    log::info!("{} ticks, {} strokes started", ticks, started);
    log::info!(
        "Rotation {:.1} deg about {:?}, scale {:.3}",
        angle.to_degrees(),
        axis,
        transform.scale.x
    );
    log::info!("Matrix {:?}", transform.to_matrix());

    Ok(())
}
