use crate::camera::FlyCamera;
use glam::Vec3;
use starlane_input::{InputState, Key};

/// Advance the camera one frame from the current input snapshot.
///
/// Direct additive motion: each held movement key contributes
/// `speed * dt` along its axis, the drained drag delta scales straight into
/// yaw/pitch, and arrow keys turn at a fixed rate. No easing, no momentum —
/// with nothing held and no drag pending, the camera is left untouched.
pub fn apply_input(camera: &mut FlyCamera, input: &mut InputState, dt: f32) {
    let step = camera.speed * dt;
    let forward = camera.forward();
    let right = camera.right();

    if input.is_pressed(Key::MoveForward) {
        camera.translate(forward * step);
    }
    if input.is_pressed(Key::MoveBack) {
        camera.translate(-forward * step);
    }
    if input.is_pressed(Key::StrafeLeft) {
        camera.translate(-right * step);
    }
    if input.is_pressed(Key::StrafeRight) {
        camera.translate(right * step);
    }
    if input.is_pressed(Key::Ascend) {
        camera.translate(Vec3::Y * step);
    }
    if input.is_pressed(Key::Descend) {
        camera.translate(-Vec3::Y * step);
    }

    let drag = input.take_drag_delta();
    if drag != glam::Vec2::ZERO {
        camera.rotate(drag.x, drag.y);
    }

    let turn = camera.turn_rate * dt;
    if input.is_pressed(Key::YawLeft) {
        camera.yaw -= turn;
    }
    if input.is_pressed(Key::YawRight) {
        camera.yaw += turn;
    }
    if input.is_pressed(Key::PitchUp) {
        camera.pitch += turn;
    }
    if input.is_pressed(Key::PitchDown) {
        camera.pitch -= turn;
    }
}
