use crate::input::{InputState, Key};

use super::Camera;

const FORWARD: [Key; 2] = [Key::W, Key::ArrowUp];
const BACKWARD: [Key; 2] = [Key::S, Key::ArrowDown];
const LEFT: [Key; 2] = [Key::A, Key::ArrowLeft];
const RIGHT: [Key; 2] = [Key::D, Key::ArrowRight];

/// Moves the eye toward/away from the target and orbits around it while
/// WASD or the arrow keys are held.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    speed: f32,
}

impl CameraController {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    pub fn update_camera(&self, input: &InputState, camera: &mut Camera) {
        let forward = camera.target - camera.eye;
        let forward_norm = forward.normalize_or_zero();
        let forward_mag = forward.length();

        // Never step through the target.
        if input.any_down(&FORWARD) && forward_mag > self.speed {
            camera.eye += forward_norm * self.speed;
        }
        if input.any_down(&BACKWARD) {
            camera.eye -= forward_norm * self.speed;
        }

        let right = forward_norm.cross(camera.up);

        // Orbit at constant distance.
        let forward = camera.target - camera.eye;
        let forward_mag = forward.length();

        if input.any_down(&RIGHT) {
            camera.eye = camera.target - (forward + right * self.speed).normalize_or_zero() * forward_mag;
        }
        if input.any_down(&LEFT) {
            camera.eye = camera.target - (forward - right * self.speed).normalize_or_zero() * forward_mag;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, KeyState};

    fn held(keys: &[Key]) -> InputState {
        let mut state = InputState::default();
        for &key in keys {
            state.apply_event(&InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat: false,
            });
        }
        state
    }

    #[test]
    fn forward_moves_eye_by_speed() {
        let mut camera = Camera::new(1.0);
        let start = camera.eye.distance(camera.target);
        CameraController::new(0.2).update_camera(&held(&[Key::W]), &mut camera);
        assert!((camera.eye.distance(camera.target) - (start - 0.2)).abs() < 1e-5);
    }

    #[test]
    fn forward_stops_short_of_target() {
        let mut camera = Camera::new(1.0);
        camera.eye = glam::Vec3::new(0.0, 0.0, 0.1);
        CameraController::new(0.2).update_camera(&held(&[Key::ArrowUp]), &mut camera);
        assert_eq!(camera.eye, glam::Vec3::new(0.0, 0.0, 0.1));
    }

    #[test]
    fn orbit_keeps_distance() {
        let mut camera = Camera::new(1.0);
        let start = camera.eye.distance(camera.target);
        let ctl = CameraController::new(0.2);
        let input = held(&[Key::D]);
        for _ in 0..10 {
            ctl.update_camera(&input, &mut camera);
        }
        assert!((camera.eye.distance(camera.target) - start).abs() < 1e-4);
        assert!(camera.eye.x.abs() > 0.1);
    }

    #[test]
    fn released_keys_stop_motion() {
        let mut camera = Camera::new(1.0);
        let mut input = held(&[Key::S]);
        input.apply_event(&InputEvent::Key {
            key: Key::S,
            state: KeyState::Released,
            repeat: false,
        });
        let before = camera.eye;
        CameraController::new(0.2).update_camera(&input, &mut camera);
        assert_eq!(camera.eye, before);
    }

    #[test]
    fn focus_loss_stops_motion() {
        let mut camera = Camera::new(1.0);
        let mut input = held(&[Key::W, Key::D]);
        input.apply_event(&InputEvent::Focused(false));
        let before = camera.eye;
        CameraController::new(0.2).update_camera(&input, &mut camera);
        assert_eq!(camera.eye, before);
    }

    #[test]
    fn unrelated_keys_do_not_move() {
        let mut camera = Camera::new(1.0);
        let before = camera.eye;
        CameraController::new(0.2).update_camera(&held(&[Key::Space, Key::R]), &mut camera);
        assert_eq!(camera.eye, before);
    }
}
