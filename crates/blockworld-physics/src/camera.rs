use blockworld_geom::Vec3;

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
pub const DEFAULT_ZOOM: f32 = 45.0;
const PITCH_LIMIT: f32 = 89.0;
const MIN_ZOOM: f32 = 1.0;
const MAX_ZOOM: f32 = 90.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    FirstPerson,
    ThirdPerson,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
        }
    }
}

/// Look direction and placement of the agent's camera. Angles in degrees.
#[derive(Clone, Debug)]
pub struct ViewCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub zoom: f32,
    pub sensitivity: f32,
}

impl ViewCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: DEFAULT_YAW,
            pitch: DEFAULT_PITCH,
            zoom: DEFAULT_ZOOM,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }

    pub fn front(&self) -> Vec3 {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos()).normalized()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::UP).normalized()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front()).normalized()
    }

    /// Applies a mouse delta. Positive `dy` looks up; pitch stays within ±89°.
    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        self.pitch = (self.pitch + dy * self.sensitivity).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Scrolling up narrows the field of view.
    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.set_zoom(self.zoom - dy);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn default_looks_down_negative_z() {
        let cam = ViewCamera::new(Vec3::ZERO);
        assert!(close(cam.front(), Vec3::new(0.0, 0.0, -1.0)));
        assert!(close(cam.right(), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(cam.up(), Vec3::UP));
    }

    #[test]
    fn pitch_and_zoom_are_clamped() {
        let mut cam = ViewCamera::new(Vec3::ZERO);
        cam.process_mouse_movement(0.0, 10_000.0);
        assert_eq!(cam.pitch, 89.0);
        cam.process_mouse_movement(0.0, -20_000.0);
        assert_eq!(cam.pitch, -89.0);
        cam.process_mouse_movement(100.0, 0.0);
        assert!((cam.yaw - (-80.0)).abs() < 1e-4);

        cam.process_mouse_scroll(100.0);
        assert_eq!(cam.zoom, 1.0);
        cam.process_mouse_scroll(-500.0);
        assert_eq!(cam.zoom, 90.0);
    }

    #[test]
    fn toggling_modes_round_trips() {
        assert_eq!(CameraMode::FirstPerson.toggled(), CameraMode::ThirdPerson);
        assert_eq!(CameraMode::FirstPerson.toggled().toggled(), CameraMode::FirstPerson);
    }
}
