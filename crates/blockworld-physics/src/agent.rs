use blockworld_geom::{Aabb, Vec3};

use crate::camera::{CameraMode, ViewCamera};
use crate::params::PhysicsParams;
use crate::query::SolidityQuery;

/// A box whose top sits exactly on a cell boundary does not occupy the cell above.
const HEIGHT_EPSILON: f32 = 1e-4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MotionState {
    Grounded,
    Airborne,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MovementDirection {
    Forward,
    Backward,
    Left,
    Right,
}

/// Integer cells covered by the agent's horizontal extent.
#[derive(Copy, Clone, Debug)]
struct Footprint {
    min_x: i32,
    max_x: i32,
    min_z: i32,
    max_z: i32,
}

impl Footprint {
    fn any_solid<Q: SolidityQuery + ?Sized>(&self, world: &Q, y: i32) -> bool {
        (self.min_x..=self.max_x)
            .any(|x| (self.min_z..=self.max_z).any(|z| world.is_solid_at(x, y, z)))
    }
}

/// Box-shaped walker. `position` is the centre of the feet; the box extends
/// `height` upwards and `width`/`depth` around it.
#[derive(Clone, Debug)]
pub struct Agent {
    position: Vec3,
    velocity: Vec3,
    grounded: bool,
    sprinting: bool,
    camera_mode: CameraMode,
    camera: ViewCamera,
    params: PhysicsParams,
}

impl Agent {
    pub fn new(spawn: Vec3) -> Self {
        Self::with_params(spawn, PhysicsParams::default())
    }

    pub fn with_params(spawn: Vec3, params: PhysicsParams) -> Self {
        let mut agent = Self {
            position: spawn,
            velocity: Vec3::ZERO,
            grounded: false,
            sprinting: false,
            camera_mode: CameraMode::FirstPerson,
            camera: ViewCamera::new(spawn),
            params,
        };
        agent.update_camera();
        agent
    }

    /// Advances the agent by `dt` seconds against `world`. Without a world
    /// nothing moves.
    pub fn update<Q>(&mut self, dt: f32, world: Option<&Q>)
    where
        Q: SolidityQuery + ?Sized,
    {
        let Some(world) = world else {
            return;
        };
        self.apply_gravity(dt);
        if self.grounded {
            self.apply_friction(dt);
        }
        self.resolve_collision(world, dt);
        self.update_camera();
    }

    fn apply_gravity(&mut self, dt: f32) {
        if self.grounded {
            return;
        }
        self.velocity.y = (self.velocity.y - self.params.gravity * dt).max(-self.params.terminal_velocity);
    }

    fn apply_friction(&mut self, dt: f32) {
        let k = self.params.friction.scale(dt);
        let eps = self.params.friction_epsilon;
        self.velocity.x *= k;
        self.velocity.z *= k;
        if self.velocity.x.abs() < eps {
            self.velocity.x = 0.0;
        }
        if self.velocity.z.abs() < eps {
            self.velocity.z = 0.0;
        }
    }

    fn footprint(&self, at: Vec3) -> Footprint {
        let hw = self.params.width * 0.5;
        let hd = self.params.depth * 0.5;
        Footprint {
            min_x: (at.x - hw).floor() as i32,
            max_x: (at.x + hw).floor() as i32,
            min_z: (at.z - hd).floor() as i32,
            max_z: (at.z + hd).floor() as i32,
        }
    }

    fn resolve_collision<Q: SolidityQuery + ?Sized>(&mut self, world: &Q, dt: f32) {
        let mut target = self.position + self.velocity * dt;
        let fp = self.footprint(target);
        let was_grounded = self.grounded;
        self.grounded = false;

        if self.velocity.y < 0.0 {
            // Sweep every level between the old and new feet so large steps cannot tunnel.
            let start = self.position.y.floor() as i32 - 1;
            let end = target.y.floor() as i32 - 1;
            let mut check_y = start;
            while check_y >= end {
                if fp.any_solid(world, check_y) {
                    let top = (check_y + 1) as f32;
                    if target.y <= top {
                        target.y = top;
                        self.velocity.y = 0.0;
                        self.grounded = true;
                    }
                    break;
                }
                check_y -= 1;
            }
        } else if self.velocity.y == 0.0 {
            let below = target.y.floor() as i32 - 1;
            if fp.any_solid(world, below) {
                target.y = (below + 1) as f32;
                self.grounded = true;
            }
        }

        if self.velocity.y > 0.0 {
            let head = (target.y + self.params.height).floor() as i32;
            if fp.any_solid(world, head) {
                target.y = head as f32 - self.params.height;
                self.velocity.y = 0.0;
                log::trace!(target: "physics", "ceiling hit at y={}", head);
            }
        }

        // Every cell layer the box overlaps, head included.
        let feet = target.y.floor() as i32;
        let top = (target.y + self.params.height - HEIGHT_EPSILON).floor() as i32;
        let hw = self.params.width * 0.5;
        let hd = self.params.depth * 0.5;
        for y in feet..=top.max(feet) {
            if self.velocity.x != 0.0 {
                let edge = (target.x + hw.copysign(self.velocity.x)).floor() as i32;
                if (fp.min_z..=fp.max_z).any(|z| world.is_solid_at(edge, y, z)) {
                    target.x = self.position.x;
                    self.velocity.x = 0.0;
                }
            }
            if self.velocity.z != 0.0 {
                let edge = (target.z + hd.copysign(self.velocity.z)).floor() as i32;
                if (fp.min_x..=fp.max_x).any(|x| world.is_solid_at(x, y, edge)) {
                    target.z = self.position.z;
                    self.velocity.z = 0.0;
                }
            }
        }

        if self.grounded != was_grounded {
            log::debug!(
                target: "physics",
                "{:?} at ({:.2}, {:.2}, {:.2})",
                self.motion_state(),
                target.x,
                target.y,
                target.z
            );
        }
        self.position = target;
    }

    fn update_camera(&mut self) {
        self.camera.position = match self.camera_mode {
            CameraMode::FirstPerson => self.eye_position(),
            CameraMode::ThirdPerson => {
                let lift = Vec3::new(0.0, self.params.height + self.params.third_person_height, 0.0);
                self.position + lift - self.camera.front() * self.params.third_person_distance
            }
        };
    }

    /// Starts a jump if standing on something.
    pub fn jump(&mut self) {
        if !self.grounded {
            log::debug!(target: "physics", "jump ignored: airborne at y={:.2}", self.position.y);
            return;
        }
        self.velocity.y = self.params.jump_velocity;
        self.grounded = false;
    }

    /// Sets horizontal velocity to walk or sprint speed along the camera's
    /// heading. Vertical velocity is left alone.
    pub fn process_movement(&mut self, direction: MovementDirection, _dt: f32) {
        let front = self.camera.front().flattened().normalized();
        let right = self.camera.right().flattened().normalized();
        let speed = if self.sprinting {
            self.params.sprint_speed
        } else {
            self.params.walk_speed
        };
        let wish = match direction {
            MovementDirection::Forward => front,
            MovementDirection::Backward => -front,
            MovementDirection::Left => -right,
            MovementDirection::Right => right,
        } * speed;
        self.velocity.x = wish.x;
        self.velocity.z = wish.z;
    }

    pub fn process_mouse_movement(&mut self, dx: f32, dy: f32) {
        self.camera.process_mouse_movement(dx, dy);
        self.update_camera();
    }

    pub fn process_mouse_scroll(&mut self, dy: f32) {
        self.camera.process_mouse_scroll(dy);
    }

    pub fn set_sprinting(&mut self, sprinting: bool) {
        self.sprinting = sprinting;
    }

    pub fn toggle_camera_mode(&mut self) {
        self.set_camera_mode(self.camera_mode.toggled());
    }

    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera_mode = mode;
        log::debug!(target: "physics", "camera mode {:?}", mode);
        self.update_camera();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_camera();
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// World-space bounding box, feet at `position.y`.
    pub fn aabb(&self) -> Aabb {
        let p = &self.params;
        let centre = self.position + Vec3::new(0.0, p.height * 0.5, 0.0);
        Aabb::from_center(centre, Vec3::new(p.width, p.height, p.depth))
    }

    pub fn eye_position(&self) -> Vec3 {
        self.position + Vec3::new(0.0, self.params.eye_height, 0.0)
    }

    /// Heading for a body model facing away from the camera.
    pub fn model_yaw(&self) -> f32 {
        self.camera.yaw + 180.0
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn motion_state(&self) -> MotionState {
        if self.grounded {
            MotionState::Grounded
        } else {
            MotionState::Airborne
        }
    }

    #[inline]
    pub fn is_sprinting(&self) -> bool {
        self.sprinting
    }

    #[inline]
    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    #[inline]
    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    #[inline]
    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(y_top: i32) -> impl Fn(i32, i32, i32) -> bool {
        move |_x, y, _z| y < y_top
    }

    #[test]
    fn no_world_is_a_no_op() {
        let mut a = Agent::new(Vec3::new(1.0, 50.0, 1.0));
        a.set_velocity(Vec3::new(1.0, 1.0, 1.0));
        a.update::<fn(i32, i32, i32) -> bool>(0.5, None);
        assert_eq!(a.position(), Vec3::new(1.0, 50.0, 1.0));
        assert_eq!(a.velocity(), Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn terminal_velocity_caps_fall() {
        let mut a = Agent::new(Vec3::new(0.5, 10_000.0, 0.5));
        let void = |_: i32, _: i32, _: i32| false;
        for _ in 0..600 {
            a.update(1.0 / 60.0, Some(&void));
        }
        assert_eq!(a.velocity().y, -50.0);
        assert_eq!(a.motion_state(), MotionState::Airborne);
    }

    #[test]
    fn large_step_cannot_tunnel() {
        let mut a = Agent::new(Vec3::new(0.5, 40.0, 0.5));
        a.set_velocity(Vec3::new(0.0, -50.0, 0.0));
        let floor = flat(10);
        a.update(1.0, Some(&floor));
        assert_eq!(a.position().y, 10.0);
        assert!(a.is_grounded());
        assert_eq!(a.velocity().y, 0.0);
    }

    #[test]
    fn ceiling_stops_rise() {
        let mut a = Agent::new(Vec3::new(0.5, 9.5, 0.5));
        a.set_velocity(Vec3::new(0.0, 4.0, 0.0));
        let world = |_x: i32, y: i32, _z: i32| y < 9 || y == 11;
        a.update(0.1, Some(&world));
        assert!((a.position().y - (11.0 - 1.8)).abs() < 1e-5);
        assert_eq!(a.velocity().y, 0.0);
        assert!(!a.is_grounded());
    }

    #[test]
    fn rising_is_airborne_even_near_ground() {
        let mut a = Agent::new(Vec3::new(0.5, 10.0, 0.5));
        let floor = flat(10);
        a.update(1.0 / 60.0, Some(&floor));
        assert!(a.is_grounded());
        a.jump();
        a.update(1.0 / 60.0, Some(&floor));
        assert!(!a.is_grounded());
        assert!(a.position().y > 10.0);
    }

    #[test]
    fn movement_follows_camera_and_keeps_vertical() {
        let mut a = Agent::new(Vec3::ZERO);
        a.set_velocity(Vec3::new(0.0, -3.0, 0.0));
        a.process_movement(MovementDirection::Forward, 1.0 / 60.0);
        let v = a.velocity();
        assert!(v.x.abs() < 1e-5);
        assert!((v.z + 4.317).abs() < 1e-4);
        assert_eq!(v.y, -3.0);

        a.set_sprinting(true);
        a.process_movement(MovementDirection::Left, 1.0 / 60.0);
        assert!((a.velocity().x + 5.612).abs() < 1e-4);

        // Looking straight down still walks horizontally at full speed.
        a.process_mouse_movement(0.0, -10_000.0);
        a.process_movement(MovementDirection::Backward, 1.0 / 60.0);
        let h = a.velocity().flattened().length();
        assert!((h - 5.612).abs() < 1e-3);
    }

    #[test]
    fn camera_follows_mode() {
        let mut a = Agent::new(Vec3::new(4.0, 20.0, 4.0));
        assert!((a.camera().position - Vec3::new(4.0, 21.62, 4.0)).length() < 1e-5);
        a.toggle_camera_mode();
        assert_eq!(a.camera_mode(), CameraMode::ThirdPerson);
        // Default camera looks down -Z, so the orbit sits behind at +Z.
        let p = a.camera().position;
        assert!((p.y - (20.0 + 1.8 + 2.0)).abs() < 1e-5);
        assert!((p.z - 9.0).abs() < 1e-4);
        a.set_camera_mode(CameraMode::FirstPerson);
        assert_eq!(a.camera().position, a.eye_position());
    }

    #[test]
    fn aabb_spans_feet_to_head() {
        let a = Agent::new(Vec3::new(2.0, 5.0, 3.0));
        let b = a.aabb();
        assert!((b.min.y - 5.0).abs() < 1e-6);
        assert!((b.max.y - 6.8).abs() < 1e-5);
        assert!((b.min.x - 1.7).abs() < 1e-6);
        assert!((b.max.z - 3.3).abs() < 1e-6);
    }
}
