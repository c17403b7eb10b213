use serde::{Deserialize, Serialize};

/// Horizontal damping applied while grounded.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FrictionModel {
    /// Multiply by `factor` once per update, regardless of `dt`.
    PerTick { factor: f32 },
    /// Multiply by `per_second.powf(dt)`; independent of the tick rate.
    Exponential { per_second: f32 },
}

impl FrictionModel {
    /// Damping multiplier for one update of length `dt`.
    #[inline]
    pub fn scale(&self, dt: f32) -> f32 {
        match *self {
            FrictionModel::PerTick { factor } => factor,
            FrictionModel::Exponential { per_second } => per_second.powf(dt),
        }
    }

    /// Exponential model matching a per-tick `factor` at `hz` updates per second.
    pub fn exponential_from_tick(factor: f32, hz: f32) -> Self {
        FrictionModel::Exponential {
            per_second: factor.powf(hz),
        }
    }
}

impl Default for FrictionModel {
    fn default() -> Self {
        Self::exponential_from_tick(PhysicsParams::GROUND_FRICTION, 60.0)
    }
}

/// Tunables for [`crate::Agent`]. Distances in blocks, times in seconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    pub eye_height: f32,
    /// Downward acceleration (positive).
    pub gravity: f32,
    pub jump_velocity: f32,
    pub walk_speed: f32,
    pub sprint_speed: f32,
    pub terminal_velocity: f32,
    pub friction: FrictionModel,
    /// Horizontal speeds below this snap to zero while grounded.
    pub friction_epsilon: f32,
    pub third_person_distance: f32,
    pub third_person_height: f32,
}

impl PhysicsParams {
    pub const GROUND_FRICTION: f32 = 0.9;
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            width: 0.6,
            height: 1.8,
            depth: 0.6,
            eye_height: 1.62,
            gravity: 20.0,
            jump_velocity: 4.0,
            walk_speed: 4.317,
            sprint_speed: 5.612,
            terminal_velocity: 50.0,
            friction: FrictionModel::default(),
            friction_epsilon: 0.01,
            third_person_distance: 5.0,
            third_person_height: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_agree_at_sixty_hz() {
        let tick = FrictionModel::PerTick { factor: 0.9 };
        let exp = FrictionModel::default();
        let dt = 1.0 / 60.0;
        assert!((tick.scale(dt) - exp.scale(dt)).abs() < 1e-4);
        // Exponential damping over one second is the same at any tick rate.
        let at_30 = exp.scale(1.0 / 30.0).powi(30);
        let at_120 = exp.scale(1.0 / 120.0).powi(120);
        assert!((at_30 - at_120).abs() < 1e-4);
    }

    #[test]
    fn per_tick_ignores_dt() {
        let tick = FrictionModel::PerTick { factor: 0.9 };
        assert_eq!(tick.scale(1.0 / 60.0), 0.9);
        assert_eq!(tick.scale(0.5), 0.9);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let p: PhysicsParams = toml::from_str(
            r#"
            gravity = 10.0
            [friction]
            kind = "per_tick"
            factor = 0.8
        "#,
        )
        .unwrap();
        assert_eq!(p.gravity, 10.0);
        assert_eq!(p.friction, FrictionModel::PerTick { factor: 0.8 });
        assert_eq!(p.walk_speed, PhysicsParams::default().walk_speed);
    }
}
