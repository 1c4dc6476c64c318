//! Emission profiles: named presets and TOML parsing
//!
//! A profile is an immutable description of one particle effect. All
//! min/max pairs are closed ranges sampled uniformly per spawn; angles are
//! expressed in degrees and converted to radians at spawn time.

use ember_core::Vec2;
use ember_runtime::BlendMode;

/// How a batch of particles is placed when emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmissionMode {
    /// The whole batch spawns at the emission location
    Burst,
    /// The batch is spread evenly along the segment from the previous
    /// emission location to the current one
    Continuous,
}

/// How each particle's acceleration is chosen at spawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AccelerationMode {
    /// Acceleration along the particle's own spawn direction; a negative
    /// magnitude decelerates it
    Aligned { min_magnitude: f32, max_magnitude: f32 },
    /// Acceleration in an independently sampled direction
    NonAligned {
        min_direction_deg: f32,
        max_direction_deg: f32,
        min_magnitude: f32,
        max_magnitude: f32,
    },
}

/// Declarative configuration for one emission profile
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterSettings {
    pub texture: String,
    pub blend_mode: BlendMode,
    pub emission_mode: EmissionMode,
    /// Seconds between bursts, sampled per burst
    pub min_burst_time: f32,
    pub max_burst_time: f32,
    /// Particles per burst, sampled per burst and truncated to an integer
    pub min_count: f32,
    pub max_count: f32,
    pub acceleration: AccelerationMode,
    /// Constant per-step velocity impulse (screen coordinates, y down)
    pub gravity: Vec2,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Spawn direction range in degrees
    pub min_direction_deg: f32,
    pub max_direction_deg: f32,
    /// Angular velocity range in degrees/second
    pub min_angular_velocity_deg: f32,
    pub max_angular_velocity_deg: f32,
    pub min_life_span: f32,
    pub max_life_span: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub min_scale_growth: f32,
    pub max_scale_growth: f32,
}

impl Default for EmitterSettings {
    fn default() -> Self {
        Self {
            texture: String::new(),
            blend_mode: BlendMode::Alpha,
            emission_mode: EmissionMode::Burst,
            min_burst_time: 0.5,
            max_burst_time: 1.0,
            min_count: 4.0,
            max_count: 8.0,
            acceleration: AccelerationMode::Aligned {
                min_magnitude: 0.0,
                max_magnitude: 0.0,
            },
            gravity: Vec2::ZERO,
            min_speed: 20.0,
            max_speed: 100.0,
            min_direction_deg: 0.0,
            max_direction_deg: 360.0,
            min_angular_velocity_deg: 0.0,
            max_angular_velocity_deg: 0.0,
            min_life_span: 1.0,
            max_life_span: 2.0,
            min_scale: 1.0,
            max_scale: 1.0,
            min_scale_growth: 0.0,
            max_scale_growth: 0.0,
        }
    }
}

impl EmitterSettings {
    /// Drifting smoke: sparse upward bursts of slow, long-lived particles
    pub fn smoke() -> Self {
        Self {
            texture: "img/Smoke.png".into(),
            blend_mode: BlendMode::Alpha,
            emission_mode: EmissionMode::Burst,
            min_burst_time: 0.5,
            max_burst_time: 1.0,
            min_count: 4.0,
            max_count: 16.0,
            acceleration: AccelerationMode::NonAligned {
                min_direction_deg: -110.0,
                max_direction_deg: -70.0,
                min_magnitude: 50.0,
                max_magnitude: 50.0,
            },
            gravity: Vec2::ZERO,
            min_speed: 20.0,
            max_speed: 100.0,
            min_direction_deg: -110.0,
            max_direction_deg: -70.0,
            min_angular_velocity_deg: -22.5,
            max_angular_velocity_deg: 22.5,
            min_life_span: 5.0,
            max_life_span: 7.0,
            min_scale: 0.5,
            max_scale: 1.0,
            min_scale_growth: 0.1,
            max_scale_growth: 0.5,
        }
    }

    /// Fireball: one dense radial burst per second, additively blended,
    /// with aligned deceleration that stalls the fragments mid-flight
    pub fn explosion() -> Self {
        Self {
            texture: "img/Explosion.png".into(),
            blend_mode: BlendMode::Additive,
            emission_mode: EmissionMode::Burst,
            min_burst_time: 1.0,
            max_burst_time: 1.0,
            min_count: 50.0,
            max_count: 60.0,
            // Reversed magnitude range, preserved from the tuned effect
            acceleration: AccelerationMode::Aligned {
                min_magnitude: -750.0,
                max_magnitude: -760.0,
            },
            gravity: Vec2::ZERO,
            min_speed: 400.0,
            max_speed: 500.0,
            min_direction_deg: 0.0,
            max_direction_deg: 360.0,
            min_angular_velocity_deg: -90.0,
            max_angular_velocity_deg: 90.0,
            min_life_span: 0.5,
            max_life_span: 1.0,
            min_scale: 0.3,
            max_scale: 1.0,
            min_scale_growth: 0.1,
            max_scale_growth: 0.2,
        }
    }

    /// Falling droplets trailing the pointer: rapid continuous emission
    /// under gravity
    pub fn droplets() -> Self {
        Self {
            texture: "img/Particle.png".into(),
            blend_mode: BlendMode::Alpha,
            emission_mode: EmissionMode::Continuous,
            min_burst_time: 0.05,
            max_burst_time: 0.05,
            min_count: 15.0,
            max_count: 20.0,
            acceleration: AccelerationMode::NonAligned {
                min_direction_deg: 85.0,
                max_direction_deg: 95.0,
                min_magnitude: 3.0,
                max_magnitude: 4.0,
            },
            gravity: Vec2::new(0.0, 9.8),
            min_speed: 50.0,
            max_speed: 100.0,
            min_direction_deg: -135.0,
            max_direction_deg: -45.0,
            min_angular_velocity_deg: 0.0,
            max_angular_velocity_deg: 45.0,
            min_life_span: 2.0,
            max_life_span: 3.0,
            min_scale: 1.0,
            max_scale: 2.0,
            min_scale_growth: 0.5,
            max_scale_growth: 1.0,
        }
    }

    /// Parse a profile from a TOML table, starting from defaults
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut settings = Self::default();

        if let Some(v) = table.get("texture") {
            if let Some(s) = v.as_str() {
                settings.texture = s.to_string();
            }
        }
        if let Some(v) = table.get("blend_mode") {
            settings.blend_mode = match v.as_str().unwrap_or("alpha") {
                "additive" => BlendMode::Additive,
                _ => BlendMode::Alpha,
            };
        }
        if let Some(v) = table.get("emission") {
            settings.emission_mode = match v.as_str().unwrap_or("burst") {
                "continuous" => EmissionMode::Continuous,
                _ => EmissionMode::Burst,
            };
        }
        if let Some(v) = table.get("burst_time_min") {
            settings.min_burst_time = toml_f32(v, settings.min_burst_time);
        }
        if let Some(v) = table.get("burst_time_max") {
            settings.max_burst_time = toml_f32(v, settings.max_burst_time);
        }
        if let Some(v) = table.get("count_min") {
            settings.min_count = toml_f32(v, settings.min_count);
        }
        if let Some(v) = table.get("count_max") {
            settings.max_count = toml_f32(v, settings.max_count);
        }

        // Acceleration mode plus its bounds
        let accel_mode = table
            .get("acceleration")
            .and_then(|v| v.as_str())
            .unwrap_or("aligned");
        let min_magnitude = table
            .get("acceleration_magnitude_min")
            .map(|v| toml_f32(v, 0.0))
            .unwrap_or(0.0);
        let max_magnitude = table
            .get("acceleration_magnitude_max")
            .map(|v| toml_f32(v, 0.0))
            .unwrap_or(0.0);
        let min_direction_deg = table
            .get("acceleration_direction_min")
            .map(|v| toml_f32(v, 0.0))
            .unwrap_or(0.0);
        let max_direction_deg = table
            .get("acceleration_direction_max")
            .map(|v| toml_f32(v, 0.0))
            .unwrap_or(0.0);
        settings.acceleration = match accel_mode {
            "non_aligned" => AccelerationMode::NonAligned {
                min_direction_deg,
                max_direction_deg,
                min_magnitude,
                max_magnitude,
            },
            _ => AccelerationMode::Aligned {
                min_magnitude,
                max_magnitude,
            },
        };

        if let Some(v) = table.get("gravity") {
            settings.gravity = toml_vec2(v, settings.gravity);
        }
        if let Some(v) = table.get("speed_min") {
            settings.min_speed = toml_f32(v, settings.min_speed);
        }
        if let Some(v) = table.get("speed_max") {
            settings.max_speed = toml_f32(v, settings.max_speed);
        }
        if let Some(v) = table.get("direction_min") {
            settings.min_direction_deg = toml_f32(v, settings.min_direction_deg);
        }
        if let Some(v) = table.get("direction_max") {
            settings.max_direction_deg = toml_f32(v, settings.max_direction_deg);
        }
        if let Some(v) = table.get("angular_velocity_min") {
            settings.min_angular_velocity_deg = toml_f32(v, settings.min_angular_velocity_deg);
        }
        if let Some(v) = table.get("angular_velocity_max") {
            settings.max_angular_velocity_deg = toml_f32(v, settings.max_angular_velocity_deg);
        }
        if let Some(v) = table.get("life_span_min") {
            settings.min_life_span = toml_f32(v, settings.min_life_span);
        }
        if let Some(v) = table.get("life_span_max") {
            settings.max_life_span = toml_f32(v, settings.max_life_span);
        }
        if let Some(v) = table.get("scale_min") {
            settings.min_scale = toml_f32(v, settings.min_scale);
        }
        if let Some(v) = table.get("scale_max") {
            settings.max_scale = toml_f32(v, settings.max_scale);
        }
        if let Some(v) = table.get("scale_growth_min") {
            settings.min_scale_growth = toml_f32(v, settings.min_scale_growth);
        }
        if let Some(v) = table.get("scale_growth_max") {
            settings.max_scale_growth = toml_f32(v, settings.max_scale_growth);
        }

        settings
    }
}

/// Named preset profiles, cycled by the world's "next" control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Smoke,
    Explosion,
    Droplets,
}

impl Preset {
    /// Fixed cycle order: Explosion → Droplets → Smoke → Explosion
    pub fn next(self) -> Self {
        match self {
            Preset::Explosion => Preset::Droplets,
            Preset::Droplets => Preset::Smoke,
            Preset::Smoke => Preset::Explosion,
        }
    }

    pub fn settings(self) -> EmitterSettings {
        match self {
            Preset::Smoke => EmitterSettings::smoke(),
            Preset::Explosion => EmitterSettings::explosion(),
            Preset::Droplets => EmitterSettings::droplets(),
        }
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value, default: Vec2) -> Vec2 {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return Vec2::new(toml_f32(&arr[0], default.x), toml_f32(&arr[1], default.y));
        }
    }
    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_growth_bounds_are_independent() {
        // The hand-tuned source this profile came from collapsed both scale
        // growth bounds to the minimum; the intended range is 0.1..0.5.
        let smoke = EmitterSettings::smoke();
        assert!((smoke.min_scale_growth - 0.1).abs() < 1e-6);
        assert!((smoke.max_scale_growth - 0.5).abs() < 1e-6);
        assert_ne!(smoke.min_scale_growth, smoke.max_scale_growth);
    }

    #[test]
    fn explosion_keeps_reversed_magnitude_range() {
        let explosion = EmitterSettings::explosion();
        match explosion.acceleration {
            AccelerationMode::Aligned {
                min_magnitude,
                max_magnitude,
            } => {
                assert!((min_magnitude - -750.0).abs() < 1e-6);
                assert!((max_magnitude - -760.0).abs() < 1e-6);
            }
            _ => panic!("explosion acceleration must be aligned"),
        }
        assert_eq!(explosion.blend_mode, BlendMode::Additive);
    }

    #[test]
    fn droplets_is_continuous_under_gravity() {
        let droplets = EmitterSettings::droplets();
        assert_eq!(droplets.emission_mode, EmissionMode::Continuous);
        assert!((droplets.gravity.y - 9.8).abs() < 1e-6);
        assert!(matches!(
            droplets.acceleration,
            AccelerationMode::NonAligned { .. }
        ));
    }

    #[test]
    fn preset_cycle_order() {
        assert_eq!(Preset::Explosion.next(), Preset::Droplets);
        assert_eq!(Preset::Droplets.next(), Preset::Smoke);
        assert_eq!(Preset::Smoke.next(), Preset::Explosion);
        // Three steps return to the start
        assert_eq!(Preset::Explosion.next().next().next(), Preset::Explosion);
    }

    #[test]
    fn parse_from_toml() {
        let toml_str = r#"
texture = "img/Sparks.png"
blend_mode = "additive"
emission = "continuous"
burst_time_min = 0.1
burst_time_max = 0.3
count_min = 10
count_max = 20
acceleration = "non_aligned"
acceleration_direction_min = 80.0
acceleration_direction_max = 100.0
acceleration_magnitude_min = 2.0
acceleration_magnitude_max = 5.0
gravity = [0, 9.8]
speed_min = 50
speed_max = 120
life_span_min = 1.5
life_span_max = 2.5
scale_growth_min = 0.2
scale_growth_max = 0.4
"#;
        let table: toml::value::Table = toml::from_str(toml_str).unwrap();
        let settings = EmitterSettings::from_toml(&table);

        assert_eq!(settings.texture, "img/Sparks.png");
        assert_eq!(settings.blend_mode, BlendMode::Additive);
        assert_eq!(settings.emission_mode, EmissionMode::Continuous);
        assert!((settings.min_burst_time - 0.1).abs() < 1e-6);
        assert!((settings.min_count - 10.0).abs() < 1e-6);
        match settings.acceleration {
            AccelerationMode::NonAligned {
                min_direction_deg,
                max_direction_deg,
                min_magnitude,
                max_magnitude,
            } => {
                assert!((min_direction_deg - 80.0).abs() < 1e-6);
                assert!((max_direction_deg - 100.0).abs() < 1e-6);
                assert!((min_magnitude - 2.0).abs() < 1e-6);
                assert!((max_magnitude - 5.0).abs() < 1e-6);
            }
            _ => panic!("expected non-aligned acceleration"),
        }
        // Integer/float coercion: gravity = [0, 9.8] mixes both
        assert!(settings.gravity.x.abs() < 1e-6);
        assert!((settings.gravity.y - 9.8).abs() < 1e-6);
        assert!((settings.min_speed - 50.0).abs() < 1e-6);
        assert!((settings.min_scale_growth - 0.2).abs() < 1e-6);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let table: toml::value::Table = toml::from_str("texture = \"img/X.png\"").unwrap();
        let settings = EmitterSettings::from_toml(&table);
        let defaults = EmitterSettings::default();
        assert_eq!(settings.texture, "img/X.png");
        assert_eq!(settings.emission_mode, defaults.emission_mode);
        assert!((settings.min_burst_time - defaults.min_burst_time).abs() < 1e-6);
    }
}
