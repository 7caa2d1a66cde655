use ultraviolet::DVec3;

/// Offset used to step secondary rays off a surface so they do not re-hit it.
pub const EPSILON: f64 = 0.0001;

pub const AIR_INDEX_OF_REFRACTION: f64 = 1.0;

/// Scale applied to a material's ambient color in the local Phong term.
pub const AMBIENT_FACTOR: f64 = 0.5;

/// Stand-in direction of the single light used for local shading.
pub const LIGHT_DIRECTION: DVec3 = DVec3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};
