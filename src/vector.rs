use ultraviolet::DVec3;

pub type Vector3 = DVec3;

/// Linear RGB, unclamped until it is written to an image.
pub type Color = DVec3;

/// Optics helpers on top of the ultraviolet vector type.
pub trait Optics: Sized {
    /// Mirror `self` about `normal`: `I - 2 (I . N) N`.
    fn reflection(self, normal: Self) -> Self;

    /// Snell refraction of `self` through a surface with index of refraction `ior`.
    ///
    /// A positive `self . normal` means the ray is leaving the medium, so the ratio is
    /// `ior`; otherwise it is entering and the ratio is `1 / ior`. Returns `None` on
    /// total internal reflection.
    fn refraction(self, normal: Self, ior: f64) -> Option<Self>;

    /// Clamp every channel into `[min, max]`. Meant for colors only.
    fn clamped_channels(self, min: f64, max: f64) -> Self;
}

impl Optics for Vector3 {
    fn reflection(self, normal: Vector3) -> Vector3 {
        self - 2.0 * self.dot(normal) * normal
    }

    fn refraction(self, normal: Vector3, ior: f64) -> Option<Vector3> {
        let cos_i = self.dot(normal);
        let sign = if cos_i < 0.0 { -1.0 } else { 1.0 };
        let n = if sign > 0.0 { ior } else { 1.0 / ior };

        let sin_t2 = n * n * (1.0 - cos_i * cos_i);
        if sin_t2 > 1.0 {
            return None;
        }
        Some(self * n - normal * (n * cos_i - sign * (1.0 - sin_t2).sqrt()))
    }

    fn clamped_channels(self, min: f64, max: f64) -> Vector3 {
        self.max_by_component(Vector3::broadcast(min))
            .min_by_component(Vector3::broadcast(max))
    }
}
