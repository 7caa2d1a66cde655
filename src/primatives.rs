use crate::materials::Material;
use crate::vector::Vector3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Ray { origin, direction }
    }

    pub fn point_at(&self, t: f64) -> Vector3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sphere {
    pub center: Vector3,
    pub radius: f64,
    pub material: Material,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f64, material: Material) -> Self {
        Sphere {
            center,
            radius,
            material,
        }
    }

    /// Distance along `ray` to the nearest non-negative hit, if any.
    ///
    /// A sphere whose center projects behind the ray origin is never hit, even when the
    /// origin lies inside it. From inside, the far root is returned.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let dist = self.center - ray.origin;
        let projection = dist.dot(ray.direction);
        if projection < 0.0 {
            return None;
        }

        // Squared distance from the center to the ray line
        let perpendicular_sq = dist.mag_sq() - projection * projection;
        let radius_sq = self.radius * self.radius;
        if perpendicular_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - perpendicular_sq).sqrt();
        let t = projection - half_chord;
        if t < 0.0 {
            Some(projection + half_chord)
        } else {
            Some(t)
        }
    }

    pub fn normal(&self, pos: Vector3) -> Vector3 {
        (pos - self.center).normalized()
    }
}
