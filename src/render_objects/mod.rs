use crate::primatives::{Ray, Sphere};
use crate::vector::Vector3;

pub use self::hitable::{Hittable, Intersection};
pub use self::scene::Scene;

pub mod hitable;
pub mod scene;

impl Hittable for Sphere {
    fn ray_test(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let t: f64 = self.intersect(ray)?;

        let pos: Vector3 = ray.point_at(t);
        let normal: Vector3 = self.normal(pos);

        Some(Intersection {
            t,
            normal,
            material: &self.material,
        })
    }
}
