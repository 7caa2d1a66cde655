use crate::{materials::Material, primatives::Ray, vector::Vector3};

pub trait Hittable {
    fn ray_test(&self, ray: &Ray) -> Option<Intersection<'_>>;
}

/// A ray hit, borrowed from the object that was struck.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    /// Unit length, pointing away from the object.
    pub normal: Vector3,
    pub material: &'a Material,
}
