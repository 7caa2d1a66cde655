use log::debug;

use crate::primatives::{Ray, Sphere};
use crate::vector::Color;

use super::{Hittable, Intersection};

/// Spheres plus the color seen where nothing is hit. Built once, then read-only while rendering.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    background: Color,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Scene {
            spheres: Vec::new(),
            background,
        }
    }

    pub fn add_sphere(&mut self, sphere: Sphere) {
        debug!(
            "Adding sphere at ({:.3}, {:.3}, {:.3}) r={:.3}",
            sphere.center.x, sphere.center.y, sphere.center.z, sphere.radius
        );
        self.spheres.push(sphere);
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn background_color(&self) -> Color {
        self.background
    }
}

impl Hittable for Scene {
    /// Closest hit over every sphere. On equal `t` the earlier sphere wins.
    fn ray_test(&self, ray: &Ray) -> Option<Intersection<'_>> {
        let mut hit: Option<Intersection> = None;

        for sphere in self.spheres.iter() {
            let Some(new_hit) = sphere.ray_test(ray) else {
                continue;
            };
            match hit {
                Some(Intersection { t, .. }) if t <= new_hit.t => {}
                _ => hit = Some(new_hit),
            }
        }
        hit
    }
}
