use crate::constants::{AIR_INDEX_OF_REFRACTION, AMBIENT_FACTOR, EPSILON, LIGHT_DIRECTION};
use crate::materials::Material;
use crate::primatives::Ray;
use crate::render_objects::{Hittable, Scene};
use crate::vector::{Color, Optics, Vector3};

impl Scene {
    /// Color seen along `ray`.
    ///
    /// `index_of_refraction` is the medium the ray is currently travelling through and
    /// `depth` the number of bounces still allowed. A zero budget yields black.
    pub fn trace_ray(&self, ray: &Ray, index_of_refraction: f64, depth: u32) -> Color {
        if depth == 0 {
            return Color::zero();
        }

        let Some(hit) = self.ray_test(ray) else {
            return self.background_color();
        };

        let material = hit.material;
        let normal = hit.normal;
        let hit_point = ray.point_at(hit.t - EPSILON);

        let reflection = if material.reflects() {
            let reflection_ray = Ray::new(
                hit_point + normal * EPSILON,
                ray.direction.reflection(normal),
            );
            self.trace_ray(&reflection_ray, index_of_refraction, depth - 1)
        } else {
            Color::zero()
        };

        let refraction = if material.refracts() {
            match ray
                .direction
                .refraction(normal, material.index_of_refraction())
            {
                Some(direction) => {
                    // Entering from air starts just inside the surface, leaving starts just outside.
                    let (origin, next_index) = if index_of_refraction == AIR_INDEX_OF_REFRACTION {
                        (
                            hit_point - normal * EPSILON,
                            material.index_of_refraction(),
                        )
                    } else {
                        (hit_point + normal * EPSILON, AIR_INDEX_OF_REFRACTION)
                    };
                    self.trace_ray(&Ray::new(origin, direction), next_index, depth - 1)
                }
                // Total internal reflection
                None => Color::zero(),
            }
        } else {
            Color::zero()
        };

        let local = local_color(material, ray.direction, normal);

        let weights = material.weights(ray.direction.dot(normal));
        local * weights.local + reflection * weights.reflection + refraction * weights.refraction
    }
}

/// Phong shading against the fixed overhead light, clamped to `[0, 1]`.
///
/// The diffuse term is not clamped, so faces pointing away from the light darken
/// the ambient color.
pub fn local_color(material: &Material, direction: Vector3, normal: Vector3) -> Color {
    let diffuse = material.diffuse() * LIGHT_DIRECTION.dot(normal);

    let highlight = LIGHT_DIRECTION
        .dot(direction.reflection(normal))
        .max(0.0);
    let specular = material.specular() * highlight.powf(material.shininess());

    (material.ambient() * AMBIENT_FACTOR + diffuse + specular).clamped_channels(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primatives::Sphere;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn assert_color_eq(actual: Color, expected: Color) {
        assert!(
            approx_eq(actual.x, expected.x, 1e-9)
                && approx_eq(actual.y, expected.y, 1e-9)
                && approx_eq(actual.z, expected.z, 1e-9),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    fn opaque(ambient: Color, diffuse: Color) -> Material {
        Material::new(ambient, diffuse, Color::one(), 8.0, 1.0)
    }

    fn single_sphere_scene(center: Vector3, material: Material, background: Color) -> Scene {
        let mut scene = Scene::new(background);
        scene.add_sphere(Sphere::new(center, 1.0, material));
        scene
    }

    #[test]
    fn zero_budget_is_black() {
        let scene = single_sphere_scene(
            Vector3::new(0.0, 0.0, 5.0),
            opaque(Color::one(), Color::one()),
            Color::new(0.2, 0.4, 0.6),
        );
        let toward = Ray::new(Vector3::zero(), Vector3::unit_z());
        let away = Ray::new(Vector3::zero(), -Vector3::unit_z());

        assert_eq!(scene.trace_ray(&toward, 1.0, 0), Color::zero());
        assert_eq!(scene.trace_ray(&away, 1.0, 0), Color::zero());
    }

    #[test]
    fn miss_returns_background() {
        let background = Color::new(0.2, 0.4, 0.6);
        let scene = single_sphere_scene(
            Vector3::new(0.0, 0.0, 5.0),
            opaque(Color::one(), Color::one()),
            background,
        );
        let ray = Ray::new(Vector3::zero(), -Vector3::unit_z());
        assert_eq!(scene.trace_ray(&ray, 1.0, 3), background);
    }

    #[test]
    fn opaque_hit_is_pure_local_color() {
        let material = opaque(Color::new(0.4, 0.6, 0.8), Color::new(0.5, 0.5, 0.5));
        let scene = single_sphere_scene(Vector3::new(0.0, 0.0, 5.0), material.clone(), Color::zero());
        let ray = Ray::new(Vector3::zero(), Vector3::unit_z());

        let expected = local_color(&material, ray.direction, Vector3::new(0.0, 0.0, -1.0));
        // Normal is perpendicular to the light, so only the ambient half remains
        assert_color_eq(expected, Color::new(0.2, 0.3, 0.4));

        for depth in 1..5 {
            assert_color_eq(scene.trace_ray(&ray, 1.0, depth), expected);
        }
    }

    #[test]
    fn diffuse_term_is_not_clamped_for_faces_away_from_light() {
        // The ray hits the underside of the sphere, whose normal points straight down
        let material = opaque(Color::one(), Color::new(0.2, 0.3, 0.4));
        let scene = single_sphere_scene(Vector3::new(0.0, 5.0, 0.0), material, Color::zero());
        let ray = Ray::new(Vector3::zero(), Vector3::unit_y());

        let color = scene.trace_ray(&ray, 1.0, 1);
        assert_color_eq(color, Color::new(0.3, 0.2, 0.1));
    }

    #[test]
    fn specular_highlight_from_above() {
        // Looking straight down at the top of a sphere reflects straight up into the light
        let material = Material::new(Color::zero(), Color::zero(), Color::new(0.5, 0.5, 0.5), 8.0, 1.0);
        let color = local_color(&material, -Vector3::unit_y(), Vector3::unit_y());
        assert_color_eq(color, Color::new(0.5, 0.5, 0.5));

        // Grazing the side gives no highlight at all
        let color = local_color(&material, Vector3::unit_z(), Vector3::unit_x());
        assert_color_eq(color, Color::zero());
    }

    #[test]
    fn local_color_is_clamped() {
        let material = Material::new(Color::new(4.0, 4.0, 4.0), Color::one(), Color::one(), 8.0, 1.0);
        let color = local_color(&material, -Vector3::unit_y(), Vector3::unit_y());
        assert_color_eq(color, Color::one());
    }

    #[test]
    fn mirror_blends_in_background() {
        // A mirror hit head-on reflects back toward the origin and misses everything
        let background = Color::new(1.0, 0.0, 0.0);
        let mirror = Material::new(Color::zero(), Color::zero(), Color::zero(), 8.0, 0.25);
        let scene = single_sphere_scene(Vector3::new(0.0, 0.0, 5.0), mirror, background);
        let ray = Ray::new(Vector3::zero(), Vector3::unit_z());

        let color = scene.trace_ray(&ray, 1.0, 2);
        // Normal incidence reflectivity of an opaque material is 1 - local
        assert_color_eq(color, Color::new(0.75, 0.0, 0.0));

        // Out of budget for the bounce: the reflected part is black
        let color = scene.trace_ray(&ray, 1.0, 1);
        assert_color_eq(color, Color::zero());
    }

    #[test]
    fn glass_sphere_passes_background_through() {
        let background = Color::new(0.0, 0.0, 1.0);
        let glass = Material::new(Color::zero(), Color::zero(), Color::zero(), 8.0, 0.0)
            .with_index_of_refraction(1.5);
        let scene = single_sphere_scene(Vector3::new(0.0, 0.0, 5.0), glass, background);
        let ray = Ray::new(Vector3::new(0.0, 0.3, 0.0), Vector3::unit_z());

        // Close to normal incidence about 4% reflects back to the background and the rest
        // enters. At the far side about 96% of that leaves toward the background while the
        // internal bounce runs out of budget.
        let color = scene.trace_ray(&ray, 1.0, 3);
        let expected = 0.04 + 0.96 * 0.96;
        assert!(approx_eq(color.z, expected, 1e-5), "got {:?}", color);
        assert!(approx_eq(color.x, 0.0, 1e-12));
    }

    #[test]
    fn total_internal_reflection_adds_no_refracted_light() {
        let background = Color::new(0.0, 0.0, 1.0);
        let glass = Material::new(Color::new(1.0, 0.0, 0.0), Color::zero(), Color::zero(), 8.0, 0.2)
            .with_index_of_refraction(1.5);
        let scene = single_sphere_scene(Vector3::zero(), glass, background);

        // Starting inside, the ray meets the wall at (0, 0.8, 0.6) with cos_i = 0.6,
        // well past the critical angle for 1.5
        let ray = Ray::new(Vector3::new(0.0, 0.8, -0.1), Vector3::unit_z());
        let normal = Vector3::new(0.0, 0.8, 0.6);
        assert!(ray.direction.refraction(normal, 1.5).is_none());

        // The bounce lands on the same sphere, whose local part is ambient * 0.5 * 0.2
        let local = Color::new(0.5, 0.0, 0.0);
        let bounce = local * 0.2;
        let reflectivity = 0.04 + 0.96 * 0.4_f64.powi(5);
        let expected = local * 0.2 + bounce * (reflectivity * 0.8);

        let color = scene.trace_ray(&ray, 1.5, 2);
        assert!(approx_eq(color.x, expected.x, 1e-6), "got {:?}", color);
        assert!(approx_eq(color.y, 0.0, 1e-12));
        // Nothing of the background gets through
        assert!(approx_eq(color.z, 0.0, 1e-12), "got {:?}", color);
    }
}
