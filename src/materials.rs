use crate::vector::Color;

/// Optical description of a surface.
///
/// `local` is the share of the final color that comes from Phong shading alone, and
/// `index_of_refraction` of `0.0` marks an opaque material.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    ambient: Color,
    diffuse: Color,
    specular: Color,
    shininess: f64,
    local: f64,
    index_of_refraction: f64,
}

/// Split of a shaded color between the local, reflected and refracted parts.
/// The three weights always sum to one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightWeights {
    pub local: f64,
    pub reflection: f64,
    pub refraction: f64,
}

impl Material {
    pub fn new(ambient: Color, diffuse: Color, specular: Color, shininess: f64, local: f64) -> Self {
        Material {
            ambient,
            diffuse,
            specular,
            shininess,
            local,
            index_of_refraction: 0.0,
        }
    }

    pub fn with_index_of_refraction(mut self, index_of_refraction: f64) -> Self {
        self.index_of_refraction = index_of_refraction;
        self
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn diffuse(&self) -> Color {
        self.diffuse
    }

    pub fn specular(&self) -> Color {
        self.specular
    }

    pub fn shininess(&self) -> f64 {
        self.shininess
    }

    pub fn local(&self) -> f64 {
        self.local
    }

    pub fn index_of_refraction(&self) -> f64 {
        self.index_of_refraction
    }

    pub fn reflects(&self) -> bool {
        self.local < 1.0
    }

    pub fn refracts(&self) -> bool {
        self.local < 1.0 && self.index_of_refraction > 0.0
    }

    /// Schlick's approximation of the Fresnel reflectance.
    ///
    /// `cos_i` is `direction . normal` with an outward normal, so it is negative when the
    /// ray enters the material and positive when it leaves. Opaque materials use
    /// `1 - local` as reflectance at normal incidence.
    pub fn reflectivity(&self, cos_i: f64) -> f64 {
        let sign = if cos_i < 0.0 { -1.0 } else { 1.0 };

        let mut r0 = 1.0 - self.local;
        if self.index_of_refraction != 0.0 {
            let n = if sign > 0.0 {
                self.index_of_refraction
            } else {
                1.0 / self.index_of_refraction
            };
            let r0_sqrt = (n - 1.0) / (n + 1.0);
            r0 = r0_sqrt * r0_sqrt;
        }

        r0 + (1.0 - r0) * (1.0 - sign * cos_i).powi(5)
    }

    pub fn weights(&self, cos_i: f64) -> LightWeights {
        if self.refracts() {
            let local = self.local;
            let reflection = self.reflectivity(cos_i);
            let refraction = 1.0 - reflection;
            LightWeights {
                local,
                reflection: reflection * (1.0 - local),
                refraction: refraction * (1.0 - local),
            }
        } else if self.reflects() {
            let reflection = self.reflectivity(cos_i);
            LightWeights {
                local: 1.0 - reflection,
                reflection,
                refraction: 0.0,
            }
        } else {
            LightWeights {
                local: 1.0,
                reflection: 0.0,
                refraction: 0.0,
            }
        }
    }
}

impl LightWeights {
    pub fn total(&self) -> f64 {
        self.local + self.reflection + self.refraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn grey(value: f64) -> Color {
        Color::new(value, value, value)
    }

    fn matte(local: f64) -> Material {
        Material::new(grey(0.3), grey(0.5), grey(1.0), 8.0, local)
    }

    #[test]
    fn classification() {
        let opaque = matte(1.0);
        assert!(!opaque.reflects());
        assert!(!opaque.refracts());

        let mirror = matte(0.1);
        assert!(mirror.reflects());
        assert!(!mirror.refracts());

        let glass = matte(0.2).with_index_of_refraction(1.52);
        assert!(glass.reflects());
        assert!(glass.refracts());

        // A fully local material never refracts, whatever its index
        let painted_glass = matte(1.0).with_index_of_refraction(1.52);
        assert!(!painted_glass.refracts());
    }

    #[test]
    fn opaque_reflectivity_at_normal_incidence_is_one_minus_local() {
        let mirror = matte(0.3);
        assert!(approx_eq(mirror.reflectivity(-1.0), 0.7, 1e-15));
        assert!(approx_eq(mirror.reflectivity(1.0), 0.7, 1e-15));
    }

    #[test]
    fn glass_reflectivity_at_normal_incidence() {
        let glass = matte(0.2).with_index_of_refraction(1.5);
        // ((1.5 - 1) / (1.5 + 1))^2, identical from either side
        assert!(approx_eq(glass.reflectivity(-1.0), 0.04, 1e-12));
        assert!(approx_eq(glass.reflectivity(1.0), 0.04, 1e-12));
    }

    #[test]
    fn reflectivity_reaches_one_at_grazing_angles() {
        let glass = matte(0.2).with_index_of_refraction(1.5);
        assert!(approx_eq(glass.reflectivity(0.0), 1.0, 1e-12));
        assert!(approx_eq(matte(0.6).reflectivity(-0.0), 1.0, 1e-12));
    }

    #[test]
    fn reflectivity_grows_toward_grazing() {
        let glass = matte(0.2).with_index_of_refraction(1.5);
        let mut previous = glass.reflectivity(-1.0);
        for step in 1..=10 {
            let cos_i = -1.0 + step as f64 * 0.1;
            let current = glass.reflectivity(cos_i);
            assert!(current >= previous);
            assert!((0.0..=1.0).contains(&current));
            previous = current;
        }
    }

    #[test]
    fn weights_per_classification() {
        let opaque = matte(1.0).weights(-0.5);
        assert_eq!(
            opaque,
            LightWeights {
                local: 1.0,
                reflection: 0.0,
                refraction: 0.0
            }
        );

        let mirror = matte(0.1);
        let weights = mirror.weights(-1.0);
        assert!(approx_eq(weights.reflection, 0.9, 1e-12));
        assert!(approx_eq(weights.local, 0.1, 1e-12));
        assert_eq!(weights.refraction, 0.0);

        let glass = matte(0.2).with_index_of_refraction(1.5);
        let weights = glass.weights(-1.0);
        assert_eq!(weights.local, 0.2);
        assert!(approx_eq(weights.reflection, 0.8 * 0.04, 1e-12));
        assert!(approx_eq(weights.refraction, 0.8 * 0.96, 1e-12));
    }

    #[test]
    fn weights_are_conserved() {
        let rng = fastrand::Rng::with_seed(3);
        for _ in 0..5000 {
            let local = match rng.u8(0..4) {
                0 => 1.0,
                _ => rng.f64(),
            };
            let ior = match rng.u8(0..3) {
                0 => 0.0,
                _ => 1.0 + rng.f64() * 1.5,
            };
            let material = matte(local).with_index_of_refraction(ior);
            let cos_i = 2.0 * rng.f64() - 1.0;

            let weights = material.weights(cos_i);
            assert!(
                approx_eq(weights.total(), 1.0, 1e-12),
                "weights {:?} for local {} ior {} cos_i {}",
                weights,
                local,
                ior,
                cos_i
            );
        }
    }
}
