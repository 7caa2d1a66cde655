use log::debug;

use crate::primatives::Ray;
use crate::vector::Vector3;

/// Pinhole camera. `fov` is the full vertical opening angle in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub eye: Vector3,
    pub look_at: Vector3,
    pub up: Vector3,
    pub fov: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Camera {
            eye: Vector3::new(0.0, 1.0, -5.0),
            look_at: Vector3::zero(),
            up: Vector3::unit_y(),
            fov: 60.0,
        }
    }
}

/// Per-image vectors for turning pixel coordinates into primary rays.
#[derive(Clone, Debug)]
pub struct RaySetup {
    origin: Vector3,
    top_left: Vector3,
    step_x: Vector3,
    step_y: Vector3,
}

impl Camera {
    pub fn view_dir(&self) -> Vector3 {
        (self.look_at - self.eye).normalized()
    }

    pub fn ray_setup(&self, width: u32, height: u32) -> RaySetup {
        let forward = self.view_dir();
        let right = (-forward.cross(self.up)).normalized();
        let up = forward.cross(right);

        let half_extent = (self.fov.to_radians() / 2.0).tan();
        let aspect_ratio = width as f64 / height as f64;

        let row = right * 2.0 * half_extent * aspect_ratio;
        let column = up * 2.0 * half_extent;

        let setup = RaySetup {
            origin: self.eye,
            top_left: forward - (row - column) * 0.5,
            step_x: row / width as f64,
            step_y: -column / height as f64,
        };
        debug!("Ray setup for {}x{}: {:?}", width, height, setup);
        setup
    }
}

impl RaySetup {
    /// Primary ray through the top-left corner of pixel `(x, y)`.
    pub fn compute_ray(&self, x: u32, y: u32) -> Ray {
        let direction = self.top_left + self.step_x * x as f64 + self.step_y * y as f64;
        Ray::new(self.origin, direction.normalized())
    }
}
