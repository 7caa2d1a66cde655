use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use serde::Deserialize;

use crate::camera::Camera;
use crate::error::{Error, Result};
use crate::materials::Material;
use crate::primatives::Sphere;
use crate::render_objects::Scene;
use crate::vector::Vector3;

/// Scene rendered when no `--scene` file is given.
pub const DEFAULT_SCENE: &str = include_str!("../scenes/spheres.json");

#[derive(Parser, Debug)]
#[clap(about = "Whitted-style sphere ray tracer with reflection and refraction")]
pub struct CliArguments {
    #[clap(short = 'w', long, default_value = "800")]
    pub width: u32,

    #[clap(short = 'H', long, default_value = "500")]
    pub height: u32,

    /// Maximum number of reflection/refraction bounces
    #[clap(short = 'd', long, default_value = "9")]
    pub depth: u32,

    #[clap(short = 'o', long, default_value = "render.png")]
    pub output: PathBuf,

    /// JSON scene description, the built-in scene is used when omitted
    #[clap(short = 's', long)]
    pub scene: Option<PathBuf>,

    /// Vertical field of view in degrees, overrides the scene camera
    #[clap(long)]
    pub fov: Option<f64>,

    /// Periodically write the partially rendered image
    #[clap(long, action)]
    pub incremental: bool,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub background: [f64; 3],
    #[serde(default)]
    pub camera: Option<CameraDescription>,
    pub materials: HashMap<String, MaterialDescription>,
    pub spheres: Vec<SphereDescription>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct CameraDescription {
    pub eye: [f64; 3],
    pub look_at: [f64; 3],
    #[serde(default = "default_up")]
    pub up: [f64; 3],
    #[serde(default = "default_fov")]
    pub fov: f64,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct MaterialDescription {
    pub ambient: [f64; 3],
    pub diffuse: [f64; 3],
    pub specular: [f64; 3],
    pub shininess: f64,
    pub local: f64,
    /// 0 means the material does not refract.
    #[serde(default)]
    pub ior: f64,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct SphereDescription {
    pub center: [f64; 3],
    pub radius: f64,
    pub material: String,
}

fn default_up() -> [f64; 3] {
    [0.0, 1.0, 0.0]
}

fn default_fov() -> f64 {
    Camera::default().fov
}

fn vector(v: [f64; 3]) -> Vector3 {
    Vector3::new(v[0], v[1], v[2])
}

fn is_finite(v: [f64; 3]) -> bool {
    v.iter().all(|c| c.is_finite())
}

impl SceneDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn camera(&self) -> Result<Camera> {
        let Some(description) = self.camera.as_ref() else {
            return Ok(Camera::default());
        };
        let camera = Camera {
            eye: vector(description.eye),
            look_at: vector(description.look_at),
            up: vector(description.up),
            fov: description.fov,
        };
        validate_camera(&camera)?;
        Ok(camera)
    }

    /// Check every material and sphere and assemble the scene.
    pub fn build_scene(&self) -> Result<Scene> {
        if !is_finite(self.background) {
            return Err(Error::InvalidBackground);
        }

        let mut materials: HashMap<&str, Material> = HashMap::with_capacity(self.materials.len());
        for (name, description) in self.materials.iter() {
            materials.insert(name.as_str(), description.build(name)?);
        }

        let mut scene = Scene::new(vector(self.background));
        for (index, sphere) in self.spheres.iter().enumerate() {
            if !is_finite(sphere.center) {
                return Err(Error::InvalidSphere {
                    index,
                    reason: "center must be finite",
                });
            }
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(Error::InvalidSphere {
                    index,
                    reason: "radius must be positive",
                });
            }
            let material = materials
                .get(sphere.material.as_str())
                .ok_or_else(|| Error::UnknownMaterial {
                    sphere: index,
                    material: sphere.material.clone(),
                })?;
            scene.add_sphere(Sphere::new(
                vector(sphere.center),
                sphere.radius,
                material.clone(),
            ));
        }
        Ok(scene)
    }
}

impl MaterialDescription {
    fn build(&self, name: &str) -> Result<Material> {
        let invalid = |reason: &'static str| Error::InvalidMaterial {
            name: name.to_string(),
            reason,
        };

        if !(is_finite(self.ambient) && is_finite(self.diffuse) && is_finite(self.specular)) {
            return Err(invalid("colors must be finite"));
        }
        if !(self.shininess.is_finite() && self.shininess > 0.0) {
            return Err(invalid("shininess must be positive"));
        }
        if !(0.0..=1.0).contains(&self.local) {
            return Err(invalid("local must lie in [0, 1]"));
        }
        if !(self.ior.is_finite() && self.ior >= 0.0) {
            return Err(invalid("ior must not be negative"));
        }

        Ok(Material::new(
            vector(self.ambient),
            vector(self.diffuse),
            vector(self.specular),
            self.shininess,
            self.local,
        )
        .with_index_of_refraction(self.ior))
    }
}

pub fn validate_camera(camera: &Camera) -> Result<()> {
    let finite = |v: Vector3| v.x.is_finite() && v.y.is_finite() && v.z.is_finite();
    if !(finite(camera.eye) && finite(camera.look_at) && finite(camera.up)) {
        return Err(Error::InvalidCamera("vectors must be finite"));
    }
    if (camera.look_at - camera.eye).mag_sq() == 0.0 {
        return Err(Error::InvalidCamera("eye and look_at must differ"));
    }
    if camera.view_dir().cross(camera.up).mag_sq() == 0.0 {
        return Err(Error::InvalidCamera("up must not be parallel to the view direction"));
    }
    if !(camera.fov > 0.0 && camera.fov < 180.0) {
        return Err(Error::InvalidCamera("fov must lie in (0, 180) degrees"));
    }
    Ok(())
}

/// Scene and camera for this run, honouring the command line overrides.
pub fn load(args: &CliArguments) -> Result<(Scene, Camera)> {
    let description = match args.scene.as_deref() {
        Some(path) => {
            info!("Loading scene \"{}\"", path.display());
            SceneDescription::load(path)?
        }
        None => {
            info!("Using built-in scene");
            SceneDescription::from_json(DEFAULT_SCENE)?
        }
    };

    let scene = description.build_scene()?;
    let mut camera = description.camera()?;
    if let Some(fov) = args.fov {
        camera.fov = fov;
        validate_camera(&camera)?;
    }

    info!(
        "Scene ready: {} spheres, {} materials",
        scene.spheres().len(),
        description.materials.len()
    );
    Ok((scene, camera))
}
