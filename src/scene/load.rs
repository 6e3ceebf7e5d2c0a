//! YAML scene files.
//!
//! All serde-facing config types are private to this module and converted
//! into domain types by hand, which keeps the file format decoupled from the
//! simulation structs (only geom derives its bindings directly, since a
//! 2-tuple of floats is about as stable as formats get). Material names are
//! resolved here too, so a bad scene file fails at load time.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{
    anyhow,
    Context,
};
use serde::Deserialize;

use crate::geom::Point2;
use crate::material::Cauchy;
use crate::scene::{
    Emitter,
    Scene,
};
use crate::surfaces;

/// Load a scene and its ray emitter from the given path.
///
/// Material names are resolved against the preset table here, so an unknown
/// material fails the load before any tracing begins.
pub fn load_scene<P: AsRef<Path>>(path: P) -> anyhow::Result<(Scene, Emitter)> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let config = serde_yaml::from_reader::<_, Config>(reader)?;
    build(config)
}

fn build(config: Config) -> anyhow::Result<(Scene, Emitter)> {
    if config.scene.surfaces.is_empty() {
        return Err(anyhow!("scene is empty"));
    }

    let mut builder = Scene::builder();
    for surface in &config.scene.surfaces {
        match surface {
            Surface::Segment { endpoints } => {
                let (a, b) = endpoints;
                builder.add(surfaces::Segment::new(*a, *b));
            }
            Surface::Prism { vertices, material } => {
                let coefficients = Cauchy::lookup(material)
                    .with_context(|| format!("resolve prism material '{material}'"))?;
                let (v1, v2, v3) = vertices;
                builder.add(surfaces::Prism::new(*v1, *v2, *v3, coefficients));
            }
        }
    }

    let emitter = Emitter {
        origin: config.ray.origin,
        angle: config.ray.angle,
    };
    Ok((builder.build(), emitter))
}

#[derive(Deserialize, Debug)]
struct Config {
    scene: SceneConfig,
    ray: RayConfig,
}

#[derive(Deserialize, Debug)]
struct SceneConfig {
    surfaces: Vec<Surface>,
}

#[derive(Deserialize, Debug)]
struct RayConfig {
    origin: Point2,
    /// Incidence angle in degrees from the positive x-axis.
    angle: f64,
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "camelCase")]
enum Surface {
    Segment {
        endpoints: (Point2, Point2),
    },
    Prism {
        vertices: (Point2, Point2, Point2),
        material: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
scene:
  surfaces:
    - type: prism
      vertices: [[400, 200], [500, 373.2], [300, 373.2]]
      material: BK7
    - type: segment
      endpoints: [[0, 500], [800, 500]]
ray:
  origin: [80, 300]
  angle: -10
";

    fn parse(contents: &str) -> anyhow::Result<(Scene, Emitter)> {
        build(serde_yaml::from_str::<Config>(contents).unwrap())
    }

    #[test]
    fn load_example_scene() {
        let (scene, emitter) = parse(EXAMPLE).unwrap();

        assert_eq!(emitter.angle, -10.0);
        assert_eq!(emitter.origin.x(), 80.0);

        // The prism is actually there: the demo ray enters it.
        let path = scene.trace(emitter.ray(380.0), 50).unwrap();
        assert!(path.len() > 1);
    }

    #[test]
    fn unknown_material_fails_before_tracing() {
        let contents = EXAMPLE.replace("BK7", "Adamantium");
        let err = parse(&contents).unwrap_err();
        assert!(
            err.to_string().contains("Adamantium"),
            "unexpected error: {:#}",
            err
        );
    }

    #[test]
    fn empty_scene_is_an_error() {
        let contents = "\
scene:
  surfaces: []
ray:
  origin: [0, 0]
  angle: 0
";
        let err = parse(contents).unwrap_err();
        assert_eq!(err.to_string(), "scene is empty");
    }
}
