use crate::geom::{
    Point2,
    Vec2,
    EPSILON,
};
use crate::material::refract_or_reflect;
use crate::surfaces::Surface;
use crate::trace::Hit;
use crate::trace::Hittable;
use crate::trace::Ray;

pub mod example;
mod load;

pub use load::load_scene;

/// How far past a hit point the next leg's origin is nudged, along the old
/// direction, to avoid re-hitting the boundary that was just crossed.
const ORIGIN_BIAS: f64 = 0.01;

/// Default cap on accepted hits per trace.
pub const DEFAULT_MAX_BOUNCES: usize = 50;

#[derive(Debug, Clone)]
pub struct Scene {
    surfaces: Vec<Surface>,
}

impl Scene {
    pub fn builder() -> SceneBuilder {
        SceneBuilder {
            surfaces: Vec::new(),
        }
    }

    /// The hit with globally smallest `t` across all surfaces, if any.
    ///
    /// Exact ties are broken by insertion order: the first surface added
    /// wins. Real floating-point ties are measure-zero, so this only
    /// pins down otherwise-unobservable behavior.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        for surface in &self.surfaces {
            if let Some(hit) = surface.intersect(ray) {
                if closest.as_ref().map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }
        closest
    }

    /// Follow `ray` through the scene, returning the ordered path of legs
    /// it travels.
    ///
    /// Each accepted hit finalizes the current leg at the hit distance and
    /// starts a new leg in the refracted (or, under total internal
    /// reflection, mirrored) direction. The final leg keeps an infinite
    /// distance, meaning it escaped the scene.
    ///
    /// A pathological scene could bounce forever, so accepted hits are
    /// capped at `max_bounces`; exceeding the cap is an error rather than
    /// a hang.
    pub fn trace(&self, ray: Ray, max_bounces: usize) -> Result<Vec<Ray>, MaxBouncesExceeded> {
        let mut path = Vec::new();
        let mut current = ray;
        let mut bounces = 0;
        loop {
            // Reject hits closer than EPSILON: those are self-intersections
            // at the previous hit point.
            let candidate = self
                .intersect(&current)
                .filter(|hit| hit.t > EPSILON && hit.t < current.distance());
            let hit = match candidate {
                Some(hit) => hit,
                None => {
                    // Terminal leg, travels to infinity.
                    path.push(current);
                    return Ok(path);
                }
            };
            bounces += 1;
            if bounces > max_bounces {
                return Err(MaxBouncesExceeded { max_bounces });
            }

            let finished = current.resolved(hit.t);
            let deflected = refract_or_reflect(
                finished.dir(),
                hit.normal,
                finished.medium_index(),
                hit.medium_index,
            );
            // Under total internal reflection the ray never crosses the
            // boundary, so it keeps its current medium.
            let next_index = if deflected.total_internal_reflection {
                finished.medium_index()
            } else {
                hit.medium_index
            };
            let origin = hit.point + finished.dir() * ORIGIN_BIAS;
            current = Ray::with_medium(origin, deflected.dir, finished.wavelength(), next_index);
            path.push(finished);
        }
    }
}

pub struct SceneBuilder {
    surfaces: Vec<Surface>,
}

impl SceneBuilder {
    pub fn add<S>(&mut self, surface: S)
    where
        S: Into<Surface>,
    {
        self.surfaces.push(surface.into());
    }

    pub fn build(self) -> Scene {
        Scene {
            surfaces: self.surfaces,
        }
    }
}

/// Where and how rays are launched into the scene.
///
/// One ray per sampled wavelength starts here; the incidence angle is
/// measured in degrees from the positive x-axis.
#[derive(Debug, Clone, Copy)]
pub struct Emitter {
    pub origin: Point2,
    pub angle: f64,
}

impl Emitter {
    pub fn ray(&self, wavelength: f64) -> Ray {
        let dir = Vec2::from_angle(self.angle.to_radians());
        Ray::new(self.origin, dir, wavelength)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MaxBouncesExceeded {
    pub max_bounces: usize,
}

impl ::std::error::Error for MaxBouncesExceeded {}

impl ::std::fmt::Display for MaxBouncesExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ray exceeded the maximum of {} bounces",
            self.max_bounces
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{
        Cauchy,
        AIR_INDEX,
    };
    use crate::surfaces::{
        Prism,
        Segment,
    };

    const EPS: f64 = 1e-6;

    /// The demo prism: an equilateral-ish triangle sitting under the ray.
    fn prism_scene() -> Scene {
        let mut builder = Scene::builder();
        builder.add(Prism::new(
            Point2::new(400.0, 200.0),
            Point2::new(500.0, 373.2),
            Point2::new(300.0, 373.2),
            Cauchy::lookup("BK7").unwrap(),
        ));
        builder.build()
    }

    fn emitter() -> Emitter {
        Emitter {
            origin: Point2::new(80.0, 300.0),
            angle: -10.0,
        }
    }

    #[test]
    fn empty_scene_yields_a_single_escaping_leg() {
        let scene = Scene::builder().build();
        let path = scene.trace(emitter().ray(550.0), 50).unwrap();
        assert_eq!(path.len(), 1);
        assert!(path[0].distance().is_infinite());
    }

    #[test]
    fn prism_scenario_refracts_twice() {
        let scene = prism_scene();
        let path = scene.trace(emitter().ray(380.0), 50).unwrap();

        // Entry and exit refractions, then escape.
        assert_eq!(path.len(), 3);
        assert!(path[0].distance().is_finite());
        assert!(path[1].distance().is_finite());
        assert!(path[2].distance().is_infinite());

        // Media along the path: air, glass, air. A reflection would have
        // kept the medium, so this also asserts zero reflections.
        let glass = Cauchy::lookup("BK7").unwrap().index_at(380.0);
        assert!((glass - 1.53393).abs() < 1e-5);
        assert_eq!(path[0].medium_index(), AIR_INDEX);
        assert!((path[1].medium_index() - glass).abs() < EPS);
        assert_eq!(path[2].medium_index(), AIR_INDEX);
    }

    #[test]
    fn emitted_legs_have_unit_directions() {
        let scene = prism_scene();
        let path = scene.trace(emitter().ray(380.0), 50).unwrap();
        for leg in &path {
            assert!(
                (leg.dir().length() - 1.0).abs() < EPS,
                "non-unit direction {}",
                leg.dir()
            );
        }
    }

    #[test]
    fn entry_refraction_obeys_snells_law() {
        let scene = prism_scene();
        let path = scene.trace(emitter().ray(380.0), 50).unwrap();
        assert!(path.len() >= 2);

        // Normal of the face the ray enters through, oriented against it.
        let (v1, v3) = (Point2::new(400.0, 200.0), Point2::new(300.0, 373.2));
        let edge = v1 - v3;
        let mut normal = Vec2::new(-edge.y(), edge.x()).unit();
        if normal.dot(&path[0].dir()) > 0.0 {
            normal = -normal;
        }

        let cos1 = -path[0].dir().dot(&normal);
        let cos2 = -path[1].dir().dot(&normal);
        let sin1 = (1.0 - cos1 * cos1).sqrt();
        let sin2 = (1.0 - cos2 * cos2).sqrt();
        let n1 = path[0].medium_index();
        let n2 = path[1].medium_index();
        assert!(
            (n1 * sin1 - n2 * sin2).abs() < EPS,
            "n1 sin θ1 = {}, n2 sin θ2 = {}",
            n1 * sin1,
            n2 * sin2
        );
    }

    #[test]
    fn traces_terminate_across_the_sweep_range() {
        let scene = prism_scene();
        for angle in (-25..=25).step_by(5) {
            let emitter = Emitter {
                origin: Point2::new(80.0, 300.0),
                angle: angle as f64,
            };
            let path = scene
                .trace(emitter.ray(380.0), 8)
                .unwrap_or_else(|e| panic!("angle {}: {}", angle, e));
            assert!(path.len() <= 6, "angle {} bounced {} legs", angle, path.len());
            assert!(path.last().unwrap().distance().is_infinite());
        }
    }

    #[test]
    fn bounce_cap_is_an_error_not_a_hang() {
        let scene = prism_scene();
        let err = scene.trace(emitter().ray(380.0), 1).unwrap_err();
        assert_eq!(err.max_bounces, 1);
        assert_eq!(err.to_string(), "ray exceeded the maximum of 1 bounces");
    }

    #[test]
    fn bare_segment_refracts_into_air_undeviated() {
        let mut builder = Scene::builder();
        builder.add(Segment::new(
            Point2::new(200.0, 0.0),
            Point2::new(200.0, 600.0),
        ));
        let scene = builder.build();

        let ray = Ray::new(Point2::new(0.0, 300.0), Vec2::new(1.0, 0.0), 550.0);
        let path = scene.trace(ray, 50).unwrap();

        // Air-to-air boundary: the leg splits but the direction is unchanged.
        assert_eq!(path.len(), 2);
        assert!(path[1].dir().rel_eq(&Vec2::new(1.0, 0.0), EPS));
        assert_eq!(path[1].medium_index(), AIR_INDEX);
    }
}
