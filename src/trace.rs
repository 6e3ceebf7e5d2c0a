use serde::Serialize;

use crate::geom::{
    Point2,
    Vec2,
};
use crate::material::AIR_INDEX;

/// One leg of a light path.
///
/// `distance` is the length of the leg along `dir`, infinite until the
/// tracer resolves the nearest hit (and left infinite for the final leg,
/// which escapes the scene).
#[derive(Debug, Clone, Serialize)]
pub struct Ray {
    origin: Point2,
    dir: Vec2,
    wavelength: f64,
    medium_index: f64,
    distance: f64,
}

impl Ray {
    /// Create a ray starting in air.
    ///
    /// `dir` is normalized here; see `Vec2::unit` for the degenerate case.
    pub fn new(origin: Point2, dir: Vec2, wavelength: f64) -> Self {
        Ray::with_medium(origin, dir, wavelength, AIR_INDEX)
    }

    pub fn with_medium(origin: Point2, dir: Vec2, wavelength: f64, medium_index: f64) -> Self {
        Ray {
            origin,
            dir: dir.unit(),
            wavelength,
            medium_index,
            distance: f64::INFINITY,
        }
    }

    pub fn origin(&self) -> Point2 {
        self.origin
    }

    pub fn dir(&self) -> Vec2 {
        self.dir
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Refractive index of the medium this leg travels through.
    pub fn medium_index(&self) -> f64 {
        self.medium_index
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Finalize the leg at distance `t`. Called once per leg by the tracer.
    pub fn resolved(mut self, t: f64) -> Self {
        self.distance = t;
        self
    }

    /// The point `t` units along the ray.
    pub fn at(&self, t: f64) -> Point2 {
        self.origin + self.dir * t
    }
}

/// An intersection record, consumed immediately by the tracer.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    pub point: Point2,
    /// Distance along the ray.
    pub t: f64,
    /// Unit normal, oriented against the incoming ray.
    pub normal: Vec2,
    /// Refractive index on the far side of the boundary.
    pub medium_index: f64,
}

/// An object within the scene that can deflect rays.
pub trait Hittable {
    /// Attempt to hit the object with `ray`, returning the nearest
    /// intersection in front of the ray origin, if any.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Whether `point` lies within the object's interior.
    ///
    /// Objects without an interior (and degenerate ones) report false.
    fn is_inside(&self, point: &Point2) -> bool;
}
