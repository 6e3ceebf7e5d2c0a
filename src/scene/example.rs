//! Built-in example scene: a single dispersive prism in a viewport.

use super::{
    Emitter,
    Scene,
};
use crate::geom::Point2;
use crate::material::Cauchy;
use crate::surfaces::Prism;

/// An equilateral BK7 prism centered in a viewport of the given size, with
/// the ray emitter off to the left at mid-height.
pub fn prism(width: f64, height: f64) -> (Scene, Emitter) {
    let radians = 30f64.to_radians();
    let sin30 = radians.sin();
    let cos30 = radians.cos();
    let len = 300.0;

    let v1 = Point2::new(width / 2.0 - 100.0, height / 2.0 - len * cos30 * 2.0 / 3.0);
    let v2 = Point2::new(v1.x() + sin30 * len, v1.y() + cos30 * len);
    let v3 = Point2::new(v1.x() - sin30 * len, v1.y() + cos30 * len);

    let mut builder = Scene::builder();
    builder.add(Prism::new(v1, v2, v3, Cauchy::BK7));

    let emitter = Emitter {
        origin: Point2::new(80.0, height / 2.0),
        angle: -10.0,
    };
    (builder.build(), emitter)
}
