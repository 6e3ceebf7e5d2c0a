use crate::geom::{
    Point2,
    Vec2,
    EPSILON,
};
use crate::material::{
    Cauchy,
    AIR_INDEX,
};
use crate::trace::{
    Hit,
    Hittable,
    Ray,
};

/// A single reflective/refractive edge between two endpoints.
#[derive(Debug, Clone)]
pub struct Segment {
    a: Point2,
    b: Point2,
    /// Unit normal: the edge vector rotated a quarter turn, `(-dy, dx)`.
    normal: Vec2,
}

impl Segment {
    pub fn new(a: Point2, b: Point2) -> Self {
        let edge = b - a;
        let normal = edge.rotate(::std::f64::consts::FRAC_PI_2).unit();
        Segment { a, b, normal }
    }
}

impl Hittable for Segment {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        // Solve origin + t*r = a + u*s as a 2x2 system via the scalar cross
        // product. Collinear overlap is never reported as a hit.
        let r = ray.dir();
        let s = self.b - self.a;

        let rxs = r.cross(&s);
        if rxs.abs() < EPSILON {
            // Parallel or collinear.
            return None;
        }

        let qp = self.a - ray.origin();
        let t = qp.cross(&s) / rxs;
        let u = qp.cross(&r) / rxs;

        if t < 0.0 || u < 0.0 || u > 1.0 {
            return None;
        }

        // Flip the normal onto the incoming side so that the refraction
        // routine's dot(incident, normal) < 0 precondition holds.
        let normal = if self.normal.dot(&r) > 0.0 {
            -self.normal
        } else {
            self.normal
        };
        Some(Hit {
            point: ray.at(t),
            t,
            normal,
            medium_index: AIR_INDEX,
        })
    }

    fn is_inside(&self, _: &Point2) -> bool {
        false
    }
}

/// A closed triangular region of dispersive glass.
///
/// Composed of three `Segment` edges; the far-side medium of a hit depends
/// on whether the ray is entering or exiting the triangle body.
#[derive(Debug, Clone)]
pub struct Prism {
    v1: Point2,
    v2: Point2,
    v3: Point2,
    edges: [Segment; 3],
    coefficients: Cauchy,
}

impl Prism {
    pub fn new(v1: Point2, v2: Point2, v3: Point2, coefficients: Cauchy) -> Self {
        let edges = [
            Segment::new(v1, v2),
            Segment::new(v2, v3),
            Segment::new(v3, v1),
        ];
        Prism {
            v1,
            v2,
            v3,
            edges,
            coefficients,
        }
    }
}

impl Hittable for Prism {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut closest: Option<Hit> = None;
        for edge in &self.edges {
            if let Some(hit) = edge.intersect(ray) {
                // Strictly smaller t wins; the first edge seen keeps ties.
                if closest.as_ref().map_or(true, |c| hit.t < c.t) {
                    closest = Some(hit);
                }
            }
        }
        closest.map(|mut hit| {
            // The hit point sits exactly on the boundary, where inside/outside
            // is ambiguous. Probe a little past it to decide whether this
            // crossing enters or exits the glass.
            let probe = ray.at(hit.t + EPSILON);
            hit.medium_index = if self.is_inside(&probe) {
                self.coefficients.index_at(ray.wavelength())
            } else {
                AIR_INDEX
            };
            hit
        })
    }

    /// Barycentric-coordinate containment test.
    fn is_inside(&self, p: &Point2) -> bool {
        let v0 = self.v3 - self.v1;
        let v1 = self.v2 - self.v1;
        let v2 = *p - self.v1;

        let d00 = v0.dot(&v0);
        let d01 = v0.dot(&v1);
        let d11 = v1.dot(&v1);
        let d20 = v2.dot(&v0);
        let d21 = v2.dot(&v1);

        let denom = d00 * d11 - d01 * d01;
        if denom.abs() < EPSILON {
            // Degenerate (zero-area) triangle.
            return false;
        }

        let v = (d11 * d20 - d01 * d21) / denom;
        let w = (d00 * d21 - d01 * d20) / denom;
        let u = 1.0 - v - w;

        u >= 0.0 && v >= 0.0 && w >= 0.0
    }
}

#[derive(Debug, Clone)]
pub enum Surface {
    Segment(Segment),
    Prism(Prism),
}

impl Hittable for Surface {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        match *self {
            Self::Segment(ref segment) => segment.intersect(ray),
            Self::Prism(ref prism) => prism.intersect(ray),
        }
    }

    fn is_inside(&self, point: &Point2) -> bool {
        match *self {
            Self::Segment(ref segment) => segment.is_inside(point),
            Self::Prism(ref prism) => prism.is_inside(point),
        }
    }
}

impl Into<Surface> for Segment {
    fn into(self) -> Surface {
        Surface::Segment(self)
    }
}

impl Into<Surface> for Prism {
    fn into(self) -> Surface {
        Surface::Prism(self)
    }
}
