use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::geom::Vec2;

/// Refractive index of air at standard conditions.
pub const AIR_INDEX: f64 = 1.000293;

/// Cauchy coefficient presets, keyed by material name.
static PRESETS: Lazy<HashMap<&'static str, Cauchy>> = Lazy::new(|| {
    let mut presets = HashMap::new();
    presets.insert("BK7", Cauchy::BK7);
    presets.insert("FusedSilica", Cauchy::FUSED_SILICA);
    presets.insert("FusedSilica2", Cauchy::FUSED_SILICA_2);
    presets
});

/// A transparent material's dispersion curve, as fitted Cauchy coefficients.
///
/// The refractive index at wavelength λ (in μm) is `A + B/λ² + C/λ⁴`.
/// For normal dispersion (B, C ≥ 0) the index decreases with wavelength,
/// which is what bends violet harder than red in a prism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cauchy {
    a: f64,
    b: f64,
    c: f64,
}

impl Cauchy {
    /// Crown glass.
    pub const BK7: Cauchy = Cauchy::new(1.5046, 0.00420, 0.000005);
    pub const FUSED_SILICA: Cauchy = Cauchy::new(1.4580, 0.00354, 0.000000);
    pub const FUSED_SILICA_2: Cauchy = Cauchy::new(1.6080, 0.00454, 0.000008);

    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Cauchy { a, b, c }
    }

    /// Look up a named coefficient preset.
    ///
    /// An unknown name is a configuration error; there is deliberately no
    /// fallback material.
    pub fn lookup(name: &str) -> Result<Cauchy, UnknownMaterialError> {
        PRESETS
            .get(name)
            .copied()
            .ok_or_else(|| UnknownMaterialError(name.to_owned()))
    }

    /// The refractive index at a wavelength given in nanometers.
    pub fn index_at(&self, wavelength_nm: f64) -> f64 {
        let lambda = wavelength_nm / 1000.0;
        let lambda2 = lambda * lambda;
        self.a + self.b / lambda2 + self.c / (lambda2 * lambda2)
    }
}

#[derive(Debug, Clone)]
pub struct UnknownMaterialError(String);

impl ::std::error::Error for UnknownMaterialError {}

impl ::std::fmt::Display for UnknownMaterialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown material '{}'", self.0)
    }
}

/// The outcome of a ray meeting a boundary between two media.
#[derive(Debug, Clone, Copy)]
pub struct Deflection {
    /// Unit direction of the outgoing ray.
    pub dir: Vec2,
    /// Whether the boundary acted as a mirror instead of transmitting.
    pub total_internal_reflection: bool,
}

/// Deflect a ray crossing from a medium of index `n1` into one of index `n2`.
///
/// `incident` must be a unit direction and `normal` a unit surface normal
/// already oriented against it (`dot(incident, normal) < 0`). When the
/// incidence angle exceeds the critical angle for `n1 > n2` there is no
/// refracted solution and the ray mirror-reflects instead; the caller keeps
/// the current medium in that case.
pub fn refract_or_reflect(incident: Vec2, normal: Vec2, n1: f64, n2: f64) -> Deflection {
    let cos_i = -incident.dot(&normal).clamp(-1.0, 1.0);
    let eta = n1 / n2;
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);

    if k < 0.0 {
        Deflection {
            dir: reflect(&incident, &normal).unit(),
            total_internal_reflection: true,
        }
    } else {
        // Snell's law in vector form.
        let refracted = incident * eta + normal * (eta * cos_i - k.sqrt());
        Deflection {
            dir: refracted.unit(),
            total_internal_reflection: false,
        }
    }
}

/// Reflect an inbound direction v across a surface given the surface normal n.
fn reflect(v: &Vec2, n: &Vec2) -> Vec2 {
    *v - *n * (2.0 * v.dot(n))
}
