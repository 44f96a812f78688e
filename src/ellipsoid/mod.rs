use crate::Error;
use log::warn;

mod cartesians;
mod constants;

/// An ellipsoid of revolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::GRS80
    }
}

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// World Geodetic System 1984
    pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 1. / 298.257_223_563);

    /// Geodetic Reference System 1980, the ellipsoid of GDM2000
    pub const GRS80: Ellipsoid = Ellipsoid::new(6_378_137.0, 1. / 298.257_222_101);

    /// Everest 1830 Modified (Sabah and Sarawak), the ellipsoid of Timbalai 1948.
    /// PROJ calls it `evrstSS`, EPSG calls it *Everest 1830 (1967 Definition)*
    pub const EVEREST_1830_MODIFIED: Ellipsoid = Ellipsoid::new(6_377_298.556, 1. / 300.8017);

    /// Everest 1830 with the 1937 adjustment semimajor axis. Some legacy Borneo
    /// material pairs this axis with Timbalai 1948. The two definitions differ by
    /// 22 m in *a*, so this one is only available by its own name, and never
    /// substituted for [`EVEREST_1830_MODIFIED`](Self::EVEREST_1830_MODIFIED)
    pub const EVEREST_1830: Ellipsoid = Ellipsoid::new(6_377_276.345, 1. / 300.8017);

    /// User defined ellipsoid
    #[must_use]
    pub const fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// Predefined ellipsoid; built-in, or given as a
    /// string formatted (a, rf) tuple, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        // Is it one of the few builtins?
        if let Some(e) = constants::ELLIPSOID_LIST
            .iter()
            .find(|ellps| ellps.0 == name)
        {
            // EPSG convention: zero reciproque flattening indicates zero flattening
            let f = if e.2 != 0.0 { 1.0 / e.2 } else { e.2 };
            return Ok(Ellipsoid::new(e.1, f));
        }

        // Remove optional parenthesis
        let name = name
            .strip_prefix('(')
            .and_then(|n| n.strip_suffix(')'))
            .unwrap_or(name);

        // The "semimajor, reciproque-flattening" form, e.g. "6378137, 298.3"
        let a_and_rf = name.split(',').collect::<Vec<_>>();
        if a_and_rf.len() == 2_usize {
            if let Ok(a) = a_and_rf[0].trim().parse::<f64>() {
                if let Ok(rf) = a_and_rf[1].trim().parse::<f64>() {
                    // A positive, finite size. The flattening must be in [0, 1),
                    // with rf = 0 being the EPSG way of writing f = 0
                    if !(a.is_finite() && a > 0.0) {
                        warn!("Ellipsoid::named(): bad semimajor axis in '{name}'");
                        return Err(Error::BadParam(String::from("a"), String::from(name)));
                    }
                    if !(rf.is_finite() && (rf == 0.0 || rf > 1.0)) {
                        warn!("Ellipsoid::named(): bad reciprocal flattening in '{name}'");
                        return Err(Error::BadParam(String::from("rf"), String::from(name)));
                    }
                    let f = if rf != 0.0 { 1.0 / rf } else { rf };
                    return Ok(Ellipsoid::new(a, f));
                }
            }
        }

        Err(Error::NotFound(
            String::from(name),
            String::from(": Ellipsoid::named()"),
        ))
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a² = 2f - f²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    // ----- Axes and flattenings --------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *N*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *M*
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        let num = self.a * (1.0 - self.eccentricity_squared());
        let denom = (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).powf(1.5);
        num / denom
    }
}

// ----- Tests ---------------------------------------------------------------------
