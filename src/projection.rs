//! Parameters of the Hotine Oblique Mercator (Rectified Skew Orthomorphic)
//! projection, and the grids of Borneo defined by it.
use crate::datum::{Datum, Gdm2000, Timbalai1948};
use crate::inner_op::omerc::Hotine;
use crate::Error;
use std::marker::PhantomData;

/// Where the false origin of a Hotine projection is located
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HotineVariant {
    /// At the natural origin, where the initial line crosses the equator
    /// of the aposphere (EPSG method 9812)
    #[default]
    A,
    /// At the projection centre (EPSG method 9815)
    B,
}

/// A Hotine Oblique Mercator grid on datum `D`. Angles in degrees,
/// false easting and northing in meters.
#[derive(Debug)]
pub struct ProjectionParameters<D> {
    /// Latitude of the projection centre, φc
    pub latitude_of_centre: f64,
    /// Longitude of the projection centre, λc
    pub longitude_of_centre: f64,
    /// Azimuth of the initial line at the projection centre, αc
    pub azimuth: f64,
    /// Angle from the rectified grid to the skew grid, γc
    pub rectified_grid_angle: f64,
    /// Scale factor on the initial line, kc
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    pub variant: HotineVariant,
    datum: PhantomData<D>,
}

impl<D> Clone for ProjectionParameters<D> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<D> Copy for ProjectionParameters<D> {}

// The Borneo grid: azimuth 53°18'56.9537", skew angle 53°07'48.3685"
const BORNEO_LATC: f64 = 4.0;
const BORNEO_LONC: f64 = 115.0;
const BORNEO_ALPHA: f64 = 53.0 + 18.0 / 60.0 + 56.9537 / 3600.0;
const BORNEO_GAMMA: f64 = 53.0 + 7.0 / 60.0 + 48.3685 / 3600.0;
const BORNEO_K: f64 = 0.99984;

impl<D: Datum> ProjectionParameters<D> {
    /// Validated construction. The centre must lie strictly between the poles,
    /// the scale factor must be positive, and everything must be finite.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        latitude_of_centre: f64,
        longitude_of_centre: f64,
        azimuth: f64,
        rectified_grid_angle: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
        variant: HotineVariant,
    ) -> Result<Self, Error> {
        if latitude_of_centre.is_nan() || latitude_of_centre.abs() >= 90. {
            return Err(Error::Domain("latitude of centre", latitude_of_centre, "(-90, 90)"));
        }
        if !(-180.0..=180.0).contains(&longitude_of_centre) {
            return Err(Error::Domain("longitude of centre", longitude_of_centre, "[-180, 180]"));
        }
        if !azimuth.is_finite() {
            return Err(Error::Domain("azimuth", azimuth, "(-inf, inf)"));
        }
        if !rectified_grid_angle.is_finite() {
            return Err(Error::Domain("rectified grid angle", rectified_grid_angle, "(-inf, inf)"));
        }
        if scale_factor.is_nan() || scale_factor <= 0. || scale_factor.is_infinite() {
            return Err(Error::Domain("scale factor", scale_factor, "(0, inf)"));
        }
        if !false_easting.is_finite() {
            return Err(Error::Domain("false easting", false_easting, "(-inf, inf)"));
        }
        if !false_northing.is_finite() {
            return Err(Error::Domain("false northing", false_northing, "(-inf, inf)"));
        }
        Ok(Self::unchecked(
            latitude_of_centre,
            longitude_of_centre,
            azimuth,
            rectified_grid_angle,
            scale_factor,
            [false_easting, false_northing],
            variant,
        ))
    }

    const fn unchecked(
        latitude_of_centre: f64,
        longitude_of_centre: f64,
        azimuth: f64,
        rectified_grid_angle: f64,
        scale_factor: f64,
        false_origin: [f64; 2],
        variant: HotineVariant,
    ) -> Self {
        ProjectionParameters {
            latitude_of_centre,
            longitude_of_centre,
            azimuth,
            rectified_grid_angle,
            scale_factor,
            false_easting: false_origin[0],
            false_northing: false_origin[1],
            variant,
            datum: PhantomData,
        }
    }

    // The Borneo grid geometry, with a given false origin
    const fn borneo(false_origin: [f64; 2], variant: HotineVariant) -> Self {
        Self::unchecked(
            BORNEO_LATC,
            BORNEO_LONC,
            BORNEO_ALPHA,
            BORNEO_GAMMA,
            BORNEO_K,
            false_origin,
            variant,
        )
    }

    /// The same grid, with another false origin
    #[must_use]
    pub const fn with_false_origin(mut self, false_easting: f64, false_northing: f64) -> Self {
        self.false_easting = false_easting;
        self.false_northing = false_northing;
        self
    }

    /// The operator definition of the corresponding `omerc` step
    #[must_use]
    pub fn definition(&self) -> String {
        let mut definition = format!(
            "omerc ellps={} latc={} lonc={} alpha={} gamma_c={} k_0={} x_0={} y_0={}",
            D::ELLPS,
            self.latitude_of_centre,
            self.longitude_of_centre,
            self.azimuth,
            self.rectified_grid_angle,
            self.scale_factor,
            self.false_easting,
            self.false_northing
        );
        if self.variant == HotineVariant::B {
            definition += " variant";
        }
        definition
    }

    pub(crate) fn kernel(&self) -> Hotine {
        Hotine::new(
            &D::ELLIPSOID,
            self.latitude_of_centre.to_radians(),
            self.longitude_of_centre.to_radians(),
            self.azimuth.to_radians(),
            self.rectified_grid_angle.to_radians(),
            self.scale_factor,
            self.false_easting,
            self.false_northing,
            self.variant == HotineVariant::B,
        )
    }
}

impl ProjectionParameters<Timbalai1948> {
    /// Timbalai 1948 / RSO Borneo (m), EPSG:29873. Hotine variant B, with
    /// the false origin (590476.87, 442857.65) at the projection centre.
    #[must_use]
    pub const fn rso_borneo() -> Self {
        Self::borneo([590_476.87, 442_857.65], HotineVariant::B)
    }

    /// The RSO Borneo grid with the legacy false easting 590476.66. Differs
    /// from [`rso_borneo`](Self::rso_borneo) by 21 cm in easting.
    #[must_use]
    pub const fn rso_borneo_sabah() -> Self {
        Self::borneo([590_476.66, 442_857.65], HotineVariant::B)
    }

    /// The RSO Borneo grid with the legacy false origin (707496.724, 660060.126)
    #[must_use]
    pub const fn rso_borneo_offset() -> Self {
        Self::borneo([707_496.724, 660_060.126], HotineVariant::B)
    }
}

impl ProjectionParameters<Gdm2000> {
    /// GDM2000 / East Malaysia BRSO, EPSG:3376. Hotine variant A,
    /// with the false origin (0, 0) at the natural origin.
    #[must_use]
    pub const fn brso() -> Self {
        Self::borneo([0., 0.], HotineVariant::A)
    }
}

// ----- T E S T S ---------------------------------------------------------------------
