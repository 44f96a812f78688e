//! Coordinates tagged with their datum.
//!
//! The datum is a type parameter, so handing Timbalai 1948 coordinates to
//! a function expecting WGS84 coordinates does not compile. The only way
//! from one datum to another is through an actual datum shift.
use crate::datum::Datum;
use crate::math::angular;
use crate::prelude::*;
use log::warn;
use std::marker::PhantomData;

/// Geographic coordinates: latitude and longitude in degrees, and
/// ellipsoidal height in meters, on the ellipsoid of datum `D`
#[derive(Debug)]
pub struct Geodetic<D> {
    latitude: f64,
    longitude: f64,
    height: f64,
    datum: PhantomData<D>,
}

/// Earth centered, earth fixed cartesian coordinates in meters, in datum `D`
#[derive(Debug)]
pub struct Cartesian<D> {
    x: f64,
    y: f64,
    z: f64,
    datum: PhantomData<D>,
}

/// Projected coordinates, easting and northing in meters, in a grid
/// defined on datum `D`
#[derive(Debug)]
pub struct Planar<D> {
    easting: f64,
    northing: f64,
    datum: PhantomData<D>,
}

// Manual impls of Clone, Copy, and PartialEq, to avoid requiring the same from D
macro_rules! value_semantics {
    ($kind:ident, $($field:ident),+) => {
        impl<D> Clone for $kind<D> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<D> Copy for $kind<D> {}

        impl<D> PartialEq for $kind<D> {
            fn eq(&self, other: &Self) -> bool {
                $(self.$field == other.$field)&&+
            }
        }
    };
}

value_semantics!(Geodetic, latitude, longitude, height);
value_semantics!(Cartesian, x, y, z);
value_semantics!(Planar, easting, northing);

// Conversion of ±π/2 to degrees may overshoot ±90 by a few ulps
const LATITUDE_ROUNDING: f64 = 1e-12;

fn finite(name: &'static str, value: f64) -> Result<f64, Error> {
    if value.is_finite() {
        return Ok(value);
    }
    Err(Error::Domain(name, value, "(-inf, inf)"))
}

// ----- G E O D E T I C -------------------------------------------------------

impl<D: Datum> Geodetic<D> {
    /// Latitude in [-90, 90] and longitude in [-180, 180] degrees, and a
    /// finite height in meters. Anything else is rejected with
    /// [`Error::Domain`].
    pub fn new(latitude: f64, longitude: f64, height: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::Domain("latitude", latitude, "[-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::Domain("longitude", longitude, "[-180, 180]"));
        }
        let height = finite("height", height)?;
        Ok(Geodetic {
            latitude,
            longitude,
            height,
            datum: PhantomData,
        })
    }

    /// Latitude, in degrees
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude, in degrees
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Ellipsoidal height, in meters
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The internal representation, radians in longitude/latitude order
    #[must_use]
    pub fn to_coor4d(&self) -> Coor4D {
        Coor4D::geo(self.latitude, self.longitude, self.height, 0.)
    }

    /// From the internal representation, with the longitude normalized
    /// to [-180, 180). Non-finite input is a numeric degeneracy.
    pub(crate) fn from_coor4d(coord: &Coor4D, operation: &'static str) -> Result<Self, Error> {
        if coord.is_degenerate() {
            warn!("{operation}: degenerate result {:?} in {}", coord.0, D::NAME);
            return Err(Error::Degenerate(operation));
        }
        let longitude = angular::normalize_symmetric(coord[0]).to_degrees();
        Self::from_degrees(coord[1].to_degrees(), longitude, coord[2], operation)
    }

    /// From a computed latitude, longitude (degrees) and height. A longitude
    /// outside [-180, 180] is wrapped. A latitude beyond the poles, or any
    /// non-finite element, is a numeric degeneracy.
    pub(crate) fn from_degrees(
        latitude: f64,
        longitude: f64,
        height: f64,
        operation: &'static str,
    ) -> Result<Self, Error> {
        let finite = latitude.is_finite() && longitude.is_finite() && height.is_finite();
        if !finite || latitude.abs() > 90. + LATITUDE_ROUNDING {
            let name = D::NAME;
            warn!("{operation}: degenerate result ({latitude}, {longitude}, {height}) in {name}");
            return Err(Error::Degenerate(operation));
        }

        // Only the radian/degree round trip at the poles is clamped
        let latitude = latitude.clamp(-90., 90.);
        let mut longitude = longitude;
        if !(-180.0..=180.0).contains(&longitude) {
            longitude = (longitude + 180.).rem_euclid(360.) - 180.;
        }
        Ok(Geodetic {
            latitude,
            longitude,
            height,
            datum: PhantomData,
        })
    }
}

// ----- C A R T E S I A N -----------------------------------------------------

impl<D: Datum> Cartesian<D> {
    /// Cartesian coordinates, in meters. All must be finite.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, Error> {
        Ok(Cartesian {
            x: finite("X", x)?,
            y: finite("Y", y)?,
            z: finite("Z", z)?,
            datum: PhantomData,
        })
    }

    #[must_use]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub fn z(&self) -> f64 {
        self.z
    }

    /// The distance between two points in the same datum
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.to_coor4d().hypot3(&other.to_coor4d())
    }

    #[must_use]
    pub fn to_coor4d(&self) -> Coor4D {
        Coor4D::raw(self.x, self.y, self.z, 0.)
    }

    pub(crate) fn from_coor4d(coord: &Coor4D, operation: &'static str) -> Result<Self, Error> {
        if coord.is_degenerate() {
            warn!("{operation}: degenerate result {:?} in {}", coord.0, D::NAME);
            return Err(Error::Degenerate(operation));
        }
        Ok(Cartesian {
            x: coord[0],
            y: coord[1],
            z: coord[2],
            datum: PhantomData,
        })
    }
}

// ----- P L A N A R -----------------------------------------------------------

impl<D: Datum> Planar<D> {
    /// Grid coordinates, in meters. Both must be finite.
    pub fn new(easting: f64, northing: f64) -> Result<Self, Error> {
        Ok(Planar {
            easting: finite("easting", easting)?,
            northing: finite("northing", northing)?,
            datum: PhantomData,
        })
    }

    #[must_use]
    pub fn easting(&self) -> f64 {
        self.easting
    }

    #[must_use]
    pub fn northing(&self) -> f64 {
        self.northing
    }

    /// The grid distance between two points in the same grid
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.to_coor4d().hypot2(&other.to_coor4d())
    }

    #[must_use]
    pub fn to_coor4d(&self) -> Coor4D {
        Coor4D::raw(self.easting, self.northing, 0., 0.)
    }

    pub(crate) fn from_coor4d(coord: &Coor4D, operation: &'static str) -> Result<Self, Error> {
        if !(coord[0].is_finite() && coord[1].is_finite()) {
            warn!("{operation}: degenerate result {:?} in {}", coord.0, D::NAME);
            return Err(Error::Degenerate(operation));
        }
        Ok(Planar {
            easting: coord[0],
            northing: coord[1],
            datum: PhantomData,
        })
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn domain() -> Result<(), Error> {
        let p = Geodetic::<Wgs84>::new(5.573408816, 116.035751582, 48.502)?;
        assert_eq!(p.latitude(), 5.573408816);
        assert_eq!(p.longitude(), 116.035751582);
        assert_eq!(p.height(), 48.502);

        // The boundaries are inclusive
        Geodetic::<Wgs84>::new(90., 180., 0.)?;
        Geodetic::<Wgs84>::new(-90., -180., 0.)?;

        assert!(matches!(
            Geodetic::<Wgs84>::new(90.5, 116., 0.),
            Err(Error::Domain("latitude", _, _))
        ));
        assert!(matches!(
            Geodetic::<Timbalai1948>::new(5., -181., 0.),
            Err(Error::Domain("longitude", _, _))
        ));
        assert!(matches!(
            Geodetic::<Gdm2000>::new(f64::NAN, 116., 0.),
            Err(Error::Domain("latitude", _, _))
        ));
        assert!(matches!(
            Geodetic::<Gdm2000>::new(5., 116., f64::INFINITY),
            Err(Error::Domain("height", _, _))
        ));
        assert!(matches!(
            Cartesian::<Wgs84>::new(0., f64::NAN, 0.),
            Err(Error::Domain("Y", _, _))
        ));
        assert!(matches!(
            Planar::<Timbalai1948>::new(f64::NEG_INFINITY, 0.),
            Err(Error::Domain("easting", _, _))
        ));
        Ok(())
    }

    #[test]
    fn internal_representation() -> Result<(), Error> {
        let p = Geodetic::<Wgs84>::new(5.5, 116., 10.)?;
        let c = p.to_coor4d();
        assert_eq!(c, Coor4D::geo(5.5, 116., 10., 0.));
        let q = Geodetic::<Wgs84>::from_coor4d(&c, "test")?;
        assert!((q.latitude() - 5.5).abs() < 1e-14);
        assert!((q.longitude() - 116.).abs() < 1e-12);

        // Longitudes are wrapped
        let wrapped = Coor4D::geo(0., 190., 0., 0.);
        let q = Geodetic::<Wgs84>::from_coor4d(&wrapped, "test")?;
        assert!((q.longitude() + 170.).abs() < 1e-12);

        assert!(matches!(
            Geodetic::<Wgs84>::from_coor4d(&Coor4D::nan(), "test"),
            Err(Error::Degenerate("test"))
        ));
        // A latitude beyond the poles is not clamped back, but refused
        let beyond = Coor4D::raw(0., 91_f64.to_radians(), 0., 0.);
        assert!(matches!(
            Geodetic::<Wgs84>::from_coor4d(&beyond, "test"),
            Err(Error::Degenerate("test"))
        ));
        assert!(matches!(
            Geodetic::<Wgs84>::from_degrees(-90.001, 0., 0., "test"),
            Err(Error::Degenerate("test"))
        ));
        let pole = Geodetic::<Wgs84>::from_coor4d(&Coor4D::raw(0., FRAC_PI_2, 0., 0.), "test")?;
        assert_eq!(pole.latitude(), 90.);

        // Computed values are kept as is, except for wrapping the longitude
        let q = Geodetic::<Wgs84>::from_degrees(-88.0196426, -177.565432, 1., "test")?;
        assert_eq!(q.latitude(), -88.0196426);
        assert_eq!(q.longitude(), -177.565432);
        let q = Geodetic::<Wgs84>::from_degrees(10., 180.5, 1., "test")?;
        assert_eq!(q.longitude(), -179.5);

        assert!(matches!(
            Planar::<Gdm2000>::from_coor4d(&Coor4D::raw(1., f64::NAN, 0., 0.), "test"),
            Err(Error::Degenerate("test"))
        ));
        Ok(())
    }

    #[test]
    fn distances() -> Result<(), Error> {
        let a = Cartesian::<Wgs84>::new(1., 2., 3.)?;
        let b = Cartesian::<Wgs84>::new(1., 2., 5.)?;
        assert_eq!(a.distance(&b), 2.);
        let c = a;
        assert!(a == c);
        let p = Planar::<Timbalai1948>::new(3., 0.)?;
        let q = Planar::<Timbalai1948>::new(0., 4.)?;
        assert_eq!(p.distance(&q), 5.);
        Ok(())
    }
}
