use super::*;
use crate::math::angular;
use std::ops::{Add, Index, IndexMut, Sub};

/// The internal coordinate tuple. For geographic coordinates, the
/// elements are longitude and latitude in radians, followed by the
/// ellipsoidal height in meters and a time coordinate. For cartesian and
/// projected coordinates, the elements are taken at face value.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Coor4D(pub [f64; 4]);

// ----- O P E R A T O R   T R A I T S -------------------------------------------------

impl Index<usize> for Coor4D {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coor4D {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl Add for Coor4D {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Coor4D([
            self.0[0] + other.0[0],
            self.0[1] + other.0[1],
            self.0[2] + other.0[2],
            self.0[3] + other.0[3],
        ])
    }
}

impl Sub for Coor4D {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Coor4D([
            self.0[0] - other.0[0],
            self.0[1] - other.0[1],
            self.0[2] - other.0[2],
            self.0[3] - other.0[3],
        ])
    }
}

// ----- A N G U L A R   U N I T S -------------------------------------------

impl AngularUnits for Coor4D {
    /// Transform the first two elements of a `Coor4D` from degrees to radians
    #[must_use]
    fn to_radians(self) -> Self {
        Coor4D::raw(self[0].to_radians(), self[1].to_radians(), self[2], self[3])
    }

    /// Transform the first two elements of a `Coor4D` from radians to degrees
    #[must_use]
    fn to_degrees(self) -> Self {
        Coor4D::raw(self[0].to_degrees(), self[1].to_degrees(), self[2], self[3])
    }

    /// Transform the internal lon/lat/h/t-in-radians to lat/lon/h/t-in-degrees
    #[must_use]
    fn to_geo(self) -> Self {
        Coor4D::raw(self[1].to_degrees(), self[0].to_degrees(), self[2], self[3])
    }
}

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Coor4D {
    /// A `Coor4D` from latitude/longitude/height/time, with the angular input in degrees
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64, height: f64, time: f64) -> Coor4D {
        Coor4D([longitude.to_radians(), latitude.to_radians(), height, time])
    }

    /// A `Coor4D` from longitude/latitude/height/time, with the angular input in degrees
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64, height: f64, time: f64) -> Coor4D {
        Coor4D([longitude.to_radians(), latitude.to_radians(), height, time])
    }

    /// A `Coor4D` from latitude/longitude/height/time, with the
    /// angular input given as (degrees, minutes, seconds) triplets
    #[must_use]
    pub fn dms(
        latitude: (i32, u16, f64),
        longitude: (i32, u16, f64),
        height: f64,
        time: f64,
    ) -> Coor4D {
        let latitude = angular::dms_to_dd(latitude.0, latitude.1, latitude.2);
        let longitude = angular::dms_to_dd(longitude.0, longitude.1, longitude.2);
        Coor4D::geo(latitude, longitude, height, time)
    }

    /// A `Coor4D` with the elements taken at face value
    #[must_use]
    pub fn raw(first: f64, second: f64, third: f64, fourth: f64) -> Coor4D {
        Coor4D([first, second, third, fourth])
    }

    /// A `Coor4D` consisting of 4 `NaN`s
    #[must_use]
    pub fn nan() -> Coor4D {
        Coor4D([f64::NAN, f64::NAN, f64::NAN, f64::NAN])
    }

    /// A `Coor4D` consisting of 4 `0`s
    #[must_use]
    pub fn origin() -> Coor4D {
        Coor4D([0., 0., 0., 0.])
    }

    /// True if any of the first three elements is NaN or infinite
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self[0].is_finite() && self[1].is_finite() && self[2].is_finite())
    }
}

// ----- D I S T A N C E S ---------------------------------------------------

impl Coor4D {
    /// Euclidean distance between two points in the 2D plane.
    ///
    /// Primarily used to compare two projected points in their grid. The
    /// distance is computed in the subspace spanned by the first and
    /// second coordinate of the `Coor4D`s
    ///
    /// # Examples
    ///
    /// ```
    /// use borneo_geodesy::prelude::*;
    /// let t = 1000 as f64;
    /// let p0 = Coor4D::origin();
    /// let p1 = Coor4D::raw(t, t, 0., 0.);
    /// assert_eq!(p0.hypot2(&p1), t.hypot(t));
    /// ```
    #[must_use]
    pub fn hypot2(&self, other: &Self) -> f64 {
        (self[0] - other[0]).hypot(self[1] - other[1])
    }

    /// Euclidean distance between two points in the 3D space.
    ///
    /// Primarily used to compare earth centered cartesian coordinates,
    /// in which case the distance is the actual distance in the real world.
    ///
    /// # Examples
    ///
    /// ```
    /// use borneo_geodesy::prelude::*;
    /// let t = 1000 as f64;
    /// let p0 = Coor4D::origin();
    /// let p1 = Coor4D::raw(t, t, t, 0.);
    /// assert_eq!(p0.hypot3(&p1), t.hypot(t).hypot(t));
    /// ```
    #[must_use]
    pub fn hypot3(&self, other: &Self) -> f64 {
        (self[0] - other[0])
            .hypot(self[1] - other[1])
            .hypot(self[2] - other[2])
    }
}

// ----- T E S T S ---------------------------------------------------
