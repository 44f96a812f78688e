use crate::prelude::*;
mod coor4d;
mod set;
pub mod typed;

pub use coor4d::Coor4D;

/// Methods for changing the coordinate representation of angles.
/// Dimensionality untold, the methods operate on the first two
/// dimensions only.
pub trait AngularUnits {
    /// Transform the first two elements of a coordinate tuple from degrees to radians
    fn to_radians(self) -> Self;

    /// Transform the first two elements of a coordinate tuple from radians to degrees
    fn to_degrees(self) -> Self;

    /// Transform the internal lon/lat(/h/t)-in-radians to lat/lon(/h/t)-in-degrees
    fn to_geo(self) -> Self;
}

/// The CoordinateSet trait represents the interface between the operators
/// and whatever container the user keeps the coordinates in.
///
/// All operators see coordinates as `Coor4D`: longitude and latitude
/// in radians (or easting, northing, or cartesian X, Y in meters),
/// followed by a height (or Z) and a time coordinate.
pub trait CoordinateSet {
    /// Number of coordinate tuples in the set
    fn len(&self) -> usize;

    /// Access the `index`th coordinate tuple
    fn get_coord(&self, index: usize) -> Coor4D;

    /// Overwrite the `index`th coordinate tuple
    fn set_coord(&mut self, index: usize, value: &Coor4D);

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Access the two first elements of the `index`th coordinate tuple
    fn xy(&self, index: usize) -> (f64, f64) {
        let c = self.get_coord(index);
        (c[0], c[1])
    }

    /// Overwrite the two first elements of the `index`th coordinate tuple
    fn set_xy(&mut self, index: usize, x: f64, y: f64) {
        let mut c = self.get_coord(index);
        c[0] = x;
        c[1] = y;
        self.set_coord(index, &c);
    }

    /// Set all coordinate tuples in the set to NaN
    fn stomp(&mut self) {
        let nanny = Coor4D::nan();
        for i in 0..self.len() {
            self.set_coord(i, &nanny);
        }
    }
}
