//! The typed library API: datum shifts and projections as plain functions
//! over coordinates carrying their datum in their type.
//!
//! All functions are pure. Input coordinates are validated on construction,
//! so the only runtime failure is a numeric degeneracy in the output,
//! reported as [`Error::Degenerate`].
//!
//! ```
//! use borneo_geodesy::prelude::*;
//! use borneo_geodesy::transform::*;
//!
//! let wgs84 = Geodetic::<Wgs84>::new(5.573408816, 116.035751582, 48.502)?;
//! let grid = ProjectionParameters::rso_borneo();
//! let rso = wgs84_to_rso_helmert(&wgs84, &grid)?;
//! assert!((rso.easting() - 704346.3829).abs() < 1e-3);
//! assert!((rso.northing() - 617355.6843).abs() < 1e-3);
//! # Ok::<(), borneo_geodesy::Error>(())
//! ```
use crate::prelude::*;

pub use crate::math::angular::decimal_to_dms;

// ----- C A R T E S I A N   <-->   G E O D E T I C --------------------------------------

/// Earth centered cartesian coordinates of a geodetic position, on the
/// ellipsoid of the datum `D`
pub fn geodetic_to_cartesian<D: Datum>(coord: &Geodetic<D>) -> Result<Cartesian<D>, Error> {
    let cartesian = D::ELLIPSOID.cartesian(&coord.to_coor4d());
    Cartesian::from_coor4d(&cartesian, "geodetic to cartesian conversion")
}

/// Geodetic coordinates of an earth centered cartesian position. The centre
/// of the earth has no geodetic representation, and is reported as degenerate.
pub fn cartesian_to_geodetic<D: Datum>(coord: &Cartesian<D>) -> Result<Geodetic<D>, Error> {
    let geodetic = D::ELLIPSOID.geographic(&coord.to_coor4d());
    Geodetic::from_coor4d(&geodetic, "cartesian to geodetic conversion")
}

// ----- D A T U M   S H I F T S ---------------------------------------------------------

/// Helmert transformation from datum `S` to datum `T`, in cartesian space
pub fn helmert_transform<S: Datum, T: Datum>(
    coord: &Cartesian<S>,
    params: &HelmertParameters<S, T>,
) -> Result<Cartesian<T>, Error> {
    let shifted = params.kernel().fwd(&coord.to_coor4d());
    Cartesian::from_coor4d(&shifted, "Helmert transformation")
}

/// The inverse of [`helmert_transform`]: from datum `T` back to datum `S`.
/// The rotation matrix is properly inverted, so also small angle parameter
/// sets round trip to within rounding error.
pub fn helmert_inverse<S: Datum, T: Datum>(
    coord: &Cartesian<T>,
    params: &HelmertParameters<S, T>,
) -> Result<Cartesian<S>, Error> {
    let shifted = params.kernel().inv(&coord.to_coor4d());
    Cartesian::from_coor4d(&shifted, "inverse Helmert transformation")
}

/// Geodetic datum shift by way of cartesian space: conversion to cartesian
/// on the `S` ellipsoid, Helmert transformation, and conversion back to
/// geodetic on the `T` ellipsoid
pub fn datum_shift<S: Datum, T: Datum>(
    coord: &Geodetic<S>,
    params: &HelmertParameters<S, T>,
) -> Result<Geodetic<T>, Error> {
    let cartesian = geodetic_to_cartesian(coord)?;
    let shifted = helmert_transform(&cartesian, params)?;
    cartesian_to_geodetic(&shifted)
}

/// Geodetic datum shift directly on the geodetic coordinates, using the
/// Molodensky approximation
pub fn molodensky_shift<S: Datum, T: Datum>(
    coord: &Geodetic<S>,
    params: &MolodenskyParameters<S, T>,
) -> Result<Geodetic<T>, Error> {
    let input = coord.to_coor4d();
    let offset = params.kernel().fwd(&input) - input;
    shift_in_degrees(coord, &offset, "Molodensky shift")
}

/// The inverse of [`molodensky_shift`]: from datum `T` back to datum `S`
pub fn molodensky_inverse<S: Datum, T: Datum>(
    coord: &Geodetic<T>,
    params: &MolodenskyParameters<S, T>,
) -> Result<Geodetic<S>, Error> {
    let input = coord.to_coor4d();
    let offset = params.kernel().inv(&input) - input;
    shift_in_degrees(coord, &offset, "inverse Molodensky shift")
}

// Apply an offset, computed in the internal representation, directly to the
// degrees of the input, so a vanishing shift leaves the input untouched
fn shift_in_degrees<S: Datum, T: Datum>(
    coord: &Geodetic<S>,
    offset: &Coor4D,
    operation: &'static str,
) -> Result<Geodetic<T>, Error> {
    Geodetic::from_degrees(
        coord.latitude() + offset[1].to_degrees(),
        coord.longitude() + offset[0].to_degrees(),
        coord.height() + offset[2],
        operation,
    )
}

// ----- P R O J E C T I O N ------------------------------------------------------------

/// Hotine Oblique Mercator projection of a geodetic position onto a grid
/// defined on the same datum
pub fn project_hom<D: Datum>(
    coord: &Geodetic<D>,
    params: &ProjectionParameters<D>,
) -> Result<Planar<D>, Error> {
    let projected = params.kernel().fwd(&coord.to_coor4d());
    Planar::from_coor4d(&projected, "Hotine projection")
}

/// The inverse Hotine Oblique Mercator projection. The height is 0.
pub fn unproject_hom<D: Datum>(
    coord: &Planar<D>,
    params: &ProjectionParameters<D>,
) -> Result<Geodetic<D>, Error> {
    let geodetic = params.kernel().inv(&coord.to_coor4d());
    Geodetic::from_coor4d(&geodetic, "inverse Hotine projection")
}

// ----- P I P E L I N E S --------------------------------------------------------------

/// WGS84 to a Timbalai 1948 RSO grid, through cartesian space and the
/// 3 parameter Helmert shift
pub fn wgs84_to_rso_helmert(
    coord: &Geodetic<Wgs84>,
    grid: &ProjectionParameters<Timbalai1948>,
) -> Result<Planar<Timbalai1948>, Error> {
    let timbalai = datum_shift(coord, &HelmertParameters::wgs84_to_timbalai())?;
    project_hom(&timbalai, grid)
}

/// WGS84 to a Timbalai 1948 RSO grid, through the abridged Molodensky shift.
/// Agrees with [`wgs84_to_rso_helmert`] at the decimeter level.
pub fn wgs84_to_rso_molodensky(
    coord: &Geodetic<Wgs84>,
    grid: &ProjectionParameters<Timbalai1948>,
) -> Result<Planar<Timbalai1948>, Error> {
    let timbalai = molodensky_shift(coord, &MolodenskyParameters::wgs84_to_timbalai())?;
    project_hom(&timbalai, grid)
}

/// WGS84 to a GDM2000 BRSO grid
pub fn wgs84_to_brso(
    coord: &Geodetic<Wgs84>,
    grid: &ProjectionParameters<Gdm2000>,
) -> Result<Planar<Gdm2000>, Error> {
    let gdm2000 = datum_shift(coord, &HelmertParameters::wgs84_to_gdm2000())?;
    project_hom(&gdm2000, grid)
}

// ----- T E S T S ---------------------------------------------------------------------
