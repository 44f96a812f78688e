//! Geodetic datums, and the parameter sets relating them.
//!
//! A [`Datum`] is a zero sized marker type. Coordinates, parameter sets and
//! projections carry their datum as a type parameter, so using a parameter
//! set with coordinates from the wrong datum is a compile time error:
//!
//! ```compile_fail
//! use borneo_geodesy::prelude::*;
//! use borneo_geodesy::transform::project_hom;
//! let wgs84 = Geodetic::<Wgs84>::new(5.573408816, 116.035751582, 48.502).unwrap();
//! // The Borneo RSO grid is defined on Timbalai 1948, not WGS84
//! let _ = project_hom(&wgs84, &ProjectionParameters::rso_borneo());
//! ```
use crate::ellipsoid::Ellipsoid;
use crate::inner_op::helmert::Helmert;
use crate::inner_op::molodensky::Molodensky;
use std::fmt::Debug;
use std::marker::PhantomData;

/// A geodetic datum: An ellipsoid, positioned and oriented in space.
///
/// Implement this for a zero sized type to introduce a datum of your own.
/// `ELLPS` must be the registry name (see [`Ellipsoid::named`]) of
/// `ELLIPSOID`, since it is used when building operator definitions.
pub trait Datum: Copy + Debug + 'static {
    /// Human readable name
    const NAME: &'static str;
    /// The reference ellipsoid
    const ELLIPSOID: Ellipsoid;
    /// Registry name of the reference ellipsoid, e.g. "GRS80"
    const ELLPS: &'static str;
}

/// The World Geodetic System 1984
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wgs84;

/// Geocentric Datum of Malaysia 2000 (GRS80 ellipsoid)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Gdm2000;

/// The classical datum of Sabah and Sarawak (Everest 1830 Modified ellipsoid)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timbalai1948;

impl Datum for Wgs84 {
    const NAME: &'static str = "WGS 84";
    const ELLIPSOID: Ellipsoid = Ellipsoid::WGS84;
    const ELLPS: &'static str = "WGS84";
}

impl Datum for Gdm2000 {
    const NAME: &'static str = "GDM2000";
    const ELLIPSOID: Ellipsoid = Ellipsoid::GRS80;
    const ELLPS: &'static str = "GRS80";
}

impl Datum for Timbalai1948 {
    const NAME: &'static str = "Timbalai 1948";
    const ELLIPSOID: Ellipsoid = Ellipsoid::EVEREST_1830_MODIFIED;
    const ELLPS: &'static str = "evrstSS";
}

// ----- H E L M E R T ---------------------------------------------------------

/// Parameters of a 3 or 7 parameter Helmert (Bursa-Wolf) transformation,
/// taking earth centered cartesian coordinates from datum `S` to datum `T`.
///
/// The rotations are *always* held in the Coordinate Frame convention
/// (EPSG method 9607). Published Position Vector parameter sets (EPSG
/// method 9606) are converted on construction, through
/// [`position_vector`](Self::position_vector).
#[derive(Debug)]
pub struct HelmertParameters<S, T> {
    /// Translation (dX, dY, dZ), in meters
    pub translation: [f64; 3],
    /// Rotation (rX, rY, rZ), in seconds of arc, Coordinate Frame convention
    pub rotation: [f64; 3],
    /// Scale difference, in parts per million
    pub scale: f64,
    /// Use the exact rotation matrix, rather than its small angle approximation
    pub exact: bool,
    datums: PhantomData<(S, T)>,
}

// Manual impls, to avoid requiring S, T: Clone
impl<S, T> Clone for HelmertParameters<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S, T> Copy for HelmertParameters<S, T> {}

impl<S: Datum, T: Datum> HelmertParameters<S, T> {
    /// A parameter set in the Coordinate Frame convention
    #[must_use]
    pub const fn coordinate_frame(translation: [f64; 3], rotation: [f64; 3], scale: f64) -> Self {
        HelmertParameters {
            translation,
            rotation,
            scale,
            exact: false,
            datums: PhantomData,
        }
    }

    /// A parameter set published in the Position Vector convention. The
    /// rotations are negated into the Coordinate Frame convention. For the
    /// small angle rotation matrix, this is exact.
    #[must_use]
    pub const fn position_vector(translation: [f64; 3], rotation: [f64; 3], scale: f64) -> Self {
        let rotation = [-rotation[0], -rotation[1], -rotation[2]];
        Self::coordinate_frame(translation, rotation, scale)
    }

    /// A 3 parameter, translation only, parameter set
    #[must_use]
    pub const fn translation(translation: [f64; 3]) -> Self {
        Self::coordinate_frame(translation, [0.; 3], 0.)
    }

    /// The parameter set leaving all coordinates untouched
    #[must_use]
    pub const fn identity() -> Self {
        Self::translation([0.; 3])
    }

    /// Use the exact rotation matrix, rather than the small angle approximation
    #[must_use]
    pub const fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// The parameter set going the other way, from `T` to `S`, by negation.
    /// Exact for translation only parameter sets, and to first order
    /// otherwise. Use [`helmert_inverse`](crate::transform::helmert_inverse)
    /// for the exact inverse of a 7 parameter set.
    #[must_use]
    pub const fn reversed(&self) -> HelmertParameters<T, S> {
        HelmertParameters {
            translation: [
                -self.translation[0],
                -self.translation[1],
                -self.translation[2],
            ],
            rotation: [-self.rotation[0], -self.rotation[1], -self.rotation[2]],
            scale: -self.scale,
            exact: self.exact,
            datums: PhantomData,
        }
    }

    /// True if any rotation is non-zero
    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.rotation != [0.; 3]
    }

    /// The operator definition of the cartesian-to-cartesian `helmert` step
    #[must_use]
    pub fn definition(&self) -> String {
        let [x, y, z] = self.translation;
        let mut definition = format!("helmert x={x} y={y} z={z}");
        if self.is_rotated() {
            let [rx, ry, rz] = self.rotation;
            definition += &format!(" rx={rx} ry={ry} rz={rz} convention=coordinate_frame");
        }
        if self.scale != 0. {
            definition += &format!(" s={}", self.scale);
        }
        if self.exact {
            definition += " exact";
        }
        definition
    }

    /// The operator definition of the full geographic-to-geographic datum shift:
    /// cartesian conversion on the `S` ellipsoid, the Helmert step, and geographic
    /// conversion on the `T` ellipsoid
    #[must_use]
    pub fn geodetic_definition(&self) -> String {
        format!(
            "cart ellps={} | {} | cart inv ellps={}",
            S::ELLPS,
            self.definition(),
            T::ELLPS
        )
    }

    pub(crate) fn kernel(&self) -> Helmert {
        Helmert::new(
            self.translation,
            self.rotation,
            self.scale,
            self.exact,
            false,
        )
    }
}

impl HelmertParameters<Timbalai1948, Wgs84> {
    /// Timbalai 1948 to WGS 84, the 3 parameter set of DMA TR8350.2.
    /// Accuracy at the meter level.
    #[must_use]
    pub const fn timbalai_to_wgs84() -> Self {
        Self::translation([-679., 669., -48.])
    }
}

impl HelmertParameters<Wgs84, Timbalai1948> {
    /// WGS 84 to Timbalai 1948: The reversal of
    /// [`timbalai_to_wgs84`](HelmertParameters::timbalai_to_wgs84)
    #[must_use]
    pub const fn wgs84_to_timbalai() -> Self {
        HelmertParameters::<Timbalai1948, Wgs84>::timbalai_to_wgs84().reversed()
    }
}

impl HelmertParameters<Wgs84, Gdm2000> {
    /// WGS 84 to GDM2000. GDM2000 is realized in ITRF2000, which coincides
    /// with WGS 84 at the meter level, so the shift is the identity: Only the
    /// change of ellipsoid, from WGS84 to GRS80, remains.
    #[must_use]
    pub const fn wgs84_to_gdm2000() -> Self {
        Self::identity()
    }
}

// ----- M O L O D E N S K Y -----------------------------------------------------

/// Parameters of a Molodensky datum shift, taking geographic coordinates
/// from datum `S` to datum `T` directly, without a detour through cartesian
/// space. The change of ellipsoid is given by the datums.
///
/// The shift is a first order approximation, valid for translations in the
/// range of a few hundred meters only.
#[derive(Debug)]
pub struct MolodenskyParameters<S, T> {
    /// Translation (dX, dY, dZ), in meters
    pub translation: [f64; 3],
    /// Use the abridged, rather than the standard, formulation
    pub abridged: bool,
    datums: PhantomData<(S, T)>,
}

impl<S, T> Clone for MolodenskyParameters<S, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<S, T> Copy for MolodenskyParameters<S, T> {}

impl<S: Datum, T: Datum> MolodenskyParameters<S, T> {
    /// The abridged Molodensky shift
    #[must_use]
    pub const fn abridged(translation: [f64; 3]) -> Self {
        MolodenskyParameters {
            translation,
            abridged: true,
            datums: PhantomData,
        }
    }

    /// The standard (unabridged) Molodensky shift
    #[must_use]
    pub const fn standard(translation: [f64; 3]) -> Self {
        MolodenskyParameters {
            translation,
            abridged: false,
            datums: PhantomData,
        }
    }

    /// The Molodensky counterpart of a translation only Helmert parameter set
    #[must_use]
    pub const fn from_helmert(helmert: &HelmertParameters<S, T>, abridged: bool) -> Self {
        MolodenskyParameters {
            translation: helmert.translation,
            abridged,
            datums: PhantomData,
        }
    }

    /// The operator definition of the `molodensky` step
    #[must_use]
    pub fn definition(&self) -> String {
        let [dx, dy, dz] = self.translation;
        let mut definition = format!(
            "molodensky ellps_0={} ellps_1={} dx={dx} dy={dy} dz={dz}",
            S::ELLPS,
            T::ELLPS
        );
        if self.abridged {
            definition += " abridged";
        }
        definition
    }

    pub(crate) fn kernel(&self) -> Molodensky {
        Molodensky::new(S::ELLIPSOID, T::ELLIPSOID, self.translation, self.abridged)
    }
}

impl MolodenskyParameters<Wgs84, Timbalai1948> {
    /// WGS 84 to Timbalai 1948, abridged Molodensky with the translations of
    /// [`wgs84_to_timbalai`](HelmertParameters::wgs84_to_timbalai)
    #[must_use]
    pub const fn wgs84_to_timbalai() -> Self {
        Self::from_helmert(
            &HelmertParameters::<Wgs84, Timbalai1948>::wgs84_to_timbalai(),
            true,
        )
    }
}

// ----- T E S T S ---------------------------------------------------------------------
