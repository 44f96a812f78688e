//! The standard and abridged Molodensky transformations.
//!
//! Partially based on the PROJ implementation by Kristian Evers,
//! partially on the following publications:
//!
//! 1. OGP Publication 373-7-2 – Geomatics Guidance Note, number 7, part 2,
//!
//! 2. [Dea04] R.E.Deakin, 2004: The Standard and Abridged Molodensky
//!    Coordinate Transformation Formulae.
//!    URL http://www.mygeodesy.id.au/documents/Molodensky%20V2.pdf
//!
#![allow(non_snake_case)]
use crate::authoring::*;

/// Number of fixed point rounds used by the inverse. The shift is a few
/// hundred meters at most, so each round gains around 5 orders of magnitude
const INVERSE_ROUNDS: usize = 3;

/// Within this distance (radians) from a pole, the longitude shift is undefined
const POLE_TOLERANCE: f64 = 1e-12;

// ----- K E R N E L -------------------------------------------------------------------

/// The numerical core of the Molodensky shift, shared between the `molodensky`
/// operator and the typed datum shifts
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Molodensky {
    ellps: Ellipsoid,
    translation: [f64; 3],
    da: f64,
    df: f64,
    abridged: bool,
}

impl Molodensky {
    /// Shift from the `source` to the `target` ellipsoid
    pub fn new(
        source: Ellipsoid,
        target: Ellipsoid,
        translation: [f64; 3],
        abridged: bool,
    ) -> Molodensky {
        let da = target.semimajor_axis() - source.semimajor_axis();
        let df = target.flattening() - source.flattening();
        Molodensky::from_differences(source, translation, da, df, abridged)
    }

    /// Shift from the `source` ellipsoid, to an ellipsoid differing by
    /// `da` in semimajor axis and `df` in flattening
    pub fn from_differences(
        source: Ellipsoid,
        translation: [f64; 3],
        da: f64,
        df: f64,
        abridged: bool,
    ) -> Molodensky {
        Molodensky {
            ellps: source,
            translation,
            da,
            df,
            abridged,
        }
    }

    pub fn fwd(&self, coord: &Coor4D) -> Coor4D {
        *coord + self.shift(coord)
    }

    /// The shift is evaluated on the source datum, so the inverse is found
    /// by fixed point iteration: the source coordinate is the one which,
    /// shifted, lands on `coord`
    pub fn inv(&self, coord: &Coor4D) -> Coor4D {
        let mut source = *coord - self.shift(coord);
        for _ in 1..INVERSE_ROUNDS {
            source = *coord - self.shift(&source);
        }
        source
    }

    // The offsets (dlam, dphi, dh) at `coord`
    fn shift(&self, coord: &Coor4D) -> Coor4D {
        let lam = coord[0];
        let phi = coord[1];
        let h = coord[2];
        let (slam, clam) = lam.sin_cos();
        let (sphi, cphi) = phi.sin_cos();
        let [dx, dy, dz] = self.translation;
        let (da, df) = (self.da, self.df);

        let a = self.ellps.semimajor_axis();
        let f = self.ellps.flattening();
        let es = self.ellps.eccentricity_squared();
        let adffda = a * df + f * da;

        // We also need the radii of curvature
        let N = self.ellps.prime_vertical_radius_of_curvature(phi);
        let M = self.ellps.meridian_radius_of_curvature(phi);

        let fac = dx * clam + dy * slam;

        let dlam_denom = (N + h) * cphi;
        let dphi_denom = M + h;
        // At the poles, cos φ is a rounding error away from 0, never exactly 0
        if cphi.abs() < POLE_TOLERANCE || dlam_denom == 0.0 || dphi_denom == 0.0 {
            return Coor4D::nan();
        }
        let dlam = (dy * clam - dx * slam) / dlam_denom;

        if self.abridged {
            let dphi = (-fac * sphi + dz * cphi + adffda * (2.0 * phi).sin()) / dphi_denom;
            let dh = fac * cphi + dz * sphi + adffda * sphi * sphi - da;
            return Coor4D::raw(dlam, dphi, dh, 0.0);
        }

        let dphi = ((dz + ((N * es * sphi * da) / a)) * cphi - fac * sphi
            + (M / (1.0 - f) + N * (1.0 - f)) * df * sphi * cphi)
            / dphi_denom;
        let dh = fac * cphi + dz * sphi - (a / N) * da + N * (1.0 - f) * df * sphi * sphi;

        Coor4D::raw(dlam, dphi, dh, 0.)
    }

    fn from_params(params: &ParsedParameters) -> Result<Molodensky, Error> {
        Ok(Molodensky::from_differences(
            params.ellps[0],
            [params.real("dx")?, params.real("dy")?, params.real("dz")?],
            params.real("da")?,
            params.real("df")?,
            params.boolean("abridged"),
        ))
    }
}

// ----- C O M M O N -------------------------------------------------------------------

fn common(op: &Op, operands: &mut dyn CoordinateSet, direction: Direction) -> usize {
    let Ok(molodensky) = Molodensky::from_params(&op.params) else {
        warn!("molodensky: incomplete operator state - stomping on operands");
        operands.stomp();
        return 0;
    };

    let mut successes = 0;
    for i in 0..operands.len() {
        let coord = operands.get_coord(i);
        let coord = match direction {
            Direction::Fwd => molodensky.fwd(&coord),
            Direction::Inv => molodensky.inv(&coord),
        };
        if !coord.is_degenerate() {
            successes += 1;
        }
        operands.set_coord(i, &coord);
    }
    successes
}

// ----- F O R W A R D -----------------------------------------------------------------

fn fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    common(op, operands, Fwd)
}

// ----- I N V E R S E -----------------------------------------------------------------

fn inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    common(op, operands, Inv)
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 10] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Flag { key: "abridged" },
    OpParameter::Real { key: "dx", default: Some(0f64) },
    OpParameter::Real { key: "dy", default: Some(0f64) },
    OpParameter::Real { key: "dz", default: Some(0f64) },
    OpParameter::Real { key: "da", default: Some(0f64) },
    OpParameter::Real { key: "df", default: Some(0f64) },
    OpParameter::Text { key: "ellps",  default: Some("GRS80") },
    OpParameter::Text { key: "ellps_0",  default: Some("GRS80") },
    OpParameter::Text { key: "ellps_1",  default: Some("GRS80") },
];

pub fn new(parameters: &RawParameters, _ctx: &dyn Context) -> Result<Op, Error> {
    let def = &parameters.definition;
    let mut params = ParsedParameters::new(parameters, &GAMUT)?;

    // We may use `ellps, da, df`, to parameterize the op, but `ellps_0, ellps_1`
    // is a more likely set of parameters to come across in real life.
    if params.given.contains_key("ellps_0") && params.given.contains_key("ellps_1") {
        let kernel = Molodensky::new(params.ellps[0], params.ellps[1], [0.; 3], false);
        params.real.insert("da", kernel.da);
        params.real.insert("df", kernel.df);
    }

    let descriptor = OpDescriptor::new(def, InnerOp(fwd), Some(InnerOp(inv)));
    Ok(Op {
        descriptor,
        params,
        steps: None,
        id: OpHandle::new(),
    })
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn dist_in_meters(a: &Coor4D, b: &Coor4D) -> f64 {
        let dlat = (a[1] - b[1]) * 6_378_137.;
        let dlon = (a[0] - b[0]) * 6_378_137. * a[1].cos();
        dlat.hypot(dlon)
    }

    #[test]
    fn molodensky() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        // ---------------------------------------------------------------------------
        // Test case from OGP Publication 373-7-2: Geomatics Guidance Note number 7,
        // part 2: Transformation from WGS84 to ED50.
        // ---------------------------------------------------------------------------
        let definition = "
            molodensky ellps_0=WGS84 ellps_1=intl
            dx=84.87 dy=96.49 dz=116.95
        ";
        let op = ctx.op(definition)?;

        let lat = angular::dms_to_dd(53, 48, 33.82);
        let lon = angular::dms_to_dd(2, 7, 46.38);
        let wgs84 = Coor4D::geo(lat, lon, 73., 0.0);

        // The EPSG values have 3 decimals on the seconds only, so we use
        // the result of a direct 3 parameter Helmert computation instead
        let ed50 = Coor4D::geo(53.8101570592, 2.1309658097, 28.02470, 0.0);

        // In the standard case, Molodensky replicates Helmert to
        // within 5 mm in the plane and the elevation.
        let mut operands = [wgs84];
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 1);
        assert!(dist_in_meters(&ed50, &operands[0]) < 0.005);
        assert!((ed50[2] - operands[0][2]).abs() < 0.005);

        // The inverse is the exact inverse of the forward
        ctx.apply(op, Inv, &mut operands)?;
        assert!(dist_in_meters(&wgs84, &operands[0]) < 1e-6);
        assert!((wgs84[2] - operands[0][2]).abs() < 1e-6);

        // The abridged case. Same test point. Both plane coordinates and
        // elevations are worse, but still better-than-decimeter.
        let op = ctx.op(&format!("{definition} abridged"))?;
        let mut operands = [wgs84];
        ctx.apply(op, Fwd, &mut operands)?;
        assert!(dist_in_meters(&ed50, &operands[0]) < 0.1);
        assert!((ed50[2] - operands[0][2]).abs() < 0.075);
        Ok(())
    }

    // WGS84 -> Timbalai 1948 for a point in Sabah, pinned against
    // the closed form abridged expressions
    #[test]
    fn sabah() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op =
            ctx.op("molodensky ellps_0=WGS84 ellps_1=evrstSS dx=679 dy=-669 dz=48 abridged")?;
        let mut operands = [Coor4D::geo(5.573408816, 116.035751582, 48.502, 0.)];
        ctx.apply(op, Fwd, &mut operands)?;
        let timbalai = operands[0].to_geo();
        assert!((timbalai[0] - 5.574309336714136).abs() < 1e-10);
        assert!((timbalai[1] - 116.03289547379204).abs() < 1e-10);
        assert!((timbalai[2] + 5.019202138826195).abs() < 1e-6);

        // Parameterizing by ellipsoid differences gives the same result
        let kernel = Molodensky::new(
            Ellipsoid::WGS84,
            Ellipsoid::EVEREST_1830_MODIFIED,
            [679., -669., 48.],
            true,
        );
        let da = Ellipsoid::EVEREST_1830_MODIFIED.semimajor_axis() - 6_378_137.;
        let df = Ellipsoid::EVEREST_1830_MODIFIED.flattening() - Ellipsoid::WGS84.flattening();
        let definition =
            format!("molodensky ellps=WGS84 da={da} df={df} dx=679 dy=-669 dz=48 abridged");
        let op = ctx.op(&definition)?;
        let kota_kinabalu = Coor4D::geo(5.573408816, 116.035751582, 48.502, 0.);
        let mut direct = [kota_kinabalu];
        ctx.apply(op, Fwd, &mut direct)?;
        assert!(direct[0].hypot3(&operands[0]) < 1e-12);
        assert!(kernel.fwd(&kota_kinabalu).hypot3(&operands[0]) < 1e-12);
        Ok(())
    }

    // The longitude shift is undefined at the poles, so they count as failures
    #[test]
    fn poles() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op =
            ctx.op("molodensky ellps_0=WGS84 ellps_1=evrstSS dx=679 dy=-669 dz=48 abridged")?;
        let mut operands = [
            Coor4D::geo(90., 116., 0., 0.),
            Coor4D::geo(-90., 116., 0., 0.),
            Coor4D::geo(89.9, 116., 0., 0.),
        ];
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 1);
        assert!(operands[0].is_degenerate());
        assert!(operands[1].is_degenerate());
        assert!(!operands[2].is_degenerate());

        let mut operands = [Coor4D::geo(90., 116., 0., 0.)];
        assert_eq!(ctx.apply(op, Inv, &mut operands)?, 0);
        Ok(())
    }
}
