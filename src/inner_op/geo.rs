//! Adapt between the conventional geographic coordinate order and units, i.e.
//! latitude and longitude in degrees, and the internal representation, i.e.
//! longitude and latitude in radians.
//!
//! Typically used at the start of a pipeline, to read conventional input:
//!
//! ```sh
//! geo | cart ellps=WGS84 | helmert x=679 y=-669 z=48 | cart inv ellps=evrstSS | geo inv
//! ```
use crate::authoring::*;

// ----- F O R W A R D -----------------------------------------------------------------

// Degrees (lat, lon) to radians (lon, lat)
fn fwd(_op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let mut successes = 0;
    for i in 0..operands.len() {
        let (lat, lon) = operands.xy(i);
        operands.set_xy(i, lon.to_radians(), lat.to_radians());
        if lat.is_finite() && lon.is_finite() {
            successes += 1;
        }
    }
    successes
}

// ----- I N V E R S E -----------------------------------------------------------------

// Radians (lon, lat) to degrees (lat, lon)
fn inv(_op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let mut successes = 0;
    for i in 0..operands.len() {
        let (lon, lat) = operands.xy(i);
        operands.set_xy(i, lat.to_degrees(), lon.to_degrees());
        if lat.is_finite() && lon.is_finite() {
            successes += 1;
        }
    }
    successes
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 1] = [
    OpParameter::Flag { key: "inv" },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    Op::plain(parameters, InnerOp(fwd), Some(InnerOp(inv)), &GAMUT, ctx)
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("geo")?;

        let mut operands = [Coor4D::raw(5.573408816, 116.035751582, 48.502, 2000.)];
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 1);
        assert_eq!(operands[0], Coor4D::geo(5.573408816, 116.035751582, 48.502, 2000.));

        ctx.apply(op, Inv, &mut operands)?;
        assert!((operands[0][0] - 5.573408816).abs() < 1e-12);
        assert!((operands[0][1] - 116.035751582).abs() < 1e-12);
        assert_eq!(operands[0][2], 48.502);
        assert_eq!(operands[0][3], 2000.);

        // Inverted, it adapts internal coordinates for output
        let op = ctx.op("geo inv")?;
        let mut operands = [Coor4D::geo(4., 115., 0., 0.)];
        ctx.apply(op, Fwd, &mut operands)?;
        assert!((operands[0][0] - 4.).abs() < 1e-12);
        assert!((operands[0][1] - 115.).abs() < 1e-12);
        Ok(())
    }
}
