//! Geographical to cartesian (and v.v.) conversion
use crate::authoring::*;

// ----- F O R W A R D --------------------------------------------------------------

fn cart_fwd(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = op.params.ellps(0);
    let mut successes = 0;
    for i in 0..operands.len() {
        let coord = ellps.cartesian(&operands.get_coord(i));
        if !coord.is_degenerate() {
            successes += 1;
        }
        operands.set_coord(i, &coord);
    }
    successes
}

// ----- I N V E R S E --------------------------------------------------------------

fn cart_inv(op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let ellps = op.params.ellps(0);
    let mut successes = 0;
    for i in 0..operands.len() {
        let coord = ellps.geographic(&operands.get_coord(i));
        if !coord.is_degenerate() {
            successes += 1;
        }
        operands.set_coord(i, &coord);
    }
    successes
}

// ----- C O N S T R U C T O R ------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 2] = [
    OpParameter::Flag { key: "inv" },
    OpParameter::Text { key: "ellps", default: Some("GRS80") },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    Op::plain(
        parameters,
        InnerOp(cart_fwd),
        Some(InnerOp(cart_inv)),
        &GAMUT,
        ctx,
    )
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("cart")?;

        let geo = [
            Coor4D::geo(85., 0., 100000., 0.),
            Coor4D::geo(55., 10., -100000., 0.),
            Coor4D::geo(25., 20., 0., 0.),
            Coor4D::geo(0., -20., 0., 0.),
        ];

        let cart = [
            Coor4D::raw(566_462.633_537_476_8, 0.0, 6_432_020.333_690_127, 0.0),
            Coor4D::raw(
                3_554_403.475_871_930_4,
                626_737.233_120_170_7,
                5_119_468.318_659_256,
                0.,
            ),
            Coor4D::raw(
                5_435_195.382_145_216,
                1_978_249.336_521_975_5,
                2_679_074.462_877_277_8,
                0.,
            ),
            Coor4D::raw(5_993_488.273_261_571, -2_181_451.330_890_750_5, 0., 0.),
        ];

        // Forward
        let mut operands = geo;
        assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 4);
        for i in 0..4 {
            assert!(operands[i].hypot3(&cart[i]) < 20e-9);
        }

        // Inverse
        ctx.apply(op, Inv, &mut operands)?;
        for i in 0..4 {
            assert!((operands[i][0] - geo[i][0]).abs() < 1e-12);
            assert!((operands[i][1] - geo[i][1]).abs() < 1e-12);
            assert!((operands[i][2] - geo[i][2]).abs() < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn ellipsoids() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        let op = ctx.op("cart ellps=WGS84")?;
        let mut operands = [Coor4D::geo(5.573408816, 116.035751582, 48.502, 0.)];
        ctx.apply(op, Fwd, &mut operands)?;
        let expected = Coor4D::raw(-2786442.185052005, 5704016.964098195, 615328.3443670458, 0.);
        assert!(operands[0].hypot3(&expected) < 1e-6);

        // The centre of the Earth is counted as a failure
        let mut operands = [Coor4D::origin()];
        assert_eq!(ctx.apply(op, Inv, &mut operands)?, 0);

        assert!(matches!(ctx.op("cart ellps=Everest"), Err(Error::NotFound(_, _))));
        Ok(())
    }
}
