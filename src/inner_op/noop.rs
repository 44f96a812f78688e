/// The no-operation. Does nothing, and is good at it
use crate::authoring::*;

// ----- F O R W A R D --------------------------------------------------------------

fn noop(_op: &Op, _ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    operands.len()
}

// ----- C O N S T R U C T O R ------------------------------------------------------

#[rustfmt::skip]
pub const GAMUT: [OpParameter; 1] = [
    OpParameter::Flag { key: "inv" },
];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    Op::plain(parameters, InnerOp(noop), Some(InnerOp(noop)), &GAMUT, ctx)
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    const KOTA_KINABALU: Coor4D = Coor4D([-2786442.1851, 5704016.9641, 615328.3444, 0.0]);

    #[test]
    fn no_change() -> Result<(), Error> {
        let mut ctx = Minimal::default();
        for alias in ["noop", "latlon", "lonlat inv"] {
            let op = ctx.op(alias)?;
            let mut operands = [KOTA_KINABALU];

            assert_eq!(ctx.apply(op, Fwd, &mut operands)?, 1);
            assert_eq!(operands[0], KOTA_KINABALU);

            ctx.apply(op, Inv, &mut operands)?;
            assert_eq!(operands[0], KOTA_KINABALU);
        }
        Ok(())
    }
}
