use crate::authoring::*;

// ----- F O R W A R D -----------------------------------------------------------------

fn pipeline_fwd(op: &Op, ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let Some(steps) = op.steps.as_ref() else {
        return 0;
    };
    let mut n = usize::MAX;
    for step in steps {
        n = n.min(step.apply(ctx, operands, Fwd));
    }
    trace!("pipeline fwd: {n} successes over {} steps", steps.len());
    n.min(operands.len())
}

// ----- I N V E R S E -----------------------------------------------------------------

fn pipeline_inv(op: &Op, ctx: &dyn Context, operands: &mut dyn CoordinateSet) -> usize {
    let Some(steps) = op.steps.as_ref() else {
        return 0;
    };
    let mut n = usize::MAX;
    for step in steps.iter().rev() {
        n = n.min(step.apply(ctx, operands, Inv));
    }
    trace!("pipeline inv: {n} successes over {} steps", steps.len());
    n.min(operands.len())
}

// ----- C O N S T R U C T O R ---------------------------------------------------------

pub const GAMUT: [OpParameter; 0] = [];

pub fn new(parameters: &RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
    let definition = &parameters.definition;
    let thesteps = definition.split_into_steps().0;
    let mut steps = Vec::new();

    for step in thesteps {
        let step_parameters = parameters.next(&step);
        steps.push(Op::op(step_parameters, ctx)?);
    }

    // The parameters of the individual steps are handled by the steps themselves
    let mut own = parameters.clone();
    own.definition = "pipeline".to_string();
    let params = ParsedParameters::new(&own, &GAMUT)?;

    let invertible = steps.iter().all(|step| step.descriptor.invertible);
    let fwd = InnerOp(pipeline_fwd);
    let inv = invertible.then_some(InnerOp(pipeline_inv));
    let descriptor = OpDescriptor::new(definition, fwd, inv);
    Ok(Op {
        descriptor,
        params,
        steps: Some(steps),
        id: OpHandle::new(),
    })
}

// ----- T E S T S ---------------------------------------------------------------------
