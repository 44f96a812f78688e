use crate::internal::*;

mod op_descriptor;
mod parameter;
mod parsed_parameters;
mod raw_parameters;

pub use op_descriptor::OpDescriptor;
pub use parameter::OpParameter;
pub use parsed_parameters::ParsedParameters;
pub use raw_parameters::RawParameters;

/// Identifier of an instantiated operator, handed out by a [`Context`]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone)]
pub struct OpHandle(uuid::Uuid);
impl OpHandle {
    pub fn new() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}
impl Default for OpHandle {
    fn default() -> Self {
        OpHandle(uuid::Uuid::new_v4())
    }
}

/// The defining parameters and functions for an operator
#[derive(Debug)]
pub struct Op {
    pub descriptor: OpDescriptor,
    pub params: ParsedParameters,
    pub steps: Option<Vec<Op>>,
    pub id: OpHandle,
}

impl Op {
    /// Operate fwd/inv, taking operator inversion into account. Returns
    /// the number of successfully transformed coordinate tuples.
    pub fn apply(
        &self,
        ctx: &dyn Context,
        operands: &mut dyn CoordinateSet,
        direction: Direction,
    ) -> usize {
        let forward = direction == Direction::Fwd;
        // Short form of (inverted && !forward) || (forward && !inverted)
        if self.descriptor.inverted != forward {
            return self.descriptor.fwd.0(self, ctx, operands);
        }
        self.descriptor.inv.0(self, ctx, operands)
    }

    pub fn new(definition: &str, ctx: &dyn Context) -> Result<Op, Error> {
        let globals = ctx.globals();
        let parameters = RawParameters::new(definition, &globals);
        Self::op(parameters, ctx)
    }

    /// Helper for implementation of `InnerOp`s: Instantiate an `Op` for the simple
    /// (and common) case, where the `InnerOp` constructor does not need to set any
    /// other parameters than the ones defined by the instantiation parameter
    /// arguments.
    pub fn plain(
        parameters: &RawParameters,
        fwd: InnerOp,
        inv: Option<InnerOp>,
        gamut: &[OpParameter],
        _ctx: &dyn Context,
    ) -> Result<Op, Error> {
        let def = parameters.definition.as_str();
        let params = ParsedParameters::new(parameters, gamut)?;
        let descriptor = OpDescriptor::new(def, fwd, inv);
        Ok(Op {
            descriptor,
            params,
            steps: None,
            id: OpHandle::new(),
        })
    }

    /// Instantiate the actual operator, taking into account the relative order
    /// of precendence between pipelines, user defined operators, macros, and
    /// built-in operators
    #[allow(clippy::self_named_constructors)]
    pub fn op(parameters: RawParameters, ctx: &dyn Context) -> Result<Op, Error> {
        if parameters.nesting_too_deep() {
            error!("Recursion too deep for {}", parameters.invocation);
            return Err(Error::Recursion(
                parameters.invocation,
                parameters.definition,
            ));
        }

        // A pipeline?
        if parameters.definition.is_pipeline() {
            trace!("Pipeline: {}", parameters.definition);
            return crate::inner_op::pipeline::new(&parameters, ctx);
        }

        let name = parameters.definition.operator_name("");

        // A user defined operator?
        if !name.is_resource_name() {
            if let Ok(constructor) = ctx.get_op(&name) {
                debug!("User defined operator: {name}");
                return constructor.0(&parameters, ctx)?.handle_op_inversion();
            }
        }
        // A macro?
        else if let Ok(macro_definition) = ctx.get_resource(&name) {
            debug!("Macro expansion: {name} -> {macro_definition}");
            let inverted = parameters.definition.split_into_parameters().contains_key("inv");
            let next_param = parameters.expand(&macro_definition);
            return Op::op(next_param, ctx)?.handle_inversion(inverted);
        }

        // A built in operator?
        if let Ok(constructor) = crate::inner_op::builtin(&name) {
            trace!("Built in operator: {name}");
            return constructor.0(&parameters, ctx)?.handle_op_inversion();
        }

        Err(Error::NotFound(
            name,
            ": ".to_string() + &parameters.definition,
        ))
    }

    fn handle_op_inversion(self) -> Result<Op, Error> {
        let inverted = self.params.boolean("inv");
        self.handle_inversion(inverted)
    }

    fn handle_inversion(mut self, inverted: bool) -> Result<Op, Error> {
        if self.descriptor.invertible {
            if inverted {
                self.descriptor.inverted = !self.descriptor.inverted;
            }
            return Ok(self);
        }
        if inverted {
            return Err(Error::NonInvertible(self.descriptor.instantiated_as));
        }

        Ok(self)
    }
}

// ----- T E S T S ------------------------------------------------------------------
