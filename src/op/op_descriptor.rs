use super::*;

/// The fundamental elements of an operator (i.e. everything but steps and args)
#[derive(Debug, Default)]
pub struct OpDescriptor {
    pub instantiated_as: String, // e.g. cart ellps=WGS84 | helmert x=679 | cart inv ellps=evrstSS
    pub steps: Vec<String>,
    pub invertible: bool,
    pub inverted: bool,
    pub fwd: InnerOp,
    pub inv: InnerOp,
}

impl OpDescriptor {
    pub fn new(definition: &str, fwd: InnerOp, inv: Option<InnerOp>) -> OpDescriptor {
        let instantiated_as = definition.to_string();
        let steps = definition.split_into_steps().0;
        let invertible = inv.is_some();
        let inverted = false; // Handled higher up in the call hierarchy
        let inv = inv.unwrap_or_default();
        OpDescriptor {
            instantiated_as,
            steps,
            invertible,
            inverted,
            fwd,
            inv,
        }
    }
}
