use super::*;

/// Interface between the high level [Op::op()](crate::op::Op) and the low level
/// functionality in the [InnerOp](crate::inner_op::InnerOp)s
///
/// `RawParameters` is the vehicle used by the `Op`erator factory in `Op::op(...)`,
/// to ferry args around from the invocator into the constructor of the individual
/// `InnerOp`s.
///
/// The `InnerOp`constructor typically interprets the contents of
/// `RawParameters`, and converts it into a more runtime friendly instance of
/// `ParsedParameters`.
#[derive(Debug, Default, Clone)]
pub struct RawParameters {
    pub invocation: String,
    pub definition: String,
    pub globals: BTreeMap<String, String>,
    pub recursion_level: usize,
}

/// Macros referring to macros referring to... gets cut off here
const MAX_RECURSION_LEVEL: usize = 100;

impl RawParameters {
    pub fn new(invocation: &str, globals: &BTreeMap<String, String>) -> RawParameters {
        // This, and RawParameters::expand() should be the only places, where the
        // syntax cleanup functions from the Tokenize trait are needed
        let invocation = invocation.remove_comments();
        let definition = handle_prefix_modifiers(&invocation);
        RawParameters {
            invocation,
            definition,
            globals: globals.clone(),
            recursion_level: 0,
        }
    }

    /// The parameters for instantiating a step of a pipeline
    pub fn next(&self, definition: &str) -> RawParameters {
        RawParameters {
            invocation: self.invocation.clone(),
            definition: handle_prefix_modifiers(definition),
            globals: self.globals.clone(),
            recursion_level: self.recursion_level + 1,
        }
    }

    /// The parameters for instantiating the expansion of a macro. The
    /// arguments given at the macro invocation become globals, available
    /// to all steps of the expansion
    pub fn expand(&self, macro_definition: &str) -> RawParameters {
        let mut next = self.next(&macro_definition.remove_comments());
        let mut arguments = self.definition.split_into_parameters();
        arguments.remove("name");
        arguments.remove("inv");
        next.globals.extend(arguments);
        next
    }

    pub fn nesting_too_deep(&self) -> bool {
        self.recursion_level > MAX_RECURSION_LEVEL
    }
}

// An `inv` modifier may precede the operator name. We rotate it to the
// end, so the operator name comes first. Pipelines are split into steps
// before this applies, so a prefix modifier only affects its own step.
fn handle_prefix_modifiers(definition: &str) -> String {
    if definition.is_pipeline() {
        return definition.to_string();
    }
    let elements: Vec<&str> = definition.split_whitespace().collect();
    if elements.len() > 1 && elements[0] == "inv" {
        let mut rotated = elements[1..].to_vec();
        rotated.push("inv");
        return rotated.join(" ");
    }
    definition.to_string()
}

// ----- T E S T S ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_and_expansion() {
        let globals = BTreeMap::from([("ellps".to_string(), "GRS80".to_string())]);
        let raw = RawParameters::new("inv omerc   variant # comment", &globals);
        assert_eq!(raw.definition, "omerc variant inv");
        assert_eq!(raw.recursion_level, 0);

        let raw = RawParameters::new("borneo:rso x_0=0 inv", &globals);
        let expanded = raw.expand("omerc variant x_0=*590476.87");
        assert_eq!(expanded.definition, "omerc variant x_0=*590476.87");
        assert_eq!(expanded.globals["x_0"], "0");
        assert_eq!(expanded.globals["ellps"], "GRS80");
        assert!(!expanded.globals.contains_key("inv"));
        assert_eq!(expanded.recursion_level, 1);

        // Pipelines are left for the pipeline constructor to split
        let raw = RawParameters::new("inv cart | helmert x=1", &globals);
        assert_eq!(raw.definition, "inv cart|helmert x=1");
        assert_eq!(raw.next("inv cart").definition, "cart inv");
    }
}
