use crate::internal::*;
mod minimal;
pub use minimal::Minimal;

// ----- T H E   C O N T E X T   T R A I T ---------------------------------------------

/// The `Context` trait defines the mode of communication between the operator
/// machinery and the external context, i.e. the registry of macros (resources)
/// and user defined operators, and the store of instantiated operators.
pub trait Context {
    /// In general, implementations should make sure that `new` differs from `default`
    /// only by adding access to the builtin resources (`borneo:rso` etc.)
    fn new() -> Self
    where
        Self: Sized;

    /// Instantiate the operation given by `definition`
    fn op(&mut self, definition: &str) -> Result<OpHandle, Error>;

    /// Apply operation `op` to `operands`
    fn apply(
        &self,
        op: OpHandle,
        direction: Direction,
        operands: &mut dyn CoordinateSet,
    ) -> Result<usize, Error>;

    /// Globally defined default values (typically just `ellps=GRS80`)
    fn globals(&self) -> BTreeMap<String, String>;

    /// Definitions of the steps
    fn steps(&self, op: OpHandle) -> Result<&Vec<String>, Error>;

    /// Parsed parameters of a specific step
    fn params(&self, op: OpHandle, index: usize) -> Result<&ParsedParameters, Error>;

    /// Register a new user-defined operator
    fn register_op(&mut self, name: &str, constructor: OpConstructor);
    /// Register a new user-defined resource (macro)
    fn register_resource(&mut self, name: &str, definition: &str);

    /// Helper for the `Op` instantiation logic in `Op::op(...)`
    fn get_op(&self, name: &str) -> Result<OpConstructor, Error>;
    /// Helper for the `Op` instantiation logic in `Op::op(...)`
    fn get_resource(&self, name: &str) -> Result<String, Error>;
}

/// The Borneo datum shifts and grids as macros, generated from the same
/// parameter sets the typed API uses.
#[rustfmt::skip]
pub fn builtin_resources() -> Vec<(&'static str, String)> {
    use crate::datum::{Gdm2000, Timbalai1948, Wgs84};
    let wgs84_timbalai = HelmertParameters::<Wgs84, Timbalai1948>::wgs84_to_timbalai();
    let wgs84_gdm2000 = HelmertParameters::<Wgs84, Gdm2000>::wgs84_to_gdm2000();
    let molodensky = MolodenskyParameters::<Wgs84, Timbalai1948>::wgs84_to_timbalai();

    vec![
        ("borneo:wgs84_timbalai",            wgs84_timbalai.geodetic_definition()),
        ("borneo:wgs84_timbalai_molodensky", molodensky.definition()),
        ("borneo:wgs84_gdm2000",             wgs84_gdm2000.geodetic_definition()),
        ("borneo:rso",        ProjectionParameters::<Timbalai1948>::rso_borneo().definition()),
        ("borneo:rso_sabah",  ProjectionParameters::<Timbalai1948>::rso_borneo_sabah().definition()),
        ("borneo:rso_offset", ProjectionParameters::<Timbalai1948>::rso_borneo_offset().definition()),
        ("borneo:brso",       ProjectionParameters::<Gdm2000>::brso().definition()),
        ("borneo:wgs84_rso",            "borneo:wgs84_timbalai | borneo:rso".to_string()),
        ("borneo:wgs84_rso_molodensky", "borneo:wgs84_timbalai_molodensky | borneo:rso".to_string()),
        ("borneo:wgs84_brso",           "borneo:wgs84_gdm2000 | borneo:brso".to_string()),
    ]
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resources() -> Result<(), Error> {
        let resources = builtin_resources();
        assert_eq!(resources.len(), 10);
        let names: BTreeSet<&str> = resources.iter().map(|r| r.0).collect();
        assert_eq!(names.len(), resources.len());
        assert!(names.iter().all(|name| name.is_resource_name()));

        let lookup = |name: &str| {
            resources
                .iter()
                .find(|r| r.0 == name)
                .map(|r| r.1.clone())
                .unwrap_or_default()
        };
        assert_eq!(
            lookup("borneo:wgs84_timbalai"),
            "cart ellps=WGS84 | helmert x=679 y=-669 z=48 | cart inv ellps=evrstSS"
        );
        assert!(lookup("borneo:rso").starts_with("omerc ellps=evrstSS"));
        assert!(lookup("borneo:rso").ends_with(" variant"));
        assert!(lookup("borneo:brso").starts_with("omerc ellps=GRS80"));
        assert!(!lookup("borneo:brso").contains("variant"));

        // Every one of them instantiates
        let mut ctx = Minimal::new();
        for (name, _) in &resources {
            ctx.op(name)?;
        }
        Ok(())
    }
}
