use super::*;

/// The parameters of an operator instantiation, type checked against the
/// gamut of the operator, and sorted into bins by type.
#[derive(Debug)]
pub struct ParsedParameters {
    pub name: String,

    // Commonly used options have hard-coded slots
    pub ellps: [Ellipsoid; 2],
    pub x: [f64; 4],
    pub y: [f64; 4],
    pub k: [f64; 4],

    // Op-specific options are stored in B-Trees
    pub boolean: BTreeSet<&'static str>,
    pub real: BTreeMap<&'static str, f64>,
    pub series: BTreeMap<&'static str, Vec<f64>>,
    pub text: BTreeMap<&'static str, String>,
    pub ignored: Vec<String>,
    pub given: BTreeMap<String, String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        self.real
            .get(key)
            .copied()
            .ok_or_else(|| Error::MissingParam(key.to_string()))
    }
    pub fn series(&self, key: &str) -> Result<&[f64], Error> {
        self.series
            .get(key)
            .map(|v| v.as_slice())
            .ok_or_else(|| Error::MissingParam(key.to_string()))
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        self.text
            .get(key)
            .cloned()
            .ok_or_else(|| Error::MissingParam(key.to_string()))
    }
    pub fn ignored(&self) -> Vec<String> {
        self.ignored.clone()
    }
    pub fn ellps(&self, index: usize) -> &Ellipsoid {
        &self.ellps[index]
    }
    pub fn x(&self, index: usize) -> f64 {
        self.x[index]
    }
    pub fn y(&self, index: usize) -> f64 {
        self.y[index]
    }
    pub fn k(&self, index: usize) -> f64 {
        self.k[index]
    }
}

impl ParsedParameters {
    pub fn new(
        parameters: &RawParameters,
        gamut: &[OpParameter],
    ) -> Result<ParsedParameters, Error> {
        let locals = parameters.definition.split_into_parameters();
        let globals = &parameters.globals;
        let mut boolean = BTreeSet::<&'static str>::new();
        let mut real = BTreeMap::<&'static str, f64>::new();
        let mut series = BTreeMap::<&'static str, Vec<f64>>::new();
        let mut text = BTreeMap::<&'static str, String>::new();

        // Try to locate all accepted parameters, type check, and place them into
        // their proper bins
        for p in gamut {
            match *p {
                OpParameter::Flag { key } => {
                    if let Some(value) = chase(globals, &locals, key)? {
                        if value.is_empty() || value.to_lowercase() == "true" {
                            boolean.insert(key);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a boolean constant!");
                        return Err(Error::BadParam(key.to_string(), value));
                    }
                    // Flags are always optional, i.e. implicitly false when not given
                }

                OpParameter::Real { key, default } => {
                    if let Some(value) = chase(globals, &locals, key)? {
                        if let Some(v) = angular::parse_sexagesimal(&value) {
                            real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value));
                    }

                    if let Some(value) = default {
                        real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Series { key, default } => {
                    let value = match chase(globals, &locals, key)? {
                        Some(value) => value,
                        None => match default {
                            // Defaults to nothing, so we just continue with the next parameter
                            Some("") => continue,
                            Some(value) => value.to_string(),
                            None => {
                                error!("Missing required parameter '{key}'");
                                return Err(Error::MissingParam(key.to_string()));
                            }
                        },
                    };
                    let mut elements = Vec::<f64>::new();
                    for element in value.split(',') {
                        let Some(v) = angular::parse_sexagesimal(element.trim()) else {
                            warn!("Cannot parse {key}:{value} as a series");
                            return Err(Error::BadParam(key.to_string(), value));
                        };
                        elements.push(v);
                    }
                    series.insert(key, elements);
                }

                OpParameter::Text { key, default } => {
                    if let Some(value) = chase(globals, &locals, key)? {
                        text.insert(key, value);
                        continue;
                    }

                    if let Some(value) = default {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        // Inversion is handled by the Op factory, so every operator accepts it
        if locals.contains_key("inv") {
            boolean.insert("inv");
        }

        // Now handle the commonly used options with the hard-coded slots

        let mut ellps = [Ellipsoid::default(), Ellipsoid::default()];
        let mut x = [0.; 4];
        let mut y = [0.; 4];
        let mut k = [0.; 4];

        for (i, slot) in ellps.iter_mut().enumerate() {
            if let Some(e) = text.get(format!("ellps_{i}").as_str()) {
                *slot = Ellipsoid::named(e)?;
            }
        }
        // `ellps` is an alias for `ellps_0`, unless the latter is given explicitly
        let explicit = locals.contains_key("ellps_0") || globals.contains_key("ellps_0");
        if let Some(e) = text.get("ellps") {
            if !explicit {
                ellps[0] = Ellipsoid::named(e)?;
            }
        }

        for i in 0..4 {
            x[i] = real.get(format!("x_{i}").as_str()).copied().unwrap_or(0.);
            y[i] = real.get(format!("y_{i}").as_str()).copied().unwrap_or(0.);
            k[i] = real.get(format!("k_{i}").as_str()).copied().unwrap_or(0.);
        }

        let name = locals
            .get("name")
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        // Params specified, but not used
        let known: BTreeSet<&str> = gamut.iter().map(OpParameter::key).collect();
        let ignored: Vec<String> = locals
            .keys()
            .filter(|k| !known.contains(k.as_str()) && *k != "name" && *k != "inv")
            .cloned()
            .collect();
        if !ignored.is_empty() {
            warn!("{name}: ignoring unknown parameter(s) {ignored:?}");
        }

        Ok(ParsedParameters {
            name,
            ellps,
            x,
            y,
            k,
            boolean,
            real,
            series,
            text,
            ignored,
            given: locals,
        })
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

/// Look up `key`, with locals taking precedence over globals. A value of
/// `^other` continues the search under the key `other`. A value of `*value`
/// provides a default, used unless a proper value turns up further along.
pub fn chase(
    globals: &BTreeMap<String, String>,
    locals: &BTreeMap<String, String>,
    key: &str,
) -> Result<Option<String>, Error> {
    // The haystack is a reverse iterator over both lists in series
    let mut haystack = globals.iter().chain(locals.iter()).rev();

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Syntax(String::from("Empty key")));
    }

    let mut default = "";
    let mut needle = key;
    let mut chasing = false;

    loop {
        let Some((_, found)) = haystack.find(|&x| x.0 == needle) else {
            if !default.is_empty() {
                return Ok(Some(String::from(default)));
            }
            if chasing {
                return Err(Error::Syntax(format!("Incomplete definition for '{key}'")));
            }
            return Ok(None);
        };
        let value = found.trim();

        // A(nother) lookup: Continue the search in the same iterator, now
        // using the current value as the search key
        if let Some(stripped) = value.strip_prefix('^') {
            chasing = true;
            needle = stripped;
            continue;
        }

        // A provided default: Continue the search using the same key, in case
        // a proper value is provided
        if let Some(stripped) = value.strip_prefix('*') {
            chasing = true;
            needle = key;
            default = stripped;
            continue;
        }

        return Ok(Some(value.to_string()));
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    const GAMUT: [OpParameter; 7] = [
        OpParameter::Flag    { key: "flag" },
        OpParameter::Real    { key: "real",     default: Some(1.25) },
        OpParameter::Real    { key: "alpha",    default: Some(0.) },
        OpParameter::Series  { key: "series",   default: Some("1,2,3,4") },
        OpParameter::Text    { key: "text",     default: Some("text") },
        OpParameter::Text    { key: "ellps_0",  default: Some("6400000, 300") },
        OpParameter::Real    { key: "x_0",      default: Some(0.) },
    ];

    #[test]
    fn basic() -> Result<(), Error> {
        let invocation =
            String::from("cucumber flag ellps_0=123 , 456 alpha=53:18:56.9537 banana=1");
        let globals = BTreeMap::<String, String>::new();
        let raw = RawParameters::new(&invocation, &globals);
        let p = ParsedParameters::new(&raw, &GAMUT)?;

        assert!(p.boolean("flag"));
        assert!(!p.boolean("galf"));
        assert!(!p.boolean("inv"));

        let series = p.series("series")?;
        assert_eq!(series.len(), 4);
        assert_eq!(series[0], 1.);
        assert_eq!(series[3], 4.);

        assert_eq!(p.real("real")?, 1.25);
        assert!((p.real("alpha")? - 53.315_820_472_222_22).abs() < 1e-12);
        assert_eq!(p.text("text")?, "text");
        assert_eq!(p.x(0), 0.);
        assert!(matches!(p.real("nothing"), Err(Error::MissingParam(_))));

        assert_eq!(p.ellps(0).semimajor_axis(), 123.);
        assert_eq!(p.ellps(0).flattening(), 1. / 456.);

        assert_eq!(p.name, "cucumber");
        assert_eq!(p.ignored(), vec!["banana".to_string()]);
        Ok(())
    }

    #[test]
    fn malformed_and_missing() {
        let globals = BTreeMap::<String, String>::new();
        let raw = RawParameters::new("cucumber real=abc", &globals);
        assert!(matches!(
            ParsedParameters::new(&raw, &GAMUT),
            Err(Error::BadParam(_, _))
        ));

        let required = [OpParameter::Real { key: "k_0", default: None }];
        let raw = RawParameters::new("cucumber", &globals);
        assert!(matches!(
            ParsedParameters::new(&raw, &required),
            Err(Error::MissingParam(_))
        ));
    }

    #[test]
    fn lookups_and_defaults() -> Result<(), Error> {
        let globals = BTreeMap::from([
            ("ellps".to_string(), "evrstSS".to_string()),
            ("x_0".to_string(), "590476.87".to_string()),
        ]);
        let locals = BTreeMap::from([
            ("ellps_0".to_string(), "^ellps".to_string()),
            ("real".to_string(), "*2.5".to_string()),
        ]);
        assert_eq!(chase(&globals, &locals, "ellps_0")?, Some("evrstSS".to_string()));
        assert_eq!(chase(&globals, &locals, "real")?, Some("2.5".to_string()));
        assert_eq!(chase(&globals, &locals, "x_0")?, Some("590476.87".to_string()));
        assert_eq!(chase(&globals, &locals, "y_0")?, None);

        let dangling = BTreeMap::from([("ellps_1".to_string(), "^nowhere".to_string())]);
        assert!(matches!(chase(&globals, &dangling, "ellps_1"), Err(Error::Syntax(_))));
        Ok(())
    }
}
