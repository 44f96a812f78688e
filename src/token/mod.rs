use std::collections::BTreeMap;

/// Convenience methods for lexical analysis of operator definitions.
/// - For splitting a pipeline into steps
/// - For splitting a step into parameters (i.e. key=value-pairs)
/// - For syntactical normalization by eliminating non-significant whitespace
/// - For checking whether a given operator is singular or a pipeline
/// - For checking whether a key is a macro name ("resource name"), and
/// - For accessing the name of a given operator.
pub trait Tokenize {
    /// Split a pipeline definition into steps and a potentially empty docstring
    fn split_into_steps(&self) -> (Vec<String>, String);

    /// Split a step/an operation into parameters. Give special treatment
    /// to names and flags:
    /// ```txt
    /// 'foo bar=baz bonk=blue flag' -> ('name=foo', 'bar=baz', 'bonk=blue', 'flag=true')
    /// ```
    fn split_into_parameters(&self) -> BTreeMap<String, String>;

    /// Glue syntactical elements together, and separate from each other
    /// by a single space:
    ///
    /// 1. Glue key-value pairs together by omitting whitespace around '=':
    ///    ```txt
    ///    key1= value1            key2    =value2  ->  key1=value1 key2=value2
    ///    ```
    /// 2. Trim whitespace on both sides of the macro sigil ':', which also
    ///    glues sexagesimal angles together:
    ///    ```txt
    ///    borneo: rso  alpha=53 : 18 : 56.9537 -> borneo:rso alpha=53:18:56.9537
    ///    ```
    /// 3. Trim whitespace around sequence separators ',' and '|':
    ///    ```txt
    ///     foo | bar baz=bonk   ,    bonk  ->  foo|bar baz=bonk,bonk
    ///    ```
    fn normalize(&self) -> String;

    /// Remove `#` comments and docstrings, and return the definition
    /// in normalized form
    fn remove_comments(&self) -> String;

    fn is_pipeline(&self) -> bool;
    fn is_resource_name(&self) -> bool;
    fn operator_name(&self, default: &str) -> String;
}

/// Tokenize implementation for string-like objects
impl<T> Tokenize for T
where
    T: AsRef<str>,
{
    fn split_into_steps(&self) -> (Vec<String>, String) {
        // Impose some line ending sanity
        let all = self
            .as_ref()
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .trim()
            .to_string();

        // Collect docstrings and remove plain comments
        let mut trimmed = String::new();
        let mut docstring = Vec::<String>::new();
        for line in all.lines() {
            let line = line.trim();

            if let Some(doc) = line.strip_prefix("##") {
                docstring.push(doc.trim().to_string());
                continue;
            }

            // Inline comment, full line comment, or no comment at all:
            // Collect everything before `#`
            let before_comment = line.split('#').next().unwrap_or_default();
            trimmed += " ";
            trimmed += before_comment.trim();
        }

        let docstring = docstring.join("\n").trim().to_string();

        // Remove empty steps and other non-significant whitespace
        let steps: Vec<String> = trimmed
            .normalize()
            .split('|')
            .map(|x| x.trim())
            .filter(|x| !x.is_empty())
            .map(|x| x.to_string())
            .collect();

        (steps, docstring)
    }

    fn split_into_parameters(&self) -> BTreeMap<String, String> {
        // Remove non-significant whitespace
        let step = self.normalize();
        let mut params = BTreeMap::new();
        for element in step.split_whitespace() {
            // Split a key=value-pair into key and value parts. Flags get
            // the value "true" (flags are booleans that are true when
            // specified, false when not)
            let (key, value) = match element.split_once('=') {
                Some((key, value)) => (key, value),
                None => (element, "true"),
            };

            // If the first arg is a key-without-value, it is the name of the operator
            if params.is_empty() && !element.contains('=') {
                params.insert(String::from("name"), String::from(key));
                continue;
            }

            params.insert(String::from(key), String::from(value));
        }

        params
    }

    fn normalize(&self) -> String {
        let elements: Vec<_> = self.as_ref().split_whitespace().collect();
        elements
            .join(" ")
            .replace("= ", "=")
            .replace(": ", ":")
            .replace(", ", ",")
            .replace("| ", "|")
            .replace(" =", "=")
            .replace(" :", ":")
            .replace(" ,", ",")
            .replace(" |", "|")
    }

    fn remove_comments(&self) -> String {
        self.split_into_steps().0.join("|")
    }

    fn is_pipeline(&self) -> bool {
        self.as_ref().contains('|')
    }

    fn is_resource_name(&self) -> bool {
        self.operator_name("").contains(':')
    }

    fn operator_name(&self, default: &str) -> String {
        if self.is_pipeline() {
            return default.to_string();
        }
        self.split_into_parameters()
            .get("name")
            .unwrap_or(&default.to_string())
            .to_string()
    }
}

// ----- T E S T S ------------------------------------------------------------------
