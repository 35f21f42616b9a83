use std::collections::BTreeMap;

/// A MAF header: the `##maf` line variables and the alignment parameters line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    /// Variable-value pairs from the `##maf` line
    pub vars: BTreeMap<String, String>,
    /// Alignment parameters from the header comment lines
    pub alignment_params: BTreeMap<String, String>,
}

impl Header {
    pub fn new(vars: BTreeMap<String, String>, alignment_params: BTreeMap<String, String>) -> Self {
        Self {
            vars,
            alignment_params,
        }
    }

    /// The required `version` variable
    pub fn version(&self) -> Option<&str> {
        self.vars.get("version").map(String::as_str)
    }

    /// The optional `scoring` variable
    pub fn scoring(&self) -> Option<&str> {
        self.vars.get("scoring").map(String::as_str)
    }
}
