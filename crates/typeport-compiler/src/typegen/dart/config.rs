//! Configuration types for Dart emission.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render scalar aliases as extension types (Dart 3.3+). When off,
    /// aliases are typedefs and only a comment records that they are distinct.
    pub nominal_aliases: bool,
    /// Whether to emit the generated-file header
    pub header: bool,
    /// Emit `<name>FromJson` / `<name>ToJson` functions after each
    /// declaration. Unions travel as `{"Kind": tag, "Data": member}`.
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            nominal_aliases: true,
            header: false,
            json: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nominal_aliases(mut self, value: bool) -> Self {
        self.nominal_aliases = value;
        self
    }

    pub fn header(mut self, value: bool) -> Self {
        self.header = value;
        self
    }

    pub fn json(mut self, value: bool) -> Self {
        self.json = value;
        self
    }
}
