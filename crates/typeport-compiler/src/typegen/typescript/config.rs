//! Configuration types for TypeScript emission.

use serde::Deserialize;

/// Configuration for TypeScript emission.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether to export declarations
    pub export: bool,
    /// Render scalar aliases as branded types. When off, aliases are plain and
    /// only a comment records that they are distinct.
    pub brand_aliases: bool,
    /// Whether to emit the generated-file header
    pub header: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export: true,
            brand_aliases: true,
            header: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(mut self, value: bool) -> Self {
        self.export = value;
        self
    }

    pub fn brand_aliases(mut self, value: bool) -> Self {
        self.brand_aliases = value;
        self
    }

    pub fn header(mut self, value: bool) -> Self {
        self.header = value;
        self
    }
}
