//! Qualified declaration identities.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a declaration: the module path it lives in plus its local name.
///
/// Written as `module.Name`. Module paths may contain dots themselves
/// (`example.com/api`), so parsing splits at the *last* dot. Instance names
/// carry their argument in brackets (`pkg.Holder[pkg.Id]`); dots inside the
/// brackets belong to the name. An identity without a module is written as
/// the bare name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity {
    module: String,
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseIdentityError {
    #[error("identity is empty")]
    Empty,
    #[error("identity `{0}` has an empty local name")]
    EmptyName(String),
}

impl Identity {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Parse `module.Name`, splitting at the last `.` before any `[`.
    pub fn parse(s: &str) -> Result<Self, ParseIdentityError> {
        if s.is_empty() {
            return Err(ParseIdentityError::Empty);
        }
        let head = s.find('[').map_or(s, |bracket| &s[..bracket]);
        let (module, name) = match head.rfind('.') {
            Some(dot) => (&s[..dot], &s[dot + 1..]),
            None => ("", s),
        };
        if name.is_empty() {
            return Err(ParseIdentityError::EmptyName(s.to_string()));
        }
        Ok(Self::new(module, name))
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    /// Local name inside the module.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn qualified(&self) -> String {
        self.to_string()
    }

    fn qualified_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let sep: &[u8] = if self.module.is_empty() { b"" } else { b"." };
        self.module
            .bytes()
            .chain(sep.iter().copied())
            .chain(self.name.bytes())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.module.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.module, self.name)
        }
    }
}

/// Identities order by their qualified text, so `a.b.C` sorts before `a.z.C`
/// regardless of where the module/name split falls.
impl Ord for Identity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.qualified_bytes()
            .cmp(other.qualified_bytes())
            .then_with(|| self.module.cmp(&other.module))
    }
}

impl PartialOrd for Identity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl TryFrom<String> for Identity {
    type Error = ParseIdentityError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.to_string()
    }
}
