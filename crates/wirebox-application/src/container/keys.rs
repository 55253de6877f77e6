//! Key classification by reserved prefix

use wirebox_domain::constants::{
    ALIASES_PREFIX, LISTENERS_PREFIX, PARAMETERS_PREFIX, PUBLIC_PREFIX, SERVICES_PREFIX,
};

/// Semantics of a key, decided purely by its prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// `parameters.*`
    Parameter,
    /// `services.*`
    Service,
    /// `aliases.*`
    Alias,
    /// `listeners.*`
    Listener,
    /// `public.*`
    Public,
    /// Anything else, treated as a plain parameter
    Other,
}

impl KeyKind {
    pub fn of(key: &str) -> Self {
        if key.starts_with(PARAMETERS_PREFIX) {
            Self::Parameter
        } else if key.starts_with(SERVICES_PREFIX) {
            Self::Service
        } else if key.starts_with(ALIASES_PREFIX) {
            Self::Alias
        } else if key.starts_with(LISTENERS_PREFIX) {
            Self::Listener
        } else if key.starts_with(PUBLIC_PREFIX) {
            Self::Public
        } else {
            Self::Other
        }
    }
}
