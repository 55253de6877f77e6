//! Domain layer constants
//!
//! Key prefixes and interpolation markers shared by the descriptors and the
//! container. Infrastructure-specific constants remain in
//! `wirebox_infrastructure::constants`.

// ============================================================================
// KEY SPACE
// ============================================================================

/// Prefix of plain parameter keys
pub const PARAMETERS_PREFIX: &str = "parameters.";

/// Prefix of service definition keys
pub const SERVICES_PREFIX: &str = "services.";

/// Prefix of alias keys
pub const ALIASES_PREFIX: &str = "aliases.";

/// Prefix of listener group keys
pub const LISTENERS_PREFIX: &str = "listeners.";

/// Prefix of visibility flags
pub const PUBLIC_PREFIX: &str = "public.";

// ============================================================================
// INTERPOLATION
// ============================================================================

/// Delimiter around a referenced key (`%some.key%`)
pub const REFERENCE_DELIMITER: char = '%';

/// Marker making a whole-string reference optional (`%?some.key%`)
pub const OPTIONAL_REFERENCE_MARKER: char = '?';

// ============================================================================
// DECLARATIVE SERVICE FIELDS
// ============================================================================

/// Preferred class identifier field
pub const FIELD_CLASS_NAME: &str = "className";

/// Short class identifier field
pub const FIELD_CLASS: &str = "class";

/// Constructor arguments field
pub const FIELD_ARGUMENTS: &str = "arguments";

/// Property assignments field
pub const FIELD_PROPERTIES: &str = "properties";

/// Post-construction calls field
pub const FIELD_CALLS: &str = "calls";

/// Per-event listeners field
pub const FIELD_LISTENERS: &str = "listeners";

/// Alias field
pub const FIELD_ALIAS: &str = "alias";

/// Visibility field
pub const FIELD_PUBLIC: &str = "public";
