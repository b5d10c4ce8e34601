// =============================================================================
// Application Identity
// =============================================================================

/// Application name in lowercase (for paths and identifiers)
pub const APP_NAME_LOWER: &str = "rqp";

// =============================================================================
// Filter Defaults
// =============================================================================

/// Default separator of list values (`id[in]=1,2,3`)
pub const DEFAULT_DELIMITER: char = ',';

/// Default document-store identity field for `mongoid` declarations
pub const DEFAULT_IDENTITY_FIELD: &str = "_id";

/// Literal recognised (case-insensitively) as the NULL sentinel
pub const NULL_LITERAL: &str = "NULL";

/// Characters that would make key or pair parsing ambiguous as a delimiter
pub const RESERVED_DELIMITERS: &[char] = &['[', ']', '='];

// =============================================================================
// Environment Variables
// =============================================================================

/// Environment variable for the list delimiter
pub const ENV_DELIMITER: &str = "RQP_DELIMITER";

/// Environment variable for the identity field name
pub const ENV_IDENTITY_FIELD: &str = "RQP_IDENTITY_FIELD";

/// Environment variable for log level/filter
pub const ENV_LOG: &str = "RQP_LOG";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "RQP_CONFIG";
