/// Error code registry for site-kpi
///
/// Error codes are organized by category:
/// - 1000-1999: Configuration errors
/// - 2000-2999: Input source errors
/// - 3000-3999: Data errors
/// - 4000-4999: Computation errors
/// - 5000-5999: Report errors
pub struct ErrorCode;

impl ErrorCode {
    // Configuration errors (1000-1999)
    pub const CONFIG_GENERIC: u16 = 1000;
    pub const CONFIG_NOT_FOUND: u16 = 1001;
    pub const CONFIG_PARSE_ERROR: u16 = 1002;
    pub const CONFIG_MISSING_REQUIRED: u16 = 1003;
    pub const CONFIG_INVALID_VALUE: u16 = 1004;
    pub const CONFIG_DUPLICATE_REGION: u16 = 1005;

    // Source errors (2000-2999)
    pub const SOURCE_GENERIC: u16 = 2000;
    pub const SOURCE_NOT_FOUND: u16 = 2001;
    pub const SOURCE_IO_ERROR: u16 = 2002;
    pub const SOURCE_MISSING_COLUMN: u16 = 2003;
    pub const SOURCE_MALFORMED_ROW: u16 = 2004;

    // Data errors (3000-3999)
    pub const DATA_GENERIC: u16 = 3000;
    pub const DATA_NO_SITE_SOURCES: u16 = 3001;

    // Computation errors (4000-4999)
    pub const COMPUTE_GENERIC: u16 = 4000;
    pub const COMPUTE_INVALID_CAPACITY: u16 = 4001;
    pub const COMPUTE_DIVISION_BY_ZERO: u16 = 4002;

    // Report errors (5000-5999)
    pub const REPORT_GENERIC: u16 = 5000;
    pub const REPORT_IO_ERROR: u16 = 5001;
    pub const REPORT_SERIALIZATION_ERROR: u16 = 5002;
}

/// Get a human-readable description for an error code
pub fn describe_error_code(code: u16) -> &'static str {
    match code {
        1000 => "Generic configuration error",
        1001 => "Configuration file not found",
        1002 => "Failed to parse configuration",
        1003 => "Required configuration field is missing",
        1004 => "Invalid value in configuration",
        1005 => "Region key declared more than once",

        2000 => "Generic input source error",
        2001 => "Input source not found",
        2002 => "Input source I/O error",
        2003 => "Input source is missing a required column",
        2004 => "Input source contains a malformed row",

        3000 => "Generic data error",
        3001 => "No site source could be loaded",

        4000 => "Generic computation error",
        4001 => "Capacity window must be a positive number of hours",
        4002 => "Division by zero",

        5000 => "Generic report error",
        5001 => "Report I/O error",
        5002 => "Report serialization error",

        _ => "Unknown error code",
    }
}
