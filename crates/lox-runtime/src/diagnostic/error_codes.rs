//! Error code registry with descriptions and help text
//!
//! Codes follow the LXxxxx scheme.
//! Ranges:
//! - LX0xxx: Runtime errors
//! - LX1xxx: Lexical and syntax errors

// === Error Code Constants ===

// LX0xxx - Runtime Errors
pub const TYPE_MISMATCH: &str = "LX0001";
pub const UNDEFINED_VARIABLE: &str = "LX0002";
pub const UNSUPPORTED_FEATURE: &str = "LX0003";
pub const INVALID_OPERATOR: &str = "LX0004";

// LX1xxx - Lexical and Syntax Errors
pub const SYNTAX_ERROR: &str = "LX1000";
pub const UNEXPECTED_CHARACTER: &str = "LX1001";
pub const UNTERMINATED_STRING: &str = "LX1002";
pub const INVALID_ASSIGNMENT_TARGET: &str = "LX1003";
pub const TOO_MANY_ARGUMENTS: &str = "LX1004";

// === Error Code Info Registry ===

/// Error code descriptor with code, description, and optional help text
#[derive(Debug, Clone)]
pub struct ErrorCodeInfo {
    /// The error code string (e.g., "LX0001")
    pub code: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Optional contextual help text
    pub help: Option<&'static str>,
}

/// Get info for an error code, if known
pub fn lookup(code: &str) -> Option<ErrorCodeInfo> {
    ERROR_CODES.iter().find(|e| e.code == code).cloned()
}

/// Get help text for an error code
pub fn help_for(code: &str) -> Option<&'static str> {
    lookup(code).and_then(|e| e.help)
}

/// Get description for an error code
pub fn description_for(code: &str) -> Option<&'static str> {
    lookup(code).map(|e| e.description)
}

/// All known error codes with descriptions and help
pub static ERROR_CODES: &[ErrorCodeInfo] = &[
    // === LX0xxx: Runtime Errors ===
    ErrorCodeInfo {
        code: "LX0001",
        description: "Type mismatch",
        help: Some(
            "Arithmetic and comparison need numbers; '+' also joins two strings.",
        ),
    },
    ErrorCodeInfo {
        code: "LX0002",
        description: "Undefined variable",
        help: Some("Declare the variable with 'var' before reading or assigning it."),
    },
    ErrorCodeInfo {
        code: "LX0003",
        description: "Unsupported feature",
        help: Some("Calls, properties, 'this' and 'super' parse but cannot run yet."),
    },
    ErrorCodeInfo {
        code: "LX0004",
        description: "Invalid operator",
        help: Some("The tree holds an operator token that its expression kind does not accept."),
    },
    // === LX1xxx: Lexical and Syntax Errors ===
    ErrorCodeInfo {
        code: "LX1000",
        description: "Syntax error",
        help: None,
    },
    ErrorCodeInfo {
        code: "LX1001",
        description: "Unexpected character",
        help: Some("Remove the character or put it inside a string literal."),
    },
    ErrorCodeInfo {
        code: "LX1002",
        description: "Unterminated string",
        help: Some("Add a closing '\"' to finish the string literal."),
    },
    ErrorCodeInfo {
        code: "LX1003",
        description: "Invalid assignment target",
        help: Some("Only a variable name can appear on the left of '='."),
    },
    ErrorCodeInfo {
        code: "LX1004",
        description: "Too many arguments",
        help: Some("A call accepts at most 255 arguments."),
    },
];
