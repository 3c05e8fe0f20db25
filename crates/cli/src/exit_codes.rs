//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Code | Domain    | Description                                        |
//! |------|-----------|----------------------------------------------------|
//! | 0    | Universal | Success                                            |
//! | 1    | check     | Rows were flagged and `--strict-exit` was given    |
//! | 2    | Universal | CLI usage error (bad args)                         |
//! | 3    | ingest    | Input file missing, unreadable or not rectangular  |
//! | 4    | config    | Role columns, ITEM column or config file rejected  |
//! | 5    | output    | Cannot write result CSVs or JSON report            |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use sffcheck::ValidationError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options.
/// clap exits with this code on its own parse failures.
#[allow(dead_code)]
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Validation (1, 3-5)
// =============================================================================

/// At least one row was flagged by either rule (only with --strict-exit).
/// Like `diff(1)`, exit 1 means "something to look at."
pub const EXIT_FINDINGS: u8 = 1;

/// Input could not be read or parsed into a table.
pub const EXIT_INGEST: u8 = 3;

/// Column selection, ITEM column, or config file is invalid.
pub const EXIT_CONFIG: u8 = 4;

/// Result artifacts could not be written.
pub const EXIT_OUTPUT: u8 = 5;

/// Map an engine error to its exit code.
pub fn validation_exit_code(err: &ValidationError) -> u8 {
    if err.is_ingestion() {
        EXIT_INGEST
    } else if err.is_configuration() {
        EXIT_CONFIG
    } else {
        EXIT_OUTPUT
    }
}
