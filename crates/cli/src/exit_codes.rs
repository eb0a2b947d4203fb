//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract — scripts rely on them.
//!
//! | Code | Description                                   |
//! |------|-----------------------------------------------|
//! | 0    | Success — every AWB number matched            |
//! | 1    | Unmatched rows found (like `diff(1)`)         |
//! | 2    | CLI usage error (bad args; emitted by clap)   |
//! | 3    | IO error (cannot write artifacts, serve fail) |
//! | 5    | Parse error reading input files               |

/// Success - comparison ran and every row matched.
pub const EXIT_SUCCESS: u8 = 0;

/// Comparison ran but some rows are unmatched.
/// Like `diff(1)`, exit 1 means "files differ."
pub const EXIT_UNMATCHED: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// IO error writing artifacts or running the server.
pub const EXIT_IO: u8 = 3;

/// Parse error reading input files (unreadable file, missing column,
/// non-numeric weight).
pub const EXIT_PARSE: u8 = 5;
