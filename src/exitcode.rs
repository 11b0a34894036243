//! Standard exit codes (BSD sysexits.h compatible)

/// Data format error
pub const DATAERR: i32 = 65;

/// Configuration error
pub const CONFIG: i32 = 78;
