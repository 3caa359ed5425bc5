//! Stable error codes for programmatic matching.
//!
//! Display strings may be reworded between releases; the bracketed code at
//! the front of each message is the stable contract. Every code also comes
//! back from the erroring type's `code()` method.

/// Reader constructed with a fetch size of zero.
pub const READ_INVALID_FETCH_SIZE: &str = "TBLDIFF_READ_001";
/// Row-offset pair carrying neither a new-side nor an old-side offset.
pub const READ_MALFORMED_ROW_PAIR: &str = "TBLDIFF_READ_002";
/// Primary-key index pointing past the end of its column list.
pub const READ_PK_OUT_OF_RANGE: &str = "TBLDIFF_READ_003";
/// Row source answered a batch with the wrong number of rows.
pub const READ_ROW_COUNT_MISMATCH: &str = "TBLDIFF_READ_004";
/// Row source answered with a row of the wrong width.
pub const READ_ROW_WIDTH_MISMATCH: &str = "TBLDIFF_READ_005";
/// Row source failure, wrapped and re-surfaced at the failing pull.
pub const READ_SOURCE_FAILURE: &str = "TBLDIFF_READ_006";

/// Transport-level fetch failure reported by a row source.
pub const SOURCE_FETCH_FAILED: &str = "TBLDIFF_SOURCE_001";
/// Row source knows no table with the requested checksum.
pub const SOURCE_TABLE_UNKNOWN: &str = "TBLDIFF_SOURCE_002";
/// Requested offset lies beyond the end of the table.
pub const SOURCE_OFFSET_OUT_OF_RANGE: &str = "TBLDIFF_SOURCE_003";
