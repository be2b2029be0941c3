//! Common constants and address arithmetic shared by every component.

/// Word-address field helpers (tag/index/offset split).
pub mod addr;
/// Architectural and geometry constants.
pub mod constants;
