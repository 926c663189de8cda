//! Canonical structured event names used across `subject-router`.

// Registration events.
pub const PATTERN_ADD_START: &str = "pattern_add_start";
pub const PATTERN_ADD_OK: &str = "pattern_add_ok";
pub const PATTERN_ADD_FAILED: &str = "pattern_add_failed";

// Matching and dispatch events.
pub const BRANCH_PROMOTE: &str = "branch_promote";
pub const DISPATCH_START: &str = "dispatch_start";
pub const DISPATCH_NO_MATCH: &str = "dispatch_no_match";
pub const DISPATCH_OK: &str = "dispatch_ok";
pub const DISPATCH_HANDLER_FAILED: &str = "dispatch_handler_failed";

// Dispatch-feed lifecycle events.
pub const FEED_RECEIVE: &str = "feed_receive";
pub const FEED_DISPATCH_OK: &str = "feed_dispatch_ok";
pub const FEED_DISPATCH_FAILED: &str = "feed_dispatch_failed";
pub const FEED_CLOSED: &str = "feed_closed";
