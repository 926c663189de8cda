//! Canonical structured field keys and value-format helpers.

pub const EVENT: &str = "event";
pub const COMPONENT: &str = "component";
pub const SUBJECT: &str = "subject";
pub const PATTERN: &str = "pattern";
pub const SEQUENCE: &str = "sequence";
pub const HANDLERS: &str = "handlers";
pub const FEED_ID: &str = "feed_id";
pub const ERR: &str = "err";
pub const REASON: &str = "reason";

pub const NONE: &str = "none";
pub const REASON_CHANNEL_CLOSED: &str = "channel_closed";

const SUBJECT_FIELD_MAX_LEN: usize = 120;

/// Formats a subject for log fields, bounding unbounded caller input.
pub fn format_subject(subject: &str) -> String {
    if subject.is_empty() {
        return NONE.to_string();
    }
    if subject.len() <= SUBJECT_FIELD_MAX_LEN {
        return subject.to_string();
    }
    let mut cut = SUBJECT_FIELD_MAX_LEN;
    while !subject.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}...", &subject[..cut])
}
