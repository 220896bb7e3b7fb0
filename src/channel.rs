//! Notification channel selector (spec.md §4.3).
//!
//! A line may begin with an `@N` word naming which notification channel the
//! rest of the line's output should be attributed to. The selection is
//! line-local: it resets to the permanent channel 0 before each new line is
//! processed, never carries over.

use crate::device::NotificationChannel;

/// Parse a leading `@N` selector word, if present. Returns the selector
/// and the remaining words (selector word consumed) when the word matches
/// `@` followed by a valid decimal channel number in range; otherwise
/// returns the permanent channel and the full, unmodified word list — an
/// `@` word with an invalid or out-of-range number is just a normal first
/// word of the line (spec.md §7 kind 1: malformed selector doesn't abort).
pub fn select_channel<'a>(
    words: &[&'a str],
    outfifo_max: u16,
) -> (NotificationChannel, &'a [&'a str]) {
    match words.split_first() {
        Some((&first, rest)) => match first.strip_prefix('@') {
            Some(digits) if !digits.is_empty() => match digits.parse::<u16>() {
                Ok(n) => match NotificationChannel::in_range(n, outfifo_max) {
                    Some(chan) => (chan, rest),
                    None => (NotificationChannel::PERMANENT, words),
                },
                Err(_) => (NotificationChannel::PERMANENT, words),
            },
            _ => (NotificationChannel::PERMANENT, words),
        },
        None => (NotificationChannel::PERMANENT, words),
    }
}
