// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracker display-name assembly.
//!
//! Names compose fixed-order optional tokens, e.g.
//! `RESEND ☕ 📧 Chris Bean Nov [11/25] E#7 BFCM: Plan Your Brew`. Tokens
//! whose inputs are missing or unparseable are simply omitted; a task that
//! yields no tokens at all falls back to `Task {n}`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use briefpilot_core::types::ParsedTask;

/// Leading `"Email 3: "` / `"SMS 1: "` prefix stripped from the original
/// title, since the channel and number get their own tokens.
static CHANNEL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Email|SMS)\s+\d+:\s*").expect("channel prefix regex"));

/// Clients with a dedicated glyph and short name. Flat table for now; a
/// config-driven map would replace this if a second client ever needs one.
const GLYPH_CLIENTS: &[&str] = &["Christopher Bean", "Chris Bean"];
const GLYPH_CLIENT_SHORT: &str = "Chris Bean";
const GLYPH_CLIENT_MARK: &str = "☕";

/// Running per-channel sequence counters for one batch. Emails and SMS
/// tasks are numbered independently, so the third task of a batch can
/// still be `SMS#1`.
#[derive(Debug, Default)]
pub struct ChannelCounters {
    email: usize,
    sms: usize,
}

impl ChannelCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next sequence number for a task of the given message type, or
    /// zero for channels that carry no sequence token.
    pub fn advance(&mut self, message_type: &str) -> usize {
        let channel = message_type.to_lowercase();
        if channel.contains("email") {
            self.email += 1;
            self.email
        } else if channel.contains("sms") {
            self.sms += 1;
            self.sms
        } else {
            0
        }
    }
}

/// `task_number` is the task's 1-based batch position (the `Task {n}`
/// fallback); `channel_seq` is its per-channel sequence from
/// [`ChannelCounters::advance`], rendered as `E#n` / `SMS#n`.
pub fn format_display_name(task: &ParsedTask, task_number: usize, channel_seq: usize) -> String {
    let mut parts: Vec<String> = Vec::new();

    if task.is_rework() {
        parts.push(task.task_type.clone());
    }

    let glyph_client = GLYPH_CLIENTS.iter().any(|c| task.client.contains(c));
    if glyph_client {
        parts.push(GLYPH_CLIENT_MARK.to_string());
    }

    let channel = task.message_type.to_lowercase();
    if channel.contains("email") {
        parts.push("📧".to_string());
    } else if channel.contains("sms") {
        parts.push("📱".to_string());
    }

    if glyph_client {
        parts.push(GLYPH_CLIENT_SHORT.to_string());
    } else if let Some(short) = task.client.split_whitespace().next() {
        parts.push(short.to_string());
    }

    if let Some(date) = task
        .send_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
    {
        parts.push(date.format("%b").to_string());
        parts.push(date.format("[%m/%d]").to_string());
    }

    if channel.contains("email") {
        parts.push(format!("E#{channel_seq}"));
    } else if channel.contains("sms") {
        parts.push(format!("SMS#{channel_seq}"));
    }

    let title = CHANNEL_PREFIX.replace(&task.name, "");
    if !title.is_empty() {
        parts.push(title.into_owned());
    }

    if parts.is_empty() {
        format!("Task {task_number}")
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_composite_name() {
        let task = ParsedTask {
            name: "Email 7: BFCM: Plan Your Brew".into(),
            message_type: "Email".into(),
            task_type: "RESEND".into(),
            client: "Christopher Bean Coffee".into(),
            send_date: Some("2025-11-25".into()),
            ..Default::default()
        };
        assert_eq!(
            format_display_name(&task, 9, 7),
            "RESEND ☕ 📧 Chris Bean Nov [11/25] E#7 BFCM: Plan Your Brew"
        );
    }

    #[test]
    fn sms_task_gets_phone_glyph_and_sms_counter() {
        let task = ParsedTask {
            name: "SMS 1: Flash Sale".into(),
            message_type: "SMS".into(),
            client: "Acme Outfitters".into(),
            send_date: Some("2025-12-05".into()),
            ..Default::default()
        };
        assert_eq!(
            format_display_name(&task, 2, 1),
            "📱 Acme Dec [12/05] SMS#1 Flash Sale"
        );
    }

    #[test]
    fn unparseable_send_date_drops_both_date_tokens() {
        let task = ParsedTask {
            name: "Email 2: Teaser".into(),
            message_type: "Email".into(),
            send_date: Some("2025-13-40".into()),
            ..Default::default()
        };
        assert_eq!(format_display_name(&task, 2, 2), "📧 E#2 Teaser");
    }

    #[test]
    fn single_word_client_is_used_whole() {
        let task = ParsedTask {
            name: "Banner refresh".into(),
            message_type: "Banner".into(),
            client: "Acme".into(),
            ..Default::default()
        };
        assert_eq!(format_display_name(&task, 4, 0), "Acme Banner refresh");
    }

    #[test]
    fn prefix_strip_only_removes_numbered_channel_prefixes() {
        let task = ParsedTask {
            name: "Email blast for loyal customers".into(),
            message_type: "Email".into(),
            ..Default::default()
        };
        // No "Email <n>:" pattern, so the title survives intact.
        assert_eq!(
            format_display_name(&task, 1, 1),
            "📧 E#1 Email blast for loyal customers"
        );
    }

    #[test]
    fn empty_task_falls_back_to_numbered_name() {
        let task = ParsedTask::default();
        assert_eq!(format_display_name(&task, 3, 0), "Task 3");
    }

    #[test]
    fn channel_counters_number_each_channel_independently() {
        let mut counters = ChannelCounters::new();
        // Email, Email, SMS, Banner, SMS across one batch.
        assert_eq!(counters.advance("Email"), 1);
        assert_eq!(counters.advance("email campaign"), 2);
        assert_eq!(counters.advance("SMS"), 1);
        assert_eq!(counters.advance("Banner"), 0);
        assert_eq!(counters.advance("sms"), 2);
    }

    #[test]
    fn mixed_batch_keeps_per_channel_sequence_tokens() {
        let email = ParsedTask {
            name: "Email 1: Welcome".into(),
            message_type: "Email".into(),
            ..Default::default()
        };
        let sms = ParsedTask {
            name: "SMS 1: Reminder".into(),
            message_type: "SMS".into(),
            ..Default::default()
        };
        let mut counters = ChannelCounters::new();
        let first = format_display_name(&email, 1, counters.advance(&email.message_type));
        let second = format_display_name(&sms, 2, counters.advance(&sms.message_type));
        // The SMS is second in the batch but first on its channel.
        assert_eq!(first, "📧 E#1 Welcome");
        assert_eq!(second, "📱 SMS#1 Reminder");
    }

    #[test]
    fn lowercase_rework_marker_is_not_a_prefix() {
        let task = ParsedTask {
            name: "Email 1: Retry".into(),
            message_type: "Email".into(),
            task_type: "resend".into(),
            ..Default::default()
        };
        assert_eq!(format_display_name(&task, 1, 1), "📧 E#1 Retry");
    }
}
