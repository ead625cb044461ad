//! The action vocabulary.
//!
//! Actions are opaque tokens to the core: they are only checked for
//! membership in an event kind's permitted set.

use std::fmt;
use std::str::FromStr;

use crate::model::types::UnknownTerm;

/// A closed-vocabulary verb describing what occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Action {
    Activated,
    Bookmarked,
    ChangedResolution,
    ChangedSize,
    ChangedSpeed,
    ChangedVolume,
    ClosedPopout,
    Completed,
    Deactivated,
    DisabledClosedCaptioning,
    EnabledClosedCaptioning,
    Ended,
    EnteredFullScreen,
    ExitedFullScreen,
    ForwardedTo,
    Graded,
    Highlighted,
    JumpedTo,
    LoggedIn,
    LoggedOut,
    MarkedAsRead,
    MarkedAsUnread,
    Muted,
    NavigatedTo,
    OpenedPopout,
    Paused,
    Posted,
    Reset,
    Restarted,
    Resumed,
    Reviewed,
    Searched,
    Shared,
    Skipped,
    Started,
    Submitted,
    Subscribed,
    Tagged,
    TimedOut,
    Unmuted,
    Unsubscribed,
    Used,
    Viewed,
}

impl Action {
    /// Every action, in alphabetical order.
    pub const ALL: [Action; 43] = [
        Action::Activated,
        Action::Bookmarked,
        Action::ChangedResolution,
        Action::ChangedSize,
        Action::ChangedSpeed,
        Action::ChangedVolume,
        Action::ClosedPopout,
        Action::Completed,
        Action::Deactivated,
        Action::DisabledClosedCaptioning,
        Action::EnabledClosedCaptioning,
        Action::Ended,
        Action::EnteredFullScreen,
        Action::ExitedFullScreen,
        Action::ForwardedTo,
        Action::Graded,
        Action::Highlighted,
        Action::JumpedTo,
        Action::LoggedIn,
        Action::LoggedOut,
        Action::MarkedAsRead,
        Action::MarkedAsUnread,
        Action::Muted,
        Action::NavigatedTo,
        Action::OpenedPopout,
        Action::Paused,
        Action::Posted,
        Action::Reset,
        Action::Restarted,
        Action::Resumed,
        Action::Reviewed,
        Action::Searched,
        Action::Shared,
        Action::Skipped,
        Action::Started,
        Action::Submitted,
        Action::Subscribed,
        Action::Tagged,
        Action::TimedOut,
        Action::Unmuted,
        Action::Unsubscribed,
        Action::Used,
        Action::Viewed,
    ];

    /// Returns the vocabulary term emitted in the `action` field.
    pub fn term(self) -> &'static str {
        match self {
            Action::Activated => "Activated",
            Action::Bookmarked => "Bookmarked",
            Action::ChangedResolution => "ChangedResolution",
            Action::ChangedSize => "ChangedSize",
            Action::ChangedSpeed => "ChangedSpeed",
            Action::ChangedVolume => "ChangedVolume",
            Action::ClosedPopout => "ClosedPopout",
            Action::Completed => "Completed",
            Action::Deactivated => "Deactivated",
            Action::DisabledClosedCaptioning => "DisabledClosedCaptioning",
            Action::EnabledClosedCaptioning => "EnabledClosedCaptioning",
            Action::Ended => "Ended",
            Action::EnteredFullScreen => "EnteredFullScreen",
            Action::ExitedFullScreen => "ExitedFullScreen",
            Action::ForwardedTo => "ForwardedTo",
            Action::Graded => "Graded",
            Action::Highlighted => "Highlighted",
            Action::JumpedTo => "JumpedTo",
            Action::LoggedIn => "LoggedIn",
            Action::LoggedOut => "LoggedOut",
            Action::MarkedAsRead => "MarkedAsRead",
            Action::MarkedAsUnread => "MarkedAsUnread",
            Action::Muted => "Muted",
            Action::NavigatedTo => "NavigatedTo",
            Action::OpenedPopout => "OpenedPopout",
            Action::Paused => "Paused",
            Action::Posted => "Posted",
            Action::Reset => "Reset",
            Action::Restarted => "Restarted",
            Action::Resumed => "Resumed",
            Action::Reviewed => "Reviewed",
            Action::Searched => "Searched",
            Action::Shared => "Shared",
            Action::Skipped => "Skipped",
            Action::Started => "Started",
            Action::Submitted => "Submitted",
            Action::Subscribed => "Subscribed",
            Action::Tagged => "Tagged",
            Action::TimedOut => "TimedOut",
            Action::Unmuted => "Unmuted",
            Action::Unsubscribed => "Unsubscribed",
            Action::Used => "Used",
            Action::Viewed => "Viewed",
        }
    }

    /// Returns the kebab-case key for this action (e.g. "logged-out").
    pub fn key(self) -> String {
        let term = self.term();
        let mut key = String::with_capacity(term.len() + 4);
        for (i, c) in term.chars().enumerate() {
            if c.is_ascii_uppercase() {
                if i > 0 {
                    key.push('-');
                }
                key.push(c.to_ascii_lowercase());
            } else {
                key.push(c);
            }
        }
        key
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.term())
    }
}

impl FromStr for Action {
    type Err = UnknownTerm;

    /// Accepts either the term ("LoggedOut") or the key ("logged-out").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.term() == s || a.key() == s)
            .ok_or_else(|| UnknownTerm(s.to_string()))
    }
}
