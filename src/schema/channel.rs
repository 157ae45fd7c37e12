//! Channel identity and per-channel increment semantics.
use serde::{Deserialize, Serialize};

/// How events on a channel contribute to the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Each event value is a scalar increment on one path coordinate.
    Increment,
    /// Events are rewritten into paired lead/lag sub-events, doubling the
    /// channel's contribution to width.
    LeadLag,
}

/// One entry of an explicit schema: identity plus options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSpec {
    pub label: String,
    pub ctype: String,
    pub lead_lag: bool,
}

impl ChannelSpec {
    pub fn new(label: impl Into<String>, ctype: impl Into<String>) -> Self {
        Self { label: label.into(), ctype: ctype.into(), lead_lag: false }
    }

    pub fn with_lead_lag(mut self, lead_lag: bool) -> Self {
        self.lead_lag = lead_lag;
        self
    }
}

/// A resolved channel: identity, kind, and its base slot in the path's
/// coordinate order. A `LeadLag` channel owns two consecutive slots
/// (lead, then lag); an `Increment` channel owns one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub label: String,
    pub ctype: String,
    pub kind: ChannelKind,
    pub base_slot: usize,
}

impl Channel {
    /// Number of path coordinates this channel occupies.
    pub fn slot_count(&self) -> usize {
        match self.kind {
            ChannelKind::Increment => 1,
            ChannelKind::LeadLag => 2,
        }
    }

    pub fn lead_slot(&self) -> usize {
        self.base_slot
    }

    pub fn lag_slot(&self) -> usize {
        debug_assert_eq!(self.kind, ChannelKind::LeadLag);
        self.base_slot + 1
    }
}
