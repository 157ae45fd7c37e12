//! Two-strategy schema construction: explicit ordered schema, or lazy
//! first-seen discovery. Selected once at stream construction, never mixed.

use std::collections::HashMap;

use crate::error::StreamError;
use crate::records::normalizer::RawEvent;
use crate::schema::channel::{Channel, ChannelKind, ChannelSpec};

/// Slot reserved for the synthetic time channel when it is enabled.
pub const TIME_SLOT: usize = 0;

/// The immutable channel table of a tick stream.
///
/// Slot assignment is deterministic: the synthetic time channel (if any)
/// takes slot 0, then each channel takes its slots in schema order (explicit
/// mode) or first-seen order (inferred mode), with lead-lag channels taking
/// two consecutive slots.
#[derive(Debug, Clone)]
pub struct Schema {
    channels: Vec<Channel>,
    // label -> ctype -> index in `channels`; keyed per level so lookups
    // can borrow `&str` without building an owned pair.
    lookup: HashMap<String, HashMap<String, usize>>,
    width: usize,
    has_time: bool,
}

impl Schema {
    /// Total path width, including the synthetic time channel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Width contributed by data channels alone (after lead-lag doubling).
    pub fn data_width(&self) -> usize {
        self.width - usize::from(self.has_time)
    }

    pub fn has_time(&self) -> bool {
        self.has_time
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Looks a channel up by its (label, type) identity. Allocation-free.
    pub fn channel(&self, label: &str, ctype: &str) -> Option<&Channel> {
        self.lookup
            .get(label)
            .and_then(|by_type| by_type.get(ctype))
            .map(|&i| &self.channels[i])
    }
}

/// Builds a [`Schema`] from raw events under one of the two strategies.
#[derive(Debug, Clone)]
pub enum SchemaResolver {
    /// Channel order and options are dictated by the supplied list; events
    /// referencing channels outside it fail with `UnknownChannel`.
    Explicit(Vec<ChannelSpec>),
    /// Channels are discovered in first-seen order while scanning events.
    /// Discovered channels are always scalar increments; lead-lag requires
    /// an explicit schema.
    Inferred,
}

impl SchemaResolver {
    /// Resolves the channel table for a normalized event sequence.
    ///
    /// Single pass, single writer; determinism follows from input order.
    pub fn resolve(&self, events: &[RawEvent], include_time: bool) -> Result<Schema, StreamError> {
        let mut schema = Schema {
            channels: Vec::new(),
            lookup: HashMap::new(),
            width: usize::from(include_time),
            has_time: include_time,
        };

        match self {
            SchemaResolver::Explicit(specs) => {
                for spec in specs {
                    Self::push_channel(
                        &mut schema,
                        spec.label.clone(),
                        spec.ctype.clone(),
                        if spec.lead_lag { ChannelKind::LeadLag } else { ChannelKind::Increment },
                    )?;
                }
                for ev in events {
                    if schema.channel(&ev.label, &ev.ctype).is_none() {
                        return Err(StreamError::UnknownChannel {
                            label: ev.label.clone(),
                            ctype: ev.ctype.clone(),
                        });
                    }
                }
            }
            SchemaResolver::Inferred => {
                for ev in events {
                    if schema.channel(&ev.label, &ev.ctype).is_none() {
                        Self::push_channel(
                            &mut schema,
                            ev.label.clone(),
                            ev.ctype.clone(),
                            ChannelKind::Increment,
                        )?;
                    }
                }
            }
        }

        Ok(schema)
    }

    fn push_channel(
        schema: &mut Schema,
        label: String,
        ctype: String,
        kind: ChannelKind,
    ) -> Result<(), StreamError> {
        let index = schema.channels.len();
        let by_type = schema.lookup.entry(label.clone()).or_default();
        if by_type.insert(ctype.clone(), index).is_some() {
            return Err(StreamError::MalformedRecord {
                context: format!("duplicate channel '{}' (type '{}') in schema", label, ctype),
            });
        }
        let channel = Channel { label, ctype, kind, base_slot: schema.width };
        schema.width += channel.slot_count();
        schema.channels.push(channel);
        Ok(())
    }
}
