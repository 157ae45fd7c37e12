//! lead_lag.rs
//! Rewrites events on lead-lag channels into paired lead/lag sub-events.

use std::collections::HashMap;

use crate::error::StreamError;
use crate::records::normalizer::RawEvent;
use crate::schema::channel::ChannelKind;
use crate::schema::resolver::Schema;
use crate::stream::path::Event;

/// Expands normalized events onto their path slots.
///
/// Scalar channels pass through. For a lead-lag channel the doubling rule
/// is driven by per-channel history: the first event `(t, v)` emits
/// lead `v` and lag `v`; every subsequent event `(t, v)` with previous
/// value `p` emits lead `v`, lag `p`, lag `v`, all at `t`, in that order.
pub fn expand(events: &[RawEvent], schema: &Schema) -> Result<Vec<Event>, StreamError> {
    let mut out = Vec::with_capacity(events.len());
    let mut history: HashMap<usize, f64> = HashMap::new();

    for ev in events {
        let channel = schema.channel(&ev.label, &ev.ctype).ok_or_else(|| {
            StreamError::UnknownChannel { label: ev.label.clone(), ctype: ev.ctype.clone() }
        })?;
        match channel.kind {
            ChannelKind::Increment => {
                out.push(Event { timestamp: ev.timestamp, slot: channel.base_slot, value: ev.value });
            }
            ChannelKind::LeadLag => {
                let lead = channel.lead_slot();
                let lag = channel.lag_slot();
                match history.insert(channel.base_slot, ev.value) {
                    None => {
                        out.push(Event { timestamp: ev.timestamp, slot: lead, value: ev.value });
                        out.push(Event { timestamp: ev.timestamp, slot: lag, value: ev.value });
                    }
                    Some(prev) => {
                        out.push(Event { timestamp: ev.timestamp, slot: lead, value: ev.value });
                        out.push(Event { timestamp: ev.timestamp, slot: lag, value: prev });
                        out.push(Event { timestamp: ev.timestamp, slot: lag, value: ev.value });
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::channel::ChannelSpec;
    use crate::schema::resolver::SchemaResolver;

    fn raw(t: f64, label: &str, value: f64) -> RawEvent {
        RawEvent { timestamp: t, label: label.into(), ctype: "value".into(), value }
    }

    #[test]
    fn test_first_event_emits_lead_and_lag() {
        let specs = vec![ChannelSpec::new("s1", "value").with_lead_lag(true)];
        let events = vec![raw(0.0, "s1", 1.0)];
        let schema = SchemaResolver::Explicit(specs).resolve(&events, false).unwrap();
        let expanded = expand(&events, &schema).unwrap();
        assert_eq!(
            expanded,
            vec![
                Event { timestamp: 0.0, slot: 0, value: 1.0 },
                Event { timestamp: 0.0, slot: 1, value: 1.0 },
            ]
        );
    }

    #[test]
    fn test_subsequent_event_carries_previous_value_on_lag() {
        let specs = vec![ChannelSpec::new("s1", "value").with_lead_lag(true)];
        let events = vec![raw(0.0, "s1", 1.0), raw(1.0, "s1", 2.0)];
        let schema = SchemaResolver::Explicit(specs).resolve(&events, false).unwrap();
        let expanded = expand(&events, &schema).unwrap();
        assert_eq!(
            &expanded[2..],
            &[
                Event { timestamp: 1.0, slot: 0, value: 2.0 },
                Event { timestamp: 1.0, slot: 1, value: 1.0 },
                Event { timestamp: 1.0, slot: 1, value: 2.0 },
            ]
        );
    }

    #[test]
    fn test_scalar_channels_pass_through() {
        let events = vec![raw(0.5, "a", 3.0), raw(1.5, "b", -1.0)];
        let schema = SchemaResolver::Inferred.resolve(&events, false).unwrap();
        let expanded = expand(&events, &schema).unwrap();
        assert_eq!(
            expanded,
            vec![
                Event { timestamp: 0.5, slot: 0, value: 3.0 },
                Event { timestamp: 1.5, slot: 1, value: -1.0 },
            ]
        );
    }

    #[test]
    fn test_lead_lag_history_is_per_channel() {
        let specs = vec![
            ChannelSpec::new("s1", "value").with_lead_lag(true),
            ChannelSpec::new("s2", "value").with_lead_lag(true),
        ];
        let events = vec![raw(0.0, "s1", 1.0), raw(1.0, "s2", 5.0), raw(2.0, "s1", 2.0)];
        let schema = SchemaResolver::Explicit(specs).resolve(&events, false).unwrap();
        let expanded = expand(&events, &schema).unwrap();
        // s2's first event emits the two-event form even though s1 already
        // has history.
        assert_eq!(
            &expanded[2..4],
            &[
                Event { timestamp: 1.0, slot: 2, value: 5.0 },
                Event { timestamp: 1.0, slot: 3, value: 5.0 },
            ]
        );
        assert_eq!(expanded[5].value, 1.0); // s1 lag carries its own previous value
    }
}
