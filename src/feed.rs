//! Client-side shaping of the workflow event feed: flattening the
//! per-agent map into one chronological sequence, tail-trimming for the
//! "latest N" views and the comms/timeline split of the Workflow panel.
//!
//! Timestamps that cannot be parsed sort after every parseable one and keep
//! their relative order.

use std::cmp::Ordering;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use crate::models::{EventTimestamp, EventsByAgent, WorkflowEvent};

/// An event tagged with the agent it was reported under.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatEvent {
    pub agent: String,
    pub event: WorkflowEvent,
}

/// Milliseconds since the UNIX epoch, or `None` when the timestamp is missing
/// or not understood.
pub fn timestamp_ms(ts: Option<&EventTimestamp>) -> Option<f64> {
    match ts? {
        EventTimestamp::Millis(ms) if ms.is_finite() => Some(*ms),
        EventTimestamp::Millis(_) => None,
        EventTimestamp::Text(text) => parse_text_timestamp(text),
    }
}

fn parse_text_timestamp(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.timestamp_millis() as f64);
    }
    // Offset-less ISO strings (Python's `datetime.isoformat()`) are read as UTC.
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc().timestamp_millis() as f64);
        }
    }
    text.parse::<f64>().ok().filter(|ms| ms.is_finite())
}

fn compare_ms(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Concatenate every agent's events (tagging each with its agent) and sort
/// the result ascending by timestamp.  The sort is stable, so equal
/// timestamps keep concatenation order.
pub fn flatten_events(events_by_agent: &EventsByAgent) -> Vec<FlatEvent> {
    let mut keyed: Vec<(Option<f64>, FlatEvent)> = events_by_agent
        .iter()
        .flat_map(|(agent, events)| {
            events.iter().map(move |event| {
                (
                    timestamp_ms(event.ts.as_ref()),
                    FlatEvent { agent: agent.clone(), event: event.clone() },
                )
            })
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| compare_ms(*a, *b));
    keyed.into_iter().map(|(_, flat)| flat).collect()
}

/// The last `limit` items of an ascending sequence, still ascending.
pub fn latest<T>(items: &[T], limit: usize) -> &[T] {
    &items[items.len().saturating_sub(limit)..]
}

/// Split one agent's events into (communications, timeline).
pub fn partition_comms(events: &[WorkflowEvent]) -> (Vec<&WorkflowEvent>, Vec<&WorkflowEvent>) {
    events.iter().partition(|e| e.is_comms())
}

/// Local wall-clock time (`HH:MM:SS`) for an event, empty when unparseable.
pub fn format_time(ts: Option<&EventTimestamp>) -> String {
    timestamp_ms(ts)
        .and_then(|ms| Utc.timestamp_millis_opt(ms as i64).single())
        .map(|utc| utc.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn event(ts: Option<EventTimestamp>, text: &str) -> WorkflowEvent {
        WorkflowEvent { ts, text: text.to_string(), kind: "info".into(), level: "info".into() }
    }

    fn text_ts(s: &str) -> Option<EventTimestamp> {
        Some(EventTimestamp::Text(s.to_string()))
    }

    #[test]
    fn flattens_two_agents_into_chronological_order() {
        let by_agent: EventsByAgent = serde_json::from_value(json!({
            "a": [{"ts": "2024-01-01T00:00:02Z", "text": "x"}],
            "b": [{"ts": "2024-01-01T00:00:01Z", "text": "y"}],
        }))
        .unwrap();

        let flat = flatten_events(&by_agent);
        let got: Vec<(&str, &str)> =
            flat.iter().map(|f| (f.agent.as_str(), f.event.text.as_str())).collect();
        assert_eq!(got, vec![("b", "y"), ("a", "x")]);
    }

    #[test]
    fn equal_timestamps_keep_concatenation_order() {
        let mut by_agent = EventsByAgent::new();
        by_agent.insert(
            "alpha".into(),
            vec![event(text_ts("2024-01-01T00:00:00Z"), "a1"), event(text_ts("2024-01-01T00:00:00Z"), "a2")],
        );
        by_agent.insert("beta".into(), vec![event(Some(EventTimestamp::Millis(1704067200000.0)), "b1")]);

        let texts: Vec<String> = flatten_events(&by_agent).into_iter().map(|f| f.event.text).collect();
        assert_eq!(texts, vec!["a1", "a2", "b1"]);
    }

    #[test]
    fn agents_concatenate_in_wire_order() {
        let by_agent: EventsByAgent = serde_json::from_str(
            r#"{"Planner":[{"ts":1000,"text":"plan"}],"Coder":[{"ts":1000,"text":"code"}]}"#,
        )
        .unwrap();

        let agents: Vec<String> = flatten_events(&by_agent).into_iter().map(|f| f.agent).collect();
        assert_eq!(agents, vec!["Planner", "Coder"]);
    }

    #[test]
    fn unparseable_timestamps_sort_last() {
        let mut by_agent = EventsByAgent::new();
        by_agent.insert(
            "a".into(),
            vec![
                event(text_ts("not a date"), "bad1"),
                event(text_ts("2024-01-01T00:00:05Z"), "late"),
                event(None, "missing"),
            ],
        );
        by_agent.insert("b".into(), vec![event(text_ts("2024-01-01T00:00:01Z"), "early")]);

        let texts: Vec<String> = flatten_events(&by_agent).into_iter().map(|f| f.event.text).collect();
        assert_eq!(texts, vec!["early", "late", "bad1", "missing"]);
    }

    #[test]
    fn parses_the_supported_timestamp_shapes() {
        let expected = 1704067201000.0;
        assert_eq!(timestamp_ms(text_ts("2024-01-01T00:00:01Z").as_ref()), Some(expected));
        assert_eq!(timestamp_ms(text_ts("2024-01-01T01:00:01+01:00").as_ref()), Some(expected));
        assert_eq!(timestamp_ms(text_ts("2024-01-01T00:00:01").as_ref()), Some(expected));
        assert_eq!(timestamp_ms(text_ts("1704067201000").as_ref()), Some(expected));
        assert_eq!(timestamp_ms(Some(&EventTimestamp::Millis(expected))), Some(expected));
        assert_eq!(timestamp_ms(Some(&EventTimestamp::Millis(f64::NAN))), None);
        assert_eq!(timestamp_ms(text_ts("").as_ref()), None);
        assert_eq!(timestamp_ms(None), None);
    }

    #[test]
    fn latest_keeps_the_chronological_tail() {
        let items: Vec<u32> = (0..130).collect();
        let tail = latest(&items, 120);
        assert_eq!(tail.len(), 120);
        assert_eq!(tail.first(), Some(&10));
        assert_eq!(tail.last(), Some(&129));

        let short = [1, 2, 3];
        assert_eq!(latest(&short, 60), &short);
        assert!(latest::<u32>(&[], 60).is_empty());
    }

    #[test]
    fn partition_separates_comms_from_timeline() {
        let mut comms = event(None, "hello planner");
        comms.kind = "comms".into();
        let events = vec![event(None, "step 1"), comms, event(None, "step 2")];

        let (c, t) = partition_comms(&events);
        assert_eq!(c.iter().map(|e| e.text.as_str()).collect::<Vec<_>>(), vec!["hello planner"]);
        assert_eq!(t.iter().map(|e| e.text.as_str()).collect::<Vec<_>>(), vec!["step 1", "step 2"]);
    }

    #[test]
    fn format_time_is_empty_for_invalid_input() {
        assert_eq!(format_time(text_ts("garbage").as_ref()), "");
        assert_eq!(format_time(Some(&EventTimestamp::Millis(1704067201000.0))).len(), 8);
    }

    fn events_by_agent_strategy() -> impl Strategy<Value = EventsByAgent> {
        let ts = prop_oneof![
            4 => (0u64..5_000u64).prop_map(|s| Some(EventTimestamp::Millis((1_700_000_000_000u64 + s * 1000) as f64))),
            1 => Just(Some(EventTimestamp::Text("??".to_string()))),
            1 => Just(None),
        ];
        let ev = (ts, "[a-z]{0,6}").prop_map(|(ts, text)| event(ts, &text));
        prop::collection::btree_map("[a-d]", prop::collection::vec(ev, 0..40), 0..4)
            .prop_map(|agents| agents.into_iter().collect())
    }

    proptest! {
        #[test]
        fn flatten_preserves_count_order_and_tags(by_agent in events_by_agent_strategy()) {
            let flat = flatten_events(&by_agent);

            let total: usize = by_agent.values().map(Vec::len).sum();
            prop_assert_eq!(flat.len(), total);

            for pair in flat.windows(2) {
                let a = timestamp_ms(pair[0].event.ts.as_ref());
                let b = timestamp_ms(pair[1].event.ts.as_ref());
                prop_assert_ne!(compare_ms(a, b), Ordering::Greater);
            }

            for f in &flat {
                prop_assert!(by_agent[&f.agent].contains(&f.event));
            }
        }

        #[test]
        fn latest_is_the_exact_tail(len in 0usize..300, limit in 1usize..150) {
            let items: Vec<usize> = (0..len).collect();
            let tail = latest(&items, limit);
            prop_assert_eq!(tail.len(), len.min(limit));
            prop_assert_eq!(tail, &items[len - len.min(limit)..]);
        }
    }
}
