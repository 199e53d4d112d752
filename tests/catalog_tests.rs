// Integration tests for topic loading and the catalog

use conceptty::topic::{Catalog, Category, Scene, Topic, TopicError};
use std::fs;
use std::path::Path;

const MINIMAL: &str = r#"
{
  "id": "custom",
  "title": "Custom topic",
  "category": "routing",
  "language": "javascript",
  "source": ["const a = 1;", "const b = 2;"],
  "steps": [
    {
      "title": "first",
      "duration_ms": 1000,
      "highlighted_lines": [2, 1, 2],
      "payload": { "kind": "route", "url": "/" }
    },
    {
      "title": "second",
      "explanation": "done",
      "duration_ms": 1500,
      "payload": { "kind": "tree", "nodes": [ { "label": "root" } ] }
    }
  ]
}
"#;

#[test]
fn test_builtin_topics_load() {
    let catalog = Catalog::builtin().expect("built-in topics are valid");
    let ids: Vec<&str> = catalog.ids().collect();
    assert_eq!(
        ids,
        ["event-loop", "call-stack", "reconciliation", "client-routing"]
    );

    for topic in catalog.topics() {
        assert!(topic.step_count() >= 1, "{} has steps", topic.id);
        assert!(!topic.source.is_empty(), "{} has source", topic.id);
    }
}

#[test]
fn test_get_sequence() {
    let catalog = Catalog::builtin().unwrap();
    let seq = catalog.get_sequence("event-loop").unwrap();
    assert_eq!(seq.len(), 9);
    assert!(matches!(seq.first().payload, Scene::EventLoop { .. }));

    let routing = catalog.topic("client-routing").unwrap();
    assert_eq!(routing.category, Category::Routing);
}

#[test]
fn test_list_entry_shows_running_time() {
    let catalog = Catalog::builtin().unwrap();
    let topic = catalog.topic("event-loop").unwrap();
    assert_eq!(topic.sequence.total_duration().as_millis(), 21_500);

    let entry = topic.list_entry();
    assert!(entry.starts_with("event-loop"));
    assert!(entry.contains(" 9 steps"));
    assert!(entry.contains("21.5s"));
    assert!(entry.contains("[execution model]"));
    assert!(entry.ends_with(&topic.title));
}

#[test]
fn test_unknown_topic() {
    let catalog = Catalog::builtin().unwrap();
    let err = catalog.get_sequence("nope").unwrap_err();
    assert!(matches!(err, TopicError::UnknownTopic(ref id) if id == "nope"));
    assert_eq!(err.to_string(), "unknown topic `nope`");
}

#[test]
fn test_parse_minimal_document() {
    let topic = Topic::from_json(MINIMAL).expect("valid document");
    assert_eq!(topic.id, "custom");
    assert_eq!(topic.step_count(), 2);

    let first = topic.sequence.get(1).unwrap();
    assert_eq!(first.highlighted_lines, vec![1, 2]);
    assert!(first.explanation.is_empty());

    let second = topic.sequence.get(2).unwrap();
    assert!(second.highlighted_lines.is_empty());
    match &second.payload {
        Scene::Tree { nodes, patches } => {
            assert_eq!(nodes.len(), 1);
            assert_eq!(nodes[0].depth, 0);
            assert!(patches.is_empty());
        }
        other => panic!("unexpected payload {:?}", other),
    }
}

#[test]
fn test_rejects_empty_steps() {
    let json = r#"{ "id": "x", "title": "x", "category": "routing", "steps": [] }"#;
    assert!(matches!(
        Topic::from_json(json),
        Err(TopicError::EmptySequence)
    ));
}

#[test]
fn test_rejects_zero_duration() {
    let json = MINIMAL.replace("\"duration_ms\": 1500", "\"duration_ms\": 0");
    assert!(matches!(
        Topic::from_json(&json),
        Err(TopicError::ZeroDuration { step: 2 })
    ));
}

#[test]
fn test_rejects_highlight_outside_source() {
    let json = MINIMAL.replace("[2, 1, 2]", "[3]");
    assert!(matches!(
        Topic::from_json(&json),
        Err(TopicError::HighlightOutOfRange { step: 1, line: 3, lines: 2 })
    ));
}

#[test]
fn test_rejects_malformed_json() {
    assert!(matches!(
        Topic::from_json("{ not json"),
        Err(TopicError::Parse(_))
    ));
    let unknown_kind = MINIMAL.replace("\"kind\": \"route\"", "\"kind\": \"hologram\"");
    assert!(matches!(
        Topic::from_json(&unknown_kind),
        Err(TopicError::Parse(_))
    ));
}

#[test]
fn test_duplicate_topic_rejected() {
    let mut catalog = Catalog::new();
    catalog.insert(Topic::from_json(MINIMAL).unwrap()).unwrap();
    let err = catalog.insert(Topic::from_json(MINIMAL).unwrap()).unwrap_err();
    assert!(matches!(err, TopicError::DuplicateTopic(ref id) if id == "custom"));
    assert_eq!(catalog.len(), 1);
}

#[test]
fn test_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.json");
    fs::write(&path, MINIMAL).unwrap();

    let mut catalog = Catalog::builtin().unwrap();
    let topic = catalog.load_file(&path).unwrap();
    assert_eq!(topic.id, "custom");
    assert_eq!(catalog.ids().last(), Some("custom"));
}

#[test]
fn test_load_missing_file() {
    let mut catalog = Catalog::new();
    let err = catalog
        .load_file(Path::new("/definitely/not/here.json"))
        .unwrap_err();
    assert!(matches!(err, TopicError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.json"));
}

#[test]
fn test_neighbour_wraps() {
    let catalog = Catalog::builtin().unwrap();
    assert_eq!(catalog.neighbour("event-loop", 1), Some("call-stack"));
    assert_eq!(catalog.neighbour("event-loop", -1), Some("client-routing"));
    assert_eq!(catalog.neighbour("client-routing", 1), Some("event-loop"));
    assert_eq!(catalog.neighbour("missing", 1), None);
}
