// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Round-trip and multi-document tests against the public API.

use serde_json::json;
use yaml_engine::{
    Configuration, Deserializer, Error, Node, Serializer, Value, deserialize, deserialize_docs,
    serialize, serialize_docs,
};

fn to_json(node: &Node<'_>) -> serde_json::Value {
    serde_json::to_value(node).unwrap()
}

fn assert_round_trip(node: &Node<'_>) {
    let text = serialize(node);
    let parsed = deserialize(&text).unwrap_or_else(|err| panic!("{err} in:\n{text}"));
    assert_eq!(&parsed, node, "serialized as:\n{text}");
}

#[test]
fn test_document_matches_json() {
    let input = r#"
# Device inventory
fabric: dc1
spines:
  - name: spine1
    asn: 65001
    loopback: 10.0.0.1
  - name: spine2
    asn: 65001
    loopback: 10.0.0.2
settings: {mtu: 9214, bfd: true, timers: [5, 15]}
description: >
  Two spines
  and no leaves.
unset:
"#;
    let root = deserialize(input).unwrap();
    assert_eq!(
        to_json(&root),
        json!({
            "fabric": "dc1",
            "spines": [
                {"name": "spine1", "asn": 65001, "loopback": "10.0.0.1"},
                {"name": "spine2", "asn": 65001, "loopback": "10.0.0.2"},
            ],
            "settings": {"mtu": 9214, "bfd": true, "timers": [5, 15]},
            "description": "Two spines and no leaves.\n",
            "unset": null,
        })
    );
}

#[test]
fn test_round_trip_built_trees() {
    let trees = [
        Node::null(),
        Node::from("text with spaces"),
        Node::from(Value::Int(i64::MIN)),
        Node::from(-0.0),
        Node::from(1e-9),
        Node::sequence(vec![
            Node::from("- not an entry"),
            Node::from("#not a comment"),
            Node::from("multi\nline\n"),
            Node::from("  indented"),
            Node::from("0x1F"),
            Node::from(".inf"),
            Node::from("~"),
            Node::from("yes"),
            Node::from("unicode é ✓"),
        ]),
        Node::mapping(vec![
            (Node::from("plain"), Node::from(true)),
            (Node::from("needs: quotes"), Node::from(Value::Int(1))),
            (Node::from(Value::Int(2)), Node::sequence(Vec::new())),
            (Node::null(), Node::mapping(Vec::new())),
            (
                Node::sequence(vec![Node::from("complex"), Node::from("key")]),
                Node::mapping(vec![(
                    Node::from("nested"),
                    Node::sequence(vec![Node::sequence(vec![Node::from(1.5)])]),
                )]),
            ),
        ]),
    ];
    for tree in &trees {
        assert_round_trip(tree);
    }
}

#[test]
fn test_special_floats_round_trip() {
    let text = serialize(&Node::sequence(vec![
        Node::from(f64::INFINITY),
        Node::from(f64::NEG_INFINITY),
        Node::from(f64::NAN),
        Node::from(3.0),
    ]));
    let root = deserialize(&text).unwrap();
    let items = root.as_sequence().unwrap();
    assert_eq!(items[0].as_float().unwrap(), f64::INFINITY);
    assert_eq!(items[1].as_float().unwrap(), f64::NEG_INFINITY);
    assert!(items[2].as_float().unwrap().is_nan());
    assert!(items[3].is_float());
}

#[test]
fn test_anchors_survive_round_trip() {
    let input = "defaults: &defaults\n  retries: 3\nservice:\n  settings: *defaults\n";
    let root = deserialize(input).unwrap();
    let text = serialize(&root);
    assert_eq!(text, input);
    let again = deserialize(&text).unwrap();
    assert!(again.at("service").unwrap().at("settings").unwrap().is_alias());
}

#[test]
fn test_multi_document_round_trip() {
    let input = "%YAML 1.2\n---\nfirst: 1\n...\n---\n- second\n...\nthird\n";
    let docs = deserialize_docs(input).unwrap();
    assert_eq!(docs.len(), 3);
    assert_eq!(
        docs.iter().map(to_json).collect::<Vec<_>>(),
        vec![json!({"first": 1}), json!(["second"]), json!("third")]
    );

    let text = serialize_docs(&docs);
    assert_eq!(text, "%YAML 1.2\n---\nfirst: 1\n...\n- second\n...\nthird");
    let again = deserialize_docs(&text).unwrap();
    assert_eq!(again, docs);
}

#[test]
fn test_later_document_error_keeps_earlier_documents() {
    let deserializer = Deserializer::new(None);
    let mut documents = deserializer.documents("ok: 1\n---\nbroken: [\n");
    let first = documents.next().unwrap().unwrap();
    assert_eq!(to_json(&first), json!({"ok": 1}));
    assert!(matches!(documents.next(), Some(Err(Error::Parse(_)))));
    assert!(documents.next().is_none());

    assert!(deserialize_docs("ok: 1\n---\nbroken: [\n").is_err());
}

#[test]
fn test_configuration_drives_both_directions() {
    let config: Configuration =
        serde_json::from_str(r#"{"allow_duplicate_keys": true, "explicit_document_start": true}"#)
            .unwrap();
    let root = Deserializer::new(Some(&config))
        .deserialize("key: old\nkey: new\n")
        .unwrap();
    assert_eq!(to_json(&root), json!({"key": "new"}));
    assert_eq!(
        Serializer::new(Some(&config)).serialize(&root),
        "---\nkey: new\n"
    );
}
