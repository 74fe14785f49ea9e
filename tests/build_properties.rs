use rstest::rstest;
use serde_formtree::{build, to_json_value, to_string, Container};
use serde_json::{json, Value};

fn tree_json(pairs: &[(&str, &str)]) -> Value {
    to_json_value(&build(pairs.iter().copied())).unwrap_or_else(|err| panic!("{err}"))
}

#[rstest]
#[case(&[("a", "1"), ("b", "2"), ("c", "3")], json!({"a": "1", "b": "2", "c": "3"}))]
#[case(&[("a", "1"), ("a", "2")], json!({"a": "2"}))]
#[case(&[("a[]", "x"), ("a[]", "y")], json!({"a": ["x", "y"]}))]
#[case(&[("a[b][c]", "v")], json!({"a": {"b": {"c": "v"}}}))]
#[case(&[("a[5]", "x")], json!({"a": {"5": "x"}}))]
#[case(&[("[bad]", "x"), ("ok", "y")], json!({"ok": "y"}))]
#[case(&[("a[0]", "x"), ("a[1]", "y")], json!({"a": ["x", "y"]}))]
#[case(&[("a[][x]", "1"), ("a[][x]", "2")], json!({"a": [{"x": "1"}, {"x": "2"}]}))]
#[case(&[("a", "flat"), ("a[b]", "deep")], json!({"a": {"b": "deep"}}))]
#[case(&[("a[b]", "deep"), ("a", "flat")], json!({"a": "flat"}))]
#[case(&[("first name", "Ada")], json!({"first_name": "Ada"}))]
#[case(&[("first name[x]", "Ada")], json!({"first_name": {"x": "Ada"}}))]
#[case(&[("m[]", "a"), ("m[k]", "b"), ("m[]", "c")], json!({"m": {"0": "a", "k": "b", "2": "c"}}))]
fn build_produces_expected_tree(#[case] pairs: &[(&str, &str)], #[case] expected: Value) {
    assert_eq!(tree_json(pairs), expected);
}

#[rstest]
fn sparse_index_yields_single_entry_map() {
    let tree = build([("a[5]", "x")]);
    let a = tree["a"].as_container().unwrap();
    assert!(a.is_map());
    assert_eq!(a.len(), 1);
    assert_eq!(a["5"].as_str(), Some("x"));
}

#[rstest]
fn auto_index_after_promotion_follows_entry_count() {
    let tree = build([("a[]", "x"), ("a[5]", "y"), ("a[]", "z")]);
    assert_eq!(
        to_string(&tree).unwrap(),
        r#"{"a":{"0":"x","5":"y","2":"z"}}"#
    );
}

#[rstest]
fn map_keys_keep_insertion_order() {
    let tree = build([("z", "1"), ("a", "2"), ("10", "3"), ("2", "4")]);
    assert_eq!(
        to_string(&tree).unwrap(),
        r#"{"z":"1","a":"2","10":"3","2":"4"}"#
    );
}

#[rstest]
fn rebuilding_is_idempotent() {
    let pairs = [
        ("user[name]", "Ada"),
        ("user[tags][]", "math"),
        ("user[tags][3]", "sparse"),
        ("user[tags][]", "again"),
        ("[skip]", "x"),
    ];
    let first: Container = build(pairs);
    let second: Container = build(pairs);
    assert_eq!(first, second);
}

#[rstest]
fn input_order_matters() {
    let forward = build([("a[]", "x"), ("a[1]", "y")]);
    let backward = build([("a[1]", "y"), ("a[]", "x")]);
    assert!(forward["a"].as_container().unwrap().is_list());
    assert!(backward["a"].as_container().unwrap().is_map());
    assert_ne!(forward, backward);
}

#[rstest]
fn invalid_only_input_gives_empty_tree() {
    let tree = build([("[a]", "1"), ("  [b]", "2"), ("", "3")]);
    assert!(tree.is_empty());
    assert_eq!(to_json_value(&tree).unwrap(), json!([]));
}

#[rstest]
fn deep_nesting_builds_without_limit() {
    let name = format!("root{}", "[n]".repeat(200));
    let tree = build([(name.as_str(), "leaf")]);
    let mut node = &tree["root"];
    for _ in 0..200 {
        node = &node["n"];
    }
    assert_eq!(node.as_str(), Some("leaf"));
}
