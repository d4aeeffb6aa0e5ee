use serde_json::json;
use strata_template::{Choices, Shorthand, Template, ValidateView, Value, ValueKind};
use strata_view::{Source, SourceStack};

fn stack(data: serde_json::Value) -> SourceStack {
    SourceStack::from(Source::from_value(data.into()).unwrap())
}

// Mapping templates

#[test]
fn test_validate_simple_mapping() {
    let stack = stack(json!({"foo": 5}));
    let valid = stack.root().validate([("foo", Template::integer())]).unwrap();
    assert_eq!(valid["foo"], Value::from(5));
}

#[test]
fn test_default_value() {
    let stack = stack(json!({}));
    let valid = stack
        .root()
        .validate([("foo", Template::integer().with_default(8))])
        .unwrap();
    assert_eq!(valid["foo"], Value::from(8));
}

#[test]
fn test_undeclared_key_is_not_exposed() {
    let stack = stack(json!({"foo": 5, "bar": 6}));
    let valid = stack.root().validate([("foo", Template::integer())]).unwrap();
    let mapping = valid.as_mapping().unwrap();

    assert_eq!(mapping.len(), 1);
    assert!(!mapping.contains_key("bar"));
    assert!(mapping.get("bar").unwrap_err().is_undeclared_key());
}

#[test]
fn test_kind_shortcut() {
    let stack = stack(json!({"foo": 5}));
    let valid = stack.root().validate([("foo", ValueKind::Integer)]).unwrap();
    assert_eq!(valid["foo"].as_i64(), Some(5));
}

#[test]
fn test_literal_default_shortcut() {
    let stack = stack(json!({}));
    let valid = stack.root().validate([("foo", 9)]).unwrap();
    assert_eq!(valid["foo"].as_i64(), Some(9));
}

#[test]
fn test_missing_required_value() {
    let stack = stack(json!({}));
    let error = stack
        .root()
        .validate([("foo", Template::integer())])
        .unwrap_err();
    assert!(error.is_not_found());
    insta::assert_snapshot!(error.to_string(), @"foo: not found");
}

#[test]
fn test_none_as_default() {
    let stack = stack(json!({}));
    let valid = stack
        .root()
        .validate([("foo", Template::integer().optional())])
        .unwrap();
    assert!(valid["foo"].is_null());
}

#[test]
fn test_wrong_type() {
    let stack = stack(json!({"foo": "bar"}));
    let error = stack
        .root()
        .validate([("foo", Template::integer())])
        .unwrap_err();
    assert!(error.is_type_error());
    assert_eq!(error.path.to_string(), "foo");
}

#[test]
fn test_nested_mapping() {
    let stack = stack(json!({"foo": {"bar": 9, "extra": 1}}));
    let valid = stack
        .root()
        .validate([("foo", [("bar", Template::integer())])])
        .unwrap();
    assert_eq!(valid["foo"]["bar"].as_i64(), Some(9));
    assert!(!valid["foo"].as_mapping().unwrap().contains_key("extra"));
}

#[test]
fn test_nested_error_names_full_path() {
    let stack = stack(json!({"outer": {"inner": "x"}}));
    let error = stack
        .root()
        .validate([("outer", [("inner", ValueKind::Integer)])])
        .unwrap_err();
    insta::assert_snapshot!(error.to_string(), @"outer.inner: must be integer, not string");
}

#[test]
fn test_scalar_where_mapping_expected() {
    let stack = stack(json!({"outer": 5}));
    let error = stack
        .root()
        .validate([("outer", [("inner", 1)])])
        .unwrap_err();
    assert!(error.is_type_error());
    assert_eq!(error.path.to_string(), "outer");
}

#[test]
fn test_empty_mapping_shorthand_requires_mapping() {
    let stack = stack(json!({"foo": 5, "bar": {"x": 1}}));
    let empty = Value::mapping::<&str, i64>([]);

    let error = stack.root().at("foo").validate(empty.clone()).unwrap_err();
    assert!(error.is_type_error());
    assert_eq!(error.path.to_string(), "foo");

    let valid = stack.root().at("bar").validate(empty).unwrap();
    assert!(valid.as_mapping().unwrap().is_empty());
}

#[test]
fn test_per_leaf_override_across_sources() {
    let stack = SourceStack::from_values(vec![
        json!({"a": {"x": 1}}).into(),
        json!({"a": {"x": 2, "y": 3}}).into(),
    ])
    .unwrap();
    let valid = stack
        .root()
        .validate([("a", [("x", ValueKind::Integer), ("y", ValueKind::Integer)])])
        .unwrap();
    assert_eq!(
        valid["a"].clone().into_value(),
        Value::mapping([("x", 1), ("y", 3)])
    );
}

#[test]
fn test_validation_is_repeatable() {
    let stack = stack(json!({"foo": {"bar": [1, 2]}, "baz": "q"}));
    let template = Template::mapping([
        ("foo", Template::mapping([("bar", Template::of_kind(ValueKind::Sequence))])),
        ("baz", Template::string()),
    ]);
    let before = stack.get(0).unwrap().data().clone();
    let first = template.validate(&stack.root()).unwrap();
    let second = template.validate(&stack.root()).unwrap();
    assert_eq!(first, second);
    assert_eq!(stack.get(0).unwrap().data(), &before);
}

// Single values

#[test]
fn test_validate_individual_value() {
    let stack = stack(json!({"foo": 5}));
    let valid = stack.root().at("foo").validate(Template::integer()).unwrap();
    assert_eq!(valid, Value::from(5));
}

#[test]
fn test_string_template() {
    let stack = stack(json!({"foo": "bar"}));
    assert_eq!(stack.root().at("foo").as_str().unwrap(), "bar");
    let valid = stack.root().validate([("foo", ValueKind::String)]).unwrap();
    assert_eq!(valid["foo"].as_str(), Some("bar"));
}

#[test]
fn test_string_default() {
    let stack = stack(json!({}));
    let valid = stack
        .root()
        .validate([
            ("foo", Shorthand::from(Template::string().with_default("baz"))),
            ("qux", Shorthand::from("bar")),
        ])
        .unwrap();
    assert_eq!(valid["foo"].as_str(), Some("baz"));
    assert_eq!(valid["qux"].as_str(), Some("bar"));
}

#[test]
fn test_check_string_type() {
    let stack = stack(json!({"foo": 5}));
    let error = stack.root().at("foo").validate(Template::string()).unwrap_err();
    assert!(error.is_type_error());
}

#[test]
fn test_pattern_matching() {
    let stack = stack(json!({"foo": "bar", "baz": "zab"}));
    let template = Template::pattern("^ba.$").unwrap();

    let valid = stack.root().at("foo").validate(template.clone()).unwrap();
    assert_eq!(valid.as_str(), Some("bar"));

    let error = stack.root().at("baz").validate(template).unwrap_err();
    assert!(error.is_value_error());
    insta::assert_snapshot!(error.to_string(), @"baz: 'zab' does not match pattern '^ba.$'");
}

#[test]
fn test_number_preserves_representation() {
    let stack = stack(json!({"i": 2, "f": 3.0, "s": "bar"}));
    let root = stack.root();
    assert_eq!(root.at("i").as_number().unwrap(), Value::Integer(2));
    assert_eq!(root.at("f").as_number().unwrap(), Value::Float(3.0));
    assert!(root.at("s").as_number().unwrap_err().is_type_error());
}

#[test]
fn test_choice_in_list() {
    let stack = stack(json!({"good": 2, "bad": 3}));
    let template = Template::choice([1, 2, 4, 8, 16]);
    assert_eq!(
        stack.root().at("good").validate(template.clone()).unwrap(),
        Value::from(2)
    );
    let error = stack.root().at("bad").validate(template).unwrap_err();
    assert!(error.is_value_error());
    insta::assert_snapshot!(error.to_string(), @"bad: must be one of 1, 2, 4, 8, 16, not 3");
}

#[test]
fn test_choice_in_map() {
    let stack = stack(json!({"good": 2, "bad": 3}));
    let template = Template::choice_map([(2, "two"), (4, "four")]);
    assert_eq!(
        stack.root().at("good").validate(template.clone()).unwrap(),
        Value::from("two")
    );
    assert!(
        stack
            .root()
            .at("bad")
            .validate(template)
            .unwrap_err()
            .is_value_error()
    );
}

#[test]
fn test_as_choice() {
    let stack = stack(json!({"level": "debug"}));
    let choices = Choices::List(vec!["info".into(), "debug".into()]);
    assert_eq!(
        stack.root().at("level").as_choice(choices).unwrap(),
        Value::from("debug")
    );
}

#[test]
fn test_str_seq() {
    let stack = stack(json!({"list": ["bar", "baz"], "split": "bar   baz", "bad": 9}));
    let root = stack.root();
    assert_eq!(root.at("list").as_str_seq().unwrap(), vec!["bar", "baz"]);
    assert_eq!(root.at("split").as_str_seq().unwrap(), vec!["bar", "baz"]);
    assert!(root.at("bad").as_str_seq().unwrap_err().is_type_error());
}

#[test]
fn test_base_template() {
    let stack = stack(json!({"foo": 4.2}));
    let root = stack.root();
    assert_eq!(
        root.at("foo").validate(Template::any()).unwrap(),
        Value::from(4.2)
    );
    assert!(
        root.at("missing")
            .validate(Template::any())
            .unwrap_err()
            .is_not_found()
    );
    assert_eq!(
        root.at("missing")
            .validate(Template::any().with_default("bar"))
            .unwrap(),
        Value::from("bar")
    );
}

#[test]
fn test_type_template() {
    let stack = stack(json!({"seq": [1], "map": {}}));
    let root = stack.root();
    let template = Template::of_kind(ValueKind::Sequence);

    assert_eq!(
        root.at("seq").validate(template.clone()).unwrap(),
        Value::from(vec![1])
    );
    let error = root.at("map").validate(template.clone()).unwrap_err();
    insta::assert_snapshot!(error.to_string(), @"map: must be sequence, not mapping");
    assert!(root.at("missing").validate(template.clone()).unwrap_err().is_not_found());
    assert_eq!(
        root.at("missing")
            .validate(template.with_default(vec![1, 2]))
            .unwrap(),
        Value::from(vec![1, 2])
    );
}

// Filenames

#[test]
fn test_filename_without_origin_uses_working_directory() {
    let stack = stack(json!({"foo": "foo/bar"}));
    let path = stack.root().at("foo").as_filename().unwrap();
    assert_eq!(path, std::env::current_dir().unwrap().join("foo/bar"));
}

#[test]
fn test_filename_relative_to_origin() {
    let stack = SourceStack::from(
        Source::from_value(json!({"foo": "foo/bar"}).into())
            .unwrap()
            .with_origin("/baz/config.yaml"),
    );
    let path = stack.root().at("foo").as_filename().unwrap();
    assert_eq!(path, std::path::PathBuf::from("/baz/foo/bar"));
}

#[test]
fn test_filename_relative_to_default_layer() {
    let stack = SourceStack::new(vec![
        Source::from_value(json!({"foo": "foo/bar"}).into()).unwrap(),
        Source::from_value(json!({}).into())
            .unwrap()
            .with_origin("/config/path/config_default.yaml")
            .as_default(),
    ]);
    let path = stack.root().at("foo").as_filename().unwrap();
    assert_eq!(path, std::path::PathBuf::from("/config/path/foo/bar"));
}

#[test]
fn test_filename_wrong_type() {
    let stack = stack(json!({"foo": 8}));
    assert!(stack.root().at("foo").as_filename().unwrap_err().is_type_error());
}

// Parsed YAML end to end

#[test]
fn test_yaml_layers() {
    let parse = |content: &str| {
        let docs = yaml_rust2::YamlLoader::load_from_str(content).unwrap();
        Source::from_value(Value::from(&docs[0])).unwrap()
    };
    let defaults = parse(
        r#"
directory: ~/music
import:
  write: yes
  quiet_fallback: skip
format_item: $artist - $title
"#,
    )
    .as_default();
    let user = parse(
        r#"
import:
  quiet_fallback: asis
"#,
    );

    let stack = SourceStack::new(vec![user, defaults]);
    let valid = stack
        .root()
        .validate([
            (
                "import",
                Shorthand::from([
                    ("write", Template::string()),
                    ("quiet_fallback", Template::choice(["skip", "asis"])),
                ]),
            ),
            ("directory", Shorthand::from(Template::string())),
        ])
        .unwrap();
    assert_eq!(valid["import"]["write"].as_str(), Some("yes"));
    assert_eq!(valid["import"]["quiet_fallback"].as_str(), Some("asis"));
    assert_eq!(valid["directory"].as_str(), Some("~/music"));

    // format_item is a string, so a mapping template cannot look inside it
    let error = stack
        .root()
        .validate([("format_item", [("artist", Template::string())])])
        .unwrap_err();
    assert!(error.is_type_error());
    assert_eq!(error.path.to_string(), "format_item");
}
