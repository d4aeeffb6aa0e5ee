use serde_json::json;
use strata_view::{Source, SourceStack, Value};

fn source(data: serde_json::Value) -> Source {
    Source::from_value(data.into()).unwrap()
}

/// A user file overriding one nested key while defaults supply the rest
#[test]
fn test_user_file_over_defaults() {
    let defaults = source(json!({
        "library": "~/music.db",
        "import": {"copy": true, "move": false, "log": null},
        "plugins": ["fetchart"],
    }))
    .with_origin("/usr/share/app/config_default.yaml")
    .as_default();
    let user = source(json!({
        "import": {"move": true},
        "plugins": ["lyrics", "web"],
    }))
    .with_origin("/home/user/.config/app/config.yaml");

    let stack = SourceStack::new(vec![user, defaults]);
    let import = stack.root().at("import");

    assert_eq!(import.at("move").get().unwrap(), &Value::Bool(true));
    assert_eq!(import.at("copy").get().unwrap(), &Value::Bool(true));
    assert!(import.at("log").exists());
    assert_eq!(import.keys(), vec!["move", "copy", "log"]);

    // Sequences are answered whole by one source
    let plugins = stack.root().at("plugins");
    assert_eq!(plugins.children().unwrap().len(), 2);
    assert_eq!(plugins.at(0).get().unwrap(), &Value::from("lyrics"));

    let move_source = import.at("move").first().unwrap().unwrap().source;
    assert!(!move_source.is_default());
    let copy_source = import.at("copy").first().unwrap().unwrap().source;
    assert!(copy_source.is_default());
}

#[test]
fn test_overlay_does_not_change_original_stack() {
    let base = SourceStack::from(source(json!({"verbose": false})));
    let overlaid = base.with_source(source(json!({"verbose": true})).writable());

    assert_eq!(base.root().at("verbose").get().unwrap(), &Value::Bool(false));
    assert_eq!(overlaid.root().at("verbose").get().unwrap(), &Value::Bool(true));
    assert!(!overlaid.get(0).unwrap().is_read_only());
}

#[test]
fn test_exists_for_every_defined_path() {
    let data = json!({"a": {"b": [1, {"c": null}]}, "d": ""});
    let stack = SourceStack::from(source(data));
    let root = stack.root();

    assert!(root.at("a").exists());
    assert!(root.at_path(["a", "b"]).exists());
    assert!(root.at("a").at("b").at(1).at("c").exists());
    assert!(root.at("d").exists());
    assert!(!root.at("a").at("b").at(2).exists());
    assert!(!root.at("d").at("e").exists());
}

#[test]
fn test_views_are_reusable_and_pure() {
    let stack = SourceStack::from(source(json!({"x": {"y": 1}})));
    let view = stack.root().at("x");
    let first = view.flatten().unwrap();
    let second = view.flatten().unwrap();
    assert_eq!(first, second);
    assert_eq!(stack.get(0).unwrap().data(), &Value::from(json!({"x": {"y": 1}})));
}

#[test]
fn test_views_can_cross_threads() {
    let stack = SourceStack::from(source(json!({"n": 42})));
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| stack.root().at("n").get().cloned()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().unwrap(), Value::from(42));
        }
    });
}
