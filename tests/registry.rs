use modorder::{Condition, Module, ModuleRegistry, ModuleSource};

#[test]
fn test_conditional_module_is_indexed_under_trigger() {
    let mut reg = ModuleRegistry::new();
    reg.add_module(Module::new("t"));
    reg.add_module(Module::new("x").with_condition(Condition::always("t")));
    reg.add_module(Module::new("y").with_condition(Condition::always("t")));

    assert_eq!(reg.conditional_modules("t"), ["x", "y"]);
    assert!(reg.conditional_modules("x").is_empty());
}

#[test]
fn test_trigger_need_not_be_registered_yet() {
    let mut reg = ModuleRegistry::new();
    reg.add_module(Module::new("x").with_condition(Condition::always("later")));
    reg.add_module(Module::new("later"));

    assert_eq!(reg.conditional_modules("later"), ["x"]);
}

#[test]
fn test_replacing_module_returns_previous_and_reindexes() {
    let mut reg = ModuleRegistry::new();
    assert!(reg
        .add_module(Module::new("x").with_condition(Condition::always("t1")))
        .is_none());

    let prev = reg
        .add_module(Module::new("x").with_condition(Condition::always("t2")))
        .expect("previous module");
    assert_eq!(prev.condition.as_ref().map(|c| c.trigger()), Some("t1"));

    assert!(reg.conditional_modules("t1").is_empty());
    assert_eq!(reg.conditional_modules("t2"), ["x"]);
    assert_eq!(reg.len(), 1);
}

#[test]
fn test_manual_conditional_entries_are_deduplicated() {
    let mut reg = ModuleRegistry::new();
    reg.add_conditional("t", "x");
    reg.add_conditional("t", "x");
    reg.add_conditional("t", "y");

    assert_eq!(reg.conditional_modules("t"), ["x", "y"]);
}

#[test]
fn test_lookup_helpers() {
    let reg: ModuleRegistry = [Module::new("b"), Module::new("a").with_dependencies(["b"])]
        .into_iter()
        .collect();

    assert!(!reg.is_empty());
    assert!(reg.contains("a"));
    assert!(!reg.contains("c"));
    assert_eq!(reg.names().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(reg.module("a").unwrap().dependencies, vec!["b"]);
    assert!(reg.get("c").is_none());
}

#[test]
fn test_condition_debug_shows_trigger() {
    let c = Condition::new("t", |_| true);
    let dbg = format!("{c:?}");
    assert!(dbg.contains("trigger: \"t\""), "got: {dbg}");
}

#[test]
fn test_module_without_condition_is_active() {
    assert!(Module::new("plain").is_active());
    assert!(!Module::new("off")
        .with_condition(Condition::new("t", |_| false))
        .is_active());
}
