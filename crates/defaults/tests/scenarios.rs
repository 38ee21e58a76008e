use defaults::{keys, Defaults, Key, Keys};

keys! {
    trait TestKeys, TestDefaults {
        password, set_password, remove_password: Option<String> = Key::optional("password");
        enabled, set_enabled, remove_enabled: bool = Key::new("enabled", false);
    }
}

// A second declaration for the same identifier, with a different default.
trait AliasKeys {
    fn enabled_by_default(&self) -> Key<bool>;
}

impl AliasKeys for Keys {
    fn enabled_by_default(&self) -> Key<bool> {
        Key::new("enabled", true)
    }
}

#[test]
fn defaults_test() {
    let defaults = Defaults::standard();
    defaults.remove_enabled();

    assert!(!defaults.enabled());

    defaults.set_enabled(true);
    assert!(defaults.enabled());

    defaults.remove_enabled();
    assert!(!defaults.enabled());
}

#[test]
fn optional_defaults_test() {
    let defaults = Defaults::standard();
    defaults.remove_password();

    assert_eq!(defaults.password(), None);

    defaults.set_password(Some("123456".to_owned()));
    assert_eq!(defaults.password(), Some("123456".to_owned()));

    defaults.set_password(None);
    assert_eq!(defaults.password(), None);
    assert!(!defaults.contains(&Keys.password()));

    defaults.set_password(Some("123456".to_owned()));
    defaults.remove(&Keys.password());
    assert_eq!(defaults.password(), None);
}

#[test]
fn standard_handles_share_state() {
    let key = Key::new("standard_handles_share_state", 0_i64);

    Defaults::standard().set(&key, 42);
    assert_eq!(Defaults::standard().get(&key), 42);
}

#[test]
fn aliased_identifiers_share_storage() {
    let defaults = Defaults::suite("aliasing").unwrap();

    // Nothing stored: each declaration answers with its own default.
    assert!(!defaults.get(&Keys.enabled()));
    assert!(defaults.get(&Keys.enabled_by_default()));

    // Once written, both see the stored value.
    defaults.set(&Keys.enabled_by_default(), false);
    assert!(!defaults.get(&Keys.enabled()));
    assert!(!defaults.get(&Keys.enabled_by_default()));

    defaults.set(&Keys.enabled(), true);
    assert!(defaults.get(&Keys.enabled_by_default()));

    // Removing through one resets both to their own defaults.
    defaults.remove(&Keys.enabled());
    assert!(!defaults.get(&Keys.enabled()));
    assert!(defaults.get(&Keys.enabled_by_default()));
}

#[test]
fn suites_do_not_see_standard_values() {
    let key = Key::new("suites_do_not_see_standard_values", 1_i64);
    Defaults::standard().set(&key, 2);

    let suite = Defaults::suite("isolated").unwrap();
    assert_eq!(suite.get(&key), 1);
}

#[test]
fn invalid_suite_is_none() {
    assert!(Defaults::suite("").is_none());
    assert!(Defaults::suite("global").is_none());
}

#[test]
#[should_panic(expected = "Type associated with \"mismatched\" mismatch; expected: integer, actual: string.")]
fn conflicting_declarations_are_fatal() {
    let defaults = Defaults::suite("mismatch").unwrap();
    defaults.set(&Key::new("mismatched", String::new()), "ten".to_owned());
    defaults.get(&Key::new("mismatched", 0_i64));
}
