//! Tests for multi-locale catalogs: loading, fallback, and formatting.

use std::fs;

use icumsg::{BuildError, Catalog, CatalogError, FormatError, LoadError, values};
use tempfile::TempDir;

fn catalog_with(locale: &str, json: &str) -> Catalog {
    let mut catalog = Catalog::builder().initial_locale(locale).build();
    catalog.add_messages_str(locale, json).unwrap();
    catalog
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn default_catalog_is_english() {
    let catalog = Catalog::default();
    assert_eq!(catalog.locale(), "en");
    assert_eq!(catalog.fallback_locale(), "en");
    assert!(catalog.locales().is_empty());
    assert!(catalog.cache().is_some());
}

#[test]
fn initial_locale_is_reduced_to_language() {
    let catalog = Catalog::builder()
        .fallback_locale("de")
        .initial_locale("pt_BR")
        .build();
    assert_eq!(catalog.locale(), "pt");
    assert_eq!(catalog.fallback_locale(), "de");
}

// =========================================================================
// Loading
// =========================================================================

#[test]
fn nested_objects_flatten_to_dotted_ids() {
    let catalog = catalog_with(
        "en",
        r#"{ "menu": { "file": { "open": "Open", "close": "Close" } }, "title": "App" }"#,
    );
    assert_eq!(catalog.ids("en"), ["menu.file.close", "menu.file.open", "title"]);
    assert_eq!(catalog.entries("en")[2], ("title", "App"));
}

#[test]
fn add_messages_merges() {
    let mut catalog = catalog_with("en", r#"{ "a": "A", "b": "B" }"#);
    let count = catalog.add_messages_str("en", r#"{ "b": "B2", "c": "C" }"#).unwrap();
    assert_eq!(count, 2);
    assert_eq!(catalog.ids("en"), ["a", "b", "c"]);
    assert_eq!(catalog.format("b", &values! {}), "B2");
}

#[test]
fn invalid_json_is_reported() {
    let mut catalog = Catalog::default();
    let err = catalog.add_messages_str("fr", "{ not json").unwrap_err();
    assert!(matches!(err, LoadError::Json { ref locale, .. } if locale == "fr"));
}

#[test]
fn non_string_entries_are_rejected() {
    let mut catalog = Catalog::default();
    let err = catalog
        .add_messages_str("en", r#"{ "count": 3 }"#)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "entry 'count' for locale 'en' must be a string or object, found number"
    );
}

#[test]
fn load_file_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.json");
    fs::write(&path, r#"{ "greeting": "Hello" }"#).unwrap();

    let mut catalog = Catalog::default();
    assert_eq!(catalog.load_file("en", &path).unwrap(), 1);
    assert_eq!(catalog.format("greeting", &values! {}), "Hello");

    fs::write(&path, r#"{ "greeting": "Hi {name}", "bye": "Bye" }"#).unwrap();
    assert_eq!(catalog.reload("en").unwrap(), 2);
    assert_eq!(catalog.format("greeting", &values! { "name" => "Ada" }), "Hi Ada");
}

#[test]
fn load_file_replaces_dictionary() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("en.json");
    fs::write(&path, r#"{ "kept": "yes" }"#).unwrap();

    let mut catalog = catalog_with("en", r#"{ "dropped": "no" }"#);
    catalog.load_file("en", &path).unwrap();
    assert_eq!(catalog.ids("en"), ["kept"]);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let mut catalog = Catalog::default();
    let err = catalog
        .load_file("en", dir.path().join("missing.json"))
        .unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn reload_without_file_fails() {
    let mut catalog = catalog_with("en", r#"{ "a": "A" }"#);
    let err = catalog.reload("en").unwrap_err();
    assert!(matches!(err, LoadError::NoPathForReload { ref locale } if locale == "en"));
}

// =========================================================================
// Lookup and formatting
// =========================================================================

#[test]
fn current_locale_wins_over_fallback() {
    let mut catalog = Catalog::builder().initial_locale("es").build();
    catalog.add_messages_str("en", r#"{ "hi": "Hello", "bye": "Bye" }"#).unwrap();
    catalog.add_messages_str("es", r#"{ "hi": "Hola" }"#).unwrap();
    assert_eq!(catalog.message("hi"), Some(("es", "Hola")));
    assert_eq!(catalog.message("bye"), Some(("en", "Bye")));
    assert_eq!(catalog.message("nope"), None);
}

#[test]
fn set_locale_switches_lookup() {
    let mut catalog = Catalog::default();
    catalog.add_messages_str("en", r#"{ "hi": "Hello" }"#).unwrap();
    catalog.add_messages_str("es", r#"{ "hi": "Hola" }"#).unwrap();
    assert_eq!(catalog.format("hi", &values! {}), "Hello");
    catalog.set_locale("es");
    assert_eq!(catalog.format("hi", &values! {}), "Hola");
}

#[test]
fn plural_rules_follow_message_locale() {
    let mut catalog = Catalog::builder().initial_locale("ru").build();
    catalog
        .add_messages_str(
            "ru",
            r#"{ "files": "{n, plural, one{# файл} few{# файла} many{# файлов} other{# файла}}" }"#,
        )
        .unwrap();
    assert_eq!(catalog.format("files", &values! { "n" => 2 }), "2 файла");
    assert_eq!(catalog.format("files", &values! { "n" => 5 }), "5 файлов");
}

#[test]
fn missing_message_suggests_ids() {
    let catalog = catalog_with("en", r#"{ "greeting": "Hello" }"#);
    let err = catalog.try_format("greting", &values! {}).unwrap_err();
    assert!(matches!(
        &err,
        CatalogError::MissingMessage { suggestions, .. } if suggestions == &["greeting"]
    ));
    insta::assert_snapshot!(err, @r#"no message "greting" in locale 'en', did you mean: greeting?"#);
}

#[test]
fn invalid_message_reports_build_error() {
    let catalog = catalog_with("en", r#"{ "broken": "{name" }"#);
    let err = catalog.try_format("broken", &values! {}).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Build {
            source: BuildError::Parse(_),
            ..
        }
    ));
}

#[test]
fn format_failure_reports_source() {
    let catalog = catalog_with("en", r#"{ "hello": "Hello {name}" }"#);
    let err = catalog.try_format("hello", &values! {}).unwrap_err();
    let CatalogError::Format { id, source, .. } = err else {
        panic!("expected format error");
    };
    assert_eq!(id, "hello");
    assert!(matches!(source, FormatError::MissingValue { .. }));
}

#[test]
fn best_effort_format_falls_back_to_raw_text_or_id() {
    let catalog = catalog_with("en", r#"{ "hello": "Hello {name}", "broken": "{x" }"#);
    assert_eq!(catalog.format("hello", &values! {}), "Hello {name}");
    assert_eq!(catalog.format("broken", &values! {}), "{x");
    assert_eq!(catalog.format("unknown.id", &values! {}), "unknown.id");
}

#[test]
fn replaced_messages_are_recompiled() {
    let mut catalog = catalog_with("en", r#"{ "a": "first" }"#);
    assert_eq!(catalog.format("a", &values! {}), "first");
    catalog.add_messages_str("en", r#"{ "a": "second" }"#).unwrap();
    assert_eq!(catalog.format("a", &values! {}), "second");
}
