// Test that the configured log level takes effect for native engine users.
// Kept in its own test binary since the max level is process-wide.

use log::LevelFilter;
use richtext_wasm::{EditorConfig, StyleEngine};

#[test]
fn test_engine_applies_configured_log_level() {
    let quiet = EditorConfig::from_json(r#"{"logLevel":"warn"}"#).expect("config should parse");
    let _engine = StyleEngine::from_markup("abc", quiet).expect("markup should parse");
    assert_eq!(log::max_level(), LevelFilter::Warn);

    // Unknown names fall back to debug
    let unknown = EditorConfig::from_json(r#"{"logLevel":"chatty"}"#).unwrap();
    let _engine = StyleEngine::new(unknown);
    assert_eq!(log::max_level(), LevelFilter::Debug);
}
