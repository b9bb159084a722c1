//! Environment validation tests

use content_crew::config::{ApiKeys, ConfigError, OPENAI_API_KEY, SERPER_API_KEY};

fn lookup(openai: Option<&str>, serper: Option<&str>) -> impl Fn(&str) -> Option<String> {
    let openai = openai.map(str::to_string);
    let serper = serper.map(str::to_string);
    move |name| match name {
        OPENAI_API_KEY => openai.clone(),
        SERPER_API_KEY => serper.clone(),
        _ => None,
    }
}

#[test]
fn test_missing_openai_key_names_variable() {
    let err = ApiKeys::from_lookup(lookup(None, Some("serper"))).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar(OPENAI_API_KEY));
    assert!(err.to_string().contains("Please check your .env file."));
}

#[test]
fn test_missing_serper_key_names_variable() {
    let err = ApiKeys::from_lookup(lookup(Some("sk"), None)).unwrap_err();
    assert_eq!(err, ConfigError::MissingVar(SERPER_API_KEY));
}

#[test]
fn test_keys_are_trimmed() {
    let keys = ApiKeys::from_lookup(lookup(Some(" sk-1 \n"), Some("s-2"))).unwrap();
    assert_eq!(keys.openai, "sk-1");
}
