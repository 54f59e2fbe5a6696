use intenteval_core::config::{Config, API_KEY_ENV_VAR};
use std::io::Write;

#[test]
fn test_load_explicit_config_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(
        file,
        r#"
        [model]
        provider = "mock"
        timeout_secs = 5

        [evaluation]
        dataset_filter = "edge_case"
        prompt_path = "prompts/custom.txt"
        "#
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.model.provider, "mock");
    assert_eq!(config.model.timeout_secs, 5);
    assert_eq!(config.evaluation.dataset_filter.as_deref(), Some("edge_case"));
    assert_eq!(
        config.evaluation.prompt_path.as_deref(),
        Some(std::path::Path::new("prompts/custom.txt"))
    );
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_rejects_bad_file_values() {
    let config = Config::from_toml_str(
        r#"
        [model]
        provider = "openai"
        max_tokens = 0
        "#,
    )
    .unwrap();

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("max_tokens"));
}

#[test]
fn test_api_key_falls_back_to_env() {
    let config = Config::default();
    std::env::set_var(API_KEY_ENV_VAR, "sk-from-env");
    let key = config.model.resolve_api_key();
    std::env::remove_var(API_KEY_ENV_VAR);

    assert_eq!(key.as_deref(), Some("sk-from-env"));
}

#[test]
fn test_config_serializes_back_to_toml() {
    let mut config = Config::default();
    config.evaluation.temperature = 0.25;
    config.evaluation.verbose = false;

    let toml = toml::to_string(&config).unwrap();
    let parsed = Config::from_toml_str(&toml).unwrap();

    assert!((parsed.evaluation.temperature - 0.25).abs() < f32::EPSILON);
    assert!(!parsed.evaluation.verbose);
    assert_eq!(parsed.model.model, config.model.model);
}
