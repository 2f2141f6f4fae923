use lexibot::bot::Category;
use lexibot::config::Config;
use lexibot::storage::VocabularyStore;

#[test]
fn default_config_file_loads_back() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("lexibot.toml");
    let path = path.to_str().unwrap();
    tokio_test::block_on(Config::create_default(path)).unwrap();
    let config = tokio_test::block_on(Config::load(path)).unwrap();
    assert_eq!(config.bot.name, "lexibot");
    assert_eq!(config.command_prefix(), "!");
    assert_eq!(config.bot.token_env, "LEXIBOT_TOKEN");
}

#[test]
fn missing_config_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("absent.toml");
    assert!(tokio_test::block_on(Config::load(path.to_str().unwrap())).is_err());
}

#[test]
fn corrupt_vocabulary_starts_empty_and_is_quarantined() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("vocab.json");
    std::fs::write(&path, "{ not json").unwrap();
    let store = VocabularyStore::load(&path);
    for category in Category::ALL {
        assert!(store.is_empty(category));
    }
    assert!(tmp.path().join("vocab.json.corrupt").exists());
}

#[test]
fn token_comes_from_named_env_var() {
    let mut config = Config::default();
    config.bot.token_env = "LEXIBOT_TEST_TOKEN_UNSET_VAR".into();
    assert!(config.token().is_none());
}
