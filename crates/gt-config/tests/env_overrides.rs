use figment::Jail;
use gt_config::GhostConfig;

#[test]
fn external_overrides_fill_config_values() {
    Jail::expect_with(|_jail| {
        let overrides = vec![(
            "GHOSTTRACE_GEMINI__API_KEY".to_string(),
            "AIza-external".to_string(),
        )];

        let config = GhostConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.gemini.api_key, "AIza-external");
        Ok(())
    });
}

#[test]
fn process_env_beats_external_overrides() {
    Jail::expect_with(|jail| {
        jail.set_env("GHOSTTRACE_GEMINI__API_KEY", "AIza-env");
        let overrides = vec![(
            "GHOSTTRACE_GEMINI__API_KEY".to_string(),
            "AIza-external".to_string(),
        )];

        let config = GhostConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert_eq!(config.gemini.api_key, "AIza-env");
        Ok(())
    });
}

#[test]
fn unprefixed_overrides_are_ignored() {
    Jail::expect_with(|_jail| {
        let overrides = vec![("GEMINI_API_KEY".to_string(), "AIza-ignored".to_string())];

        let config = GhostConfig::load_with_env_overrides(&overrides).expect("config loads");
        assert!(config.gemini.api_key.is_empty());
        Ok(())
    });
}
