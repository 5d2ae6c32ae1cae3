use motif_config::MotifConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &MotifConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &MotifConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.firebase.is_configured() && has_env_prefix(&env_keys, "MOTIF_FIREBASE") {
        warnings.push(
            "Firebase config appears default while MOTIF_FIREBASE* env vars exist. Use double underscores (example: MOTIF_FIREBASE__PROJECT_ID)."
                .to_string(),
        );
    }

    if !config.auth.is_configured() && has_env_prefix(&env_keys, "MOTIF_AUTH") {
        warnings.push(
            "Auth config appears default while MOTIF_AUTH* env vars exist. Use double underscores (example: MOTIF_AUTH__SIGN_IN_URL)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter().any(|key| key.starts_with(prefix))
}
