use cro_config::CroConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &CroConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &CroConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.remote.is_configured() && has_single_underscore_key(&env_keys, "CRO_REMOTE") {
        warnings.push(
            "Remote backend looks unconfigured while CRO_REMOTE* env vars exist. Use double underscores (example: CRO_REMOTE__BASE_URL)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "CRO_STORE") {
        warnings.push(
            "CRO_STORE* env vars are ignored unless nested with double underscores (example: CRO_STORE__MAX_REPORTS)."
                .to_string(),
        );
    }

    if has_single_underscore_key(&env_keys, "CRO_SIMULATION") {
        warnings.push(
            "CRO_SIMULATION* env vars are ignored unless nested with double underscores (example: CRO_SIMULATION__DELAY_MS)."
                .to_string(),
        );
    }

    warnings
}

/// `CRO_REMOTE_BASE_URL` style keys: the section prefix followed by a single `_`.
fn has_single_underscore_key(keys: &[String], section: &str) -> bool {
    keys.iter().any(|key| {
        key.strip_prefix(section)
            .is_some_and(|rest| rest.starts_with('_') && !rest.starts_with("__"))
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter().map(|k| ((*k).to_string(), "x".to_string())).collect()
    }

    #[test]
    fn single_underscore_remote_key_warns() {
        let warnings =
            collect_unconfigured_warnings(&CroConfig::default(), env(&["CRO_REMOTE_BASE_URL"]));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("CRO_REMOTE__BASE_URL"));
    }

    #[test]
    fn nested_keys_do_not_warn() {
        let warnings = collect_unconfigured_warnings(
            &CroConfig::default(),
            env(&["CRO_REMOTE__BASE_URL", "CRO_STORE__MAX_REPORTS", "CRO_LOG", "PATH"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn store_and_simulation_typos_warn() {
        let warnings = collect_unconfigured_warnings(
            &CroConfig::default(),
            env(&["CRO_STORE_PATH", "CRO_SIMULATION_DELAY_MS"]),
        );
        assert_eq!(warnings.len(), 2);
    }
}
