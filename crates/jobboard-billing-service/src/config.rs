//! Service configuration.

use serde::Deserialize;
use std::path::Path;

/// Secret key default. Doubles as the legacy marker for mock mode.
pub const PLACEHOLDER_SECRET_KEY: &str = "sk_test_placeholder_replace_with_real_key";

/// Publishable key default.
pub const PLACEHOLDER_PUBLISHABLE_KEY: &str = "pk_test_placeholder_replace_with_real_key";

/// Webhook secret default. Doubles as the legacy marker for skipping verification.
pub const PLACEHOLDER_WEBHOOK_SECRET: &str = "whsec_placeholder_replace_with_real_key";

const PLACEHOLDER_SECRET_PREFIX: &str = "sk_test_placeholder";
const PLACEHOLDER_WEBHOOK_PREFIX: &str = "whsec_placeholder";

/// Stripe REST API base URL.
pub const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Stripe secret API key.
    pub stripe_secret_key: String,

    /// Stripe publishable key, handed to the frontend.
    pub stripe_publishable_key: String,

    /// Stripe webhook signing secret.
    pub stripe_webhook_secret: String,

    /// Stripe API base URL (overridable for tests).
    pub stripe_api_base: String,

    /// Timeout for a single Stripe API call, in seconds.
    pub stripe_timeout_seconds: u64,

    /// Serve deterministic mock responses instead of calling Stripe.
    pub mock_provider: bool,

    /// Acknowledge webhooks without verifying or processing them.
    pub skip_webhook_verification: bool,

    /// Maximum age of a webhook signature timestamp, in seconds.
    pub webhook_tolerance_seconds: i64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Stripe secrets file structure.
#[derive(Debug, Deserialize)]
struct StripeSecrets {
    secret_key: String,
    #[serde(default)]
    publishable_key: Option<String>,
    #[serde(default)]
    webhook_secret: Option<String>,
}

/// Stripe keys resolved from the secrets file or the environment.
struct StripeKeys {
    secret_key: String,
    publishable_key: String,
    webhook_secret: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let keys = load_stripe_keys();

        let mock_provider = env_flag("BILLING_MOCK_PROVIDER").unwrap_or_else(|| {
            let placeholder = keys.secret_key.starts_with(PLACEHOLDER_SECRET_PREFIX);
            if placeholder {
                tracing::warn!(
                    "BILLING_MOCK_PROVIDER not set and Stripe secret key is a placeholder - using mock provider"
                );
            }
            placeholder
        });

        let skip_webhook_verification = env_flag("BILLING_SKIP_WEBHOOK_VERIFICATION")
            .unwrap_or_else(|| {
                let placeholder = keys.webhook_secret.starts_with(PLACEHOLDER_WEBHOOK_PREFIX);
                if placeholder {
                    tracing::warn!(
                        "BILLING_SKIP_WEBHOOK_VERIFICATION not set and webhook secret is a placeholder - skipping verification"
                    );
                }
                placeholder
            });

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            stripe_secret_key: keys.secret_key,
            stripe_publishable_key: keys.publishable_key,
            stripe_webhook_secret: keys.webhook_secret,
            stripe_api_base: std::env::var("STRIPE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_STRIPE_API_BASE.into()),
            stripe_timeout_seconds: env_parse("STRIPE_TIMEOUT_SECONDS").unwrap_or(80),
            mock_provider,
            skip_webhook_verification,
            webhook_tolerance_seconds: env_parse("STRIPE_WEBHOOK_TOLERANCE_SECONDS")
                .unwrap_or(300),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(1024 * 1024), // 1MB
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS").unwrap_or(90),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            stripe_secret_key: PLACEHOLDER_SECRET_KEY.into(),
            stripe_publishable_key: PLACEHOLDER_PUBLISHABLE_KEY.into(),
            stripe_webhook_secret: PLACEHOLDER_WEBHOOK_SECRET.into(),
            stripe_api_base: DEFAULT_STRIPE_API_BASE.into(),
            stripe_timeout_seconds: 80,
            mock_provider: true,
            skip_webhook_verification: true,
            webhook_tolerance_seconds: 300,
            cors_origins: vec!["*".into()],
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 90,
        }
    }
}

/// Parse a boolean flag, `None` when unset or unrecognised.
fn env_flag(name: &str) -> Option<bool> {
    std::env::var(name).ok().and_then(|v| parse_flag(&v))
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Load Stripe keys from file or environment.
fn load_stripe_keys() -> StripeKeys {
    let secret_paths = [
        ".secrets/stripe.json",
        "jobboard-billing/.secrets/stripe.json",
        "crates/jobboard-billing-service/.secrets/stripe.json",
        "../.secrets/stripe.json",
    ];

    let secrets = secret_paths.iter().find_map(|path| {
        let secrets = load_secrets_file::<StripeSecrets>(path).ok()?;
        tracing::info!(path = %path, "Loaded Stripe secrets from file");
        Some(secrets)
    });

    if secrets.is_none() {
        tracing::debug!("Stripe secrets file not found, using environment variables");
    }

    resolve_stripe_keys(secrets, |name| std::env::var(name).ok())
}

/// Merge file secrets with the environment. Keys missing from the file fall
/// back to their environment variable, then to the placeholder.
fn resolve_stripe_keys(
    secrets: Option<StripeSecrets>,
    env: impl Fn(&str) -> Option<String>,
) -> StripeKeys {
    let (secret_key, publishable_key, webhook_secret) = match secrets {
        Some(s) => (Some(s.secret_key), s.publishable_key, s.webhook_secret),
        None => (None, None, None),
    };

    StripeKeys {
        secret_key: secret_key
            .or_else(|| env("STRIPE_SECRET_KEY"))
            .unwrap_or_else(|| PLACEHOLDER_SECRET_KEY.into()),
        publishable_key: publishable_key
            .or_else(|| env("STRIPE_PUBLISHABLE_KEY"))
            .unwrap_or_else(|| PLACEHOLDER_PUBLISHABLE_KEY.into()),
        webhook_secret: webhook_secret
            .or_else(|| env("STRIPE_WEBHOOK_SECRET"))
            .unwrap_or_else(|| PLACEHOLDER_WEBHOOK_SECRET.into()),
    }
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_runs_in_mock_mode() {
        let config = ServiceConfig::default();
        assert!(config.mock_provider);
        assert!(config.skip_webhook_verification);
        assert_eq!(config.stripe_api_base, DEFAULT_STRIPE_API_BASE);
    }

    #[test]
    fn placeholders_carry_the_legacy_prefixes() {
        assert!(PLACEHOLDER_SECRET_KEY.starts_with(PLACEHOLDER_SECRET_PREFIX));
        assert!(PLACEHOLDER_WEBHOOK_SECRET.starts_with(PLACEHOLDER_WEBHOOK_PREFIX));
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("false"), Some(false));
        assert_eq!(parse_flag("no"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn secrets_file_requires_secret_key() {
        let parsed: Result<StripeSecrets, _> =
            serde_json::from_str(r#"{"publishable_key": "pk_live_x"}"#);
        assert!(parsed.is_err());

        let parsed: StripeSecrets =
            serde_json::from_str(r#"{"secret_key": "sk_live_x"}"#).unwrap();
        assert_eq!(parsed.secret_key, "sk_live_x");
        assert!(parsed.webhook_secret.is_none());
    }

    fn env_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: Vec<(String, String)> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| {
            vars.iter()
                .find(|(k, _)| k.as_str() == name)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn keys_missing_from_file_fall_back_to_env() {
        let secrets: StripeSecrets =
            serde_json::from_str(r#"{"secret_key": "sk_live_real"}"#).unwrap();
        let env = env_from(&[
            ("STRIPE_SECRET_KEY", "sk_live_from_env"),
            ("STRIPE_WEBHOOK_SECRET", "whsec_real_from_env"),
            ("STRIPE_PUBLISHABLE_KEY", "pk_live_from_env"),
        ]);

        let keys = resolve_stripe_keys(Some(secrets), env);

        assert_eq!(keys.secret_key, "sk_live_real");
        assert_eq!(keys.webhook_secret, "whsec_real_from_env");
        assert_eq!(keys.publishable_key, "pk_live_from_env");
        assert!(!keys.webhook_secret.starts_with(PLACEHOLDER_WEBHOOK_PREFIX));
    }

    #[test]
    fn file_keys_win_over_env() {
        let secrets: StripeSecrets = serde_json::from_str(
            r#"{"secret_key": "sk_live_file", "webhook_secret": "whsec_file"}"#,
        )
        .unwrap();
        let env = env_from(&[("STRIPE_WEBHOOK_SECRET", "whsec_env")]);

        let keys = resolve_stripe_keys(Some(secrets), env);

        assert_eq!(keys.secret_key, "sk_live_file");
        assert_eq!(keys.webhook_secret, "whsec_file");
        assert_eq!(keys.publishable_key, PLACEHOLDER_PUBLISHABLE_KEY);
    }

    #[test]
    fn no_file_and_no_env_yields_placeholders() {
        let keys = resolve_stripe_keys(None, env_from(&[]));
        assert_eq!(keys.secret_key, PLACEHOLDER_SECRET_KEY);
        assert_eq!(keys.publishable_key, PLACEHOLDER_PUBLISHABLE_KEY);
        assert_eq!(keys.webhook_secret, PLACEHOLDER_WEBHOOK_SECRET);
    }
}
