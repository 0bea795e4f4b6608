//! Runtime settings loader for avgcalc.
//!
//! Two layers, later wins per field:
//! - deployment file: `<AVGCALC_ROOT>/conf/avgcalc.yaml`
//! - operator file:   `<AVGCALC_CONFIG_HOME>/avgcalc.yaml` (or the `--conf` directory)
//!
//! Every field is optional; unset fields fall back to the constants in
//! [`super::ServiceConfig`].

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

const DEPLOYMENT_FILE: &str = "conf/avgcalc.yaml";
const OPERATOR_FILE: &str = "avgcalc.yaml";
const OPERATOR_DIR_FALLBACK: &str = ".config/avgcalc";
const ROOT_ENV: &str = "AVGCALC_ROOT";
const CONFIG_HOME_ENV: &str = "AVGCALC_CONFIG_HOME";
static CONF_DIR_FLAG: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub gateway: GatewaySettings,
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GatewaySettings {
    pub bind: Option<String>,
    pub response_budget_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WindowSettings {
    pub size: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamSettings {
    pub timeout_ms: Option<u64>,
    pub accept_invalid_certs: Option<bool>,
    pub auth_token: Option<String>,
    pub primes_url: Option<String>,
    pub fibonacci_url: Option<String>,
    pub even_url: Option<String>,
    pub random_url: Option<String>,
}

impl RuntimeSettings {
    /// Overlay `overlay` on top of `self`; set fields in `overlay` win.
    #[must_use]
    pub fn merge(self, overlay: Self) -> Self {
        Self {
            gateway: self.gateway.merge(overlay.gateway),
            window: self.window.merge(overlay.window),
            upstream: self.upstream.merge(overlay.upstream),
        }
    }
}

impl GatewaySettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            bind: overlay.bind.or(self.bind),
            response_budget_ms: overlay.response_budget_ms.or(self.response_budget_ms),
        }
    }
}

impl WindowSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            size: overlay.size.or(self.size),
        }
    }
}

impl UpstreamSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            timeout_ms: overlay.timeout_ms.or(self.timeout_ms),
            accept_invalid_certs: overlay.accept_invalid_certs.or(self.accept_invalid_certs),
            auth_token: overlay.auth_token.or(self.auth_token),
            primes_url: overlay.primes_url.or(self.primes_url),
            fibonacci_url: overlay.fibonacci_url.or(self.fibonacci_url),
            even_url: overlay.even_url.or(self.even_url),
            random_url: overlay.random_url.or(self.random_url),
        }
    }
}

/// Load the deployment file with the operator file layered on top.
pub fn load_runtime_settings() -> RuntimeSettings {
    let (deployment, operator) = runtime_settings_paths();
    load_runtime_settings_from_paths(&deployment, &operator)
}

/// Deployment and operator settings paths, in merge order.
#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = env_path(ROOT_ENV).unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });
    let operator_dir = CONF_DIR_FLAG
        .get()
        .cloned()
        .or_else(|| env_path(CONFIG_HOME_ENV))
        .unwrap_or_else(|| PathBuf::from(OPERATOR_DIR_FALLBACK));
    let operator_dir = if operator_dir.is_absolute() {
        operator_dir
    } else {
        root.join(operator_dir)
    };
    (root.join(DEPLOYMENT_FILE), operator_dir.join(OPERATOR_FILE))
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(deployment: &Path, operator: &Path) -> RuntimeSettings {
    read_layer(deployment)
        .unwrap_or_default()
        .merge(read_layer(operator).unwrap_or_default())
}

/// One settings layer. `None` when absent, empty or unusable; the last two are logged.
fn read_layer(path: &Path) -> Option<RuntimeSettings> {
    if !path.is_file() {
        return None;
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|error| {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "settings layer unreadable; using defaults for it"
            );
        })
        .ok()?;
    // An empty document deserializes as YAML null.
    if raw.trim().is_empty() {
        return None;
    }
    serde_yaml::from_str::<RuntimeSettings>(&raw)
        .map_err(|error| {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "settings layer is not valid avgcalc yaml; using defaults for it"
            );
        })
        .ok()
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Directory holding the operator `avgcalc.yaml` (CLI `--conf`).
///
/// Relative paths resolve against `AVGCALC_ROOT` or the working directory. Only the
/// first call takes effect.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if let Err(rejected) = CONF_DIR_FLAG.set(path) {
        tracing::warn!(
            ignored = %rejected.display(),
            "--conf directory already fixed; ignoring later value"
        );
    }
}
