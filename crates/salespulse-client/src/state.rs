use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{ClientError, ClientResult};

pub const HOME_ENV: &str = "SALESPULSE_HOME";
pub const RULES_ENV: &str = "SALESPULSE_RULES";
pub const RULES_FILE_NAME: &str = "rules.json";

/// Where the effective rules document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    /// Named by `--rules` or `SALESPULSE_RULES`; it must exist.
    Explicit(PathBuf),
    /// `rules.json` found in the SalesPulse home directory.
    Home(PathBuf),
    /// No document anywhere; built-in defaults apply.
    Defaults,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RulesSourceKind {
    Explicit,
    Home,
    Defaults,
}

impl RulesSource {
    pub fn kind(&self) -> RulesSourceKind {
        match self {
            Self::Explicit(_) => RulesSourceKind::Explicit,
            Self::Home(_) => RulesSourceKind::Home,
            Self::Defaults => RulesSourceKind::Defaults,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Home(path) => Some(path),
            Self::Defaults => None,
        }
    }

    pub fn label(&self) -> String {
        match self.path() {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        }
    }
}

/// Resolves the SalesPulse home: the override, then `SALESPULSE_HOME`, then `~/.salespulse`.
pub fn resolve_salespulse_home(home_override: Option<&Path>) -> ClientResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os(HOME_ENV) {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".salespulse")
            } else {
                return Err(ClientError::invalid_argument_with_recovery(
                    "Could not resolve a home directory to look for rules.json.",
                    vec![
                        format!("Set {HOME_ENV} to a directory containing rules.json."),
                        "Or pass `--rules <path>` explicitly.".to_string(),
                    ],
                ));
            }
        }
    };

    absolutize(&candidate)
}

/// Picks the rules document to load.
///
/// With a `home_override` the `SALESPULSE_RULES` variable is not consulted,
/// which keeps lookups hermetic in tests.
pub fn resolve_rules_source(
    explicit: Option<&Path>,
    home_override: Option<&Path>,
) -> ClientResult<RulesSource> {
    if let Some(path) = explicit {
        return Ok(RulesSource::Explicit(absolutize(path)?));
    }

    if home_override.is_none()
        && let Some(env_path) = std::env::var_os(RULES_ENV)
        && !env_path.is_empty()
    {
        return Ok(RulesSource::Explicit(absolutize(Path::new(&env_path))?));
    }

    let home = resolve_salespulse_home(home_override)?;
    let candidate = rules_path(&home);
    if candidate.is_file() {
        return Ok(RulesSource::Home(candidate));
    }

    Ok(RulesSource::Defaults)
}

pub fn rules_path(home: &Path) -> PathBuf {
    home.join(RULES_FILE_NAME)
}

pub fn absolutize(path: &Path) -> ClientResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| ClientError::rules_not_found(path, &error.to_string()))
}
