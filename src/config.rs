//! Configuration types.

use std::collections::HashMap;

use crate::error::ConfigError;

/// Default notify endpoint (override with `NOTIFY_ASSIST_ENDPOINT`).
pub const DEFAULT_ENDPOINT: &str = "https://api.rester.example/notify";

/// Default message template (override with `NOTIFY_ASSIST_TEMPLATE`).
pub const DEFAULT_TEMPLATE: &str = "Urgent: {{event}} at {{time}} for {{team}}";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct NotifyConfig {
    /// Endpoint URL the notifier POSTs to.
    pub endpoint: String,
    /// Address drafts are routed to for review.
    pub user_identity: String,
    /// Team directory: display name → channel identity.
    pub teams: HashMap<String, String>,
    /// Domain used to derive an address for teams missing from the directory.
    pub team_domain: String,
    /// Delivery medium when the conversation doesn't name one.
    pub default_channel: String,
    /// Fallbacks used when extraction finds no matching entity.
    pub default_team: String,
    pub default_event: String,
    pub default_time: String,
    /// Message template with `{{event}}`, `{{time}}`, `{{team}}` placeholders.
    pub template: String,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        let teams = HashMap::from([
            ("DevOps".to_string(), "devops@company.com".to_string()),
            ("Marketing".to_string(), "marketing@company.com".to_string()),
            ("Support".to_string(), "support@company.com".to_string()),
        ]);
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_identity: "user@example.com".to_string(),
            teams,
            team_domain: "company.com".to_string(),
            default_channel: "email".to_string(),
            default_team: "General".to_string(),
            default_event: "Update".to_string(),
            default_time: "soon".to_string(),
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}

impl NotifyConfig {
    /// Build a config from `NOTIFY_ASSIST_*` environment variables,
    /// falling back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("NOTIFY_ASSIST_ENDPOINT") {
            config.endpoint = non_empty("NOTIFY_ASSIST_ENDPOINT", value)?;
        }
        if let Ok(value) = std::env::var("NOTIFY_ASSIST_USER") {
            config.user_identity = non_empty("NOTIFY_ASSIST_USER", value)?;
        }
        if let Ok(value) = std::env::var("NOTIFY_ASSIST_TEAMS") {
            config.teams = parse_team_directory(&value)?;
        }
        if let Ok(value) = std::env::var("NOTIFY_ASSIST_TEAM_DOMAIN") {
            config.team_domain = non_empty("NOTIFY_ASSIST_TEAM_DOMAIN", value)?;
        }
        if let Ok(value) = std::env::var("NOTIFY_ASSIST_CHANNEL") {
            config.default_channel = non_empty("NOTIFY_ASSIST_CHANNEL", value)?;
        }
        if let Ok(value) = std::env::var("NOTIFY_ASSIST_TEMPLATE") {
            config.template = non_empty("NOTIFY_ASSIST_TEMPLATE", value)?;
        }

        Ok(config)
    }

    /// Resolve a team name to its channel identity.
    ///
    /// Directory lookup is case-insensitive; teams missing from the
    /// directory get a derived `<name>@<team_domain>` address.
    pub fn team_identity(&self, team: &str) -> String {
        self.teams
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(team))
            .map(|(_, identity)| identity.clone())
            .unwrap_or_else(|| {
                format!(
                    "{}@{}",
                    team.to_lowercase().replace(' ', "-"),
                    self.team_domain
                )
            })
    }
}

fn non_empty(key: &str, value: String) -> Result<String, ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "value must be non-empty".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

/// Parse a `Name=address,Name=address` team directory string.
fn parse_team_directory(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut teams = HashMap::new();
    for entry in raw.split(',').filter(|e| !e.trim().is_empty()) {
        let (name, identity) = entry.split_once('=').ok_or_else(|| ConfigError::InvalidValue {
            key: "NOTIFY_ASSIST_TEAMS".to_string(),
            message: format!("expected Name=address, got '{}'", entry.trim()),
        })?;
        let name = name.trim();
        let identity = identity.trim();
        if name.is_empty() || identity.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "NOTIFY_ASSIST_TEAMS".to_string(),
                message: format!("empty name or address in '{}'", entry.trim()),
            });
        }
        teams.insert(name.to_string(), identity.to_string());
    }
    Ok(teams)
}
