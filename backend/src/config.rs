//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `CITY_INFO_*` environment variables and an
//! optional configuration file. Settings are loaded once in `main` and passed
//! by reference; nothing reads configuration from a global afterwards.

use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAIL_TO: &str = "admin@cityinfo.local";
const DEFAULT_MAIL_FROM: &str = "noreply@cityinfo.local";

/// Errors raised when settings are present but unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A setting has a value outside its accepted set.
    #[error("invalid value {value:?} for {field}")]
    InvalidValue { field: &'static str, value: String },
    /// A setting required by the selected mode is absent.
    #[error("{field} must be set when {mode} is selected")]
    Missing {
        field: &'static str,
        mode: &'static str,
    },
}

impl SettingsError {
    fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

/// Which `CityInfoStore` backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// PostgreSQL through Diesel.
    Postgres,
    /// Process-local, lost on restart.
    Memory,
}

impl FromStr for StoreMode {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            _ => Err(SettingsError::invalid("store", value)),
        }
    }
}

/// Which `NotificationSink` receives deletion notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationMode {
    /// Write notifications to the log.
    Local,
    /// Forward notifications to an HTTP mail relay.
    Mail,
}

impl FromStr for NotificationMode {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "mail" => Ok(Self::Mail),
            _ => Err(SettingsError::invalid("notifications", value)),
        }
    }
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CITY_INFO")]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Store backend: `postgres` or `memory`.
    pub store: Option<String>,
    /// Notification sink: `local` or `mail`.
    pub notifications: Option<String>,
    /// Recipient of deletion notices.
    pub mail_to: Option<String>,
    /// Sender of deletion notices.
    pub mail_from: Option<String>,
    /// Mail relay endpoint used in `mail` mode.
    pub mail_relay_url: Option<String>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
    /// Insert the sample cities when the store is empty.
    pub seed: Option<bool>,
    /// Apply embedded migrations before serving.
    pub run_migrations: Option<bool>,
}

impl AppSettings {
    /// Selected store backend, `postgres` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] for unknown modes.
    pub fn store_mode(&self) -> Result<StoreMode, SettingsError> {
        self.store
            .as_deref()
            .map_or(Ok(StoreMode::Postgres), StoreMode::from_str)
    }

    /// Selected notification sink, `local` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] for unknown modes.
    pub fn notification_mode(&self) -> Result<NotificationMode, SettingsError> {
        self.notifications
            .as_deref()
            .map_or(Ok(NotificationMode::Local), NotificationMode::from_str)
    }

    /// Connection string required by the PostgreSQL store.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when the URL is absent or blank.
    pub fn require_database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::Missing {
                field: "database_url",
                mode: "store=postgres",
            })
    }

    /// Relay endpoint required by the mail sink.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Missing`] when absent and
    /// [`SettingsError::InvalidValue`] when it is not a URL.
    pub fn require_mail_relay_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .mail_relay_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::Missing {
                field: "mail_relay_url",
                mode: "notifications=mail",
            })?;
        Url::parse(raw).map_err(|_| SettingsError::invalid("mail_relay_url", raw))
    }

    /// Recipient address, falling back to the default.
    pub fn mail_to(&self) -> &str {
        self.mail_to.as_deref().unwrap_or(DEFAULT_MAIL_TO)
    }

    /// Sender address, falling back to the default.
    pub fn mail_from(&self) -> &str {
        self.mail_from.as_deref().unwrap_or(DEFAULT_MAIL_FROM)
    }

    /// Whether to seed the sample cities, `true` when unset.
    pub fn seed(&self) -> bool {
        self.seed.unwrap_or(true)
    }

    /// Whether to apply embedded migrations, `true` when unset.
    pub fn run_migrations(&self) -> bool {
        self.run_migrations.unwrap_or(true)
    }

    /// Listener address, `0.0.0.0:8080` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidValue`] when the value is not a socket
    /// address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|_| SettingsError::invalid("bind_addr", raw))
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for settings parsing and mode selection.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 9] = [
        "CITY_INFO_DATABASE_URL",
        "CITY_INFO_STORE",
        "CITY_INFO_NOTIFICATIONS",
        "CITY_INFO_MAIL_TO",
        "CITY_INFO_MAIL_FROM",
        "CITY_INFO_MAIL_RELAY_URL",
        "CITY_INFO_BIND_ADDR",
        "CITY_INFO_SEED",
        "CITY_INFO_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("city-info")]).expect("config should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    fn with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        let mut vars = cleared();
        for (name, value) in overrides {
            if let Some(slot) = vars.iter_mut().find(|(var, _)| var == name) {
                slot.1 = Some((*value).to_owned());
            }
        }
        vars
    }

    #[rstest]
    fn defaults_apply_when_nothing_is_set() {
        let _guard = lock_env(cleared());

        let settings = load_from_empty_args();
        assert_eq!(settings.store_mode(), Ok(StoreMode::Postgres));
        assert_eq!(settings.notification_mode(), Ok(NotificationMode::Local));
        assert_eq!(
            settings.bind_addr(),
            Ok(DEFAULT_BIND_ADDR.parse().expect("socket addr"))
        );
        assert_eq!(settings.mail_to(), DEFAULT_MAIL_TO);
        assert_eq!(settings.mail_from(), DEFAULT_MAIL_FROM);
        assert!(settings.seed());
        assert!(settings.run_migrations());
    }

    #[rstest]
    fn seeding_and_migrations_can_be_disabled() {
        let _guard = lock_env(with(&[
            ("CITY_INFO_SEED", "false"),
            ("CITY_INFO_RUN_MIGRATIONS", "false"),
        ]));

        let settings = load_from_empty_args();
        assert!(!settings.seed());
        assert!(!settings.run_migrations());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with(&[
            ("CITY_INFO_DATABASE_URL", "postgres://localhost/cityinfo"),
            ("CITY_INFO_STORE", "memory"),
            ("CITY_INFO_NOTIFICATIONS", "mail"),
            ("CITY_INFO_MAIL_RELAY_URL", "http://relay.local/send"),
            ("CITY_INFO_BIND_ADDR", "127.0.0.1:9000"),
        ]));

        let settings = load_from_empty_args();
        assert_eq!(settings.store_mode(), Ok(StoreMode::Memory));
        assert_eq!(settings.notification_mode(), Ok(NotificationMode::Mail));
        assert_eq!(
            settings.require_database_url(),
            Ok("postgres://localhost/cityinfo")
        );
        assert_eq!(
            settings
                .require_mail_relay_url()
                .expect("relay url")
                .as_str(),
            "http://relay.local/send"
        );
        assert_eq!(
            settings.bind_addr(),
            Ok("127.0.0.1:9000".parse().expect("socket addr"))
        );
    }

    #[rstest]
    fn blank_database_url_is_missing() {
        let _guard = lock_env(with(&[("CITY_INFO_DATABASE_URL", "   ")]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.require_database_url(),
            Err(SettingsError::Missing {
                field: "database_url",
                ..
            })
        ));
    }

    #[rstest]
    #[case("sqlite")]
    #[case("")]
    fn unknown_store_mode_is_rejected(#[case] raw: &str) {
        assert_eq!(
            StoreMode::from_str(raw),
            Err(SettingsError::invalid("store", raw))
        );
    }

    #[rstest]
    #[case("LOCAL", NotificationMode::Local)]
    #[case(" mail ", NotificationMode::Mail)]
    fn notification_modes_ignore_case_and_whitespace(
        #[case] raw: &str,
        #[case] expected: NotificationMode,
    ) {
        assert_eq!(NotificationMode::from_str(raw), Ok(expected));
    }

    #[rstest]
    fn malformed_bind_addr_is_rejected() {
        let _guard = lock_env(with(&[("CITY_INFO_BIND_ADDR", "not-an-addr")]));

        let settings = load_from_empty_args();
        assert!(matches!(
            settings.bind_addr(),
            Err(SettingsError::InvalidValue {
                field: "bind_addr",
                ..
            })
        ));
    }
}
