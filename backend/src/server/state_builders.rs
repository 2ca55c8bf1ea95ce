//! Builders for the store and notification adapters selected by settings.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use city_info::config::{AppSettings, NotificationMode, SettingsError, StoreMode};
use city_info::domain::ports::{CityInfoStore, CityInfoStoreError, NotificationSink};
use city_info::domain::{CityInfoRepository, SeedOutcome, ensure_seed_data};
use city_info::inbound::http::state::{DEFAULT_NOTIFICATION_TIMEOUT, HttpState};
use city_info::outbound::memory::InMemoryCityInfoStore;
use city_info::outbound::notification::{
    HttpMailNotificationSink, LocalNotificationSink, MailAddresses,
};
use city_info::outbound::persistence::{
    DbPool, DieselCityInfoStore, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};

/// Failures that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("migration task failed: {0}")]
    MigrationTask(String),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("seeding failed: {0}")]
    Seed(#[from] CityInfoStoreError),
    #[error("mail client could not be built: {0}")]
    MailClient(#[from] reqwest::Error),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        std::io::Error::other(err.to_string())
    }
}

async fn build_postgres_store(settings: &AppSettings) -> Result<DieselCityInfoStore, StartupError> {
    let database_url = settings.require_database_url()?.to_owned();
    if settings.run_migrations() {
        let url = database_url.clone();
        let applied = tokio::task::spawn_blocking(move || run_pending_migrations(&url))
            .await
            .map_err(|err| StartupError::MigrationTask(err.to_string()))??;
        info!(applied, "database migrations applied");
    }
    let pool = DbPool::new(PoolConfig::new(database_url)).await?;
    Ok(DieselCityInfoStore::new(pool))
}

/// Build the store selected by `store`, seeding it when enabled.
///
/// # Errors
/// Returns [`StartupError`] for missing settings, migration or pool failures
/// and seeding errors.
pub(crate) async fn build_store(
    settings: &AppSettings,
) -> Result<Arc<dyn CityInfoStore>, StartupError> {
    let store: Arc<dyn CityInfoStore> = match settings.store_mode()? {
        StoreMode::Postgres => Arc::new(build_postgres_store(settings).await?),
        StoreMode::Memory => Arc::new(InMemoryCityInfoStore::new()),
    };

    if settings.seed() {
        if let SeedOutcome::Applied { cities } = ensure_seed_data(store.as_ref()).await? {
            info!(cities, "store seeded");
        }
    }
    Ok(store)
}

/// Build the notification sink selected by `notifications`.
///
/// # Errors
/// Returns [`StartupError`] when mail mode lacks a relay URL or the HTTP
/// client cannot be constructed.
pub(crate) fn build_notification_sink(
    settings: &AppSettings,
) -> Result<Arc<dyn NotificationSink>, StartupError> {
    let sink: Arc<dyn NotificationSink> = match settings.notification_mode()? {
        NotificationMode::Local => Arc::new(LocalNotificationSink::new(
            settings.mail_from(),
            settings.mail_to(),
        )),
        NotificationMode::Mail => Arc::new(HttpMailNotificationSink::new(
            settings.require_mail_relay_url()?,
            MailAddresses {
                from: settings.mail_from().to_owned(),
                to: settings.mail_to().to_owned(),
            },
            DEFAULT_NOTIFICATION_TIMEOUT,
        )?),
    };
    Ok(sink)
}

/// Resolve every adapter and assemble the handler state.
///
/// # Errors
/// Propagates [`StartupError`] from the individual builders.
pub(crate) async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StartupError> {
    let notifications = build_notification_sink(settings)?;
    let store = build_store(settings).await?;
    Ok(HttpState::new(CityInfoRepository::new(store), notifications))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn settings(store: &str, notifications: &str, relay: Option<&str>) -> AppSettings {
        AppSettings {
            database_url: None,
            store: Some(store.to_owned()),
            notifications: Some(notifications.to_owned()),
            mail_to: None,
            mail_from: None,
            mail_relay_url: relay.map(str::to_owned),
            bind_addr: None,
            seed: None,
            run_migrations: Some(false),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn memory_store_is_seeded_once() {
        let settings = settings("memory", "local", None);
        let store = build_store(&settings).await.expect("memory store");
        assert_eq!(store.count_cities().await.expect("count"), 3);
        assert_eq!(
            ensure_seed_data(store.as_ref()).await.expect("reseed"),
            SeedOutcome::AlreadySeeded
        );
    }

    #[rstest]
    #[tokio::test]
    async fn memory_store_stays_empty_when_seeding_is_disabled() {
        let settings = AppSettings {
            seed: Some(false),
            ..settings("memory", "local", None)
        };
        let store = build_store(&settings).await.expect("memory store");
        assert_eq!(store.count_cities().await.expect("count"), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn postgres_store_requires_database_url() {
        let settings = settings("postgres", "local", None);
        let err = build_store(&settings).await.err().expect("missing url");
        assert!(matches!(
            err,
            StartupError::Settings(SettingsError::Missing { field: "database_url", .. })
        ));
    }

    #[rstest]
    fn mail_sink_requires_relay_url() {
        let settings = settings("memory", "mail", None);
        let err = build_notification_sink(&settings).err().expect("missing relay");
        assert!(matches!(
            err,
            StartupError::Settings(SettingsError::Missing { field: "mail_relay_url", .. })
        ));
    }

    #[rstest]
    #[case("local", None)]
    #[case("mail", Some("http://relay.local/send"))]
    fn notification_sink_builds_for_valid_settings(
        #[case] notifications: &str,
        #[case] relay: Option<&str>,
    ) {
        let settings = settings("memory", notifications, relay);
        assert!(build_notification_sink(&settings).is_ok());
    }
}
