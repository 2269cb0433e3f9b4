//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the CLI. Core
//! services are generic over the storage and wellness seams; AppState pins
//! them to the SQLite implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, warn};

use moodbites_core::chat::session::ConversationSession;
use moodbites_core::llm::client::GenerationClient;
use moodbites_core::preference::store::PreferenceStore;
use moodbites_infra::config::load_global_config;
use moodbites_infra::filesystem::{ensure_data_dir, resolve_data_dir};
use moodbites_infra::llm::build_generation_client;
use moodbites_infra::secret::resolve_api_key;
use moodbites_infra::sqlite::kv::SqliteKvStore;
use moodbites_infra::sqlite::pool::DatabasePool;
use moodbites_infra::sqlite::wellness::SqliteWellnessRepository;
use moodbites_types::config::GlobalConfig;
use moodbites_types::error::RepositoryError;

/// Concrete session type pinned to the SQLite implementations.
pub type ConcreteSession = ConversationSession<SqliteKvStore, SqliteWellnessRepository>;

/// Command-line overrides applied on top of `config.toml`.
#[derive(Debug, Default)]
pub struct Overrides {
    pub model: Option<String>,
    pub language: Option<String>,
    pub user_name: Option<String>,
}

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub config: GlobalConfig,
    pub client: Arc<GenerationClient>,
    pub preferences: Arc<PreferenceStore<SqliteKvStore>>,
    pub kv: SqliteKvStore,
    pub wellness: SqliteWellnessRepository,
}

impl AppState {
    /// Initialize the application state in the resolved data directory.
    pub async fn init(overrides: Overrides) -> anyhow::Result<Self> {
        Self::init_in(&resolve_data_dir(), overrides).await
    }

    /// Load config, connect to the DB in `data_dir` and wire services.
    pub async fn init_in(data_dir: &Path, overrides: Overrides) -> anyhow::Result<Self> {
        ensure_data_dir(data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let mut config = load_global_config(data_dir).await;
        moodbites_infra::config::apply_overrides(
            &mut config,
            overrides.model.as_deref(),
            overrides.language.as_deref(),
            overrides.user_name.as_deref(),
        );

        let db_pool = DatabasePool::open_in(data_dir)
            .await
            .context("failed to open the MoodBites database")?;
        let kv = SqliteKvStore::new(db_pool.clone());
        let wellness = SqliteWellnessRepository::new(db_pool);

        let preferences = open_preferences(kv.clone()).await?;

        let api_key = resolve_api_key(&config.assistant.api_key_env);
        let client = build_generation_client(&config.assistant, api_key);

        Ok(Self {
            config,
            client: Arc::new(client),
            preferences: Arc::new(preferences),
            kv,
            wellness,
        })
    }

    /// Build a conversation session sharing this state's client and preferences.
    ///
    /// Restores the saved transcript when persistence is enabled. An
    /// unreadable transcript is logged and the session starts from the
    /// greeting; the next turn overwrites it.
    pub async fn session(&self) -> anyhow::Result<ConcreteSession> {
        let assistant = &self.config.assistant;
        let mut session = ConversationSession::new(
            self.client.clone(),
            self.preferences.clone(),
            self.wellness.clone(),
            assistant,
        );

        if assistant.persist_transcript {
            session = session.with_transcript_store(self.kv.clone());
            match session.restore_transcript().await {
                Ok(restored) => debug!(restored, "transcript persistence enabled"),
                Err(RepositoryError::Corrupt(reason)) => {
                    warn!(%reason, "saved transcript is unreadable, starting fresh");
                }
                Err(e) => return Err(e).context("failed to restore the saved transcript"),
            }
        }

        Ok(session)
    }
}

/// Load remembered preferences. An unreadable stored list is logged and
/// replaced by an empty one, which the next `add` overwrites.
async fn open_preferences(kv: SqliteKvStore) -> anyhow::Result<PreferenceStore<SqliteKvStore>> {
    let store = PreferenceStore::new(kv);
    match store.load().await {
        Ok(_) => Ok(store),
        Err(RepositoryError::Corrupt(reason)) => {
            warn!(%reason, "saved preferences are unreadable, starting with none");
            Ok(store)
        }
        Err(e) => Err(e).context("failed to load saved preferences"),
    }
}
