//! Application wiring

use std::sync::Arc;
use std::time::Duration;

use questlink_core::auth::flow::OAuthFlowSettings;
use questlink_core::{
    IdentityService, InMemoryAuthStateStore, LoginVerifier, OAuthFlowService, ResponseCache,
    TelegramLoginService, VerificationService,
};
use questlink_domain::config::Config;
use questlink_domain::constants::TWITTER_OAUTH_SCOPES;
use questlink_domain::Result;
use questlink_infra::{
    DbManager, HttpClient, SqliteCacheRepository, SqliteIdentityRepository, TelegramGateway,
    TwitterGateway,
};

/// Shared handler state. Everything inside is `Arc`ed, so cloning per
/// request is cheap.
#[derive(Clone)]
pub struct AppContext {
    pub oauth: Arc<OAuthFlowService>,
    pub telegram_login: Arc<TelegramLoginService>,
    pub verification: Arc<VerificationService>,
    pub frontend_url: String,
}

impl AppContext {
    /// Wire the full production stack from configuration.
    pub fn build(config: &Config) -> Result<Self> {
        let db = Arc::new(DbManager::new(&config.database.path, config.database.pool_size)?);
        db.run_migrations()?;

        let identity_repo = Arc::new(SqliteIdentityRepository::new(Arc::clone(&db)));
        let cache_repo = Arc::new(SqliteCacheRepository::new(Arc::clone(&db)));
        let identities = Arc::new(IdentityService::new(identity_repo));

        let twitter = Arc::new(TwitterGateway::new(
            HttpClient::new(Duration::from_secs(config.twitter.timeout_seconds))?,
            config.twitter.clone(),
        ));
        let telegram = Arc::new(TelegramGateway::new(
            HttpClient::new(Duration::from_secs(config.telegram.timeout_seconds))?,
            config.telegram.clone(),
        ));

        let oauth = Arc::new(OAuthFlowService::new(
            OAuthFlowSettings {
                authorization_endpoint: config.twitter.authorization_endpoint.clone(),
                client_id: config.twitter.client_id.clone(),
                redirect_uri: config.twitter.redirect_uri.clone(),
                scopes: TWITTER_OAUTH_SCOPES.iter().map(|s| (*s).to_string()).collect(),
            },
            Arc::new(InMemoryAuthStateStore::new()),
            twitter.clone(),
            Arc::clone(&identities),
        ));

        let telegram_login = Arc::new(TelegramLoginService::new(
            LoginVerifier::new(&config.telegram.bot_token),
            telegram,
            identities,
        ));

        let cache = Arc::new(ResponseCache::new(
            cache_repo,
            Duration::from_secs(config.cache.ttl_seconds),
        ));
        let verification = Arc::new(VerificationService::new(twitter, cache));

        Ok(Self {
            oauth,
            telegram_login,
            verification,
            frontend_url: config.server.frontend_url.clone(),
        })
    }
}
