//! Application state: concrete service types wired over the MySQL,
//! Redis, SMTP and filesystem backends.

use std::sync::Arc;

use cv_core::services::auth::AuthService;
use cv_core::services::password_reset::PasswordResetService;
use cv_core::services::profile::ProfileService;
use cv_core::services::resume::ResumeService;
use cv_core::services::verification::VerificationService;
use cv_infra::cache::{RedisClient, RedisCounterStore};
use cv_infra::database::{
    DatabasePool, MySqlAccountRepository, MySqlProfileRepository, MySqlResumeRepository,
    MySqlSessionRepository,
};
use cv_infra::email::{create_mailer, Mailer};
use cv_infra::storage::FilesystemStorage;
use cv_infra::InfrastructureError;
use cv_shared::config::{
    CacheConfig, DatabaseConfig, EmailConfig, UploadConfig, VerificationConfig,
};

/// Verification service over the production backends
pub type Verification = VerificationService<
    Mailer,
    RedisCounterStore,
    MySqlAccountRepository,
    MySqlProfileRepository,
>;

/// Auth service over the production backends
pub type Auth = AuthService<
    Mailer,
    RedisCounterStore,
    MySqlAccountRepository,
    MySqlProfileRepository,
    MySqlSessionRepository,
>;

/// Password reset service over the production backends
pub type PasswordReset = PasswordResetService<MySqlAccountRepository, RedisCounterStore, Mailer>;

/// Profile service over the production backends
pub type Profiles =
    ProfileService<MySqlAccountRepository, MySqlProfileRepository, MySqlResumeRepository>;

/// Resume service over the production backends
pub type Resumes = ResumeService<MySqlAccountRepository, MySqlResumeRepository, FilesystemStorage>;

/// Shared application state handed to every handler
pub struct AppState {
    pub auth: Arc<Auth>,
    pub verification: Arc<Verification>,
    pub password_reset: Arc<PasswordReset>,
    pub profiles: Arc<Profiles>,
    pub resumes: Arc<Resumes>,
    pub upload: UploadConfig,
    pub db: DatabasePool,
    pub redis: RedisClient,
}

impl AppState {
    /// Connect to the backends and wire up the service graph
    pub async fn build(
        database: &DatabaseConfig,
        cache: &CacheConfig,
        email: &EmailConfig,
        upload: &UploadConfig,
        verification_config: VerificationConfig,
    ) -> Result<Self, InfrastructureError> {
        let db = DatabasePool::new(database).await?;
        db.run_migrations().await?;
        let redis = RedisClient::new(cache).await?;

        let accounts = Arc::new(MySqlAccountRepository::new(db.get_pool().clone()));
        let profiles_repo = Arc::new(MySqlProfileRepository::new(db.get_pool().clone()));
        let resumes_repo = Arc::new(MySqlResumeRepository::new(db.get_pool().clone()));
        let sessions = Arc::new(MySqlSessionRepository::new(db.get_pool().clone()));

        let counters = Arc::new(RedisCounterStore::new(redis.clone(), cache.clone()));
        let mailer = Arc::new(create_mailer(email)?);
        let storage = Arc::new(FilesystemStorage::new(upload));

        let verification = Arc::new(VerificationService::new(
            Arc::clone(&mailer),
            Arc::clone(&counters),
            Arc::clone(&accounts),
            Arc::clone(&profiles_repo),
            verification_config.clone(),
        ));

        let auth = Arc::new(AuthService::new(
            Arc::clone(&accounts),
            Arc::clone(&sessions),
            Arc::clone(&profiles_repo),
            Arc::clone(&verification),
        ));

        let password_reset = Arc::new(PasswordResetService::new(
            Arc::clone(&accounts),
            Arc::clone(&counters),
            Arc::clone(&mailer),
            verification_config,
        ));

        let profiles = Arc::new(ProfileService::new(
            Arc::clone(&accounts),
            Arc::clone(&profiles_repo),
            Arc::clone(&resumes_repo),
        ));

        let resumes = Arc::new(ResumeService::new(
            accounts,
            resumes_repo,
            storage,
            upload.clone(),
        ));

        Ok(Self {
            auth,
            verification,
            password_reset,
            profiles,
            resumes,
            upload: upload.clone(),
            db,
            redis,
        })
    }
}
