//! Verification service: code issuer, attempt validator and activation
//! gate.

use std::sync::Arc;

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, Rng};

use cv_shared::config::VerificationConfig;

use crate::domain::entities::account::{Account, CODE_LENGTH};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ProfileRepository};

use super::traits::{CounterStoreTrait, MailerTrait};

/// Service handling the verification code lifecycle for accounts.
///
/// State machine per (email, username) pair:
/// `no-state` → `throttled` once the failure counter reaches the cap
/// within its window; `match-pending` → `no-state` on a correct code
/// (activation); failed matches accumulate in the counter.
pub struct VerificationService<M, C, A, P> {
    /// Mail delivery channel, fire-and-forget
    mailer: Arc<M>,
    /// External store for failure counters and timestamps
    counters: Arc<C>,
    /// Account persistence
    accounts: Arc<A>,
    /// Profile persistence, for the activation gate
    profiles: Arc<P>,
    /// Throttle and expiry settings
    config: VerificationConfig,
}

impl<M, C, A, P> VerificationService<M, C, A, P>
where
    M: MailerTrait + 'static,
    C: CounterStoreTrait,
    A: AccountRepository,
    P: ProfileRepository,
{
    /// Create a new verification service
    pub fn new(
        mailer: Arc<M>,
        counters: Arc<C>,
        accounts: Arc<A>,
        profiles: Arc<P>,
        config: VerificationConfig,
    ) -> Self {
        Self {
            mailer,
            counters,
            accounts,
            profiles,
            config,
        }
    }

    /// Issue a fresh verification code for an account.
    ///
    /// Generates a random 8-digit code, stores it with the current
    /// timestamp on the account (marking it inactive), persists the
    /// row, and dispatches delivery out of band. The caller gets the
    /// updated account back before delivery completes; delivery
    /// failures never reach it.
    pub async fn issue(&self, mut account: Account) -> DomainResult<Account> {
        let code = Self::generate_code();
        account.set_verification_code(code.clone());

        let account = self.accounts.update(account).await?;

        tracing::info!(
            account_id = %account.id,
            event = "verification_code_issued",
            "Issued verification code for account"
        );

        self.dispatch_code(account.email.clone(), code);
        Ok(account)
    }

    /// Validate a submitted verification code for an (email, username)
    /// pair and activate the account on success.
    ///
    /// Outcomes:
    /// * throttled pair: a brand-new code is issued and redelivered,
    ///   and the caller is told to retry after the counter key's
    ///   remaining TTL;
    /// * no inactive account matches: not-found (a previously used
    ///   code lands here, since activation removes the pending state);
    /// * more than one inactive account matches: ambiguous, no action;
    /// * wrong or expired code: failure counter incremented, generic
    ///   invalid-code error;
    /// * correct code: counters cleared, account activated, profile
    ///   ensured.
    pub async fn verify(&self, email: &str, username: &str, code: &str) -> DomainResult<()> {
        if code.len() != CODE_LENGTH || !code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::validation(format!(
                "verification code must be {} digits",
                CODE_LENGTH
            )));
        }

        if let Some(retry_after) = self.throttle_remaining(email, username).await? {
            tracing::warn!(
                email = email,
                username = username,
                retry_after_seconds = retry_after,
                event = "verification_throttled",
                "Attempt cap reached for pair"
            );
            self.reissue_for_pair(email, username).await;
            return Err(DomainError::Throttled {
                retry_after_seconds: retry_after,
            });
        }

        let mut matches = self
            .accounts
            .find_inactive_by_email_and_username(email, username)
            .await?;

        let account = match matches.len() {
            0 => return Err(DomainError::not_found("Pending account")),
            1 => matches.remove(0),
            n => {
                // Nothing enforces (email, username) uniqueness among
                // inactive rows at the data layer, so refuse to guess.
                tracing::error!(
                    email = email,
                    username = username,
                    matches = n,
                    event = "verification_ambiguous",
                    "Multiple inactive accounts match pair"
                );
                return Err(DomainError::AmbiguousMatch);
            }
        };

        let stored = match &account.verification_code {
            Some(stored) => stored.clone(),
            None => return Err(DomainError::not_found("Pending account")),
        };

        let code_matches = constant_time_eq(stored.as_bytes(), code.as_bytes())
            && !account.is_code_expired(self.config.code_validity_minutes);

        if !code_matches {
            self.record_failure(email, username).await?;
            return Err(DomainError::InvalidCode);
        }

        self.clear_failures(email, username).await?;
        self.activate(account).await?;
        Ok(())
    }

    /// Activation gate: flips the active flag and guarantees exactly
    /// one profile exists afterwards.
    ///
    /// Enforces the one-active-account-per-email invariant as an
    /// explicit check-and-write: any other active holder of the email
    /// is a conflict, and superseded inactive registrations with the
    /// same email are deleted before the flag flips.
    async fn activate(&self, mut account: Account) -> DomainResult<Account> {
        if let Some(existing) = self.accounts.find_active_by_email(&account.email).await? {
            if existing.id != account.id {
                return Err(DomainError::conflict(format!(
                    "an active account with the email {} already exists",
                    account.email
                )));
            }
        }

        let superseded = self
            .accounts
            .delete_inactive_by_email_except(&account.email, account.id)
            .await?;
        if superseded > 0 {
            tracing::info!(
                account_id = %account.id,
                superseded = superseded,
                event = "stale_registrations_removed",
                "Removed superseded inactive accounts sharing the email"
            );
        }

        account.activate();
        let account = self.accounts.update(account).await?;

        // Idempotent: re-running after a crash between the two writes
        // just finds the existing profile.
        self.profiles.get_or_create(account.id).await?;

        tracing::info!(
            account_id = %account.id,
            event = "account_activated",
            "Account activated and profile ensured"
        );
        Ok(account)
    }

    /// Remaining throttle TTL in seconds for a pair, or None when the
    /// pair is under the attempt cap
    async fn throttle_remaining(&self, email: &str, username: &str) -> DomainResult<Option<i64>> {
        let key = Self::attempts_key(email, username);
        let attempts = self
            .counters
            .get_counter(&key)
            .await
            .map_err(DomainError::internal)?
            .unwrap_or(0);

        if attempts < self.config.max_failed_attempts {
            return Ok(None);
        }

        let ttl = self
            .counters
            .time_to_live(&key)
            .await
            .map_err(DomainError::internal)?
            .unwrap_or(self.config.throttle_window_seconds as i64);
        Ok(Some(ttl.max(0)))
    }

    /// Record a failed attempt: bump the counter (creating it with the
    /// window expiry) and stamp the failure time
    async fn record_failure(&self, email: &str, username: &str) -> DomainResult<()> {
        let window = self.config.throttle_window_seconds;
        let attempts = self
            .counters
            .increment(&Self::attempts_key(email, username), Some(window))
            .await
            .map_err(DomainError::internal)?;
        self.counters
            .set(
                &Self::last_failure_key(email, username),
                &chrono::Utc::now().to_rfc3339(),
                window,
            )
            .await
            .map_err(DomainError::internal)?;

        tracing::warn!(
            email = email,
            username = username,
            attempts = attempts,
            event = "verification_attempt_failed",
            "Wrong verification code submitted"
        );
        Ok(())
    }

    /// Drop the counter and last-failure keys for a pair; absent keys
    /// are a no-op
    async fn clear_failures(&self, email: &str, username: &str) -> DomainResult<()> {
        self.counters
            .delete(&Self::attempts_key(email, username))
            .await
            .map_err(DomainError::internal)?;
        self.counters
            .delete(&Self::last_failure_key(email, username))
            .await
            .map_err(DomainError::internal)?;
        Ok(())
    }

    /// Silently issue a replacement code while a pair is throttled.
    /// Only possible when the pending account is unambiguous; any
    /// failure here is logged and swallowed so the throttle response
    /// still reaches the caller.
    async fn reissue_for_pair(&self, email: &str, username: &str) {
        let matches = match self
            .accounts
            .find_inactive_by_email_and_username(email, username)
            .await
        {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(email = email, error = %e, "Lookup failed during throttled reissue");
                return;
            }
        };

        if let [account] = matches.as_slice() {
            if let Err(e) = self.issue(account.clone()).await {
                tracing::error!(
                    email = email,
                    error = %e,
                    event = "throttled_reissue_failed",
                    "Could not issue replacement code"
                );
            }
        }
    }

    /// Hand the code to the mail channel without blocking the request
    /// path. Errors are logged and otherwise dropped.
    // TODO: route delivery failures to a retry queue or dead-letter
    // instead of only logging them.
    fn dispatch_code(&self, email: String, code: String) {
        let mailer = Arc::clone(&self.mailer);
        tokio::spawn(async move {
            if let Err(e) = mailer.send_verification_code(&email, &code).await {
                tracing::error!(
                    error = %e,
                    event = "verification_email_failed",
                    "Verification code delivery failed"
                );
            }
        });
    }

    /// Generate a random 8-digit numeric code, each digit drawn
    /// uniformly from the OS CSPRNG
    pub fn generate_code() -> String {
        let mut rng = OsRng;
        (0..CODE_LENGTH)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    fn attempts_key(email: &str, username: &str) -> String {
        format!("verify:attempts:{}:{}", email, username)
    }

    fn last_failure_key(email: &str, username: &str) -> String {
        format!("verify:last_failure:{}:{}", email, username)
    }
}
