//! Login, token validation, and credential change/recovery flows.
//!
//! Both transport adapters call these methods; neither re-derives any
//! business rule. Declined outcomes of the change/recovery flows are
//! ordinary `Ok` envelopes, while login failures are errors so each
//! transport can surface its own failure convention.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use authhub_auth::jwt::{JwtDecoder, JwtEncoder};
use authhub_auth::password::{PasswordHasher, TempPasswordGenerator};
use authhub_core::config::{AuthConfig, MailConfig, TrustMode};
use authhub_core::error::AppError;
use authhub_core::result::AppResult;
use authhub_core::types::response::{Envelope, Meta};
use authhub_entity::session::model::{ClientMeta, CreateSession};
use authhub_entity::user::UserProfile;

use crate::mail::{self, Mailer, template};
use crate::store::{SessionStore, UserStore};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    /// Snapshot of the user at login time, built from the live record.
    pub profile: UserProfile,
    /// Issued bearer token.
    pub token: String,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

impl LoginSuccess {
    /// The envelope both transports answer with.
    pub fn envelope(&self) -> AppResult<Envelope> {
        Ok(Envelope::success("Login successful", 200).with_meta(Meta {
            total_data: 1,
            token: Some(self.token.clone()),
            payload: Some(serde_json::to_value(&self.profile)?),
            ..Meta::default()
        }))
    }
}

/// Orchestrates credential verification, token issuance/validation, and
/// credential changes.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    mailer: Arc<dyn Mailer>,
    hasher: PasswordHasher,
    generator: TempPasswordGenerator,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    trust_mode: TrustMode,
    login_url: String,
}

impl AuthService {
    /// Wire the auth flows to their collaborators.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        mailer: Arc<dyn Mailer>,
        auth_config: &AuthConfig,
        mail_config: &MailConfig,
    ) -> Self {
        Self {
            users,
            sessions,
            mailer,
            hasher: PasswordHasher::new(),
            generator: TempPasswordGenerator::new(),
            encoder: JwtEncoder::new(auth_config),
            decoder: JwtDecoder::new(auth_config),
            trust_mode: auth_config.trust_mode,
            login_url: mail_config.login_url.clone(),
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Find the user by email
    /// 2. Verify the password
    /// 3. Check the account is active
    /// 4. Build the snapshot from the live record and issue a token
    /// 5. Record the session audit row (best effort)
    /// 6. Dispatch a sign-in alert (fire and forget)
    ///
    /// The three failure causes stay distinct: unknown identity and bad
    /// secret are unauthorized, an inactive account is forbidden.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: ClientMeta,
    ) -> AppResult<LoginSuccess> {
        // Step 1: Find the user
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized("User not found"))?;

        // Step 2: Verify the password
        if !self.hasher.verify_password(password, &user.password_hash)? {
            return Err(AppError::unauthorized("Invalid credentials"));
        }

        // Step 3: Check the account is usable
        if !user.is_active {
            return Err(AppError::forbidden(
                "User is not active, contact the administrator",
            ));
        }

        // Step 4: Snapshot from the live record, never from a prior token
        let profile = user.profile();
        let issued = self.encoder.issue(&profile)?;

        // Step 5: Audit record; failures are logged, never gate the login
        let audit = CreateSession {
            user_id: user.id,
            user_name: user.display_name(),
            email: user.email.clone(),
            company: user.company.clone(),
            expires_at: issued.expires_at,
            client: client.clone(),
        };
        if let Err(e) = self.sessions.record(&audit).await {
            warn!(user_id = %user.id, error = %e, "Failed to record login session");
        }

        // Step 6: Sign-in alert
        mail::mailer::dispatch(
            Arc::clone(&self.mailer),
            template::login_alert(
                &user.email,
                &user.name,
                client.ip.as_deref(),
                client.user_agent.as_deref(),
            ),
        );

        info!(user_id = %user.id, email = %user.email, "Login successful");

        Ok(LoginSuccess {
            profile,
            token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    /// Validates a bearer token and returns the user snapshot.
    ///
    /// In `Reverify` mode the live record is fetched by id, so a user
    /// deactivated after issuance is rejected before token expiry. In
    /// `TrustToken` mode the snapshot embedded in the token is served
    /// as-is.
    pub async fn validate_token(&self, token: &str) -> AppResult<UserProfile> {
        let claims = self.decoder.decode(token)?;

        match self.trust_mode {
            TrustMode::TrustToken => Ok(claims.user),
            TrustMode::Reverify => {
                let user = self
                    .users
                    .find_by_id(claims.sub)
                    .await?
                    .ok_or_else(|| AppError::unauthorized("Token not valid"))?;

                if !user.is_active {
                    return Err(AppError::unauthorized(
                        "User is not active, please talk to the administrator",
                    ));
                }

                Ok(user.profile())
            }
        }
    }

    /// Changes a password after verifying the current one.
    ///
    /// Unknown id and wrong current password are declined envelopes (404
    /// and 400 respectively), not errors; the stored hash is untouched on
    /// either. A successful change clears the must-change flag.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
    ) -> AppResult<Envelope> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            return Ok(Envelope::declined("User not found", 404));
        };

        if !self
            .hasher
            .verify_password(current_password, &user.password_hash)?
        {
            return Ok(Envelope::declined("Current password is incorrect", 400));
        }

        let new_hash = self.hasher.hash_password(new_password)?;
        self.users.update_password(user.id, &new_hash, false).await?;

        info!(user_id = %user.id, "Password changed");

        Ok(Envelope::success("Password changed successfully", 201)
            .with_data(serde_json::Value::String(user.display_name()))
            .with_meta(Meta::total(1)))
    }

    /// Resets a password to a generated temporary secret and mails it.
    ///
    /// An unknown email yields a success-shaped 404 envelope with no store
    /// mutation and no mail. The temporary secret is never echoed to the
    /// caller.
    pub async fn recovery_password(&self, email: &str) -> AppResult<Envelope> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(Envelope::declined("User not found", 404));
        };

        let temporary = self.generator.generate();
        let hash = self.hasher.hash_password(&temporary)?;

        // Force a change on next use.
        self.users.update_password(user.id, &hash, true).await?;

        mail::mailer::dispatch(
            Arc::clone(&self.mailer),
            template::recovery(&user.email, &user.name, &temporary, &self.login_url),
        );

        info!(user_id = %user.id, "Temporary password issued");

        Ok(Envelope::success("Temporary password sent by email", 200).with_meta(Meta::total(1)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use authhub_core::error::ErrorKind;
    use authhub_core::types::response::Status;
    use authhub_entity::session::Session;
    use authhub_entity::user::{PermissionSnapshot, RoleSnapshot, User};

    use crate::mail::OutboundEmail;

    use super::*;

    /// In-memory user store capturing every write.
    #[derive(Default)]
    struct FakeUserStore {
        users: Mutex<Vec<User>>,
        password_writes: Mutex<Vec<(Uuid, String, bool)>>,
    }

    #[async_trait]
    impl UserStore for FakeUserStore {
        async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }

        async fn update_password(
            &self,
            user_id: Uuid,
            password_hash: &str,
            is_new_user: bool,
        ) -> AppResult<()> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| AppError::not_found("User not found"))?;
            user.password_hash = password_hash.to_string();
            user.is_new_user = is_new_user;
            self.password_writes
                .lock()
                .unwrap()
                .push((user_id, password_hash.to_string(), is_new_user));
            Ok(())
        }
    }

    /// In-memory session store capturing recorded logins.
    #[derive(Default)]
    struct FakeSessionStore {
        recorded: Mutex<Vec<CreateSession>>,
    }

    #[async_trait]
    impl SessionStore for FakeSessionStore {
        async fn record(&self, data: &CreateSession) -> AppResult<Session> {
            self.recorded.lock().unwrap().push(data.clone());
            Ok(Session {
                id: Uuid::new_v4(),
                user_id: data.user_id,
                user_name: data.user_name.clone(),
                email: data.email.clone(),
                company: data.company.clone(),
                expires_at: data.expires_at,
                ip: data.client.ip.clone(),
                os: data.client.os.clone(),
                os_version: data.client.os_version.clone(),
                browser: data.client.browser.clone(),
                browser_version: data.client.browser_version.clone(),
                user_agent: data.client.user_agent.clone(),
                is_mobile: data.client.is_mobile,
                is_tablet: data.client.is_tablet,
                is_browser: data.client.is_browser,
                is_active: true,
                created_at: Utc::now(),
            })
        }
    }

    /// Mailer double capturing dispatched emails.
    #[derive(Default)]
    struct FakeMailer {
        sent: Mutex<Vec<OutboundEmail>>,
    }

    #[async_trait]
    impl Mailer for FakeMailer {
        async fn send(&self, email: OutboundEmail) -> AppResult<()> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    struct Harness {
        service: AuthService,
        users: Arc<FakeUserStore>,
        sessions: Arc<FakeSessionStore>,
        mailer: Arc<FakeMailer>,
    }

    fn harness() -> Harness {
        let users = Arc::new(FakeUserStore::default());
        let sessions = Arc::new(FakeSessionStore::default());
        let mailer = Arc::new(FakeMailer::default());
        let auth_config = AuthConfig {
            jwt_secret: "auth-service-test-secret".into(),
            token_ttl_hours: 1,
            ..AuthConfig::default()
        };
        let service = AuthService::new(
            Arc::clone(&users) as Arc<dyn UserStore>,
            Arc::clone(&sessions) as Arc<dyn SessionStore>,
            Arc::clone(&mailer) as Arc<dyn Mailer>,
            &auth_config,
            &MailConfig::default(),
        );
        Harness {
            service,
            users,
            sessions,
            mailer,
        }
    }

    fn seeded_user(harness: &Harness, email: &str, password: &str, is_active: bool) -> User {
        let hash = harness.service.hasher.hash_password(password).unwrap();
        let user = User {
            id: Uuid::new_v4(),
            name: "Test".into(),
            last_name: "User".into(),
            email: email.into(),
            phone: None,
            company: "Acme".into(),
            password_hash: hash,
            is_active,
            is_admin: false,
            is_super_admin: false,
            is_new_user: false,
            roles: vec![RoleSnapshot {
                id: Uuid::new_v4(),
                name: "Administrator".into(),
                code: "ADM".into(),
                description: String::new(),
                is_active: true,
                is_inherit_permissions: false,
                permissions: vec![PermissionSnapshot {
                    id: Uuid::new_v4(),
                    name: "Create".into(),
                    description: String::new(),
                    action: "create".into(),
                    is_active: true,
                }],
            }],
            permissions: vec![],
            modules: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        harness.users.users.lock().unwrap().push(user.clone());
        user
    }

    #[tokio::test]
    async fn login_succeeds_and_records_a_session() {
        let h = harness();
        seeded_user(&h, "ok@example.com", "password123", true);

        let result = h
            .service
            .login("ok@example.com", "password123", ClientMeta::default())
            .await
            .unwrap();

        assert!(!result.token.is_empty());
        assert_eq!(result.profile.email, "ok@example.com");
        assert_eq!(h.sessions.recorded.lock().unwrap().len(), 1);

        let envelope = result.envelope().unwrap();
        assert_eq!(envelope.status_code, 200);
        assert!(envelope.meta.unwrap().token.is_some());
    }

    #[tokio::test]
    async fn wrong_password_is_declined_without_token_or_session() {
        let h = harness();
        seeded_user(&h, "c@example.com", "password123", true);

        let err = h
            .service
            .login("c@example.com", "wrong-password", ClientMeta::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid credentials");
        assert!(h.sessions.recorded.lock().unwrap().is_empty());
        assert!(h.mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn inactive_account_is_declined_distinctly_from_wrong_password() {
        let h = harness();
        seeded_user(&h, "d@example.com", "password123", false);

        let err = h
            .service
            .login("d@example.com", "password123", ClientMeta::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Forbidden);
        assert!(err.message.contains("not active"));
        assert!(h.sessions.recorded.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_email_is_declined_with_its_own_message() {
        let h = harness();

        let err = h
            .service
            .login("nobody@example.com", "whatever", ClientMeta::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "User not found");
    }

    #[tokio::test]
    async fn validate_token_reverifies_the_live_record() {
        let h = harness();
        let user = seeded_user(&h, "live@example.com", "password123", true);

        let result = h
            .service
            .login("live@example.com", "password123", ClientMeta::default())
            .await
            .unwrap();

        let profile = h.service.validate_token(&result.token).await.unwrap();
        assert_eq!(profile.id, user.id);

        // Deactivate; the same token must now be rejected.
        h.users
            .users
            .lock()
            .unwrap()
            .iter_mut()
            .for_each(|u| u.is_active = false);

        let err = h.service.validate_token(&result.token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn validate_token_accepts_bearer_prefix() {
        let h = harness();
        seeded_user(&h, "b@example.com", "password123", true);

        let result = h
            .service
            .login("b@example.com", "password123", ClientMeta::default())
            .await
            .unwrap();

        let profile = h
            .service
            .validate_token(&format!("Bearer {}", result.token))
            .await
            .unwrap();
        assert_eq!(profile.email, "b@example.com");
    }

    #[tokio::test]
    async fn change_password_with_wrong_current_leaves_the_hash_alone() {
        let h = harness();
        let user = seeded_user(&h, "e@example.com", "old-password", true);
        let stored = user.password_hash.clone();

        let envelope = h
            .service
            .change_password(user.id, "not-the-password", "new-password")
            .await
            .unwrap();

        assert_eq!(envelope.status, Status::Error);
        assert_eq!(envelope.status_code, 400);
        assert!(h.users.password_writes.lock().unwrap().is_empty());
        assert_eq!(
            h.users.users.lock().unwrap()[0].password_hash,
            stored
        );
    }

    #[tokio::test]
    async fn change_password_distinguishes_unknown_user() {
        let h = harness();

        let envelope = h
            .service
            .change_password(Uuid::new_v4(), "x", "y")
            .await
            .unwrap();

        assert_eq!(envelope.status, Status::Error);
        assert_eq!(envelope.status_code, 404);
    }

    #[tokio::test]
    async fn change_password_success_clears_the_must_change_flag() {
        let h = harness();
        let user = seeded_user(&h, "f@example.com", "old-password", true);

        let envelope = h
            .service
            .change_password(user.id, "old-password", "new-password")
            .await
            .unwrap();

        assert_eq!(envelope.status, Status::Success);
        assert_eq!(envelope.status_code, 201);

        let writes = h.users.password_writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert!(!writes[0].2, "must-change flag should be cleared");

        // Old password no longer verifies against the stored hash.
        let current = h.users.users.lock().unwrap()[0].password_hash.clone();
        assert!(!h.service.hasher.verify_password("old-password", &current).unwrap());
        assert!(h.service.hasher.verify_password("new-password", &current).unwrap());
    }

    #[tokio::test]
    async fn recovery_for_unknown_email_mutates_and_sends_nothing() {
        let h = harness();

        let envelope = h
            .service
            .recovery_password("ghost@example.com")
            .await
            .unwrap();

        assert_eq!(envelope.status, Status::Error);
        assert_eq!(envelope.status_code, 404);
        assert!(h.users.password_writes.lock().unwrap().is_empty());

        tokio::task::yield_now().await;
        assert!(h.mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn recovery_sets_a_temporary_password_and_mails_it() {
        let h = harness();
        let user = seeded_user(&h, "g@example.com", "old-password", true);

        let envelope = h.service.recovery_password("g@example.com").await.unwrap();
        assert_eq!(envelope.status, Status::Success);

        let writes = h.users.password_writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0, user.id);
        assert!(writes[0].2, "recovery must force a change on next use");
        drop(writes);

        // Let the spawned dispatch run.
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        let sent = h.mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "g@example.com");
        // The mailed secret verifies against the stored hash.
        let mailed: String = sent[0]
            .body
            .lines()
            .map(str::trim)
            .find(|line| line.len() == 12 && !line.contains(' '))
            .unwrap()
            .to_string();
        let current = h.users.users.lock().unwrap()[0].password_hash.clone();
        assert!(h.service.hasher.verify_password(&mailed, &current).unwrap());
    }
}
