//! Account services: registration, login, token refresh and profile lookup.
//!
//! Failures towards clients are deliberately generic: a bad password and an
//! unknown username both read "Invalid credentials", and expired or malformed
//! tokens share one message per endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    AccountService, PasswordHashError, PasswordHasher, TokenError, TokenService, UserRepository,
    UserRepositoryError,
};
use crate::domain::{
    AuthenticatedUser, Error, LoginCredentials, NewUser, Registration, TokenKind, TokenPair, User,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
const INVALID_TOKEN: &str = "Invalid token";

/// Account service implementing [`AccountService`].
#[derive(Clone)]
pub struct AccountManager<R, T, H> {
    users: Arc<R>,
    tokens: Arc<T>,
    hasher: Arc<H>,
}

impl<R, T, H> AccountManager<R, T, H> {
    /// Create a new service from its collaborators.
    pub fn new(users: Arc<R>, tokens: Arc<T>, hasher: Arc<H>) -> Self {
        Self {
            users,
            tokens,
            hasher,
        }
    }
}

fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::Duplicate { field } if field == "email" => {
            Error::conflict("Email already exists")
        }
        UserRepositoryError::Duplicate { .. } => Error::conflict("Username already exists"),
    }
}

fn map_signing_error(error: TokenError) -> Error {
    Error::internal(format!("token issue failed: {error}"))
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

impl<R, T, H> AccountManager<R, T, H>
where
    R: UserRepository,
    T: TokenService,
    H: PasswordHasher,
{
    fn issue_pair(&self, username: &str) -> Result<TokenPair, Error> {
        Ok(TokenPair {
            access_token: self
                .tokens
                .issue(username, TokenKind::Access)
                .map_err(map_signing_error)?,
            refresh_token: self
                .tokens
                .issue(username, TokenKind::Refresh)
                .map_err(map_signing_error)?,
        })
    }
}

#[async_trait]
impl<R, T, H> AccountService for AccountManager<R, T, H>
where
    R: UserRepository,
    T: TokenService,
    H: PasswordHasher,
{
    async fn register(&self, registration: &Registration) -> Result<AuthenticatedUser, Error> {
        if self
            .users
            .username_exists(registration.username())
            .await
            .map_err(map_user_error)?
        {
            return Err(Error::conflict("Username already exists"));
        }
        if self
            .users
            .email_exists(registration.email())
            .await
            .map_err(map_user_error)?
        {
            return Err(Error::conflict("Email already exists"));
        }

        let password_hash = self
            .hasher
            .hash(registration.password())
            .map_err(map_hash_error)?;
        let user = self
            .users
            .insert(&NewUser {
                username: registration.username().to_owned(),
                email: registration.email().to_owned(),
                password_hash,
                first_name: registration.first_name().map(str::to_owned),
                last_name: registration.last_name().map(str::to_owned),
            })
            .await
            .map_err(map_user_error)?;
        let tokens = self.issue_pair(&user.username)?;
        debug!(user_id = user.id, "user registered");
        Ok(AuthenticatedUser { user, tokens })
    }

    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthenticatedUser, Error> {
        let Some(account) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = match self
            .hasher
            .verify(credentials.password(), &account.password_hash)
        {
            Ok(matches) => matches,
            Err(err) => {
                warn!(user_id = account.user.id, error = %err, "stored password hash unusable");
                false
            }
        };
        if !matches {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let tokens = self.issue_pair(&account.user.username)?;
        Ok(AuthenticatedUser {
            user: account.user,
            tokens,
        })
    }

    async fn refresh(&self, refresh_token: &str) -> Result<String, Error> {
        let subject = self.tokens.verify(refresh_token).map_err(|err| {
            debug!(error = %err, "refresh token rejected");
            Error::unauthorized(INVALID_REFRESH_TOKEN)
        })?;
        self.tokens
            .issue(&subject, TokenKind::Access)
            .map_err(map_signing_error)
    }

    async fn profile(&self, access_token: &str) -> Result<User, Error> {
        let subject = self.tokens.verify(access_token).map_err(|err| {
            debug!(error = %err, "access token rejected");
            Error::unauthorized(INVALID_TOKEN)
        })?;
        self.users
            .find_by_username(&subject)
            .await
            .map_err(map_user_error)?
            .map(|account| account.user)
            .ok_or_else(|| Error::not_found("User not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockTokenService, MockUserRepository};
    use crate::domain::{ErrorCode, RegistrationFields, UserAccount};
    use rstest::{fixture, rstest};

    fn ada() -> User {
        User {
            id: 1,
            username: "ada".to_owned(),
            email: "ada@example.org".to_owned(),
            first_name: Some("Ada".to_owned()),
            last_name: None,
        }
    }

    #[fixture]
    fn tokens() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .returning(|subject, kind| Ok(format!("{subject}:{kind:?}")));
        tokens
    }

    fn registration() -> Registration {
        Registration::try_new(RegistrationFields {
            username: "ada",
            email: "ada@example.org",
            password: "analytical",
            first_name: Some("Ada"),
            last_name: None,
        })
        .expect("valid registration")
    }

    fn make_service(
        users: MockUserRepository,
        tokens: MockTokenService,
        hasher: MockPasswordHasher,
    ) -> AccountManager<MockUserRepository, MockTokenService, MockPasswordHasher> {
        AccountManager::new(Arc::new(users), Arc::new(tokens), Arc::new(hasher))
    }

    #[rstest]
    #[tokio::test]
    async fn register_hashes_password_and_issues_tokens(tokens: MockTokenService) {
        let mut users = MockUserRepository::new();
        users.expect_username_exists().return_once(|_| Ok(false));
        users.expect_email_exists().return_once(|_| Ok(false));
        users
            .expect_insert()
            .withf(|user| user.password_hash == "hashed:analytical")
            .return_once(|_| Ok(ada()));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .return_once(|password| Ok(format!("hashed:{password}")));

        let service = make_service(users, tokens, hasher);
        let registered = service.register(&registration()).await.expect("registered");

        assert_eq!(registered.user, ada());
        assert_eq!(registered.tokens.access_token, "ada:Access");
        assert_eq!(registered.tokens.refresh_token, "ada:Refresh");
    }

    #[rstest]
    #[case(true, false, "Username already exists")]
    #[case(false, true, "Email already exists")]
    #[tokio::test]
    async fn register_rejects_taken_identities(
        tokens: MockTokenService,
        #[case] username_taken: bool,
        #[case] email_taken: bool,
        #[case] expected: &str,
    ) {
        let mut users = MockUserRepository::new();
        users
            .expect_username_exists()
            .return_once(move |_| Ok(username_taken));
        users
            .expect_email_exists()
            .return_once(move |_| Ok(email_taken));
        users.expect_insert().never();

        let service = make_service(users, tokens, MockPasswordHasher::new());
        let err = service.register(&registration()).await.expect_err("taken");

        assert_eq!(err.code(), ErrorCode::Conflict);
        assert_eq!(err.message(), expected);
    }

    #[rstest]
    #[case(None, false)]
    #[case(Some("wrong"), false)]
    #[tokio::test]
    async fn login_failures_share_one_message(
        tokens: MockTokenService,
        #[case] stored: Option<&'static str>,
        #[case] verifies: bool,
    ) {
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().return_once(move |_| {
            Ok(stored.map(|hash| UserAccount {
                user: ada(),
                password_hash: hash.to_owned(),
            }))
        });
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(move |_, _| Ok(verifies));

        let service = make_service(users, tokens, hasher);
        let creds = LoginCredentials::try_from_parts("ada", "guess").expect("creds");
        let err = service.login(&creds).await.expect_err("rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid credentials");
    }

    #[rstest]
    #[tokio::test]
    async fn refresh_rejects_invalid_tokens() {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .return_once(|_| Err(TokenError::invalid("expired")));

        let service = make_service(MockUserRepository::new(), tokens, MockPasswordHasher::new());
        let err = service.refresh("stale").await.expect_err("rejected");

        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Invalid refresh token");
    }

    #[rstest]
    #[tokio::test]
    async fn profile_of_deleted_account_is_not_found(mut tokens: MockTokenService) {
        tokens
            .expect_verify()
            .return_once(|_| Ok("ghost".to_owned()));
        let mut users = MockUserRepository::new();
        users.expect_find_by_username().return_once(|_| Ok(None));

        let service = make_service(users, tokens, MockPasswordHasher::new());
        let err = service.profile("token").await.expect_err("missing");

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "User not found");
    }
}
