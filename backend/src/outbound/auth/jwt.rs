//! HS256 JSON Web Token adapter for the `TokenService` port.
//!
//! Claims are `{sub, iat, exp}` in Unix seconds. Expiry is checked against the
//! injected clock with zero leeway instead of by `jsonwebtoken`, so tests can
//! move time deterministically.

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::TokenKind;
use crate::domain::ports::{TokenError, TokenService};

/// Token lifetimes and signing secret.
#[derive(Clone)]
pub struct JwtConfig {
    secret: Vec<u8>,
    access_ttl: TimeDelta,
    refresh_ttl: TimeDelta,
}

impl JwtConfig {
    /// Access tokens live for 24 hours by default.
    pub const DEFAULT_ACCESS_TTL_SECS: i64 = 86_400;
    /// Refresh tokens live for 7 days by default.
    pub const DEFAULT_REFRESH_TTL_SECS: i64 = 604_800;

    /// Configuration with default lifetimes.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            access_ttl: TimeDelta::seconds(Self::DEFAULT_ACCESS_TTL_SECS),
            refresh_ttl: TimeDelta::seconds(Self::DEFAULT_REFRESH_TTL_SECS),
        }
    }

    /// Override both lifetimes.
    #[must_use]
    pub const fn with_ttls(mut self, access_ttl: TimeDelta, refresh_ttl: TimeDelta) -> Self {
        self.access_ttl = access_ttl;
        self.refresh_ttl = refresh_ttl;
        self
    }

    const fn ttl(&self, kind: TokenKind) -> TimeDelta {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// `TokenService` backed by `jsonwebtoken`.
pub struct JwtTokenService {
    config: JwtConfig,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    /// Build the service from its configuration and a clock.
    pub fn new(config: JwtConfig, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(&config.secret),
            decoding: DecodingKey::from_secret(&config.secret),
            config,
            validation,
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &str, kind: TokenKind) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let claims = Claims {
            sub: subject.to_owned(),
            iat: now.timestamp(),
            exp: (now + self.config.ttl(kind)).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<String, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            debug!(error = %err, "token failed signature or structure checks");
            TokenError::invalid(err.to_string())
        })?;
        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::invalid("token expired"));
        }
        Ok(data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use std::sync::Mutex;

    struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        fn advance(&self, by: TimeDelta) {
            let mut now = self.0.lock().expect("clock lock");
            *now += by;
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.0.lock().expect("clock lock")
        }
    }

    #[fixture]
    fn clock() -> Arc<MutableClock> {
        let start = Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Arc::new(MutableClock(Mutex::new(start)))
    }

    fn one_hour_tokens(clock: &Arc<MutableClock>) -> JwtTokenService {
        let config = JwtConfig::new("test-secret")
            .with_ttls(TimeDelta::hours(1), TimeDelta::hours(2));
        JwtTokenService::new(config, Arc::clone(clock) as Arc<dyn Clock>)
    }

    #[rstest]
    #[case(59, true)]
    #[case(61, false)]
    fn one_hour_token_expires_on_time(
        clock: Arc<MutableClock>,
        #[case] minutes_later: i64,
        #[case] valid: bool,
    ) {
        let tokens = one_hour_tokens(&clock);
        let token = tokens.issue("ada", TokenKind::Access).expect("issued");

        clock.advance(TimeDelta::minutes(minutes_later));

        assert_eq!(tokens.verify(&token).is_ok(), valid);
    }

    #[rstest]
    fn verify_returns_subject(clock: Arc<MutableClock>) {
        let tokens = one_hour_tokens(&clock);
        let token = tokens.issue("ada", TokenKind::Refresh).expect("issued");
        assert_eq!(tokens.verify(&token).expect("valid"), "ada");
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_rejected(clock: Arc<MutableClock>) {
        let foreign = JwtTokenService::new(
            JwtConfig::new("other-secret"),
            Arc::clone(&clock) as Arc<dyn Clock>,
        );
        let token = foreign.issue("ada", TokenKind::Access).expect("issued");

        let err = one_hour_tokens(&clock).verify(&token).expect_err("bad signature");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[rstest]
    fn garbage_is_rejected(clock: Arc<MutableClock>) {
        let err = one_hour_tokens(&clock)
            .verify("not-a-token")
            .expect_err("malformed");
        assert!(matches!(err, TokenError::Invalid { .. }));
    }

    #[rstest]
    fn debug_output_hides_the_secret() {
        let rendered = format!("{:?}", JwtConfig::new("hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
