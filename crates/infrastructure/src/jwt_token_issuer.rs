//! HS256 bearer tokens carrying a [`UserIdentity`].

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use nestling_application::{IssuedToken, TokenIssuer};
use nestling_core::{AppError, AppResult, UserIdentity};
use serde::{Deserialize, Serialize};

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 8;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Claims {
    user_id: i64,
    email: String,
    role_id: i64,
    role_name: String,
    iat: i64,
    exp: i64,
}

/// Token issuer signing with a shared symmetric secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenIssuer {
    /// Creates an issuer with the standard eight hour lifetime.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self::with_ttl(secret, Duration::hours(TOKEN_TTL_HOURS))
    }

    /// Creates an issuer with a custom lifetime.
    #[must_use]
    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        }
    }

    fn sign(&self, identity: &UserIdentity, issued_at: DateTime<Utc>) -> AppResult<IssuedToken> {
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            user_id: identity.user_id(),
            email: identity.email().to_owned(),
            role_id: identity.role_id(),
            role_name: identity.role_name().to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| AppError::Internal(format!("failed to sign token: {error}")))?;

        Ok(IssuedToken { token, expires_at })
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, identity: &UserIdentity) -> AppResult<IssuedToken> {
        self.sign(identity, Utc::now())
    }

    fn verify(&self, token: &str) -> AppResult<UserIdentity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|error| AppError::InvalidToken(error.to_string()))?;

        let claims = data.claims;
        Ok(UserIdentity::new(
            claims.user_id,
            claims.email,
            claims.role_id,
            claims.role_name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use nestling_application::TokenIssuer;
    use nestling_core::{AppError, AppResult, UserIdentity};

    use super::JwtTokenIssuer;

    fn manager() -> UserIdentity {
        UserIdentity::new(5, "max@example.com", 2, "Manager")
    }

    #[test]
    fn verify_returns_issued_identity() -> AppResult<()> {
        let issuer = JwtTokenIssuer::new("test-secret");

        let issued = issuer.issue(&manager())?;
        let identity = issuer.verify(&issued.token)?;

        assert_eq!(identity, manager());
        assert!(issued.expires_at > Utc::now() + Duration::hours(7));
        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() -> AppResult<()> {
        let issued = JwtTokenIssuer::new("secret-a").issue(&manager())?;

        let result = JwtTokenIssuer::new("secret-b").verify(&issued.token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
        Ok(())
    }

    #[test]
    fn expired_token_is_rejected() -> AppResult<()> {
        let issuer = JwtTokenIssuer::new("test-secret");
        let issued = issuer.sign(&manager(), Utc::now() - Duration::hours(9))?;

        let result = issuer.verify(&issued.token);
        assert!(matches!(result, Err(AppError::InvalidToken(_))));
        Ok(())
    }

    #[test]
    fn tampered_payload_is_rejected() -> AppResult<()> {
        let issuer = JwtTokenIssuer::new("test-secret");
        let issued = issuer.issue(&manager())?;
        let other = issuer.issue(&UserIdentity::new(6, "dev@example.com", 3, "Developer"))?;

        // Splice the second payload under the first signature.
        let first: Vec<&str> = issued.token.split('.').collect();
        let second: Vec<&str> = other.token.split('.').collect();
        let forged = format!("{}.{}.{}", first[0], second[1], first[2]);

        assert!(matches!(
            issuer.verify(&forged),
            Err(AppError::InvalidToken(_))
        ));
        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        let issuer = JwtTokenIssuer::new("test-secret");
        assert!(matches!(
            issuer.verify("not.a.token"),
            Err(AppError::InvalidToken(_))
        ));
        assert!(matches!(issuer.verify(""), Err(AppError::InvalidToken(_))));
    }

    #[test]
    fn negative_ttl_token_is_already_expired() -> AppResult<()> {
        let issuer = JwtTokenIssuer::with_ttl("test-secret", Duration::seconds(-1));
        let issued = issuer.issue(&manager())?;

        assert!(matches!(
            issuer.verify(&issued.token),
            Err(AppError::InvalidToken(_))
        ));
        Ok(())
    }
}
