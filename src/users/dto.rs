use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::repo_types::User;

/// Request body for signup.
#[derive(Debug, Serialize, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub personal_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
}

/// Request body for email activation.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivationRequest {
    #[serde(default)]
    pub activation_token: String,
}

/// Request body for signin.
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response returned after signin. The bearer token travels under the wire
/// name `refresh_token`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SigninResponse {
    pub user: PublicUser,
    pub refresh_token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub personal_id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub phone_number: String,
    pub activated: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            personal_id: u.personal_id,
            name: u.name,
            email: u.email,
            address: u.address,
            phone_number: u.phone_number,
            activated: u.activated,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_user_never_carries_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            personal_id: "id1".into(),
            name: "Alice".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$secret".into(),
            address: "addr".into(),
            phone_number: "123".into(),
            activated: false,
            created_at: OffsetDateTime::UNIX_EPOCH,
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(!json.contains("argon2id"));
    }

    #[test]
    fn signup_request_tolerates_missing_fields() {
        let req: SignupRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(req.email, "a@x.com");
        assert!(req.name.is_empty());
        assert!(req.password.is_empty());
    }
}
