//! Login against the configured admin and student accounts.

use api_types::{
    auth::{LoginRequest, LoginResponse, Role},
    envelope::Envelope,
};
use axum::{Json, extract::State};
use axum_extra::extract::WithRejection;

use crate::{ApiResult, ServerError, server::ServerState};

/// One username/password pair.
#[derive(Clone, Debug)]
pub struct Account {
    pub username: String,
    pub password: String,
}

/// The two accounts allowed to log in.
#[derive(Clone, Debug)]
pub struct Credentials {
    pub admin: Account,
    pub student: Account,
}

impl Credentials {
    fn account(&self, role: Role) -> &Account {
        match role {
            Role::Admin => &self.admin,
            Role::Student => &self.student,
        }
    }

    /// Check a login attempt. Unknown roles never match.
    pub fn verify(&self, role: &str, username: &str, password: &str) -> Option<Role> {
        let role = match role {
            "admin" => Role::Admin,
            "student" => Role::Student,
            _ => return None,
        };
        let account = self.account(role);
        // Both comparisons always run.
        let user_ok = constant_time_eq(account.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_eq(account.password.as_bytes(), password.as_bytes());
        (user_ok & pass_ok).then_some(role)
    }
}

/// Byte comparison whose duration depends only on the input lengths.
fn constant_time_eq(expected: &[u8], given: &[u8]) -> bool {
    let mut diff = expected.len() ^ given.len();
    for (i, byte) in given.iter().enumerate() {
        let other = expected.get(i % expected.len().max(1)).copied().unwrap_or(0);
        diff |= usize::from(other ^ byte);
    }
    diff == 0
}

/// Handle login requests
pub async fn login(
    State(state): State<ServerState>,
    WithRejection(Json(payload), _): WithRejection<Json<LoginRequest>, ServerError>,
) -> ApiResult<LoginResponse> {
    let Some(role) = state
        .credentials
        .verify(&payload.role, &payload.username, &payload.password)
    else {
        tracing::info!(role = %payload.role, "rejected login attempt");
        return Err(ServerError::Unauthorized);
    };

    Ok(Json(Envelope::with_message(
        LoginResponse {
            role,
            username: payload.username,
        },
        "Login successful",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials {
            admin: Account {
                username: "admin".to_string(),
                password: "admin123".to_string(),
            },
            student: Account {
                username: "student".to_string(),
                password: "student123".to_string(),
            },
        }
    }

    #[test]
    fn matching_pair_yields_role() {
        let creds = credentials();
        assert_eq!(creds.verify("admin", "admin", "admin123"), Some(Role::Admin));
        assert_eq!(
            creds.verify("student", "student", "student123"),
            Some(Role::Student)
        );
    }

    #[test]
    fn wrong_password_role_or_account_is_rejected() {
        let creds = credentials();
        assert_eq!(creds.verify("admin", "admin", "admin12"), None);
        assert_eq!(creds.verify("admin", "student", "student123"), None);
        assert_eq!(creds.verify("cook", "admin", "admin123"), None);
        assert_eq!(creds.verify("admin", "", ""), None);
    }

    #[test]
    fn constant_time_eq_compares_content_and_length() {
        assert!(constant_time_eq(b"secret", b"secret"));
        assert!(!constant_time_eq(b"secret", b"secreT"));
        assert!(!constant_time_eq(b"secret", b"secretsecret"));
        assert!(!constant_time_eq(b"", b"x"));
        assert!(constant_time_eq(b"", b""));
    }
}
