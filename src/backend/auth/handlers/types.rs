/**
 * Auth Request/Response Types
 *
 * Data transfer objects for the authentication and registration
 * endpoints.
 */
use serde::{Deserialize, Serialize};

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration body for /api/auth/register
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Registration body for /api/registration/register
///
/// The registration-form variant also carries the confirmation field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFormRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Refresh token request parameter
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshParams {
    pub refresh_token: String,
}

/// Response for successful login and refresh
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub refresh_token: String,
    pub id: i64,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

/// Profile response for GET /api/profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
    pub notes_count: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_response_serializes_camel_case() {
        let response = AuthResponse {
            token: "t".to_string(),
            refresh_token: "r".to_string(),
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            roles: vec!["USER".to_string()],
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["refreshToken"], "r");
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_registration_form_parses_confirm_password() {
        let request: RegistrationFormRequest = serde_json::from_value(serde_json::json!({
            "username": "alice",
            "email": "alice@example.com",
            "password": "pw",
            "confirmPassword": "pw"
        }))
        .unwrap();
        assert_eq!(request.confirm_password, "pw");
    }
}
