//! User accounts and roles

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Roles as the collaborator numbers them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Partner,
    Reseller,
}

impl Role {
    pub fn from_id(id: i64) -> Option<Role> {
        match id {
            1 => Some(Role::Admin),
            2 => Some(Role::Partner),
            3 => Some(Role::Reseller),
            _ => None,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Role::Admin => 1,
            Role::Partner => 2,
            Role::Reseller => 3,
        }
    }

    /// Label as shown in the UI
    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Partner => "Socio",
            Role::Reseller => "Revendedor",
        }
    }
}

/// Input for registering a new user account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub role_id: i64,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Partial profile update. The collaborator uses Spanish field names on this
/// endpoint; unset fields are omitted entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombredeusuario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrasena: Option<String>,
}

/// Account profile as returned by the me endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct UserProfile {
    pub id: Option<i64>,
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub nombredeusuario: Option<String>,
    pub telefono: Option<String>,
    pub rol_id: Option<i64>,
}

/// Credentials for the login call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response; a present token is adopted into the session
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoginResponse {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids_round_trip() {
        for role in [Role::Admin, Role::Partner, Role::Reseller] {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(4), None);
    }

    #[test]
    fn test_register_request_wire_names() {
        let request = RegisterUserRequest {
            name: "Ana".to_string(),
            role_id: 2,
            email: "ana@vinos.com".to_string(),
            password: "secreto".to_string(),
            username: "ana".to_string(),
            phone: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["roleId"], 2);
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn test_register_request_validation() {
        let request = RegisterUserRequest {
            name: "Ana".to_string(),
            role_id: 2,
            email: "ana@vinos.com".to_string(),
            password: "corto".to_string(),
            username: "ana".to_string(),
            phone: None,
        };
        assert!(request.validate().is_err());

        let request = RegisterUserRequest {
            password: "secreto".to_string(),
            ..request
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_omits_unset_fields() {
        let request = UpdateUserRequest {
            telefono: Some("1155550000".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"telefono": "1155550000"})
        );
    }
}
