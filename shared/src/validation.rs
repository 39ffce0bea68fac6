//! Validation utilities for the Blend Vinos client
//!
//! Form-level checks that run before anything touches the network.

/// Normalize a free-text comment: blank or whitespace-only becomes `None`,
/// anything else is trimmed.
pub fn normalize_comment(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Validate a wine code as entered in the movement form
pub fn validate_wine_code(code: &str) -> Result<(), &'static str> {
    if code.trim().is_empty() {
        return Err("Wine code is required");
    }
    Ok(())
}

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength for new accounts
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 6 {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// Validate a username
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if username.trim().is_empty() {
        return Err("Username is required");
    }
    Ok(())
}

/// First problem with the new-user form, as the UI words it, checked in the
/// order the fields appear. `None` means the form can be submitted.
pub fn user_form_error(
    name: &str,
    email: &str,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("El nombre es requerido");
    }
    if email.trim().is_empty() {
        return Some("El email es requerido");
    }
    if username.trim().is_empty() {
        return Some("El username es requerido");
    }
    if password.is_empty() {
        return Some("La contraseña es requerida");
    }
    if password != confirm_password {
        return Some("Las contraseñas no coinciden");
    }
    if password.len() < 6 {
        return Some("La contraseña debe tener al menos 6 caracteres");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_comment_blank() {
        assert_eq!(normalize_comment(""), None);
        assert_eq!(normalize_comment("   "), None);
        assert_eq!(normalize_comment("\t\n"), None);
    }

    #[test]
    fn test_normalize_comment_trims() {
        assert_eq!(normalize_comment("  entrega lunes "), Some("entrega lunes".to_string()));
        assert_eq!(normalize_comment("ok"), Some("ok".to_string()));
    }

    #[test]
    fn test_validate_wine_code() {
        assert!(validate_wine_code("MLB-01").is_ok());
        assert!(validate_wine_code("  x ").is_ok());
        assert!(validate_wine_code("").is_err());
        assert!(validate_wine_code("   ").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@domain").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secreto").is_ok());
        assert!(validate_password("123456").is_ok());
        assert!(validate_password("corto").is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("pepe").is_ok());
        assert!(validate_username("  ").is_err());
    }

    #[test]
    fn test_user_form_checks_in_field_order() {
        assert_eq!(
            user_form_error("", "", "", "", ""),
            Some("El nombre es requerido")
        );
        assert_eq!(
            user_form_error("Ana", "", "", "", ""),
            Some("El email es requerido")
        );
        assert_eq!(
            user_form_error("Ana", "a@b.com", "", "", ""),
            Some("El username es requerido")
        );
        assert_eq!(
            user_form_error("Ana", "a@b.com", "ana", "", ""),
            Some("La contraseña es requerida")
        );
        assert_eq!(
            user_form_error("Ana", "a@b.com", "ana", "secreto", "otra"),
            Some("Las contraseñas no coinciden")
        );
        assert_eq!(
            user_form_error("Ana", "a@b.com", "ana", "corto", "corto"),
            Some("La contraseña debe tener al menos 6 caracteres")
        );
        assert_eq!(
            user_form_error("Ana", "a@b.com", "ana", "secreto", "secreto"),
            None
        );
    }
}
