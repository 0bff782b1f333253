// ==================== USER MANAGEMENT ====================
// CRUD state transitions over the in-memory store. Field constraints are
// enforced here before any record is touched, so a failed operation never
// leaves a partial merge behind.

use email_address::EmailAddress;

use crate::models::{CreateUserRequest, UpdateUserRequest, User};
use crate::store::UserStore;
use crate::utils::error::AppError;

pub fn list_users(store: &UserStore) -> Vec<User> {
    store.list()
}

pub fn get_user(store: &UserStore, id: u64) -> Result<User, AppError> {
    store
        .get(id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Validates the input, assigns the next id and stores the record.
/// The password is accepted and checked for length, then dropped; it is
/// never stored and never appears in a response.
pub fn create_user(store: &UserStore, request: CreateUserRequest) -> Result<User, AppError> {
    validate_name(&request.name)?;
    validate_email(&request.email)?;
    validate_role(&request.role)?;
    validate_password(&request.password)?;

    Ok(store.insert(request.name, request.email, request.role))
}

/// Merges only the fields present in the payload into an existing record.
/// Absent fields keep their previous value.
pub fn update_user(
    store: &UserStore,
    id: u64,
    request: UpdateUserRequest,
) -> Result<User, AppError> {
    if store.get(id).is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    if let Some(name) = &request.name {
        validate_name(name)?;
    }
    if let Some(email) = &request.email {
        validate_email(email)?;
    }
    if let Some(role) = &request.role {
        validate_role(role)?;
    }

    store
        .update(id, request)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub fn delete_user(store: &UserStore, id: u64) -> Result<(), AppError> {
    store
        .remove(id)
        .map(|_| ())
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let len = name.chars().count();
    if len == 0 || len > 50 {
        return Err(AppError::Validation(
            "name must be between 1 and 50 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.parse::<EmailAddress>().is_err() {
        return Err(AppError::Validation(format!(
            "'{}' is not a valid email address",
            email
        )));
    }
    Ok(())
}

fn validate_role(role: &str) -> Result<(), AppError> {
    let len = role.chars().count();
    if len == 0 || len > 20 {
        return Err(AppError::Validation(
            "role must be between 1 and 20 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if !(6..=128).contains(&len) {
        return Err(AppError::Validation(
            "password must be between 6 and 128 characters".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(name: &str, email: &str, role: &str, password: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: name.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            password: password.to_string(),
        }
    }

    fn alice() -> CreateUserRequest {
        create_request("Alice", "alice@example.com", "student", "password123")
    }

    #[test]
    fn create_returns_the_stored_record_without_password() {
        let store = UserStore::new();

        let user = create_user(&store, alice()).unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.role, "student");

        // The record type has no password field at all; double-check the
        // serialized form stays clean.
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn get_after_create_returns_an_equal_record() {
        let store = UserStore::new();
        let created = create_user(&store, alice()).unwrap();

        let fetched = get_user(&store, created.id).unwrap();

        assert_eq!(
            serde_json::to_value(&fetched).unwrap(),
            serde_json::to_value(&created).unwrap()
        );
    }

    #[test]
    fn get_missing_id_is_not_found() {
        let store = UserStore::new();
        assert!(matches!(
            get_user(&store, 42),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn create_rejects_out_of_range_fields() {
        let store = UserStore::new();

        let cases = [
            create_request("", "alice@example.com", "student", "password123"),
            create_request(&"x".repeat(51), "alice@example.com", "student", "password123"),
            create_request("Alice", "not-an-email", "student", "password123"),
            create_request("Alice", "alice@example.com", "", "password123"),
            create_request("Alice", "alice@example.com", &"r".repeat(21), "password123"),
            create_request("Alice", "alice@example.com", "student", "short"),
            create_request("Alice", "alice@example.com", "student", &"p".repeat(129)),
        ];

        for request in cases {
            assert!(matches!(
                create_user(&store, request),
                Err(AppError::Validation(_))
            ));
        }

        // Nothing was stored by the rejected creates.
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn duplicate_emails_are_permitted() {
        let store = UserStore::new();

        let first = create_user(&store, alice()).unwrap();
        let second = create_user(&store, alice()).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.email, second.email);
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let store = UserStore::new();
        let created = create_user(&store, alice()).unwrap();

        let merged = update_user(
            &store,
            created.id,
            UpdateUserRequest {
                name: Some("Caroline".to_string()),
                email: None,
                role: None,
            },
        )
        .unwrap();

        assert_eq!(merged.id, created.id);
        assert_eq!(merged.name, "Caroline");
        assert_eq!(merged.email, created.email);
        assert_eq!(merged.role, created.role);
    }

    #[test]
    fn update_missing_id_is_not_found() {
        let store = UserStore::new();

        let result = update_user(
            &store,
            7,
            UpdateUserRequest {
                name: Some("Nobody".to_string()),
                email: None,
                role: None,
            },
        );

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[test]
    fn invalid_update_merges_nothing() {
        let store = UserStore::new();
        let created = create_user(&store, alice()).unwrap();

        let result = update_user(
            &store,
            created.id,
            UpdateUserRequest {
                name: Some("Caroline".to_string()),
                email: Some("broken".to_string()),
                role: None,
            },
        );
        assert!(matches!(result, Err(AppError::Validation(_))));

        // The name change must not have been applied either.
        let unchanged = get_user(&store, created.id).unwrap();
        assert_eq!(unchanged.name, "Alice");
        assert_eq!(unchanged.email, "alice@example.com");
    }

    #[test]
    fn delete_then_get_is_not_found_and_delete_is_not_idempotent() {
        let store = UserStore::new();
        let created = create_user(&store, alice()).unwrap();

        delete_user(&store, created.id).unwrap();

        assert!(matches!(
            get_user(&store, created.id),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            delete_user(&store, created.id),
            Err(AppError::NotFound(_))
        ));
    }
}
