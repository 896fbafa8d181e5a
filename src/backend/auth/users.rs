/**
 * User Model and Database Operations
 *
 * This module handles user data and database operations. Roles are
 * persisted as a comma-separated column but surfaced as a set of the
 * `Role` enum at the model boundary.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::BTreeSet;

/// A role a user can hold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "USER" | "ROLE_USER" => Some(Role::User),
            "ADMIN" | "ROLE_ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Parse a comma-separated roles column into a role set
///
/// Unknown entries are dropped; an empty or unparseable column yields
/// the default USER role.
pub fn parse_roles(column: &str) -> BTreeSet<Role> {
    let roles: BTreeSet<Role> = column.split(',').filter_map(Role::from_str).collect();
    if roles.is_empty() {
        BTreeSet::from([Role::User])
    } else {
        roles
    }
}

/// Render a role set back into the comma-separated column form
pub fn roles_to_column(roles: &BTreeSet<Role>) -> String {
    roles
        .iter()
        .map(Role::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Username (unique)
    pub username: String,
    /// User email address
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Comma-separated roles column
    pub roles: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// The user's roles as an enum set
    pub fn role_set(&self) -> BTreeSet<Role> {
        parse_roles(&self.roles)
    }
}

/// Create a new user
pub async fn create_user(
    pool: &PgPool,
    username: &str,
    email: &str,
    password_hash: &str,
    roles: &BTreeSet<Role>,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password_hash, roles, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, username, email, password_hash, roles, created_at
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(password_hash)
    .bind(roles_to_column(roles))
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Get user by username
pub async fn get_user_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password_hash, roles, created_at
        FROM users
        WHERE username = $1
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Check whether a username is already taken
pub async fn exists_by_username(pool: &PgPool, username: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = $1")
        .bind(username)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

/// Check whether an email is already in use
pub async fn exists_by_email(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(email)
        .fetch_one(pool)
        .await?;

    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roles_single() {
        assert_eq!(parse_roles("USER"), BTreeSet::from([Role::User]));
    }

    #[test]
    fn test_parse_roles_comma_separated() {
        assert_eq!(
            parse_roles("USER,ADMIN"),
            BTreeSet::from([Role::User, Role::Admin])
        );
    }

    #[test]
    fn test_parse_roles_legacy_prefix() {
        assert_eq!(parse_roles("ROLE_USER"), BTreeSet::from([Role::User]));
    }

    #[test]
    fn test_parse_roles_empty_defaults_to_user() {
        assert_eq!(parse_roles(""), BTreeSet::from([Role::User]));
        assert_eq!(parse_roles("bogus"), BTreeSet::from([Role::User]));
    }

    #[test]
    fn test_roles_round_trip() {
        let roles = BTreeSet::from([Role::User, Role::Admin]);
        assert_eq!(parse_roles(&roles_to_column(&roles)), roles);
    }
}
