use rusqlite::{ErrorCode, OptionalExtension, params};
use tracing::{info, warn};

use prakriti_core::models::user::{Role, User};

use crate::db::{DEFAULT_ADMIN_DISPLAY_NAME, Database, now_text, parse_timestamp};
use crate::error::StorageError;
use crate::password::{hash_password, needs_rehash, verify_password};

/// What `reset_password` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordReset {
    Updated,
    CreatedAdmin,
}

struct UserRow {
    id: i64,
    username: String,
    display_name: Option<String>,
    password_hash: Option<String>,
    role: Option<String>,
    created_at: Option<String>,
}

impl UserRow {
    fn into_user(self) -> Result<User, StorageError> {
        Ok(User {
            id: self.id,
            display_name: self.display_name.unwrap_or_else(|| self.username.clone()),
            username: self.username,
            password_hash: self.password_hash.unwrap_or_default(),
            role: self.role.as_deref().unwrap_or("clinician").parse::<Role>()?,
            created_at: parse_timestamp(self.created_at.as_deref().unwrap_or_default())?,
        })
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

impl Database {
    fn find_user(&self, username: &str) -> Result<Option<User>, StorageError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, username, display_name, password_hash, role, created_at
                 FROM users WHERE username = ?1",
                params![username],
                |row| {
                    Ok(UserRow {
                        id: row.get(0)?,
                        username: row.get(1)?,
                        display_name: row.get(2)?,
                        password_hash: row.get(3)?,
                        role: row.get(4)?,
                        created_at: row.get(5)?,
                    })
                },
            )
            .optional()?;
        row.map(UserRow::into_user).transpose()
    }

    pub fn get_user(&self, username: &str) -> Result<User, StorageError> {
        self.find_user(username)?
            .ok_or_else(|| StorageError::not_found("user", username))
    }

    /// Verify credentials. `Ok(None)` for an unknown user or a wrong
    /// password. Legacy hashes are upgraded on a successful login.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>, StorageError> {
        let Some(user) = self.find_user(username.trim())? else {
            warn!(username, "Login for unknown user");
            return Ok(None);
        };
        if !verify_password(password, &user.password_hash) {
            warn!(username, "Login rejected");
            return Ok(None);
        }
        if needs_rehash(&user.password_hash) {
            self.set_password_hash(user.id, &hash_password(password))?;
            info!(username, "Upgraded legacy password hash");
        }
        Ok(Some(user))
    }

    pub fn create_user(
        &self,
        username: &str,
        display_name: &str,
        password: &str,
        role: Role,
    ) -> Result<User, StorageError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StorageError::EmptyField("username"));
        }
        if password.is_empty() {
            return Err(StorageError::EmptyField("password"));
        }
        let display_name = match display_name.trim() {
            "" => username,
            name => name,
        };
        let result = self.conn.execute(
            "INSERT INTO users (username, display_name, password_hash, role, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![username, display_name, hash_password(password), role.as_str(), now_text()],
        );
        match result {
            Ok(_) => {}
            Err(e) if is_unique_violation(&e) => {
                return Err(StorageError::DuplicateUsername(username.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        info!(username, role = %role, "Created user");
        self.get_user(username)
    }

    fn set_password_hash(&self, user_id: i64, hash: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "UPDATE users SET password_hash = ?1 WHERE id = ?2",
            params![hash, user_id],
        )?;
        Ok(())
    }

    /// Set a new password for `username`, creating it as an admin account
    /// when it does not exist.
    pub fn reset_password(&self, username: &str, new_password: &str) -> Result<PasswordReset, StorageError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(StorageError::EmptyField("username"));
        }
        if new_password.is_empty() {
            return Err(StorageError::EmptyField("password"));
        }
        match self.find_user(username)? {
            Some(user) => {
                self.set_password_hash(user.id, &hash_password(new_password))?;
                info!(username, "Password reset");
                Ok(PasswordReset::Updated)
            }
            None => {
                let display_name = if username == crate::db::DEFAULT_ADMIN_USERNAME {
                    DEFAULT_ADMIN_DISPLAY_NAME
                } else {
                    username
                };
                self.create_user(username, display_name, new_password, Role::Admin)?;
                Ok(PasswordReset::CreatedAdmin)
            }
        }
    }

    pub fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, display_name, password_hash, role, created_at
             FROM users ORDER BY username",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                display_name: row.get(2)?,
                password_hash: row.get(3)?,
                role: row.get(4)?,
                created_at: row.get(5)?,
            })
        })?;
        rows.map(|r| r.map_err(StorageError::from).and_then(UserRow::into_user))
            .collect()
    }
}
