//! Configuration resolution: raw prompt answers in, immutable record out.
//!
//! ```text
//! RawAnswers ──► ConfigResolver ──► ConfigurationRecord
//!                     ▲
//!                SecretSource (injected)
//! ```
//!
//! The record is the single source every template renders from. Shared facts
//! (database name, ports, secret, expiry) live here exactly once.

use std::fmt;

use crate::domain::{encoding, error::DomainError};

/// Project name used when none is given on the command line.
pub const DEFAULT_PROJECT_NAME: &str = "express-js-typeorm-app";

pub const DEFAULT_DB_HOST: &str = "localhost";
pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_DB_USER: &str = "postgres";
pub const DEFAULT_API_PORT: u16 = 3000;
pub const DEFAULT_JWT_EXPIRES_IN: &str = "7d";

/// npm refuses package names longer than this.
const MAX_PROJECT_NAME_LEN: usize = 214;

// ── ProjectName ──────────────────────────────────────────────────────────────

/// A validated, filesystem-safe project name.
///
/// Doubles as the root directory name and the `name` of the generated
/// package manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(DomainError::EmptyProjectName);
        }

        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        };

        if name.len() > MAX_PROJECT_NAME_LEN {
            return Err(invalid("name is longer than 214 characters"));
        }
        if name.starts_with('.') || name.starts_with('-') {
            return Err(invalid("name cannot start with '.' or '-'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        {
            return Err(invalid(&format!("character {c:?} is not allowed")));
        }

        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Database name offered when the user leaves the answer blank.
    pub fn default_database_name(&self) -> String {
        self.0.replace('-', "_")
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── RawAnswers ───────────────────────────────────────────────────────────────

/// Free-text answers in prompt order. A blank answer selects the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnswers {
    pub db_host: String,
    pub db_port: String,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub api_port: String,
    pub synchronize: String,
    pub jwt_secret: String,
    pub jwt_expires_in: String,
}

// ── SecretSource ─────────────────────────────────────────────────────────────

/// Source of freshly generated signing secrets.
///
/// Implemented by:
/// - `exforge_adapters::secrets::RandomSecretSource` (production)
/// - `exforge_adapters::secrets::SeededSecretSource` (deterministic tests)
/// - any `Fn() -> String` closure
pub trait SecretSource: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> SecretSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

// ── ConfigurationRecord ──────────────────────────────────────────────────────

/// Fully resolved configuration. Immutable: fields are only readable.
#[derive(Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    project_name: ProjectName,
    db_host: String,
    db_port: u16,
    db_user: String,
    db_password: String,
    db_name: String,
    api_port: u16,
    synchronize: bool,
    jwt_secret: String,
    jwt_expires_in: String,
}

impl ConfigurationRecord {
    pub fn project_name(&self) -> &ProjectName {
        &self.project_name
    }
    pub fn db_host(&self) -> &str {
        &self.db_host
    }
    pub fn db_port(&self) -> u16 {
        self.db_port
    }
    pub fn db_user(&self) -> &str {
        &self.db_user
    }
    pub fn db_password(&self) -> &str {
        &self.db_password
    }
    pub fn db_name(&self) -> &str {
        &self.db_name
    }
    pub fn api_port(&self) -> u16 {
        self.api_port
    }
    pub fn synchronize(&self) -> bool {
        self.synchronize
    }
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }
    pub fn jwt_expires_in(&self) -> &str {
        &self.jwt_expires_in
    }
}

// Secrets stay out of logs.
impl fmt::Debug for ConfigurationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigurationRecord")
            .field("project_name", &self.project_name.as_str())
            .field("db_host", &self.db_host)
            .field("db_port", &self.db_port)
            .field("db_user", &self.db_user)
            .field("db_password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("api_port", &self.api_port)
            .field("synchronize", &self.synchronize)
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expires_in", &self.jwt_expires_in)
            .finish()
    }
}

// ── ConfigResolver ───────────────────────────────────────────────────────────

/// Turns raw answers into a [`ConfigurationRecord`].
pub struct ConfigResolver {
    secrets: Box<dyn SecretSource>,
}

impl ConfigResolver {
    pub fn new(secrets: Box<dyn SecretSource>) -> Self {
        Self { secrets }
    }

    /// Resolve answers for `project_name`.
    ///
    /// # Errors
    /// `DomainError` when the project name is empty or malformed, a port is
    /// not a number in `1..=65535`, or a value cannot be written to `.env`.
    pub fn resolve(
        &self,
        raw: &RawAnswers,
        project_name: &str,
    ) -> Result<ConfigurationRecord, DomainError> {
        let project_name = ProjectName::parse(project_name)?;
        let default_db_name = project_name.default_database_name();

        let jwt_secret = if raw.jwt_secret.trim().is_empty() {
            self.secrets.generate()
        } else {
            raw.jwt_secret.clone()
        };

        let record = ConfigurationRecord {
            db_host: text_or(&raw.db_host, DEFAULT_DB_HOST),
            db_port: port_or("database port", &raw.db_port, DEFAULT_DB_PORT)?,
            db_user: text_or(&raw.db_user, DEFAULT_DB_USER),
            db_password: raw.db_password.clone(),
            db_name: text_or(&raw.db_name, &default_db_name),
            api_port: port_or("API port", &raw.api_port, DEFAULT_API_PORT)?,
            synchronize: parse_synchronize(&raw.synchronize),
            jwt_secret,
            jwt_expires_in: text_or(&raw.jwt_expires_in, DEFAULT_JWT_EXPIRES_IN),
            project_name,
        };

        for (field, value) in [
            ("database host", record.db_host.as_str()),
            ("database user", record.db_user.as_str()),
            ("database password", record.db_password.as_str()),
            ("database name", record.db_name.as_str()),
            ("JWT secret", record.jwt_secret.as_str()),
            ("JWT expiry", record.jwt_expires_in.as_str()),
        ] {
            encoding::check_env_encodable(value)
                .map_err(|reason| DomainError::UnencodableValue { field, reason })?;
        }

        Ok(record)
    }
}

fn text_or(answer: &str, default: &str) -> String {
    match answer.trim() {
        "" => default.to_owned(),
        value => value.to_owned(),
    }
}

fn port_or(field: &'static str, answer: &str, default: u16) -> Result<u16, DomainError> {
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    match answer.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DomainError::InvalidPort {
            field,
            value: answer.to_owned(),
        }),
    }
}

/// Schema auto-sync stays on unless the answer starts with a negative.
fn parse_synchronize(answer: &str) -> bool {
    !answer.trim().to_ascii_lowercase().starts_with('n')
}
