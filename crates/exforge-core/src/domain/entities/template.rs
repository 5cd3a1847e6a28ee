//! Template descriptors: where a file goes and how its content is derived.
//!
//! A descriptor pairs a relative output path with a plain function pointer
//! `fn(&ConfigurationRecord) -> FileContent`. Function pointers cannot
//! capture state, so a descriptor can only ever read the record it is
//! handed. Two files that embed the same fact therefore cannot disagree.

use std::fmt;

use serde_json::{Map, Value};

use super::{common::RelativePath, configuration::ConfigurationRecord};

/// Render function of a descriptor.
pub type RenderFn = fn(&ConfigurationRecord) -> FileContent;

/// Rendered content of one generated file.
#[derive(Debug, Clone, PartialEq)]
pub enum FileContent {
    /// Written verbatim, replacing anything at the path.
    Text(String),

    /// Top-level keys overwritten in the JSON object already at the path.
    ///
    /// A missing file is treated as `{}`. Existing key order is preserved
    /// and new keys are appended.
    JsonMerge(Map<String, Value>),
}

impl FileContent {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    pub fn is_merge(&self) -> bool {
        matches!(self, Self::JsonMerge(_))
    }

    /// Produce the bytes to write, given the current file content if any.
    pub fn materialize(&self, existing: Option<&str>) -> Result<String, serde_json::Error> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::JsonMerge(patch) => {
                let mut object = match existing {
                    Some(raw) if !raw.trim().is_empty() => {
                        serde_json::from_str::<Map<String, Value>>(raw)?
                    }
                    _ => Map::new(),
                };
                for (key, value) in patch {
                    object.insert(key.clone(), value.clone());
                }
                let mut out = serde_json::to_string_pretty(&Value::Object(object))?;
                out.push('\n');
                Ok(out)
            }
        }
    }
}

/// One file the catalog knows how to produce.
#[derive(Clone)]
pub struct TemplateDescriptor {
    path: RelativePath,
    render: RenderFn,
}

impl TemplateDescriptor {
    pub fn new(path: impl Into<RelativePath>, render: RenderFn) -> Self {
        Self {
            path: path.into(),
            render,
        }
    }

    pub fn path(&self) -> &RelativePath {
        &self.path
    }

    pub fn render(&self, config: &ConfigurationRecord) -> FileContent {
        (self.render)(config)
    }
}

impl fmt::Debug for TemplateDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateDescriptor")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// Environment variables shared between `.env` and the generated sources.
///
/// Part of the contract with the generated application: renaming a key
/// breaks every project generated before the rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvKey {
    Port,
    DbHost,
    DbPort,
    DbUser,
    DbPassword,
    DbName,
    JwtSecret,
    JwtExpiresIn,
}

impl EnvKey {
    /// All keys in `.env` order.
    pub const ALL: [EnvKey; 8] = [
        Self::Port,
        Self::DbHost,
        Self::DbPort,
        Self::DbUser,
        Self::DbPassword,
        Self::DbName,
        Self::JwtSecret,
        Self::JwtExpiresIn,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Port => "PORT",
            Self::DbHost => "DB_HOST",
            Self::DbPort => "DB_PORT",
            Self::DbUser => "DB_USER",
            Self::DbPassword => "DB_PASSWORD",
            Self::DbName => "DB_NAME",
            Self::JwtSecret => "JWT_SECRET",
            Self::JwtExpiresIn => "JWT_EXPIRES_IN",
        }
    }

    /// The record's value for this key, unencoded.
    pub fn value_in(&self, config: &ConfigurationRecord) -> String {
        match self {
            Self::Port => config.api_port().to_string(),
            Self::DbHost => config.db_host().to_owned(),
            Self::DbPort => config.db_port().to_string(),
            Self::DbUser => config.db_user().to_owned(),
            Self::DbPassword => config.db_password().to_owned(),
            Self::DbName => config.db_name().to_owned(),
            Self::JwtSecret => config.jwt_secret().to_owned(),
            Self::JwtExpiresIn => config.jwt_expires_in().to_owned(),
        }
    }

    /// `process.env.KEY` expression for generated JavaScript.
    pub fn js_ref(&self) -> String {
        format!("process.env.{}", self.as_str())
    }
}

impl fmt::Display for EnvKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
