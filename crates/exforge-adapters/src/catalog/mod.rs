//! Built-in template catalog: an Express + TypeORM (PostgreSQL) API with
//! JWT authentication and a `users` resource.
//!
//! Every descriptor renders from the single [`ConfigurationRecord`] it is
//! handed. Values shared between files (database name, JWT expiry, ports,
//! the synchronize flag) are read from the record at render time, and
//! environment variable names come from [`EnvKey`].

mod placeholders;
mod sources;

use serde_json::{Map, Value, json};
use tracing::debug;

use exforge_core::{
    application::ports::{DependencySet, TemplateCatalog},
    domain::{
        ConfigurationRecord, EnvKey, FileContent, RelativePath, TemplateDescriptor,
        encoding::env_value,
    },
};

use placeholders::Placeholders;

/// Runtime packages the generated code requires.
pub const RUNTIME_DEPENDENCIES: [&str; 9] = [
    "express",
    "dotenv",
    "cors",
    "helmet",
    "morgan",
    "typeorm",
    "pg",
    "bcryptjs",
    "jsonwebtoken",
];

/// Development-only packages.
pub const DEV_DEPENDENCIES: [&str; 1] = ["nodemon"];

/// Directories created even when no file lands in them.
const LAYOUT: [&str; 5] = [
    "src",
    "src/entities",
    "src/routes",
    "src/middlewares",
    "src/migrations",
];

/// The Express + TypeORM project catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressTypeormCatalog;

impl ExpressTypeormCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateCatalog for ExpressTypeormCatalog {
    fn templates_for(&self, config: &ConfigurationRecord) -> Vec<TemplateDescriptor> {
        debug!(project = %config.project_name(), "Building descriptors");
        vec![
            TemplateDescriptor::new(".env", render_env),
            TemplateDescriptor::new("nodemon.json", render_nodemon),
            TemplateDescriptor::new("package.json", render_manifest),
            TemplateDescriptor::new("src/data-source.js", render_data_source),
            TemplateDescriptor::new("src/entities/User.js", render_user_entity),
            TemplateDescriptor::new("src/middlewares/auth.js", render_auth_middleware),
            TemplateDescriptor::new("src/routes/auth.js", render_auth_routes),
            TemplateDescriptor::new("src/routes/users.js", render_user_routes),
            TemplateDescriptor::new("src/seed.js", render_seed),
            TemplateDescriptor::new("src/index.js", render_index),
        ]
    }

    fn supporting_files(&self) -> Vec<(RelativePath, FileContent)> {
        vec![(".gitignore".into(), FileContent::text(sources::GITIGNORE))]
    }

    fn layout_directories(&self) -> Vec<RelativePath> {
        LAYOUT.iter().map(|dir| RelativePath::from(*dir)).collect()
    }

    fn dependencies(&self) -> DependencySet {
        DependencySet {
            runtime: RUNTIME_DEPENDENCIES.map(String::from).to_vec(),
            development: DEV_DEPENDENCIES.map(String::from).to_vec(),
        }
    }
}

fn render_env(config: &ConfigurationRecord) -> FileContent {
    let text: String = EnvKey::ALL
        .iter()
        .map(|key| format!("{}={}\n", key, env_value(&key.value_in(config))))
        .collect();
    FileContent::Text(text)
}

fn render_nodemon(_: &ConfigurationRecord) -> FileContent {
    let nodemon = json!({
        "watch": ["src"],
        "ext": "js,json",
        "exec": "node src/index.js",
    });
    FileContent::Text(format!("{nodemon:#}\n"))
}

fn render_manifest(config: &ConfigurationRecord) -> FileContent {
    const TYPEORM_CLI: &str = "node ./node_modules/typeorm/cli.js";

    let mut patch = Map::new();
    patch.insert("name".into(), Value::from(config.project_name().as_str()));
    patch.insert("type".into(), Value::from("commonjs"));
    patch.insert(
        "scripts".into(),
        json!({
            "start": "node src/index.js",
            "dev": "nodemon src/index.js",
            "seed": "node src/seed.js",
            "migration:generate": format!(
                "{TYPEORM_CLI} migration:generate -d src/data-source.js src/migrations/auto"
            ),
            "migration:run": format!("{TYPEORM_CLI} migration:run -d src/data-source.js"),
            "migration:revert": format!("{TYPEORM_CLI} migration:revert -d src/data-source.js"),
        }),
    );
    FileContent::JsonMerge(patch)
}

fn fill(source: &str, config: &ConfigurationRecord) -> FileContent {
    FileContent::Text(Placeholders::for_record(config).fill(source))
}

fn render_data_source(config: &ConfigurationRecord) -> FileContent {
    fill(sources::DATA_SOURCE_JS, config)
}

fn render_user_entity(config: &ConfigurationRecord) -> FileContent {
    fill(sources::USER_ENTITY_JS, config)
}

fn render_auth_middleware(config: &ConfigurationRecord) -> FileContent {
    fill(sources::AUTH_MIDDLEWARE_JS, config)
}

fn render_auth_routes(config: &ConfigurationRecord) -> FileContent {
    fill(sources::AUTH_ROUTES_JS, config)
}

fn render_user_routes(config: &ConfigurationRecord) -> FileContent {
    fill(sources::USER_ROUTES_JS, config)
}

fn render_seed(config: &ConfigurationRecord) -> FileContent {
    fill(sources::SEED_JS, config)
}

fn render_index(config: &ConfigurationRecord) -> FileContent {
    fill(sources::INDEX_JS, config)
}
