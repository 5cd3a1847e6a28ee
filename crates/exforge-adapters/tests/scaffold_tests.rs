//! End-to-end scaffolding through the real catalog and adapters.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use exforge_adapters::{
    ExpressTypeormCatalog, FixedSecretSource, LocalFilesystem, MemoryFilesystem, RecordingRunner,
    SeededSecretSource,
};
use exforge_core::{
    application::{ScaffoldService, ports::Filesystem},
    domain::{ConfigResolver, ConfigurationRecord, PackageManager, RawAnswers, Step},
};

fn record(name: &str) -> ConfigurationRecord {
    let answers = RawAnswers {
        db_password: "secret".into(),
        ..Default::default()
    };
    ConfigResolver::new(Box::new(SeededSecretSource::new(7)))
        .resolve(&answers, name)
        .unwrap()
}

fn service(fs: &MemoryFilesystem, runner: &RecordingRunner) -> ScaffoldService {
    ScaffoldService::new(
        Box::new(ExpressTypeormCatalog),
        Box::new(fs.clone()),
        Box::new(runner.clone()),
    )
}

#[test]
fn demo_api_scaffolds_the_full_layout() {
    let fs = MemoryFilesystem::new();
    let runner = RecordingRunner::new();
    let root = Path::new("demo-api");

    let report = service(&fs, &runner).scaffold(&record("demo-api"), root).unwrap();

    assert_eq!(report.commands_run, 3);
    assert_eq!(report.files_written, 11);

    let files: HashSet<PathBuf> = fs.list_files().into_iter().collect();
    for expected in [
        ".env",
        ".gitignore",
        "nodemon.json",
        "package.json",
        "src/index.js",
        "src/data-source.js",
        "src/seed.js",
        "src/entities/User.js",
        "src/routes/auth.js",
        "src/routes/users.js",
        "src/middlewares/auth.js",
    ] {
        assert!(files.contains(&root.join(expected)), "missing {expected}");
    }
    assert!(fs.list_directories().contains(&root.join("src/migrations")));

    let env = fs.content(root.join(".env")).unwrap();
    assert!(env.contains("DB_NAME=demo_api\n"));
    assert!(env.contains("PORT=3000\n"));
    assert!(env.contains("DB_HOST=localhost\n"));
    assert!(env.contains("DB_PASSWORD=secret\n"));
    let secret = env
        .lines()
        .find_map(|l| l.strip_prefix("JWT_SECRET="))
        .unwrap();
    assert!(!secret.is_empty());

    let commands: Vec<String> = runner.commands().iter().map(ToString::to_string).collect();
    assert_eq!(
        commands,
        [
            "npm init -y",
            "npm i express dotenv cors helmet morgan typeorm pg bcryptjs jsonwebtoken",
            "npm i -D nodemon",
        ]
    );
    assert!(runner.commands().iter().all(|c| c.cwd == root));
}

#[test]
fn manifest_is_merged_over_the_bootstrapped_one() {
    let fs = MemoryFilesystem::new();
    let runner = RecordingRunner::new();
    service(&fs, &runner)
        .scaffold(&record("demo-api"), Path::new("demo-api"))
        .unwrap();

    // The recording runner never creates a manifest, so the merge starts from `{}`.
    let manifest: serde_json::Value =
        serde_json::from_str(&fs.content("demo-api/package.json").unwrap()).unwrap();
    assert_eq!(manifest["name"], "demo-api");
    assert_eq!(manifest["type"], "commonjs");
    assert_eq!(manifest["scripts"]["seed"], "node src/seed.js");
}

#[test]
fn existing_root_is_left_untouched() {
    let fs = MemoryFilesystem::new();
    fs.seed_file("demo-api/notes.txt", "keep me");
    let runner = RecordingRunner::new();

    let err = service(&fs, &runner)
        .scaffold(&record("demo-api"), Path::new("demo-api"))
        .unwrap_err();

    assert!(err.is_collision());
    assert_eq!(fs.list_files(), [PathBuf::from("demo-api/notes.txt")]);
    assert_eq!(fs.content("demo-api/notes.txt").as_deref(), Some("keep me"));
    assert!(runner.commands().is_empty());
}

#[test]
fn failed_install_keeps_partial_output() {
    let fs = MemoryFilesystem::new();
    let runner = RecordingRunner::new().failing_at(1, 1);
    let root = Path::new("demo-api");

    let plan = service(&fs, &RecordingRunner::new())
        .preview(&record("demo-api"), root)
        .unwrap();
    // Second command in the plan is the runtime install
    let install_index = plan
        .steps()
        .iter()
        .enumerate()
        .filter(|(_, s)| matches!(s, Step::RunCommand(_)))
        .nth(1)
        .map(|(i, _)| i)
        .unwrap();

    let err = service(&fs, &runner)
        .scaffold(&record("demo-api"), root)
        .unwrap_err();

    assert_eq!(err.failed_step(), Some(install_index));
    assert!(err.to_string().contains("npm i express"));
    assert!(fs.exists(root));
    assert!(fs.content(root.join("package.json")).is_some());
    assert!(fs.content(root.join(".env")).is_none());
    assert_eq!(runner.commands().len(), 2);
}

#[test]
fn every_write_follows_its_parent_directory() {
    let fs = MemoryFilesystem::new();
    let plan = service(&fs, &RecordingRunner::new())
        .with_package_manager(PackageManager::new("pnpm"))
        .preview(&record("shop"), Path::new("work/shop"))
        .unwrap();

    let mut created: HashSet<&Path> = HashSet::new();
    for step in plan.steps() {
        match step {
            Step::CreateDirectory(dir) => {
                created.insert(dir);
            }
            Step::WriteFile { path, .. } => {
                assert!(created.contains(path.parent().unwrap()), "{}", path.display());
            }
            Step::RunCommand(cmd) => assert_eq!(cmd.program, "pnpm"),
        }
    }
    assert!(fs.list_files().is_empty());
}

#[test]
fn local_filesystem_scaffold_writes_real_files() {
    let tmp = tempfile::TempDir::new().unwrap();
    let root = tmp.path().join("demo-api");
    let runner = RecordingRunner::new();
    let config = ConfigResolver::new(Box::new(FixedSecretSource("fixed".into())))
        .resolve(&RawAnswers::default(), "demo-api")
        .unwrap();

    ScaffoldService::new(
        Box::new(ExpressTypeormCatalog),
        Box::new(LocalFilesystem::new()),
        Box::new(runner.clone()),
    )
    .scaffold(&config, &root)
    .unwrap();

    let env = std::fs::read_to_string(root.join(".env")).unwrap();
    assert!(env.contains("JWT_SECRET=fixed\n"));
    assert!(root.join("src/migrations").is_dir());
    assert!(root.join("src/routes/users.js").is_file());
    assert_eq!(runner.commands()[0].cwd, root);
}
