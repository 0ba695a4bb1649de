//! Integration tests for the maintenance CLI
//!
//! Drives `cli::run` with parsed commands against a temporary project
//! directory: config file, template sets, and output locations.

use apiforge::cli::{run, Cli, Commands};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_template_sets(dir: &Path) {
    for (kind, skeleton, unit) in [
        ("forms", "forms_structure", "base_form"),
        ("routes", "routes_structure", "base_route"),
    ] {
        let base = dir.join(kind);
        fs::create_dir_all(&base).unwrap();
        let body_key = kind;
        fs::write(
            base.join(skeleton),
            format!("{{{{ library_imports }}}}\n{{{{ project_imports }}}}\n{{{{ {body_key} }}}}"),
        )
        .unwrap();
        fs::write(base.join("library_imports"), "// lib").unwrap();
        fs::write(base.join("base_imports"), "// uses {{ models_name }}").unwrap();
        fs::write(base.join(unit), format!("// {kind} unit for {{{{ model_name }}}}")).unwrap();
    }
}

fn write_config(dir: &Path, endpoints: &str) -> std::path::PathBuf {
    let templates = dir.join("templates");
    write_template_sets(&templates);
    let config = format!(
        r#"
templates_dir = "{templates}"

[output]
forms = "{forms}"
routes = "{routes}"

[security]
secret = "s3cret"

{endpoints}
"#,
        templates = templates.display(),
        forms = dir.join("generated").join("forms.rs").display(),
        routes = dir.join("generated").join("routes.rs").display(),
    );
    let path = dir.join("apiforge.toml");
    fs::write(&path, config).unwrap();
    path
}

#[test]
fn test_generate_command_writes_both_artifacts() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        r#"
[[endpoint]]
name = "books"
model = "Book"

[[model]]
name = "Book"
"#,
    );

    run(Cli {
        command: Commands::Generate { config },
    })
    .unwrap();

    let forms = fs::read_to_string(tmp.path().join("generated").join("forms.rs")).unwrap();
    assert!(forms.contains("// forms unit for Book"));
    assert!(forms.contains("// uses Book"));
    let routes = fs::read_to_string(tmp.path().join("generated").join("routes.rs")).unwrap();
    assert!(routes.contains("// routes unit for Book"));
}

#[test]
fn test_check_command_validates_without_writing() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        r#"
[[endpoint]]
name = "books"
model = "Book"

[[model]]
name = "Book"
"#,
    );

    run(Cli {
        command: Commands::Check { config },
    })
    .unwrap();
    assert!(!tmp.path().join("generated").exists());
}

#[test]
fn test_generate_fails_on_unknown_model() {
    let tmp = TempDir::new().unwrap();
    let config = write_config(
        tmp.path(),
        r#"
[[endpoint]]
name = "books"
model = "Book"
"#,
    );

    let err = run(Cli {
        command: Commands::Generate { config },
    })
    .unwrap_err();
    assert!(err.to_string().contains("undeclared model"));
    assert!(!tmp.path().join("generated").exists());
}

#[test]
fn test_generate_fails_on_missing_config() {
    let tmp = TempDir::new().unwrap();
    let err = run(Cli {
        command: Commands::Generate {
            config: tmp.path().join("nope.toml"),
        },
    })
    .unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}
