use std::fs;

use token_vars::{build, normalize::Strictness, BuildError, Config};

const TOKENS: &str = include_str!("../tokens/tokens.json");

fn write_config(dir: &std::path::Path, json: &str) -> Config {
    fs::write(dir.join("tokens.json"), TOKENS).unwrap();
    let path = dir.join("config.json");
    fs::write(&path, json).unwrap();
    Config::load(&path).unwrap()
}

#[test]
fn builds_css_and_scss() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{
            "source": "tokens.json",
            "platforms": {
                "css": {"dialect": "css", "build_path": "build/css", "destination": "variables.css"},
                "scss": {"dialect": "scss", "build_path": "build/scss", "destination": "variables.scss"}
            }
        }"#,
    );
    let built = build(&config).unwrap();
    assert_eq!(built.len(), 2);
    assert_eq!(built[0].platform, "css");

    let css = fs::read_to_string(dir.path().join("build/css/variables.css")).unwrap();
    assert!(css.contains(":root {\n"));
    assert!(css.contains("  --color-brand-primary-default: #3b5bdb;\n"));
    assert!(css.contains("  --color-neutral-overlay: rgba(0, 0, 0, 0.5);\n"));
    assert!(css.contains("  --spacing-md: 16px;\n"));
    assert!(css.contains("  --typography-font-size-caption: 12.5px;\n"));
    assert!(css.contains("  --typography-font-family-body: Inter, sans-serif;\n"));
    assert!(css.contains("  --radius-default: 6px;\n"));
    assert!(!css.contains("mode"));

    let scss = fs::read_to_string(dir.path().join("build/scss/variables.scss")).unwrap();
    assert!(scss.contains("$color-brand-primary-hover: #364fc7;\n"));
    assert!(scss.contains("$spacing-xs: 4px;\n"));
}

#[test]
fn writes_versioned_intermediate() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(
        dir.path(),
        r#"{"source": "tokens.json", "intermediate": "out/tokens-flat.json", "platforms": {}}"#,
    );
    build(&config).unwrap();

    let json = fs::read_to_string(dir.path().join("out/tokens-flat.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], 1);
    assert_eq!(
        value["tokens"]["spacing"]["sm"],
        serde_json::json!({"value": "8px", "type": "number"})
    );
    assert_eq!(
        value["tokens"]["color"]["brand"]["primary"]["default"]["value"],
        "#3B5BDB"
    );
}

#[test]
fn output_is_stable_across_runs() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), r#"{"source": "tokens.json"}"#);
    build(&config).unwrap();
    let first = fs::read_to_string(dir.path().join("build/css/variables.css")).unwrap();
    build(&config).unwrap();
    let second = fs::read_to_string(dir.path().join("build/css/variables.css")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn strict_build_fails_on_malformed_tokens() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("tokens.json"),
        r##"{"Color": {"Broken": {"$value": "#fff"}, "Ok": {"$type": "color", "$value": "#000"}}}"##,
    )
    .unwrap();
    let mut config = Config {
        source: dir.path().join("tokens.json"),
        platforms: Default::default(),
        ..Config::default()
    };
    assert!(build(&config).is_ok());

    config.normalize.strictness = Strictness::Strict;
    assert!(matches!(build(&config), Err(BuildError::Normalize(_))));
}

#[test]
fn missing_and_invalid_sources_are_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config {
        source: dir.path().join("missing.json"),
        ..Config::default()
    };
    assert!(matches!(build(&config), Err(BuildError::ReadSource { .. })));

    fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    config.source = dir.path().join("bad.json");
    assert!(matches!(build(&config), Err(BuildError::ParseSource { .. })));
}

#[test]
fn checked_in_config_matches_defaults() {
    let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"));
    let config = Config::load(&root.join("token-vars.json")).unwrap();
    let defaults = Config::default();
    assert_eq!(config.normalize, defaults.normalize);
    assert_eq!(config.source, root.join(&defaults.source));
    for (name, platform) in &defaults.platforms {
        let loaded = &config.platforms[name];
        assert_eq!(loaded.dialect, platform.dialect);
        assert_eq!(loaded.transforms, platform.transforms);
        assert_eq!(loaded.output_path(), root.join(platform.output_path()));
    }
}
