//! End-to-end CLI flows against a sandboxed data dir.
//!
//! Every test pins `TYO_DATA_DIR` to a temp dir so state.db, logs and the
//! catalog never touch the real profile.

use predicates::prelude::*;
use predicates::str::contains;
use serde_json::Value;
use std::fs;

mod util;
use util::Sandbox;

fn json_stdout(output: &std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json on stdout")
}

fn visible_keys(value: &Value) -> Vec<String> {
    value["visible_keys"]
        .as_array()
        .expect("visible_keys array")
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// list
// =============================================================================

#[test]
fn list_json_shows_every_card_in_catalog_order() {
    let sandbox = Sandbox::new();
    let output = sandbox.cmd().args(["list", "--json"]).output().unwrap();
    let value = json_stdout(&output);

    assert_eq!(
        visible_keys(&value),
        ["anatomy", "biomechanics", "nutrition", "broken"]
    );
    assert_eq!(value["empty_reason"], "none");
    assert_eq!(value["presentation"]["kind"], "cards");
    assert!(value["badge"].is_null(), "no favorites means no badge");
}

#[test]
fn list_search_matches_title_and_description_case_insensitively() {
    let sandbox = Sandbox::new();

    let output = sandbox
        .cmd()
        .args(["list", "--json", "--search", "  MUSCLES "])
        .output()
        .unwrap();
    assert_eq!(visible_keys(&json_stdout(&output)), ["anatomy"]);

    let output = sandbox
        .cmd()
        .args(["list", "--json", "--search", "bio"])
        .output()
        .unwrap();
    assert_eq!(visible_keys(&json_stdout(&output)), ["biomechanics"]);
}

#[test]
fn list_search_without_match_reports_no_results() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["list", "--json", "--search", "zzz"])
        .output()
        .unwrap();
    let value = json_stdout(&output);
    assert!(visible_keys(&value).is_empty());
    assert_eq!(value["empty_reason"], "no_results");
    assert_eq!(value["presentation"]["kind"], "empty");
    assert_eq!(value["presentation"]["message"]["title"], "No results found");
}

#[test]
fn list_text_output_shows_empty_state_copy() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["list", "--favorites"])
        .assert()
        .success()
        .stdout(contains("No favorites yet"));
}

#[test]
fn list_text_output_shows_titles_and_urls() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("list")
        .assert()
        .success()
        .stdout(contains("Anatomy"))
        .stdout(contains("https://example.com/nutrition"));
}

#[test]
fn missing_catalog_degrades_to_empty_grid() {
    let sandbox = Sandbox::new();
    fs::remove_file(sandbox.catalog_path()).unwrap();
    let output = sandbox.cmd().args(["list", "--json"]).output().unwrap();
    let value = json_stdout(&output);
    assert!(visible_keys(&value).is_empty());
    assert_eq!(value["empty_reason"], "none");
}

#[test]
fn catalog_flag_overrides_data_dir_catalog() {
    let sandbox = Sandbox::new();
    let other = sandbox.path().join("other.json");
    fs::write(
        &other,
        r#"{"solo": {"title": "Solo", "url": "https://example.com/solo"}}"#,
    )
    .unwrap();

    let output = sandbox
        .cmd()
        .args(["list", "--json", "--catalog"])
        .arg(&other)
        .output()
        .unwrap();
    assert_eq!(visible_keys(&json_stdout(&output)), ["solo"]);
}

// =============================================================================
// fav
// =============================================================================

#[test]
fn fav_toggle_persists_across_invocations() {
    let sandbox = Sandbox::new();

    sandbox
        .cmd()
        .args(["fav", "toggle", "Anatomy"])
        .assert()
        .success()
        .stdout(contains("anatomy added to favorites (1 total)"));

    let output = sandbox
        .cmd()
        .args(["list", "--json", "--favorites"])
        .output()
        .unwrap();
    let value = json_stdout(&output);
    assert_eq!(visible_keys(&value), ["anatomy"]);
    assert_eq!(value["badge"], 1);

    sandbox
        .cmd()
        .args(["fav", "toggle", "anatomy"])
        .assert()
        .success()
        .stdout(contains("removed from favorites (0 total)"));

    let output = sandbox
        .cmd()
        .args(["fav", "list", "--json"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output), serde_json::json!([]));
}

#[test]
fn fav_toggle_unknown_key_fails_without_saving() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["fav", "toggle", "nope"])
        .assert()
        .code(1)
        .stderr(contains("unknown category: nope"));

    let output = sandbox
        .cmd()
        .args(["fav", "list", "--json"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output), serde_json::json!([]));
}

#[test]
fn favorites_only_with_search_reports_no_matching_favorites() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["fav", "toggle", "nutrition"])
        .assert()
        .success();

    let output = sandbox
        .cmd()
        .args(["list", "--json", "--favorites", "--search", "bones"])
        .output()
        .unwrap();
    let value = json_stdout(&output);
    assert_eq!(value["empty_reason"], "no_favorites_matching_search");
    assert_eq!(value["presentation"]["message"]["title"], "No favorites found");
}

#[test]
fn fav_export_then_import_into_fresh_profile() {
    let source = Sandbox::new();
    source.cmd().args(["fav", "toggle", "anatomy"]).assert().success();
    source.cmd().args(["fav", "toggle", "nutrition"]).assert().success();

    let export_path = source.path().join("favs.json");
    source
        .cmd()
        .args(["fav", "export", "--out"])
        .arg(&export_path)
        .assert()
        .success();

    let exported: Value = serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
    assert_eq!(exported["version"], "1.0");
    assert_eq!(exported["favorites"].as_array().unwrap().len(), 2);

    let target = Sandbox::new();
    target
        .cmd()
        .args(["fav", "import"])
        .arg(&export_path)
        .assert()
        .success()
        .stdout(contains("imported 2 favorites"));

    let output = target
        .cmd()
        .args(["list", "--json", "--favorites"])
        .output()
        .unwrap();
    assert_eq!(visible_keys(&json_stdout(&output)), ["anatomy", "nutrition"]);
}

#[test]
fn fav_import_rejects_malformed_file() {
    let sandbox = Sandbox::new();
    let bad = sandbox.path().join("bad.json");
    fs::write(&bad, "{\"favorites\": 3}").unwrap();
    sandbox
        .cmd()
        .args(["fav", "import"])
        .arg(&bad)
        .assert()
        .failure();
}

#[test]
fn fav_clear_empties_the_set() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["fav", "toggle", "anatomy"]).assert().success();
    sandbox
        .cmd()
        .args(["fav", "clear"])
        .assert()
        .success()
        .stdout(contains("favorites cleared"));
    let output = sandbox.cmd().args(["list", "--json"]).output().unwrap();
    assert!(json_stdout(&output)["badge"].is_null());
}

// =============================================================================
// open
// =============================================================================

#[test]
fn open_dry_run_reports_navigation_event() {
    let sandbox = Sandbox::new();
    let output = sandbox
        .cmd()
        .args(["open", "anatomy", "--dry-run", "--json"])
        .output()
        .unwrap();
    let value = json_stdout(&output);
    assert_eq!(value["opened"], false);
    assert_eq!(value["event"]["key"], "anatomy");
    assert_eq!(value["event"]["title"], "Anatomy");
    assert_eq!(value["event"]["url"], "https://example.com/anatomy");
}

#[test]
fn open_invalid_url_is_rejected_with_exit_two() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["open", "broken", "--dry-run"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(contains("not a url"));
}

#[test]
fn open_unknown_key_is_rejected_with_exit_two() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["open", "missing", "--dry-run"])
        .assert()
        .code(2)
        .stderr(contains("missing"));
}

#[cfg(unix)]
#[test]
fn open_uses_configured_browser_command() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("TYO_BROWSER", "true")
        .args(["open", "nutrition"])
        .assert()
        .success()
        .stdout(contains("Opened Nutrition (https://example.com/nutrition)"));
}

#[test]
fn open_with_unlaunchable_browser_fails_with_exit_two() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("TYO_BROWSER", "tyo-test-no-such-browser-binary")
        .args(["open", "nutrition"])
        .assert()
        .code(2);
}

// =============================================================================
// theme
// =============================================================================

#[test]
fn theme_defaults_to_dark_and_toggles() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("theme")
        .assert()
        .success()
        .stdout(contains("dark"));
    sandbox
        .cmd()
        .args(["theme", "toggle"])
        .assert()
        .success()
        .stdout(contains("light"));
    sandbox
        .cmd()
        .args(["theme", "show"])
        .assert()
        .success()
        .stdout(contains("light"));
    sandbox
        .cmd()
        .args(["theme", "set", "dark"])
        .assert()
        .success()
        .stdout(contains("dark"));
}

#[test]
fn theme_set_rejects_unknown_value() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["theme", "set", "sepia"])
        .assert()
        .failure()
        .stderr(contains("sepia"));
}

// =============================================================================
// history
// =============================================================================

#[test]
fn history_dedupes_and_lists_newest_first() {
    let sandbox = Sandbox::new();
    for term in ["anatomy", "nutrition", " anatomy "] {
        sandbox.cmd().args(["history", "add", term]).assert().success();
    }
    let output = sandbox
        .cmd()
        .args(["history", "list", "--json"])
        .output()
        .unwrap();
    let entries = json_stdout(&output);
    let terms: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["term"].as_str().unwrap())
        .collect();
    assert_eq!(terms, ["anatomy", "nutrition"]);
}

#[test]
fn history_add_rejects_blank_term() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["history", "add", "   "])
        .assert()
        .code(1)
        .stderr(contains("search term is empty"));
}

#[test]
fn history_clear_forgets_everything() {
    let sandbox = Sandbox::new();
    sandbox.cmd().args(["history", "add", "bones"]).assert().success();
    sandbox.cmd().args(["history", "clear"]).assert().success();
    let output = sandbox
        .cmd()
        .args(["history", "list", "--json"])
        .output()
        .unwrap();
    assert_eq!(json_stdout(&output), serde_json::json!([]));
}

// =============================================================================
// export-html
// =============================================================================

#[test]
fn export_html_writes_filtered_page() {
    let sandbox = Sandbox::new();
    let out = sandbox.path().join("site/index.html");
    sandbox
        .cmd()
        .args(["export-html", "--search", "nutri", "--theme", "light", "--out"])
        .arg(&out)
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<body class="light-mode">"#));
    assert!(html.contains("Search: nutri"));
    assert!(html.contains(r#"href="https://example.com/nutrition""#));
    assert!(!html.contains("https://example.com/anatomy"));
    assert!(html.contains("Join the course"));
}

#[test]
fn export_html_to_stdout_uses_saved_theme_and_empty_state() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["export-html", "--favorites"])
        .assert()
        .success()
        .stdout(contains("<body>"))
        .stdout(contains("No favorites yet"))
        .stdout(contains("card-grid").not());
}

#[test]
fn export_html_never_links_invalid_urls() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["export-html", "--search", "broken"])
        .assert()
        .success()
        .stdout(contains(r#"aria-disabled="true""#))
        .stdout(contains("href=\"not a url\"").not());
}

// =============================================================================
// config
// =============================================================================

#[test]
fn config_file_supplies_catalog_path() {
    let sandbox = Sandbox::new();
    let catalog = sandbox.path().join("from-config.json");
    fs::write(
        &catalog,
        r#"{"configured": {"title": "Configured", "url": "https://example.com/c"}}"#,
    )
    .unwrap();
    let config = sandbox.path().join("config.toml");
    fs::write(
        &config,
        format!("catalog = {:?}\n", catalog.to_string_lossy()),
    )
    .unwrap();

    let output = sandbox
        .cmd()
        .env("TYO_CONFIG", &config)
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert_eq!(visible_keys(&json_stdout(&output)), ["configured"]);
}

#[test]
fn malformed_config_falls_back_to_defaults() {
    let sandbox = Sandbox::new();
    let config = sandbox.path().join("config.toml");
    fs::write(&config, "catalog = [not toml").unwrap();

    let output = sandbox
        .cmd()
        .env("TYO_CONFIG", &config)
        .args(["list", "--json"])
        .output()
        .unwrap();
    assert_eq!(visible_keys(&json_stdout(&output)).len(), 4);
}

// =============================================================================
// completions / man / version
// =============================================================================

#[test]
fn completions_and_man_render() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(contains("tyo"));
    sandbox
        .cmd()
        .arg("man")
        .assert()
        .success()
        .stdout(contains(".TH"));
}

#[test]
fn version_flag_prints_package_version() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}
