use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

#[allow(deprecated)]
fn cli(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("grammar-i18n").expect("binary");
    cmd.current_dir(workdir);
    cmd
}

fn read_json(path: impl AsRef<Path>) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read")).expect("valid json")
}

fn setup_site(root: &Path) {
    fs::create_dir_all(root.join("i18n")).unwrap();
    fs::create_dir_all(root.join("site/node_modules/pkg")).unwrap();
    fs::write(
        root.join("i18n/en.json"),
        r#"{"g.sys.ok": "OK", "g.shop.buy": "Buy"}"#,
    )
    .unwrap();
    fs::write(root.join("i18n/zh.json"), r#"{"g.sys.ok": "好"}"#).unwrap();
    fs::write(
        root.join("site/index.html"),
        r#"<button data-i18n="g.sys.ok">OK</button><a data-i18n='g.shop.buy'>Buy</a>"#,
    )
    .unwrap();
    fs::write(
        root.join("site/node_modules/pkg/vendor.html"),
        r#"<p data-i18n="g.vendor.noise"></p>"#,
    )
    .unwrap();
}

fn extract(root: &Path) {
    cli(root)
        .args(["i18n-to-nodes", "--i18n-dir", "i18n", "--out", "dist/grammar/nodes.json"])
        .assert()
        .success();
}

#[test]
fn full_pipeline_passes_gate_after_patch() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_site(root);
    extract(root);

    let nodes = read_json(root.join("dist/grammar/nodes.json"));
    assert_eq!(nodes["version"], "gbook-node-index/1.0");
    assert_eq!(nodes["nodes"][0]["key"], "g.shop.buy");
    assert_eq!(nodes["nodes"][0]["grammar"], "[SHOP::BUY]");
    assert_eq!(nodes["nodes"][0]["tags"], serde_json::json!(["ui", "shop"]));

    cli(root)
        .args([
            "patch",
            "--nodes",
            "dist/grammar/nodes.json",
            "--i18n-dir",
            "i18n",
            "--base-lang",
            "en",
            "--out-dir",
            "i18n",
        ])
        .assert()
        .success();
    assert_eq!(read_json(root.join("i18n/zh.json"))["g.shop.buy"], "Buy");

    cli(root)
        .args([
            "validate",
            "--nodes",
            "dist/grammar/nodes.json",
            "--i18n-dir",
            "i18n",
            "--report-dir",
            "dist/reports",
        ])
        .assert()
        .success();
    cli(root)
        .args([
            "scan-ui",
            "--nodes",
            "dist/grammar/nodes.json",
            "--i18n-dir",
            "i18n",
            "--scan-paths",
            "site",
            "missing-dir",
            "--report-dir",
            "dist/reports",
        ])
        .assert()
        .success();

    let ui_missing = read_json(root.join("dist/reports/ui_missing_in_nodes.json"));
    assert_eq!(ui_missing["count"], 0);

    cli(root)
        .arg("gate")
        .assert()
        .success()
        .stdout(predicate::str::contains("[OK] Grammar ↔ i18n gates passed."))
        .stdout(predicate::str::contains(
            "[INFO] i18n orphan keys (legacy allowed): 0",
        ));
}

#[test]
fn gate_fails_on_missing_translations_and_undeclared_ui_keys() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_site(root);
    extract(root);
    fs::write(
        root.join("site/extra.html"),
        r#"<span data-binding="g.sys.unknown"></span>"#,
    )
    .unwrap();

    cli(root)
        .args([
            "validate",
            "--nodes",
            "dist/grammar/nodes.json",
            "--i18n-dir",
            "i18n",
            "--report-dir",
            "dist/reports",
        ])
        .assert()
        .success();
    cli(root)
        .args([
            "scan-ui",
            "--nodes",
            "dist/grammar/nodes.json",
            "--i18n-dir",
            "i18n",
            "--scan-paths",
            "site",
            "--report-dir",
            "dist/reports",
        ])
        .assert()
        .success();

    let ui_missing = read_json(root.join("dist/reports/ui_missing_in_nodes.json"));
    assert_eq!(ui_missing["keys"], serde_json::json!(["g.sys.unknown"]));

    cli(root)
        .args(["gate", "--report-dir", "dist/reports"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(
            "[FAIL] UI keys missing in nodes.json: 1",
        ))
        .stdout(predicate::str::contains(
            "[FAIL] Missing i18n translations for node keys (sum over langs): 1",
        ))
        .stdout(predicate::str::contains("[INFO] i18n orphan keys"));
}

#[test]
fn skeleton_writes_empty_tables_and_json_summary() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_site(root);
    extract(root);

    let output = cli(root)
        .args([
            "--json",
            "nodes-to-skeleton",
            "--nodes",
            "dist/grammar/nodes.json",
            "--langs",
            "fr",
            "de",
            "--out-dir",
            "new",
        ])
        .output()
        .expect("run");
    assert!(output.status.success());
    let summary: Value = serde_json::from_slice(&output.stdout).expect("json summary");
    assert_eq!(summary["node_count"], 2);

    for lang in ["fr", "de"] {
        assert_eq!(
            read_json(root.join(format!("new/{lang}.json"))),
            serde_json::json!({"g.shop.buy": "", "g.sys.ok": ""})
        );
    }
}

#[test]
fn malformed_table_fails_without_reports() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_site(root);
    extract(root);
    fs::write(root.join("i18n/jp.json"), "[1, 2]").unwrap();

    cli(root)
        .args([
            "validate",
            "--nodes",
            "dist/grammar/nodes.json",
            "--i18n-dir",
            "i18n",
            "--report-dir",
            "dist/reports",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("jp.json"));
    assert!(!root.join("dist/reports").exists());
}

#[test]
fn unknown_base_language_is_reported() {
    let temp = tempdir().unwrap();
    let root = temp.path();
    setup_site(root);
    extract(root);

    cli(root)
        .args([
            "patch",
            "--nodes",
            "dist/grammar/nodes.json",
            "--i18n-dir",
            "i18n",
            "--base-lang",
            "ko",
            "--out-dir",
            "out",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base lang 'ko' not found"));
}
