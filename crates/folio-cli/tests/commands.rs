//! End-to-end tests for every subcommand on a two-file document.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

use common::two_file_fixture;

fn cmd() -> Command {
    Command::cargo_bin("folio").unwrap()
}

fn run_json(dir: &std::path::Path, args: &[&str]) -> serde_json::Value {
    let output = cmd()
        .args(args)
        .args(["--base", dir.to_str().unwrap(), "front.pdf", "back.pdf"])
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn info_text_shows_counts() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["info", "front.pdf", "back.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: front"))
        .stdout(predicate::str::contains("Pages: 3"))
        .stdout(predicate::str::contains("back.pdf\t1"));
}

#[test]
fn info_json_has_uid_and_files() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    let json = run_json(dir.path(), &["info"]);
    assert_eq!(json["pages"], 3);
    assert_eq!(json["uid"].as_str().unwrap().len(), 64);
    assert_eq!(json["files"][0]["pages"], 2);
    assert_eq!(json["files"][1]["pages"], 1);
}

#[test]
fn pages_maps_logical_pages_to_files() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    let json = run_json(dir.path(), &["pages"]);
    let pages = json.as_array().unwrap();
    assert_eq!(pages.len(), 3);
    assert!(pages[2]["file"].as_str().unwrap().ends_with("back.pdf"));
    assert_eq!(pages[2]["page"], 3);
    assert_eq!(pages[2]["file_page"], 1);
    assert_eq!(pages[0]["width"], 612.0);
    assert_eq!(pages[0]["rotation"], 0);
}

#[test]
fn pages_range_selects_subset() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    let json = run_json(dir.path(), &["pages", "--pages", "2-3"]);
    let pages: Vec<i64> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["page"].as_i64().unwrap())
        .collect();
    assert_eq!(pages, vec![2, 3]);
}

#[test]
fn pages_range_past_end_fails() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["pages", "front.pdf", "back.pdf", "--pages", "4"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds document page count (3)"));
}

#[test]
fn outline_is_shifted_across_files() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["outline", "front.pdf", "back.pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cover\t1"))
        .stdout(predicate::str::contains("Contents\t2"))
        .stdout(predicate::str::contains("Index\t3"));
}

#[test]
fn links_resolve_to_logical_pages() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    let json = run_json(dir.path(), &["links"]);
    let links = json.as_array().unwrap();
    assert_eq!(links.len(), 2);
    assert_eq!(links[0]["kind"], "page");
    assert_eq!(links[0]["target"], "2");
    assert_eq!(links[1]["kind"], "uri");
    assert_eq!(links[1]["target"], "https://example.com");
}

#[test]
fn annots_lists_link_annotations() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["annots", "front.pdf", "back.pdf", "--pages", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1\tLink"))
        .stdout(predicate::str::contains("website"));
}

#[test]
fn text_prints_page_headers() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["text", "front.pdf", "back.pdf", "--pages", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Page 3 ---"))
        .stdout(predicate::str::contains("Index of places"));
}

#[test]
fn search_finds_text_in_second_file() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    let json = run_json(dir.path(), &["search", "places"]);
    let matches = json.as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["page"], 3);
    assert_eq!(matches[0]["text"], "places");
}

#[test]
fn search_max_results_spans_files() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    let all = run_json(dir.path(), &["search", "of"]);
    let pages: Vec<u64> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["page"].as_u64().unwrap())
        .collect();
    assert_eq!(pages, vec![2, 3]);

    let first = run_json(dir.path(), &["search", "of", "--max-results", "1"]);
    let first = first.as_array().unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0]["page"], 2);

    let selected = run_json(dir.path(), &["search", "of", "--pages", "3"]);
    let selected = selected.as_array().unwrap();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0]["page"], 3);
}

#[test]
fn search_with_invalid_regex_fails() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());

    cmd()
        .current_dir(dir.path())
        .args(["search", "(unclosed", "front.pdf", "--regex"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid search pattern"));
}

#[test]
fn single_file_without_base() {
    let dir = tempfile::tempdir().unwrap();
    two_file_fixture(dir.path());
    let path = dir.path().join("back.pdf");

    cmd()
        .args(["info", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: back"))
        .stdout(predicate::str::contains("Pages: 1"));
}
