use std::fs;
use std::path::Path;

use chrono::{Local, TimeZone};
use tempfile::TempDir;

use super::*;
use crate::clock::FixedClock;
use crate::project::ARCHIVE_DIR;

fn clock() -> Box<dyn Clock> {
    Box::new(FixedClock(
        Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    ))
}

fn project(name: &str) -> Project {
    Project {
        name: name.to_string(),
        path: PathBuf::from("/tmp").join(name),
    }
}

/// Browser over an in-memory listing; never touches the filesystem.
fn test_browser(names: &[&str]) -> Browser {
    Browser::new(
        PathBuf::from("/tmp"),
        names.iter().map(|n| project(n)).collect(),
        clock(),
    )
}

/// Browser over a real temp hatchery populated with `names`.
fn disk_browser(tmp: &TempDir, names: &[&str]) -> Browser {
    let root = tmp.path().join("hatchery");
    for name in names {
        fs::create_dir_all(root.join(name)).unwrap();
    }
    Browser::open(root, clock()).unwrap()
}

fn type_text(browser: &mut Browser, text: &str) {
    for ch in text.chars() {
        browser.update(Action::Input(ch));
    }
}

fn filtered_names(browser: &Browser) -> Vec<&str> {
    browser
        .filtered
        .iter()
        .map(|&i| browser.projects[i].name.as_str())
        .collect()
}

// ── Initial state ──────────────────────────────────────────────

#[test]
fn starts_with_full_list_and_cursor_at_top() {
    let browser = test_browser(&["2026-02-28-beta", "2026-02-28-alpha"]);
    assert_eq!(filtered_names(&browser), ["2026-02-28-beta", "2026-02-28-alpha"]);
    assert_eq!(browser.cursor, 0);
    assert_eq!(browser.status, INITIAL_STATUS);
    assert!(!browser.has_create_row());
    assert_eq!(browser.row_count(), 2);
}

#[test]
fn empty_listing_has_no_rows() {
    let browser = test_browser(&[]);
    assert_eq!(browser.row_count(), 0);
    assert_eq!(browser.cursor, 0);
    assert!(browser.current_project().is_none());
}

// ── Navigation ─────────────────────────────────────────────────

#[test]
fn move_is_clamped_to_rows() {
    let mut browser = test_browser(&["c", "b", "a"]);
    browser.update(Action::MoveUp);
    assert_eq!(browser.cursor, 0);
    for _ in 0..5 {
        browser.update(Action::MoveDown);
    }
    assert_eq!(browser.cursor, 2);
    browser.update(Action::MoveUp);
    assert_eq!(browser.cursor, 1);
}

#[test]
fn cursor_can_reach_create_row() {
    let mut browser = test_browser(&["2026-02-28-alpha"]);
    type_text(&mut browser, "alp");
    assert_eq!(browser.row_count(), 2);
    browser.update(Action::MoveDown);
    assert!(browser.is_create_row(browser.cursor));
    browser.update(Action::MoveDown);
    assert_eq!(browser.cursor, 1);
}

#[test]
fn resize_records_viewport() {
    let mut browser = test_browser(&["a"]);
    assert!(!browser.update(Action::Resize(120, 40)));
    assert_eq!((browser.width, browser.height), (120, 40));
}

// ── Filtering ──────────────────────────────────────────────────

#[test]
fn typing_filters_and_shows_create_row_last() {
    let mut browser = test_browser(&["2026-02-28-hardhat", "2026-02-28-hatch", "2026-02-27-zzz"]);
    type_text(&mut browser, "hat");
    assert_eq!(filtered_names(&browser), ["2026-02-28-hatch", "2026-02-28-hardhat"]);
    assert!(browser.has_create_row());
    assert!(browser.is_create_row(2));
    assert_eq!(browser.row_count(), 3);
}

#[test]
fn equal_scores_tie_break_by_name_descending() {
    let mut browser = test_browser(&["2026-02-28-alpha", "2026-02-27-alpha"]);
    type_text(&mut browser, "alpha");
    assert_eq!(filtered_names(&browser), ["2026-02-28-alpha", "2026-02-27-alpha"]);
}

#[test]
fn non_prefix_match_stays_visible() {
    let mut browser = test_browser(&["2026-03-01-alpha-super-long-project-name"]);
    type_text(&mut browser, "project");
    assert_eq!(browser.filtered.len(), 1);
}

#[test]
fn space_is_appended_to_query() {
    let mut browser = test_browser(&[]);
    type_text(&mut browser, "hello world");
    assert_eq!(browser.query, "hello world");
    assert_eq!(browser.create_input(), "hello world");
}

#[test]
fn whitespace_only_query_hides_create_row() {
    let mut browser = test_browser(&["a"]);
    type_text(&mut browser, "   ");
    assert!(!browser.has_create_row());
    assert_eq!(filtered_names(&browser), ["a"]);
}

#[test]
fn narrowing_filter_clamps_cursor() {
    let mut browser = test_browser(&["2026-01-03-abc", "2026-01-02-abd", "2026-01-01-xyz"]);
    browser.update(Action::MoveDown);
    browser.update(Action::MoveDown);
    assert_eq!(browser.cursor, 2);

    type_text(&mut browser, "xyz");
    // One match plus the create row.
    assert_eq!(browser.row_count(), 2);
    assert_eq!(browser.cursor, 1);
    assert!(browser.is_create_row(browser.cursor));
}

#[test]
fn backspace_removes_whole_grapheme() {
    let mut browser = test_browser(&[]);
    type_text(&mut browser, "cafe\u{301}");
    assert_eq!(browser.query, "cafe\u{301}");
    browser.update(Action::Backspace);
    assert_eq!(browser.query, "caf");

    type_text(&mut browser, "🦀");
    browser.update(Action::Backspace);
    assert_eq!(browser.query, "caf");
}

#[test]
fn backspace_on_empty_query_is_noop() {
    let mut browser = test_browser(&["a"]);
    browser.update(Action::Backspace);
    assert!(browser.query.is_empty());
    assert_eq!(browser.row_count(), 1);
}

#[test]
fn backspace_refilters() {
    let mut browser = test_browser(&["2026-02-28-alpha", "2026-02-28-beta"]);
    type_text(&mut browser, "betx");
    assert!(browser.filtered.is_empty());
    browser.update(Action::Backspace);
    assert_eq!(filtered_names(&browser), ["2026-02-28-beta"]);
}

// ── Accept ─────────────────────────────────────────────────────

#[test]
fn cancel_ends_without_selection() {
    let mut browser = test_browser(&["a"]);
    assert!(browser.update(Action::Cancel));
    assert!(matches!(browser.into_outcome(), Outcome::Cancelled));
}

#[test]
fn accept_on_project_selects_its_path() {
    let mut browser = test_browser(&["2026-02-28-beta", "2026-02-28-alpha"]);
    browser.update(Action::MoveDown);
    assert!(browser.update(Action::Accept));
    match browser.into_outcome() {
        Outcome::Selected(path) => assert_eq!(path, PathBuf::from("/tmp/2026-02-28-alpha")),
        other => panic!("expected selection, got {other:?}"),
    }
}

#[test]
fn accept_with_no_rows_sets_status() {
    let mut browser = test_browser(&[]);
    assert!(!browser.update(Action::Accept));
    assert_eq!(browser.status, "No matching project");
    assert!(!browser.should_quit);
}

#[test]
fn accept_on_create_row_creates_project() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &[]);
    type_text(&mut browser, "new project");

    assert_eq!(browser.row_count(), 1);
    assert!(browser.is_create_row(browser.cursor));

    assert!(browser.update(Action::Accept));
    let want = tmp.path().join("hatchery").join("2026-03-01-new-project");
    assert!(want.is_dir());
    match browser.into_outcome() {
        Outcome::Selected(path) => assert_eq!(path, want),
        other => panic!("expected selection, got {other:?}"),
    }
}

#[test]
fn create_collision_is_inline_status() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &["2026-03-01-dup"]);
    type_text(&mut browser, "dup");
    browser.update(Action::MoveDown);
    assert!(browser.is_create_row(browser.cursor));

    assert!(!browser.update(Action::Accept));
    assert!(browser.status.starts_with("Create failed: project already exists"));
    assert!(browser.error.is_none());
    assert!(browser.selected_path.is_none());
}

#[test]
fn create_with_unusable_name_is_inline_status() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &[]);
    type_text(&mut browser, "!!!");
    assert!(browser.is_create_row(browser.cursor));

    assert!(!browser.update(Action::Accept));
    assert_eq!(
        browser.status,
        "Create failed: project name must contain at least one valid character"
    );
}

// ── Confirm flow ───────────────────────────────────────────────

#[test]
fn confirm_requires_project_under_cursor() {
    let mut browser = test_browser(&[]);
    type_text(&mut browser, "new");
    browser.update(Action::RequestArchive);
    assert!(browser.confirm.is_none());
    browser.update(Action::RequestRemove);
    assert!(browser.confirm.is_none());
}

#[test]
fn confirm_cancel_keeps_cursor() {
    let mut browser = test_browser(&["c", "b", "a"]);
    browser.update(Action::MoveDown);
    browser.update(Action::RequestRemove);
    assert_eq!(browser.confirm, Some(ConfirmAction::Remove));

    browser.update(Action::Input('n'));
    assert!(browser.confirm.is_none());
    assert_eq!(browser.status, "Action cancelled");
    assert_eq!(browser.cursor, 1);

    browser.update(Action::RequestArchive);
    assert!(!browser.update(Action::Cancel));
    assert!(browser.confirm.is_none());
    assert!(!browser.should_quit);
}

#[test]
fn confirm_ignores_other_keys() {
    let mut browser = test_browser(&["b", "a"]);
    browser.update(Action::RequestArchive);
    browser.update(Action::MoveDown);
    browser.update(Action::Input('x'));
    browser.update(Action::Backspace);
    assert_eq!(browser.confirm, Some(ConfirmAction::Archive));
    assert_eq!(browser.cursor, 0);
    assert!(browser.query.is_empty());
}

#[test]
fn confirm_archive_moves_project_and_refreshes() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &["2026-02-28-hatch"]);
    let root = browser.root.clone();

    browser.update(Action::RequestArchive);
    assert_eq!(browser.confirm, Some(ConfirmAction::Archive));
    assert!(!browser.update(Action::Input('y')));

    assert!(browser.confirm.is_none());
    assert!(root.join(ARCHIVE_DIR).join("2026-02-28-hatch").is_dir());
    assert!(browser.projects.is_empty());
    assert_eq!(browser.row_count(), 0);
    assert_eq!(browser.status, "Archived 2026-02-28-hatch -> 2026-02-28-hatch");
}

#[test]
fn confirm_archive_reports_suffixed_name() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &["2026-02-28-hatch", "2026-02-27-other"]);
    fs::create_dir_all(browser.root.join(ARCHIVE_DIR).join("2026-02-28-hatch")).unwrap();

    browser.update(Action::RequestArchive);
    browser.update(Action::Accept);

    assert_eq!(browser.status, "Archived 2026-02-28-hatch -> 2026-02-28-hatch-2");
    assert_eq!(filtered_names(&browser), ["2026-02-27-other"]);
}

#[test]
fn confirm_remove_deletes_project() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &["2026-02-28-keep", "2026-02-27-gone"]);
    browser.update(Action::MoveDown);
    browser.update(Action::RequestRemove);
    browser.update(Action::Input('Y'));

    assert!(!browser.root.join("2026-02-27-gone").exists());
    assert_eq!(filtered_names(&browser), ["2026-02-28-keep"]);
    assert_eq!(browser.status, "Removed 2026-02-27-gone");
    assert_eq!(browser.cursor, 0);
}

#[test]
fn confirm_keeps_query_filter_after_refresh() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &["2026-02-28-alpha", "2026-02-28-apple", "2026-02-28-zed"]);
    type_text(&mut browser, "ap");
    let before = filtered_names(&browser).len();
    browser.update(Action::RequestRemove);
    browser.update(Action::Accept);

    assert_eq!(filtered_names(&browser).len(), before - 1);
    assert!(browser.has_create_row());
    assert!(browser.cursor < browser.row_count());
}

#[test]
fn failed_archive_ends_session_with_error() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &["2026-02-28-hatch"]);
    // Pull the directory out from under the browser so the rename fails.
    fs::remove_dir_all(browser.root.join("2026-02-28-hatch")).unwrap();

    browser.update(Action::RequestArchive);
    assert!(browser.update(Action::Accept));
    assert!(matches!(
        browser.into_outcome(),
        Outcome::Failed(HatchError::Io { op: "archive project", .. })
    ));
}

#[test]
fn failed_refresh_ends_session_with_error() {
    let tmp = TempDir::new().unwrap();
    let mut browser = disk_browser(&tmp, &["2026-02-28-hatch"]);
    let project = browser.root.join("2026-02-28-hatch");
    // Point the browser at a root that is now a regular file: the remove
    // succeeds but the follow-up listing cannot read it.
    let bogus_root = tmp.path().join("not-a-dir");
    fs::write(&bogus_root, "x").unwrap();
    browser.root = bogus_root;

    browser.update(Action::RequestRemove);
    assert!(browser.update(Action::Accept));
    assert!(!Path::new(&project).exists());
    assert!(matches!(browser.into_outcome(), Outcome::Failed(HatchError::Io { .. })));
}

#[test]
fn updates_after_quit_are_ignored() {
    let mut browser = test_browser(&["a"]);
    browser.update(Action::Cancel);
    assert!(browser.update(Action::Input('x')));
    assert!(browser.query.is_empty());
}
