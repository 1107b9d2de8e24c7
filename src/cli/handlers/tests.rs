use super::*;
use crate::cli::clipboard::Clipboard;
use crate::cli::output::OutputFormat;
use crate::cli::{
    AddArgs, CopyArgs, EditArgs, ExportArgs, ListArgs, ResetArgs, RetagArgs, RmArgs, SearchArgs,
    ShowArgs, TaggedArgs, TagsArgs,
};
use crate::domain::{SearchId, TagList};
use crate::store::{SearchRepository, SqliteStore};
use anyhow::{Result, bail};
use pretty_assertions::assert_eq;
use std::io::Cursor;

// Test helpers

/// Clipboard that records what it was given.
#[derive(Default)]
pub(crate) struct MockClipboard {
    pub(crate) copied: Vec<String>,
    pub(crate) fail: bool,
}

impl Clipboard for MockClipboard {
    fn copy(&mut self, text: &str) -> Result<()> {
        if self.fail {
            bail!("clipboard unavailable");
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}

fn id(value: i64) -> SearchId {
    SearchId::new(value).unwrap()
}

fn seeded_store() -> SqliteStore {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .add(&TagList::new(["web"]), "index=web status=500", "errors")
        .unwrap();
    store
        .add(&TagList::new(["web", "auth"]), "index=auth status=403", "")
        .unwrap();
    store
}

fn text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

fn add_args(spl: Option<&str>, tags: &[&str], notes: &str) -> AddArgs {
    AddArgs {
        spl: spl.map(str::to_string),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        notes: notes.to_string(),
    }
}

// ===========================================
// collect_tags
// ===========================================

#[test]
fn collect_tags_flattens_comma_separated_values() {
    let tags = collect_tags(&["web, auth".to_string(), "dns".to_string(), " ".to_string()]);
    assert_eq!(tags.as_slice(), ["web", "auth", "dns"]);
}

// ===========================================
// add
// ===========================================

#[test]
fn add_with_argument_assigns_next_id() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    handle_add(
        &add_args(Some("index=dns"), &["dns,net"], "lookups"),
        &mut store,
        Cursor::new(Vec::new()),
        &mut out,
    )
    .unwrap();

    assert_eq!(text(out), "Search 3 added.\n");
    let saved = store.get_by_id(id(3)).unwrap().unwrap();
    assert_eq!(saved.tags.as_slice(), ["dns", "net"]);
    assert_eq!(saved.notes, "lookups");
}

#[test]
fn add_reads_multiline_spl_from_input() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut out = Vec::new();

    handle_add(
        &add_args(None, &[], ""),
        &mut store,
        Cursor::new(b"index=web\n| stats count by host\n\n".to_vec()),
        &mut out,
    )
    .unwrap();

    let saved = store.get_by_id(id(1)).unwrap().unwrap();
    assert_eq!(saved.spl, "index=web\n| stats count by host");
    assert!(saved.tags.is_empty());
}

#[test]
fn add_rejects_blank_spl() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let mut out = Vec::new();

    let err = handle_add(
        &add_args(None, &["web"], ""),
        &mut store,
        Cursor::new(b"  \n".to_vec()),
        &mut out,
    )
    .unwrap_err();

    assert!(err.to_string().contains("SPL cannot be empty"));
    assert!(store.get_all().unwrap().is_empty());
}

// ===========================================
// ls / search / tagged / show
// ===========================================

#[test]
fn list_prints_table_and_count() {
    let store = seeded_store();
    let mut out = Vec::new();

    handle_list(&ListArgs { format: OutputFormat::Human }, &store, &mut out, 70).unwrap();

    let out = text(out);
    assert!(out.contains("| ID |"));
    assert!(out.contains("index=web status=500"));
    assert!(out.contains("web, auth"));
    assert!(out.ends_with("2 search(es)\n"));
}

#[test]
fn list_empty_store_says_no_results() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut out = Vec::new();

    handle_list(&ListArgs { format: OutputFormat::Human }, &store, &mut out, 70).unwrap();

    assert_eq!(text(out), "No results.\n");
}

#[test]
fn list_json_wraps_searches_in_data() {
    let store = seeded_store();
    let mut out = Vec::new();

    handle_list(&ListArgs { format: OutputFormat::Json }, &store, &mut out, 70).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let data = value["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], 1);
    assert_eq!(data[1]["tags"], serde_json::json!(["web", "auth"]));
}

#[test]
fn search_matches_body_substring() {
    let store = seeded_store();
    let mut out = Vec::new();

    let args = SearchArgs {
        text: "status=403".to_string(),
        format: OutputFormat::Json,
    };
    handle_search(&args, &store, &mut out, 70).unwrap();

    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let data = value["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["id"], 2);
}

#[test]
fn tagged_matches_whole_tags_only() {
    let store = seeded_store();

    let mut out = Vec::new();
    let args = TaggedArgs {
        tag: "auth".to_string(),
        format: OutputFormat::Human,
    };
    handle_tagged(&args, &store, &mut out, 70).unwrap();
    assert!(text(out).ends_with("1 search(es)\n"));

    let mut out = Vec::new();
    let args = TaggedArgs {
        tag: "we".to_string(),
        format: OutputFormat::Human,
    };
    handle_tagged(&args, &store, &mut out, 70).unwrap();
    assert_eq!(text(out), "No results.\n");
}

#[test]
fn show_missing_id_fails() {
    let store = seeded_store();
    let mut out = Vec::new();

    let args = ShowArgs {
        id: id(9),
        format: OutputFormat::Human,
    };
    let err = handle_show(&args, &store, &mut out, 70).unwrap_err();

    assert_eq!(err.to_string(), "search not found: 9");
    assert!(out.is_empty());
}

#[test]
fn show_existing_id_prints_one_search() {
    let store = seeded_store();
    let mut out = Vec::new();

    let args = ShowArgs {
        id: id(1),
        format: OutputFormat::Human,
    };
    handle_show(&args, &store, &mut out, 70).unwrap();

    let out = text(out);
    assert!(out.contains("index=web status=500"));
    assert!(!out.contains("status=403"));
}

// ===========================================
// tags
// ===========================================

#[test]
fn tags_lists_distinct_tags_in_first_seen_order() {
    let store = seeded_store();
    let mut out = Vec::new();

    handle_tags(&TagsArgs { format: OutputFormat::Human }, &store, &mut out).unwrap();

    assert_eq!(text(out), "web\nauth\n");
}

#[test]
fn tags_on_empty_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut out = Vec::new();

    handle_tags(&TagsArgs { format: OutputFormat::Human }, &store, &mut out).unwrap();
    assert_eq!(text(out), "No tags found.\n");

    let mut out = Vec::new();
    handle_tags(&TagsArgs { format: OutputFormat::Json }, &store, &mut out).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value["data"], serde_json::json!([]));
}

// ===========================================
// retag / edit
// ===========================================

#[test]
fn retag_replaces_tags_and_prints_result() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    let args = RetagArgs {
        id: id(1),
        tags: vec!["http, errors".to_string()],
    };
    handle_retag(&args, &mut store, &mut out, 70).unwrap();

    let out = text(out);
    assert!(out.starts_with("Updated Search\n"));
    assert!(out.contains("http, errors"));
    let saved = store.get_by_id(id(1)).unwrap().unwrap();
    assert_eq!(saved.tags.as_slice(), ["http", "errors"]);
}

#[test]
fn retag_without_tags_clears_them() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    let args = RetagArgs {
        id: id(2),
        tags: Vec::new(),
    };
    handle_retag(&args, &mut store, &mut out, 70).unwrap();

    assert!(store.get_by_id(id(2)).unwrap().unwrap().tags.is_empty());
}

#[test]
fn retag_missing_id_fails() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    let args = RetagArgs {
        id: id(7),
        tags: vec!["x".to_string()],
    };
    assert!(handle_retag(&args, &mut store, &mut out, 70).is_err());
}

#[test]
fn edit_changes_spl_and_notes() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    let args = EditArgs {
        id: id(2),
        spl: Some("index=auth action=failure".to_string()),
        notes: Some("failed logins".to_string()),
    };
    handle_edit(&args, &mut store, &mut out, 70).unwrap();

    let saved = store.get_by_id(id(2)).unwrap().unwrap();
    assert_eq!(saved.spl, "index=auth action=failure");
    assert_eq!(saved.notes, "failed logins");
    assert_eq!(saved.tags.as_slice(), ["web", "auth"]);
}

#[test]
fn edit_requires_a_change() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    let args = EditArgs {
        id: id(1),
        spl: None,
        notes: None,
    };
    let err = handle_edit(&args, &mut store, &mut out, 70).unwrap_err();
    assert!(err.to_string().contains("nothing to change"));
}

#[test]
fn edit_rejects_blank_spl() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    let args = EditArgs {
        id: id(1),
        spl: Some("   ".to_string()),
        notes: None,
    };
    assert!(handle_edit(&args, &mut store, &mut out, 70).is_err());
    assert_eq!(
        store.get_by_id(id(1)).unwrap().unwrap().spl,
        "index=web status=500"
    );
}

// ===========================================
// rm / copy
// ===========================================

#[test]
fn rm_deletes_and_reports() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    handle_rm(&RmArgs { id: id(1) }, &mut store, &mut out).unwrap();

    assert_eq!(text(out), "Search 1 deleted.\n");
    assert!(store.get_by_id(id(1)).unwrap().is_none());
}

#[test]
fn rm_missing_id_is_a_no_op() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    handle_rm(&RmArgs { id: id(5) }, &mut store, &mut out).unwrap();

    assert_eq!(text(out), "No search with ID 5; nothing deleted.\n");
    assert_eq!(store.get_all().unwrap().len(), 2);
}

#[test]
fn copy_sends_spl_to_clipboard() {
    let store = seeded_store();
    let mut clipboard = MockClipboard::default();
    let mut out = Vec::new();

    handle_copy(&CopyArgs { id: id(2) }, &store, &mut clipboard, &mut out).unwrap();

    assert_eq!(clipboard.copied, ["index=auth status=403"]);
    assert_eq!(text(out), "Search 2 copied to the clipboard.\n");
}

#[test]
fn copy_missing_id_leaves_clipboard_alone() {
    let store = seeded_store();
    let mut clipboard = MockClipboard::default();
    let mut out = Vec::new();

    assert!(handle_copy(&CopyArgs { id: id(3) }, &store, &mut clipboard, &mut out).is_err());
    assert!(clipboard.copied.is_empty());
}

#[test]
fn copy_propagates_clipboard_failure() {
    let store = seeded_store();
    let mut clipboard = MockClipboard {
        fail: true,
        ..MockClipboard::default()
    };
    let mut out = Vec::new();

    let err = handle_copy(&CopyArgs { id: id(1) }, &store, &mut clipboard, &mut out).unwrap_err();
    assert_eq!(err.to_string(), "clipboard unavailable");
}

// ===========================================
// export / reset
// ===========================================

#[test]
fn export_to_stdout_is_json_document() {
    let store = seeded_store();
    let mut out = Vec::new();

    handle_export(&ExportArgs { output: None }, &store, &mut out).unwrap();

    let document: ExportDocument = serde_json::from_slice(&out).unwrap();
    assert_eq!(document.count, 2);
    assert_eq!(document.searches[0].spl, "index=web status=500");
    assert_eq!(document.searches[1].id, id(2));
}

#[test]
fn export_to_file_writes_document() {
    let store = seeded_store();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("backup").join("searches.json");
    let mut out = Vec::new();

    handle_export(
        &ExportArgs {
            output: Some(path.clone()),
        },
        &store,
        &mut out,
    )
    .unwrap();

    assert_eq!(
        text(out),
        format!("Exported 2 search(es) to {}\n", path.display())
    );
    let contents = std::fs::read_to_string(&path).unwrap();
    let document: ExportDocument = serde_json::from_str(&contents).unwrap();
    assert_eq!(document.searches.len(), 2);
}

#[test]
fn export_empty_store() {
    let store = SqliteStore::open_in_memory().unwrap();
    let document = export_document(&store).unwrap();
    assert_eq!(document.count, 0);
    assert!(document.searches.is_empty());
}

#[test]
fn reset_requires_confirmation() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    let err = handle_reset(&ResetArgs { yes: false }, &mut store, &mut out).unwrap_err();

    assert!(err.to_string().contains("--yes"));
    assert_eq!(store.get_all().unwrap().len(), 2);
}

#[test]
fn reset_clears_store_and_restarts_ids() {
    let mut store = seeded_store();
    let mut out = Vec::new();

    handle_reset(&ResetArgs { yes: true }, &mut store, &mut out).unwrap();

    assert_eq!(text(out), "Database has been reset.\n");
    assert!(store.get_all().unwrap().is_empty());
    assert_eq!(store.next_id().unwrap(), SearchId::FIRST);
}
