//! Depth-first listing of remote trees
//!
//! - `Lister::visit`: the recursive walk over one branch
//! - `Lister::list`, `list_matches`, `list_shared`: resolve starting entries
//!   and walk each in turn

mod config;
mod engine;
mod filter;
mod listing;
mod state;

pub use config::ListOptions;
pub use engine::Lister;
pub use filter::NameFilter;
pub use listing::RootLookup;
pub use state::TraversalState;

/// How a branch ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Everything asked for was listed, or the depth budget ran out.
    Done,
    /// The user answered "no" to continuing.
    Declined,
    /// A flat trash listing rendered nothing.
    Empty,
}

/// Summary of one listing invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListReport {
    /// Starting entries traversed (including the one that stopped the run).
    pub roots: usize,
    /// Rows written to the output.
    pub rendered: usize,
    /// Root locators the remote had nothing for.
    pub missing: Vec<String>,
    pub declined: bool,
}

#[cfg(test)]
mod tests {
    use termcolor::NoColor;

    use super::*;
    use crate::entry::Entry;
    use crate::error::ListError;
    use crate::mask::TypeMask;
    use crate::query::{EXACT_TITLE_KEY, Meta, SORT_KEY};
    use crate::remote::MemoryStore;
    use crate::test_utils::{RecordingIndicator, ScriptedPrompter};

    /// /docs/{a.txt, b.txt, sub/{c.txt, deeper/{d.txt}}}, /top.txt
    fn store() -> MemoryStore {
        let mut store = MemoryStore::default();
        store.insert(Entry::dir("docs", "docs").with_parent("root"));
        store.insert(Entry::file("top", "top.txt", 1).with_parent("root"));
        store.insert(Entry::file("a", "a.txt", 30).with_parent("docs"));
        store.insert(Entry::file("b", "b.txt", 20).with_parent("docs"));
        store.insert(Entry::dir("sub", "sub").with_parent("docs"));
        store.insert(Entry::file("c", "c.txt", 10).with_parent("sub"));
        store.insert(Entry::dir("deeper", "deeper").with_parent("sub"));
        store.insert(Entry::file("d", "d.txt", 5).with_parent("deeper"));
        store
    }

    fn options(sources: &[&str], depth: i64, mask: TypeMask) -> ListOptions {
        ListOptions {
            sources: sources.iter().map(|s| s.to_string()).collect(),
            depth,
            type_mask: mask | TypeMask::MINIMAL,
            no_prompt: true,
            ..Default::default()
        }
    }

    fn run(store: &MemoryStore, options: &ListOptions) -> (Result<ListReport, ListError>, Vec<String>) {
        let mut lister = Lister::new(store, options, NoColor::new(Vec::new()));
        let result = lister.list(false);
        let text = String::from_utf8(lister.into_output().into_inner()).unwrap();
        (result, text.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_depth_one_lists_immediate_children() {
        let store = store();
        let (result, rows) = run(&store, &options(&["/docs"], 1, TypeMask::NONE));
        let report = result.unwrap();
        assert_eq!(rows, vec!["/docs/a.txt", "/docs/b.txt", "/docs/sub"]);
        assert_eq!(report.roots, 1);
        assert_eq!(report.rendered, 3);
    }

    #[test]
    fn test_depth_bounds_levels() {
        let store = store();
        let (_, rows) = run(&store, &options(&["/docs"], 2, TypeMask::NONE));
        assert!(rows.contains(&"/docs/sub/c.txt".to_string()));
        assert!(rows.contains(&"/docs/sub/deeper".to_string()));
        assert!(!rows.iter().any(|r| r.contains("d.txt")));
    }

    #[test]
    fn test_negative_depth_is_unbounded() {
        let store = store();
        let (_, rows) = run(&store, &options(&["/docs"], -1, TypeMask::NONE));
        assert_eq!(
            rows,
            vec![
                "/docs/a.txt",
                "/docs/b.txt",
                "/docs/sub",
                "/docs/sub/c.txt",
                "/docs/sub/deeper",
                "/docs/sub/deeper/d.txt",
            ]
        );
    }

    #[test]
    fn test_depth_zero_renders_only_the_root() {
        let store = store();
        let (_, rows) = run(&store, &options(&["/docs"], 0, TypeMask::NONE));
        assert_eq!(rows, vec!["/docs"]);
    }

    #[test]
    fn test_root_listing_has_no_doubled_separator() {
        let store = store();
        for root in ["/", "", "My Drive"] {
            let (_, rows) = run(&store, &options(&[root], 1, TypeMask::NONE));
            assert_eq!(rows, vec!["/docs", "/top.txt"], "root {:?}", root);
        }
    }

    #[test]
    fn test_file_root_is_rendered_as_leaf() {
        let store = store();
        let (_, rows) = run(&store, &options(&["/docs/a.txt"], 5, TypeMask::NONE));
        assert_eq!(rows, vec!["/docs/a.txt"]);
    }

    #[test]
    fn test_directories_only_suppresses_files_and_stops_at_depth() {
        let mut store = MemoryStore::default();
        store.insert(Entry::dir("r", "r").with_parent("root"));
        store.insert(Entry::file("f1", "one.txt", 1).with_parent("r"));
        store.insert(Entry::file("f2", "two.txt", 1).with_parent("r"));
        store.insert(Entry::dir("k", "kid").with_parent("r"));
        store.insert(Entry::file("f3", "inner.txt", 1).with_parent("k"));

        let (result, rows) = run(&store, &options(&["/r"], 1, TypeMask::FOLDER));
        assert!(result.is_ok());
        assert_eq!(rows, vec!["/r/kid"]);
    }

    #[test]
    fn test_non_folders_only_lists_files() {
        let store = store();
        let opts = options(&["/docs"], -1, TypeMask::NON_FOLDER);
        let (_, rows) = run(&store, &opts);
        // The remote query excludes folders, so nothing below /docs is reached.
        assert_eq!(rows, vec!["/docs/a.txt", "/docs/b.txt"]);
    }

    #[test]
    fn test_sort_keys_order_each_level() {
        let store = store();
        let mut opts = options(&["/docs"], 1, TypeMask::NONE);
        let mut meta = Meta::new();
        meta.insert(SORT_KEY.to_string(), vec!["type, size".to_string()]);
        opts.meta = Some(meta);
        let (_, rows) = run(&store, &opts);
        assert_eq!(rows, vec!["/docs/sub", "/docs/b.txt", "/docs/a.txt"]);
    }

    #[test]
    fn test_exact_title_predicate_filters_children() {
        let mut store = MemoryStore::default();
        store.insert(Entry::dir("r", "r").with_parent("root"));
        store.insert(Entry::file("x", "report.csv", 1).with_parent("r"));
        store.insert(Entry::file("y", "report.csv.bak", 1).with_parent("r"));

        let mut opts = options(&["/r"], 1, TypeMask::NONE);
        let mut meta = Meta::new();
        meta.insert(EXACT_TITLE_KEY.to_string(), vec!["report.csv".to_string()]);
        opts.meta = Some(meta);
        let (_, rows) = run(&store, &opts);
        assert_eq!(rows, vec!["/r/report.csv"]);
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let store = store();
        let (result, rows) = run(&store, &options(&["/docs/sub", "/nope", "/top.txt"], 1, TypeMask::NONE));
        let report = result.unwrap();
        assert_eq!(report.missing, vec!["/nope".to_string()]);
        assert_eq!(report.roots, 2);
        assert_eq!(rows, vec!["/docs/sub/c.txt", "/docs/sub/deeper", "/top.txt"]);
    }

    #[test]
    fn test_lookup_failure_aborts_before_listing() {
        let mut store = store();
        store.fail_lookup("/top.txt", "backend down");
        let (result, rows) = run(&store, &options(&["/docs", "/top.txt"], 1, TypeMask::NONE));
        let err = result.unwrap_err();
        assert_eq!(err.locator(), Some("/top.txt"));
        assert!(rows.is_empty());
    }

    #[test]
    fn test_fetch_error_keeps_rendered_rows() {
        let mut store = store();
        store.insert(Entry::dir("zz", "zz").with_parent("docs"));
        store.insert(Entry::file("z1", "z.txt", 1).with_parent("zz"));
        store.fail_listing("sub", "rate limited");

        let (result, rows) = run(&store, &options(&["/docs"], -1, TypeMask::NONE));
        assert!(matches!(result, Err(ListError::Remote(_))));
        assert_eq!(rows, vec!["/docs/a.txt", "/docs/b.txt", "/docs/sub", "/docs/zz"]);
    }

    #[test]
    fn test_hidden_and_ignored_names_are_skipped() {
        let mut store = store();
        store.insert(Entry::file("h", ".secret", 1).with_parent("docs"));
        let mut opts = options(&["/docs"], 1, TypeMask::NONE);
        opts.ignore_patterns = vec!["b.*".to_string()];
        let (_, rows) = run(&store, &opts);
        assert_eq!(rows, vec!["/docs/a.txt", "/docs/sub"]);
    }

    #[test]
    fn test_prompt_once_per_level_and_decline_stops() {
        let store = store();
        let mut opts = options(&["/docs"], -1, TypeMask::NONE);
        opts.no_prompt = false;
        let answers = ScriptedPrompter::new(&[true, false]);

        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new())).with_prompter(&answers);
        let report = lister.list(false).unwrap();
        let text = String::from_utf8(lister.into_output().into_inner()).unwrap();

        assert!(report.declined);
        assert_eq!(answers.asked(), 2);
        assert!(text.contains("/docs/sub/deeper"));
        assert!(!text.contains("d.txt"));
    }

    #[test]
    fn test_no_prompt_when_depth_exhausted() {
        let store = store();
        let mut opts = options(&["/docs"], 1, TypeMask::NONE);
        opts.no_prompt = false;
        let answers = ScriptedPrompter::new(&[false]);

        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new())).with_prompter(&answers);
        let report = lister.list(false).unwrap();
        assert!(!report.declined);
        assert_eq!(answers.asked(), 0);
    }

    #[test]
    fn test_trash_listing_is_flat_and_unprompted() {
        let mut store = store();
        let mut gone = Entry::file("t", "old.txt", 1).with_parent("docs");
        gone.trashed = true;
        store.insert(gone);

        let mut opts = options(&["/"], -1, TypeMask::NONE);
        opts.in_trash = true;
        opts.no_prompt = false;
        let answers = ScriptedPrompter::new(&[false]);
        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new())).with_prompter(&answers);
        let report = lister.list(false).unwrap();
        let text = String::from_utf8(lister.into_output().into_inner()).unwrap();

        assert_eq!(text, "/old.txt\n");
        assert_eq!(answers.asked(), 0);
        assert!(!report.declined);
    }

    #[test]
    fn test_empty_trash_stops_remaining_roots() {
        let store = store();
        let mut opts = options(&["/", "/top.txt"], 1, TypeMask::NONE);
        opts.in_trash = true;
        let (result, rows) = run(&store, &opts);
        let report = result.unwrap();
        assert_eq!(report.roots, 1);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_indicator_paused_around_prompt_and_stopped() {
        let store = store();
        let opts = options(&["/docs"], 1, TypeMask::NONE);
        let calls = RecordingIndicator::default();
        {
            let mut lister =
                Lister::new(&store, &opts, NoColor::new(Vec::new())).with_indicator(&calls);
            lister.list(false).unwrap();
        }

        assert_eq!(calls.calls(), vec!["play", "pause", "play", "stop"]);
    }

    fn team_drive_store() -> MemoryStore {
        let mut store = MemoryStore::default();
        store.insert_team_drive(Entry::dir("eng", "Engineering"));
        store.insert_team_drive(Entry::dir("sales", "Sales"));
        store.insert(Entry::dir("eng-src", "src").with_parent("eng"));
        store.insert(Entry::file("eng-main", "main.rs", 3).with_parent("eng-src"));
        store.insert(Entry::file("sales-q", "q3.xlsx", 8).with_parent("sales"));
        store
    }

    #[test]
    fn test_team_drives_list_their_own_contents() {
        let store = team_drive_store();
        let (result, rows) = run(&store, &options(&["/"], 2, TypeMask::TEAM_DRIVES));
        result.unwrap();
        assert_eq!(
            rows,
            vec!["/Engineering", "/Sales", "/Engineering/src", "/Sales/q3.xlsx"]
        );
    }

    #[test]
    fn test_unbounded_team_drive_listing_terminates() {
        let store = team_drive_store();
        let (result, rows) = run(&store, &options(&["/"], -1, TypeMask::TEAM_DRIVES));
        result.unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.contains(&"/Engineering/src/main.rs".to_string()));
        assert!(!rows.iter().any(|r| r.starts_with("/Engineering/Engineering")));
    }

    #[test]
    fn test_list_by_id_heads_rows_with_id() {
        let store = store();
        let opts = options(&["sub"], 1, TypeMask::NONE);
        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new()));
        lister.list(true).unwrap();
        let text = String::from_utf8(lister.into_output().into_inner()).unwrap();
        assert_eq!(text, "sub/sub/c.txt\nsub/sub/deeper\n");
    }

    #[test]
    fn test_list_matches_walks_each_match() {
        let store = store();
        let mut opts = options(&["sub", "b.t"], 1, TypeMask::NONE);
        opts.path = "/docs".to_string();
        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new()));
        let report = lister.list_matches().unwrap();
        let text = String::from_utf8(lister.into_output().into_inner()).unwrap();
        assert_eq!(report.roots, 2);
        assert_eq!(text, "/docs/b.txt\n/docs/sub/c.txt\n/docs/sub/deeper\n");
    }

    #[test]
    fn test_list_matches_in_trash_from_mask_alone() {
        let mut store = store();
        let mut gone = Entry::file("t", "old.txt", 1).with_parent("docs");
        gone.trashed = true;
        store.insert(gone);

        let opts = options(&["old"], 1, TypeMask::IN_TRASH);
        assert!(!opts.in_trash);
        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new()));
        let report = lister.list_matches().unwrap();
        let text = String::from_utf8(lister.into_output().into_inner()).unwrap();
        assert_eq!(report.roots, 1);
        assert_eq!(text, "/old.txt\n");
    }

    #[test]
    fn test_list_matches_with_no_results_is_success() {
        let store = store();
        let opts = options(&["nothing-like-this"], 1, TypeMask::NONE);
        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new()));
        let report = lister.list_matches().unwrap();
        assert_eq!(report.roots, 0);
        assert_eq!(report.rendered, 0);
    }

    #[test]
    fn test_list_shared() {
        let mut store = store();
        let mut shared = Entry::dir("s", "team").with_parent("root");
        shared.shared = true;
        store.insert(shared);
        store.insert(Entry::file("s1", "plan.md", 1).with_parent("s"));

        let opts = options(&["/", "/missing"], 1, TypeMask::NONE);
        let mut lister = Lister::new(&store, &opts, NoColor::new(Vec::new()));
        let report = lister.list_shared().unwrap();
        let text = String::from_utf8(lister.into_output().into_inner()).unwrap();
        assert_eq!(text, "/team/plan.md\n");
        assert_eq!(report.missing, vec!["/missing".to_string()]);
    }
}
