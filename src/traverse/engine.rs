//! Lister - depth-first traversal of a remote tree
//!
//! Each directory is handled in one call: fetch all of its children, filter
//! and sort them, render the rows for this level, ask once whether to go
//! deeper, then recurse into the child directories in sorted order. Nothing
//! is prompted for until the whole level has arrived.

use termcolor::WriteColor;
use tracing::{debug, error};

use crate::entry::Entry;
use crate::error::ListError;
use crate::output::{Presentation, render_entry};
use crate::paths::{child_display_path, normalize_head};
use crate::progress::{BusyIndicator, NoopIndicator};
use crate::prompt::{NeverPrompt, Prompter};
use crate::query::ListQuery;
use crate::remote::RemoteStore;
use crate::sort::sort_entries;

use super::Visit;
use super::config::ListOptions;
use super::filter::NameFilter;
use super::state::TraversalState;

/// Walks remote trees and writes one row per listed entry to `out`.
pub struct Lister<'a, W> {
    pub(super) store: &'a dyn RemoteStore,
    pub(super) options: &'a ListOptions,
    out: W,
    pub(super) busy: &'a dyn BusyIndicator,
    prompter: &'a dyn Prompter,
    pub(super) filter: NameFilter,
    rendered: usize,
}

impl<'a, W: WriteColor> Lister<'a, W> {
    pub fn new(store: &'a dyn RemoteStore, options: &'a ListOptions, out: W) -> Self {
        Self {
            store,
            options,
            out,
            busy: &NoopIndicator,
            prompter: &NeverPrompt,
            filter: NameFilter::new(options.hidden, &options.ignore_patterns),
            rendered: 0,
        }
    }

    pub fn with_indicator(mut self, busy: &'a dyn BusyIndicator) -> Self {
        self.busy = busy;
        self
    }

    pub fn with_prompter(mut self, prompter: &'a dyn Prompter) -> Self {
        self.prompter = prompter;
        self
    }

    /// Rows written so far.
    pub fn rendered(&self) -> usize {
        self.rendered
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn render(&mut self, entry: &Entry, presentation: &Presentation) -> Result<(), ListError> {
        render_entry(&mut self.out, entry, presentation)?;
        self.rendered += 1;
        Ok(())
    }

    /// Visit one entry and, for directories, the branch below it.
    ///
    /// `Err` is a fetch or output failure. `Declined` and `Empty` stop the
    /// traversal without being errors.
    pub fn visit(&mut self, st: TraversalState<'_>) -> Result<Visit, ListError> {
        let parent = normalize_head(st.head_path);
        let here = Presentation::new(st.mask, parent.as_str());
        let entry = st.entry;

        if !entry.is_dir {
            self.render(entry, &here)?;
            return Ok(Visit::Done);
        }

        let child_head = child_display_path(&parent, &entry.name);

        if st.depth == 0 {
            if st.is_root {
                self.render(entry, &here)?;
            }
            return Ok(Visit::Done);
        }
        let depth = if st.depth > 0 { st.depth - 1 } else { st.depth };

        self.busy.pause();
        let can_prompt = !st.explicit_no_prompt && self.prompter.can_prompt();
        self.busy.play();

        let collected = self.collect_children(&st)?;

        let level = here.with_parent(child_head.as_str());
        let mut children = Vec::new();
        let mut rendered_here = 0usize;
        for child in collected {
            let suppressed = (st.mask.non_folders_only() && child.is_dir)
                || (st.mask.directories_only() && !child.is_dir);
            if !suppressed {
                self.render(&child, &level)?;
                rendered_here += 1;
            }
            if child.is_dir {
                children.push(child);
            }
        }

        // Trash listings are flat: shown in full, never descended or prompted.
        if st.in_trash {
            return Ok(if rendered_here >= 1 {
                Visit::Done
            } else {
                Visit::Empty
            });
        }

        if depth != 0 && !children.is_empty() && can_prompt {
            self.busy.pause();
            let more = self.prompter.confirm_continue();
            self.busy.play();
            if !more {
                debug!(dir = %child_head, "continuation declined");
                return Ok(Visit::Declined);
            }
        }

        for child in &children {
            match self.visit(st.child(child, &child_head, depth))? {
                Visit::Done => {}
                stop => return Ok(stop),
            }
        }

        Ok(Visit::Done)
    }

    /// Drain every page of a directory's children, dropping filtered names,
    /// then apply the sort keys.
    fn collect_children(&self, st: &TraversalState<'_>) -> Result<Vec<Entry>, ListError> {
        let query = ListQuery::children_of(&st.entry.id, st.mask, st.in_trash)
            .with_predicate(st.predicate);
        debug!(dir = %st.entry.id, expression = %query.expression(), "listing children");

        let mut pair = self
            .store
            .list_page(&query, self.options.page_size, self.options.hidden);

        let mut collected = Vec::new();
        loop {
            match pair.next_entry() {
                Ok(Some(child)) => {
                    if !self.filter.is_excluded(&child.name) {
                        collected.push(child);
                    }
                }
                Ok(None) => break,
                Err(err) => {
                    error!(dir = %st.entry.id, error = %err, "listing failed");
                    return Err(err.into());
                }
            }
        }

        if !st.sort_keys.is_empty() {
            sort_entries(&mut collected, st.sort_keys);
        }
        debug!(dir = %st.entry.id, count = collected.len(), "children collected");
        Ok(collected)
    }
}
