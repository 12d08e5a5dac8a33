//! Entry points: list roots by path or id, list search matches, list shared
//! entries
//!
//! Each resolves its starting entries first, then hands them to
//! [`Lister::visit`] one at a time with the busy indicator running.

use termcolor::WriteColor;
use tracing::{debug, error, warn};

use crate::entry::Entry;
use crate::error::ListError;
use crate::paths::{is_remote_root_like, normalize_head, parent_display_path};
use crate::query::{Clause, Joiner, MatchMode, MatchPredicate, sort_keys};
use crate::remote::PagePair;

use super::engine::Lister;
use super::state::TraversalState;
use super::{ListReport, Visit};

/// Outcome of resolving one root locator.
#[derive(Debug)]
pub enum RootLookup {
    /// The entry to start from and the display path of its parent.
    Found { parent: String, entry: Entry },
    /// The remote has nothing at this locator.
    Missing,
}

/// A resolved traversal root: display parent plus entry.
type Root = (String, Entry);

impl<W: WriteColor> Lister<'_, W> {
    /// List every source locator, resolved by path or by id.
    ///
    /// Missing locators are reported and skipped. Any other lookup failure
    /// aborts before anything is listed.
    pub fn list(&mut self, by_id: bool) -> Result<ListReport, ListError> {
        let options = self.options;
        let predicate = MatchPredicate::from_meta(options.meta.as_ref(), true, options.trash_mode());
        let keys = sort_keys(options.meta.as_ref());

        let mut report = ListReport::default();
        let mut roots = Vec::new();
        for (index, locator) in options.sources.iter().enumerate() {
            debug!(index, locator = %locator, by_id, "resolving root");
            match self.resolve_root(locator, by_id)? {
                RootLookup::Found { parent, entry } => roots.push((parent, entry)),
                RootLookup::Missing => report.missing.push(locator.clone()),
            }
        }

        let predicate = (!predicate.is_empty()).then_some(&predicate);
        self.run(&roots, &keys, predicate, &mut report)?;
        Ok(report)
    }

    /// List everything matching the source terms within the scope path.
    ///
    /// Titles are matched fuzzily against every term. Each match is walked
    /// from the scope path with no further filtering of its children.
    pub fn list_matches(&mut self) -> Result<ListReport, ListError> {
        let options = self.options;
        let mut predicate = MatchPredicate::from_meta(options.meta.as_ref(), false, options.trash_mode())
            .with_dir_path(options.path.as_str());
        predicate.titles.push(
            Clause::new(MatchMode::Like, options.sources.clone(), Joiner::Or)
                .in_trash(options.trash_mode()),
        );
        debug!(expression = %predicate.expression(), scope = %options.path, "searching");

        let keys = sort_keys(options.meta.as_ref());
        let mut pair = self
            .store
            .find_matches(&predicate, options.page_size, options.hidden);

        let mut report = ListReport::default();
        self.busy.play();
        let outcome = self.walk_matches(&mut pair, &keys, &mut report);
        self.busy.stop();
        report.rendered = self.rendered();
        outcome?;

        if report.roots == 0 {
            warn!("no matches found!");
        }
        Ok(report)
    }

    /// List the shared entries found at each source path.
    pub fn list_shared(&mut self) -> Result<ListReport, ListError> {
        let options = self.options;
        let mut report = ListReport::default();
        let mut roots = Vec::new();
        for locator in &options.sources {
            match self.shared_roots(locator) {
                Ok(found) => roots.extend(found),
                Err(ListError::Lookup { locator, source }) if source.is_not_found() => {
                    warn!("'{}' cannot be found remotely", locator);
                    report.missing.push(locator);
                }
                Err(err) => return Err(err),
            }
        }

        self.run(&roots, &[], None, &mut report)?;
        Ok(report)
    }

    /// Resolve a locator to its starting entry and display parent.
    pub fn resolve_root(&self, locator: &str, by_id: bool) -> Result<RootLookup, ListError> {
        let found = if by_id {
            self.store.find_by_id(locator)
        } else {
            self.store.find_by_path(locator)
        };

        match found {
            Ok(mut entry) => {
                // An id has no path to take a parent from, so it heads its own rows.
                let parent = if by_id {
                    normalize_head(&entry.id)
                } else {
                    parent_display_path(locator)
                };
                if is_remote_root_like(&entry.name) {
                    entry.name.clear();
                }
                Ok(RootLookup::Found { parent, entry })
            }
            Err(err) if err.is_not_found() => {
                warn!("'{}' cannot be found remotely", locator);
                Ok(RootLookup::Missing)
            }
            Err(source) => Err(ListError::Lookup {
                locator: locator.to_string(),
                source,
            }),
        }
    }

    /// Collect the shared entries at `locator` as traversal roots.
    fn shared_roots(&self, locator: &str) -> Result<Vec<Root>, ListError> {
        let parent = parent_display_path(locator);
        let mut pair = self.store.find_by_path_shared(locator);

        let mut roots = Vec::new();
        loop {
            match pair.next_entry() {
                Ok(Some(mut shared)) => {
                    if is_remote_root_like(&shared.name) {
                        shared.name.clear();
                    }
                    roots.push((parent.clone(), shared));
                }
                Ok(None) => return Ok(roots),
                Err(source) => {
                    if !source.is_not_found() {
                        error!(locator = %locator, error = %source, "shared lookup failed");
                    }
                    return Err(ListError::Lookup {
                        locator: locator.to_string(),
                        source,
                    });
                }
            }
        }
    }

    /// Traverse resolved roots in order until one of them stops the listing.
    fn run(
        &mut self,
        roots: &[Root],
        keys: &[String],
        predicate: Option<&MatchPredicate>,
        report: &mut ListReport,
    ) -> Result<(), ListError> {
        self.busy.play();
        let outcome = self.walk_roots(roots, keys, predicate, report);
        self.busy.stop();
        report.rendered = self.rendered();
        outcome
    }

    fn walk_roots(
        &mut self,
        roots: &[Root],
        keys: &[String],
        predicate: Option<&MatchPredicate>,
        report: &mut ListReport,
    ) -> Result<(), ListError> {
        let options = self.options;
        for (parent, entry) in roots {
            report.roots += 1;
            let st = TraversalState::root(entry, parent, options, keys, predicate);
            let visit = self.visit(st)?;
            if !record(visit, report) {
                break;
            }
        }
        Ok(())
    }

    /// Walk each match from the scope path until one stops the listing.
    fn walk_matches(
        &mut self,
        pair: &mut PagePair,
        keys: &[String],
        report: &mut ListReport,
    ) -> Result<(), ListError> {
        let options = self.options;
        while let Some(found) = pair.next_entry()? {
            if self.filter.is_excluded(&found.name) {
                continue;
            }
            report.roots += 1;
            let st = TraversalState::root(&found, &options.path, options, keys, None);
            let visit = self.visit(st)?;
            if !record(visit, report) {
                break;
            }
        }
        Ok(())
    }
}

/// Fold one root's outcome into the report. Returns whether to go on.
fn record(visit: Visit, report: &mut ListReport) -> bool {
    match visit {
        Visit::Done => true,
        Visit::Declined => {
            report.declined = true;
            false
        }
        Visit::Empty => false,
    }
}
