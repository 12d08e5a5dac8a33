//! Per-call traversal state

use crate::entry::Entry;
use crate::mask::TypeMask;
use crate::query::MatchPredicate;

use super::config::ListOptions;

/// Everything one traversal call needs to know about the branch it visits.
///
/// A fresh state is built for every directory descended into; nothing here
/// is mutated once the call has started.
#[derive(Debug, Clone, Copy)]
pub struct TraversalState<'a> {
    pub entry: &'a Entry,
    /// Display path of the directory containing `entry`.
    pub head_path: &'a str,
    /// Remaining levels: negative is unbounded, zero stops before descending.
    pub depth: i64,
    pub mask: TypeMask,
    pub in_trash: bool,
    pub explicit_no_prompt: bool,
    pub sort_keys: &'a [String],
    /// Filter applied to every listed child.
    pub predicate: Option<&'a MatchPredicate>,
    /// Set only for the starting entry of a traversal.
    pub is_root: bool,
}

impl<'a> TraversalState<'a> {
    /// State for the starting entry of a traversal.
    pub fn root(
        entry: &'a Entry,
        head_path: &'a str,
        options: &ListOptions,
        sort_keys: &'a [String],
        predicate: Option<&'a MatchPredicate>,
    ) -> Self {
        Self {
            entry,
            head_path,
            depth: options.depth,
            mask: options.type_mask,
            in_trash: options.trash_mode(),
            explicit_no_prompt: options.no_prompt,
            sort_keys,
            predicate,
            is_root: true,
        }
    }

    /// State for a child directory, inheriting everything but the entry,
    /// the head path and the depth budget.
    pub fn child<'b>(&self, entry: &'b Entry, head_path: &'b str, depth: i64) -> TraversalState<'b>
    where
        'a: 'b,
    {
        TraversalState {
            entry,
            head_path,
            depth,
            mask: self.mask,
            in_trash: self.in_trash,
            explicit_no_prompt: self.explicit_no_prompt,
            sort_keys: self.sort_keys,
            predicate: self.predicate,
            is_root: false,
        }
    }
}
