//! Query expressions for directory listings

use crate::entry::{Entry, FOLDER_MIME_TYPE};
use crate::mask::TypeMask;

use super::predicate::MatchPredicate;

/// Base expression selecting the children of `parent_id` under `mask`.
///
/// Trash listings ignore the parent: the remote has no hierarchy for trashed
/// entries, so everything in the trash is returned at once.
pub fn build_expression(parent_id: &str, mask: TypeMask, in_trash: bool) -> String {
    let mut parts = Vec::new();

    if in_trash || mask.in_trash() {
        parts.push("trashed=true".to_string());
    } else {
        parts.push(format!("'{}' in parents", parent_id));
        parts.push("trashed=false".to_string());
    }

    parts.extend(MaskConstraint::for_mask(mask).map(MaskConstraint::expression));
    parts.join(" and ")
}

/// A restriction a type mask places on every listed entry.
///
/// Remote sources render these into the query; in-process sources test
/// entries against them with `admits`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskConstraint {
    Folder,
    NonFolder,
    Shared,
    Starred,
}

impl MaskConstraint {
    const ALL: [MaskConstraint; 4] = [
        MaskConstraint::Folder,
        MaskConstraint::NonFolder,
        MaskConstraint::Shared,
        MaskConstraint::Starred,
    ];

    /// The constraints `mask` asks for, in query order.
    pub fn for_mask(mask: TypeMask) -> impl Iterator<Item = MaskConstraint> {
        Self::ALL.into_iter().filter(move |c| match c {
            MaskConstraint::Folder => mask.directories_only(),
            MaskConstraint::NonFolder => mask.non_folders_only(),
            MaskConstraint::Shared => mask.shared(),
            MaskConstraint::Starred => mask.starred(),
        })
    }

    pub fn expression(self) -> String {
        match self {
            MaskConstraint::Folder => format!("mimeType = '{}'", FOLDER_MIME_TYPE),
            MaskConstraint::NonFolder => format!("mimeType != '{}'", FOLDER_MIME_TYPE),
            MaskConstraint::Shared => "sharedWithMe=true".to_string(),
            MaskConstraint::Starred => "starred=true".to_string(),
        }
    }

    pub fn admits(self, entry: &Entry) -> bool {
        match self {
            MaskConstraint::Folder => entry.is_dir,
            MaskConstraint::NonFolder => !entry.is_dir,
            MaskConstraint::Shared => entry.shared,
            MaskConstraint::Starred => entry.starred,
        }
    }
}

/// Join the non-empty parts with `sep`.
pub fn sep_join_non_empty(sep: &str, parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(sep)
}

/// One directory-children request handed to a page source.
///
/// Page sources that speak the remote query language send `expression()`;
/// in-process sources may evaluate the structured fields directly.
#[derive(Debug, Clone, Copy)]
pub struct ListQuery<'a> {
    pub parent_id: &'a str,
    pub mask: TypeMask,
    pub in_trash: bool,
    pub predicate: Option<&'a MatchPredicate>,
}

impl<'a> ListQuery<'a> {
    pub fn children_of(parent_id: &'a str, mask: TypeMask, in_trash: bool) -> Self {
        Self {
            parent_id,
            mask,
            in_trash,
            predicate: None,
        }
    }

    pub fn with_predicate(mut self, predicate: Option<&'a MatchPredicate>) -> Self {
        self.predicate = predicate;
        self
    }

    pub fn is_trash(&self) -> bool {
        self.in_trash || self.mask.in_trash()
    }

    /// The full query: the parenthesised base clause conjoined with the
    /// predicate's own expression when it has one.
    pub fn expression(&self) -> String {
        let base = build_expression(self.parent_id, self.mask, self.in_trash);
        match self.predicate {
            Some(predicate) => {
                let base = format!("({})", base);
                let extra = predicate.expression();
                sep_join_non_empty(" and ", &[base.as_str(), extra.as_str()])
            }
            None => base,
        }
    }
}
