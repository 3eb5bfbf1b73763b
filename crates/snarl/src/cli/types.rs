//! CLI-facing enum wrappers.
//!
//! clap's `ValueEnum` derive lives on these wrappers so the domain enums
//! stay free of CLI concerns.

use crate::domain::RelationshipKind;
use clap::ValueEnum;

/// Relationship kinds selectable with `--link-types`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LinkTypeArg {
    /// blocks
    Blocks,
    /// is-blocked-by
    IsBlockedBy,
    /// depends-on
    DependsOn,
    /// is-depended-on-by
    IsDependedOnBy,
    /// clones
    Clones,
    /// is-cloned-by
    IsClonedBy,
    /// duplicates
    Duplicates,
    /// is-duplicated-by
    IsDuplicatedBy,
    /// relates-to
    RelatesTo,
}

impl From<LinkTypeArg> for RelationshipKind {
    fn from(arg: LinkTypeArg) -> Self {
        match arg {
            LinkTypeArg::Blocks => Self::Blocks,
            LinkTypeArg::IsBlockedBy => Self::IsBlockedBy,
            LinkTypeArg::DependsOn => Self::DependsOn,
            LinkTypeArg::IsDependedOnBy => Self::IsDependedOnBy,
            LinkTypeArg::Clones => Self::Clones,
            LinkTypeArg::IsClonedBy => Self::IsClonedBy,
            LinkTypeArg::Duplicates => Self::Duplicates,
            LinkTypeArg::IsDuplicatedBy => Self::IsDuplicatedBy,
            LinkTypeArg::RelatesTo => Self::RelatesTo,
        }
    }
}
