//! Partial-update reconciliation.
//!
//! Given the stored snapshot and a caller's partial update, produces the
//! sparse patch to persist and the full record the caller gets back.
//!
//! Identity inputs missing from the partial are backfilled from the stored
//! record before the id is derived, so a new id never mixes a fresh name
//! with a stale version (or vice versa). Backfilled values are only used for
//! derivation; the patch carries exactly what the caller sent, plus `id`
//! when an identity-affecting field was sent.

use crate::compare::{Compare, ComparePartial, CompareUpdate};
use crate::entity::Document;
use crate::language::{Language, LanguagePartial, LanguageUpdate};
use crate::patch::SparsePatch;

/// Outcome of merging a partial update into a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled<D: Document> {
    /// Fields to write, matched against the pre-update id.
    pub patch: SparsePatch,
    /// The record as it reads after the patch is applied.
    pub updated: D,
}

pub fn reconcile_language(stored: &Language, partial: &LanguagePartial) -> Reconciled<Language> {
    let derived = LanguageUpdate::new(&partial.with_identity_from(stored));

    let mut update = LanguageUpdate::new(partial);
    update.id = if partial.touches_identity() {
        derived.id
    } else {
        None
    };

    Reconciled {
        patch: update.to_patch(),
        updated: update.overlay(stored),
    }
}

pub fn reconcile_compare(stored: &Compare, partial: &ComparePartial) -> Reconciled<Compare> {
    let derived = CompareUpdate::new(&partial.with_identity_from(stored));

    let mut update = CompareUpdate::new(partial);
    update.id = if partial.touches_identity() {
        derived.id
    } else {
        None
    };

    Reconciled {
        patch: update.to_patch(),
        updated: update.overlay(stored),
    }
}
