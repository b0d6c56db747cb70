//! Language build/run configuration.
//!
//! A [`Language`] is identified by `lowercase(name)_version`. Updates go
//! through [`LanguagePartial`] → [`LanguageUpdate`] → [`SparsePatch`].

use serde::{Deserialize, Serialize};

use crate::entity::{Document, Entity};
use crate::id::derive_language_id;
use crate::patch::SparsePatch;
use crate::reconcile::{reconcile_language, Reconciled};

/// Persisted field names.
pub mod field {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const VERSION: &str = "version";
    pub const BUILD_SCRIPT: &str = "build_script";
    pub const RUN_SCRIPT: &str = "run_script";
}

/// How to build and run submissions for one language version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub version: String,
    /// Empty means the language has no build step.
    #[serde(default)]
    pub build_script: String,
    pub run_script: String,
}

/// Caller-supplied fields for creating a [`Language`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageOptions {
    pub name: String,
    pub version: String,
    pub build_script: String,
    pub run_script: String,
}

/// Any subset of a language's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguagePartial {
    pub name: Option<String>,
    pub version: Option<String>,
    pub build_script: Option<String>,
    pub run_script: Option<String>,
}

/// A partial update with its (possibly recomputed) id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub build_script: Option<String>,
    pub run_script: Option<String>,
}

impl Language {
    pub fn new(opts: LanguageOptions) -> Self {
        Language {
            id: derive_language_id(&opts.name, &opts.version),
            name: opts.name,
            version: opts.version,
            build_script: opts.build_script,
            run_script: opts.run_script,
        }
    }
}

impl LanguagePartial {
    /// True when the partial touches a field the id is derived from.
    pub fn touches_identity(&self) -> bool {
        self.name.is_some() || self.version.is_some()
    }

    /// Fills absent name and version from `stored`, independently.
    pub fn with_identity_from(&self, stored: &Language) -> LanguagePartial {
        LanguagePartial {
            name: Some(self.name.clone().unwrap_or_else(|| stored.name.clone())),
            version: Some(
                self.version
                    .clone()
                    .unwrap_or_else(|| stored.version.clone()),
            ),
            build_script: self.build_script.clone(),
            run_script: self.run_script.clone(),
        }
    }
}

impl LanguageUpdate {
    /// Builds an update; the id is recomputed only when both name and
    /// version are present.
    pub fn new(partial: &LanguagePartial) -> Self {
        let id = match (&partial.name, &partial.version) {
            (Some(name), Some(version)) => Some(derive_language_id(name, version)),
            _ => None,
        };
        LanguageUpdate {
            id,
            name: partial.name.clone(),
            version: partial.version.clone(),
            build_script: partial.build_script.clone(),
            run_script: partial.run_script.clone(),
        }
    }

    /// Every present field, keyed by persisted name.
    pub fn to_patch(&self) -> SparsePatch {
        let mut patch = SparsePatch::new();
        patch.push_present(field::ID, self.id.as_ref());
        patch.push_present(field::NAME, self.name.as_ref());
        patch.push_present(field::VERSION, self.version.as_ref());
        patch.push_present(field::BUILD_SCRIPT, self.build_script.as_ref());
        patch.push_present(field::RUN_SCRIPT, self.run_script.as_ref());
        patch
    }

    /// `base` with every present field of this update laid over it.
    pub fn overlay(&self, base: &Language) -> Language {
        Language {
            id: self.id.clone().unwrap_or_else(|| base.id.clone()),
            name: self.name.clone().unwrap_or_else(|| base.name.clone()),
            version: self.version.clone().unwrap_or_else(|| base.version.clone()),
            build_script: self
                .build_script
                .clone()
                .unwrap_or_else(|| base.build_script.clone()),
            run_script: self
                .run_script
                .clone()
                .unwrap_or_else(|| base.run_script.clone()),
        }
    }
}

impl Document for Language {
    const COLLECTION: &'static str = "languages";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Language {
    type Options = LanguageOptions;
    type Partial = LanguagePartial;

    fn create(options: LanguageOptions) -> Self {
        Language::new(options)
    }

    fn reconcile(&self, partial: &LanguagePartial) -> Reconciled<Self> {
        reconcile_language(self, partial)
    }
}
