//! Compare-task configuration: the checker script that judges a
//! submission's output, plus how to build and run it.

use serde::{Deserialize, Serialize};

use crate::entity::{Document, Entity};
use crate::id::derive_compare_id;
use crate::patch::SparsePatch;
use crate::reconcile::{reconcile_compare, Reconciled};

/// Persisted field names.
pub mod field {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const SCRIPT_NAME: &str = "script_name";
    pub const SCRIPT: &str = "script";
    pub const BUILD_SCRIPT: &str = "build_script";
    pub const RUN_SCRIPT: &str = "run_script";
    pub const RUN_NAME: &str = "run_name";
    pub const DESCRIPTION: &str = "description";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compare {
    pub id: String,
    pub name: String,
    /// File name the comparison script is written to.
    pub script_name: String,
    pub script: String,
    #[serde(default)]
    pub build_script: String,
    pub run_script: String,
    /// File name of the run artifact.
    pub run_name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareOptions {
    pub name: String,
    pub script_name: String,
    pub script: String,
    pub build_script: String,
    pub run_script: String,
    pub run_name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparePartial {
    pub name: Option<String>,
    pub script_name: Option<String>,
    pub script: Option<String>,
    pub build_script: Option<String>,
    pub run_script: Option<String>,
    pub run_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareUpdate {
    pub id: Option<String>,
    pub name: Option<String>,
    pub script_name: Option<String>,
    pub script: Option<String>,
    pub build_script: Option<String>,
    pub run_script: Option<String>,
    pub run_name: Option<String>,
    pub description: Option<String>,
}

impl Compare {
    pub fn new(opts: CompareOptions) -> Self {
        Compare {
            id: derive_compare_id(&opts.name),
            name: opts.name,
            script_name: opts.script_name,
            script: opts.script,
            build_script: opts.build_script,
            run_script: opts.run_script,
            run_name: opts.run_name,
            description: opts.description,
        }
    }
}

impl ComparePartial {
    pub fn touches_identity(&self) -> bool {
        self.name.is_some()
    }

    /// Fills an absent name from `stored`.
    pub fn with_identity_from(&self, stored: &Compare) -> ComparePartial {
        ComparePartial {
            name: Some(self.name.clone().unwrap_or_else(|| stored.name.clone())),
            ..self.clone()
        }
    }
}

impl CompareUpdate {
    /// Builds an update; the id is recomputed when a name is present.
    pub fn new(partial: &ComparePartial) -> Self {
        CompareUpdate {
            id: partial.name.as_deref().map(derive_compare_id),
            name: partial.name.clone(),
            script_name: partial.script_name.clone(),
            script: partial.script.clone(),
            build_script: partial.build_script.clone(),
            run_script: partial.run_script.clone(),
            run_name: partial.run_name.clone(),
            description: partial.description.clone(),
        }
    }

    pub fn to_patch(&self) -> SparsePatch {
        let mut patch = SparsePatch::new();
        patch.push_present(field::ID, self.id.as_ref());
        patch.push_present(field::NAME, self.name.as_ref());
        patch.push_present(field::SCRIPT_NAME, self.script_name.as_ref());
        patch.push_present(field::SCRIPT, self.script.as_ref());
        patch.push_present(field::BUILD_SCRIPT, self.build_script.as_ref());
        patch.push_present(field::RUN_SCRIPT, self.run_script.as_ref());
        patch.push_present(field::RUN_NAME, self.run_name.as_ref());
        patch.push_present(field::DESCRIPTION, self.description.as_ref());
        patch
    }

    pub fn overlay(&self, base: &Compare) -> Compare {
        fn pick(update: &Option<String>, stored: &str) -> String {
            update.clone().unwrap_or_else(|| stored.to_string())
        }

        Compare {
            id: pick(&self.id, &base.id),
            name: pick(&self.name, &base.name),
            script_name: pick(&self.script_name, &base.script_name),
            script: pick(&self.script, &base.script),
            build_script: pick(&self.build_script, &base.build_script),
            run_script: pick(&self.run_script, &base.run_script),
            run_name: pick(&self.run_name, &base.run_name),
            description: pick(&self.description, &base.description),
        }
    }
}

impl Document for Compare {
    const COLLECTION: &'static str = "compares";

    fn id(&self) -> &str {
        &self.id
    }
}

impl Entity for Compare {
    type Options = CompareOptions;
    type Partial = ComparePartial;

    fn create(options: CompareOptions) -> Self {
        Compare::new(options)
    }

    fn reconcile(&self, partial: &ComparePartial) -> Reconciled<Self> {
        reconcile_compare(self, partial)
    }
}
