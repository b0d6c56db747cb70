//! Language request/response types.

use serde::{Deserialize, Serialize};

use cfgsrv_core::{Language, LanguageOptions, LanguagePartial};

/// Request to add a language. Missing fields default to empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddLanguageRequest {
    pub name: String,
    pub version: String,
    pub build_script: String,
    pub run_script: String,
}

impl From<AddLanguageRequest> for LanguageOptions {
    fn from(req: AddLanguageRequest) -> Self {
        LanguageOptions {
            name: req.name,
            version: req.version,
            build_script: req.build_script,
            run_script: req.run_script,
        }
    }
}

/// Partial update. Omitted (or `null`) fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLanguageRequest {
    pub name: Option<String>,
    pub version: Option<String>,
    pub build_script: Option<String>,
    pub run_script: Option<String>,
}

impl From<UpdateLanguageRequest> for LanguagePartial {
    fn from(req: UpdateLanguageRequest) -> Self {
        LanguagePartial {
            name: req.name,
            version: req.version,
            build_script: req.build_script,
            run_script: req.run_script,
        }
    }
}

/// A full language record.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageResponse {
    pub id: String,
    pub name: String,
    pub version: String,
    pub build_script: String,
    pub run_script: String,
}

impl From<Language> for LanguageResponse {
    fn from(lang: Language) -> Self {
        LanguageResponse {
            id: lang.id,
            name: lang.name,
            version: lang.version,
            build_script: lang.build_script,
            run_script: lang.run_script,
        }
    }
}

/// Query flags for `GET /languages`.
///
/// Runners usually only need the id and scripts, so name and version are
/// left out unless asked for.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct ListLanguagesQuery {
    pub include_name: bool,
    pub include_version: bool,
}

/// A language in a listing, with optional projected fields.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageView {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    pub build_script: String,
    pub run_script: String,
}

impl LanguageView {
    pub fn project(lang: Language, query: ListLanguagesQuery) -> Self {
        LanguageView {
            id: lang.id,
            name: query.include_name.then_some(lang.name),
            version: query.include_version.then_some(lang.version),
            build_script: lang.build_script,
            run_script: lang.run_script,
        }
    }
}

/// Response for listing all languages.
#[derive(Debug, Clone, Serialize)]
pub struct LanguageListResponse {
    pub languages: Vec<LanguageView>,
}
