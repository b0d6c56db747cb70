//! Compare request/response types.

use serde::{Deserialize, Serialize};

use cfgsrv_core::{Compare, CompareOptions, ComparePartial};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AddCompareRequest {
    pub name: String,
    pub script_name: String,
    pub script: String,
    pub build_script: String,
    pub run_script: String,
    pub run_name: String,
    pub description: String,
}

impl From<AddCompareRequest> for CompareOptions {
    fn from(req: AddCompareRequest) -> Self {
        CompareOptions {
            name: req.name,
            script_name: req.script_name,
            script: req.script,
            build_script: req.build_script,
            run_script: req.run_script,
            run_name: req.run_name,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCompareRequest {
    pub name: Option<String>,
    pub script_name: Option<String>,
    pub script: Option<String>,
    pub build_script: Option<String>,
    pub run_script: Option<String>,
    pub run_name: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateCompareRequest> for ComparePartial {
    fn from(req: UpdateCompareRequest) -> Self {
        ComparePartial {
            name: req.name,
            script_name: req.script_name,
            script: req.script,
            build_script: req.build_script,
            run_script: req.run_script,
            run_name: req.run_name,
            description: req.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareResponse {
    pub id: String,
    pub name: String,
    pub script_name: String,
    pub script: String,
    pub build_script: String,
    pub run_script: String,
    pub run_name: String,
    pub description: String,
}

impl From<Compare> for CompareResponse {
    fn from(cmp: Compare) -> Self {
        CompareResponse {
            id: cmp.id,
            name: cmp.name,
            script_name: cmp.script_name,
            script: cmp.script,
            build_script: cmp.build_script,
            run_script: cmp.run_script,
            run_name: cmp.run_name,
            description: cmp.description,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompareListResponse {
    pub compares: Vec<CompareResponse>,
}
