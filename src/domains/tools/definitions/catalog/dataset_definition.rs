//! Stored configuration of a dataset.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::require_non_empty;
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Parameters for `get_dataset_definition`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDatasetDefinitionParams {
    #[schemars(description = "Dataset name")]
    pub dataset: String,
}

#[derive(Debug, Clone)]
pub struct GetDatasetDefinitionTool;

#[async_trait]
impl DqTool for GetDatasetDefinitionTool {
    const NAME: &'static str = "get_dataset_definition";

    const DESCRIPTION: &'static str = "Get the configuration/definition for a dataset, \
         including connection, query and settings.";

    type Params = GetDatasetDefinitionParams;

    async fn run(
        params: GetDatasetDefinitionParams,
        api: &dyn DqApi,
    ) -> Result<ToolOutput, ToolError> {
        require_non_empty("dataset", &params.dataset)?;

        let definition = api
            .send(ApiRequest::get("/v2/owl-options/get").query("dataset", params.dataset))
            .await?;

        Ok(ToolOutput::success(definition))
    }
}
