//! Catalog search over registered data assets.
//!
//! The DQ endpoint is the server-side table feed used by the web UI, so the
//! request carries DataTables-style paging and ordering parameters.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::{
    default_search_limit, records_at, require_positive,
};
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

const SEARCH_ENDPOINT: &str = "/v2/getdataassetsarrforserversidewithmultifilters";

/// Parameters for `search_catalog`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchCatalogParams {
    #[schemars(description = "Text to search for in dataset names")]
    pub search_string: String,

    #[schemars(description = "Maximum results to return (default: 50)")]
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone)]
pub struct SearchCatalogTool;

#[async_trait]
impl DqTool for SearchCatalogTool {
    const NAME: &'static str = "search_catalog";

    const DESCRIPTION: &'static str = "Search the data catalog for datasets on the configured connection. \
         Returns matching dataset descriptors.";

    type Params = SearchCatalogParams;

    async fn run(params: SearchCatalogParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_positive("limit", params.limit)?;

        let request = ApiRequest::get(SEARCH_ENDPOINT)
            .query("draw", "3")
            .query("start", "0")
            .query("length", params.limit.to_string())
            .query("search[value]", params.search_string.trim())
            .query("filterPushdownPullup", "1")
            .query("order[0][column]", "0")
            .query("order[0][dir]", "asc")
            .query("filterSource", api.connection());

        let body = api.send(request).await?;
        let datasets: Vec<Value> = records_at(&body, "dataAssetList")?
            .into_iter()
            .take(params.limit as usize)
            .collect();

        let count = datasets.len();
        Ok(ToolOutput::success(Value::Array(datasets)).with_count(count))
    }
}
