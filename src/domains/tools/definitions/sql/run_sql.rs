//! Run a SQL query on the configured connection and render the rows as a
//! markdown table.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domains::dq::{ApiRequest, DqApi};
use crate::domains::tools::definitions::common::require_non_empty;
use crate::domains::tools::{DqTool, ToolError, ToolOutput};

/// Rows included in the rendered table and in `data.rows`.
pub const MAX_DISPLAY_ROWS: usize = 10;

/// Parameters for `run_sql`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunSqlParams {
    #[schemars(description = "The SQL query to execute")]
    pub sql: String,
}

#[derive(Debug, Deserialize)]
struct SqlResult {
    schema: Vec<SqlColumn>,
    rows: Vec<Vec<SqlCell>>,
}

#[derive(Debug, Deserialize)]
struct SqlColumn {
    name: String,
}

#[derive(Debug, Deserialize)]
struct SqlCell {
    #[serde(rename = "colValue", default)]
    col_value: Value,
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Render `columns` and `rows` in the "presto" layout:
///
/// ```text
///  id | name
/// ----+------
///  1  | a
/// ```
fn render_table(columns: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                format!(" {:<width$} ", cell, width = *width)
            })
            .collect::<Vec<_>>()
            .join("|")
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(columns));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(w + 2))
            .collect::<Vec<_>>()
            .join("+"),
    );
    lines.extend(rows.iter().map(|row| line(row.as_slice())));
    lines.join("\n")
}

#[derive(Debug, Clone)]
pub struct RunSqlTool;

#[async_trait]
impl DqTool for RunSqlTool {
    const NAME: &'static str = "run_sql";

    const DESCRIPTION: &'static str = "Execute a SQL query on the configured connection \
         and return the results as a markdown table (at most 10 rows shown).";

    type Params = RunSqlParams;

    async fn run(params: RunSqlParams, api: &dyn DqApi) -> Result<ToolOutput, ToolError> {
        require_non_empty("sql", &params.sql)?;

        let body = api
            .send(
                ApiRequest::post("/v2/getsqlresult")
                    .query("sql", params.sql.as_str())
                    .query("cxn", api.connection()),
            )
            .await?;

        let result: SqlResult =
            serde_json::from_value(body).map_err(|e| ToolError::malformed(e.to_string()))?;

        let columns: Vec<String> = result.schema.into_iter().map(|c| c.name).collect();
        let total_rows = result.rows.len();
        let shown: Vec<Vec<String>> = result
            .rows
            .iter()
            .take(MAX_DISPLAY_ROWS)
            .map(|row| row.iter().map(|cell| cell_text(&cell.col_value)).collect())
            .collect();

        let mut display = format!(
            "Results for: `{}`\n\n{}",
            params.sql,
            render_table(&columns, &shown)
        );
        if total_rows > MAX_DISPLAY_ROWS {
            display.push_str(&format!(
                "\n\n*Showing {} of {} rows*",
                MAX_DISPLAY_ROWS, total_rows
            ));
        }

        let data = json!({
            "columns": columns,
            "rows": result
                .rows
                .into_iter()
                .take(MAX_DISPLAY_ROWS)
                .map(|row| row.into_iter().map(|cell| cell.col_value).collect::<Vec<_>>())
                .collect::<Vec<_>>(),
            "totalRows": total_rows,
        });

        Ok(ToolOutput::success(data)
            .with_count(shown.len())
            .with_display(display))
    }
}
