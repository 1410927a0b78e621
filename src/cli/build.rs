//! Compile a JSON grid request into an expression body

use tracing::debug;

use super::CliError;
use crate::{
    ast::Expression,
    builder::LambdaBuilder,
    output::{to_json, to_json_pretty, to_pure, to_pure_pretty},
    request::TdsRequest,
};

/// Rendering of the compiled body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Protocol JSON, an array of expressions
    #[default]
    Json,
    /// Pure text, one expression per line
    Pure,
}

/// Options for the build command
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Grid request as JSON
    pub request: Option<String>,
    /// Base body as a JSON array of expressions; [`default_body`] when absent
    pub body: Option<String>,
    pub format: OutputFormat,
    pub pretty: bool,
    /// Overrides the row variable bound by generated lambdas
    pub row_variable: Option<String>,
    /// Overrides the variable bound by aggregation reducers
    pub aggregation_variable: Option<String>,
}

/// Body used when none is supplied: a single `$data` anchor.
pub fn default_body() -> Vec<Expression> {
    vec![Expression::var("data")]
}

/// Execute a build operation, returning the rendered body
pub fn execute_build(options: &BuildOptions) -> Result<String, CliError> {
    let request_json = options.request.as_ref().ok_or(CliError::NoInput)?;
    let request: TdsRequest = serde_json::from_str(request_json)?;

    let body = match &options.body {
        Some(json) => serde_json::from_str::<Vec<Expression>>(json)?,
        None => default_body(),
    };

    let mut builder = LambdaBuilder::default();
    if let Some(name) = &options.row_variable {
        builder = builder.with_row_variable(name);
    }
    if let Some(name) = &options.aggregation_variable {
        builder = builder.with_aggregation_variable(name);
    }
    debug!(?builder, "building lambda body");

    let expressions = builder.build(body, &request)?;

    let rendered = match (options.format, options.pretty) {
        (OutputFormat::Json, false) => to_json(&expressions)?,
        (OutputFormat::Json, true) => to_json_pretty(&expressions)?,
        (OutputFormat::Pure, pretty) => {
            let render = if pretty { to_pure_pretty } else { to_pure };
            expressions.iter().map(render).collect::<Vec<_>>().join("\n")
        }
    };
    Ok(rendered)
}
