pub mod json;
pub mod md;

use crate::error::GuardError;
use crate::types::report::EvaluationReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &EvaluationReport, format: OutputFormat) -> Result<String, GuardError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(GuardError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}
