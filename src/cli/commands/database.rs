use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::database::PizzeriaService;

/// Schema creation already ran when the store was opened
pub fn migrate(output_format: &OutputFormat) -> anyhow::Result<()> {
    output_success(output_format, "Database schema is up to date", None)
}

pub async fn seed(service: &PizzeriaService, output_format: &OutputFormat) -> anyhow::Result<()> {
    let summary = service.seed().await?;
    output_success(
        output_format,
        &format!(
            "Seeded {} restaurants, {} pizzas and {} restaurant pizzas",
            summary.restaurants, summary.pizzas, summary.restaurant_pizzas
        ),
        Some(json!({ "seeded": summary })),
    )
}
