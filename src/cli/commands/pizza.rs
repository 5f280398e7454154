use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_success};
use crate::cli::OutputFormat;
use crate::database::models::NewPizza;
use crate::database::PizzeriaService;

#[derive(Subcommand)]
pub enum PizzaCommands {
    #[command(about = "List all pizzas")]
    List,

    #[command(about = "Add a pizza")]
    Add {
        #[arg(long, help = "Pizza name")]
        name: String,
        #[arg(long, help = "Comma separated ingredients")]
        ingredients: String,
    },

    #[command(about = "Delete a pizza and every menu entry offering it")]
    Delete {
        #[arg(help = "Pizza ID")]
        id: i64,
    },
}

pub async fn handle(
    cmd: PizzaCommands,
    service: &PizzeriaService,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        PizzaCommands::List => {
            let pizzas = service.list_pizzas().await?;
            let rows = pizzas
                .iter()
                .map(|p| format!("{:>4}  {}  [{}]", p.id, p.name, p.ingredients))
                .collect();
            output_collection(
                output_format,
                "pizzas",
                serde_json::to_value(&pizzas)?,
                rows,
                "No pizzas found",
            )
        }
        PizzaCommands::Add { name, ingredients } => {
            let pizza = service.create_pizza(NewPizza::new(name, ingredients)).await?;
            output_success(
                output_format,
                &format!("Added pizza {} ({})", pizza.id, pizza.name),
                Some(json!({ "pizza": pizza })),
            )
        }
        PizzaCommands::Delete { id } => {
            service.delete_pizza(id).await?;
            output_success(output_format, &format!("Deleted pizza {}", id), None)
        }
    }
}
