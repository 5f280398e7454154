use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_collection, output_success};
use crate::cli::OutputFormat;
use crate::database::models::NewRestaurant;
use crate::database::PizzeriaService;

#[derive(Subcommand)]
pub enum RestaurantCommands {
    #[command(about = "List all restaurants")]
    List,

    #[command(about = "Add a restaurant")]
    Add {
        #[arg(long, help = "Restaurant name")]
        name: String,
        #[arg(long, help = "Street address")]
        address: String,
    },

    #[command(about = "Delete a restaurant and its menu entries")]
    Delete {
        #[arg(help = "Restaurant ID")]
        id: i64,
    },
}

pub async fn handle(
    cmd: RestaurantCommands,
    service: &PizzeriaService,
    output_format: &OutputFormat,
) -> anyhow::Result<()> {
    match cmd {
        RestaurantCommands::List => {
            let restaurants = service.list_restaurants().await?;
            let rows = restaurants
                .iter()
                .map(|r| format!("{:>4}  {}  ({})", r.id, r.name, r.address))
                .collect();
            output_collection(
                output_format,
                "restaurants",
                serde_json::to_value(&restaurants)?,
                rows,
                "No restaurants found",
            )
        }
        RestaurantCommands::Add { name, address } => {
            let restaurant = service
                .create_restaurant(NewRestaurant::new(name, address))
                .await?;
            output_success(
                output_format,
                &format!("Added restaurant {} ({})", restaurant.id, restaurant.name),
                Some(json!({ "restaurant": restaurant })),
            )
        }
        RestaurantCommands::Delete { id } => {
            service.delete_restaurant(id).await?;
            output_success(output_format, &format!("Deleted restaurant {}", id), None)
        }
    }
}
