mod render;

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use api::{
    alerts::{AlertsView, DateRange},
    client::{AlertsClient, ProductsClient},
    models::product::{CreateProductRequest, Product, UpdateProductRequest},
};
use auth::{
    client::{AuthClient, ClientError},
    session::SessionManager,
};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use common::{Settings, Store, store::open_store, telemetry};
use tracing::warn;
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about = "Alerts and products console")]
struct Args {
    #[arg(long, global = true, help = "Configuration file", value_name = "PATH")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show whether the stored session is still valid
    Status,
    /// List alerts one page at a time
    Alerts {
        #[arg(long, default_value_t = 1, help = "Page to show (1-based)")]
        page: usize,
        #[arg(long, help = "Alerts per page")]
        page_size: Option<usize>,
        #[arg(long, help = "Earliest alert date (YYYY-MM-DD)", value_name = "DATE")]
        from: Option<NaiveDate>,
        #[arg(long, help = "Latest alert date (YYYY-MM-DD)", value_name = "DATE")]
        to: Option<NaiveDate>,
    },
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand, Debug)]
enum ProductAction {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
    },
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
    },
    Delete {
        id: Uuid,
    },
}

type Sessions = SessionManager<Arc<dyn Store>>;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let settings = match &args.config {
        Some(path) => Settings::load_from(path)?,
        None => Settings::load()?,
    };
    telemetry::init(&settings.log.level);

    let store = open_store(&settings.store).context("Failed to open session store")?;
    let sessions = SessionManager::new(store);

    match args.command {
        Command::Login { username, password } => {
            let client = AuthClient::new(&settings.auth.base_url);
            client.login(&sessions, &username, &password).await?;
            println!("Logged in as {}", username.trim());
            print_status(&sessions);
        }
        Command::Logout => {
            AuthClient::new(&settings.auth.base_url).logout(&sessions)?;
            println!("Logged out");
        }
        Command::Status => print_status(&sessions),
        Command::Alerts {
            page,
            page_size,
            from,
            to,
        } => {
            let range = DateRange::new(from, to);
            if range.is_inverted() {
                bail!("--from must not be after --to");
            }

            let token = bearer_token(&sessions)?;
            let records = AlertsClient::new(&settings.api.base_url)
                .fetch_alerts(&token)
                .await?;

            let mut view = AlertsView::new(records, page_size.unwrap_or(settings.api.page_size));
            view.set_range(range);
            if page != view.paginator().current_page() && !view.paginator_mut().go_to_page(page) {
                warn!(
                    "Page {} is out of range, showing page {}",
                    page,
                    view.paginator().current_page()
                );
            }

            println!("{}", render::render_view(&view));
        }
        Command::Products { action } => {
            let token = bearer_token(&sessions)?;
            run_product_action(&ProductsClient::new(&settings.api.base_url), &token, action)
                .await?;
        }
    }

    Ok(())
}

fn bearer_token(sessions: &Sessions) -> Result<String> {
    sessions
        .bearer_token()
        .ok_or(ClientError::NotAuthenticated)
        .context("Run `console login` first")
}

fn print_status(sessions: &Sessions) {
    let now = Utc::now();
    match sessions.expires_at(now) {
        Some(expires_at) => println!("Session valid until {}", expires_at.to_rfc3339()),
        None => println!("Not logged in"),
    }
}

fn print_product(product: &Product) {
    println!(
        "{}  {:<24} {:>10.2} x{:<5} {}",
        product.id, product.name, product.price, product.quantity, product.description
    );
}

async fn run_product_action(
    client: &ProductsClient,
    token: &str,
    action: ProductAction,
) -> Result<()> {
    match action {
        ProductAction::List => {
            let products = client.list(token).await?;
            if products.is_empty() {
                println!("No products");
            }
            products.iter().for_each(print_product);
        }
        ProductAction::Add {
            name,
            price,
            description,
            quantity,
        } => {
            let payload = CreateProductRequest {
                name,
                description,
                price,
                quantity,
            };
            print_product(&client.create(token, &payload).await?);
        }
        ProductAction::Update {
            id,
            name,
            price,
            description,
            quantity,
        } => {
            let payload = UpdateProductRequest {
                name,
                description,
                price,
                quantity,
            };
            print_product(&client.update(token, id, &payload).await?);
        }
        ProductAction::Delete { id } => {
            client.delete(token, id).await?;
            println!("Deleted product {}", id);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_alerts_arguments_parse() {
        let args = Args::parse_from([
            "console",
            "alerts",
            "--page",
            "3",
            "--from",
            "2024-03-01",
            "--to",
            "2024-03-31",
        ]);

        match args.command {
            Command::Alerts {
                page,
                page_size,
                from,
                to,
            } => {
                assert_eq!(page, 3);
                assert_eq!(page_size, None);
                assert_eq!(from, NaiveDate::from_ymd_opt(2024, 3, 1));
                assert_eq!(to, NaiveDate::from_ymd_opt(2024, 3, 31));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_bad_date_is_rejected() {
        assert!(Args::try_parse_from(["console", "alerts", "--from", "March"]).is_err());
    }
}
