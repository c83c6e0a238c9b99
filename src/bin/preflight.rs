use recipe_catalog::infra::{self, config::Config, logging};
use recipe_catalog::domain::catalog::{self, RecipeFilter};

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Reads env vars (or .env):\n\
           RECIPE_STORE, DATABASE_URL, BIND_ADDR, STORE_TIMEOUT_SECS, DB_MAX_CONNECTIONS\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let config = Config::from_env()?;
    println!("> Preflight:");
    println!("  RECIPE_STORE={:?}", config.store);
    println!("  BIND_ADDR={}", config.bind_addr);
    println!("  STORE_TIMEOUT_SECS={}", config.store_timeout.as_secs());

    let repository = infra::open_repository(&config).await?;
    repository.ping().await?;
    println!("  Store reachable ({}).", repository.store().kind());

    let recipes = repository.list().await?;
    let categories = repository.categories().await?;
    println!("  Recipes: {}", recipes.len());
    for category in &categories {
        let filter = RecipeFilter::new(Some(category.as_str()), "");
        let count = catalog::filter(&recipes, &filter).len();
        println!("    {}: {}", category, count);
    }

    println!("> Preflight OK.");
    Ok(())
}
