use clap::{Parser, Subcommand};

mod cart;
mod catalog;
mod config;
mod ui;
mod view;

use catalog::{categories, CatalogClient, Pager};
use config::{Overrides, Settings};
use is_terminal::IsTerminal;

#[derive(Parser)]
#[command(
    name = "shopfront",
    version,
    about = "An interactive terminal browser for paginated product catalog APIs",
    long_about = "Browse, search, and filter a DummyJSON-compatible product catalog from the terminal, with infinite scroll and an in-memory cart."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Initial search term
    #[arg(long, short, global = true)]
    search: Option<String>,

    /// Category slug to filter by ("all" disables the filter)
    #[arg(long, short, global = true)]
    category: Option<String>,

    /// Sort mode: none|price-asc|price-desc|rating-asc|rating-desc
    #[arg(long, global = true)]
    sort: Option<String>,

    /// Catalog API root (also via SHOPFRONT_API_BASE)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Initial colour theme: light|dark (also via SHOPFRONT_THEME)
    #[arg(long, global = true)]
    theme: Option<String>,

    /// Output in JSON format (list/categories)
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive catalog browser (default)
    Browse,
    /// Fetch and print catalog pages non-interactively
    List {
        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Print the available category slugs
    Categories,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    }

    let settings = config::resolve(&Overrides {
        base_url: cli.base_url.clone(),
        search: cli.search.clone(),
        category: cli.category.clone(),
        sort: cli.sort.clone(),
        theme: cli.theme.clone(),
    });

    match cli.command {
        None | Some(Commands::Browse) => {
            if !std::io::stdout().is_terminal() {
                eprintln!("The browser needs a terminal; use `shopfront list` for scripted output.");
                std::process::exit(1);
            }
            match ui::run(&settings).await {
                Ok(cart) => print_cart_summary(&cart),
                Err(e) => {
                    eprintln!("UI error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::List { pages }) => {
            if let Err(e) = handle_list(&settings, pages, cli.json).await {
                eprintln!("List error: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Categories) => {
            handle_categories(&settings, cli.json).await;
        }
    }
}

/// Fetch up to `pages` pages for the configured query and print the reduced
/// view.
async fn handle_list(settings: &Settings, pages: usize, json: bool) -> anyhow::Result<()> {
    let client = CatalogClient::new(&settings.base_url);
    let mut pager = Pager::new(settings.initial_query());

    for _ in 0..pages {
        if !pager.has_more() {
            break;
        }
        pager.load_next_page(&client).await;
        if let Some(err) = pager.error() {
            anyhow::bail!("{err}");
        }
    }

    let visible = view::visible_products(pager.products(), &settings.search, settings.sort);

    if json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    for product in &visible {
        println!(
            "{:>6}  {:<50} ${:>9.2}  ★{:>3.1}  {}",
            product.id, product.title, product.price, product.rating, product.category
        );
    }
    match pager.total() {
        Some(total) => println!("-- {} of {} product(s)", visible.len(), total),
        None => println!("-- {} product(s)", visible.len()),
    }
    Ok(())
}

async fn handle_categories(settings: &Settings, json: bool) {
    let client = CatalogClient::new(&settings.base_url);
    let slugs = categories::fetch_slugs(&client).await;

    if json {
        // Serializing a Vec<String> cannot fail.
        println!("{}", serde_json::to_string_pretty(&slugs).unwrap_or_default());
        return;
    }
    for slug in &slugs {
        println!("{slug}");
    }
}

fn print_cart_summary(cart: &cart::Cart) {
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }
    println!("Cart:");
    for entry in cart.entries() {
        println!(
            "  {:>3} × {:<50} ${:>9.2}",
            entry.quantity,
            entry.product.title,
            entry.line_total()
        );
    }
    println!(
        "  {} item(s), total ${:.2}",
        cart.total_items(),
        cart.total_price()
    );
}
