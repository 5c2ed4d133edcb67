use crate::server;
use clap::{Args, Parser, Subcommand};
use ringvisit::config::AppConfig;
use ringvisit::error::AppError;
use ringvisit::seo::{Page, SeoCatalog};

#[derive(Parser, Debug)]
#[command(
    name = "RingVisit Lead Intake",
    about = "Serve the RingVisit lead-capture API and inspect page metadata",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the head metadata and JSON-LD documents for a page
    Seo(SeoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct SeoArgs {
    /// Page slug: home, contact, partner, privacy, terms, accessibility
    pub(crate) page: String,
    /// Public site origin used in structured data (defaults to configuration)
    #[arg(long)]
    pub(crate) base_url: Option<String>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seo(args) => print_page_bundle(args),
    }
}

fn print_page_bundle(args: SeoArgs) -> Result<(), AppError> {
    let page =
        Page::from_slug(&args.page).ok_or_else(|| AppError::UnknownPage(args.page.clone()))?;

    let mut site = AppConfig::load()?.site;
    if let Some(base_url) = args.base_url {
        site.base_url = base_url.trim_end_matches('/').to_string();
    }

    let bundle = SeoCatalog::new(site).bundle(page);
    println!("{}", serde_json::to_string_pretty(&bundle)?);
    Ok(())
}
