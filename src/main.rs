use clap::Parser;
use sakebrowse::application::flavor_editor::FlavorProfileEditor;
use sakebrowse::cli::commands::{Cli, Commands};
use sakebrowse::config::BrowserConfig;
use sakebrowse::domain::entities::product::ProductId;
use sakebrowse::domain::ports::catalog_port::TopRatedBy;
use sakebrowse::domain::values::flavor_preset::FlavorPreset;
use sakebrowse::domain::values::query_parameters::{SortDirection, SortKey};
use sakebrowse::SakeBrowser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sakebrowse=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let browser = match BrowserConfig::from_env().and_then(|config| SakeBrowser::new(&config)) {
        Ok(browser) => browser,
        Err(e) => {
            eprintln!("Error initializing sakebrowse: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(&browser, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(browser: &SakeBrowser, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    let listing = browser.listing();
    match cmd {
        Commands::List {
            page,
            sort,
            direction,
        } => {
            let key: SortKey = sort.parse()?;
            let dir: SortDirection = direction.parse()?;
            listing.set_sort(key, dir).await?;
            if page > 0 {
                listing.set_page(page).await?;
            }
            print_json(&listing.view())?;
        }
        Commands::Search { keyword, page } => {
            listing.submit_keyword(&keyword).await?;
            if page > 0 {
                listing.set_page(page).await?;
            }
            print_json(&listing.view())?;
        }
        Commands::Tag { tag, page } => {
            listing.set_filter(&tag).await?;
            if page > 0 {
                listing.set_page(page).await?;
            }
            print_json(&listing.view())?;
        }
        Commands::Show { id } => {
            let id = ProductId::new(id)?;
            print_json(&browser.open_product(&id).await?)?;
        }
        Commands::Top { by } => {
            let by: TopRatedBy = by.parse()?;
            print_json(&browser.top_rated(by).await?)?;
        }
        Commands::Flavor {
            preset,
            overrides,
            top_k,
        } => {
            let mut editor = FlavorProfileEditor::new();
            if let Some(name) = preset {
                editor.apply_preset_named(&name)?;
            }
            for pair in &overrides {
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| format!("Expected KEY=VALUE, got {pair}"))?;
                editor.set_dimension_by_key(key, value)?;
            }
            let similarity = browser.similarity();
            similarity.search_by_profile(editor.vector(), top_k).await?;
            print_json(&similarity.view())?;
        }
        Commands::Ask { query, top_k } => {
            let similarity = browser.similarity();
            similarity.search_by_text(&query, top_k).await?;
            print_json(&similarity.view())?;
        }
        Commands::Recommend { id } => {
            let id = ProductId::new(id)?;
            let recommendations = browser.recommendations();
            recommendations.lookup(&id).await?;
            print_json(&recommendations.view())?;
        }
        Commands::Presets => {
            for preset in FlavorPreset::ALL {
                println!("{preset}");
                for (dim, value) in preset.vector().iter() {
                    println!(
                        "  {dim} {:<12} {:<4} {value:.1}",
                        dim.label(),
                        dim.japanese_label()
                    );
                }
            }
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
