use crate::application::similarity_search::SimilaritySearchController;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "sakebrowse", about = "Browse the sake catalog and search by flavor", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Browse the catalog in sorted order
    List {
        #[arg(long, default_value = "0")]
        page: u32,
        /// Sort key (score, name, checkinCount)
        #[arg(long, default_value = "score")]
        sort: String,
        /// Sort direction (asc, desc)
        #[arg(long, default_value = "desc")]
        direction: String,
    },
    /// Keyword search over name, brand and flavour tags
    Search {
        keyword: String,
        #[arg(long, default_value = "0")]
        page: u32,
    },
    /// Products carrying a flavour tag
    Tag {
        tag: String,
        #[arg(long, default_value = "0")]
        page: u32,
    },
    /// Product detail with related recommendations
    Show {
        /// Product ID
        id: String,
    },
    /// Top 10 products
    Top {
        /// Ordering (rank, score)
        #[arg(long, default_value = "score")]
        by: String,
    },
    /// Find products close to a flavor profile
    Flavor {
        /// Start from a preset (balanced, rich, light, dry, sweet, sparkling)
        #[arg(long)]
        preset: Option<String>,
        /// Axis override as KEY=VALUE, e.g. f1=0.8 (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,
        #[arg(long, default_value_t = SimilaritySearchController::DEFAULT_PROFILE_TOP_K)]
        top_k: usize,
    },
    /// Describe what you want in plain words
    Ask {
        query: String,
        #[arg(long, default_value_t = SimilaritySearchController::DEFAULT_TEXT_TOP_K)]
        top_k: usize,
    },
    /// Related products for a product
    Recommend {
        /// Product ID
        id: String,
    },
    /// List the flavor presets, axis by axis
    Presets,
}
