pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{CatalogMode, Config};

#[derive(Parser)]
#[command(name = "quire")]
#[command(about = "Browse OPDS catalogs and send books to a chat", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/quire/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// User id sent with catalog requests
    #[arg(long, global = true)]
    pub uid: Option<String>,

    /// Session token sent in the session header
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Read this OPDS catalog directly instead of going through the backend
    #[arg(long, global = true, value_name = "ROOT_URL")]
    pub direct: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Browse interactively (default)
    Browse,
    /// Print a catalog page, auto-descending from the root when no URL is given
    Feed {
        /// Catalog href to load
        url: Option<String>,
    },
    /// Search the catalog
    Search {
        /// Search terms
        query: String,
    },
    /// Show admin status and download destinations
    Admin,
}

impl Cli {
    /// Fold command-line overrides into the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(uid) = &self.uid {
            config.session.uid = Some(uid.clone());
        }
        if let Some(token) = &self.token {
            config.backend.session_token = Some(token.clone());
        }
        if let Some(root) = &self.direct {
            config.catalog.mode = CatalogMode::Opds;
            config.catalog.root_url = Some(root.clone());
        }
    }

    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Browse)
    }
}
