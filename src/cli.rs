// src/cli.rs
// =============================================================================
// Command-line interface, built with clap's derive API.
//
// Global options pick the AWS profile and region (falling back to the
// AWS_PROFILE / AWS_REGION environment variables); subcommands pick what
// to do with the repositories they can see.
// =============================================================================

use clap::{Parser, Subcommand};
use std::net::SocketAddr;

use crate::config::ConnectionSettings;
use crate::server::DEFAULT_BIND;

#[derive(Parser, Debug)]
#[command(
    name = "codecommit-explorer",
    version,
    about = "Browse AWS CodeCommit repositories and view their files",
    long_about = "codecommit-explorer lists CodeCommit repositories, prints their folder trees and \
                  shows single files with a syntax-highlighting hint. `serve` opens the same flow \
                  as a local browser page."
)]
pub struct Cli {
    /// AWS profile to load credentials from
    #[arg(long, global = true, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    /// AWS region the repositories live in
    #[arg(long, global = true, env = "AWS_REGION")]
    pub region: Option<String>,

    /// Custom CodeCommit endpoint (e.g. a local emulator)
    #[arg(long, global = true)]
    pub endpoint_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn connection_settings(&self) -> ConnectionSettings {
        ConnectionSettings::new(
            self.profile.clone(),
            self.region.clone(),
            self.endpoint_url.clone(),
        )
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every repository, sorted by name
    Repos {
        /// Output JSON instead of one name per line
        #[arg(long)]
        json: bool,
    },

    /// Print the folder tree of a repository
    ///
    /// Example: codecommit-explorer tree my-service
    Tree {
        /// Repository name
        repository: String,

        /// Output the checkbox-tree JSON instead of an indented listing
        #[arg(long)]
        json: bool,
    },

    /// Show one file of a repository
    ///
    /// Give exactly one path. More than one prints a warning and exits 1;
    /// none prints nothing.
    Show {
        /// Repository name
        repository: String,

        /// Absolute path(s) of the file inside the repository
        paths: Vec<String>,
    },

    /// Serve the browser page
    Serve {
        /// Address to listen on
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: SocketAddr,
    },
}
