// SPDX-FileCopyrightText: 2026 Briefpilot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Briefpilot - turn marketing campaign briefs into tracker tasks.
//!
//! This is the binary entry point for the Briefpilot pipeline.

mod commands;
mod file_docs;

use clap::{Args, Parser, Subcommand};

/// Briefpilot - turn marketing campaign briefs into tracker tasks.
#[derive(Parser, Debug)]
#[command(name = "briefpilot", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Shared arguments for brief-processing commands.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the brief document (markdown).
    pub document: String,
    /// Project id; defaults to `asana.default_project`.
    #[arg(long)]
    pub project: Option<String>,
    /// Section for standard tasks; defaults to `asana.default_section`.
    #[arg(long)]
    pub section: Option<String>,
    /// Section for RESEND/UPCYCLE tasks; defaults to `asana.rework_section`.
    #[arg(long)]
    pub rework_section: Option<String>,
    /// Model override for brief parsing.
    #[arg(long)]
    pub model: Option<String>,
    /// Assignee id stamped onto every created task.
    #[arg(long)]
    pub assignee: Option<String>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse a brief and create one tracker task per extracted deliverable.
    Run(RunArgs),
    /// Parse a brief and print the task summaries without creating anything.
    Preview(RunArgs),
    /// Check that the project and section are reachable.
    Verify {
        /// Project id; defaults to `asana.default_project`.
        #[arg(long)]
        project: Option<String>,
        /// Section id; defaults to `asana.default_section`.
        #[arg(long)]
        section: Option<String>,
    },
    /// List the custom field definitions of a project.
    Fields {
        /// Project id; defaults to `asana.default_project`.
        #[arg(long)]
        project: Option<String>,
    },
}

fn init_tracing(log_level: &str) {
    // RUST_LOG wins over the configured level.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match briefpilot_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            briefpilot_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    init_tracing(&config.app.log_level);

    let outcome = match &cli.command {
        Commands::Run(args) => commands::run(&config, args, false).await,
        Commands::Preview(args) => commands::run(&config, args, true).await,
        Commands::Verify { project, section } => {
            commands::verify(&config, project.as_deref(), section.as_deref()).await
        }
        Commands::Fields { project } => commands::fields(&config, project.as_deref()).await,
    };

    if let Err(e) = outcome {
        eprintln!("briefpilot: {e}");
        if let Some(hint) = e.remediation() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}
