//! Visual contract code generator CLI.
//!
//! Provides the `blockforge` binary with subcommands for working with
//! contract graph snapshots. `generate` uses the same orchestrator as a
//! hosting site would, so generation behavior is identical from both entry
//! points.
//!
//! Exit codes: 0 = success / clean, 1 = warnings found, 2 = unreadable input.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use blockforge_core::{BlockCatalog, ContractGraph, Language};
use blockforge_generate::{
    BackendPreference, HttpBackend, HttpBackendConfig, Orchestrator,
};
use blockforge_storage::{import_graph, parse_snapshot};

/// Visual contract code generator tools.
#[derive(Parser)]
#[command(name = "blockforge", about = "Visual contract code generator tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the built-in block palette.
    Catalog {
        /// Display language: en, ru.
        #[arg(short, long, default_value = "en")]
        lang: String,
    },

    /// Validate a snapshot file and print every issue found.
    Validate {
        /// Path to the snapshot JSON file.
        #[arg(short, long)]
        snapshot: PathBuf,
    },

    /// Generate contract source from a snapshot file.
    Generate {
        /// Path to the snapshot JSON file.
        #[arg(short, long)]
        snapshot: PathBuf,

        /// Output language: en, ru.
        #[arg(short, long, default_value = "en")]
        lang: String,

        /// Base URL of an OpenAI-compatible remote backend. When absent,
        /// generation is local-only.
        #[arg(long)]
        remote_url: Option<String>,

        /// Bearer token for the remote backend.
        #[arg(long, default_value = "")]
        api_key: String,

        /// Model identifier for the remote backend.
        #[arg(long, default_value = "gpt-4o-mini")]
        model: String,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let exit_code = match cli.command {
        Commands::Catalog { lang } => run_catalog(&lang),
        Commands::Validate { snapshot } => run_validate(&snapshot),
        Commands::Generate {
            snapshot,
            lang,
            remote_url,
            api_key,
            model,
        } => run_generate(&snapshot, &lang, remote_url, api_key, model).await,
    };
    process::exit(exit_code);
}

fn parse_lang(tag: &str) -> Result<Language, i32> {
    tag.parse::<Language>().map_err(|err| {
        eprintln!("Error: {}", err);
        2
    })
}

/// Reads and imports a snapshot, printing accumulated warnings.
/// Returns the graph and whether any warnings were printed.
fn load_graph(path: &Path) -> Result<(ContractGraph, bool), i32> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            eprintln!("Error: failed to read '{}': {}", path.display(), err);
            return Err(2);
        }
    };
    let (snapshot, parse_warnings) = match parse_snapshot(&json) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("Error: {}", err);
            return Err(2);
        }
    };
    let (graph, import_warnings) = import_graph(&snapshot, BlockCatalog::global());

    let mut warned = false;
    for warning in parse_warnings.iter().chain(import_warnings.iter()) {
        eprintln!("warning: {}", warning);
        warned = true;
    }
    Ok((graph, warned))
}

fn run_catalog(lang: &str) -> i32 {
    let language = match parse_lang(lang) {
        Ok(language) => language,
        Err(code) => return code,
    };

    let catalog = BlockCatalog::global();
    for (category, defs) in catalog.by_category() {
        println!("{:?}:", category);
        for def in defs {
            println!(
                "  {:<18} [{}] {} - {}",
                def.id,
                def.block_type.as_tag(),
                def.title.get(language),
                def.description.get(language)
            );
        }
    }
    0
}

fn run_validate(snapshot: &Path) -> i32 {
    let (graph, warned) = match load_graph(snapshot) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let issues = blockforge_check::validate(&graph, BlockCatalog::global());
    for issue in &issues {
        println!("{}", issue);
    }
    if issues.is_empty() && !warned {
        println!("ok: {} block(s), no issues", graph.len());
        0
    } else {
        1
    }
}

async fn run_generate(
    snapshot: &Path,
    lang: &str,
    remote_url: Option<String>,
    api_key: String,
    model: String,
) -> i32 {
    let language = match parse_lang(lang) {
        Ok(language) => language,
        Err(code) => return code,
    };
    let (graph, _) = match load_graph(snapshot) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let catalog = BlockCatalog::global();
    let result = match remote_url {
        Some(base_url) => {
            let backend = HttpBackend::new(HttpBackendConfig {
                base_url,
                api_key,
                model,
            });
            Orchestrator::with_backend(backend)
                .generate(&graph, catalog, language, BackendPreference::Remote)
                .await
        }
        None => {
            Orchestrator::local()
                .generate(&graph, catalog, language, BackendPreference::Local)
                .await
        }
    };

    match serde_json::to_string_pretty(&result) {
        Ok(json) => {
            println!("{}", json);
            0
        }
        Err(err) => {
            eprintln!("Error: failed to serialize result: {}", err);
            2
        }
    }
}
