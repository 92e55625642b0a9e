//! # Etiqueta CLI
//!
//! Command-line interface for the thermal label designer.
//!
//! ## Usage
//!
//! ```bash
//! # Start the web editor
//! etiqueta serve --listen 0.0.0.0:8080 --data-dir ~/.etiqueta
//!
//! # Look up a part code (creates a label on a miss)
//! etiqueta scan PART-0042
//!
//! # Write the print document for a code to a file
//! etiqueta render PART-0042 --out label.html
//!
//! # Export all labels / import a previous export
//! etiqueta export --out labels.json
//! etiqueta import labels.json
//!
//! # List stored templates
//! etiqueta templates
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use etiqueta::{
    EtiquetaError,
    print::{DocumentExporter, FileExporter, PrintConfig},
    server::{self, ServerConfig},
    store::{FsStorage, LabelStore, ScanOutcome},
    transfer,
};

/// Etiqueta - Thermal label designer and print utility
#[derive(Parser, Debug)]
#[command(name = "etiqueta")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory for persisted labels
    #[arg(long, global = true, default_value = ".etiqueta")]
    data_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server with the embedded web editor
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Keep all state in memory (nothing written to disk)
        #[arg(long)]
        ephemeral: bool,
    },

    /// Look up a part code; a miss creates a new label
    Scan {
        /// The QR code / part number to look up
        code: String,
    },

    /// Render the print document for a part code
    Render {
        /// The QR code / part number to look up
        code: String,

        /// Output HTML file
        #[arg(long, default_value = "label.html")]
        out: PathBuf,
    },

    /// Export labels (or templates) to a JSON file
    Export {
        /// Export the template collection instead of labels
        #[arg(long)]
        templates: bool,

        /// Output file
        #[arg(long, default_value = "labels_export.json")]
        out: PathBuf,
    },

    /// Import labels from a JSON file (envelope or single label)
    Import {
        /// File to import
        file: PathBuf,
    },

    /// List stored templates
    Templates,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EtiquetaError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { listen, ephemeral } => {
            let config = ServerConfig {
                listen_addr: listen,
                data_dir: if ephemeral { None } else { Some(cli.data_dir) },
            };
            tokio::runtime::Runtime::new()?.block_on(server::serve(config))
        }

        Commands::Scan { code } => {
            let mut store = open_store(&cli.data_dir)?;
            let outcome = store.scan(&code)?;
            let label = store.active_label().ok_or_else(|| {
                EtiquetaError::Validation("scan produced no active label".into())
            })?;
            match outcome {
                ScanOutcome::Found => {
                    println!("Found label: {} ({} fields)", label.name, label.fields.len());
                }
                ScanOutcome::Created => {
                    println!("No match; created label: {}", label.name);
                }
            }
            Ok(())
        }

        Commands::Render { code, out } => {
            let mut store = open_store(&cli.data_dir)?;
            store.scan(&code)?;
            let label = store.active_label().cloned();
            let exporter = FileExporter { path: out };
            let doc = exporter.render(
                label.as_slice(),
                &PrintConfig::default(),
                store.logo(),
            )?;
            match doc {
                Some(html) => exporter.deliver(&html),
                None => {
                    println!("Nothing to print");
                    Ok(())
                }
            }
        }

        Commands::Export { templates, out } => {
            let store = open_store(&cli.data_dir)?;
            let json = if templates {
                transfer::export_templates(store.templates())?
            } else {
                transfer::export_all(store.labels())?
            };
            std::fs::write(&out, json)?;
            println!("Wrote {}", out.display());
            Ok(())
        }

        Commands::Import { file } => {
            let mut store = open_store(&cli.data_dir)?;
            let json = std::fs::read_to_string(&file)?;
            let incoming = transfer::parse_import(&json)?;
            let count = store.import_merge(incoming)?;
            println!("Imported {} labels", count);
            Ok(())
        }

        Commands::Templates => {
            let store = open_store(&cli.data_dir)?;
            println!("Stored templates:");
            for template in store.templates() {
                let category = template
                    .template_category
                    .as_deref()
                    .unwrap_or("uncategorized");
                println!("  {}  [{}]  {}", template.id, category, template.name);
            }
            Ok(())
        }
    }
}

fn open_store(data_dir: &std::path::Path) -> Result<LabelStore<FsStorage>, EtiquetaError> {
    LabelStore::load(FsStorage::open(data_dir)?)
}
