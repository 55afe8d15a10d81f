//! slidecap CLI
//!
//! Captures clean slide screenshots from NotebookLM Studio and lists
//! available notebooks. Prints human-readable progress to stdout and exits
//! 0 on success, 1 on any failure.

use clap::{Parser, Subcommand};
use slidecap::capture::{self, CaptureRequest};
use slidecap::error::CaptureError;
use slidecap::library::{Notebook, NotebookLibrary};
use slidecap::{discover, RunOptions};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "slidecap", version, about = "Capture clean slide screenshots from NotebookLM Studio")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Navigate to a document's slideshow and capture one slide
    Capture {
        /// Name of the document in the Studio panel
        #[arg(long)]
        doc_name: String,

        /// 1-based page number to capture
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Output path for the screenshot
        #[arg(long)]
        output: PathBuf,

        /// Explicit notebook URL (overrides --notebook-id and the active notebook)
        #[arg(long)]
        notebook_url: Option<String>,

        /// Notebook id from the library
        #[arg(long)]
        notebook_id: Option<String>,

        /// Show the browser window
        #[arg(long)]
        show_browser: bool,
    },

    /// List notebooks on the landing page, optionally filtered by title
    Discover {
        /// Case-insensitive title substring to filter by
        query: Option<String>,

        /// Show the browser window
        #[arg(long)]
        show_browser: bool,
    },

    /// Maintain the local notebook library
    Notebooks {
        #[command(subcommand)]
        command: NotebooksCommand,
    },
}

#[derive(Subcommand)]
enum NotebooksCommand {
    /// List catalogued notebooks
    List,
    /// Add or update a notebook entry
    Add {
        id: String,
        url: String,
        #[arg(long, default_value = "")]
        title: String,
    },
    /// Set the active notebook
    Use { id: String },
}

fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse();
    let ok = match cli.command {
        Command::Capture { doc_name, page, output, notebook_url, notebook_id, show_browser } => {
            cmd_capture(doc_name, page, output, notebook_url, notebook_id, show_browser)
        }
        Command::Discover { query, show_browser } => cmd_discover(query.as_deref(), show_browser),
        Command::Notebooks { command } => cmd_notebooks(command),
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn cmd_capture(
    doc_name: String,
    page: u32,
    output: PathBuf,
    notebook_url: Option<String>,
    notebook_id: Option<String>,
    show_browser: bool,
) -> bool {
    let notebook_url = match resolve_notebook_url(notebook_url, notebook_id.as_deref()) {
        Ok(url) => url,
        Err(message) => {
            println!("Error: {}", message);
            return false;
        }
    };

    println!("Starting slide capture...");
    println!("  Notebook: {}", notebook_url);
    println!("  Document: {}", doc_name);
    println!("  Page:     {}", page);

    let request = CaptureRequest {
        notebook_url,
        document_name: doc_name,
        page: page as usize,
        output_path: output,
    };
    let options = RunOptions::new().headless(!show_browser);

    match capture::run(&request, &options) {
        Ok(outcome) => {
            if !outcome.isolated {
                println!("  Note: captured full viewport (no isolated slide element found)");
            }
            println!("Screenshot saved to: {}", outcome.path.display());
            true
        }
        Err(e) => {
            report_failure(&e);
            false
        }
    }
}

fn cmd_discover(query: Option<&str>, show_browser: bool) -> bool {
    println!("Searching for notebooks...");

    let options = RunOptions::new().headless(!show_browser);
    match discover::run(query, &options) {
        Ok(entries) => {
            if entries.is_empty() {
                println!("No notebooks found.");
                return true;
            }

            println!("Notebooks found ({}):", entries.len());
            for (i, entry) in entries.iter().enumerate() {
                println!("{}. {}", i + 1, entry.title);
                println!("   URL: {}", entry.url);
            }
            true
        }
        Err(e) => {
            report_failure(&e);
            false
        }
    }
}

fn cmd_notebooks(command: NotebooksCommand) -> bool {
    let path = NotebookLibrary::default_path();
    let mut library = match NotebookLibrary::load(&path) {
        Ok(library) => library,
        Err(e) => {
            println!("Error: {}", e);
            return false;
        }
    };

    let result = match command {
        NotebooksCommand::List => {
            if library.notebooks().is_empty() {
                println!("No notebooks in the library. Add one with: slidecap notebooks add <id> <url>");
            }
            let active_id = library.active().map(|n| n.id.clone());
            for notebook in library.notebooks() {
                let marker = if active_id.as_deref() == Some(notebook.id.as_str()) { "*" } else { " " };
                println!("{} {}  {}  {}", marker, notebook.id, notebook.title, notebook.url);
            }
            return true;
        }
        NotebooksCommand::Add { id, url, title } => {
            library.add(Notebook { id: id.clone(), title, url });
            library.save(&path).map(|_| println!("Added notebook '{}'", id))
        }
        NotebooksCommand::Use { id } => library
            .set_active(&id)
            .and_then(|_| library.save(&path))
            .map(|_| println!("Active notebook is now '{}'", id)),
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            println!("Error: {}", e);
            false
        }
    }
}

/// Resolve the notebook URL: explicit URL, then library id, then the
/// active library entry.
fn resolve_notebook_url(
    notebook_url: Option<String>,
    notebook_id: Option<&str>,
) -> Result<String, String> {
    if let Some(url) = notebook_url {
        return Ok(url);
    }

    let library = NotebookLibrary::load_default().map_err(|e| e.to_string())?;

    if let Some(id) = notebook_id {
        return library
            .get(id)
            .map(|n| n.url.clone())
            .ok_or_else(|| format!("notebook '{}' not found in the library", id));
    }

    library
        .active()
        .map(|n| n.url.clone())
        .ok_or_else(|| "no notebook URL or id given, and no active notebook set".to_string())
}

fn report_failure(error: &CaptureError) {
    println!("Error: {}", error);
    if matches!(error, CaptureError::NotAuthenticated) {
        let profile = slidecap::AuthSession::new();
        println!("Sign in to NotebookLM once so the profile keeps the session:");
        println!(
            "  google-chrome --user-data-dir={} https://notebooklm.google.com",
            profile.profile_dir().display()
        );
    }
}
