mod cli;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "feishu-digest", version, about = "Daily arXiv digests for Feishu chats and documents")]
struct App {
    /// Config file (defaults to {config_dir}/feishu-digest/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish a digest: document update, history file, chat card
    Send {
        /// JSON array of paper records ("-" for stdin)
        #[arg(long)]
        papers: PathBuf,
        /// Digest date (defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Only send the chat card
        #[arg(long, conflicts_with = "doc_only")]
        chat_only: bool,
        /// Only update the document and history
        #[arg(long)]
        doc_only: bool,
    },
    /// Print a rendered payload without sending anything
    Render {
        #[arg(long)]
        papers: PathBuf,
        #[arg(long, value_enum, default_value = "markdown")]
        format: RenderFormat,
        #[arg(long)]
        date: Option<String>,
        /// Document URL for the card's "view all" link
        #[arg(long)]
        doc_url: Option<String>,
    },
    /// List chats the app has joined, with their chat ids
    Chats,
    /// Find a document token from a docx URL, or list docx files
    DocToken {
        /// Document URL, e.g. https://xxx.feishu.cn/docx/doccnXXXX
        url: Option<String>,
    },
    /// View configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Display the effective configuration (secrets masked)
    Show,
    /// Print the default config file path
    Path,
    /// Write the effective configuration (file + FEISHU_* variables) to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RenderFormat {
    Card,
    Post,
    Markdown,
    Blocks,
    Paragraphs,
}

fn main() {
    let app = App::parse();

    match &app.log_file {
        Some(path) => feishu_digest::tracing_init::init_file_tracing(path, app.verbose),
        None => feishu_digest::tracing_init::init_stderr_tracing(app.verbose),
    }

    let config = app.config.as_deref();
    let result = match app.command {
        Commands::Send { papers, date, chat_only, doc_only } => {
            cli::send::run(config, &papers, date.as_deref(), chat_only, doc_only)
        }
        Commands::Render { papers, format, date, doc_url } => {
            cli::render::run(&papers, format, date.as_deref(), doc_url)
        }
        Commands::Chats => cli::chats::run(config),
        Commands::DocToken { url } => cli::doc_token::run(config, url.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Show => cli::config::run_show(config),
            ConfigAction::Path => cli::config::run_path(),
            ConfigAction::Init { force } => cli::config::run_init(config, force),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
