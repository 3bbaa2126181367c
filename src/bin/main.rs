use clap::{Parser, Subcommand};
use dank_ls::config::PROJECT_CONFIG_FILE;
use dank_ls::lsp::{SettingsEventKind, load_settings};
use dank_ls::resolve::{Span, partial_word_at};
use dank_ls::text::PositionMapper;
use dank_ls::{
    DankError, DankLs, DankResult, Document, FileSystemProbe, ReferenceMatch, Resolver,
    detect_grammar,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::{stdin, stdout};
use tower_lsp_server::ls_types::Position;
use tower_lsp_server::{LspService, Server};
use url::Url;

/// Go-to-definition for HTML partial includes and worker script URLs
#[derive(Parser)]
#[command(name = "dank-ls")]
#[command(version)]
#[command(about = "Go-to-definition for HTML partial includes and worker script URLs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the reference at a position and print the target path
    Resolve {
        /// Source file containing the reference
        file: PathBuf,

        /// Zero-based line
        line: u32,

        /// Zero-based UTF-16 column
        character: u32,

        /// Language ID; inferred from the file extension when omitted
        #[arg(long)]
        language: Option<String>,
    },

    /// Print the UTF-16 column span of the partial path word at a position
    Word {
        /// HTML file containing the partial include
        file: PathBuf,

        /// Zero-based line
        line: u32,

        /// Zero-based UTF-16 column
        character: u32,
    },
}

/// Directory whose `dank-ls.toml` governs `path`: the nearest ancestor
/// holding one, else the file's own directory.
fn project_root_for(path: &Path) -> Option<&Path> {
    path.ancestors()
        .skip(1)
        .find(|dir| dir.join(PROJECT_CONFIG_FILE).is_file())
        .or_else(|| path.parent())
}

async fn resolve_at(
    file: PathBuf,
    position: Position,
    language: Option<String>,
) -> DankResult<Option<ReferenceMatch>> {
    let path = std::path::absolute(&file)?;
    let uri = Url::from_file_path(&path)
        .map_err(|()| DankError::invalid_uri(path.display().to_string()))?;
    let text = tokio::fs::read_to_string(&path).await?;

    let outcome = load_settings(project_root_for(&path), None);
    for event in &outcome.events {
        match event.kind {
            SettingsEventKind::Info => log::info!("{}", event.message),
            SettingsEventKind::Warning => log::warn!("{}", event.message),
        }
    }
    let settings = outcome.settings.unwrap_or_default();

    let Some(grammar) = detect_grammar(language.as_deref(), &uri, &settings) else {
        log::warn!("No reference grammar applies to {}", path.display());
        return Ok(None);
    };

    let snapshot = Document::with_language(text, language, None).snapshot(&uri);
    let options = settings.resolve_options();
    Ok(Resolver::new(FileSystemProbe)
        .resolve(grammar, &snapshot, position, options)
        .await)
}

async fn word_at(file: PathBuf, position: Position) -> DankResult<Option<Span>> {
    let text = tokio::fs::read_to_string(&file).await?;
    let mapper = PositionMapper::new(&text);
    Ok(mapper
        .line_text(position.line as usize)
        .and_then(|line| partial_word_at(line, position)))
}

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the protocol; logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve {
            file,
            line,
            character,
            language,
        }) => match resolve_at(file, Position::new(line, character), language).await {
            Ok(Some(reference)) => {
                println!("{}", reference.target_path.display());
                ExitCode::SUCCESS
            }
            Ok(None) => {
                eprintln!("No reference at {}:{}", line, character);
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        Some(Commands::Word {
            file,
            line,
            character,
        }) => match word_at(file, Position::new(line, character)).await {
            Ok(Some(span)) => {
                println!("{} {}", span.start, span.end);
                ExitCode::SUCCESS
            }
            Ok(None) => {
                eprintln!("No partial path word at {}:{}", line, character);
                ExitCode::FAILURE
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                ExitCode::FAILURE
            }
        },
        None => {
            let stdin = stdin();
            let stdout = stdout();

            let (service, socket) = LspService::new(DankLs::new);
            Server::new(stdin, stdout, socket).serve(service).await;
            ExitCode::SUCCESS
        }
    }
}
