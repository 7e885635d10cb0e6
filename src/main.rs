//! Socratic Chat - a web dialogue with a Socratic philosopher
//!
//! Serves a single shared conversation. Each question is normalized,
//! categorized by a small decision-tree classifier and answered by an
//! OpenAI chat model instructed to reply with questions.

mod api;
mod classifier;
mod conversation;
mod dialogue;
mod export;
mod llm;
mod nlp;
mod render;
mod system_prompt;

use api::{create_router, AppState};
use clap::{Args, Parser, Subcommand};
use classifier::Classifier;
use conversation::{Conversation, RegistryLlmClient};
use llm::{LlmConfig, ModelRegistry};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "socratic-chat", version)]
#[command(about = "Socratic dialogue web app")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    serve: ServeArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Run the web server (default)
    Serve(ServeArgs),
    /// Train the question classifier and write the model file
    Train {
        /// Where to write the model
        #[arg(long, env = "SOCRATIC_MODEL_PATH", default_value = "model.json")]
        output: PathBuf,
    },
}

#[derive(Args)]
struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "SOCRATIC_PORT", default_value_t = 8000)]
    port: u16,

    /// Trained classifier model
    #[arg(long, env = "SOCRATIC_MODEL_PATH", default_value = "model.json")]
    model: PathBuf,

    /// Directory the transcript download is written to
    #[arg(long, env = "SOCRATIC_EXPORT_DIR", default_value = ".")]
    export_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "socratic_chat=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Train { output }) => train(&output),
        Some(Command::Serve(args)) => serve(args).await,
        None => serve(cli.serve).await,
    }
}

fn train(output: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = classifier::training::train_default()?;
    bundle.save(output)?;
    tracing::info!(
        path = %output.display(),
        vocabulary = bundle.vectorizer.width(),
        "Classifier trained"
    );
    Ok(())
}

async fn serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // A missing or incompatible model is fatal
    tracing::info!(path = %args.model.display(), "Loading classifier");
    let classifier = Classifier::load(&args.model).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load classifier; run `socratic-chat train` first");
    })?;
    tracing::info!(
        labels = ?classifier.labels(),
        vocabulary = classifier.vocabulary_size(),
        "Classifier loaded"
    );

    // Initialize LLM registry
    let llm_config = LlmConfig::from_env();
    let llm_registry = Arc::new(ModelRegistry::new(&llm_config));

    if llm_registry.has_models() {
        tracing::info!(
            models = ?llm_registry.available_models(),
            default = %llm_registry.default_model_id(),
            "LLM registry initialized"
        );
    } else {
        tracing::warn!(
            "No OpenAI credentials configured. Set OPENAI_API_KEY and OPENAI_PROJECT_ID, or LLM_GATEWAY."
        );
    }
    if llm_config.openai_api_key.is_some() && llm_config.openai_project_id.is_none() {
        tracing::warn!("OPENAI_PROJECT_ID is not set; requests use the key's default project");
    }

    let default_model = llm_registry.default_model_id().to_string();
    let llm = Arc::new(RegistryLlmClient::new(llm_registry, default_model));
    let conversation = Conversation::new(llm, Arc::new(classifier));
    let state = AppState::new(conversation, args.export_dir);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(compression);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("Socratic Chat listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
