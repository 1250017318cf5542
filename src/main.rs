//! patterngen CLI entrypoint
//! Parses command-line arguments and dispatches to the generation engine.
#![deny(unsafe_code)]

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::Parser;
use patterngen::config::{self, Config, EnvConfigReader};
use patterngen::{ConstructRequest, GenerationOrchestrator, PatternRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "patterngen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = config::FILE_NAME)]
    config: PathBuf,

    /// Directory whose definitions override the built-in ones
    #[arg(long, global = true)]
    definitions_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Render a construct request
    Generate {
        /// Target language id (falls back to `default_language` in the config)
        #[arg(long)]
        language: Option<String>,
        /// Request file (YAML, or JSON with a .json extension); `-` reads stdin
        #[arg(long)]
        request: PathBuf,
        /// `common_imports` group to place ahead of pattern imports
        #[arg(long = "import-group")]
        import_groups: Vec<String>,
        /// Write the result here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Inspect available language definitions
    Definitions {
        #[command(subcommand)]
        action: DefinitionActions,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum DefinitionActions {
    /// List language ids that can be loaded
    List,
    /// Show construct kinds, patterns and import groups of one language
    Info {
        /// Language id
        language: String,
    },
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so generated code on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?
        .with_env(&EnvConfigReader)
        .with_definitions_dir(cli.definitions_dir.clone());
    let registry = Arc::new(config.registry());

    match &cli.command {
        Commands::Generate {
            language,
            request,
            import_groups,
            output,
        } => {
            let Some(language) = language.as_ref().or(config.default_language.as_ref()) else {
                bail!("No language given; pass --language or set default_language in the config");
            };
            generate(
                registry,
                language,
                request,
                import_groups,
                output.as_deref(),
            )?
        }
        Commands::Definitions { action } => match action {
            DefinitionActions::List => list_definitions(&registry),
            DefinitionActions::Info { language } => show_definition(&registry, language)?,
        },
    }
    Ok(())
}

fn generate(
    registry: Arc<PatternRegistry>,
    language: &str,
    request_path: &Path,
    import_groups: &[String],
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let request = read_request(request_path)?;
    let orchestrator = GenerationOrchestrator::new(registry);

    let mut extra_imports = Vec::new();
    for group in import_groups {
        extra_imports.extend(orchestrator.common_imports(language, group)?);
    }

    let rendered = orchestrator
        .generate_with_imports(language, &request, &extra_imports)
        .with_context(|| format!("Failed to generate {} '{}'", request.kind, request.name))?;

    match output {
        Some(path) => {
            std::fs::write(path, format!("{rendered}\n"))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} to {}", request.name, path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn read_request(path: &Path) -> anyhow::Result<ConstructRequest> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read request from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?
    };

    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let request = if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON request {}", path.display()))?
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML request {}", path.display()))?
    };
    Ok(request)
}

fn list_definitions(registry: &PatternRegistry) {
    for language in registry.languages() {
        println!("{language}");
    }
}

fn show_definition(registry: &PatternRegistry, language: &str) -> anyhow::Result<()> {
    let definition = registry.load(language)?;
    println!("language: {}", definition.id);
    for (kind, construct) in &definition.constructs {
        let patterns: Vec<&str> = construct.patterns.keys().map(String::as_str).collect();
        if patterns.is_empty() {
            println!("  {kind}");
        } else {
            println!("  {kind}: {}", patterns.join(", "));
        }
    }
    if !definition.common_imports.is_empty() {
        let groups: Vec<&str> = definition.common_imports.keys().map(String::as_str).collect();
        println!("import groups: {}", groups.join(", "));
    }
    Ok(())
}
