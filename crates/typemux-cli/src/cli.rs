use crate::report::PlanReport;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error as ThisError;
use tracing::info;
use typemux_build::{BuildConfig, BuildError, ConfigError, Generator, IncludeBase};
use typemux_schema::{
    ModelError,
    introspect::{Chain, IntrospectionError, SourceIntrospector},
    model::Model,
};

///
/// CliError
///

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Introspection(#[from] IntrospectionError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("failed to render plan: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser)]
#[command(name = "typemux", version, about = "Generate composite object-mapper dispatchers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write converter and dispatcher files for a model.
    Generate(GenerateArgs),

    /// Print the ownership and dispatch plan as JSON.
    Plan(InputArgs),
}

#[derive(Args)]
pub struct InputArgs {
    /// Model JSON: groups plus an optional precomputed type table.
    #[arg(long)]
    pub model: PathBuf,

    /// Rust source to introspect, as `<module path>=<file>`. Repeatable.
    #[arg(long = "source", value_parser = parse_source)]
    pub sources: Vec<(String, PathBuf)>,

    /// Generator config; defaults apply when omitted.
    #[arg(long, env = "TYPEMUX_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory; receives `internal.rs` and the `internal/` tree.
    #[arg(long)]
    pub out: PathBuf,
}

fn parse_source(value: &str) -> Result<(String, PathBuf), String> {
    let (module, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <module>=<file>, got '{value}'"))?;

    if module.is_empty() || path.is_empty() {
        return Err(format!("expected <module>=<file>, got '{value}'"));
    }

    Ok((module.to_string(), PathBuf::from(path)))
}

struct Inputs {
    model: Model,
    sources: SourceIntrospector,
    config: BuildConfig,
}

impl Inputs {
    fn load(args: &InputArgs) -> Result<Self, CliError> {
        let model = Model::from_path(&args.model)?;

        let mut sources = SourceIntrospector::new();
        for (module, path) in &args.sources {
            sources.add_file(module, path)?;
        }

        let config = match &args.config {
            Some(path) => BuildConfig::load(path)?,
            None => BuildConfig::load_or_default(BuildConfig::FILE_NAME)?,
        };

        Ok(Self {
            model,
            sources,
            config,
        })
    }

    // the model's own table wins over parsed sources
    fn introspector(&self) -> Chain<'_> {
        Chain::new().with(&self.model.types).with(&self.sources)
    }
}

pub fn generate(args: &GenerateArgs) -> Result<(), CliError> {
    let inputs = Inputs::load(&args.input)?;
    let introspector = inputs.introspector();

    let files = Generator::new(&inputs.model, &introspector, &inputs.config).generate()?;
    files.write_to(&args.out, IncludeBase::Relative)?;

    info!(
        files = files.len() + 1,
        out = %args.out.display(),
        "wrote generated files"
    );

    Ok(())
}

pub fn plan(args: &InputArgs) -> Result<(), CliError> {
    let inputs = Inputs::load(args)?;
    let introspector = inputs.introspector();

    let plan = Generator::new(&inputs.model, &introspector, &inputs.config).plan()?;
    let report = PlanReport::new(&plan);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
