use clap::{Parser, Subcommand};
use sml_deploy::{config, deploy, output};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sml-deploy")]
#[command(about = "Write the asset manifest into an SML app descriptor")]
#[command(long_about = "\
Write the asset manifest into an SML app descriptor

Walks the project's asset directories and rewrites the block between
`// deployment start` and `// deployment end` in app.sml with one
`File { path time type }` line per asset.

Project structure:

  my-app/
  ├── app.sml        # Descriptor (block inserted before the last `}` if absent)
  ├── deploy.toml    # Optional config
  ├── pages-en/      # page-en   (also de, es, pt, fr, eo)
  ├── parts-en/      # part-en   (also de, es, pt, fr, eo)
  ├── images/        # image
  ├── sounds/        # sound
  ├── videos/        # video
  ├── textures/      # texture
  └── models/        # model

Hidden files and .DS_Store are skipped. Missing directories are skipped.

Run with no subcommand to update. Run 'sml-deploy gen-config' for a
documented deploy.toml.")]
#[command(version)]
struct Cli {
    /// Project root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/deploy.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite the deployment block of the descriptor
    Update,
    /// Collect and print the block without writing anything
    Check {
        /// Print entries as JSON instead of the SML block
        #[arg(long)]
        json: bool,
    },
    /// Print a stock deploy.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command.unwrap_or(Command::Update) {
        Command::Update => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let report = deploy::update(&cli.root, &config)?;
            output::log_update_summary(&report, &config.descriptor);
        }
        Command::Check { json } => {
            let config = config::load_config(&cli.root, cli.config.as_deref())?;
            let deployment = deploy::collect(&cli.root, &config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&deployment)?);
            } else {
                output::print_check(&deployment);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so `check` output on stdout stays machine-readable.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
