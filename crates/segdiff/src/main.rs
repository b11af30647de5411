mod logging;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use segdiff_diff::{
    DiffEngine as _, DiffProcessor as _, EngineConfig, EngineName, SerializedOperation, replay_new,
    replay_old,
};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
struct Options {
    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Diffs two files and prints the operations as JSON.
    Diff {
        old: Utf8PathBuf,
        new: Utf8PathBuf,
        #[arg(long)]
        config: Option<Utf8PathBuf>,
        /// Overrides the engine of the config file.
        #[arg(long)]
        engine: Option<EngineName>,
    },
    /// Diffs every file against the previous one, printing one JSON array per
    /// file.
    History {
        #[arg(required = true)]
        paths: Vec<Utf8PathBuf>,
        #[arg(long)]
        config: Option<Utf8PathBuf>,
    },
    /// Rebuilds one side of a diff out of its JSON operations.
    Replay {
        path: Utf8PathBuf,
        #[arg(long, value_enum)]
        side: Side,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Side {
    Old,
    New,
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    logging::init_subscriber(&options.log_level);

    match options.command {
        Command::Diff { old, new, config, engine } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(engine) = engine {
                config.engine = engine;
            }
            let engine = config.build().context("invalid engine configuration")?;

            let mut processor = engine.processor();
            processor.update(&read(&old)?);
            let delta = processor.process(&read(&new)?);

            println!("{}", serde_json::to_string(&delta.serialize())?);
            Ok(())
        }
        Command::History { paths, config } => {
            let engine = load_config(config.as_deref())?
                .build()
                .context("invalid engine configuration")?;
            let texts = paths.iter().map(|path| read(path)).collect::<anyhow::Result<Vec<_>>>()?;

            for delta in engine.process(&texts) {
                println!("{}", serde_json::to_string(&delta.serialize())?);
            }
            Ok(())
        }
        Command::Replay { path, side } => {
            let records: Vec<SerializedOperation> = serde_json::from_str(&read(&path)?)
                .with_context(|| format!("failed to parse operations in `{path}`"))?;
            let text = match side {
                Side::Old => replay_old(&records),
                Side::New => replay_new(&records),
            }
            .with_context(|| format!("failed to replay `{path}`"))?;

            print!("{text}");
            Ok(())
        }
    }
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn load_config(path: Option<&Utf8Path>) -> anyhow::Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let config = serde_json::from_str(&read(path)?)
        .with_context(|| format!("failed to parse config `{path}`"))?;
    tracing::debug!(%path, "loaded config");
    Ok(config)
}
