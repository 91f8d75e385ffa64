//! `rankprep compose` — Run a configured component over a JSON batch.

use std::io::Read;
use std::path::PathBuf;

use rankprep_config::{ComponentConfig, PipelineConfig};
use rankprep_core::component::ComponentRegistry;
use rankprep_core::dialogue::{ComposedBatch, DialogueBatch};
use rankprep_core::error::{ComponentError, Error};
use tracing::info;

pub struct ComposeArgs {
    pub input: String,
    pub config: Option<PathBuf>,
    pub component: Option<String>,
    pub context_depth: Option<u64>,
    pub pretty: bool,
}

pub fn run(args: ComposeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => PipelineConfig::load_from(path)?,
        None => PipelineConfig::load()?,
    };

    let raw = read_input(&args.input)?;
    let batch: DialogueBatch = serde_json::from_str(&raw)?;

    let registry = rankprep_ranking::default_registry();
    let output = compose_batch(
        &config,
        &registry,
        args.component.as_deref(),
        args.context_depth,
        &batch,
    )?;

    let json = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{json}");
    Ok(())
}

/// Pick the component entry, build it, and run it over `batch`.
///
/// Without a name the first configured component runs. A registered name
/// absent from the config runs with no options.
pub fn compose_batch(
    config: &PipelineConfig,
    registry: &ComponentRegistry,
    component: Option<&str>,
    context_depth: Option<u64>,
    batch: &DialogueBatch,
) -> Result<ComposedBatch, Error> {
    let mut entry = select_component(config, registry, component)?;
    if let Some(depth) = context_depth {
        entry.options.insert("context_depth".into(), depth.into());
    }

    let built = registry.build(&entry.class_name, &entry.options)?;
    info!(
        component = %entry.label(),
        examples = batch.len(),
        "Running component"
    );
    built.process(batch)
}

fn select_component(
    config: &PipelineConfig,
    registry: &ComponentRegistry,
    name: Option<&str>,
) -> Result<ComponentConfig, Error> {
    match name {
        Some(name) => match config.component(name) {
            Some(entry) => Ok(entry.clone()),
            None if registry.contains(name) => Ok(ComponentConfig::new(name)),
            None => Err(ComponentError::NotFound(name.to_string()).into()),
        },
        None => config.components.first().cloned().ok_or_else(|| Error::Config {
            message: "pipeline has no components".into(),
        }),
    }
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
    }
}
