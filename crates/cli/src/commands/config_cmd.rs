//! `rankprep config` — Print the default pipeline configuration.

use rankprep_config::PipelineConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("# {}", PipelineConfig::resolve_path().display());
    print!("{}", PipelineConfig::default_toml());
    Ok(())
}
