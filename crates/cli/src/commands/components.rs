//! `rankprep components` — List registered components.

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = rankprep_ranking::default_registry();
    for name in registry.names() {
        println!("{name}");
    }
    Ok(())
}
