//! Example: pick a few parts and run a compatibility check.
//! Run with: cargo run --example simple_check [component ids...]

use sharkpc::{format_price, Configurator, ConfiguratorOptions};

#[tokio::main]
async fn main() -> Result<(), sharkpc::SharkPcError> {
    let mut ids: Vec<String> = std::env::args().skip(1).collect();
    if ids.is_empty() {
        ids = vec!["cpu1".to_string(), "mb2".to_string(), "gpu1".to_string()];
    }

    let mut configurator = Configurator::new(ConfiguratorOptions::default())?;
    for id in &ids {
        configurator.pick(id)?;
    }

    println!("Build ({}):", format_price(configurator.total_price()));
    for component in configurator.selection().iter() {
        println!("  {:<12} {}", component.component_type.label(), component.name);
    }

    println!("Checking compatibility...");
    let report = configurator.check_compatibility().await?;
    if report.ok {
        println!("All components are compatible");
    } else {
        for issue in &report.issues {
            println!("  [{:?}] {}", issue.severity, issue.message);
        }
        std::process::exit(1);
    }
    Ok(())
}
