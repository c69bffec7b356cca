//! CLI `models` command: print the resolved mental-model catalog.

use thinkwell::catalog::{ModelCatalog, TieredCatalog};
use thinkwell::config::ThinkConfig;

/// Display the catalog (built-ins plus any custom models) in the terminal.
pub fn models(config: &ThinkConfig) {
    let models_path = config.resolved_models_path();
    let catalog = TieredCatalog::load(models_path.as_deref());

    println!("Mental Models");
    println!("{}", "=".repeat(40));
    if let Some(ref path) = models_path {
        println!("  Custom source:       {}", path.display());
    }
    println!("  Total models:        {}", catalog.len());
    println!();

    println!("By Priority:");
    for keyed in catalog.list_all() {
        println!(
            "  {:>3}  {:<24} {}",
            keyed.model.priority, keyed.key, keyed.model.name
        );
    }
    println!();

    println!("By Category:");
    for (category, models) in catalog.group_by_category() {
        println!("  {category}");
        for keyed in models {
            println!("    {:<24} {} step(s)", keyed.key, keyed.model.steps.len());
        }
    }
}
