use anyhow::Result;

use tunebook_resolve::{config, Config};

/// Show the effective configuration; with `init`, write a starter
/// config file first.
pub fn show_config(config: &Config, init: bool) -> Result<()> {
    if init {
        if config::ensure_config_file()? {
            println!("Created {}", config::config_file_path().display());
        } else {
            println!(
                "Config file already exists: {}",
                config::config_file_path().display()
            );
        }
        println!();
    }

    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() {
            "yes"
        } else {
            "no (using defaults)"
        }
    );

    println!("Settings:");
    println!("  data_dir: {}", config.data_dir.display());
    println!("  offline: {}", config.offline);

    println!("\nPriority: CLI args > ENV vars (TUNEBOOK_*) > Config file > Defaults");

    Ok(())
}
