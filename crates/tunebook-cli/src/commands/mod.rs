pub mod config;
pub mod fetch;
pub mod lookup;
pub mod render;
pub mod sets;

pub use config::show_config;
pub use fetch::run_fetch;
pub use lookup::run_lookup;
pub use render::run_render;
pub use sets::run_sets;

use std::path::Path;

use anyhow::{Context, Result};

/// Write output to a file or, with no destination, stdout.
pub(crate) fn write_output(output: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => print!("{output}"),
    }
    Ok(())
}
