//! Print the file a logical template name resolves to.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use super::TemplateArgs;
use crate::config::ViewConfig;

/// Resolve a template name without rendering it.
#[derive(Args, Debug)]
pub struct LookupCommand {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// Also list the search paths that were scanned
    #[arg(long)]
    pub explain: bool,
}

impl LookupCommand {
    /// Print the resolved path, or fail with a not-found error.
    pub fn execute(self, config: ViewConfig) -> Result<()> {
        let config = self.template.apply_to(config);
        let renderer = config.build_renderer()?;
        let name = self.template.logical_name();

        if self.explain {
            eprintln!("{} {} (format: {})", "Resolving".cyan(), name, renderer.format());
            for path in renderer.paths() {
                eprintln!("  {} {}", "-".dimmed(), path);
            }
        }

        match renderer.lookup(&name) {
            Some(path) => {
                println!("{}", path.display());
                Ok(())
            }
            None => Err(renderer.not_found(&name).into()),
        }
    }
}
