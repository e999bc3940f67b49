//! Render a template or partial with JSON data.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use serde_json::{Map, Value};

use super::{TemplateArgs, describe_options, read_json};
use crate::config::ViewConfig;
use crate::rendering::Rendering;

/// Render a template with data from a JSON file.
#[derive(Args, Debug)]
pub struct RenderCommand {
    #[command(flatten)]
    pub template: TemplateArgs,

    /// JSON file providing the template data (defaults to an empty object)
    #[arg(long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// JSON file exposed to templates as `context`
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Wrap the data in a part and expose it under NAME instead of spreading it
    #[arg(long = "as", value_name = "NAME")]
    pub part_name: Option<String>,
}

impl RenderCommand {
    /// Render and print the result to stdout.
    pub async fn execute(self, config: ViewConfig) -> Result<()> {
        let config = self.template.apply_to(config);
        let renderer = config.build_renderer()?;
        tracing::debug!(
            "Rendering {} (format={}, options=[{}])",
            self.template.name,
            renderer.format(),
            describe_options(renderer.options())
        );

        let data = match &self.data {
            Some(path) => read_json(path).await?,
            None => Value::Object(Map::new()),
        };

        let mut rendering = Rendering::new(renderer);
        if let Some(path) = &self.context {
            rendering = rendering.with_context(read_json(path).await?);
        }
        let rendering = Arc::new(rendering);

        let locals = match self.part_name {
            Some(name) => {
                let part = rendering.part(&name, data);
                let mut locals = Map::new();
                locals.insert(name, serde_json::to_value(&part)?);
                locals
            }
            None => match data {
                Value::Object(locals) => locals,
                other => bail!("Template data must be a JSON object unless --as is given, got: {other}"),
            },
        };

        let output = if self.template.partial {
            rendering.partial(&self.template.name, locals)?
        } else {
            rendering.template(&self.template.name, locals)?
        };

        print!("{output}");
        Ok(())
    }
}
