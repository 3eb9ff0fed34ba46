//! Surface Viewer command line
//!
//! Sends one surface definition to the Calculation Service, prints the
//! volume and error estimate, and writes the interactive plot page.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use surface_viewer_client::orchestrator::{Orchestrator, RawFormValues, UiState};
use surface_viewer_client::presets::{self, PRESETS};
use surface_viewer_client::{init_tracing, Config};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "surface-viewer", version, about = "Plot z = f(x, y) and compute its volume")]
struct Cli {
    /// Function of x and y, e.g. "x**2 + y**2"
    #[arg(short, long)]
    function: Option<String>,

    /// Lower bound of x
    #[arg(short = 'a', allow_hyphen_values = true)]
    a: Option<String>,

    /// Upper bound of x
    #[arg(short = 'b', allow_hyphen_values = true)]
    b: Option<String>,

    /// Lower bound of y
    #[arg(short = 'c', allow_hyphen_values = true)]
    c: Option<String>,

    /// Upper bound of y
    #[arg(short = 'd', allow_hyphen_values = true)]
    d: Option<String>,

    /// Samples per axis
    #[arg(short, long)]
    resolution: Option<String>,

    /// Start from a built-in example (see --list-presets)
    #[arg(short, long)]
    preset: Option<String>,

    /// List the built-in examples and exit
    #[arg(long)]
    list_presets: bool,

    /// Base URL of the Calculation Service
    #[arg(long)]
    service_url: Option<String>,

    /// Directory the plot page is written to
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Validate the input before contacting the service
    #[arg(long)]
    validate: bool,
}

impl Cli {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(url) = &self.service_url {
            config.service.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(dir) = &self.output_dir {
            config.plot.output_dir = dir.clone();
        }
        config.validate_locally |= self.validate;
        config
    }

    fn form(&self) -> anyhow::Result<RawFormValues> {
        let mut form = match &self.preset {
            Some(name) => presets::find(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown preset: {}", name))?
                .form_values(),
            None => RawFormValues::default(),
        };

        let overrides = [
            (&mut form.function, &self.function),
            (&mut form.a, &self.a),
            (&mut form.b, &self.b),
            (&mut form.c, &self.c),
            (&mut form.d, &self.d),
            (&mut form.resolution, &self.resolution),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        Ok(form)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    if cli.list_presets {
        for preset in &PRESETS {
            let [a, b, c, d] = preset.domain;
            println!(
                "{:<12} {:<14} z = {:<22} [{:.2}, {:.2}] x [{:.2}, {:.2}]",
                preset.name, preset.title, preset.function, a, b, c, d
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.config();
    info!("Configuration loaded: {:?}", config);
    let form = cli.form()?;

    let mut orchestrator = Orchestrator::from_config(&config)?;
    let page = orchestrator.renderer().page_path(orchestrator.container());

    match orchestrator.submit(&form).await {
        UiState::Success(presentation) => {
            println!("Function:         z = {}", presentation.function_label);
            println!("Volume:           {}", presentation.summary.volume_text);
            println!("Estimated error:  {}", presentation.summary.error_text);
            println!(
                "Grid:             {} x {}",
                presentation.grid_dims.0, presentation.grid_dims.1
            );
            println!("Plot:             {}", page.display());
            Ok(ExitCode::SUCCESS)
        }
        UiState::Failed { message } => {
            eprintln!("Error: {}", message);
            Ok(ExitCode::FAILURE)
        }
        other => Err(anyhow::anyhow!(
            "Submission ended in unexpected state: {}",
            other.label()
        )),
    }
}
