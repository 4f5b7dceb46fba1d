//! Setup command - install dependencies, locate and cache an upscaler

use crate::artifact::{ArtifactName, ResolvedArtifact};
use crate::cli::args::{Cli, OutputFormat};
use crate::config::Config;
use crate::error::SetupResult;
use crate::setup::UpscalerSetup;
use crate::ui::{self, UiContext};
use serde::Serialize;
use std::process::ExitCode;
use tracing::debug;

/// Execute the setup command.
///
/// Returns `ExitCode::FAILURE` when the upscaler could not be set up;
/// `Err` only for problems that deserve an error message of their own.
pub async fn execute(args: &Cli, config: &Config) -> SetupResult<ExitCode> {
    let ctx = UiContext::detect().with_quiet(args.format == OutputFormat::Json);
    let name = ArtifactName::new(args.name.clone())?;

    let mut config = config.clone();
    if let Some(ref root) = args.root {
        config.install.root = Some(root.clone());
    }
    if args.no_system_search {
        config.search.system_search = false;
    }
    let root = config.install.resolve_root();
    debug!("Install root: {}", root.display());

    ui::intro(&ctx, "Upscaler Setup");
    ui::key_value(&ctx, "Upscaler", name.as_str());
    ui::key_value(&ctx, "Install root", &root.display().to_string());

    let mut setup = UpscalerSetup::from_config(&root, &config, &ctx);
    if args.skip_deps {
        ui::step_info(&ctx, "Skipping dependency check");
        setup = setup.without_dependencies();
    }

    let result = setup.setup(&name).await?;

    match args.format {
        OutputFormat::Text => print_text(&ctx, &name, result.as_ref()),
        OutputFormat::Json => print_json(&name, result.as_ref())?,
    }

    Ok(if result.is_some() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_text(ctx: &UiContext, name: &ArtifactName, result: Option<&ResolvedArtifact>) {
    match result {
        Some(path) => {
            ui::outro_success(ctx, &format!("Upscaler set up successfully: {}", path))
        }
        None => ui::outro_error(ctx, &format!("Failed to set up upscaler: {}", name)),
    }
}

fn print_json(name: &ArtifactName, result: Option<&ResolvedArtifact>) -> SetupResult<()> {
    #[derive(Serialize)]
    struct SetupJson<'a> {
        name: &'a ArtifactName,
        path: Option<&'a ResolvedArtifact>,
        status: &'static str,
    }

    let json = SetupJson {
        name,
        path: result,
        status: if result.is_some() { "ready" } else { "failed" },
    };
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
