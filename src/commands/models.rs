//! Models command implementation

use console::Style;

use crate::cli::{GlobalArgs, ModelsArgs, ModelsSubcommand};
use crate::commands::helpers::{http_transport, load_settings, prompter, report_failure};
use crate::config::Settings;
use crate::error::Result;
use crate::models::download::{ModelOutcome, Verification, download_model};
use crate::models::{self, CATALOG, ModelChoice, ModelDescriptor, choose_model};
use crate::prereq::check_prerequisites;
use crate::transport::Transport;
use crate::ui::display::{self, format_bytes};
use crate::ui::{ProgressReporter, progress_reporter};

/// Run models command
pub fn run(global: GlobalArgs, args: ModelsArgs) -> Result<()> {
    let settings = load_settings(&global)?;

    match args.command {
        ModelsSubcommand::List => {
            list(&settings);
            Ok(())
        }
        ModelsSubcommand::Download { id } => {
            check_prerequisites(&settings.prerequisites)?;
            let choice = match id {
                Some(id) => ModelChoice::parse(&id)?,
                None => choose_model(prompter(global.yes).as_mut())?,
            };
            let ModelChoice::Model(descriptor) = choice else {
                display::info("No model selected");
                return Ok(());
            };
            let transport = http_transport()?;
            let mut progress = progress_reporter();
            fetch_model(&settings, &transport, progress.as_mut(), descriptor);
            Ok(())
        }
        ModelsSubcommand::Find => {
            find(&settings);
            Ok(())
        }
    }
}

fn list(settings: &Settings) {
    display::heading("Models");
    for model in CATALOG {
        let marker = if model.installed_path(&settings.models_dir).is_some() {
            Style::new().green().apply_to("✓ downloaded")
        } else {
            Style::new().dim().apply_to("not downloaded")
        };
        println!(
            "  {} {:<42} ~{:<10} {}",
            Style::new()
                .cyan()
                .bold()
                .apply_to(format!("{:<14}", model.id)),
            model.display_name,
            format_bytes(model.approx_size_bytes),
            marker
        );
    }
    println!();
    println!("  Directory: {}", settings.models_dir.display());
}

fn find(settings: &Settings) {
    match models::preferred_installed(&settings.models_dir) {
        Some((_, path)) => println!("{}", path.display()),
        None => {
            display::info(&format!(
                "No model found in {}; run 'sqlite-setup models download'",
                settings.models_dir.display()
            ));
        }
    }
}

/// Download one model and report the result
///
/// Returns whether the model file is present afterwards. Failures are
/// printed, never returned.
pub fn fetch_model(
    settings: &Settings,
    transport: &dyn Transport,
    progress: &mut dyn ProgressReporter,
    descriptor: &ModelDescriptor,
) -> bool {
    display::heading(&format!(
        "Model: {} (~{})",
        descriptor.display_name,
        format_bytes(descriptor.approx_size_bytes)
    ));

    match download_model(transport, descriptor, &settings.models_dir, progress) {
        Ok(ModelOutcome::AlreadyPresent(path)) => {
            display::success(&format!(
                "{} already present, skipping download",
                path.display()
            ));
            true
        }
        Ok(ModelOutcome::Downloaded {
            path,
            size,
            verification,
        }) => {
            match verification {
                Verification::Passed => display::success(&format!(
                    "Downloaded {} ({})",
                    path.display(),
                    format_bytes(size)
                )),
                Verification::BelowFloor { actual, floor } => {
                    display::warning(&format!(
                        "{} is only {}, expected at least {}; the download may be incomplete",
                        path.display(),
                        format_bytes(actual),
                        format_bytes(floor)
                    ));
                    display::detail("The file was kept. Delete it and re-run to download again.");
                }
            }
            true
        }
        Err(e) => {
            report_failure(&e, descriptor.source_url);
            false
        }
    }
}
