mod bootstrap;
mod cities;
mod prompt;
mod report;
mod viewer;

use std::path::{Path, PathBuf};

use anyhow::Result;
use bikeshare_core::models::FilterSpec;
use bikeshare_core::settings::Settings;
use bikeshare_data::analysis::analyze_city;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Bikeshare explorer v{} starting", env!("CARGO_PKG_VERSION"));

    let data_dir = settings
        .data_dir
        .clone()
        .or_else(bootstrap::discover_data_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    tracing::info!("Data directory: {}", data_dir.display());

    // Flag-driven run: --city skips the prompt loop entirely. The month and
    // day flags were already restricted to the canonical vocabulary by clap.
    if let Some(city) = settings.city.clone() {
        let spec = FilterSpec::new(&settings.month, &settings.day)?;
        run_analysis(&data_dir, &city, &spec, &settings)?;
        return Ok(());
    }

    // Interactive session with a restart loop.
    println!("Hello! Let's explore some US bikeshare data!");
    loop {
        let selection = {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            prompt::run_prompt(stdin.lock(), &mut stdout)?
        };
        let Some(selection) = selection else {
            break;
        };

        let spec = FilterSpec::new(&selection.month, &selection.day)?;
        run_analysis(&data_dir, &selection.city, &spec, &settings)?;

        let again = {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            prompt::ask_yes_no(
                stdin.lock(),
                &mut stdout,
                "Run another analysis? [yes/no]: ",
            )?
        };
        if !again {
            break;
        }
    }
    println!("Process ending");
    Ok(())
}

/// Resolve the city file, run the pipeline and render the results.
fn run_analysis(
    data_dir: &Path,
    city: &str,
    spec: &FilterSpec,
    settings: &Settings,
) -> Result<()> {
    let file = cities::city_file(city)?;
    let path = data_dir.join(file);
    tracing::debug!("Analyzing {} from {}", city, path.display());

    let analysis = analyze_city(&path, spec)?;

    let mut stdout = std::io::stdout();
    report::print_report(city, &analysis, &mut stdout)?;

    if !settings.no_viewer && !analysis.dataset.is_empty() {
        let stdin = std::io::stdin();
        viewer::run_viewer(
            &analysis.dataset,
            settings.page_size as usize,
            stdin.lock(),
            &mut stdout,
        )?;
    }

    Ok(())
}
