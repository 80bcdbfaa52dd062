use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use log::{error, info, warn};
use rayon::prelude::*;

use perfo_cli::config::PerfoConfig;
use perfo_cli::io::cli::Cli;
use perfo_cli::io::layout_to_svg::{layout_to_svg, outline_to_svg};
use perfo_cli::io::output::LayoutOutput;
use perfo_cli::job::{Job, JobFile, JobOutcome, run_job};
use perfo_cli::presets::PresetRegistry;
use perfo_cli::{EPOCH, io};
use perfo_rs::io::ext_repr::ExtPattern;
use perfo_rs::solver::LayoutEngine;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config: PerfoConfig = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            PerfoConfig::default()
        }
        Some(config_file) => io::read_json(&config_file).context("incorrect config file format")?,
    };
    info!("[MAIN] Successfully parsed PerfoConfig: {config:?}");

    let mut presets = PresetRegistry::builtin();
    if let Some(presets_file) = &args.presets_file {
        let extra: BTreeMap<String, ExtPattern> =
            io::read_json(presets_file).context("incorrect presets file format")?;
        presets.extend(extra);
    }
    info!("[MAIN] {} presets available", presets.len());

    let jobs = io::read_json::<JobFile>(&args.job_file)
        .context("incorrect job file format")?
        .into_jobs();

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!("could not create output folder: {:?}", args.output_folder)
        })?;
    }

    let engine = LayoutEngine::new(config.solver);
    let batch = jobs.len() > 1;
    let results = jobs
        .into_par_iter()
        .enumerate()
        .map(|(i, job)| {
            let stem = job.file_stem(batch.then_some(i));
            let customer = job.customer.clone();
            solve_and_write(job, &presets, &engine, config, &stem, &args.output_folder)
                .with_context(|| format!("job {i} ({customer:?}) failed"))
        })
        .collect::<Vec<_>>();

    let n_jobs = results.len();
    let failures = results
        .into_iter()
        .filter_map(|r| r.err())
        .inspect(|err| error!("[MAIN] {err:#}"))
        .count();
    info!(
        "[MAIN] {} of {n_jobs} jobs completed in {:.3}s",
        n_jobs - failures,
        EPOCH.elapsed().as_secs_f64()
    );

    match failures {
        0 => Ok(()),
        _ => bail!("{failures} of {n_jobs} jobs failed"),
    }
}

fn solve_and_write(
    job: Job,
    presets: &PresetRegistry,
    engine: &LayoutEngine,
    config: PerfoConfig,
    stem: &str,
    output_folder: &Path,
) -> Result<()> {
    let outcome = run_job(job, presets, engine)?;
    write_outcome(&outcome, config, stem, output_folder)
}

fn write_outcome(
    outcome: &JobOutcome,
    config: PerfoConfig,
    stem: &str,
    output_folder: &Path,
) -> Result<()> {
    {
        let output = LayoutOutput::new(outcome, config);
        let json_path = output_folder.join(format!("{stem}.json"));
        io::write_json(&output, &json_path)?;
    }

    {
        let title = format!("{} | {}", outcome.job.customer, outcome.job.pattern_name());
        let svg = match &outcome.layout {
            Ok(layout) => layout_to_svg(layout, config.svg_draw_options, &title),
            Err(_) => outline_to_svg(
                outcome.request.sheet_width,
                outcome.request.sheet_height,
                config.svg_draw_options,
                &title,
            ),
        };
        let svg_path = output_folder.join(format!("{stem}.svg"));
        io::write_svg(&svg, &svg_path)?;
    }

    Ok(())
}
