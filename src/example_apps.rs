use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};

use crate::assembler::Diagnostic;
use crate::config::{CorpusConfig, resolve_database_root};
use crate::constants::corpus::{DEFAULT_GROUP_PREFIX, DEFAULT_OWNER_DIR};
use crate::dataset::Dataset;
use crate::export::write_dataset_json;
use crate::metrics::DatasetSummary;
use crate::query::{PlotSeries, Predicate, Projection, filter, project, project_composition};
use crate::session::DatasetSession;
use crate::utils::field_label;

#[derive(Debug, Parser)]
#[command(
    name = "alloy_report",
    disable_help_subcommand = true,
    about = "Summarize and query alloy sample notes",
    long_about = "Assemble sample records from a notes database, print a dataset summary, and optionally filter and project two fields as plot points.",
    after_help = "The database root is resolved in order by explicit arg, the ALLOY_NOTES_ROOT environment variable, then ./material_database."
)]
struct AlloyReportCli {
    #[arg(value_name = "ROOT", help = "Notes database root")]
    root: Option<PathBuf>,
    #[arg(
        long = "owner-dir",
        default_value = DEFAULT_OWNER_DIR,
        help = "Directory under the root that holds sample groups"
    )]
    owner_dir: String,
    #[arg(
        long = "group-prefix",
        default_value = DEFAULT_GROUP_PREFIX,
        help = "Prefix marking a directory as a sample group"
    )]
    group_prefix: String,
    #[arg(long, value_name = "FIELD", help = "Field plotted on the x axis")]
    x: Option<String>,
    #[arg(long, value_name = "FIELD", help = "Field plotted on the y axis")]
    y: Option<String>,
    #[arg(long, value_name = "FIELD", help = "Optional field used to color points")]
    color: Option<String>,
    #[arg(
        long = "filter",
        value_name = "FIELD=VALUE|FIELD=LO..HI",
        value_parser = parse_predicate_arg,
        help = "Filter rows before projecting, repeat as needed (combined with AND)"
    )]
    filters: Vec<Predicate>,
    #[arg(
        long,
        requires = "y",
        help = "Plot --y against each element's amount instead of --x"
    )]
    composition: bool,
    #[arg(
        long = "diagnostics",
        help = "Print per-sample assembly diagnostics"
    )]
    show_diagnostics: bool,
    #[arg(
        long = "json-out",
        value_name = "PATH",
        help = "Write the full dataset as JSON rows"
    )]
    json_out: Option<PathBuf>,
}

/// Entry point for the `alloy_report` demo.
pub fn run_alloy_report<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) =
        parse_cli::<AlloyReportCli, _>(std::iter::once("alloy_report".to_string()).chain(args_iter))?
    else {
        return Ok(());
    };

    let config = CorpusConfig::new(resolve_database_root(cli.root))
        .with_owner_dir(cli.owner_dir)
        .with_group_prefix(cli.group_prefix);
    config.validate()?;
    println!("Loading notes from {}", config.owner_path().display());
    let session = DatasetSession::load(config);
    let dataset = session.dataset();

    let mut out = io::stdout().lock();
    print_summary(&mut out, &session.summary())?;
    if cli.show_diagnostics {
        print_diagnostics(&mut out, session.diagnostics())?;
    }

    if let Some(path) = cli.json_out {
        write_dataset_json(&dataset, &path)?;
        writeln!(out, "Wrote {} rows to {}", dataset.len(), path.display())?;
    }

    let view = filter(&dataset, &cli.filters);
    if !cli.filters.is_empty() {
        writeln!(out, "Filtered to {} of {} samples", view.len(), dataset.len())?;
    }

    match (cli.x, cli.y) {
        (_, Some(y)) if cli.composition => {
            let series = project_composition(&view, &y, None)?;
            if series.is_empty() {
                print_no_data(&mut out, &Projection::Empty)?;
            }
            for plot in &series {
                print_series(&mut out, plot)?;
            }
        }
        (Some(x), Some(y)) => {
            let projection = project(&view, &x, &y, cli.color.as_deref())?;
            match &projection {
                Projection::Points(plot) => print_series(&mut out, plot)?,
                Projection::Empty => print_no_data(&mut out, &projection)?,
            }
        }
        (None, None) => print_fields(&mut out, &dataset)?,
        _ => writeln!(out, "Both --x and --y are required to project points.")?,
    }

    Ok(())
}

fn parse_predicate_arg(raw: &str) -> Result<Predicate, String> {
    raw.parse::<Predicate>().map_err(|err| err.to_string())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

fn print_summary(out: &mut impl Write, summary: &DatasetSummary) -> io::Result<()> {
    writeln!(out, "=== dataset summary ===")?;
    writeln!(out, "Total samples: {}", summary.total_samples)?;
    writeln!(out, "Available fields: {}", summary.available_fields)?;
    writeln!(out, "Elements: {}", summary.element_count)?;
    for group in &summary.groups {
        writeln!(
            out,
            "  {:<12} {:>5} samples ({:.1}%)",
            group.group,
            group.count,
            group.share * 100.0
        )?;
    }
    Ok(())
}

fn print_diagnostics(out: &mut impl Write, diagnostics: &[Diagnostic]) -> io::Result<()> {
    writeln!(out, "=== diagnostics ({}) ===", diagnostics.len())?;
    for diagnostic in diagnostics {
        writeln!(
            out,
            "  [{:?}] {} {}: {}",
            diagnostic.kind,
            diagnostic.sample_id.as_deref().unwrap_or("-"),
            diagnostic.path,
            diagnostic.message
        )?;
    }
    Ok(())
}

fn print_fields(out: &mut impl Write, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "=== available fields ===")?;
    let summary = DatasetSummary::from_dataset(dataset);
    for (field, range) in &summary.ranges {
        writeln!(
            out,
            "  {:<26} n={:<4} min={:<10} max={}",
            field_label(field),
            range.count,
            range.min,
            range.max
        )?;
    }
    Ok(())
}

fn print_series(out: &mut impl Write, plot: &PlotSeries) -> io::Result<()> {
    writeln!(out, "=== {} ({}) ===", plot.title, plot.name)?;
    let color_label = plot.color_label.as_deref().unwrap_or("color");
    writeln!(
        out,
        "  {:<16} {:>12} {:>12} {:>12}",
        "sample", plot.x_label, plot.y_label, color_label
    )?;
    for point in &plot.points {
        let color = point
            .color
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "  {:<16} {:>12} {:>12} {:>12}",
            point.sample_id, point.x, point.y, color
        )?;
    }
    Ok(())
}

fn print_no_data(out: &mut impl Write, projection: &Projection) -> io::Result<()> {
    if let Some(message) = projection.message() {
        writeln!(out, "{message}")?;
    }
    Ok(())
}
