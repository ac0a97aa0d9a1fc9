use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::path::Path;

use varsift::cli::{CheckArgs, Cli, Commands, FilterArgs};
use varsift::config::FilterSettings;
use varsift::error::{Result, VarsiftError};
use varsift::filtering::{FilterSpec, VariantFilter};
use varsift::vcf::{RecordSink, VcfFlavor, VcfHeader, VcfReader, VcfWriter};

fn main() {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Filter(args) => cmd_filter(args),
        Commands::Check(args) => cmd_check(args),
        Commands::Defaults => cmd_defaults(),
    };
    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Initialize the tracing subscriber. Logs go to stderr so stdout stays
/// clean for record output.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if verbose { "varsift=debug" } else { "varsift=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn cmd_filter(args: FilterArgs) -> Result<()> {
    let input: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        let file = File::open(&args.input).map_err(|e| VarsiftError::Io {
            source: e,
            context: format!("failed to open {}", args.input.display()),
        })?;
        Box::new(BufReader::new(file))
    };
    let reader = VcfReader::new(input)?;
    let header = reader.header().clone();

    let settings = resolve_settings(&header, &args)?;
    let spec = FilterSpec::compile(&settings)?;
    tracing::debug!(
        "compiled {} field filter(s), quality threshold {}",
        spec.field_filters.len(),
        spec.quality_threshold
    );
    let filter = VariantFilter::new(spec);

    let mut primary = open_primary_sink(args.output.as_deref(), &header)?;
    let mut secondary = match &args.rejected {
        Some(path) => Some(open_file_sink(path, &header)?),
        None => None,
    };

    // reborrowed for the call so both sinks stay usable for finish() after it
    let secondary_ref: Option<&mut dyn RecordSink> = match secondary.as_mut() {
        Some(sink) => Some(sink.as_mut()),
        None => None,
    };
    let outcome = filter.partition(reader.records(), primary.as_mut(), secondary_ref)?;
    primary.finish()?;
    if let Some(sink) = secondary.as_mut() {
        sink.finish()?;
    }

    if args.json {
        eprintln!("{}", serde_json::to_string(&outcome)?);
    } else {
        eprintln!(
            "✓ {} of {} record(s) passed, {} filtered ({} ms)",
            outcome.passed, outcome.total, outcome.filtered, outcome.elapsed_ms
        );
    }
    Ok(())
}

/// Pick the settings for a run: the flavor's built-in table (or the settings
/// file when given), then CLI overrides on top. Unrecognised input is an
/// error unless forced, in which case only caller-supplied filters apply.
fn resolve_settings(header: &VcfHeader, args: &FilterArgs) -> Result<FilterSettings> {
    let flavor = header.flavor();
    if flavor == VcfFlavor::Unknown {
        if !args.force {
            return Err(VarsiftError::UnrecognizedFormat {
                version: header.version.clone(),
                tool: header.source.clone(),
            });
        }
        tracing::warn!("unrecognised VCF input, continuing with supplied filters only (--force)");
    }
    let mut settings = if let Some(path) = &args.filter_file {
        FilterSettings::load(path)?
    } else if let Some(defaults) = FilterSettings::defaults_for(flavor) {
        tracing::info!("using the built-in {} filter table", flavor);
        defaults
    } else {
        FilterSettings::pass_all()
    };
    settings.apply_overrides(&args.filters, args.quality)?;
    Ok(settings)
}

fn open_primary_sink(path: Option<&Path>, header: &VcfHeader) -> Result<Box<dyn RecordSink>> {
    match path {
        Some(path) => open_file_sink(path, header),
        None => {
            let mut writer = VcfWriter::new(BufWriter::new(io::stdout().lock()));
            writer.write_header(header)?;
            Ok(Box::new(writer))
        }
    }
}

fn open_file_sink(path: &Path, header: &VcfHeader) -> Result<Box<dyn RecordSink>> {
    let mut writer = VcfWriter::create(path)?;
    writer.write_header(header)?;
    Ok(Box::new(writer))
}

fn cmd_check(args: CheckArgs) -> Result<()> {
    let mut settings = match &args.filter_file {
        Some(path) => FilterSettings::load(path)?,
        None => FilterSettings::mpileup_v41(),
    };
    settings.apply_overrides(&args.filters, args.quality)?;
    let spec = FilterSpec::compile(&settings)?;

    println!("✓ filter settings are valid");
    println!("  quality threshold: {}", spec.quality_threshold);
    for filter in &spec.field_filters {
        println!("  {} {}", filter.key, filter.threshold);
    }
    Ok(())
}

fn cmd_defaults() -> Result<()> {
    print!("{}", FilterSettings::mpileup_v41().to_toml()?);
    Ok(())
}
