//! Bias correction of one campaign against a reference campaign.

use crate::load_campaigns;
use anyhow::{bail, Context};
use clap::Args;
use inclino_data::bias::{coerce_delta, AxisSummary};
use inclino_data::{
    build_correction_table, build_correction_table_checked, BiasCorrector, CorrectedTable,
    CorrectionParams, CorrectionStep,
};
use log::{error, info};
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct CorrectArgs {
    /// Path to the sensor document (JSON keyed by campaign timestamp)
    #[arg(short = 'd', long)]
    pub data: String,

    /// Reference campaign key (defaults to the flagged or earliest usable campaign)
    #[arg(short = 'r', long)]
    pub reference: Option<String>,

    /// Campaign key to correct
    #[arg(short = 't', long)]
    pub target: String,

    /// JSON file with correction parameters; flags below override it
    #[arg(short = 'p', long)]
    pub params: Option<String>,

    /// Require reference and target readings to share depths
    #[arg(long)]
    pub check_alignment: bool,

    /// Depth tolerance for alignment and correction boundaries [default: 0.01]
    #[arg(long)]
    pub tolerance: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub h_inf_a: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub h_sup_a: Option<f64>,
    /// Total axis A correction over the range (non-numeric means none)
    #[arg(long, allow_hyphen_values = true)]
    pub delta_a: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub h_inf_b: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub h_sup_b: Option<f64>,
    /// Total axis B correction over the range (non-numeric means none)
    #[arg(long, allow_hyphen_values = true)]
    pub delta_b: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub h_inf_a_2: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub h_sup_a_2: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub delta_a_2: Option<String>,

    #[arg(long, allow_hyphen_values = true)]
    pub h_inf_b_2: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub h_sup_b_2: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    pub delta_b_2: Option<String>,

    /// Output path for the corrected table CSV (stdout when omitted)
    #[arg(short = 'o', long)]
    pub output: Option<String>,
}

/// Step given on the command line, if its range is.
fn step_from_flags(
    name: &str,
    h_inf: Option<f64>,
    h_sup: Option<f64>,
    delta: Option<&str>,
) -> anyhow::Result<Option<CorrectionStep>> {
    match (h_inf, h_sup) {
        (Some(h_inf), Some(h_sup)) => {
            let delta = delta.map(coerce_delta).unwrap_or(0.0);
            Ok(Some(CorrectionStep::new(h_inf, h_sup, delta)))
        }
        (None, None) if delta.is_none() => Ok(None),
        _ => bail!("Correction {name} needs both h_inf and h_sup"),
    }
}

/// Parameters from the optional file, overridden step by step by flags.
pub fn resolve_params(args: &CorrectArgs) -> anyhow::Result<CorrectionParams> {
    let mut params = match &args.params {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read correction parameters {path}"))?;
            serde_json::from_str::<CorrectionParams>(&content)
                .with_context(|| format!("Failed to parse correction parameters {path}"))?
        }
        None => CorrectionParams::default(),
    };

    let overrides = [
        (
            "A step 1",
            step_from_flags("A step 1", args.h_inf_a, args.h_sup_a, args.delta_a.as_deref())?,
            &mut params.a.step_1,
        ),
        (
            "A step 2",
            step_from_flags("A step 2", args.h_inf_a_2, args.h_sup_a_2, args.delta_a_2.as_deref())?,
            &mut params.a.step_2,
        ),
        (
            "B step 1",
            step_from_flags("B step 1", args.h_inf_b, args.h_sup_b, args.delta_b.as_deref())?,
            &mut params.b.step_1,
        ),
        (
            "B step 2",
            step_from_flags("B step 2", args.h_inf_b_2, args.h_sup_b_2, args.delta_b_2.as_deref())?,
            &mut params.b.step_2,
        ),
    ];
    for (name, step, slot) in overrides {
        if let Some(step) = step {
            info!("Correction {name}: [{}, {}] delta {}", step.h_sup, step.h_inf, step.delta);
            *slot = Some(step);
        }
    }
    Ok(params)
}

/// Build and correct the table for `args.target`.
pub fn correct_campaign(args: &CorrectArgs) -> anyhow::Result<CorrectedTable> {
    let set = load_campaigns(&args.data)?;
    let reference = match &args.reference {
        Some(key) => set.get(key)?,
        None => set.reference()?,
    };
    let target = set.get(&args.target)?;
    info!(
        "Correcting {} ({} readings) against {} ({} readings)",
        target.key,
        target.calc.len(),
        reference.key,
        reference.calc.len()
    );

    let corrector = args
        .tolerance
        .map(BiasCorrector::with_tolerance)
        .unwrap_or_default();
    let table = if args.check_alignment {
        build_correction_table_checked(&reference.calc, &target.calc, corrector.tolerance())?
    } else {
        build_correction_table(&reference.calc, &target.calc)?
    };
    let params = resolve_params(args)?;
    Ok(corrector.apply(table, &params))
}

pub fn write_corrected_csv<W: Write>(corrected: &CorrectedTable, writer: W) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in corrected.rows() {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn log_axis(axis: &str, summary: Option<AxisSummary>) {
    if let Some(s) = summary {
        info!(
            "Axis {axis}: max |corr| {:.2} at depth {:.1}, top {:.2}",
            s.max_abs_corr, s.depth_at_max, s.top_corr
        );
    }
}

pub fn run_correct(args: &CorrectArgs) -> anyhow::Result<()> {
    let corrected = correct_campaign(args)?;
    let summary = corrected.summary();
    log_axis("A", summary.a);
    log_axis("B", summary.b);

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create {path}"))?;
            write_corrected_csv(&corrected, file)?;
            info!("Wrote {} rows to {}", corrected.len(), path);
        }
        None => write_corrected_csv(&corrected, std::io::stdout().lock())?,
    }

    for failure in &corrected.failures {
        error!("Axis {} left uncorrected: {}", failure.axis, failure.message);
    }
    if !corrected.is_complete() {
        bail!("Correction failed for {} of 2 axes", corrected.failures.len());
    }
    Ok(())
}
