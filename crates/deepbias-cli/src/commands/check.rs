use crate::cli::CheckArgs;
use crate::config::PartialBiasConfig;
use crate::error::Result;
use deepbias::core::units::HostUnits;
use deepbias::workflows::validate::{self, SetupReport};
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    let partial_config = PartialBiasConfig::from_file(&args.config)?;
    info!("Merging bias definition from file and CLI arguments...");
    let (kind, config) = partial_config.merge_with_cli(&args)?;

    let host_units = HostUnits::from_names(&args.length_unit, &args.energy_unit)?;
    info!(
        "Host units: 1 length = {} nm, 1 energy = {} kJ/mol",
        host_units.length, host_units.energy
    );

    let report = validate::run(kind, &config, args.natoms, host_units)?;
    println!("{}", render_report(&report));
    Ok(())
}

fn render_report(report: &SetupReport) -> String {
    let mut lines = Vec::new();
    lines.push(format!("Model kind:        {}", report.kind));
    lines.push(format!("Model file:        {}", report.model_path.display()));
    let channels = if report.channels.iter().all(|c| c.is_empty()) {
        "(single value)".to_string()
    } else {
        report.channels.join(" ")
    };
    lines.push(format!("Output channels:   {}", channels));
    if report.covers_whole_system() {
        lines.push(format!("Atoms:             all {}", report.atoms.len()));
    } else {
        lines.push(format!(
            "Atoms:             {} of {} (selection does not cover the whole system)",
            report.atoms.len(),
            report.total_atoms
        ));
    }
    lines.push(format!(
        "Atom types:        {}",
        report
            .atom_types
            .as_slice()
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    ));
    lines.push(format!(
        "Periodic:          {}",
        if report.periodic { "yes" } else { "no (NOPBC)" }
    ));
    lines.push(format!("Length unit:       {}", report.units.length_unit));
    lines.push(format!("Output unit:       {}", report.units.output_unit));
    lines.push(format!("Virial scaling:    {:?}", report.virial_scaling));
    lines.join("\n")
}
