use crate::cli::{CheckArgs, KindArg};
use crate::error::{CliError, Result};
use deepbias::core::models::selection::AtomSelection;
use deepbias::core::units::OutputUnitOverride;
use deepbias::engine::config::{AdapterConfig, AdapterConfigBuilder, VirialScaling};
use deepbias::engine::kinds::ModelKindName;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum PartialAtoms {
    Serials(Vec<usize>),
    Spec(String),
}

impl PartialAtoms {
    fn into_selection(self) -> Result<AtomSelection> {
        match self {
            PartialAtoms::Serials(serials) => serials
                .into_iter()
                .map(|serial| {
                    serial.checked_sub(1).ok_or_else(|| {
                        CliError::Config("Atom serials start at 1; found 0.".to_string())
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(AtomSelection::List),
            PartialAtoms::Spec(spec) => spec
                .parse()
                .map_err(|e| CliError::Config(format!("Invalid 'atoms' value: {}", e))),
        }
    }
}

/// Bias definition as written in a TOML file; every field may be overridden from the CLI.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PartialBiasConfig {
    kind: Option<ModelKindName>,
    atoms: Option<PartialAtoms>,
    model: Option<PathBuf>,
    atype: Option<PathBuf>,
    unit_cvt: Option<f64>,
    nopbc: Option<bool>,
    virial_scaling: Option<VirialScaling>,
    #[serde(skip)]
    base_dir: PathBuf,
}

impl PartialBiasConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading bias definition from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        config.base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(config)
    }

    pub fn merge_with_cli(self, args: &CheckArgs) -> Result<(ModelKindName, AdapterConfig)> {
        let kind = args
            .kind
            .map(ModelKindName::from)
            .or(self.kind)
            .ok_or_else(|| {
                CliError::Config(
                    "A value for 'kind' is required either in the config file or via --kind."
                        .to_string(),
                )
            })?;

        let atoms = match self.atoms {
            Some(atoms) => atoms.into_selection()?,
            None => AtomSelection::All,
        };

        let model = self.model.ok_or_else(|| {
            CliError::Config("The config file must name a 'model' file.".to_string())
        })?;
        let atype = self.atype.ok_or_else(|| {
            CliError::Config("The config file must name an 'atype' file.".to_string())
        })?;

        let output_unit = OutputUnitOverride::try_from(args.unit_cvt.or(self.unit_cvt))?;

        let mut builder = AdapterConfigBuilder::new()
            .atoms(atoms)
            .model_path(resolve_relative(&self.base_dir, model))
            .atom_types_path(resolve_relative(&self.base_dir, atype))
            .output_unit(output_unit)
            .nopbc(args.nopbc || self.nopbc.unwrap_or(false));
        if let Some(scaling) = self.virial_scaling {
            builder = builder.virial_scaling(scaling);
        }

        let config = builder
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;
        Ok((kind, config))
    }
}

impl From<KindArg> for ModelKindName {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Potential => ModelKindName::Potential,
            KindArg::Dipole => ModelKindName::Dipole,
            KindArg::Polar => ModelKindName::Polar,
        }
    }
}

fn resolve_relative(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deepbias::core::models::selection::AtomSet;
    use std::fs;
    use tempfile::tempdir;

    fn check_args(config: PathBuf) -> CheckArgs {
        CheckArgs {
            config,
            natoms: 3,
            kind: None,
            length_unit: "nm".to_string(),
            energy_unit: "kj/mol".to_string(),
            unit_cvt: None,
            nopbc: false,
        }
    }

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("bias.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn full_config_file_is_parsed_and_paths_resolved() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            r#"
            kind = "polar"
            atoms = "1-3,5"
            model = "polar.pb"
            atype = "/data/type.raw"
            unit-cvt = 2.5
            nopbc = true
            virial-scaling = "output-unit-over-length"
            "#,
        );

        let partial = PartialBiasConfig::from_file(&path).unwrap();
        let (kind, config) = partial.merge_with_cli(&check_args(path)).unwrap();

        assert_eq!(kind, ModelKindName::Polar);
        assert_eq!(config.atoms, AtomSelection::List(vec![0, 1, 2, 4]));
        assert_eq!(config.model_path, dir.path().join("polar.pb"));
        assert_eq!(config.atom_types_path, PathBuf::from("/data/type.raw"));
        assert_eq!(config.output_unit, OutputUnitOverride::Value(2.5));
        assert!(!config.periodic);
        assert_eq!(
            config.virial_scaling,
            Some(VirialScaling::OutputUnitOverLength)
        );
    }

    #[test]
    fn atoms_may_be_given_as_serial_list() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "kind = \"dipole\"\natoms = [3, 1]\nmodel = \"m.pb\"\natype = \"t.raw\"\n",
        );
        let (_, config) = PartialBiasConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&check_args(path))
            .unwrap();
        assert_eq!(config.atoms, AtomSelection::List(vec![2, 0]));
        assert!(config.periodic);
        assert_eq!(config.output_unit, OutputUnitOverride::Default);
    }

    #[test]
    fn empty_serial_list_selects_whole_system() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "kind = \"dipole\"\natoms = []\nmodel = \"m.pb\"\natype = \"t.raw\"\n",
        );
        let (_, config) = PartialBiasConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&check_args(path))
            .unwrap();
        let atoms = AtomSet::resolve(&config.atoms, 3).unwrap();
        assert_eq!(atoms.indices(), &[0, 1, 2]);
    }

    #[test]
    fn cli_arguments_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "kind = \"dipole\"\nmodel = \"m.pb\"\natype = \"t.raw\"\nunit-cvt = 3.0\n",
        );
        let mut args = check_args(path.clone());
        args.kind = Some(KindArg::Potential);
        args.unit_cvt = Some(-1.0);
        args.nopbc = true;

        let (kind, config) = PartialBiasConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&args)
            .unwrap();
        assert_eq!(kind, ModelKindName::Potential);
        assert_eq!(config.output_unit, OutputUnitOverride::Default);
        assert!(!config.periodic);
    }

    #[test]
    fn non_finite_unit_cvt_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "kind = \"dipole\"\nmodel = \"m.pb\"\natype = \"t.raw\"\nunit-cvt = nan\n",
        );
        let result = PartialBiasConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&check_args(path));
        assert!(matches!(result, Err(CliError::Units(_))));
    }

    #[test]
    fn missing_kind_is_a_config_error() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "model = \"m.pb\"\natype = \"t.raw\"\n");
        let result = PartialBiasConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&check_args(path));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn zero_serial_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "kind = \"dipole\"\natoms = [0, 1]\nmodel = \"m.pb\"\natype = \"t.raw\"\n",
        );
        let result = PartialBiasConfig::from_file(&path)
            .unwrap()
            .merge_with_cli(&check_args(path));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "kind = \"dipole\"\nmodle = \"m.pb\"\n");
        let result = PartialBiasConfig::from_file(&path);
        assert!(matches!(result, Err(CliError::FileParsing { .. })));
    }
}
