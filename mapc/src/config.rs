use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::compiler::CompileOptions;

pub const DEFAULT_OUTPUT: &str = "out.tmb";
pub const DEFAULT_DATA_DIR: &str = "data";
/// Read from the working directory when no `--config` is given, if it exists.
pub const DEFAULT_CONFIG: &str = "mapc.ini";
pub const DEFAULT_EMPTY_TEXTURE: &str = "__TB_empty";

pub const USAGE: &str = "usage: mapc <source.map> [-o|--output out.tmb] [-d|--data-dir dir] [-c|--config mapc.ini] [-v|--verbose]";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{}", USAGE)]
    Help,
    #[error("no source map given")]
    MissingSource,
    #[error("{flag} needs a value")]
    MissingValue { flag: String },
    #[error("unknown option {0}")]
    UnknownFlag(String),
    #[error("unexpected argument {0}")]
    ExtraArgument(String),
    #[error("failed to load {}: {source}", path.display())]
    Ini { path: PathBuf, source: ini::Error },
}

/// Settings for one compiler run. Command line flags win over the config file, which wins
/// over the defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub source: PathBuf,
    pub output: PathBuf,
    pub data_dir: PathBuf,
    /// Textures that mark a brush side as collision only.
    pub empty_textures: Vec<String>,
    pub verbose: bool,
}

#[derive(Default)]
struct Args {
    source: Option<PathBuf>,
    output: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    config: Option<PathBuf>,
    verbose: bool,
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf, ConfigError> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingValue {
            flag: flag.to_owned(),
        })
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, ConfigError> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-o" | "--output" => parsed.output = Some(flag_value(&mut args, &arg)?),
            "-d" | "--data-dir" => parsed.data_dir = Some(flag_value(&mut args, &arg)?),
            "-c" | "--config" => parsed.config = Some(flag_value(&mut args, &arg)?),
            "-v" | "--verbose" => parsed.verbose = true,
            "-h" | "--help" => return Err(ConfigError::Help),
            flag if flag.len() > 1 && flag.starts_with('-') => {
                return Err(ConfigError::UnknownFlag(arg.clone()))
            }
            _ if parsed.source.is_some() => return Err(ConfigError::ExtraArgument(arg.clone())),
            _ => parsed.source = Some(PathBuf::from(&arg)),
        }
    }

    Ok(parsed)
}

fn load_ini(path: &Path) -> Result<Ini, ConfigError> {
    Ini::load_from_file(path).map_err(|source| ConfigError::Ini {
        path: path.to_owned(),
        source,
    })
}

impl Config {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: DEFAULT_OUTPUT.into(),
            data_dir: DEFAULT_DATA_DIR.into(),
            empty_textures: vec![DEFAULT_EMPTY_TEXTURE.to_owned()],
            verbose: false,
        }
    }

    /// Build the configuration from the command line, without the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ConfigError> {
        let args = parse_args(args)?;
        let mut config = Self::new(args.source.ok_or(ConfigError::MissingSource)?);

        let ini = match &args.config {
            Some(path) => Some(load_ini(path)?),
            None if Path::new(DEFAULT_CONFIG).is_file() => Some(load_ini(Path::new(DEFAULT_CONFIG))?),
            None => None,
        };
        if let Some(ini) = &ini {
            config.apply_ini(ini);
        }

        if let Some(output) = args.output {
            config.output = output;
        }
        if let Some(data_dir) = args.data_dir {
            config.data_dir = data_dir;
        }
        config.verbose = args.verbose;

        Ok(config)
    }

    /// Take the settings present in the `[compiler]` section.
    pub fn apply_ini(&mut self, ini: &Ini) {
        let Some(section) = ini.section(Some("compiler")) else {
            return;
        };

        if let Some(data_dir) = section.get("data_dir") {
            self.data_dir = data_dir.into();
        }
        if let Some(output) = section.get("output") {
            self.output = output.into();
        }
        if let Some(list) = section.get("empty_textures") {
            self.empty_textures = list
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
                .collect();
        }
    }

    pub fn options(&self) -> CompileOptions {
        CompileOptions {
            empty_textures: self.empty_textures.clone(),
        }
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    fn args(line: &str) -> Result<Config, ConfigError> {
        Config::from_args(line.split_whitespace().map(str::to_owned))
    }

    #[test]
    fn defaults() {
        let config = args("maps/start.map").unwrap();

        assert_eq!(config, Config::new("maps/start.map"));
        assert_eq!(config.output, PathBuf::from("out.tmb"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.empty_textures, ["__TB_empty"]);
        assert!(!config.verbose);
    }

    #[test]
    fn flags_in_any_order() {
        let config = args("-o build/start.tmb start.map --data-dir assets -v").unwrap();

        assert_eq!(config.source, PathBuf::from("start.map"));
        assert_eq!(config.output, PathBuf::from("build/start.tmb"));
        assert_eq!(config.data_dir, PathBuf::from("assets"));
        assert!(config.verbose);
    }

    #[test]
    fn bad_command_lines() {
        assert!(matches!(args(""), Err(ConfigError::MissingSource)));
        assert!(matches!(args("-v"), Err(ConfigError::MissingSource)));
        assert!(matches!(
            args("a.map -o"),
            Err(ConfigError::MissingValue { flag }) if flag == "-o"
        ));
        assert!(matches!(
            args("a.map --fast"),
            Err(ConfigError::UnknownFlag(flag)) if flag == "--fast"
        ));
        assert!(matches!(
            args("a.map b.map"),
            Err(ConfigError::ExtraArgument(arg)) if arg == "b.map"
        ));
        assert!(matches!(args("a.map --help"), Err(ConfigError::Help)));
        assert!(matches!(
            args("a.map -c does/not/exist.ini"),
            Err(ConfigError::Ini { .. })
        ));
    }

    #[test]
    fn ini_compiler_section() {
        let ini = Ini::load_from_str(
            "[compiler]\ndata_dir = ../data\nempty_textures = __TB_empty, common/clip ,,common/skip\n",
        )
        .unwrap();

        let mut config = Config::new("a.map");
        config.apply_ini(&ini);

        assert_eq!(config.data_dir, PathBuf::from("../data"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(
            config.empty_textures,
            ["__TB_empty", "common/clip", "common/skip"]
        );
        assert_eq!(config.options().empty_textures, config.empty_textures);
    }

    #[test]
    fn flags_override_the_config_file() {
        let path = std::env::temp_dir().join(format!("mapc-config-{}.ini", std::process::id()));
        std::fs::write(&path, "[compiler]\noutput = from_ini.tmb\ndata_dir = ini_data\n").unwrap();

        let config = Config::from_args(
            ["a.map", "-c", path.to_str().unwrap(), "-o", "from_flag.tmb"]
                .into_iter()
                .map(str::to_owned),
        );
        let _ = std::fs::remove_file(&path);
        let config = config.unwrap();

        assert_eq!(config.output, PathBuf::from("from_flag.tmb"));
        assert_eq!(config.data_dir, PathBuf::from("ini_data"));
    }
}
