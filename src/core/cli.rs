use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliPaths {
    pub config_path: PathBuf,
    pub state_path: PathBuf,
    pub history_path: PathBuf,
    pub logs_dir: PathBuf,
}

impl Default for CliPaths {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            state_path: PathBuf::from("session.json"),
            history_path: PathBuf::from("history.json"),
            logs_dir: PathBuf::from("logs"),
        }
    }
}

impl CliPaths {
    pub fn from_env() -> Result<Self, String> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = String>,
    {
        let mut paths = Self::default();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--config" => &mut paths.config_path,
                "--state" => &mut paths.state_path,
                "--history" => &mut paths.history_path,
                "--logs" => &mut paths.logs_dir,
                _ => return Err(format!("Unknown argument: {arg}")),
            };
            *slot = Self::next_path(&mut args, &arg)?;
        }
        Ok(paths)
    }

    /// All paths resolved under `dir`, keeping the default file names.
    pub fn rooted_at(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let d = Self::default();
        Self {
            config_path: dir.join(d.config_path),
            state_path: dir.join(d.state_path),
            history_path: dir.join(d.history_path),
            logs_dir: dir.join(d.logs_dir),
        }
    }

    fn next_path<I>(args: &mut I, flag: &str) -> Result<PathBuf, String>
    where
        I: Iterator<Item = String>,
    {
        args.next()
            .filter(|v| !v.starts_with("--"))
            .map(PathBuf::from)
            .ok_or_else(|| format!("Missing value for {flag}"))
    }
}
