use std::path::PathBuf;

use clap::Parser;
use postrun::config::Config;
use postrun::domain::services::ModuleRequest;
use postrun::domain::value_objects::ModeSetting;

/// postrun - deploy Puppet modules for every environment
#[derive(Parser, Debug)]
#[command(name = "postrun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Deploy only this module
    #[arg(short, long)]
    pub module: Option<String>,

    /// Check out this branch or tag instead of the catalog ref
    #[arg(short = 'b', long = "branch", visible_alias = "ref", requires = "module")]
    pub branch: Option<String>,

    /// Config file (default: $POSTRUN_CONFIG or /etc/puppetlabs/postrun.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Deploy mode: auto, git or local
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<ModeSetting>,

    /// Location to deploy for, instead of asking facter
    #[arg(long)]
    pub location: Option<String>,

    /// Log file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_mode(value: &str) -> Result<ModeSetting, String> {
    ModeSetting::parse(value)
        .ok_or_else(|| format!("unknown mode '{}' (expected auto, git or local)", value))
}

impl Cli {
    /// Module restriction requested on the command line
    pub fn module_request(&self) -> ModuleRequest {
        match (&self.module, &self.branch) {
            (Some(module), Some(branch)) => ModuleRequest::single(module).with_ref(branch),
            (Some(module), None) => ModuleRequest::single(module),
            _ => ModuleRequest::all(),
        }
    }

    /// Layer command-line settings over `config`
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(location) = &self.location {
            config.location = Some(location.clone());
        }
        if let Some(file) = &self.log_file {
            config.log.file = file.clone();
        }
        config
    }
}
