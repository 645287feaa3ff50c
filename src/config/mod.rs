pub mod cli;
pub mod toml_config;

pub use toml_config::DirectoryConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "physician-directory")]
#[command(about = "Generate per-specialty physician directory documents from the directory spreadsheet")]
pub struct CliConfig {
    /// Directory spreadsheet (.xls, .xlsx, .xlsm, .ods or .csv)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Where the .docx files are written ({year} and {month} are expanded)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Path to TOML configuration file; built-in directory rules are used when omitted
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    /// Print the document plan as JSON without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入 TOML 配置（或內建規則），再套用命令列覆蓋
    pub fn load_directory_config(&self) -> Result<DirectoryConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                DirectoryConfig::from_file(path)?
            }
            None => {
                tracing::debug!("No config file given, using built-in directory rules");
                DirectoryConfig::default()
            }
        };

        if let Some(input) = &self.input {
            config.input.path = input.clone();
            tracing::info!("🔧 Input overridden to: {}", input);
        }

        if let Some(output_dir) = &self.output_dir {
            config.output.directory = output_dir.clone();
            tracing::info!("🔧 Output directory overridden to: {}", output_dir);
        }

        Ok(config)
    }
}
