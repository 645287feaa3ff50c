use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Document rendering error: {message}")]
    RenderError { message: String },

    #[error("Column '{column}' not found in input header (available: {available})")]
    MissingColumnError { column: String, available: String },

    #[error("Unsupported input file: {path}")]
    UnsupportedInputError { path: String },

    #[error("Workbook has no worksheet: {path}")]
    EmptyWorkbookError { path: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl DirectoryError {
    /// 給 CLI 使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            DirectoryError::IoError(e) => format!("File access failed: {}", e),
            DirectoryError::CsvError(_) | DirectoryError::SpreadsheetError(_) => {
                "The directory spreadsheet could not be read".to_string()
            }
            DirectoryError::MissingColumnError { column, .. } => {
                format!("The spreadsheet has no '{}' column", column)
            }
            DirectoryError::UnsupportedInputError { path } => {
                format!("'{}' is not a spreadsheet this tool can read", path)
            }
            DirectoryError::EmptyWorkbookError { path } => {
                format!("'{}' contains no worksheet", path)
            }
            DirectoryError::RenderError { .. } => "A directory document could not be generated".to_string(),
            DirectoryError::ConfigError { .. } | DirectoryError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DirectoryError::IoError(_) => "Check that the input file exists and the output directory is writable",
            DirectoryError::CsvError(_) | DirectoryError::SpreadsheetError(_) => {
                "Re-export the sheet as .xlsx or .csv and try again"
            }
            DirectoryError::MissingColumnError { .. } => {
                "Rename the header in the sheet or remap it under [input.columns] in the config"
            }
            DirectoryError::UnsupportedInputError { .. } => "Use a .xls, .xlsx, .xlsm, .ods or .csv file",
            DirectoryError::EmptyWorkbookError { .. } => "Make sure the physician list is on the first sheet",
            DirectoryError::RenderError { .. } => "Re-run with --verbose to see which document failed",
            DirectoryError::ConfigError { .. } | DirectoryError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
