use crate::domain::model::{sanitize_file_stem, SectionMode};
use crate::utils::error::{DirectoryError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "ods", "csv"];

/// Cell values read as missing, the usual spreadsheet and export markers.
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "NA", "N/A", "n/a", "#N/A", "#N/A N/A", "#NA", "<NA>", "NULL", "null", "NaN", "-NaN", "nan", "-nan",
    "None", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filters: FilterConfig,
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub path: String,
    /// 視為空值的儲存格內容
    pub na_values: Vec<String>,
    pub columns: ColumnMapping,
}

/// Header name in the sheet for each physician field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub last_name: String,
    pub first_name: String,
    pub title: String,
    pub specialty: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub office_phone: String,
    pub office_fax: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// 支援 {year} / {month} 佔位符
    pub directory: String,
    pub title_prefix: String,
    pub closing_text: String,
    pub booking_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub excluded_titles: Vec<String>,
    pub excluded_specialties: Vec<String>,
}

/// Specialties merged into one document. Set either `specialties` or `prefix`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupConfig {
    pub title: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default)]
    pub heading: Option<String>,
    /// Unset: named groups are combined, prefix groups split per specialty.
    #[serde(default)]
    pub sections: Option<SectionMode>,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            input: InputConfig::default(),
            output: OutputConfig::default(),
            filters: FilterConfig::default(),
            groups: default_groups(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: "jmdirectory2018.xls".to_string(),
            na_values: to_strings(DEFAULT_NA_VALUES),
            columns: ColumnMapping::default(),
        }
    }
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            last_name: "LAST NAME".to_string(),
            first_name: "FIRST NAME".to_string(),
            title: "TITLE".to_string(),
            specialty: "SPECIALTY1".to_string(),
            address_line1: "ADDRESS LINE1".to_string(),
            address_line2: "ADDRESS LINE 2".to_string(),
            city: "CITY".to_string(),
            state: "STATE".to_string(),
            zip: "ZIP".to_string(),
            office_phone: "OFFICE PHONE".to_string(),
            office_fax: "OFFICE FAX".to_string(),
        }
    }
}

impl ColumnMapping {
    /// (欄位名稱, 表頭) 依 PhysicianRecord 欄位順序
    pub fn headers(&self) -> [(&'static str, &str); 11] {
        [
            ("last_name", self.last_name.as_str()),
            ("first_name", self.first_name.as_str()),
            ("title", self.title.as_str()),
            ("specialty", self.specialty.as_str()),
            ("address_line1", self.address_line1.as_str()),
            ("address_line2", self.address_line2.as_str()),
            ("city", self.city.as_str()),
            ("state", self.state.as_str()),
            ("zip", self.zip.as_str()),
            ("office_phone", self.office_phone.as_str()),
            ("office_fax", self.office_fax.as_str()),
        ]
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "worddoc".to_string(),
            title_prefix: "John Muir - ".to_string(),
            closing_text: "Get the most up to date information and schedule an appointment online"
                .to_string(),
            booking_url: "https://www.johnmuirhealth.com/fad/".to_string(),
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            excluded_titles: to_strings(&["PA", "PA-C", "CNM", "NP", "RN", "RNFA"]),
            excluded_specialties: to_strings(&[
                "Addiction Specialist",
                "Anesthesiology",
                "Cardiac Anesthesiology",
                "Dentistry",
                "Diagnostic Radiology",
                "Emergency Medicine",
                "Gastroenterology (Hospital-Based Only)",
                "General Surgery-Surgical Assist",
                "Hospitalist",
                "Hyperbaric Medicine",
                "Neonatology",
                "Nurse Practitioner - Breast Health",
                "Nurse Practitioner - Palliative Care",
                "Palliative Care",
                "Pathology",
                "Pediatric Hospitalist",
                "Pediatric Radiology",
                "Perioperative Medicine",
                "Physician Assistant - Orthopedic",
                "Registered Nurse First Assist (RNFA)",
                "Spine Specialist",
                "Surgical Assistant",
                "Teleradiology",
                "Urgent Care Provider",
            ]),
        }
    }
}

impl GroupConfig {
    pub fn named(title: &str, specialties: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            specialties: to_strings(specialties),
            prefix: None,
            heading: None,
            sections: None,
        }
    }

    pub fn prefixed(title: &str, prefix: &str) -> Self {
        Self {
            title: title.to_string(),
            specialties: Vec::new(),
            prefix: Some(prefix.to_string()),
            heading: None,
            sections: None,
        }
    }

    pub fn with_sections(mut self, sections: SectionMode) -> Self {
        self.sections = Some(sections);
        self
    }

    pub fn is_prefix_group(&self) -> bool {
        self.prefix.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn section_mode(&self) -> SectionMode {
        match self.sections {
            Some(mode) => mode,
            None if self.is_prefix_group() => SectionMode::PerSpecialty,
            None => SectionMode::Combined,
        }
    }
}

fn default_groups() -> Vec<GroupConfig> {
    vec![
        GroupConfig::named(
            "John Muir - Thoracic & Cardiothoracic Surgery",
            &["Cardiac Surgery", "Cardiothoracic Surgery", "Thoracic Surgery"],
        ),
        GroupConfig::named(
            "John Muir - Cardiology",
            &["Cardiology", "Cardiac Electrophysiology", "Interventional Cardiology"],
        ),
        GroupConfig::named(
            "John Muir - Ophthalmology",
            &["Ophthalmology", "Oculoplastic Surgery", "Retinal Ophthalmology"],
        ),
        GroupConfig::named(
            "John Muir - General Surgery and Colorectal Surgery",
            &["General Surgery", "Colon and Rectal Surgery"],
        ),
        GroupConfig::named(
            "John Muir - OB-GYN and Gyn-Onc",
            &[
                "Obstetrics and Gynecology",
                "Perinatology",
                "Gynecologic Oncology",
                "Gynecology",
                "Obstetrics",
                "Reproductive Endocrinology and Infertility",
            ],
        ),
        // 注意 "Pediatric " 後的空白，才會只收小兒次專科
        GroupConfig::prefixed("John Muir - Pediatric Specialties", "Pediatric "),
    ]
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl DirectoryConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DirectoryError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DirectoryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DIRECTORY_SHEET})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DirectoryError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 輸出目錄，展開 {year} / {month}
    pub fn output_directory(&self) -> PathBuf {
        self.output_directory_at(Local::now().date_naive())
    }

    pub fn output_directory_at(&self, date: NaiveDate) -> PathBuf {
        let expanded = self
            .output
            .directory
            .replace("{year}", &format!("{:04}", date.year()))
            .replace("{month}", &format!("{:02}", date.month()));
        PathBuf::from(expanded)
    }

    /// 文件結尾的預約說明段落
    pub fn closing_paragraph(&self) -> String {
        format!("{}: {}", self.output.closing_text, self.output.booking_url)
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_file_extension("input.path", &self.input.path, SUPPORTED_INPUT_EXTENSIONS)?;
        validation::validate_path("output.directory", &self.output.directory)?;
        validation::validate_url("output.booking_url", &self.output.booking_url)?;

        for (field, header) in self.input.columns.headers() {
            validation::validate_non_empty_string(&format!("input.columns.{}", field), header)?;
        }

        for group in &self.groups {
            validation::validate_non_empty_string("groups.title", &group.title)?;

            if group.is_prefix_group() == !group.specialties.is_empty() {
                return Err(DirectoryError::InvalidConfigValueError {
                    field: "groups".to_string(),
                    value: group.title.clone(),
                    reason: "A group needs either a non-empty 'specialties' list or a 'prefix', not both"
                        .to_string(),
                });
            }
        }

        // 不分大小寫比較清理後的檔名，避免輸出檔互相覆蓋
        let file_stems: Vec<String> = self
            .groups
            .iter()
            .map(|g| sanitize_file_stem(&g.title).to_lowercase())
            .collect();
        validation::validate_unique("groups.title", file_stems.iter().map(String::as_str))?;

        Ok(())
    }
}

impl Validate for DirectoryConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
