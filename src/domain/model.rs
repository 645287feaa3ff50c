use serde::{Deserialize, Serialize};

/// Characters that cannot appear in an output file name.
const UNSAFE_FILE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| if UNSAFE_FILE_CHARS.contains(&c) { '-' } else { c })
        .collect()
}

/// One physician row from the directory sheet. Missing cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicianRecord {
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

/// How a group's records are split into headed tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionMode {
    /// One heading and one table for every record of the group.
    Combined,
    /// One heading and one table per distinct specialty label.
    PerSpecialty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectorySection {
    pub heading: String,
    pub records: Vec<PhysicianRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryDocument {
    pub title: String,
    /// File name without the `.docx` extension, already sanitized.
    pub file_stem: String,
    pub sections: Vec<DirectorySection>,
}

impl DirectoryDocument {
    pub fn file_name(&self) -> String {
        format!("{}.docx", self.file_stem)
    }

    pub fn record_count(&self) -> usize {
        self.sections.iter().map(|s| s.records.len()).sum()
    }

    pub fn records(&self) -> impl Iterator<Item = &PhysicianRecord> {
        self.sections.iter().flat_map(|s| s.records.iter())
    }
}

/// Result of partitioning the sheet into documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryPlan {
    pub documents: Vec<DirectoryDocument>,
    pub dropped_by_title: usize,
    pub dropped_by_specialty: usize,
    pub dropped_blank_specialty: usize,
}

impl DirectoryPlan {
    pub fn rendered_records(&self) -> usize {
        self.documents.iter().map(|d| d.record_count()).sum()
    }
}

/// What a finished run produced.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub records_read: usize,
    pub records_rendered: usize,
    pub documents_written: Vec<String>,
}
