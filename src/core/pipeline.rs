use crate::adapters::spreadsheet::load_records;
use crate::config::toml_config::DirectoryConfig;
use crate::core::grouping::plan_documents;
use crate::core::render::render_document;
use crate::core::{DirectoryPlan, PhysicianRecord, Pipeline, Storage};
use crate::utils::error::Result;

/// Reads the directory sheet, partitions it by specialty and writes one
/// `.docx` per document through `Storage`.
pub struct DirectoryPipeline<S: Storage> {
    storage: S,
    config: DirectoryConfig,
}

impl<S: Storage> DirectoryPipeline<S> {
    pub fn new(storage: S, config: DirectoryConfig) -> Self {
        Self { storage, config }
    }
}

impl<S: Storage> Pipeline for DirectoryPipeline<S> {
    fn extract(&self) -> Result<Vec<PhysicianRecord>> {
        tracing::debug!("Reading directory sheet: {}", self.config.input.path);
        load_records(&self.config.input)
    }

    fn transform(&self, records: Vec<PhysicianRecord>) -> Result<DirectoryPlan> {
        Ok(plan_documents(&records, &self.config))
    }

    fn load(&self, plan: DirectoryPlan) -> Result<Vec<String>> {
        let closing = self.config.closing_paragraph();
        let mut written = Vec::with_capacity(plan.documents.len());

        for document in &plan.documents {
            let bytes = render_document(document, &closing)?;
            let location = self.storage.write_file(&document.file_name(), &bytes)?;
            tracing::info!(
                "📄 {} ({} physicians) -> {}",
                document.title,
                document.record_count(),
                location
            );
            written.push(location);
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::GroupConfig;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn names(&self) -> Vec<String> {
            let files = self.files.lock().unwrap();
            let mut names: Vec<String> = files.keys().cloned().collect();
            names.sort();
            names
        }
    }

    impl Storage for MockStorage {
        fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
            let mut files = self.files.lock().unwrap();
            files.insert(path.to_string(), data.to_vec());
            Ok(format!("mock://{}", path))
        }
    }

    fn physician(last: &str, specialty: &str) -> PhysicianRecord {
        PhysicianRecord {
            last_name: last.to_string(),
            first_name: "Pat".to_string(),
            title: "MD".to_string(),
            specialty: specialty.to_string(),
            ..PhysicianRecord::default()
        }
    }

    #[test]
    fn test_transform_and_load_write_one_file_per_document() {
        let storage = MockStorage::default();
        let mut config = DirectoryConfig::default();
        config.groups = vec![GroupConfig::named("John Muir - Cardiology", &["Cardiology"])];
        let pipeline = DirectoryPipeline::new(storage.clone(), config);

        let plan = pipeline
            .transform(vec![
                physician("Adams", "Cardiology"),
                physician("Baker", "Hematology/Oncology"),
                physician("Clark", "Anesthesiology"),
            ])
            .unwrap();
        assert_eq!(plan.documents.len(), 2);

        let written = pipeline.load(plan).unwrap();

        assert_eq!(written.len(), 2);
        assert_eq!(
            storage.names(),
            vec!["Hematology-Oncology.docx", "John Muir - Cardiology.docx"]
        );
    }

    #[test]
    fn test_extract_reports_missing_input() {
        let mut config = DirectoryConfig::default();
        config.input.path = "/nonexistent/directory.csv".to_string();
        let pipeline = DirectoryPipeline::new(MockStorage::default(), config);

        assert!(pipeline.extract().is_err());
    }
}
