use crate::core::{DirectoryPlan, Pipeline};
use crate::domain::model::RunSummary;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Extract + transform only; nothing is written.
    pub fn plan(&self) -> Result<DirectoryPlan> {
        let records = self.pipeline.extract()?;
        tracing::info!("📥 Extracted {} physician records", records.len());
        self.pipeline.transform(records)
    }

    pub fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting directory generation");

        let records = self.pipeline.extract()?;
        let records_read = records.len();
        tracing::info!("📥 Extracted {} physician records", records_read);

        let plan = self.pipeline.transform(records)?;
        let records_rendered = plan.rendered_records();
        tracing::info!(
            "🔄 Planned {} documents covering {} physicians ({} excluded by title, {} by specialty, {} without specialty)",
            plan.documents.len(),
            records_rendered,
            plan.dropped_by_title,
            plan.dropped_by_specialty,
            plan.dropped_blank_specialty
        );

        let documents_written = self.pipeline.load(plan)?;
        tracing::info!("💾 Wrote {} documents", documents_written.len());

        Ok(RunSummary {
            records_read,
            records_rendered,
            documents_written,
        })
    }
}
