//! The injected document-understanding client and the extraction step built on it.

use crate::error::OcrSheetError;
use crate::error::ResultMessage;
use crate::extraction::classify::ClassificationStrategy;
use crate::extraction::classify::FilenameHeuristic;
use crate::extraction::classify::ProcessorKind;
use crate::extraction::document::ProcessedDocument;
use crate::extraction::document::RawDocument;
use crate::extraction::ExtractionResult;
use tracing::debug;
use tracing::info;

/// Identifies the service processors a caller has provisioned.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessorConfig {
    pub project_id: String,
    pub location: String,
    pub ocr_processor_id: String,
    pub form_parser_processor_id: String,
}

impl ProcessorConfig {
    pub fn new(project_id: &str, location: &str, ocr_processor_id: &str, form_parser_processor_id: &str) -> Self {
        Self {
            project_id: project_id.to_owned(),
            location: location.to_owned(),
            ocr_processor_id: ocr_processor_id.to_owned(),
            form_parser_processor_id: form_parser_processor_id.to_owned(),
        }
    }

    /// Fully qualified resource name of the processor for `kind`.
    pub fn resource_name(&self, kind: ProcessorKind) -> String {
        let processor_id = match kind {
            ProcessorKind::Ocr => &self.ocr_processor_id,
            ProcessorKind::FormParser => &self.form_parser_processor_id,
        };
        format!("projects/{}/locations/{}/processors/{}", self.project_id, self.location, processor_id)
    }
}

/// Client of the remote document-understanding service.
///
/// Constructed once by the application and lent to every [`Extractor`];
/// transport and credentials live entirely behind this trait.
pub trait DocumentProcessor {
    /// Sends one document to the named processor and returns its recognized content.
    fn process(&self, resource_name: &str, document: &RawDocument) -> anyhow::Result<ProcessedDocument>;
}

/// Runs one document through classification, the service and response shaping.
pub struct Extractor<'a, P: DocumentProcessor + ?Sized, S: ClassificationStrategy = FilenameHeuristic> {
    processor: &'a P,
    config: ProcessorConfig,
    strategy: S,
}

impl<'a, P: DocumentProcessor + ?Sized> Extractor<'a, P> {
    /// Creates an extractor using the default file name heuristic.
    pub fn new(processor: &'a P, config: ProcessorConfig) -> Self {
        Self::with_strategy(processor, config, FilenameHeuristic::default())
    }
}

impl<'a, P: DocumentProcessor + ?Sized, S: ClassificationStrategy> Extractor<'a, P, S> {
    pub fn with_strategy(processor: &'a P, config: ProcessorConfig, strategy: S) -> Self {
        Self { processor, config, strategy }
    }

    /// Extracts one document. The service is called exactly once.
    pub fn extract(&self, document: &RawDocument) -> Result<ExtractionResult, OcrSheetError> {
        let kind = self.strategy.classify(document);
        let resource_name = self.config.resource_name(kind);
        info!("Processing '{}' ({}) with {}", document.file_name, document.mime_type, kind.as_str());

        let processed = self
            .processor
            .process(&resource_name, document)
            .map_err(OcrSheetError::ServiceError)
            .with_prefix(kind.as_str())?;
        debug!(
            "Service returned {} characters, {} entities, {} pages",
            processed.text.len(),
            processed.entities.len(),
            processed.pages.len()
        );
        processed.into_result(kind).with_prefix(&document.file_name)
    }
}
