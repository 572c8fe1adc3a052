//! The export service and its two output strategies.

use crate::error::{ExportError, ExportResult};
use crate::raster::{encode_png, CaptureSource};
use crate::sink::{DocumentSink, ImageSink, ShareSink};
use crate::BoxFuture;
use flowsketch_core::Diagram;
use std::time::{SystemTime, UNIX_EPOCH};

/// Application name used in generated export filenames.
const APP_NAME: &str = "flowsketch";

/// Generate an export filename: `flowsketch-diagram-<timestamp>.<ext>`.
pub fn export_filename(extension: &str) -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    format!("{APP_NAME}-diagram-{timestamp}.{extension}")
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportArtifact {
    /// A structured JSON document was handed to the document sink.
    Document { name: String },
    /// A PNG image was handed to the save or share collaborator.
    Image { name: String },
}

impl ExportArtifact {
    /// The generated filename of the artifact.
    pub fn name(&self) -> &str {
        match self {
            ExportArtifact::Document { name } | ExportArtifact::Image { name } => name,
        }
    }
}

/// An export strategy. The diagram is read synchronously before the
/// returned future first yields, so concurrent edits are tolerated and
/// simply not reflected in the output.
pub trait Exporter: Send + Sync {
    fn export(&self, diagram: &Diagram) -> BoxFuture<'_, ExportResult<ExportArtifact>>;
}

/// Structured export: serializes `{shapes, connectors}` to JSON and hands
/// it to a document sink.
pub struct DocumentExporter<S: DocumentSink> {
    sink: S,
}

impl<S: DocumentSink> DocumentExporter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }
}

impl<S: DocumentSink> Exporter for DocumentExporter<S> {
    fn export(&self, diagram: &Diagram) -> BoxFuture<'_, ExportResult<ExportArtifact>> {
        // Snapshot before yielding.
        let json = match diagram.to_json() {
            Ok(json) => json,
            Err(e) => {
                let err = ExportError::Serialization(e.to_string());
                return Box::pin(async move { Err(err) });
            }
        };
        let name = export_filename("json");
        Box::pin(async move {
            self.sink.save_document(&name, &json).await?;
            Ok(ExportArtifact::Document { name })
        })
    }
}

/// Where a raster export goes, chosen at construction time.
pub enum RasterDestination {
    /// Persist to storage.
    Save(Box<dyn ImageSink>),
    /// Hand off to the platform share mechanism.
    Share(Box<dyn ShareSink>),
}

/// Raster export: captures the canvas render region, encodes it as PNG,
/// and hands the bytes to the save or share collaborator.
pub struct RasterExporter<C: CaptureSource> {
    capture: C,
    destination: RasterDestination,
}

impl<C: CaptureSource> RasterExporter<C> {
    pub fn new(capture: C, destination: RasterDestination) -> Self {
        Self {
            capture,
            destination,
        }
    }
}

impl<C: CaptureSource> Exporter for RasterExporter<C> {
    fn export(&self, _diagram: &Diagram) -> BoxFuture<'_, ExportResult<ExportArtifact>> {
        // The capture collaborator reads the rendered store synchronously;
        // the diagram itself is not consulted again after this point.
        let png = self
            .capture
            .capture()
            .and_then(|image| encode_png(&image));
        let png = match png {
            Ok(png) => png,
            Err(err) => return Box::pin(async move { Err(err) }),
        };
        let name = export_filename("png");
        Box::pin(async move {
            match &self.destination {
                RasterDestination::Save(sink) => sink.save_image(&name, &png).await?,
                RasterDestination::Share(sink) => sink.share_image(&name, &png).await?,
            }
            Ok(ExportArtifact::Image { name })
        })
    }
}

/// Boundary in front of whichever strategy the platform constructed.
///
/// Every failure is logged and returned for display as a transient notice;
/// the diagram is never mutated and the editor stays usable.
pub struct ExportService {
    exporter: Box<dyn Exporter>,
}

impl ExportService {
    pub fn new(exporter: Box<dyn Exporter>) -> Self {
        Self { exporter }
    }

    /// Export a snapshot of the diagram.
    pub fn export(&self, diagram: &Diagram) -> BoxFuture<'_, ExportResult<ExportArtifact>> {
        let pending = self.exporter.export(diagram);
        Box::pin(async move {
            match pending.await {
                Ok(artifact) => {
                    log::info!("exported {}", artifact.name());
                    Ok(artifact)
                }
                Err(err) => {
                    log::warn!("export failed: {err}");
                    Err(err)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::RasterImage;
    use crate::testing::block_on;
    use flowsketch_core::{Shape, ShapeKind};
    use kurbo::Point;
    use std::sync::{Arc, Mutex};
    use uuid::Uuid;

    /// Document sink capturing what was saved.
    #[derive(Default)]
    struct MemoryDocumentSink {
        saved: Mutex<Option<(String, String)>>,
    }

    impl DocumentSink for MemoryDocumentSink {
        fn save_document(&self, name: &str, json: &str) -> BoxFuture<'_, ExportResult<()>> {
            *self.saved.lock().unwrap() = Some((name.to_string(), json.to_string()));
            Box::pin(async { Ok(()) })
        }
    }

    /// Image sink capturing what was saved, inspectable through a shared
    /// handle after the sink is boxed away.
    #[derive(Default, Clone)]
    struct MemoryImageSink {
        saved: Arc<Mutex<Option<(String, Vec<u8>)>>>,
    }

    impl ImageSink for MemoryImageSink {
        fn save_image(&self, name: &str, png: &[u8]) -> BoxFuture<'_, ExportResult<()>> {
            *self.saved.lock().unwrap() = Some((name.to_string(), png.to_vec()));
            Box::pin(async { Ok(()) })
        }
    }

    /// Share sink that reports the picker being dismissed.
    struct CancelledShareSink;

    impl ShareSink for CancelledShareSink {
        fn share_image(&self, _name: &str, _png: &[u8]) -> BoxFuture<'_, ExportResult<()>> {
            Box::pin(async { Err(ExportError::Cancelled) })
        }
    }

    struct SolidCapture;

    impl CaptureSource for SolidCapture {
        fn capture(&self) -> ExportResult<RasterImage> {
            Ok(RasterImage {
                width: 4,
                height: 4,
                rgba: vec![255; 64],
            })
        }
    }

    struct FailingCapture;

    impl CaptureSource for FailingCapture {
        fn capture(&self) -> ExportResult<RasterImage> {
            Err(ExportError::Capture("no canvas mounted".to_string()))
        }
    }

    fn sample_diagram() -> Diagram {
        let mut diagram = Diagram::new();
        let mut shape = Shape::new(
            Uuid::from_u128(1),
            ShapeKind::Rectangle,
            Point::new(10.0, 10.0),
        );
        shape.label = "A".to_string();
        diagram.insert_shape(shape);
        diagram
    }

    #[test]
    fn test_filename_pattern() {
        let name = export_filename("json");
        assert!(name.starts_with("flowsketch-diagram-"));
        assert!(name.ends_with(".json"));
        let stamp = &name["flowsketch-diagram-".len()..name.len() - ".json".len()];
        assert!(stamp.parse::<u128>().is_ok());
    }

    #[test]
    fn test_document_export_round_trips() {
        let diagram = sample_diagram();
        let exporter = DocumentExporter::new(MemoryDocumentSink::default());

        let artifact = block_on(exporter.export(&diagram)).unwrap();
        assert!(matches!(artifact, ExportArtifact::Document { .. }));

        let (name, json) = exporter.sink.saved.lock().unwrap().take().unwrap();
        assert_eq!(name, artifact.name());
        let parsed = Diagram::from_json(&json).unwrap();
        assert_eq!(parsed, diagram);
    }

    #[test]
    fn test_export_is_a_snapshot() {
        // An edit made after the export future is created is not part of
        // its output.
        let mut diagram = sample_diagram();
        let exporter = DocumentExporter::new(MemoryDocumentSink::default());

        let pending = exporter.export(&diagram);
        let before = diagram.clone();
        block_on(pending).unwrap();

        diagram.update_position(Uuid::from_u128(1), Point::new(500.0, 500.0));
        let (_, json) = exporter.sink.saved.lock().unwrap().take().unwrap();
        assert_eq!(Diagram::from_json(&json).unwrap(), before);
    }

    #[test]
    fn test_raster_export_saves_png() {
        let diagram = sample_diagram();
        let sink = MemoryImageSink::default();
        let saved = sink.saved.clone();
        let exporter = RasterExporter::new(SolidCapture, RasterDestination::Save(Box::new(sink)));

        let artifact = block_on(exporter.export(&diagram)).unwrap();
        assert!(matches!(artifact, ExportArtifact::Image { .. }));
        assert!(artifact.name().ends_with(".png"));

        let (name, png) = saved.lock().unwrap().take().unwrap();
        assert_eq!(name, artifact.name());
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_capture_failure_leaves_diagram_untouched() {
        let diagram = sample_diagram();
        let before = diagram.clone();
        let service = ExportService::new(Box::new(RasterExporter::new(
            FailingCapture,
            RasterDestination::Save(Box::new(MemoryImageSink::default())),
        )));

        let result = block_on(service.export(&diagram));
        assert!(matches!(result, Err(ExportError::Capture(_))));
        assert_eq!(diagram, before);
    }

    #[test]
    fn test_cancelled_share_surfaces_notice() {
        let diagram = sample_diagram();
        let service = ExportService::new(Box::new(RasterExporter::new(
            SolidCapture,
            RasterDestination::Share(Box::new(CancelledShareSink)),
        )));

        let err = block_on(service.export(&diagram)).unwrap_err();
        assert!(matches!(err, ExportError::Cancelled));
        assert_eq!(err.user_notice(), "Could not export the diagram. Please try again.");
    }

    #[test]
    fn test_service_with_document_strategy() {
        let diagram = sample_diagram();
        let service =
            ExportService::new(Box::new(DocumentExporter::new(MemoryDocumentSink::default())));
        let artifact = block_on(service.export(&diagram)).unwrap();
        assert!(artifact.name().ends_with(".json"));
    }
}
