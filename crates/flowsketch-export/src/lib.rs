//! FlowSketch Export Library
//!
//! Turns a diagram snapshot into either a structured JSON document or a
//! rendered PNG image, and hands the result to a save/share collaborator.
//! Capture, save and share are capability traits; which output form is
//! used is decided at construction time, not by a runtime platform check.

pub mod error;
pub mod raster;
pub mod service;
pub mod sink;

pub use error::{ExportError, ExportResult};
pub use raster::{encode_png, CaptureSource, RasterImage};
pub use service::{
    export_filename, DocumentExporter, ExportArtifact, ExportService, Exporter, RasterDestination,
    RasterExporter,
};
pub use sink::{DirectorySink, DocumentSink, ImageSink, ShareSink};

use std::future::Future;
use std::pin::Pin;

/// Boxed future for async collaborator operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;
