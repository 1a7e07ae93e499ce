pub mod capture_model;
pub mod loader;

pub use capture_model::{CanvasCapture, IframeCapture, PageCapture, ScanCapture, ShadowHostCapture};
pub use loader::{CaptureError, load_capture};
