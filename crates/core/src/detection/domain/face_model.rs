use crate::shared::frame::Frame;

/// Raw detection row as emitted by the inference engine, in input-image
/// coordinates: `[x, y, w, h, ...]` with engine-specific trailing columns.
pub type DetectionRow = Vec<f32>;

/// Domain interface over the opaque inference engine.
///
/// Implementations may be stateful, hence `&mut self`.
pub trait FaceModel: Send {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectionRow>, Box<dyn std::error::Error>>;
}
