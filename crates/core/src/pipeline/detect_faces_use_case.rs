use std::path::{Path, PathBuf};

use crate::detection::domain::detection::Detection;
use crate::detection::domain::detection_pipeline::DetectionPipeline;
use crate::detection::domain::face_model::FaceModel;
use crate::imaging::{box_renderer, image_reader, image_writer};
use crate::shared::constants::OUTPUT_SUFFIX;

/// Single-image detection pipeline: read → detect → annotate → write.
///
/// The annotated copy lands next to the input with a fixed suffix.
pub struct DetectFacesUseCase {
    pipeline: DetectionPipeline,
}

impl DetectFacesUseCase {
    pub fn new(model: Box<dyn FaceModel>) -> Self {
        Self {
            pipeline: DetectionPipeline::new(model),
        }
    }

    /// Runs detection on `input_path` and writes the annotated image.
    ///
    /// Returns the output path and the detections, in engine order.
    pub fn execute(
        &mut self,
        input_path: &Path,
    ) -> Result<(PathBuf, Vec<Detection>), Box<dyn std::error::Error>> {
        let mut frame = image_reader::load_rgb(input_path)?;
        log::info!("loaded {}x{} image", frame.width(), frame.height());

        let detections = self.pipeline.detect(&frame)?;
        log::info!("found {} faces", detections.len());

        box_renderer::draw_detections(&mut frame, &detections);

        let output_path = annotated_output_path(input_path);
        image_writer::save(&output_path, &frame)?;

        Ok((output_path, detections))
    }
}

/// `<dir>/<stem>_faces.jpg`, next to the input.
fn annotated_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.jpg"))
}
