use crate::detection::domain::detection::{BoundingBox, Detection};
use crate::detection::domain::face_model::FaceModel;
use crate::shared::constants::{CONFIDENCE_COLUMN, MAX_INFERENCE_WIDTH};
use crate::shared::frame::Frame;

/// Runs a face model over an image and maps detections back to
/// original-image pixel coordinates.
///
/// Wide images are downscaled to [`MAX_INFERENCE_WIDTH`] before inference;
/// box coordinates are rescaled with integer truncation on every dimension.
pub struct DetectionPipeline {
    model: Box<dyn FaceModel>,
}

impl DetectionPipeline {
    pub fn new(model: Box<dyn FaceModel>) -> Self {
        Self { model }
    }

    pub fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Box<dyn std::error::Error>> {
        let org_w = frame.width() as i32;
        let org_h = frame.height() as i32;

        let input = if frame.width() > MAX_INFERENCE_WIDTH {
            downscale_to_width(frame, MAX_INFERENCE_WIDTH)
        } else {
            frame.clone()
        };
        let input_w = input.width() as i32;
        let input_h = input.height() as i32;

        let rows = self.model.detect(&input)?;

        let mut detections = Vec::with_capacity(rows.len());
        for row in rows {
            if row.len() < 4 {
                continue;
            }
            let mut x = row[0] as i32;
            let mut y = row[1] as i32;
            let mut w = row[2] as i32;
            let mut h = row[3] as i32;

            if org_w != input_w || org_h != input_h {
                x = (x * org_w) / input_w;
                y = (y * org_h) / input_h;
                w = (w * org_w) / input_w;
                h = (h * org_h) / input_h;
            }

            let confidence = row[CONFIDENCE_COLUMN] as f64;
            detections.push(Detection {
                bounding_box: BoundingBox {
                    x,
                    y,
                    width: w,
                    height: h,
                },
                confidence,
            });
        }

        Ok(detections)
    }
}

/// Downscales a frame to `max_width`, preserving aspect ratio.
///
/// The new height truncates rather than rounds.
fn downscale_to_width(frame: &Frame, max_width: u32) -> Frame {
    let new_height =
        ((frame.height() as f64) * (max_width as f64 / frame.width() as f64)) as u32;
    let new_height = new_height.max(1);

    let img = image::RgbImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .expect("Frame data length must match dimensions");
    let resized =
        image::imageops::resize(&img, max_width, new_height, image::imageops::FilterType::Triangle);
    Frame::new(resized.into_raw(), max_width, new_height, 3)
}
