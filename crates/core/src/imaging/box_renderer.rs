use crate::detection::domain::detection::{BoundingBox, Detection};
use crate::shared::frame::Frame;

/// Stroke width in pixels for detection rectangles.
const STROKE: i32 = 3;

/// Rectangle stroke color (red).
const COLOR: [u8; 3] = [255, 0, 0];

/// Strokes a rectangle onto the frame for every detection.
///
/// Boxes partially outside the frame are clipped at the edges.
pub fn draw_detections(frame: &mut Frame, detections: &[Detection]) {
    for detection in detections {
        draw_rect(frame, &detection.bounding_box);
    }
}

fn draw_rect(frame: &mut Frame, bbox: &BoundingBox) {
    for t in 0..STROKE {
        // Top and bottom edges.
        for x in bbox.x..bbox.x + bbox.width {
            put_pixel(frame, x, bbox.y + t);
            put_pixel(frame, x, bbox.y + bbox.height - 1 - t);
        }
        // Left and right edges.
        for y in bbox.y..bbox.y + bbox.height {
            put_pixel(frame, bbox.x + t, y);
            put_pixel(frame, bbox.x + bbox.width - 1 - t, y);
        }
    }
}

fn put_pixel(frame: &mut Frame, x: i32, y: i32) {
    let w = frame.width() as i32;
    let h = frame.height() as i32;
    if x < 0 || y < 0 || x >= w || y >= h {
        return;
    }
    let idx = ((y as usize) * (w as usize) + (x as usize)) * 3;
    frame.data_mut()[idx..idx + 3].copy_from_slice(&COLOR);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_frame(w: u32, h: u32) -> Frame {
        Frame::new(vec![0u8; (w * h * 3) as usize], w, h, 3)
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y * frame.width() + x) * 3) as usize;
        let d = frame.data();
        [d[idx], d[idx + 1], d[idx + 2]]
    }

    fn detection(x: i32, y: i32, w: i32, h: i32) -> Detection {
        Detection {
            bounding_box: BoundingBox {
                x,
                y,
                width: w,
                height: h,
            },
            confidence: 0.9,
        }
    }

    #[test]
    fn test_strokes_box_edges_red() {
        let mut frame = make_frame(100, 100);
        draw_detections(&mut frame, &[detection(10, 10, 40, 30)]);

        // Corners and edge midpoints are painted.
        assert_eq!(pixel(&frame, 10, 10), [255, 0, 0]);
        assert_eq!(pixel(&frame, 49, 39), [255, 0, 0]);
        assert_eq!(pixel(&frame, 30, 10), [255, 0, 0]);
        assert_eq!(pixel(&frame, 10, 25), [255, 0, 0]);
    }

    #[test]
    fn test_stroke_is_three_pixels_wide() {
        let mut frame = make_frame(100, 100);
        draw_detections(&mut frame, &[detection(10, 10, 40, 30)]);

        assert_eq!(pixel(&frame, 20, 10), [255, 0, 0]);
        assert_eq!(pixel(&frame, 20, 11), [255, 0, 0]);
        assert_eq!(pixel(&frame, 20, 12), [255, 0, 0]);
        assert_eq!(pixel(&frame, 20, 13), [0, 0, 0]);
    }

    #[test]
    fn test_interior_is_untouched() {
        let mut frame = make_frame(100, 100);
        draw_detections(&mut frame, &[detection(10, 10, 40, 30)]);
        assert_eq!(pixel(&frame, 30, 25), [0, 0, 0]);
    }

    #[test]
    fn test_clips_boxes_at_frame_edges() {
        let mut frame = make_frame(50, 50);
        // Box extends past the right and bottom edges.
        draw_detections(&mut frame, &[detection(40, 40, 30, 30)]);
        assert_eq!(pixel(&frame, 49, 40), [255, 0, 0]);

        // Box with a negative origin.
        let mut frame = make_frame(50, 50);
        draw_detections(&mut frame, &[detection(-10, -10, 30, 30)]);
        assert_eq!(pixel(&frame, 0, 19), [255, 0, 0]);
    }

    #[test]
    fn test_no_detections_leaves_frame_unchanged() {
        let mut frame = make_frame(20, 20);
        draw_detections(&mut frame, &[]);
        assert!(frame.data().iter().all(|&b| b == 0));
    }
}
