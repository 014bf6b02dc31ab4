/// YuNet-style face detector using ONNX Runtime via `ort`.
///
/// The session binds to the runtime library that was resolved, verified,
/// and loaded by the platform resolver; constructing a model therefore
/// requires the loaded runtime handle.
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;

use crate::detection::domain::face_model::{DetectionRow, FaceModel};
use crate::loader::native_loader::LoadedRuntime;
use crate::shared::frame::Frame;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to load model {path}: {message}")]
    ModelLoadFailed { path: PathBuf, message: String },
}

/// YuNet face detector backed by an ONNX Runtime session.
pub struct OnnxYunetModel {
    session: ort::session::Session,
    confidence: f64,
}

impl OnnxYunetModel {
    /// Loads the ONNX model and prepares for inference.
    ///
    /// `runtime` is the handle produced by the native loader; ort resolves
    /// its API from that library.
    pub fn new(
        runtime: &'static LoadedRuntime,
        model_path: &Path,
        confidence: f64,
    ) -> Result<Self, ModelError> {
        let load_err = |e: ort::Error| ModelError::ModelLoadFailed {
            path: model_path.to_path_buf(),
            message: e.to_string(),
        };

        bind_runtime(runtime).map_err(load_err)?;

        let session = ort::session::Session::builder()
            .map_err(load_err)?
            .commit_from_file(model_path)
            .map_err(load_err)?;
        log::info!(
            "loaded model with {} inputs and {} outputs",
            session.inputs().len(),
            session.outputs().len()
        );

        Ok(Self {
            session,
            confidence,
        })
    }
}

static ORT_BOUND: OnceLock<()> = OnceLock::new();

/// Points ort at the loaded runtime library, once per process.
fn bind_runtime(runtime: &LoadedRuntime) -> Result<(), ort::Error> {
    if ORT_BOUND.get().is_some() {
        return Ok(());
    }
    let _ = ort::init_from(runtime.path())?.commit();
    let _ = ORT_BOUND.set(());
    Ok(())
}

impl FaceModel for OnnxYunetModel {
    fn detect(&mut self, frame: &Frame) -> Result<Vec<DetectionRow>, Box<dyn std::error::Error>> {
        let input = to_nchw(frame);
        let input_value = ort::value::Tensor::from_array(input)?;
        let outputs = self.session.run(ort::inputs![input_value])?;
        if outputs.len() == 0 {
            return Err("model produced no outputs".into());
        }

        let tensor = outputs[0].try_extract_array::<f32>()?;
        let shape = tensor.shape();

        // Accept both [detections, features] and batched [1, detections,
        // features] output layouts.
        let (num_dets, num_feats) = match shape.len() {
            2 => (shape[0], shape[1]),
            3 if shape[0] == 1 => (shape[1], shape[2]),
            _ => return Err(format!("unexpected model output shape: {shape:?}").into()),
        };
        if num_feats == 0 {
            return Ok(Vec::new());
        }

        let data = tensor.as_slice().ok_or("cannot get tensor slice")?;

        let mut rows = Vec::new();
        for i in 0..num_dets {
            let row = data[i * num_feats..(i + 1) * num_feats].to_vec();
            // The engine's own score lives in the trailing column.
            let score = row.last().copied().unwrap_or(0.0) as f64;
            if score < self.confidence {
                continue;
            }
            rows.push(row);
        }
        Ok(rows)
    }
}

/// HWC RGB bytes to an NCHW float tensor in BGR channel order, 0-255 range
/// (the YuNet input convention).
fn to_nchw(frame: &Frame) -> ndarray::Array4<f32> {
    let h = frame.height() as usize;
    let w = frame.width() as usize;
    let src = frame.as_ndarray();

    let mut tensor = ndarray::Array4::<f32>::zeros((1, 3, h, w));
    for y in 0..h {
        for x in 0..w {
            for c in 0..3 {
                tensor[[0, 2 - c, y, x]] = src[[y, x, c]] as f32;
            }
        }
    }
    tensor
}
