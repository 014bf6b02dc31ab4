pub mod onnx_yunet_model;
