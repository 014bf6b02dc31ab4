pub mod detection;
pub mod detection_pipeline;
pub mod face_model;
