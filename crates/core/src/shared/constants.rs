/// Images wider than this are downscaled before inference.
pub const MAX_INFERENCE_WIDTH: u32 = 600;

/// Column of a raw detection row carrying the reported confidence value.
pub const CONFIDENCE_COLUMN: usize = 2;

/// Default detection confidence threshold.
pub const DEFAULT_CONFIDENCE: f64 = 0.6;

/// Default archive directory namespace holding the bundled runtime libraries.
pub const RUNTIME_NAMESPACE: &str = "native";

/// Default file-name stem of the bundled runtime library.
pub const RUNTIME_LIB_STEM: &str = "onnxruntime";

/// Exported symbol probed after load to confirm the runtime is active.
pub const RUNTIME_VERSION_SYMBOL: &str = "OrtGetApiBase";

/// Suffix appended to the input file stem for the annotated output image.
pub const OUTPUT_SUFFIX: &str = "_faces";

/// Chunk size for streaming checksum and extraction copies.
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;
