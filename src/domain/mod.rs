mod audio_upload;
mod evaluation_result;
mod job_status;
mod score_key;
mod transcription_job;

pub use audio_upload::{AudioStream, AudioUpload};
pub use evaluation_result::{CallAnalysis, EvaluationResult, ScoreMap};
pub use job_status::JobStatus;
pub use score_key::ScoreKey;
pub use transcription_job::{JobId, TranscriptionJob, UploadUrl};
