mod call_analysis_service;
mod evaluation_service;
mod evaluator_prompt;
mod response_normalizer;
mod transcription_service;

pub use call_analysis_service::{AnalysisError, CallAnalysisService};
pub use evaluation_service::EvaluationService;
pub use evaluator_prompt::{EVALUATOR_SYSTEM_PROMPT, EvaluatorPrompt, TranscriptEmbedding};
pub use response_normalizer::{ScorePolicy, normalize};
pub use transcription_service::{PollPolicy, TranscriptionService};
