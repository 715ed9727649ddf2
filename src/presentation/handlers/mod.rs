mod analyze_call;
mod health;

pub use analyze_call::{AUDIO_FIELD, ErrorResponse, analyze_call_handler};
pub use health::health_handler;
