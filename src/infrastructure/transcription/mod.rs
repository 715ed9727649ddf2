mod assemblyai_client;

pub use assemblyai_client::{AssemblyAiClient, DEFAULT_ASSEMBLYAI_BASE_URL};
