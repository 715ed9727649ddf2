mod temp_audio_store;

pub use temp_audio_store::{TempAudioStore, UploadStoreError};
