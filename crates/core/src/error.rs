#[derive(Debug, thiserror::Error)]
pub enum EmrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("patient not found")]
    PatientNotFound,
    #[error("no summary found for this patient")]
    SummaryNotFound,
    #[error("no note found for this encounter")]
    EncounterNoteNotFound,
    #[error("invalid patient id: {0}")]
    PatientId(#[from] emrmock_types::IdError),
    #[error("failed to serialise note content: {0}")]
    Serialization(serde_json::Error),
}

pub type EmrResult<T> = std::result::Result<T, EmrError>;
