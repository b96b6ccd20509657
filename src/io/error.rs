use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("failed to parse PDB data: {details} (at line ~{line})")]
    Parse { line: usize, details: String },

    #[error("failed to read PDB structure: {0}")]
    Pdb(String),

    #[error("model {0} is not present in the input")]
    ModelNotFound(usize),

    #[error("no atoms left after applying model, chain and alternate-location filters")]
    EmptyStructure,

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    pub fn parse(line: usize, details: impl Into<String>) -> Self {
        Self::Parse {
            line,
            details: details.into(),
        }
    }
}
