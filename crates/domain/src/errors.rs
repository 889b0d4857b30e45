use thiserror::Error;

/// Malformed wire data. Always propagated to the decode caller; the engine
/// never acts on a packet it could not fully decode.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("packet truncated while reading {context}")]
    TruncatedPacket { context: &'static str },

    #[error("label exceeds 63 bytes: {0}")]
    LabelTooLong(String),

    #[error("name exceeds the label iteration limit")]
    TooManyLabels,

    #[error("label is not valid UTF-8")]
    InvalidLabelEncoding,

    #[error("unknown record type code: {0}")]
    UnknownRecordType(u16),

    #[error("unknown record class code: {0}")]
    UnknownRecordClass(u16),

    #[error("rdata length mismatch: declared {declared}, expected {expected}")]
    RdataLengthMismatch { declared: u16, expected: u16 },

    #[error("value out of range for {field}")]
    ValueOutOfRange { field: &'static str },
}

/// Engine-level failures surfaced to callers of register/browse/resolve.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("name already claimed on the network: {0}")]
    NameConflict(String),

    #[error("service not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
