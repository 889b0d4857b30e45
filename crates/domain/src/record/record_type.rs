use std::fmt;
use std::str::FromStr;

use crate::errors::ProtocolError;

/// Resource record types this engine speaks, plus the ANY meta-query type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    PTR,
    SRV,
    ANY,
}

impl RecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::PTR => "PTR",
            RecordType::SRV => "SRV",
            RecordType::ANY => "ANY",
        }
    }

    pub fn to_u16(self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::PTR => 12,
            RecordType::SRV => 33,
            RecordType::ANY => 255,
        }
    }

    pub fn from_u16(code: u16) -> Result<Self, ProtocolError> {
        match code {
            1 => Ok(RecordType::A),
            12 => Ok(RecordType::PTR),
            33 => Ok(RecordType::SRV),
            255 => Ok(RecordType::ANY),
            other => Err(ProtocolError::UnknownRecordType(other)),
        }
    }

    /// True when a stored record of type `self` answers a query for `query`.
    pub fn answers(self, query: RecordType) -> bool {
        query == RecordType::ANY || self == query
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(RecordType::A),
            "PTR" => Ok(RecordType::PTR),
            "SRV" => Ok(RecordType::SRV),
            "ANY" => Ok(RecordType::ANY),
            _ => Err(format!("Unknown record type: {}", s)),
        }
    }
}

/// Record classes. Only Internet records exist here; ANY is the meta-query
/// class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordClass {
    IN,
    ANY,
}

impl RecordClass {
    pub fn to_u16(self) -> u16 {
        match self {
            RecordClass::IN => 1,
            RecordClass::ANY => 255,
        }
    }

    pub fn from_u16(code: u16) -> Result<Self, ProtocolError> {
        match code {
            1 => Ok(RecordClass::IN),
            255 => Ok(RecordClass::ANY),
            other => Err(ProtocolError::UnknownRecordClass(other)),
        }
    }

    pub fn answers(self, query: RecordClass) -> bool {
        query == RecordClass::ANY || self == query
    }
}

impl fmt::Display for RecordClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RecordClass::IN => "IN",
            RecordClass::ANY => "ANY",
        };
        write!(f, "{}", s)
    }
}
