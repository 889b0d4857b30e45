use std::net::Ipv4Addr;

use crate::errors::ProtocolError;
use crate::name::{DomainName, MAX_LABEL_LEN};

/// Upper bound on labels read per name. A datagram cannot legitimately carry
/// more; hitting the bound means the input is malformed or adversarial.
const MAX_LABELS_PER_NAME: usize = 128;

/// Cursor-based reader over a received datagram. Cheap to copy, which is how
/// non-consuming lookahead is done: copy the reader, read ahead, discard.
#[derive(Debug, Clone, Copy)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_bytes(
        &mut self,
        n: usize,
        context: &'static str,
    ) -> Result<&'a [u8], ProtocolError> {
        if self.remaining() < n {
            return Err(ProtocolError::TruncatedPacket { context });
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    /// Read `width` bytes as a big-endian unsigned integer.
    pub fn read_uint(&mut self, width: usize, context: &'static str) -> Result<u64, ProtocolError> {
        let bytes = self.read_bytes(width, context)?;
        let mut value = 0u64;
        for b in bytes {
            value = (value << 8) | u64::from(*b);
        }
        Ok(value)
    }

    pub fn read_u8(&mut self, context: &'static str) -> Result<u8, ProtocolError> {
        Ok(self.read_uint(1, context)? as u8)
    }

    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, ProtocolError> {
        Ok(self.read_uint(2, context)? as u16)
    }

    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, ProtocolError> {
        Ok(self.read_uint(4, context)? as u32)
    }

    /// Read exactly four octets.
    pub fn read_ipv4(&mut self) -> Result<Ipv4Addr, ProtocolError> {
        let bytes = self.read_bytes(4, "ipv4 address")?;
        Ok(Ipv4Addr::new(bytes[0], bytes[1], bytes[2], bytes[3]))
    }

    /// Read length-prefixed labels until the zero-length sentinel.
    ///
    /// Compression pointers are not supported; a length byte above 63 is
    /// rejected outright.
    pub fn read_name(&mut self) -> Result<DomainName, ProtocolError> {
        let mut labels = Vec::new();
        for _ in 0..MAX_LABELS_PER_NAME {
            let len = self.read_u8("label length")? as usize;
            if len == 0 {
                return Ok(DomainName::new(labels));
            }
            if len > MAX_LABEL_LEN {
                return Err(ProtocolError::LabelTooLong(format!("length {len}")));
            }
            let raw = self.read_bytes(len, "label")?;
            // A mangled label could never match its sender's records again,
            // so invalid UTF-8 is rejected rather than replaced.
            let label = std::str::from_utf8(raw)
                .map_err(|_| ProtocolError::InvalidLabelEncoding)?;
            labels.push(label.to_string());
        }
        Err(ProtocolError::TooManyLabels)
    }
}
