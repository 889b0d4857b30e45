use bytes::{BufMut, BytesMut};
use std::net::Ipv4Addr;

use crate::errors::ProtocolError;
use crate::name::{DomainName, MAX_LABEL_LEN};

/// Growable binary writer. Multi-byte values are written big-endian; only
/// the bytes actually written are exposed.
#[derive(Debug, Default)]
pub struct WireWriter {
    buf: BytesMut,
}

impl WireWriter {
    pub fn new() -> Self {
        Self {
            buf: BytesMut::with_capacity(512),
        }
    }

    /// Write the low `width` bytes of `value`, most significant first.
    pub fn put_uint(&mut self, value: u64, width: usize) {
        for shift in (0..width).rev() {
            self.buf.put_u8((value >> (shift * 8)) as u8);
        }
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    /// Write exactly four octets.
    pub fn put_ipv4(&mut self, addr: Ipv4Addr) {
        self.buf.put_slice(&addr.octets());
    }

    /// Length-prefixed labels terminated by a zero-length label.
    pub fn put_name(&mut self, name: &DomainName) -> Result<(), ProtocolError> {
        for label in name.labels() {
            if label.len() > MAX_LABEL_LEN {
                return Err(ProtocolError::LabelTooLong(label.clone()));
            }
            self.buf.put_u8(label.len() as u8);
            self.buf.put_slice(label.as_bytes());
        }
        self.buf.put_u8(0);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf.to_vec()
    }
}
