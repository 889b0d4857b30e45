use std::net::Ipv4Addr;

use super::{RecordClass, RecordType};
use crate::errors::ProtocolError;
use crate::name::DomainName;
use crate::wire::{WireReader, WireWriter};

/// A resource record as a closed sum type. Every encode/decode/filter site
/// matches exhaustively, so an added record type cannot be silently
/// mishandled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRecord {
    /// One IPv4 address for a host name.
    A {
        name: DomainName,
        class: RecordClass,
        ttl: u32,
        addr: Ipv4Addr,
    },
    /// Service type pointing at a service instance name.
    Ptr {
        name: DomainName,
        class: RecordClass,
        ttl: u32,
        target: DomainName,
    },
    /// Service instance pointing at a host and port.
    Srv {
        name: DomainName,
        class: RecordClass,
        ttl: u32,
        priority: u16,
        weight: u16,
        port: u16,
        target: DomainName,
    },
}

impl ResourceRecord {
    pub fn name(&self) -> &DomainName {
        match self {
            ResourceRecord::A { name, .. }
            | ResourceRecord::Ptr { name, .. }
            | ResourceRecord::Srv { name, .. } => name,
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            ResourceRecord::A { .. } => RecordType::A,
            ResourceRecord::Ptr { .. } => RecordType::PTR,
            ResourceRecord::Srv { .. } => RecordType::SRV,
        }
    }

    pub fn class(&self) -> RecordClass {
        match self {
            ResourceRecord::A { class, .. }
            | ResourceRecord::Ptr { class, .. }
            | ResourceRecord::Srv { class, .. } => *class,
        }
    }

    pub fn ttl(&self) -> u32 {
        match self {
            ResourceRecord::A { ttl, .. }
            | ResourceRecord::Ptr { ttl, .. }
            | ResourceRecord::Srv { ttl, .. } => *ttl,
        }
    }

    /// Shared (name, type, class, ttl) prefix for all record variants.
    fn encode_common(&self, w: &mut WireWriter) -> Result<(), ProtocolError> {
        w.put_name(self.name())?;
        w.put_uint(u64::from(self.record_type().to_u16()), 2);
        w.put_uint(u64::from(self.class().to_u16()), 2);
        w.put_uint(u64::from(self.ttl()), 4);
        Ok(())
    }

    pub fn encode(&self, w: &mut WireWriter) -> Result<(), ProtocolError> {
        self.encode_common(w)?;
        match self {
            ResourceRecord::A { addr, .. } => {
                w.put_uint(4, 2);
                w.put_ipv4(*addr);
            }
            ResourceRecord::Ptr { target, .. } => {
                w.put_uint(target.wire_len() as u64, 2);
                w.put_name(target)?;
            }
            ResourceRecord::Srv {
                priority,
                weight,
                port,
                target,
                ..
            } => {
                w.put_uint((6 + target.wire_len()) as u64, 2);
                w.put_uint(u64::from(*priority), 2);
                w.put_uint(u64::from(*weight), 2);
                w.put_uint(u64::from(*port), 2);
                w.put_name(target)?;
            }
        }
        Ok(())
    }

    /// Non-consuming lookahead of the type field, used to pick the decoder
    /// before the record is actually read.
    pub fn peek_type(r: &WireReader<'_>) -> Result<RecordType, ProtocolError> {
        let mut peek = *r;
        peek.read_name()?;
        RecordType::from_u16(peek.read_u16("record type")?)
    }

    fn decode_common(
        r: &mut WireReader<'_>,
    ) -> Result<(DomainName, RecordType, RecordClass, u32, u16), ProtocolError> {
        let name = r.read_name()?;
        let rtype = RecordType::from_u16(r.read_u16("record type")?)?;
        let class = RecordClass::from_u16(r.read_u16("record class")?)?;
        let ttl = r.read_u32("record ttl")?;
        let rdlength = r.read_u16("rdata length")?;
        Ok((name, rtype, class, ttl, rdlength))
    }

    fn check_rdlength(declared: u16, expected: usize) -> Result<(), ProtocolError> {
        if usize::from(declared) != expected {
            return Err(ProtocolError::RdataLengthMismatch {
                declared,
                expected: expected as u16,
            });
        }
        Ok(())
    }

    pub fn decode(r: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let (name, rtype, class, ttl, rdlength) = Self::decode_common(r)?;
        match rtype {
            RecordType::A => {
                Self::check_rdlength(rdlength, 4)?;
                let addr = r.read_ipv4()?;
                Ok(ResourceRecord::A {
                    name,
                    class,
                    ttl,
                    addr,
                })
            }
            RecordType::PTR => {
                let target = r.read_name()?;
                Self::check_rdlength(rdlength, target.wire_len())?;
                Ok(ResourceRecord::Ptr {
                    name,
                    class,
                    ttl,
                    target,
                })
            }
            RecordType::SRV => {
                let priority = r.read_u16("srv priority")?;
                let weight = r.read_u16("srv weight")?;
                let port = r.read_u16("srv port")?;
                let target = r.read_name()?;
                Self::check_rdlength(rdlength, 6 + target.wire_len())?;
                Ok(ResourceRecord::Srv {
                    name,
                    class,
                    ttl,
                    priority,
                    weight,
                    port,
                    target,
                })
            }
            RecordType::ANY => Err(ProtocolError::UnknownRecordType(RecordType::ANY.to_u16())),
        }
    }
}
