use crate::errors::ProtocolError;
use crate::name::DomainName;
use crate::record::{RecordClass, RecordType, ResourceRecord};
use crate::wire::{WireReader, WireWriter};

/// Fixed DNS message header size.
pub const HEADER_LEN: usize = 12;

/// Top bit of a question's class field: the requester asks for a unicast
/// response instead of a multicast one.
const UNICAST_RESPONSE_BIT: u16 = 0x8000;

/// One entry of the question section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: DomainName,
    pub qtype: RecordType,
    pub qclass: RecordClass,
    pub unicast_response: bool,
}

impl Question {
    pub fn new(name: DomainName, qtype: RecordType, qclass: RecordClass) -> Self {
        Self {
            name,
            qtype,
            qclass,
            unicast_response: false,
        }
    }

    fn encode(&self, w: &mut WireWriter) -> Result<(), ProtocolError> {
        w.put_name(&self.name)?;
        w.put_uint(u64::from(self.qtype.to_u16()), 2);
        let mut class = self.qclass.to_u16();
        if self.unicast_response {
            class |= UNICAST_RESPONSE_BIT;
        }
        w.put_uint(u64::from(class), 2);
        Ok(())
    }

    fn decode(r: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        let name = r.read_name()?;
        let qtype = RecordType::from_u16(r.read_u16("question type")?)?;
        let raw_class = r.read_u16("question class")?;
        let unicast_response = raw_class & UNICAST_RESPONSE_BIT != 0;
        let qclass = RecordClass::from_u16(raw_class & !UNICAST_RESPONSE_BIT)?;
        Ok(Self {
            name,
            qtype,
            qclass,
            unicast_response,
        })
    }
}

/// Header flag bits other than QR/opcode/rcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PacketFlags {
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
}

/// A full DNS message: 12-byte header plus the four record sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub id: u16,
    pub is_query: bool,
    pub opcode: u8,
    pub flags: PacketFlags,
    pub response_code: u8,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authority: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

impl Packet {
    pub fn query(id: u16) -> Self {
        Self {
            id,
            is_query: true,
            opcode: 0,
            flags: PacketFlags::default(),
            response_code: 0,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    pub fn response(id: u16) -> Self {
        Self {
            id,
            is_query: false,
            opcode: 0,
            flags: PacketFlags {
                authoritative: true,
                ..PacketFlags::default()
            },
            response_code: 0,
            questions: Vec::new(),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        }
    }

    /// Pack QR, opcode, AA, TC, RD, RA and the return code into the 16-bit
    /// flag word by shift-and-mask.
    fn flag_word(&self) -> Result<u16, ProtocolError> {
        if self.opcode > 0x0f {
            return Err(ProtocolError::ValueOutOfRange { field: "opcode" });
        }
        if self.response_code > 0x0f {
            return Err(ProtocolError::ValueOutOfRange {
                field: "response code",
            });
        }
        let mut word = 0u16;
        if !self.is_query {
            word |= 1 << 15;
        }
        word |= u16::from(self.opcode) << 11;
        if self.flags.authoritative {
            word |= 1 << 10;
        }
        if self.flags.truncated {
            word |= 1 << 9;
        }
        if self.flags.recursion_desired {
            word |= 1 << 8;
        }
        if self.flags.recursion_available {
            word |= 1 << 7;
        }
        word |= u16::from(self.response_code);
        Ok(word)
    }

    fn section_count(len: usize, field: &'static str) -> Result<u64, ProtocolError> {
        if len > usize::from(u16::MAX) {
            return Err(ProtocolError::ValueOutOfRange { field });
        }
        Ok(len as u64)
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let mut w = WireWriter::new();
        w.put_uint(u64::from(self.id), 2);
        w.put_uint(u64::from(self.flag_word()?), 2);
        // Section counts always mirror the actual list lengths; a section
        // that cannot be counted in 16 bits cannot be encoded at all.
        w.put_uint(Self::section_count(self.questions.len(), "question count")?, 2);
        w.put_uint(Self::section_count(self.answers.len(), "answer count")?, 2);
        w.put_uint(Self::section_count(self.authority.len(), "authority count")?, 2);
        w.put_uint(Self::section_count(self.additional.len(), "additional count")?, 2);
        debug_assert_eq!(w.len(), HEADER_LEN, "header must be exactly 12 bytes");

        for question in &self.questions {
            question.encode(&mut w)?;
        }
        for section in [&self.answers, &self.authority, &self.additional] {
            for record in section {
                record.encode(&mut w)?;
            }
        }
        Ok(w.into_bytes())
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut r = WireReader::new(bytes);
        let id = r.read_u16("header id")?;
        let word = r.read_u16("header flags")?;
        let qdcount = r.read_u16("question count")?;
        let ancount = r.read_u16("answer count")?;
        let nscount = r.read_u16("authority count")?;
        let arcount = r.read_u16("additional count")?;

        let mut packet = Self {
            id,
            is_query: word & (1 << 15) == 0,
            opcode: ((word >> 11) & 0x0f) as u8,
            flags: PacketFlags {
                authoritative: word & (1 << 10) != 0,
                truncated: word & (1 << 9) != 0,
                recursion_desired: word & (1 << 8) != 0,
                recursion_available: word & (1 << 7) != 0,
            },
            response_code: (word & 0x0f) as u8,
            questions: Vec::with_capacity(qdcount.into()),
            answers: Vec::new(),
            authority: Vec::new(),
            additional: Vec::new(),
        };

        for _ in 0..qdcount {
            packet.questions.push(Question::decode(&mut r)?);
        }
        for _ in 0..ancount {
            packet.answers.push(ResourceRecord::decode(&mut r)?);
        }
        for _ in 0..nscount {
            packet.authority.push(ResourceRecord::decode(&mut r)?);
        }
        for _ in 0..arcount {
            packet.additional.push(ResourceRecord::decode(&mut r)?);
        }
        Ok(packet)
    }
}
