// EMF stream reader
//
// Parses a metafile back into its header and records. Used to verify encoded
// pattern tiles and to re-read tiles handed back by a package.

use super::records::{EMF_SIGNATURE, EmrFileHeader, EmrHeader, EmrType, record_size_of};
use crate::common::error::{Error, Result};
use zerocopy::FromBytes;

/// EMF header information
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmfHeader {
    /// Bounds of the metafile in device units (left, top, right, bottom)
    pub bounds: (i32, i32, i32, i32),
    /// Frame rectangle in .01 millimeter units
    pub frame: (i32, i32, i32, i32),
    /// Version
    pub version: u32,
    /// Size of the file in bytes
    pub size: u32,
    /// Number of records
    pub num_records: u32,
    /// Number of handles in handle table
    pub num_handles: u16,
    /// Size of the header record itself
    pub record_size: u32,
}

impl EmfHeader {
    /// Parse EMF header from data
    pub fn parse(data: &[u8]) -> Result<Self> {
        // read_from_prefix returns (value, remaining)
        let (raw, _) = EmrFileHeader::read_from_prefix(data)
            .map_err(|_| Error::ParseError("EMF header too short".into()))?;

        if raw.record_type != EmrType::Header as u32 {
            return Err(Error::ParseError(format!(
                "Invalid EMF header record type: 0x{:08X}",
                raw.record_type
            )));
        }

        if raw.signature != EMF_SIGNATURE {
            return Err(Error::ParseError(format!(
                "Invalid EMF signature: 0x{:08X}",
                raw.signature
            )));
        }

        if (raw.record_size as usize) < record_size_of::<EmrFileHeader>() as usize
            || raw.record_size as usize > data.len()
        {
            return Err(Error::ParseError(format!(
                "Invalid EMF header size: {}",
                raw.record_size
            )));
        }

        Ok(Self {
            bounds: (raw.bounds.left, raw.bounds.top, raw.bounds.right, raw.bounds.bottom),
            frame: (raw.frame.left, raw.frame.top, raw.frame.right, raw.frame.bottom),
            version: raw.version,
            size: raw.bytes,
            num_records: raw.records,
            num_handles: raw.handles,
            record_size: raw.record_size,
        })
    }

    /// Width in device units; bounds are inclusive. Saturates on hostile bounds.
    pub fn width(&self) -> i32 {
        self.bounds.2.saturating_sub(self.bounds.0).saturating_add(1)
    }

    /// Height in device units; bounds are inclusive. Saturates on hostile bounds.
    pub fn height(&self) -> i32 {
        self.bounds.3.saturating_sub(self.bounds.1).saturating_add(1)
    }
}

/// EMF record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmfRecord {
    /// Record type
    pub record_type: u32,
    /// Record size in bytes
    pub size: u32,
    /// Record data (excluding type and size)
    pub data: Vec<u8>,
}

impl EmfRecord {
    /// Parse an EMF record at `offset`, returning it and its size
    pub fn parse(data: &[u8], offset: usize) -> Result<(Self, usize)> {
        let rest = data
            .get(offset..)
            .ok_or_else(|| Error::ParseError(format!("Record offset {} out of range", offset)))?;
        let (header, _) = EmrHeader::read_from_prefix(rest)
            .map_err(|_| Error::ParseError(format!("Truncated EMF record header at offset {}", offset)))?;

        let size = header.record_size as usize;
        if size < 8 || size % 4 != 0 || size > rest.len() {
            return Err(Error::ParseError(format!(
                "Invalid EMF record size: {} at offset {}",
                size, offset
            )));
        }

        Ok((
            Self {
                record_type: header.record_type,
                size: header.record_size,
                data: rest[8..size].to_vec(),
            },
            size,
        ))
    }

    /// Known record type, if any
    pub fn kind(&self) -> Option<EmrType> {
        EmrType::from_u32(self.record_type)
    }

    /// Little-endian u32 at `index` in the record body
    pub fn u32_at(&self, index: usize) -> Option<u32> {
        let start = index * 4;
        let bytes = self.data.get(start..start + 4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}

/// EMF file parser
#[derive(Debug)]
pub struct EmfParser {
    /// EMF header
    pub header: EmfHeader,
    /// All records after the header, EOF included
    pub records: Vec<EmfRecord>,
}

impl EmfParser {
    /// Parse a complete metafile. A stream must end with EMR_EOF.
    pub fn new(data: &[u8]) -> Result<Self> {
        let header = EmfHeader::parse(data)?;
        let mut records = Vec::new();
        let mut offset = header.record_size as usize;

        loop {
            if offset >= data.len() {
                return Err(Error::ParseError("EMF stream ends without EMR_EOF".into()));
            }
            let (record, consumed) = EmfRecord::parse(data, offset)?;
            let is_eof = record.record_type == EmrType::Eof as u32;
            records.push(record);
            offset += consumed;
            if is_eof {
                break;
            }
        }

        if header.num_records as usize != records.len() + 1 {
            log::debug!(
                "EMF header declares {} records, found {}",
                header.num_records,
                records.len() + 1
            );
        }

        Ok(Self { header, records })
    }

    /// Get the width in device units
    pub fn width(&self) -> i32 {
        self.header.width()
    }

    /// Get the height in device units
    pub fn height(&self) -> i32 {
        self.header.height()
    }

    /// Types of all records, header first
    pub fn record_types(&self) -> Vec<Option<EmrType>> {
        std::iter::once(Some(EmrType::Header))
            .chain(self.records.iter().map(EmfRecord::kind))
            .collect()
    }

    /// Object indices named by create records, in order
    pub fn created_handles(&self) -> Vec<u32> {
        self.records
            .iter()
            .filter(|r| matches!(r.kind(), Some(EmrType::CreatePen | EmrType::CreateBrushIndirect)))
            .filter_map(|r| r.u32_at(0))
            .collect()
    }
}
