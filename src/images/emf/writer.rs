//! EMF stream encoder.
//!
//! [`EmfWriter`] emits records in call order and keeps the object table
//! honest: handles are allocated sequentially from 1 and never reused, every
//! object is created before the first draw record, a select or delete must
//! name a live handle, and a draw record needs the objects it paints with to
//! be selected first. Violations are
//! [`Error::EmfEncoding`]; the writer never produces a stream that breaks
//! these rules.

use super::records::*;
use crate::common::error::{Error, Result};
use std::collections::BTreeMap;
use zerocopy::{Immutable, IntoBytes};

/// Index into the metafile object table. Index 0 is reserved by GDI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHandle(u32);

impl ObjectHandle {
    #[inline]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Kind of graphics object behind a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Pen,
    Brush,
}

/// One encoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmfRecordBytes {
    record_type: EmrType,
    bytes: Vec<u8>,
}

impl EmfRecordBytes {
    fn encode<R: IntoBytes + Immutable>(record_type: EmrType, record: &R) -> Self {
        Self {
            record_type,
            bytes: record.as_bytes().to_vec(),
        }
    }

    #[inline]
    pub fn record_type(&self) -> EmrType {
        self.record_type
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A finished metafile: header first, EOF last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmfStream {
    records: Vec<EmfRecordBytes>,
    handles: Vec<ObjectHandle>,
}

impl EmfStream {
    pub fn records(&self) -> &[EmfRecordBytes] {
        &self.records
    }

    /// Every handle created while encoding, in creation order.
    pub fn handles(&self) -> &[ObjectHandle] {
        &self.handles
    }

    pub fn byte_len(&self) -> usize {
        self.records.iter().map(EmfRecordBytes::len).sum()
    }

    /// The complete metafile.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.byte_len());
        for record in &self.records {
            out.extend_from_slice(record.as_bytes());
        }
        out
    }
}

/// Reference device used for the header: a 96 dpi screen.
const DEVICE_PX: SizeL = SizeL { cx: 1920, cy: 1080 };
const DEVICE_MM: SizeL = SizeL { cx: 508, cy: 286 };
/// Hundredths of a millimeter per inch
const HMM_PER_INCH: i64 = 2540;

/// Sequential record writer for one metafile.
#[derive(Debug)]
pub struct EmfWriter {
    bounds: RectL,
    records: Vec<EmfRecordBytes>,
    live: BTreeMap<ObjectHandle, ObjectKind>,
    created: Vec<ObjectHandle>,
    next_handle: u32,
    selected_pen: Option<ObjectHandle>,
    selected_brush: Option<ObjectHandle>,
    drawing: bool,
}

impl EmfWriter {
    /// Start a metafile covering `width × height` device units.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::EmfEncoding(format!(
                "metafile bounds must be positive, got {}x{}",
                width, height
            )));
        }
        let w = i32::try_from(width).map_err(|_| Error::EmfEncoding(format!("width {} too large", width)))?;
        let h = i32::try_from(height).map_err(|_| Error::EmfEncoding(format!("height {} too large", height)))?;
        Ok(Self {
            bounds: RectL::new(0, 0, w - 1, h - 1),
            records: Vec::new(),
            live: BTreeMap::new(),
            created: Vec::new(),
            next_handle: 1,
            selected_pen: None,
            selected_brush: None,
            drawing: false,
        })
    }

    fn push<R: IntoBytes + Immutable>(&mut self, record_type: EmrType, record: &R) {
        self.drawing |= record_type.is_draw();
        self.records.push(EmfRecordBytes::encode(record_type, record));
    }

    fn allocate(&mut self, kind: ObjectKind) -> Result<ObjectHandle> {
        if self.drawing {
            return Err(Error::EmfEncoding(format!(
                "{:?} created after the first draw record",
                kind
            )));
        }
        let handle = ObjectHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle, kind);
        self.created.push(handle);
        Ok(handle)
    }

    fn live_kind(&self, handle: ObjectHandle) -> Result<ObjectKind> {
        self.live.get(&handle).copied().ok_or_else(|| {
            Error::EmfEncoding(format!("object handle {} was never created or is deleted", handle.0))
        })
    }

    pub fn set_background_mode(&mut self, mode: BackgroundMode) {
        self.push(EmrType::SetBkMode, &EmrSetBkMode::new(mode));
    }

    pub fn create_pen(&mut self, style: u32, width: u32, color: ColorRef) -> Result<ObjectHandle> {
        let handle = self.allocate(ObjectKind::Pen)?;
        self.push(EmrType::CreatePen, &EmrCreatePen::new(handle.0, style, width, color));
        Ok(handle)
    }

    pub fn create_brush(&mut self, style: u32, color: ColorRef, hatch: u32) -> Result<ObjectHandle> {
        let handle = self.allocate(ObjectKind::Brush)?;
        self.push(
            EmrType::CreateBrushIndirect,
            &EmrCreateBrushIndirect::new(handle.0, style, color, hatch),
        );
        Ok(handle)
    }

    pub fn select(&mut self, handle: ObjectHandle) -> Result<()> {
        match self.live_kind(handle)? {
            ObjectKind::Pen => self.selected_pen = Some(handle),
            ObjectKind::Brush => self.selected_brush = Some(handle),
        }
        self.push(EmrType::SelectObject, &EmrSelectObject::new(handle.0));
        Ok(())
    }

    /// Delete an object. A deleted object that was selected is deselected.
    pub fn delete(&mut self, handle: ObjectHandle) -> Result<()> {
        self.live_kind(handle)?;
        self.live.remove(&handle);
        if self.selected_pen == Some(handle) {
            self.selected_pen = None;
        }
        if self.selected_brush == Some(handle) {
            self.selected_brush = None;
        }
        self.push(EmrType::DeleteObject, &EmrDeleteObject::new(handle.0));
        Ok(())
    }

    /// Append a draw record once the objects it paints with are selected.
    fn draw<R: IntoBytes + Immutable>(&mut self, record_type: EmrType, record: &R, pen: bool, brush: bool) -> Result<()> {
        self.require_selected(pen, brush, record_type)?;
        self.push(record_type, record);
        Ok(())
    }

    fn require_selected(&self, pen: bool, brush: bool, what: EmrType) -> Result<()> {
        if pen && self.selected_pen.is_none() {
            return Err(Error::EmfEncoding(format!("{} without a selected pen", what.name())));
        }
        if brush && self.selected_brush.is_none() {
            return Err(Error::EmfEncoding(format!("{} without a selected brush", what.name())));
        }
        Ok(())
    }

    pub fn rectangle(&mut self, rect: RectL) -> Result<()> {
        self.draw(EmrType::Rectangle, &EmrRectangle::rectangle(rect), true, true)
    }

    pub fn ellipse(&mut self, rect: RectL) -> Result<()> {
        self.draw(EmrType::Ellipse, &EmrRectangle::ellipse(rect), true, true)
    }

    pub fn move_to(&mut self, x: i32, y: i32) {
        self.push(EmrType::MoveToEx, &EmrLineTo::move_to(x, y));
    }

    pub fn line_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.draw(EmrType::LineTo, &EmrLineTo::line_to(x, y), true, false)
    }

    /// `move_to` then `line_to`.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32)) -> Result<()> {
        self.move_to(from.0, from.1);
        self.line_to(to.0, to.1)
    }

    /// Prepend the header and append EOF.
    ///
    /// The header's byte count, record count and handle count are computed
    /// from what was written. Consuming the writer means nothing can be
    /// appended after EOF.
    pub fn finish(self) -> Result<EmfStream> {
        let eof = EmfRecordBytes::encode(EmrType::Eof, &EmrEof::new());
        let header_size = record_size_of::<EmrFileHeader>() as usize;
        let total = header_size + eof.len() + self.records.iter().map(EmfRecordBytes::len).sum::<usize>();
        let bytes = u32::try_from(total).map_err(|_| Error::EmfEncoding(format!("metafile of {} bytes too large", total)))?;
        let records = u32::try_from(self.records.len() + 2)
            .map_err(|_| Error::EmfEncoding("too many records".to_string()))?;
        let handles = u16::try_from(self.next_handle)
            .map_err(|_| Error::EmfEncoding(format!("{} object handles exceed the table", self.next_handle)))?;

        let frame = RectL::new(
            0,
            0,
            to_hundredth_mm(self.bounds.right)?,
            to_hundredth_mm(self.bounds.bottom)?,
        );
        let header = EmrFileHeader {
            record_type: EmrType::Header as u32,
            record_size: header_size as u32,
            bounds: self.bounds,
            frame,
            signature: EMF_SIGNATURE,
            version: EMF_VERSION,
            bytes,
            records,
            handles,
            reserved: 0,
            description_size: 0,
            description_offset: 0,
            palette_entries: 0,
            device: DEVICE_PX,
            millimeters: DEVICE_MM,
        };

        let mut all = Vec::with_capacity(self.records.len() + 2);
        all.push(EmfRecordBytes::encode(EmrType::Header, &header));
        all.extend(self.records);
        all.push(eof);

        Ok(EmfStream {
            records: all,
            handles: self.created,
        })
    }
}

fn to_hundredth_mm(px: i32) -> Result<i32> {
    let hmm = i64::from(px) * HMM_PER_INCH / 96;
    i32::try_from(hmm).map_err(|_| Error::EmfEncoding(format!("frame of {} px exceeds the header range", px)))
}
