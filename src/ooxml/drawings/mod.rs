//! DrawingML (DML) fragments.
//!
//! Writers append to a caller-owned `String` so a serializer can assemble a
//! whole `p:spPr` without intermediate allocations. All coordinates are EMU.

pub mod custgeom;
pub mod fill;
pub mod xfrm;

/// DrawingML main namespace
pub const DRAWINGML_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
/// Relationships namespace used by `r:embed`
pub const RELATIONSHIPS_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[inline]
pub(crate) fn push_int_attr(xml: &mut String, buf: &mut itoa::Buffer, name: &str, value: i64) {
    xml.push(' ');
    xml.push_str(name);
    xml.push_str("=\"");
    xml.push_str(buf.format(value));
    xml.push('"');
}
