use super::push_int_attr;

/// Offset and extent of a shape, in EMU.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Xfrm {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Xfrm {
    pub const fn new(x: i64, y: i64, cx: i64, cy: i64) -> Self {
        Self { x, y, cx, cy }
    }

    pub fn write(&self, xml: &mut String) {
        write_a_xfrm_off_ext(xml, self.x, self.y, self.cx, self.cy);
    }

    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(64);
        self.write(&mut xml);
        xml
    }
}

pub fn write_a_xfrm_off_ext(xml: &mut String, x: i64, y: i64, cx: i64, cy: i64) {
    let mut buf = itoa::Buffer::new();
    xml.push_str("<a:xfrm><a:off");
    push_int_attr(xml, &mut buf, "x", x);
    push_int_attr(xml, &mut buf, "y", y);
    xml.push_str("/><a:ext");
    push_int_attr(xml, &mut buf, "cx", cx);
    push_int_attr(xml, &mut buf, "cy", cy);
    xml.push_str("/></a:xfrm>");
}
