//! Custom geometry (`a:custGeom`) from flattened outlines.

use super::push_int_attr;

/// One subpath in shape-local EMU, relative to the top-left of the shape box.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outline {
    pub points: Vec<(i64, i64)>,
    pub closed: bool,
}

impl Outline {
    pub fn new(points: Vec<(i64, i64)>, closed: bool) -> Self {
        Self { points, closed }
    }
}

fn push_pt(xml: &mut String, buf: &mut itoa::Buffer, (x, y): (i64, i64)) {
    xml.push_str("<a:pt");
    push_int_attr(xml, buf, "x", x);
    push_int_attr(xml, buf, "y", y);
    xml.push_str("/>");
}

/// Append an `a:custGeom` whose single path covers a `width` x `height` box.
///
/// Every outline becomes a `moveTo` followed by `lnTo`s; closed outlines end
/// with `a:close`. Outlines with no points are skipped.
pub fn write_a_cust_geom(xml: &mut String, outlines: &[Outline], width: i64, height: i64) {
    let mut buf = itoa::Buffer::new();
    xml.push_str("<a:custGeom><a:avLst/><a:gdLst/><a:ahLst/><a:cxnLst/>");
    xml.push_str(r#"<a:rect l="0" t="0""#);
    push_int_attr(xml, &mut buf, "r", width);
    push_int_attr(xml, &mut buf, "b", height);
    xml.push_str("/><a:pathLst><a:path");
    push_int_attr(xml, &mut buf, "w", width);
    push_int_attr(xml, &mut buf, "h", height);
    xml.push('>');

    for outline in outlines {
        let Some((first, rest)) = outline.points.split_first() else {
            continue;
        };
        xml.push_str("<a:moveTo>");
        push_pt(xml, &mut buf, *first);
        xml.push_str("</a:moveTo>");
        for point in rest {
            xml.push_str("<a:lnTo>");
            push_pt(xml, &mut buf, *point);
            xml.push_str("</a:lnTo>");
        }
        if outline.closed {
            xml.push_str("<a:close/>");
        }
    }

    xml.push_str("</a:path></a:pathLst></a:custGeom>");
}

pub fn to_cust_geom_fragment(outlines: &[Outline], width: i64, height: i64) -> String {
    let points: usize = outlines.iter().map(|o| o.points.len()).sum();
    let mut xml = String::with_capacity(160 + points * 48);
    write_a_cust_geom(&mut xml, outlines, width, height);
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::drawings::test_support::assert_well_formed;

    #[test]
    fn test_triangle() {
        let outline = Outline::new(vec![(0, 0), (100, 0), (50, 80), (0, 0)], true);
        let xml = to_cust_geom_fragment(&[outline], 100, 80);
        assert!(xml.starts_with("<a:custGeom><a:avLst/>"));
        assert!(xml.contains(r#"<a:rect l="0" t="0" r="100" b="80"/>"#));
        assert!(xml.contains(r#"<a:path w="100" h="80"><a:moveTo><a:pt x="0" y="0"/></a:moveTo>"#));
        assert_eq!(xml.matches("<a:lnTo>").count(), 3);
        assert!(xml.ends_with("<a:close/></a:path></a:pathLst></a:custGeom>"));
        assert_well_formed(&xml);
    }

    #[test]
    fn test_open_and_empty_outlines() {
        let outlines = [
            Outline::new(vec![(0, 0), (10, 10)], false),
            Outline::default(),
            Outline::new(vec![(5, 5)], false),
        ];
        let xml = to_cust_geom_fragment(&outlines, 10, 10);
        assert_eq!(xml.matches("<a:moveTo>").count(), 2);
        assert!(!xml.contains("<a:close/>"));
        assert_well_formed(&xml);
    }
}
