// Enhanced Metafile (EMF) pattern tiles
//
// This module encodes small fill patterns (hatches, grids, dots, bricks) as
// EMF streams that a presentation can tile behind a shape, and reads such
// streams back for verification.
//
// - `records`: fixed-layout record structs
// - `writer`: record emission with an object table and header patching
// - `parser`: header and record reader
// - `pattern`: pattern kinds and tile generation
// - `presets`: named preset library
// - `cache`: concurrent tile cache
//
// References:
// - [MS-EMF]: Enhanced Metafile Format Specification
// - https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-emf/

pub mod cache;
pub mod parser;
pub mod pattern;
pub mod presets;
pub mod records;
pub mod writer;

pub use cache::TileCache;
pub use parser::{EmfHeader, EmfParser, EmfRecord};
pub use pattern::{
    HatchDirection, PatternConfig, PatternKind, PatternTile, Rgb, create_tile, create_tile_from,
    derive_colored_variant,
};
pub use presets::PatternLibrary;
pub use writer::{EmfRecordBytes, EmfStream, EmfWriter, ObjectHandle, ObjectKind};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_bytes_read_back() {
        let tile = create_tile(PatternKind::Grid { cell_w: 4, cell_h: 4, line_w: 1 }, 16, 16, Rgb::BLACK, Rgb::WHITE)
            .unwrap();
        let bytes = tile.to_bytes();
        let parser = EmfParser::new(&bytes).unwrap();
        assert_eq!(parser.width(), 16);
        assert_eq!(parser.height(), 16);
        assert_eq!(parser.header.size as usize, bytes.len());
    }
}
