// Image encoding
//
// Only Enhanced Metafile pattern tiles are produced here; raster images are
// out of scope.

pub mod emf;
