//! Office Open XML output fragments.
//!
//! Only the DrawingML pieces a converted shape needs are produced here; the
//! surrounding slide markup and the package itself belong to the caller.

pub mod drawings;
