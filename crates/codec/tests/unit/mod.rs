//! # Unit Components
//!
//! This module organizes the unit tests for each part of the codec: shared
//! argument and error types, configuration, statistics, and the command set.



/// Unit tests for the command set.
///
/// This module aggregates tests for:
/// - Encoding and decoding of every command family.
/// - Render-mode and othermode naming.
/// - Texture-load macro expansion and DXT throttles.
/// - Disassembly and display-list walking.
pub mod isa;

/// Unit tests for decode statistics.
///
/// This module verifies that [`DecodeStats`](f3dex2_codec::stats::DecodeStats)
/// counts commands, words and diagnostics, and renders its report sections.
pub mod stats;
