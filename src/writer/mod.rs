//! PDF writing for append-only updates.
//!
//! ## Architecture
//!
//! ```text
//! new / replaced objects
//!     ↓
//! [ObjectSerializer] (serializes PDF objects)
//!     ↓
//! [IncrementalUpdate] (objects + xref section + trailer with /Prev)
//!     ↓
//! original bytes ++ update section
//! ```

mod incremental;
mod object_serializer;

pub use incremental::{find_prev_xref_offset, IncrementalUpdate, WrittenUpdate};
pub use object_serializer::{hex_upper, indirect_header, ObjectSerializer};
