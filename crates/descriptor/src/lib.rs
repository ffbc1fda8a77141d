//! Immutable descriptor model for one protobuf schema file.
//!
//! A [`FileDescriptor`] is built once (by a descriptor-building collaborator,
//! or by [`FileBuilder`] directly in tests) and shared read-only afterwards.
//! Positional metadata is deliberately not stored on the nodes themselves:
//! it lives in a [`SourceInfo`] side table keyed by structural path, the same
//! addressing scheme protobuf uses for `SourceCodeInfo`.

mod model;
mod source;
mod walk;

pub use model::{Descriptor, DescriptorId, DescriptorKind, FileBuilder, FileDescriptor, ModelError};
pub use source::{Comments, Location, SourceInfo, SourcePath, SourceSpan};
pub use walk::walk;
