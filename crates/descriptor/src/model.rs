use crate::source::{Comments, Location, SourceInfo, SourcePath, SourceSpan};
use std::fmt;
use thiserror::Error;

/// The kind of a node in the descriptor tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    File,
    Message,
    Field,
    Enum,
    EnumValue,
    Service,
    Method,
    Oneof,
    Extension,
}

impl DescriptorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Message => "message",
            Self::Field => "field",
            Self::Enum => "enum",
            Self::EnumValue => "enum value",
            Self::Service => "service",
            Self::Method => "method",
            Self::Oneof => "oneof",
            Self::Extension => "extension",
        }
    }

    /// Child kinds structurally valid for this kind, in canonical traversal
    /// order.
    #[must_use]
    pub const fn child_kinds(self) -> &'static [Self] {
        match self {
            Self::File => &[Self::Enum, Self::Extension, Self::Message, Self::Service],
            Self::Message => &[
                Self::Enum,
                Self::Extension,
                Self::Field,
                Self::Message,
                Self::Oneof,
            ],
            Self::Enum => &[Self::EnumValue],
            Self::Service => &[Self::Method],
            Self::Field | Self::EnumValue | Self::Method | Self::Oneof | Self::Extension => &[],
        }
    }

    const fn accepts_child(self, child: Self) -> bool {
        let mut i = 0;
        let kinds = self.child_kinds();
        while i < kinds.len() {
            if kinds[i] as u8 == child as u8 {
                return true;
            }
            i += 1;
        }
        false
    }
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Index of a node within its owning [`FileDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(u32);

impl DescriptorId {
    /// The file node itself; every file's arena starts with it.
    pub const FILE: Self = Self(0);

    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct NodeData {
    name: String,
    full_name: String,
    kind: DescriptorKind,
    parent: Option<DescriptorId>,
    children: Vec<DescriptorId>,
    /// Index among same-kind siblings; the index half of this node's
    /// structural path segment.
    sibling_index: i32,
    /// Field number (fields, extensions) or enum value number.
    number: Option<i32>,
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("a {child} cannot be declared inside a {parent}")]
    InvalidChild {
        parent: DescriptorKind,
        child: DescriptorKind,
    },
    #[error("descriptor id {0:?} does not belong to this file")]
    UnknownDescriptor(DescriptorId),
}

/// One parsed schema file: an arena of descriptor nodes plus the positional
/// side table. Immutable after [`FileBuilder::build`]; shared by reference
/// among all rules.
#[derive(Debug)]
pub struct FileDescriptor {
    path: String,
    package: String,
    syntax: String,
    nodes: Vec<NodeData>,
    source_info: SourceInfo,
}

impl FileDescriptor {
    /// Project-relative path of the source file, e.g. `google/example/v1/book.proto`.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// `proto2` or `proto3`.
    #[must_use]
    pub fn syntax(&self) -> &str {
        &self.syntax
    }

    /// The file node, root of the tree.
    #[must_use]
    pub fn root(&self) -> Descriptor<'_> {
        Descriptor {
            file: self,
            id: DescriptorId::FILE,
        }
    }

    /// Look up a node by id. `None` if the id belongs to another file.
    #[must_use]
    pub fn get(&self, id: DescriptorId) -> Option<Descriptor<'_>> {
        (id.index() < self.nodes.len()).then_some(Descriptor { file: self, id })
    }

    /// Total node count, the file node included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn source_info(&self) -> &SourceInfo {
        &self.source_info
    }

    fn node(&self, id: DescriptorId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// Cheap copyable handle to one node of a [`FileDescriptor`].
#[derive(Clone, Copy)]
pub struct Descriptor<'a> {
    file: &'a FileDescriptor,
    id: DescriptorId,
}

impl<'a> Descriptor<'a> {
    #[must_use]
    pub fn id(self) -> DescriptorId {
        self.id
    }

    #[must_use]
    pub fn kind(self) -> DescriptorKind {
        self.file.node(self.id).kind
    }

    /// Simple (unqualified) name. For the file node this is the file path.
    #[must_use]
    pub fn name(self) -> &'a str {
        &self.file.node(self.id).name
    }

    /// Fully qualified name, e.g. `google.example.v1.Book.name`.
    /// For the file node this is the package.
    #[must_use]
    pub fn full_name(self) -> &'a str {
        &self.file.node(self.id).full_name
    }

    /// Field number or enum value number, where applicable.
    #[must_use]
    pub fn number(self) -> Option<i32> {
        self.file.node(self.id).number
    }

    #[must_use]
    pub fn file(self) -> &'a FileDescriptor {
        self.file
    }

    #[must_use]
    pub fn is_file(self) -> bool {
        self.id == DescriptorId::FILE
    }

    #[must_use]
    pub fn parent(self) -> Option<Descriptor<'a>> {
        self.file.node(self.id).parent.map(|id| Descriptor {
            file: self.file,
            id,
        })
    }

    /// All structural children, in declaration order.
    pub fn children(self) -> impl Iterator<Item = Descriptor<'a>> {
        self.file
            .node(self.id)
            .children
            .iter()
            .map(move |&id| Descriptor {
                file: self.file,
                id,
            })
    }

    /// Children of one kind, in declaration order.
    pub fn children_of_kind(self, kind: DescriptorKind) -> impl Iterator<Item = Descriptor<'a>> {
        self.children().filter(move |child| child.kind() == kind)
    }

    /// Structural path of this node from the file root, in the
    /// `SourceCodeInfo` addressing scheme.
    #[must_use]
    pub fn source_path(self) -> SourcePath {
        source_path_of(&self.file.nodes, self.id)
    }

    /// The recorded span for this node, or [`SourceSpan::UNKNOWN`] when the
    /// file was parsed without positional metadata.
    #[must_use]
    pub fn locate(self) -> SourceSpan {
        self.file.source_info.span(&self.source_path())
    }

    /// The recorded span for a sub-element of this node, addressed by an
    /// options path suffix (e.g. one element of a repeated annotation).
    #[must_use]
    pub fn locate_option(self, option_path: &[i32]) -> SourceSpan {
        self.file
            .source_info
            .span(&self.source_path().join(option_path))
    }

    /// Comments attached to this node in the original source, if recorded.
    #[must_use]
    pub fn comments(self) -> Option<&'a Comments> {
        self.file
            .source_info
            .location(&self.source_path())
            .map(|location| &location.comments)
    }
}

impl PartialEq for Descriptor<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.file, other.file) && self.id == other.id
    }
}

impl Eq for Descriptor<'_> {}

impl fmt::Debug for Descriptor<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("kind", &self.kind())
            .field("full_name", &self.full_name())
            .finish()
    }
}

/// Container field number for a child kind inside a parent kind, per
/// `descriptor.proto`. The walk/build layer guarantees valid combinations.
fn container_field_number(parent: DescriptorKind, child: DescriptorKind) -> i32 {
    use DescriptorKind as K;
    match (parent, child) {
        (K::File, K::Message) => 4,
        (K::File, K::Enum) => 5,
        (K::File, K::Service) => 6,
        (K::File, K::Extension) => 7,
        (K::Message, K::Field) | (K::Enum, K::EnumValue) | (K::Service, K::Method) => 2,
        (K::Message, K::Message) => 3,
        (K::Message, K::Enum) => 4,
        (K::Message, K::Extension) => 6,
        (K::Message, K::Oneof) => 8,
        _ => unreachable!("invalid nesting rejected at build time"),
    }
}

fn source_path_of(nodes: &[NodeData], id: DescriptorId) -> SourcePath {
    let mut segments = Vec::new();
    let mut current = id;
    while let Some(parent) = nodes[current.index()].parent {
        let node = &nodes[current.index()];
        segments.push(node.sibling_index);
        segments.push(container_field_number(
            nodes[parent.index()].kind,
            node.kind,
        ));
        current = parent;
    }
    segments.reverse();
    SourcePath::from(segments)
}

/// Builder for a [`FileDescriptor`]; the only mutation surface the model
/// has. `build` consumes it and freezes the tree.
#[derive(Debug)]
pub struct FileBuilder {
    path: String,
    package: String,
    syntax: String,
    nodes: Vec<NodeData>,
    source_info: SourceInfo,
}

impl FileBuilder {
    #[must_use]
    pub fn new(path: impl Into<String>, package: impl Into<String>) -> Self {
        let path = path.into();
        let package = package.into();
        let root = NodeData {
            name: path.clone(),
            full_name: package.clone(),
            kind: DescriptorKind::File,
            parent: None,
            children: Vec::new(),
            sibling_index: 0,
            number: None,
        };
        Self {
            path,
            package,
            syntax: "proto3".to_string(),
            nodes: vec![root],
            source_info: SourceInfo::new(),
        }
    }

    #[must_use]
    pub fn with_syntax(mut self, syntax: impl Into<String>) -> Self {
        self.syntax = syntax.into();
        self
    }

    pub fn add_message(
        &mut self,
        parent: DescriptorId,
        name: &str,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::Message, name, None)
    }

    pub fn add_field(
        &mut self,
        parent: DescriptorId,
        name: &str,
        number: i32,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::Field, name, Some(number))
    }

    pub fn add_extension(
        &mut self,
        parent: DescriptorId,
        name: &str,
        number: i32,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::Extension, name, Some(number))
    }

    pub fn add_enum(
        &mut self,
        parent: DescriptorId,
        name: &str,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::Enum, name, None)
    }

    pub fn add_enum_value(
        &mut self,
        parent: DescriptorId,
        name: &str,
        number: i32,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::EnumValue, name, Some(number))
    }

    pub fn add_service(
        &mut self,
        parent: DescriptorId,
        name: &str,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::Service, name, None)
    }

    pub fn add_method(
        &mut self,
        parent: DescriptorId,
        name: &str,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::Method, name, None)
    }

    pub fn add_oneof(
        &mut self,
        parent: DescriptorId,
        name: &str,
    ) -> Result<DescriptorId, ModelError> {
        self.add_node(parent, DescriptorKind::Oneof, name, None)
    }

    /// Record the span for a node already added to this builder.
    pub fn record_span(&mut self, id: DescriptorId, span: SourceSpan) -> Result<(), ModelError> {
        self.ensure_known(id)?;
        let path = source_path_of(&self.nodes, id);
        match self.source_info.location(&path) {
            Some(existing) => {
                let mut location = existing.clone();
                location.span = span;
                self.source_info.record(path, location);
            }
            None => self.source_info.record(path, Location::new(span)),
        }
        Ok(())
    }

    /// Record comments for a node already added to this builder.
    pub fn record_comments(
        &mut self,
        id: DescriptorId,
        comments: Comments,
    ) -> Result<(), ModelError> {
        self.ensure_known(id)?;
        let path = source_path_of(&self.nodes, id);
        let mut location = self.source_info.location(&path).cloned().unwrap_or_default();
        location.comments = comments;
        self.source_info.record(path, location);
        Ok(())
    }

    /// Record a raw side-table entry, e.g. for an options sub-path that has
    /// no descriptor node of its own.
    pub fn record_location(&mut self, path: SourcePath, location: Location) {
        self.source_info.record(path, location);
    }

    #[must_use]
    pub fn build(self) -> FileDescriptor {
        FileDescriptor {
            path: self.path,
            package: self.package,
            syntax: self.syntax,
            nodes: self.nodes,
            source_info: self.source_info,
        }
    }

    fn ensure_known(&self, id: DescriptorId) -> Result<(), ModelError> {
        if id.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(ModelError::UnknownDescriptor(id))
        }
    }

    fn add_node(
        &mut self,
        parent: DescriptorId,
        kind: DescriptorKind,
        name: &str,
        number: Option<i32>,
    ) -> Result<DescriptorId, ModelError> {
        self.ensure_known(parent)?;
        let parent_node = &self.nodes[parent.index()];
        if !parent_node.kind.accepts_child(kind) {
            return Err(ModelError::InvalidChild {
                parent: parent_node.kind,
                child: kind,
            });
        }
        let sibling_index = parent_node
            .children
            .iter()
            .filter(|&&child| self.nodes[child.index()].kind == kind)
            .count() as i32;
        let full_name = if parent_node.full_name.is_empty() {
            name.to_string()
        } else {
            format!("{}.{name}", parent_node.full_name)
        };
        let id = DescriptorId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            name: name.to_string(),
            full_name,
            kind,
            parent: Some(parent),
            children: Vec::new(),
            sibling_index,
            number,
        });
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }
}
