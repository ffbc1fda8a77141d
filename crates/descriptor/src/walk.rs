use crate::model::Descriptor;

/// Pre-order traversal over a descriptor and everything nested inside it.
///
/// The node itself is visited first, then each structurally valid child
/// group in canonical kind order (see [`crate::DescriptorKind::child_kinds`]),
/// declaration order within a group. The first error returned by the
/// consumer aborts the whole traversal and is propagated unchanged; no
/// partial results are silently dropped.
pub fn walk<'a, E, F>(descriptor: Descriptor<'a>, consumer: &mut F) -> Result<(), E>
where
    F: FnMut(Descriptor<'a>) -> Result<(), E>,
{
    consumer(descriptor)?;
    for &kind in descriptor.kind().child_kinds() {
        for child in descriptor.children_of_kind(kind) {
            walk(child, consumer)?;
        }
    }
    Ok(())
}
