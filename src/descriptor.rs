//! Descriptor helpers: message index paths and registry transport form.
//!
//! The index path locates a message type inside its schema file's
//! nested-message tree. It is fixed for the lifetime of a message type,
//! so the serializer computes it once at construction and caches the
//! encoded bytes.

use base64::Engine;
use prost::Message;
use prost_reflect::{FileDescriptor, MessageDescriptor};

/// Computes the index path of a message type, root-to-leaf.
///
/// Walks from the message up its nested-message ancestry to the file
/// root, recording the sibling index at each level, then reverses. Only
/// message nesting counts; the file itself contributes nothing, so a
/// top-level message always yields a path of length 1. Descriptor trees
/// have no cycles, so the walk always terminates.
pub fn message_index_path(descriptor: &MessageDescriptor) -> Vec<i64> {
    let mut indexes = Vec::new();
    let mut current = descriptor.clone();
    loop {
        // The last path element is the index of this descriptor within
        // its parent's message list.
        indexes.push(i64::from(current.path().last().copied().unwrap_or(0)));
        match current.parent_message() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    indexes.reverse();
    indexes
}

/// Serializes a file descriptor to the form the registry stores for
/// Protobuf schemas: the binary `FileDescriptorProto`, base64-encoded
/// with the standard alphabet.
pub fn file_descriptor_to_string(file: &FileDescriptor) -> String {
    let bytes = file.file_descriptor_proto().encode_to_vec();
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost_reflect::DescriptorPool;
    use prost_types::{DescriptorProto, FileDescriptorProto, FileDescriptorSet};

    fn message(name: &str, nested: Vec<DescriptorProto>) -> DescriptorProto {
        DescriptorProto {
            name: Some(name.to_string()),
            nested_type: nested,
            ..Default::default()
        }
    }

    fn test_pool() -> DescriptorPool {
        let file = FileDescriptorProto {
            name: Some("test.proto".to_string()),
            package: Some("test".to_string()),
            syntax: Some("proto3".to_string()),
            message_type: vec![
                message("First", vec![]),
                message("Second", vec![]),
                message(
                    "Third",
                    vec![
                        message("Inner0", vec![]),
                        message("Inner1", vec![message("Deep", vec![])]),
                    ],
                ),
            ],
            ..Default::default()
        };
        DescriptorPool::from_file_descriptor_set(FileDescriptorSet { file: vec![file] })
            .expect("valid descriptor set")
    }

    fn descriptor(pool: &DescriptorPool, name: &str) -> MessageDescriptor {
        pool.get_message_by_name(name)
            .unwrap_or_else(|| panic!("message {} not in pool", name))
    }

    #[test]
    fn top_level_messages_have_single_element_paths() {
        let pool = test_pool();
        assert_eq!(message_index_path(&descriptor(&pool, "test.First")), vec![0]);
        assert_eq!(message_index_path(&descriptor(&pool, "test.Second")), vec![1]);
        assert_eq!(message_index_path(&descriptor(&pool, "test.Third")), vec![2]);
    }

    #[test]
    fn nested_messages_collect_an_index_per_level() {
        let pool = test_pool();
        assert_eq!(
            message_index_path(&descriptor(&pool, "test.Third.Inner0")),
            vec![2, 0]
        );
        assert_eq!(
            message_index_path(&descriptor(&pool, "test.Third.Inner1")),
            vec![2, 1]
        );
        assert_eq!(
            message_index_path(&descriptor(&pool, "test.Third.Inner1.Deep")),
            vec![2, 1, 0]
        );
    }

    #[test]
    fn transport_form_is_base64_of_the_descriptor_proto() {
        let pool = test_pool();
        let file = descriptor(&pool, "test.First").parent_file();

        let encoded = file_descriptor_to_string(&file);
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .expect("valid base64");
        let decoded = FileDescriptorProto::decode(bytes.as_slice()).expect("valid descriptor");
        assert_eq!(decoded.name(), "test.proto");
        assert_eq!(decoded.message_type.len(), 3);
    }
}
