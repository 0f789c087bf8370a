use std::sync::Arc;

/// Compiled esc/pos byte stream
///
/// Produced by [ReceiptDocument::compile](crate::ReceiptDocument::compile) and handed as a whole to the print service. The content cannot be modified once built, and clones share the same bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: Arc<[u8]>,
}

impl CommandBuffer {
    pub(crate) fn new(bytes: Vec<u8>) -> CommandBuffer {
        CommandBuffer {
            bytes: bytes.into(),
        }
    }

    /// Number of bytes in the buffer
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw bytes, as they will reach the printer
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl AsRef<[u8]> for CommandBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for CommandBuffer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter
            .debug_struct("CommandBuffer")
            .field("len", &self.bytes.len())
            .finish()
    }
}
