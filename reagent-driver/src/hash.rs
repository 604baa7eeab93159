//! Cache-key hashing, grounded on `brain::v2::sha256_hex`: join the inputs
//! that determine a `generate` call's output, hash with SHA-256, and
//! render as lowercase hex.

use sha2::{Digest, Sha256};

use reagent_types::{Message, ToolCatalogue};

/// Hash `bytes` with SHA-256 and render the digest as lowercase hex.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Derive a [`crate::capability::ResponseCache`] key from the conversation
/// state a `generate` call would see: message contents, in order, and the
/// declared tool names, in order. Two sessions that would render the same
/// prompt and offer the same tools collide on the same key.
pub fn cache_key(messages: &[Message], tools: &ToolCatalogue) -> String {
    let mut joined = String::new();
    for message in messages {
        joined.push_str(&message.content);
        joined.push('\n');
    }
    for tool in tools.iter() {
        joined.push_str(&tool.name);
        joined.push('\n');
    }
    sha256_hex(joined.as_bytes())
}
