//! Source text decoding.

use std::borrow::Cow;
use std::path::Path;

use encoding_rs::{EUC_KR, Encoding, UTF_8, UTF_16BE, UTF_16LE};
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};

/// Text encoding of the registry export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceEncoding {
    /// EUC-KR with the CP949 (Unified Hangul Code) extensions.
    #[default]
    EucKr,
    Utf8,
}

impl SourceEncoding {
    pub fn encoding(self) -> &'static Encoding {
        match self {
            Self::EucKr => EUC_KR,
            Self::Utf8 => UTF_8,
        }
    }
}

/// Options for reading the registry file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    pub encoding: SourceEncoding,
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: SourceEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

/// Decodes raw file bytes into text.
///
/// A UTF-8 byte-order mark wins over the configured encoding. UTF-16 input
/// is rejected. Malformed sequences are an error, never replaced.
pub fn decode_registry_bytes<'a>(
    bytes: &'a [u8],
    encoding: SourceEncoding,
    path: &Path,
) -> Result<Cow<'a, str>> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((found, _)) if found == UTF_16LE || found == UTF_16BE => {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: found.name(),
            });
        }
        Some((found, bom_len)) => (found, &bytes[bom_len..]),
        None => (encoding.encoding(), bytes),
    };
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| IngestError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })
}
