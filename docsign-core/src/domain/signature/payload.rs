//! Validation of captured signature images delivered as `data:` URLs.

use crate::domain::SignerRole;
use crate::foundation::util::encoding::{decode_base64, random_hex};
use crate::foundation::{DocumentId, SignatureError, STORAGE_KEY_RANDOM_BYTES};

const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    fn magic(&self) -> &'static [u8] {
        match self {
            ImageFormat::Png => PNG_MAGIC,
            ImageFormat::Jpeg => JPEG_MAGIC,
        }
    }
}

/// Decoded, validated signature image ready for upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

impl SignatureImage {
    /// Parse `data:image/<png|jpeg>;base64,<payload>`.
    pub fn from_data_url(data: &str, max_bytes: usize) -> Result<Self, SignatureError> {
        let data = data.trim();
        if data.is_empty() {
            return Err(SignatureError::invalid_payload("empty signature data"));
        }
        let rest = data.strip_prefix("data:").ok_or_else(|| SignatureError::invalid_payload("missing data: prefix"))?;
        let (header, payload) = rest.split_once(',').ok_or_else(|| SignatureError::invalid_payload("missing payload separator"))?;
        let mime = header
            .strip_suffix(";base64")
            .ok_or_else(|| SignatureError::invalid_payload("payload is not base64 encoded"))?;
        let format =
            ImageFormat::from_mime(mime).ok_or_else(|| SignatureError::invalid_payload(format!("unsupported image type: {}", mime)))?;

        let bytes = decode_base64(payload).map_err(|err| SignatureError::invalid_payload(err.to_string()))?;
        if bytes.is_empty() {
            return Err(SignatureError::invalid_payload("empty image"));
        }
        if bytes.len() > max_bytes {
            return Err(SignatureError::invalid_payload(format!("image too large: {} bytes (max {})", bytes.len(), max_bytes)));
        }
        if !bytes.starts_with(format.magic()) {
            return Err(SignatureError::invalid_payload(format!("content does not match {}", format.content_type())));
        }
        Ok(Self { format, bytes })
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Unique object key for a signature image.
pub fn signature_storage_key(document_id: &DocumentId, role: SignerRole, timestamp_nanos: u64, format: ImageFormat) -> String {
    format!(
        "signatures/{}/{}-{}-{}.{}",
        document_id,
        role,
        timestamp_nanos,
        random_hex(STORAGE_KEY_RANDOM_BYTES),
        format.extension()
    )
}
