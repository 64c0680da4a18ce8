use crate::foundation::SignatureError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub fn random_hex(len_bytes: usize) -> String {
    let bytes: Vec<u8> = (0..len_bytes).map(|_| rand::random::<u8>()).collect();
    hex::encode(bytes)
}

pub fn decode_base64(value: &str) -> Result<Vec<u8>, SignatureError> {
    let compact: String = value.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(STANDARD.decode(compact)?)
}

pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}
