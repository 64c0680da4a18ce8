#![allow(dead_code)]

pub const TEST_TRAINING_ID: &str = "training-2024-rust";
pub const TEST_PARTICIPANT_ID: &str = "participant-42";
pub const TEST_USER_ID: &str = "user-trainer-1";
pub const TEST_PUBLIC_BASE_URL: &str = "https://storage.test/public";
pub const TEST_SIGNATURES_PREFIX: &str = "https://storage.test/public/signatures/signatures/";

pub const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
pub const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0];
