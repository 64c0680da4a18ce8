//! Signature pad → coordinator hand-off.
//!
//! The pad keeps a cloneable [`CaptureHandle`]; the coordinator owning the document session holds
//! the single [`CaptureSubscription`]. Dropping or closing the subscription makes every later
//! submission fail with `CaptureClosed`.

use crate::domain::SignerRole;
use crate::foundation::SignatureError;
use tokio::sync::mpsc;

/// Pending captures buffered before the coordinator drains them.
pub const CAPTURE_CHANNEL_CAPACITY: usize = 16;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapturedSignature {
    pub role: SignerRole,
    /// `data:image/...;base64,...` as produced by the pad.
    pub image_data: String,
}

#[derive(Clone)]
pub struct CaptureHandle {
    sender: mpsc::Sender<CapturedSignature>,
}

pub struct CaptureSubscription {
    receiver: mpsc::Receiver<CapturedSignature>,
}

pub fn capture_channel() -> (CaptureHandle, CaptureSubscription) {
    let (sender, receiver) = mpsc::channel(CAPTURE_CHANNEL_CAPACITY);
    (CaptureHandle { sender }, CaptureSubscription { receiver })
}

impl CaptureHandle {
    pub async fn submit(&self, role: SignerRole, image_data: impl Into<String>) -> Result<(), SignatureError> {
        self.sender
            .send(CapturedSignature { role, image_data: image_data.into() })
            .await
            .map_err(|_| SignatureError::CaptureClosed)
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl CaptureSubscription {
    /// Next capture; `None` once every handle is gone or the subscription was closed and drained.
    pub async fn next(&mut self) -> Option<CapturedSignature> {
        self.receiver.recv().await
    }

    /// Stop accepting captures. Already buffered ones can still be drained.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
