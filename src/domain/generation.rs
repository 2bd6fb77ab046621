//! Image payloads and the request tracker for AI image generation.

use base64::{engine::general_purpose::STANDARD, Engine};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Base64 image bytes plus MIME type; travels as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub mime_type: String,
    pub data_base64: String,
}

impl ImagePayload {
    pub fn new(mime_type: impl Into<String>, data_base64: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data_base64: data_base64.into(),
        }
    }

    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self::new(mime_type, STANDARD.encode(bytes))
    }

    pub fn parse_data_uri(uri: &str) -> Option<Self> {
        let (mime_type, data) = uri.strip_prefix("data:")?.split_once(";base64,")?;
        if mime_type.is_empty() || data.is_empty() {
            return None;
        }

        Some(Self::new(mime_type, data))
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data_base64)
    }

    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(self.data_base64.as_bytes())
    }

    pub fn approx_len(&self) -> usize {
        self.data_base64.len() / 4 * 3
    }

    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationState {
    #[default]
    Idle,
    Pending {
        request_id: RequestId,
    },
    Ready(ImagePayload),
    Failed(String),
}

/// Hands out request ids for the whole run, so ids never repeat across
/// modal instances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestIds {
    next: u64,
}

impl Default for RequestIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl RequestIds {
    pub fn allocate(&mut self) -> RequestId {
        let id = RequestId(self.next);
        self.next += 1;
        id
    }
}

/// Tracks the one generation request a modal cares about.
///
/// Results carrying any id other than the pending one are stale and get
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenerationTracker {
    state: GenerationState,
}

impl GenerationTracker {
    pub fn state(&self) -> &GenerationState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, GenerationState::Pending { .. })
    }

    /// Waits on `request_id` from now on. Returns the superseded id, if a
    /// request was still pending.
    pub fn begin(&mut self, request_id: RequestId) -> Option<RequestId> {
        let superseded = self.pending_id();
        self.state = GenerationState::Pending { request_id };
        superseded
    }

    /// Applies a finished request. Returns false when it is stale.
    pub fn complete(&mut self, request_id: RequestId, result: Result<ImagePayload, String>) -> bool {
        if self.pending_id() != Some(request_id) {
            return false;
        }

        self.state = match result {
            Ok(payload) => GenerationState::Ready(payload),
            Err(message) => GenerationState::Failed(message),
        };
        true
    }

    /// Drops the current request and returns its id if it was pending.
    pub fn cancel(&mut self) -> Option<RequestId> {
        let pending = self.pending_id();
        self.state = GenerationState::Idle;
        pending
    }

    pub fn ready_payload(&self) -> Option<&ImagePayload> {
        match &self.state {
            GenerationState::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    fn pending_id(&self) -> Option<RequestId> {
        match self.state {
            GenerationState::Pending { request_id } => Some(request_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ImagePayload {
        ImagePayload::from_bytes("image/png", b"\x89PNG")
    }

    #[test]
    fn data_uri_parses_back() {
        let uri = payload().data_uri();

        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(ImagePayload::parse_data_uri(&uri), Some(payload()));
        assert_eq!(payload().decode().expect("valid base64"), b"\x89PNG");
    }

    #[test]
    fn parse_rejects_plain_urls() {
        assert_eq!(ImagePayload::parse_data_uri("https://example.com/a.png"), None);
        assert_eq!(ImagePayload::parse_data_uri("data:;base64,AAAA"), None);
    }

    #[test]
    fn request_ids_never_repeat() {
        let mut ids = RequestIds::default();

        let first = ids.allocate();
        let second = ids.allocate();

        assert_eq!(first.value(), 1);
        assert_ne!(first, second);
    }

    #[test]
    fn begin_moves_to_pending_and_reports_superseded() {
        let mut ids = RequestIds::default();
        let mut tracker = GenerationTracker::default();
        let first = ids.allocate();

        assert_eq!(tracker.begin(first), None);
        assert!(tracker.is_pending());

        assert_eq!(tracker.begin(ids.allocate()), Some(first));
    }

    #[test]
    fn stale_result_is_discarded() {
        let mut ids = RequestIds::default();
        let mut tracker = GenerationTracker::default();
        let first = ids.allocate();
        let second = ids.allocate();
        tracker.begin(first);
        tracker.begin(second);

        assert!(!tracker.complete(first, Ok(payload())));
        assert!(tracker.is_pending());

        assert!(tracker.complete(second, Ok(payload())));
        assert_eq!(tracker.ready_payload(), Some(&payload()));
    }

    #[test]
    fn failure_keeps_message() {
        let mut tracker = GenerationTracker::default();
        let id = RequestIds::default().allocate();
        tracker.begin(id);

        tracker.complete(id, Err("nope".to_owned()));

        assert_eq!(tracker.state(), &GenerationState::Failed("nope".to_owned()));
    }

    #[test]
    fn cancel_returns_pending_id_and_ignores_late_result() {
        let mut tracker = GenerationTracker::default();
        let id = RequestIds::default().allocate();
        tracker.begin(id);

        assert_eq!(tracker.cancel(), Some(id));
        assert!(!tracker.complete(id, Ok(payload())));
        assert_eq!(tracker.state(), &GenerationState::Idle);
        assert_eq!(tracker.cancel(), None);
    }
}
