use std::{
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::{mpsc::Sender, Arc},
};

use tokio::{runtime::Handle, task::JoinHandle};

use super::{client::ImagenClient, error::GenerationError};
use crate::domain::{
    events::AppEvent,
    generation::{ImagePayload, RequestId},
};

const IMAGEGEN_EVENT_SEND_FAILED: &str = "IMAGEGEN_EVENT_SEND_FAILED";

pub type GenerateFuture =
    Pin<Box<dyn Future<Output = Result<ImagePayload, GenerationError>> + Send + 'static>>;
pub type GenerateFn = Arc<dyn Fn(String) -> GenerateFuture + Send + Sync>;

/// Seam between the shell and whatever produces images.
pub trait ImageGenerationPort {
    /// None when the feature can be used; otherwise why not.
    fn unavailable_reason(&self) -> Option<&str>;
    /// Starts a request; its result arrives later as `AppEvent::ImageGenerated`.
    fn submit(&mut self, request_id: RequestId, prompt: String);
    fn cancel(&mut self, request_id: RequestId);
}

impl<T: ImageGenerationPort + ?Sized> ImageGenerationPort for Box<T> {
    fn unavailable_reason(&self) -> Option<&str> {
        (**self).unavailable_reason()
    }

    fn submit(&mut self, request_id: RequestId, prompt: String) {
        (**self).submit(request_id, prompt)
    }

    fn cancel(&mut self, request_id: RequestId) {
        (**self).cancel(request_id)
    }
}

/// Runs generation requests on the shared tokio runtime.
pub struct ImageGenerationWorker {
    runtime: Handle,
    generate: GenerateFn,
    events: Sender<AppEvent>,
    in_flight: HashMap<RequestId, JoinHandle<()>>,
}

impl ImageGenerationWorker {
    pub fn new(runtime: Handle, generate: GenerateFn, events: Sender<AppEvent>) -> Self {
        Self {
            runtime,
            generate,
            events,
            in_flight: HashMap::new(),
        }
    }

    pub fn with_client(runtime: Handle, client: ImagenClient, events: Sender<AppEvent>) -> Self {
        let client = Arc::new(client);
        let generate: GenerateFn = Arc::new(move |prompt: String| -> GenerateFuture {
            let client = Arc::clone(&client);
            Box::pin(async move { client.generate(&prompt).await })
        });

        Self::new(runtime, generate, events)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    fn prune_finished(&mut self) {
        self.in_flight.retain(|_, handle| !handle.is_finished());
    }
}

impl ImageGenerationPort for ImageGenerationWorker {
    fn unavailable_reason(&self) -> Option<&str> {
        None
    }

    fn submit(&mut self, request_id: RequestId, prompt: String) {
        self.prune_finished();

        let future = (self.generate)(prompt);
        let events = self.events.clone();
        let handle = self.runtime.spawn(async move {
            let result = future.await.map_err(|error| error.user_message());
            if let Err(error) = events.send(AppEvent::ImageGenerated { request_id, result }) {
                tracing::warn!(
                    code = IMAGEGEN_EVENT_SEND_FAILED,
                    request_id = request_id.value(),
                    error = %error,
                    "image generation result dropped; shell is gone"
                );
            }
        });

        tracing::info!(request_id = request_id.value(), "image generation submitted");
        self.in_flight.insert(request_id, handle);
    }

    fn cancel(&mut self, request_id: RequestId) {
        if let Some(handle) = self.in_flight.remove(&request_id) {
            handle.abort();
            tracing::info!(request_id = request_id.value(), "image generation cancelled");
        }
    }
}

impl Drop for ImageGenerationWorker {
    fn drop(&mut self) {
        for (_, handle) in self.in_flight.drain() {
            handle.abort();
        }
    }
}

/// Stand-in used when the API key is missing; the rest of the app runs.
#[derive(Debug, Clone)]
pub struct DisabledImageGeneration {
    reason: String,
}

impl DisabledImageGeneration {
    pub fn new(error: &GenerationError) -> Self {
        Self {
            reason: error.user_message(),
        }
    }
}

impl ImageGenerationPort for DisabledImageGeneration {
    fn unavailable_reason(&self) -> Option<&str> {
        Some(&self.reason)
    }

    fn submit(&mut self, request_id: RequestId, _prompt: String) {
        tracing::debug!(
            request_id = request_id.value(),
            "image generation disabled; request ignored"
        );
    }

    fn cancel(&mut self, _request_id: RequestId) {}
}
