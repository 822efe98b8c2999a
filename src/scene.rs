use std::sync::Arc;

use futures::channel::oneshot;

use crate::error::SuggestionError;
use crate::image::{SceneImage, SceneImageRef};
use crate::input::{GestureInterpreter, GestureSession, TouchEvent};
use crate::renderer::{ChangeReason, RenderOutcome, RenderScheduler, Renderer, Surface};
use crate::sticker::{DEFAULT_STICKER_POSITION, DEFAULT_STICKER_SIZE};
use crate::store::StickerStore;
use crate::suggestion::{SuggestionRequest, SuggestionService, parse_suggestions};

type SuggestionResult = Result<String, SuggestionError>;

/// Owns one photo session: base image, stickers, gesture state and suggestions.
///
/// Every handler runs to completion on the UI thread. The only background work
/// is the suggestion request, whose result is picked up by
/// [`SceneController::poll_suggestions`].
pub struct SceneController {
    image: Option<SceneImageRef>,
    store: StickerStore,
    gestures: GestureInterpreter,
    suggestions: Vec<String>,
    pending: Option<oneshot::Receiver<SuggestionResult>>,
    service: Option<Arc<dyn SuggestionService>>,
    scheduler: RenderScheduler,
    renderer: Renderer,
}

impl std::fmt::Debug for SceneController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneController")
            .field("image", &self.image)
            .field("stickers", &self.store.len())
            .field("gesture", &self.gestures.session())
            .field("suggestions", &self.suggestions)
            .field("pending", &self.pending.is_some())
            .field("has_service", &self.service.is_some())
            .finish()
    }
}

impl Default for SceneController {
    fn default() -> Self {
        Self::new(RenderScheduler::new())
    }
}

impl SceneController {
    pub fn new(scheduler: RenderScheduler) -> Self {
        Self {
            image: None,
            store: StickerStore::new(scheduler.clone()),
            gestures: GestureInterpreter::new(),
            suggestions: Vec::new(),
            pending: None,
            service: None,
            renderer: Renderer::new(scheduler.clone()),
            scheduler,
        }
    }

    /// Use `service` to fetch suggestions for every loaded image
    pub fn with_service(mut self, service: Arc<dyn SuggestionService>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    pub fn image(&self) -> Option<&SceneImage> {
        self.image.as_deref()
    }

    pub fn store(&self) -> &StickerStore {
        &self.store
    }

    pub fn gesture_session(&self) -> GestureSession {
        self.gestures.session()
    }

    /// Glyphs the user can currently add
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// True while a suggestion request is in flight
    pub fn is_fetching_suggestions(&self) -> bool {
        self.pending.is_some()
    }

    /// Replace the base image and ask for suggestions for it
    pub fn load_image(&mut self, image: SceneImage) {
        log::info!("loaded base image {}x{}", image.width(), image.height());
        let image = image.into_ref();
        self.image = Some(image.clone());
        self.scheduler.notify_changed(ChangeReason::ImageLoaded);

        // A result for the previous photo is no longer wanted
        self.pending = None;
        if let Some(service) = self.service.clone() {
            self.request_suggestions(service, image);
        }
    }

    fn request_suggestions(&mut self, service: Arc<dyn SuggestionService>, image: SceneImageRef) {
        let (sender, receiver) = oneshot::channel();
        let scheduler = self.scheduler.clone();

        let spawned = std::thread::Builder::new()
            .name("sticker-suggestions".to_owned())
            .spawn(move || {
                let result = SuggestionRequest::for_image(&image).and_then(|request| service.suggest(&request));
                // The receiver is gone if a newer image replaced this one
                let _ = sender.send(result);
                scheduler.wake();
            });

        match spawned {
            Ok(_) => self.pending = Some(receiver),
            Err(err) => log::error!("failed to start suggestion worker: {}", err),
        }
    }

    /// Collect a finished suggestion request, if any.
    ///
    /// Returns true if the suggestion list changed.
    pub fn poll_suggestions(&mut self) -> bool {
        let Some(receiver) = self.pending.as_mut() else {
            return false;
        };

        let result = match receiver.try_recv() {
            Ok(None) => return false,
            Ok(Some(result)) => result,
            Err(oneshot::Canceled) => Err(SuggestionError::WorkerDisconnected),
        };
        self.pending = None;

        match result {
            Ok(payload) => {
                self.receive_suggestions(&payload);
                true
            }
            Err(err) if err.retryable() => {
                log::warn!("sticker suggestions unavailable for now, load the photo again to retry: {}", err);
                false
            }
            Err(err) => {
                log::warn!("no sticker suggestions: {}", err);
                false
            }
        }
    }

    /// Replace the suggestion list from a raw service payload
    pub fn receive_suggestions(&mut self, payload: &str) {
        self.suggestions = parse_suggestions(payload);
        log::info!("sticker suggestions: {:?}", self.suggestions);
        self.scheduler.notify_changed(ChangeReason::SuggestionsChanged);
    }

    /// Place `glyph` at the default position and size
    pub fn add_sticker(&mut self, glyph: &str) {
        self.store
            .append(glyph, DEFAULT_STICKER_POSITION, DEFAULT_STICKER_SIZE);
    }

    /// Feed a touch event through the gesture interpreter into the store
    pub fn handle_touch(&mut self, event: &TouchEvent) {
        if let Some(delta) = self.gestures.handle(event) {
            self.store.apply_group_delta(delta);
        }
    }

    /// Redraw the whole scene onto `surface`
    pub fn render(&self, surface: Option<&mut dyn Surface>) -> RenderOutcome {
        self.renderer
            .render(self.image.as_deref(), self.store.snapshot(), surface)
    }
}
