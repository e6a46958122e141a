//! Observable image loading state for a single view.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::application::FetchImageUseCase;
use crate::domain::entities::{CachingPolicy, LoadingState};

/// Owns the loading state of one image view and drives the fetch use case.
///
/// The view model is the only writer of its state; views observe it through
/// [`ImageViewModel::subscribe`]. Only the most recent fetch publishes its
/// outcome; an older fetch that finishes later leaves the state alone.
pub struct ImageViewModel {
    use_case: FetchImageUseCase,
    state: watch::Sender<LoadingState>,
    generation: AtomicU64,
}

impl ImageViewModel {
    /// Creates a view model in the `Loading` state.
    #[must_use]
    pub fn new(use_case: FetchImageUseCase) -> Self {
        let (state, _) = watch::channel(LoadingState::Loading);
        Self {
            use_case,
            state,
            generation: AtomicU64::new(0),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> LoadingState {
        self.state.borrow().clone()
    }

    /// Returns a receiver notified on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadingState> {
        self.state.subscribe()
    }

    /// Runs one fetch, publishing `Loading` and then its outcome.
    ///
    /// The outcome is always returned, but it is only published if no newer
    /// fetch started in the meantime.
    pub async fn fetch_image(&self, policy: CachingPolicy, url: Option<&str>) -> LoadingState {
        // Generation bumps and publishes both happen under the watch lock.
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadingState::Loading;
        });

        let state = LoadingState::from(self.use_case.fetch_image(url, policy).await);
        match &state {
            LoadingState::Success(image) => {
                debug!(url = ?url, source = %image.source, "Image ready");
            }
            LoadingState::Failure(error) => {
                warn!(url = ?url, error = %error, "Image failed to load");
            }
            LoadingState::Loading => {}
        }

        let published = self.state.send_if_modified(|current| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = state.clone();
            true
        });
        if !published {
            debug!(url = ?url, generation, "Superseded fetch finished, state left unchanged");
        }

        state
    }

    /// Starts a fetch on the runtime, bound to the returned task.
    ///
    /// Dropping the task cancels the fetch; the state then stays `Loading`
    /// and nothing is written to the cache.
    #[must_use]
    pub fn spawn_fetch(self: &Arc<Self>, policy: CachingPolicy, url: Option<String>) -> FetchTask {
        let view_model = Arc::clone(self);
        let handle =
            tokio::spawn(async move { view_model.fetch_image(policy, url.as_deref()).await });
        FetchTask { handle }
    }
}

impl std::fmt::Debug for ImageViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageViewModel")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

/// Handle to an in-flight fetch, cancelled when dropped.
#[derive(Debug)]
pub struct FetchTask {
    handle: JoinHandle<LoadingState>,
}

impl FetchTask {
    /// Cancels the fetch.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Returns true once the fetch has finished or been cancelled.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the fetch and returns its final state, or `None` if it was
    /// cancelled.
    pub async fn finished(&mut self) -> Option<LoadingState> {
        match (&mut self.handle).await {
            Ok(state) => Some(state),
            Err(e) => {
                if !e.is_cancelled() {
                    warn!(error = %e, "Fetch task panicked");
                }
                None
            }
        }
    }
}

impl Drop for FetchTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use bytes::Bytes;
    use tokio::sync::Notify;

    use super::*;
    use crate::domain::entities::ImageUrl;
    use crate::domain::errors::FetchError;
    use crate::domain::ports::mocks::{
        MockImageCache, MockImageDecoder, MockImageFetcher, VALID_PREFIX,
    };
    use crate::domain::ports::{ImageCachePort, ImageFetcherPort};

    const URL: &str = "https://example.com/a.png";

    /// Fetcher that never completes.
    #[derive(Default)]
    struct PendingFetcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ImageFetcherPort for PendingFetcher {
        async fn fetch_image(&self, _url: &ImageUrl) -> Result<Bytes, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::future::pending().await
        }
    }

    /// Fetcher whose first call waits for `release`; later calls fail with 404.
    #[derive(Default)]
    struct GatedFetcher {
        calls: AtomicUsize,
        release: Notify,
    }

    #[async_trait]
    impl ImageFetcherPort for GatedFetcher {
        async fn fetch_image(&self, _url: &ImageUrl) -> Result<Bytes, FetchError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.release.notified().await;
                Ok(valid_bytes())
            } else {
                Err(FetchError::invalid_response(Some(404)))
            }
        }
    }

    fn valid_bytes() -> Bytes {
        Bytes::from([VALID_PREFIX, b"-payload"].concat())
    }

    fn view_model(
        fetcher: Arc<dyn ImageFetcherPort>,
        cache: Arc<MockImageCache>,
    ) -> Arc<ImageViewModel> {
        let use_case = FetchImageUseCase::new(fetcher, cache, Arc::new(MockImageDecoder::new()));
        Arc::new(ImageViewModel::new(use_case))
    }

    async fn wait_for_call(calls: &AtomicUsize) {
        while calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let vm = view_model(
            Arc::new(MockImageFetcher::with_bytes(valid_bytes())),
            Arc::new(MockImageCache::new()),
        );
        assert!(vm.state().is_loading());
    }

    #[tokio::test]
    async fn test_success_is_published() {
        let vm = view_model(
            Arc::new(MockImageFetcher::with_bytes(valid_bytes())),
            Arc::new(MockImageCache::new()),
        );
        let mut rx = vm.subscribe();

        let state = vm
            .fetch_image(CachingPolicy::DuringAppSession, Some(URL))
            .await;

        assert!(state.is_success());
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().is_success());
        assert!(vm.state().is_success());
    }

    #[tokio::test]
    async fn test_failure_is_published() {
        let vm = view_model(
            Arc::new(MockImageFetcher::failing(FetchError::invalid_response(
                Some(404),
            ))),
            Arc::new(MockImageCache::new()),
        );

        let state = vm
            .fetch_image(CachingPolicy::DuringAppSession, Some(URL))
            .await;

        assert_eq!(state.error().and_then(FetchError::status), Some(404));
        assert!(vm.state().is_failure());
    }

    #[tokio::test]
    async fn test_missing_url_fails_immediately() {
        let fetcher = Arc::new(MockImageFetcher::with_bytes(valid_bytes()));
        let vm = view_model(fetcher.clone(), Arc::new(MockImageCache::new()));

        let state = vm.fetch_image(CachingPolicy::WithViewCycle, None).await;

        assert!(matches!(
            state,
            LoadingState::Failure(FetchError::InvalidUrl { url: None })
        ));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_refetch_after_failure() {
        let fetcher = Arc::new(MockImageFetcher::failing(FetchError::invalid_response(
            Some(503),
        )));
        let vm = view_model(fetcher.clone(), Arc::new(MockImageCache::new()));

        assert!(
            vm.fetch_image(CachingPolicy::DuringAppSession, Some(URL))
                .await
                .is_failure()
        );

        fetcher.set_outcome(Ok(valid_bytes()));

        assert!(
            vm.fetch_image(CachingPolicy::DuringAppSession, Some(URL))
                .await
                .is_success()
        );
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_spawned_fetch_completes() {
        let vm = view_model(
            Arc::new(MockImageFetcher::with_bytes(valid_bytes())),
            Arc::new(MockImageCache::new()),
        );

        let mut task = vm.spawn_fetch(CachingPolicy::DuringAppSession, Some(URL.to_string()));
        let state = task.finished().await;

        assert!(state.is_some_and(|s| s.is_success()));
        assert!(task.is_finished());
        assert!(vm.state().is_success());
    }

    #[tokio::test]
    async fn test_new_fetch_resets_to_loading() {
        let pending = Arc::new(PendingFetcher::default());
        let cache = Arc::new(MockImageCache::new());
        let vm = view_model(pending.clone(), cache);

        vm.state
            .send_replace(LoadingState::Failure(FetchError::invalid_response(None)));

        let _task = vm.spawn_fetch(CachingPolicy::DuringAppSession, Some(URL.to_string()));
        wait_for_call(&pending.calls).await;

        assert!(vm.state().is_loading());
    }

    #[tokio::test]
    async fn test_dropping_task_cancels_fetch() {
        let pending = Arc::new(PendingFetcher::default());
        let cache = Arc::new(MockImageCache::new());
        let vm = view_model(pending.clone(), cache.clone());

        let task = vm.spawn_fetch(CachingPolicy::DuringAppSession, Some(URL.to_string()));
        wait_for_call(&pending.calls).await;
        drop(task);
        tokio::task::yield_now().await;

        assert!(vm.state().is_loading());
        assert!(cache.is_empty());
        // The aborted task released its clone of the view model.
        while Arc::strong_count(&vm) > 1 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_cancelled_task_reports_none() {
        let pending = Arc::new(PendingFetcher::default());
        let vm = view_model(pending.clone(), Arc::new(MockImageCache::new()));

        let mut task = vm.spawn_fetch(CachingPolicy::WithViewCycle, Some(URL.to_string()));
        wait_for_call(&pending.calls).await;
        task.cancel();

        assert!(task.finished().await.is_none());
        assert!(vm.state().is_loading());
    }

    #[tokio::test]
    async fn test_superseded_fetch_does_not_overwrite_newer_state() {
        let gated = Arc::new(GatedFetcher::default());
        let vm = view_model(gated.clone(), Arc::new(MockImageCache::new()));

        let mut older = vm.spawn_fetch(
            CachingPolicy::DuringAppSession,
            Some("https://example.com/old.png".to_string()),
        );
        wait_for_call(&gated.calls).await;

        let newest = vm
            .fetch_image(
                CachingPolicy::DuringAppSession,
                Some("https://example.com/new.png"),
            )
            .await;
        assert!(newest.is_failure());

        gated.release.notify_one();
        let stale = older.finished().await;

        assert!(stale.is_some_and(|s| s.is_success()));
        assert_eq!(vm.state().error().and_then(FetchError::status), Some(404));
    }

    #[tokio::test]
    async fn test_newer_fetch_publishes_over_older_result() {
        let fetcher = Arc::new(MockImageFetcher::with_bytes(valid_bytes()));
        let vm = view_model(fetcher.clone(), Arc::new(MockImageCache::new()));

        vm.fetch_image(CachingPolicy::WithViewCycle, Some(URL)).await;
        fetcher.set_outcome(Err(FetchError::invalid_response(Some(500))));
        vm.fetch_image(CachingPolicy::WithViewCycle, Some(URL)).await;

        assert_eq!(vm.state().error().and_then(FetchError::status), Some(500));
    }
}
