//! Poster lookup against the TMDB metadata API
//!
//! A missing poster is a normal state: every failure on this path degrades to
//! `None` so the recommendation card falls back to placeholder text.

use crate::{
    cache::MemoCache,
    cached,
    error::{AppError, AppResult},
    models::{MovieId, TmdbMovieDetails},
};
use reqwest::Client as HttpClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Default number of concurrent requests to the metadata API
pub const DEFAULT_MAX_IN_FLIGHT: usize = 4;

/// Source of poster paths for a movie id
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterProvider: Send + Sync {
    /// Fetches the poster path (e.g. `/abc.jpg`) for a movie
    ///
    /// `Ok(None)` means the service answered but has no poster for this movie.
    async fn fetch_poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait::async_trait]
impl PosterProvider for TmdbProvider {
    async fn fetch_poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let details: TmdbMovieDetails = response.json().await?;

        tracing::debug!(
            movie_id = %movie_id,
            has_poster = details.poster_path.is_some(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details.poster_path.filter(|path| !path.is_empty()))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}

/// Resolves movie ids to full poster URLs, memoizing answers per id
#[derive(Clone)]
pub struct PosterResolver {
    provider: Arc<dyn PosterProvider>,
    base_url: String,
    cache: MemoCache<MovieId, Option<String>>,
    /// Shared across clones, so the limit holds process-wide
    semaphore: Arc<Semaphore>,
}

impl PosterResolver {
    pub fn new(provider: Arc<dyn PosterProvider>, base_url: String) -> Self {
        Self {
            provider,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: MemoCache::new(),
            semaphore: Arc::new(Semaphore::new(DEFAULT_MAX_IN_FLIGHT)),
        }
    }

    /// Limits how many lookups hit the provider at the same time (at least one)
    pub fn with_max_in_flight(mut self, max_in_flight: usize) -> Self {
        self.semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));
        self
    }

    /// Poster URL for a movie, or `None` if it has none or the lookup failed
    pub async fn resolve(&self, movie_id: MovieId) -> Option<String> {
        match self.lookup(movie_id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(
                    movie_id = %movie_id,
                    provider = self.provider.name(),
                    error = %e,
                    "Poster lookup failed"
                );
                None
            }
        }
    }

    /// Resolves several posters concurrently, preserving input order
    ///
    /// Cache misses still go through the in-flight limit.
    pub async fn resolve_many(&self, movie_ids: Vec<MovieId>) -> Vec<Option<String>> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for movie_id in movie_ids {
            let resolver = self.clone();
            tasks.push(tokio::spawn(
                async move { resolver.resolve(movie_id).await },
            ));
        }

        let mut posters = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(poster) => posters.push(poster),
                Err(e) => {
                    tracing::error!(error = %e, "Poster task join error");
                    posters.push(None);
                }
            }
        }

        posters
    }

    /// Number of ids with a memoized answer
    pub fn cached_count(&self) -> usize {
        self.cache.len()
    }

    async fn lookup(&self, movie_id: MovieId) -> AppResult<Option<String>> {
        cached!(self.cache, movie_id, async move {
            // Acquire semaphore permit for concurrent lookup control
            let _permit = self
                .semaphore
                .acquire()
                .await
                .map_err(|e| AppError::Internal(format!("Failed to acquire semaphore: {}", e)))?;
            let path = self.provider.fetch_poster_path(movie_id).await?;
            Ok::<_, AppError>(path.map(|p| self.poster_url(&p)))
        })
    }

    fn poster_url(&self, poster_path: &str) -> String {
        if poster_path.starts_with('/') {
            format!("{}{}", self.base_url, poster_path)
        } else {
            format!("{}/{}", self.base_url, poster_path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn resolver(mock: MockPosterProvider) -> PosterResolver {
        PosterResolver::new(Arc::new(mock), BASE.to_string())
    }

    #[tokio::test]
    async fn test_resolve_builds_full_url() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster_path()
            .with(eq(MovieId(19995)))
            .times(1)
            .returning(|_| Ok(Some("/kyeq.jpg".to_string())));
        mock.expect_name().return_const("mock");

        let resolver = resolver(mock);
        assert_eq!(
            resolver.resolve(MovieId(19995)).await,
            Some("https://image.tmdb.org/t/p/w500/kyeq.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_resolve_memoizes_per_id() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster_path()
            .times(1)
            .returning(|_| Ok(Some("/once.jpg".to_string())));
        mock.expect_name().return_const("mock");

        let resolver = resolver(mock);
        let first = resolver.resolve(MovieId(1)).await;
        let second = resolver.resolve(MovieId(1)).await;

        assert_eq!(first, second);
        assert_eq!(resolver.cached_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_poster_is_absent_and_memoized() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster_path()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_name().return_const("mock");

        let resolver = resolver(mock);
        assert_eq!(resolver.resolve(MovieId(2)).await, None);
        assert_eq!(resolver.resolve(MovieId(2)).await, None);
    }

    #[tokio::test]
    async fn test_failure_is_absorbed_and_not_memoized() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster_path()
            .times(2)
            .returning(|_| Err(AppError::ExternalApi("TMDB API returned status 503".to_string())));
        mock.expect_name().return_const("mock");

        let resolver = resolver(mock);
        assert_eq!(resolver.resolve(MovieId(3)).await, None);
        assert_eq!(resolver.resolve(MovieId(3)).await, None);
        assert_eq!(resolver.cached_count(), 0);
    }

    #[tokio::test]
    async fn test_resolve_many_preserves_order() {
        let mut mock = MockPosterProvider::new();
        mock.expect_fetch_poster_path().returning(|id| match id.0 {
            2 => Ok(None),
            n => Ok(Some(format!("/{}.jpg", n))),
        });
        mock.expect_name().return_const("mock");

        let resolver = resolver(mock);
        let posters = resolver
            .resolve_many(vec![MovieId(3), MovieId(2), MovieId(1)])
            .await;

        assert_eq!(
            posters,
            vec![
                Some(format!("{}/3.jpg", BASE)),
                None,
                Some(format!("{}/1.jpg", BASE)),
            ]
        );
    }

    /// Sleeps on every call and records the highest number of concurrent calls
    struct SlowProvider {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl PosterProvider for SlowProvider {
        async fn fetch_poster_path(&self, movie_id: MovieId) -> AppResult<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok(Some(format!("/{}.jpg", movie_id)))
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_resolve_many_bounds_in_flight_lookups() {
        let provider = Arc::new(SlowProvider {
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        });
        let resolver = PosterResolver::new(provider.clone(), BASE.to_string()).with_max_in_flight(3);

        let ids: Vec<MovieId> = (1..=40).map(MovieId).collect();
        let posters = resolver.resolve_many(ids).await;

        assert_eq!(posters.len(), 40);
        assert_eq!(posters[39], Some(format!("{}/40.jpg", BASE)));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 40);
        assert!(provider.peak.load(Ordering::SeqCst) <= 3);
    }

    #[test]
    fn test_zero_in_flight_is_raised_to_one() {
        let resolver = PosterResolver::new(Arc::new(MockPosterProvider::new()), BASE.to_string())
            .with_max_in_flight(0);
        assert_eq!(resolver.semaphore.available_permits(), 1);
    }

    #[test]
    fn test_poster_url_joins_without_double_slash() {
        let resolver = PosterResolver::new(
            Arc::new(MockPosterProvider::new()),
            format!("{}/", BASE),
        );
        assert_eq!(resolver.poster_url("/a.jpg"), format!("{}/a.jpg", BASE));
        assert_eq!(resolver.poster_url("b.jpg"), format!("{}/b.jpg", BASE));
    }
}
