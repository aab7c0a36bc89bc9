/// Memoizes the result of an async computation in a [`MemoCache`](crate::cache::MemoCache).
///
/// Looks the key up first. On a miss, awaits `$block`, stores its `Ok` value
/// and returns it. Errors from `$block` are propagated with `?` and nothing
/// is stored, so a later call computes again.
///
/// # Example
/// ```rust,ignore
/// let poster = cached!(self.cache, movie_id, async move {
///     fetch_poster(movie_id).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        let key = $key;
        if let Some(cached) = $cache.get_from_cache(&key) {
            Ok(cached)
        } else {
            let value = $block.await?;
            Ok($cache.insert(key, value))
        }
    }};
}
