use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key used for poster lookups
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Image host prefix joined with a movie's `poster_path`
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Path to the movie catalog (JSON array of `{movie_id, title}`)
    #[serde(default = "default_movies_path")]
    pub movies_path: String,

    /// Path to the precomputed similarity matrix
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Number of recommendations rendered per request
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Upper bound for the `n` a client may ask for
    #[serde(default = "default_max_recommendation_count")]
    pub max_recommendation_count: usize,

    /// Poster lookups allowed in flight at once against the metadata API
    #[serde(default = "default_poster_concurrency")]
    pub poster_concurrency: usize,

    /// Timeout for a single poster lookup, in seconds
    #[serde(default = "default_poster_timeout_secs")]
    pub poster_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_movies_path() -> String {
    "movies_info/movies.json".to_string()
}

fn default_similarity_path() -> String {
    "movies_info/similarity.bin".to_string()
}

fn default_recommendation_count() -> usize {
    5
}

fn default_max_recommendation_count() -> usize {
    20
}

fn default_poster_concurrency() -> usize {
    4
}

fn default_poster_timeout_secs() -> u64 {
    10
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables, reading `.env` first if present
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
