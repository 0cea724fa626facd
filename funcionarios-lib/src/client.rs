//! Main FuncionariosClient

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;

use crate::auth::TokenProvider;
use crate::cache::CacheConfig;
use crate::cache::CacheProvider;
use crate::cache::InMemoryCache;
use crate::error::ApiError;
use crate::error::Error;

/// Default number of in-flight requests for [`FuncionariosClient::execute_batch`].
pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;

/// Client for the HR backend's REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely. Every clone shares the same collection cache.
///
/// # Example
///
/// ```ignore
/// use funcionarios_lib::FuncionariosClient;
/// use funcionarios_lib::auth::StaticTokenProvider;
///
/// let client = FuncionariosClient::builder()
///     .url("https://rrhh.example.gov")
///     .token_provider(StaticTokenProvider::new("my-token"))
///     .build()?;
///
/// let sanciones = client.list::<Sancion>(false).await?;
/// ```
#[derive(Clone)]
pub struct FuncionariosClient {
    pub(crate) inner: Arc<FuncionariosClientInner>,
}

pub(crate) struct FuncionariosClientInner {
    pub(crate) base_url: String,
    pub(crate) api_prefix: String,
    pub(crate) token_provider: Arc<dyn TokenProvider>,
    pub(crate) http_client: Client,
    pub(crate) timeout: Option<Duration>,
    pub(crate) cache: Arc<dyn CacheProvider>,
    pub(crate) cache_config: CacheConfig,
    pub(crate) batch_concurrency: usize,
}

impl FuncionariosClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> FuncionariosClientBuilder<Missing, Missing> {
        FuncionariosClientBuilder::new()
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the path prefix every resource lives under.
    pub fn api_prefix(&self) -> &str {
        &self.inner.api_prefix
    }

    /// Returns the cache configuration.
    pub fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    /// Returns the collection cache.
    pub fn cache(&self) -> &Arc<dyn CacheProvider> {
        &self.inner.cache
    }

    /// Joins a resource path such as `sanciones/4` onto the base URL.
    pub(crate) fn resource_url(&self, path: &str) -> String {
        let base = self.inner.base_url.trim_end_matches('/');
        let prefix = self.inner.api_prefix.trim_matches('/');
        let path = path.trim_start_matches('/');
        if prefix.is_empty() {
            format!("{}/{}", base, path)
        } else {
            format!("{}/{}/{}", base, prefix, path)
        }
    }
}

impl std::fmt::Debug for FuncionariosClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuncionariosClient")
            .field("base_url", &self.inner.base_url)
            .field("api_prefix", &self.inner.api_prefix)
            .field("timeout", &self.inner.timeout)
            .field("cache_config", &self.inner.cache_config)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`FuncionariosClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile time.
///
/// # Required Fields
///
/// - `url` - The backend base URL
/// - `token_provider` - A [`TokenProvider`] implementation
///
/// # Example
///
/// ```ignore
/// let client = FuncionariosClient::builder()
///     .url("https://rrhh.example.gov")
///     .token_provider(my_provider)
///     .timeout(Duration::from_secs(30))
///     .cache_config(CacheConfig::default().with_collection_ttl(Duration::from_secs(60)))
///     .build()?;
/// ```
pub struct FuncionariosClientBuilder<Url, Provider> {
    url: Url,
    token_provider: Provider,
    api_prefix: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    cache: Option<Arc<dyn CacheProvider>>,
    cache_config: CacheConfig,
    batch_concurrency: usize,
}

impl FuncionariosClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            token_provider: Missing,
            api_prefix: "/api".to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
            cache: None,
            cache_config: CacheConfig::default(),
            batch_concurrency: DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

impl Default for FuncionariosClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> FuncionariosClientBuilder<Missing, P> {
    /// Sets the backend base URL.
    ///
    /// # Example
    ///
    /// ```ignore
    /// .url("https://rrhh.example.gov")
    /// ```
    pub fn url(self, url: impl Into<String>) -> FuncionariosClientBuilder<Set<String>, P> {
        FuncionariosClientBuilder {
            url: Set(url.into()),
            token_provider: self.token_provider,
            api_prefix: self.api_prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
            batch_concurrency: self.batch_concurrency,
        }
    }
}

impl<U> FuncionariosClientBuilder<U, Missing> {
    /// Sets the token provider for authentication.
    pub fn token_provider<T: TokenProvider + 'static>(
        self,
        provider: T,
    ) -> FuncionariosClientBuilder<U, Set<Arc<dyn TokenProvider>>> {
        FuncionariosClientBuilder {
            url: self.url,
            token_provider: Set(Arc::new(provider) as Arc<dyn TokenProvider>),
            api_prefix: self.api_prefix,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
            batch_concurrency: self.batch_concurrency,
        }
    }
}

impl<U, P> FuncionariosClientBuilder<U, P> {
    /// Sets the path prefix resources live under.
    ///
    /// Defaults to `/api`. Pass `""` for a backend serving resources at the root.
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the cache TTLs.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }

    /// Sets a custom cache provider.
    ///
    /// Defaults to an [`InMemoryCache`].
    pub fn cache_provider<C: CacheProvider + 'static>(mut self, cache: C) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Sets how many requests a batch keeps in flight. Zero is treated as 1.
    pub fn batch_concurrency(mut self, concurrency: usize) -> Self {
        self.batch_concurrency = concurrency.max(1);
        self
    }
}

impl FuncionariosClientBuilder<Set<String>, Set<Arc<dyn TokenProvider>>> {
    /// Builds the [`FuncionariosClient`].
    ///
    /// This method is only available when both `url` and `token_provider` have been set.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute or the HTTP client cannot
    /// be created.
    pub fn build(self) -> Result<FuncionariosClient, Error> {
        let base_url = self.url.0;
        url::Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build().map_err(ApiError::from)?
            }
        };

        let cache = self
            .cache
            .unwrap_or_else(|| Arc::new(InMemoryCache::new()) as Arc<dyn CacheProvider>);

        Ok(FuncionariosClient {
            inner: Arc::new(FuncionariosClientInner {
                base_url,
                api_prefix: self.api_prefix,
                token_provider: self.token_provider.0,
                http_client,
                timeout: self.timeout,
                cache,
                cache_config: self.cache_config,
                batch_concurrency: self.batch_concurrency,
            }),
        })
    }
}
