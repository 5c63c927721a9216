pub mod api;
pub mod collection;
pub mod config;
pub mod mapping;
pub mod media;
pub mod page;
pub mod raw;
pub mod record;
pub mod source;
pub mod types;

// --- Library API for embedding ---

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::api::ApiEnvelope;
    pub use crate::collection::process_collection;
    pub use crate::config::ShowroomConfig;
    pub use crate::media::resolve_media_path;
    pub use crate::page::Page;
    pub use crate::raw::{coalesce_falsy, RawRecord};
    pub use crate::record::{normalize_record, FieldDefaults, NormalizedRecord, SeoMeta};
    pub use crate::source::{ContentSource, HttpContentSource};
    pub use crate::types::{Banner, ContentDefaults, HomeContent, JobPosting, NewsArticle, Product};
    pub use crate::Showroom;
}

use anyhow::Result;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::collection::process_collection;
use crate::config::ShowroomConfig;
use crate::mapping::{banner_from_raw, facility_features_from_raw, job_posting_from_raw, news_article_from_raw, product_from_raw};
use crate::page::{assemble_page, Page};
use crate::raw::RawRecord;
use crate::record::NormalizedRecord;
use crate::source::{encode_segment, ContentSource, HttpContentSource};
use crate::types::{Banner, ContentDefaults, HomeContent, JobPosting, NewsArticle, Product};

/// Number of articles the landing page shows.
const HOME_NEWS_LIMIT: usize = 3;

/// Async library entry point. Fetches content from a [`ContentSource`] and
/// hands back display-ready records.
pub struct Showroom {
    source: Arc<dyn ContentSource>,
    origin: String,
    defaults: ContentDefaults,
}

impl Showroom {
    /// Talk to the REST backend described by `config`.
    pub fn connect(config: &ShowroomConfig) -> Result<Self> {
        let source = HttpContentSource::new(config)?;
        Ok(Self::with_source(Arc::new(source), config))
    }

    /// Use any content source, e.g. an in-memory one in tests.
    pub fn with_source(source: Arc<dyn ContentSource>, config: &ShowroomConfig) -> Self {
        Self {
            source,
            origin: config.backend_origin.clone(),
            defaults: ContentDefaults::with_placeholder(&config.placeholder_image),
        }
    }

    pub fn origin(&self) -> &str { &self.origin }
    pub fn defaults(&self) -> &ContentDefaults { &self.defaults }

    async fn data(&self, endpoint: &str) -> Result<Option<Value>> {
        debug!(endpoint, "loading content");
        self.source.fetch(endpoint).await?.into_data()
    }

    /// Product listing, optionally paged.
    pub async fn products(&self, page: Option<u32>) -> Result<Page<Product>> {
        let data = self.data(&paged("products", page)).await?;
        Ok(self.product_page(data.as_ref()))
    }

    /// Products flagged for the landing page.
    pub async fn featured_products(&self) -> Result<Vec<Product>> {
        let data = self.data("products?featured=true").await?;
        let page = self.product_page(data.as_ref());
        Ok(page.items.into_iter().filter(|p| p.is_featured).collect())
    }

    /// Product detail. A `null` payload yields the defaulted product.
    pub async fn product(&self, id: &str) -> Result<Product> {
        let data = self.data(&format!("products/{}", encode_segment(id))).await?;
        Ok(product_from_raw(RawRecord::from(data.as_ref()), &self.defaults.product, &self.origin))
    }

    pub async fn facility_features(&self) -> Result<Vec<NormalizedRecord>> {
        let data = self.data("facilities").await?;
        Ok(self.facility_list(data.as_ref()))
    }

    pub async fn news(&self, page: Option<u32>) -> Result<Page<NewsArticle>> {
        let data = self.data(&paged("news", page)).await?;
        Ok(self.news_page(data.as_ref()))
    }

    pub async fn news_article(&self, slug: &str) -> Result<NewsArticle> {
        let data = self.data(&format!("news/{}", encode_segment(slug))).await?;
        Ok(news_article_from_raw(RawRecord::from(data.as_ref()), &self.defaults.news, &self.origin))
    }

    /// Open positions for the recruitment page; closed ones are dropped.
    pub async fn jobs(&self) -> Result<Vec<JobPosting>> {
        let data = self.data("jobs").await?;
        Ok(self.job_list(data.as_ref()))
    }

    pub async fn job(&self, id: &str) -> Result<JobPosting> {
        let data = self.data(&format!("jobs/{}", encode_segment(id))).await?;
        Ok(job_posting_from_raw(
            RawRecord::from(data.as_ref()),
            &self.defaults.job,
            &self.defaults.employment_type,
            &self.origin,
        ))
    }

    pub async fn banners(&self) -> Result<Vec<Banner>> {
        let data = self.data("banners").await?;
        Ok(self.banner_list(data.as_ref()))
    }

    /// Everything the landing page needs, fetched concurrently.
    pub async fn home(&self) -> Result<HomeContent> {
        let (banners, featured_products, mut latest_news, facilities) = futures::try_join!(
            self.banners(),
            self.featured_products(),
            self.news(None),
            self.facility_features(),
        )?;
        latest_news.items.truncate(HOME_NEWS_LIMIT);
        Ok(HomeContent { banners, featured_products, latest_news, facilities })
    }

    // --- payload normalizers, shared with the CLI ---

    pub fn product_page(&self, data: Option<&Value>) -> Page<Product> {
        assemble_page(data, |item, _| product_from_raw(item, &self.defaults.product, &self.origin))
    }

    pub fn news_page(&self, data: Option<&Value>) -> Page<NewsArticle> {
        assemble_page(data, |item, _| news_article_from_raw(item, &self.defaults.news, &self.origin))
    }

    pub fn facility_list(&self, data: Option<&Value>) -> Vec<NormalizedRecord> {
        facility_features_from_raw(data, &self.defaults.facility, &self.origin)
    }

    pub fn job_list(&self, data: Option<&Value>) -> Vec<JobPosting> {
        process_collection(data, |item, _| {
            job_posting_from_raw(item, &self.defaults.job, &self.defaults.employment_type, &self.origin)
        })
    }

    pub fn banner_list(&self, data: Option<&Value>) -> Vec<Banner> {
        process_collection(data, |item, index| banner_from_raw(item, index, &self.defaults, &self.origin))
    }
}

fn paged(endpoint: &str, page: Option<u32>) -> String {
    match page {
        Some(p) if p > 1 => format!("{endpoint}?page={p}"),
        _ => endpoint.to_string(),
    }
}
