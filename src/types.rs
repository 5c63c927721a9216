use serde::{Deserialize, Serialize};

use crate::page::Page;
use crate::record::{FieldDefaults, NormalizedRecord, SeoMeta, DEFAULT_PLACEHOLDER_IMAGE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    pub id: String,
    pub url: String,
    pub alt: String,
    pub caption: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFeature {
    pub id: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub order: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductApplication {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub order: i64,
    /// Accordion state; only the first application starts open.
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarouselSettings {
    pub auto_play: bool,
    pub interval: u64,
    pub show_thumbnails: bool,
    pub transition: String,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self { auto_play: false, interval: 5000, show_thumbnails: false, transition: "slide".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub category: String,
    pub short_description: String,
    pub description: String,
    pub main_image: String,
    pub main_image_alt: String,
    pub gallery_images: Vec<GalleryImage>,
    pub features: Vec<ProductFeature>,
    pub applications: Vec<ProductApplication>,
    pub tags: Vec<String>,
    pub carousel_settings: CarouselSettings,
    pub seo: SeoMeta,
    pub is_active: bool,
    pub is_featured: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    #[serde(flatten)]
    pub record: NormalizedRecord,
    pub slug: String,
    pub summary: String,
    pub content: String,
    pub category: String,
    pub author: String,
    pub published_at: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(flatten)]
    pub record: NormalizedRecord,
    pub department: String,
    pub location: String,
    pub employment_type: String,
    pub salary_range: String,
    pub requirements: Vec<String>,
    pub responsibilities: Vec<String>,
    pub benefits: Vec<String>,
    pub contact_email: String,
    pub posted_at: String,
    pub deadline: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub image: String,
    pub link: String,
    pub button_text: String,
    pub order: i64,
}

/// Everything the landing page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeContent {
    pub banners: Vec<Banner>,
    pub featured_products: Vec<Product>,
    pub latest_news: Page<NewsArticle>,
    pub facilities: Vec<NormalizedRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDefaults {
    pub name: String,
    pub placeholder_image: String,
    pub feature_icon: String,
    pub carousel: CarouselSettings,
    pub seo: SeoMeta,
}

impl Default for ProductDefaults {
    fn default() -> Self {
        Self {
            name: "Untitled product".to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            feature_icon: "check".to_string(),
            carousel: CarouselSettings::default(),
            seo: SeoMeta::default(),
        }
    }
}

/// Fallbacks for every content kind the site renders.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDefaults {
    pub product: ProductDefaults,
    pub facility: FieldDefaults,
    pub news: FieldDefaults,
    pub job: FieldDefaults,
    pub banner_button_text: String,
    pub employment_type: String,
}

impl ContentDefaults {
    pub fn with_placeholder(placeholder_image: &str) -> Self {
        Self {
            product: ProductDefaults { placeholder_image: placeholder_image.to_string(), ..ProductDefaults::default() },
            facility: FieldDefaults::titled("Facility", placeholder_image),
            news: FieldDefaults::titled("Untitled article", placeholder_image),
            job: FieldDefaults::titled("Open position", placeholder_image),
            banner_button_text: "Learn more".to_string(),
            employment_type: "full-time".to_string(),
        }
    }

    pub fn placeholder_image(&self) -> &str {
        &self.product.placeholder_image
    }
}

impl Default for ContentDefaults {
    fn default() -> Self {
        Self::with_placeholder(DEFAULT_PLACEHOLDER_IMAGE)
    }
}
