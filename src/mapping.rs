use serde_json::Value;

use crate::collection::process_collection;
use crate::raw::RawRecord;
use crate::record::{image_or, normalize_record, order_or, FieldDefaults, NormalizedRecord, SeoMeta};
use crate::types::{
    Banner, CarouselSettings, ContentDefaults, GalleryImage, JobPosting, NewsArticle, Product,
    ProductApplication, ProductDefaults, ProductFeature,
};

const SUMMARY_CHARS: usize = 160;

/// Source id if present, else `<prefix>-<index>`.
pub fn positional_id(raw: RawRecord<'_>, prefix: &str, index: usize) -> String {
    raw.text_any(&["id", "_id"])
        .unwrap_or_else(|| format!("{prefix}-{index}"))
}

fn carousel_from_raw(raw: RawRecord<'_>, d: &CarouselSettings) -> CarouselSettings {
    CarouselSettings {
        auto_play: raw.bool_or("autoPlay", d.auto_play),
        interval: raw.number_or("interval", d.interval as f64).max(0.0) as u64,
        show_thumbnails: raw.bool_or("showThumbnails", d.show_thumbnails),
        transition: raw.text_or("transition", &d.transition),
    }
}

pub fn gallery_image_from_raw(
    raw: RawRecord<'_>,
    index: usize,
    product_name: &str,
    origin: &str,
    placeholder: &str,
) -> GalleryImage {
    GalleryImage {
        id: positional_id(raw, "image", index),
        url: image_or(raw, &["url", "image", "src"], origin, placeholder),
        alt: raw
            .text("alt")
            .unwrap_or_else(|| format!("{product_name} image {}", index + 1)),
        caption: raw.text_or("caption", ""),
        order: order_or(raw, 0),
    }
}

pub fn feature_from_raw(raw: RawRecord<'_>, index: usize, default_icon: &str) -> ProductFeature {
    ProductFeature {
        id: positional_id(raw, "feature", index),
        title: raw.text_any(&["title", "name"]).unwrap_or_default(),
        description: raw.text_or("description", ""),
        icon: raw.text_or("icon", default_icon),
        order: order_or(raw, 0),
    }
}

pub fn application_from_raw(raw: RawRecord<'_>, index: usize, origin: &str, placeholder: &str) -> ProductApplication {
    ProductApplication {
        id: positional_id(raw, "application", index),
        title: raw.text_any(&["title", "name"]).unwrap_or_default(),
        description: raw.text_or("description", ""),
        image: image_or(raw, &["image", "imageUrl"], origin, placeholder),
        order: order_or(raw, 0),
        expanded: index == 0,
    }
}

/// Normalize a product detail record together with its nested collections.
pub fn product_from_raw(raw: RawRecord<'_>, defaults: &ProductDefaults, origin: &str) -> Product {
    let name = raw
        .text_any(&["name", "title"])
        .unwrap_or_else(|| defaults.name.clone());
    let placeholder = defaults.placeholder_image.as_str();

    let gallery_images = process_collection(raw.get("galleryImages"), |item, i| {
        gallery_image_from_raw(item, i, &name, origin, placeholder)
    });
    let features = process_collection(raw.get("features"), |item, i| {
        feature_from_raw(item, i, &defaults.feature_icon)
    });
    let applications = process_collection(raw.get("applications"), |item, i| {
        application_from_raw(item, i, origin, placeholder)
    });

    Product {
        id: raw.text_any(&["id", "_id"]).unwrap_or_default(),
        slug: raw.text_or("slug", ""),
        category: raw.text_or("category", ""),
        short_description: raw.text_or("shortDescription", ""),
        description: raw.text_or("description", ""),
        main_image: image_or(raw, &["mainImage", "image"], origin, placeholder),
        main_image_alt: raw.text("mainImageAlt").unwrap_or_else(|| name.clone()),
        gallery_images,
        features,
        applications,
        tags: raw.strings("tags"),
        carousel_settings: carousel_from_raw(raw.nested("carouselSettings"), &defaults.carousel),
        seo: SeoMeta::from_raw(raw.nested("seo"), &defaults.seo),
        is_active: raw.flag_not_false("isActive"),
        is_featured: raw.bool_or("isFeatured", false),
        order: order_or(raw, 0),
        created_at: raw.text_or("createdAt", ""),
        updated_at: raw.text_or("updatedAt", ""),
        name,
    }
}

/// Facility highlights shown on the facilities page.
pub fn facility_features_from_raw(raw_items: Option<&Value>, defaults: &FieldDefaults, origin: &str) -> Vec<NormalizedRecord> {
    process_collection(raw_items, |item, index| {
        let mut record = normalize_record(item, defaults, origin);
        record.id = positional_id(item, "facility", index);
        record
    })
}

/// Strip markup and cut to at most `max_chars` characters on a word boundary.
pub fn plain_excerpt(text: &str, max_chars: usize) -> String {
    let mut plain = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                plain.push(' ');
            }
            _ if !in_tag => plain.push(c),
            _ => {}
        }
    }
    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    // one extra char so a cut that lands on a space keeps the last word
    let window: String = collapsed.chars().take(max_chars + 1).collect();
    let cut = match window.rfind(' ') {
        Some(pos) if pos > 0 => window[..pos].to_string(),
        _ => window.chars().take(max_chars).collect(),
    };
    format!("{}…", cut.trim_end())
}

pub fn news_article_from_raw(raw: RawRecord<'_>, defaults: &FieldDefaults, origin: &str) -> NewsArticle {
    let record = normalize_record(raw, defaults, origin);
    let content = raw.text_or("content", "");
    let summary = raw.text_any(&["summary", "excerpt"]).unwrap_or_else(|| {
        let source = raw.text("description").unwrap_or_else(|| content.clone());
        plain_excerpt(&source, SUMMARY_CHARS)
    });
    NewsArticle {
        slug: raw.text_or("slug", &record.id),
        summary,
        content,
        category: raw.text_or("category", ""),
        author: raw.text_or("author", ""),
        published_at: raw
            .text_any(&["publishedAt", "createdAt"])
            .unwrap_or_else(|| defaults.created_at.clone()),
        tags: raw.strings("tags"),
        record,
    }
}

pub fn job_posting_from_raw(raw: RawRecord<'_>, defaults: &FieldDefaults, employment_type: &str, origin: &str) -> JobPosting {
    JobPosting {
        record: normalize_record(raw, defaults, origin),
        department: raw.text_or("department", ""),
        location: raw.text_or("location", ""),
        employment_type: raw
            .text_any(&["employmentType", "type"])
            .unwrap_or_else(|| employment_type.to_string()),
        salary_range: raw.text_any(&["salaryRange", "salary"]).unwrap_or_default(),
        requirements: raw.strings("requirements"),
        responsibilities: raw.strings("responsibilities"),
        benefits: raw.strings("benefits"),
        contact_email: raw.text_any(&["contactEmail", "email"]).unwrap_or_default(),
        posted_at: raw
            .text_any(&["postedAt", "createdAt"])
            .unwrap_or_else(|| defaults.created_at.clone()),
        deadline: raw.text_or("deadline", ""),
    }
}

pub fn banner_from_raw(raw: RawRecord<'_>, index: usize, defaults: &ContentDefaults, origin: &str) -> Banner {
    Banner {
        id: positional_id(raw, "banner", index),
        title: raw.text_or("title", ""),
        subtitle: raw.text_or("subtitle", ""),
        image: image_or(raw, &["image", "imageUrl"], origin, defaults.placeholder_image()),
        link: raw.text_any(&["link", "url"]).unwrap_or_default(),
        button_text: raw.text_or("buttonText", &defaults.banner_button_text),
        order: order_or(raw, 0),
    }
}
