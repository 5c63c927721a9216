use serde::{Deserialize, Serialize};

use crate::media::resolve_media_path;
use crate::raw::RawRecord;

/// Placeholder shown wherever a record has no usable image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/images/placeholder.png";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMeta {
    pub meta_title: String,
    pub meta_description: String,
    pub keywords: Vec<String>,
}

impl SeoMeta {
    /// Per-field falsy-coalesce against `defaults`. An absent object yields
    /// `defaults` unchanged.
    pub fn from_raw(raw: RawRecord<'_>, defaults: &SeoMeta) -> Self {
        let keywords = raw.strings("keywords");
        Self {
            meta_title: raw.text_or("metaTitle", &defaults.meta_title),
            meta_description: raw.text_or("metaDescription", &defaults.meta_description),
            keywords: if keywords.is_empty() { defaults.keywords.clone() } else { keywords },
        }
    }
}

/// Fallback values for every field of a [`NormalizedRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefaults {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub is_featured: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
    pub seo: SeoMeta,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: "Untitled".to_string(),
            description: String::new(),
            image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            is_featured: false,
            order: 0,
            created_at: String::new(),
            updated_at: String::new(),
            seo: SeoMeta::default(),
        }
    }
}

impl FieldDefaults {
    pub fn titled(title: &str, placeholder_image: &str) -> Self {
        Self {
            title: title.to_string(),
            image: placeholder_image.to_string(),
            ..Self::default()
        }
    }
}

/// Display-ready record. Every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub image_alt: String,
    pub is_active: bool,
    pub is_featured: bool,
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
    pub seo: SeoMeta,
}

/// Resolve an image field, falling back to the placeholder when the source
/// has nothing usable.
pub(crate) fn image_or(raw: RawRecord<'_>, keys: &[&str], origin: &str, placeholder: &str) -> String {
    let resolved = resolve_media_path(raw.text_any(keys).as_deref(), origin);
    if resolved.is_empty() { placeholder.to_string() } else { resolved }
}

/// Sort position as exposed to the presentation layer.
pub(crate) fn order_or(raw: RawRecord<'_>, default: i64) -> i64 {
    if raw.get("order").is_some() { raw.order() as i64 } else { default }
}

/// Map a backend record onto the closed [`NormalizedRecord`] shape.
///
/// Ordinary fields use falsy-coalesce, `isActive` uses not-exactly-false,
/// and the alt text is derived from the resolved title. An absent record
/// yields the pure-defaults record.
pub fn normalize_record(raw: RawRecord<'_>, defaults: &FieldDefaults, origin: &str) -> NormalizedRecord {
    let title = raw
        .text_any(&["title", "name"])
        .unwrap_or_else(|| defaults.title.clone());
    let image_alt = raw.text("imageAlt").unwrap_or_else(|| title.clone());
    NormalizedRecord {
        id: raw.text_any(&["id", "_id"]).unwrap_or_else(|| defaults.id.clone()),
        description: raw.text_or("description", &defaults.description),
        image: image_or(raw, &["image", "imageUrl", "coverImage"], origin, &defaults.image),
        image_alt,
        is_active: raw.flag_not_false("isActive"),
        is_featured: raw.bool_or("isFeatured", defaults.is_featured),
        order: order_or(raw, defaults.order),
        created_at: raw.text_or("createdAt", &defaults.created_at),
        updated_at: raw.text_or("updatedAt", &defaults.updated_at),
        seo: SeoMeta::from_raw(raw.nested("seo"), &defaults.seo),
        title,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ORIGIN: &str = "http://host";

    fn defaults() -> FieldDefaults {
        FieldDefaults {
            id: "none".into(),
            title: "Untitled".into(),
            description: "No description".into(),
            image: "/images/placeholder.png".into(),
            is_featured: false,
            order: 0,
            created_at: "1970-01-01".into(),
            updated_at: "1970-01-01".into(),
            seo: SeoMeta {
                meta_title: "Site".into(),
                meta_description: "Site description".into(),
                keywords: vec!["site".into()],
            },
        }
    }

    #[test]
    fn absent_record_yields_pure_defaults() {
        let d = defaults();
        let record = normalize_record(RawRecord::absent(), &d, ORIGIN);
        let expected = NormalizedRecord {
            id: d.id.clone(),
            title: d.title.clone(),
            description: d.description.clone(),
            image: d.image.clone(),
            image_alt: d.title.clone(),
            is_active: true,
            is_featured: false,
            order: 0,
            created_at: d.created_at.clone(),
            updated_at: d.updated_at.clone(),
            seo: d.seo.clone(),
        };
        assert_eq!(record, expected);

        let null = json!(null);
        assert_eq!(normalize_record(RawRecord::from(&null), &d, ORIGIN), expected);
    }

    #[test]
    fn empty_title_falls_back_to_default() {
        let raw = json!({ "title": "" });
        let d = FieldDefaults { title: "Untitled".into(), ..FieldDefaults::default() };
        assert_eq!(normalize_record(RawRecord::from(&raw), &d, ORIGIN).title, "Untitled");
    }

    #[test]
    fn name_is_accepted_as_title() {
        let raw = json!({ "name": "Cutting room", "_id": "abc" });
        let record = normalize_record(RawRecord::from(&raw), &defaults(), ORIGIN);
        assert_eq!(record.title, "Cutting room");
        assert_eq!(record.id, "abc");
    }

    #[test]
    fn both_coalescing_rules_coexist() {
        let raw = json!({ "isActive": false, "isFeatured": false, "description": "" });
        let d = FieldDefaults { is_featured: true, ..defaults() };
        let record = normalize_record(RawRecord::from(&raw), &d, ORIGIN);
        assert!(!record.is_active);
        // falsy-coalesce: explicit false is replaced by the default
        assert!(record.is_featured);
        assert_eq!(record.description, "No description");
    }

    #[test]
    fn image_is_resolved_before_placeholder() {
        let raw = json!({ "image": "/uploads/x.jpg" });
        let record = normalize_record(RawRecord::from(&raw), &defaults(), ORIGIN);
        assert_eq!(record.image, "http://host/uploads/x.jpg");

        let blank = json!({ "image": "" });
        let record = normalize_record(RawRecord::from(&blank), &defaults(), ORIGIN);
        assert_eq!(record.image, "/images/placeholder.png");
    }

    #[test]
    fn blank_alt_text_is_derived_from_resolved_title() {
        let raw = json!({ "title": "", "imageAlt": "" });
        let record = normalize_record(RawRecord::from(&raw), &defaults(), ORIGIN);
        assert_eq!(record.image_alt, "Untitled");

        let raw = json!({ "title": "Dye house", "imageAlt": "Vats" });
        let record = normalize_record(RawRecord::from(&raw), &defaults(), ORIGIN);
        assert_eq!(record.image_alt, "Vats");
    }

    #[test]
    fn nested_seo_coalesces_per_field() {
        let d = defaults();
        let partial = json!({ "seo": { "metaTitle": "Denim", "metaDescription": "" } });
        let seo = normalize_record(RawRecord::from(&partial), &d, ORIGIN).seo;
        assert_eq!(seo.meta_title, "Denim");
        assert_eq!(seo.meta_description, "Site description");
        assert_eq!(seo.keywords, vec!["site".to_string()]);

        let wrong_type = json!({ "seo": "nope" });
        assert_eq!(normalize_record(RawRecord::from(&wrong_type), &d, ORIGIN).seo, d.seo);
    }

    #[test]
    fn order_keeps_numeric_strings() {
        let raw = json!({ "order": "4" });
        assert_eq!(normalize_record(RawRecord::from(&raw), &defaults(), ORIGIN).order, 4);
    }
}
