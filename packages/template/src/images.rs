//! Image-parameter heuristics.
//!
//! The builder stores image references as plain string parameters. A key is
//! treated as image-like when its name contains an image word, or its value
//! looks like a URL/data-URI, or it carries a known image extension. Empty
//! or unrecognizable values substitute a category-appropriate placeholder
//! so the canvas never renders a broken `<img src="">`.

use sitewright_model::ParamValue;

const IMAGE_KEY_WORDS: &[&str] = &[
    "image", "img", "photo", "picture", "avatar", "logo", "icon", "banner", "hero", "thumbnail",
    "cover", "background",
];

const IMAGE_EXTENSIONS: &[&str] = &[
    ".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg", ".bmp", ".ico", ".avif",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageCategory {
    Avatar,
    Logo,
    Banner,
    Product,
    Background,
    Generic,
}

impl ImageCategory {
    pub fn placeholder_url(&self) -> &'static str {
        match self {
            ImageCategory::Avatar => "https://placehold.co/96x96?text=Avatar",
            ImageCategory::Logo => "https://placehold.co/200x60?text=Logo",
            ImageCategory::Banner => "https://placehold.co/1200x400?text=Banner",
            ImageCategory::Product => "https://placehold.co/400x400?text=Product",
            ImageCategory::Background => "https://placehold.co/1600x900?text=Background",
            ImageCategory::Generic => "https://placehold.co/400x300?text=Image",
        }
    }
}

/// Categorize an image parameter by its key name.
pub fn categorize(key: &str) -> ImageCategory {
    let key = key.to_lowercase();
    if key.contains("avatar") || key.contains("profile") {
        ImageCategory::Avatar
    } else if key.contains("logo") {
        ImageCategory::Logo
    } else if key.contains("banner") || key.contains("hero") {
        ImageCategory::Banner
    } else if key.contains("product") {
        ImageCategory::Product
    } else if key.contains("background") {
        ImageCategory::Background
    } else {
        ImageCategory::Generic
    }
}

/// Should this parameter go through the image-fallback resolver? Only
/// string values qualify: numbers and booleans stringify directly no
/// matter what the key is called (`imageCount` is a count, not an image).
pub fn is_image_param(key: &str, value: &ParamValue) -> bool {
    let Some(s) = value.as_str() else {
        return false;
    };
    let key_lower = key.to_lowercase();
    IMAGE_KEY_WORDS.iter().any(|w| key_lower.contains(w)) || looks_like_image_reference(s)
}

fn looks_like_image_reference(value: &str) -> bool {
    let v = value.trim();
    if v.is_empty() {
        return false;
    }
    let lower = v.to_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:image/")
        || lower.starts_with("//")
    {
        return true;
    }
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Substitute a category placeholder when the value is empty or not a
/// recognizable image reference; otherwise pass the value through.
pub fn resolve_image(key: &str, value: &ParamValue) -> String {
    let raw = value.to_string();
    if looks_like_image_reference(&raw) {
        raw
    } else {
        categorize(key).placeholder_url().to_string()
    }
}
