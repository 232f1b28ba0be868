//! Naming rules shared by provider mappers

/// Short name of a fully-qualified resource URL: everything after the last `/`.
///
/// `https://.../regions/us-west1/subnetworks/web-a` becomes `web-a`. A string
/// without any `/` is returned unchanged.
pub fn short_name(url: &str) -> &str {
    match url.rfind('/') {
        Some(idx) => &url[idx + 1..],
        None => url,
    }
}

/// Region of a zone name or zone URL (`us-west1-a` → `us-west1`).
pub fn region_from_zone(zone: &str) -> Option<&str> {
    let zone = short_name(zone.trim());
    match zone.rsplit_once('-') {
        Some((region, suffix)) if suffix.len() == 1 && !region.is_empty() => Some(region),
        _ => None,
    }
}

/// `None` for empty strings, so empty attributes are omitted from templates.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
