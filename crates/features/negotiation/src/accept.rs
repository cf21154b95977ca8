//! `Accept` / `Content-Type` header helpers.

/// Parses an `Accept` header into media types ordered by preference.
///
/// Parameters are stripped, `q` defaults to `1.0` (unparsable values count as `1.0`,
/// out-of-range ones are clamped) and entries with `q=0` are dropped. Entries of equal
/// quality keep their header order.
#[must_use]
pub fn acceptable_content_types(header: &str) -> Vec<String> {
    let mut ranked: Vec<(&str, f32)> =
        header.split(',').filter_map(parse_item).filter(|(_, quality)| *quality > 0.0).collect();

    // `sort_by` is stable, ties stay in client order.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.into_iter().map(|(media_type, _)| media_type.to_owned()).collect()
}

/// Returns a `Content-Type` value without its parameters.
///
/// `"application/json; charset=utf-8"` becomes `"application/json"`.
#[must_use]
pub fn essence(content_type: &str) -> &str {
    content_type.split(';').next().map_or("", str::trim)
}

fn parse_item(item: &str) -> Option<(&str, f32)> {
    let mut parts = item.split(';');
    let media_type = parts.next()?.trim();
    if media_type.is_empty() {
        return None;
    }

    let quality = parts
        .filter_map(|param| param.split_once('='))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("q"))
        .map_or(1.0, |(_, value)| parse_quality(value));

    Some((media_type, quality))
}

fn parse_quality(raw: &str) -> f32 {
    raw.trim().parse::<f32>().ok().filter(|q| q.is_finite()).map_or(1.0, |q| q.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_header_order_without_quality() {
        let types = acceptable_content_types("text/html, application/xml,application/json");
        assert_eq!(types, ["text/html", "application/xml", "application/json"]);
    }

    #[test]
    fn orders_by_quality_and_keeps_ties_stable() {
        let types = acceptable_content_types(
            "text/html;q=0.5, application/xml;q=0.9, application/json, text/plain;q=0.9",
        );
        assert_eq!(types, ["application/json", "application/xml", "text/plain", "text/html"]);
    }

    #[test]
    fn drops_rejected_and_empty_entries() {
        let types = acceptable_content_types("application/xml;q=0, , application/json;q=0.000");
        assert!(types.is_empty());

        let types = acceptable_content_types(",application/json,");
        assert_eq!(types, ["application/json"]);
    }

    #[test]
    fn strips_parameters() {
        let types = acceptable_content_types("application/json; charset=utf-8; Q=0.7, text/xml");
        assert_eq!(types, ["text/xml", "application/json"]);
    }

    #[test]
    fn tolerates_malformed_quality() {
        let types = acceptable_content_types("application/xml;q=abc, application/json;q=7");
        assert_eq!(types, ["application/xml", "application/json"]);

        let types = acceptable_content_types("application/xml;q=-1, application/json");
        assert_eq!(types, ["application/json"]);
    }

    #[test]
    fn empty_header_yields_nothing() {
        assert!(acceptable_content_types("").is_empty());
        assert!(acceptable_content_types("   ").is_empty());
    }

    #[test]
    fn essence_strips_parameters() {
        assert_eq!(essence("application/json; charset=utf-8"), "application/json");
        assert_eq!(essence("  application/xml  "), "application/xml");
        assert_eq!(essence(""), "");
        assert_eq!(essence(";charset=utf-8"), "");
    }
}
