use axum::http::Uri;

/// Build an absolute URL for the given page, preserving every other query
/// parameter. Page 1 omits the `page` parameter entirely.
pub fn replace_page(base_url: &str, uri: &Uri, page: i64) -> String {
    let path = uri.path();
    let mut params: Vec<&str> = uri
        .query()
        .unwrap_or("")
        .split('&')
        .filter(|p| !p.is_empty() && !p.starts_with("page="))
        .collect();

    let page_param;
    if page > 1 {
        page_param = format!("page={page}");
        params.push(&page_param);
    }

    let base = base_url.trim_end_matches('/');
    if params.is_empty() {
        format!("{base}{path}")
    } else {
        format!("{base}{path}?{}", params.join("&"))
    }
}

/// Neighbour links for a paginated listing.
pub fn page_links(
    base_url: &str,
    uri: &Uri,
    page: i64,
    limit: i64,
    count: i64,
) -> (Option<String>, Option<String>) {
    let next = if page * limit < count {
        Some(replace_page(base_url, uri, page + 1))
    } else {
        None
    };
    let previous = if page > 1 {
        Some(replace_page(base_url, uri, page - 1))
    } else {
        None
    };

    (next, previous)
}
