//! Search URL construction and redirect repair.

/// Builds the search URL for `term` on results page `page`.
///
/// The term is form-encoded, so spaces become `+`.
pub fn build_search_url(base: &str, term: &str, page: u32) -> String {
    let term = urlencoding::encode(term).replace("%20", "+");
    format!("{}?Ntt={}&page={}", base, term, page)
}

/// Returns a corrected URL when the store redirected away from the requested page.
///
/// Some stores drop the `page` parameter on redirect. For `page > 1`, if the final
/// URL lost `&page={page}`, every `page` pair is removed and the requested one is
/// appended to the query. A `#fragment` stays after the query. Returns `None` when
/// no second navigation is needed.
pub fn restore_page_param(final_url: &str, page: u32) -> Option<String> {
    let (target, fragment) = match final_url.split_once('#') {
        Some((target, fragment)) => (target, Some(fragment)),
        None => (final_url, None),
    };

    if page <= 1 || target.contains(&format!("&page={}", page)) {
        return None;
    }

    let (base, query) = target.split_once('?').unwrap_or((target, ""));

    let page_pair = format!("page={}", page);
    let mut pairs: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.is_empty() && pair.split('=').next() != Some("page"))
        .collect();
    pairs.push(&page_pair);

    let mut fixed = format!("{}?{}", base, pairs.join("&"));
    if let Some(fragment) = fragment {
        fixed.push('#');
        fixed.push_str(fragment);
    }

    Some(fixed)
}

/// Host part of an absolute URL, without userinfo or port.
///
/// Bracketed IPv6 hosts are returned without the brackets.
pub fn host_of(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = authority.rsplit('@').next()?;

    let host = match host_port.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once(']')?.0,
        None => host_port.split(':').next()?,
    };

    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
