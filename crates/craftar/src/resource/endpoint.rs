//! Management API URL construction.

use tracing::warn;
use url::form_urlencoded;

use crate::config::ServiceUrl;
use crate::types::{Filter, Identifier, Pagination, ResourceKind};

/// Builds management endpoint URLs for one host, API version and key.
///
/// Format: `{host}/api/{version}/{kind}[/{identifier}]/?api_key={key}[&limit=L][&offset=O][&{filter}={parent}]`
///
/// # Example
///
/// ```
/// use craftar::resource::UrlBuilder;
/// use craftar::{ResourceKind, ServiceUrl};
///
/// let host = ServiceUrl::new("https://crs.catchoom.com").unwrap();
/// let urls = UrlBuilder::new(&host, "v0", "secret");
/// assert_eq!(
///     urls.build(ResourceKind::Collection, None, None, None),
///     "https://crs.catchoom.com/api/v0/collection/?api_key=secret"
/// );
/// ```
#[derive(Clone, Copy, Debug)]
pub struct UrlBuilder<'a> {
    host: &'a ServiceUrl,
    api_version: &'a str,
    api_key: &'a str,
}

impl<'a> UrlBuilder<'a> {
    pub fn new(host: &'a ServiceUrl, api_version: &'a str, api_key: &'a str) -> Self {
        Self {
            host,
            api_version,
            api_key,
        }
    }

    /// Returns the URL for a collection of resources, or a single one when
    /// an identifier is given.
    ///
    /// A filter on a kind without a filter mapping is dropped.
    pub fn build(
        &self,
        kind: ResourceKind,
        identifier: Option<&Identifier>,
        pagination: Option<&Pagination>,
        filter: Option<&Filter>,
    ) -> String {
        let path = match identifier {
            Some(id) => format!("api/{}/{}/{}/", self.api_version, kind, id),
            None => format!("api/{}/{}/", self.api_version, kind),
        };

        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("api_key", self.api_key);

        if let Some(pagination) = pagination {
            if let Some(limit) = pagination.limit {
                query.append_pair("limit", &limit.to_string());
            }
            if let Some(offset) = pagination.offset {
                query.append_pair("offset", &offset.to_string());
            }
        }

        if let Some(filter) = filter {
            match kind.filter_param() {
                Some(param) => {
                    if kind.filter_parent() != Some(filter.parent_kind) {
                        warn!(%kind, parent = %filter.parent_kind, "Filter parent kind does not match");
                    }
                    query.append_pair(param, filter.parent.as_str());
                }
                None => warn!(%kind, "Kind has no filter mapping; filter dropped"),
            }
        }

        format!("{}?{}", self.host.join(&path), query.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroU32;

    const UUID: &str = "0123456789abcdef0123456789abcdef";

    fn host() -> ServiceUrl {
        ServiceUrl::new("https://crs.catchoom.com").unwrap()
    }

    fn uuid(kind: ResourceKind) -> Identifier {
        Identifier::new(kind, UUID).unwrap()
    }

    #[test]
    fn list_url_has_only_api_key() {
        let host = host();
        let urls = UrlBuilder::new(&host, "v0", "k");
        assert_eq!(
            urls.build(ResourceKind::Item, None, None, None),
            "https://crs.catchoom.com/api/v0/item/?api_key=k"
        );
    }

    #[test]
    fn identifier_adds_path_segment() {
        let host = host();
        let urls = UrlBuilder::new(&host, "v0", "k");
        let id = uuid(ResourceKind::Collection);
        assert_eq!(
            urls.build(ResourceKind::Collection, Some(&id), None, None),
            format!("https://crs.catchoom.com/api/v0/collection/{UUID}/?api_key=k")
        );
    }

    #[test]
    fn pagination_present_values_are_sent() {
        let host = host();
        let urls = UrlBuilder::new(&host, "v0", "k");
        let page = Pagination::page(NonZeroU32::new(25).unwrap(), 0);
        assert_eq!(
            urls.build(ResourceKind::Collection, None, Some(&page), None),
            "https://crs.catchoom.com/api/v0/collection/?api_key=k&limit=25&offset=0"
        );

        let only_offset = Pagination::new(None, Some(50));
        assert_eq!(
            urls.build(ResourceKind::Collection, None, Some(&only_offset), None),
            "https://crs.catchoom.com/api/v0/collection/?api_key=k&offset=50"
        );

        assert_eq!(
            urls.build(ResourceKind::Collection, None, Some(&Pagination::default()), None),
            "https://crs.catchoom.com/api/v0/collection/?api_key=k"
        );
    }

    #[test]
    fn items_and_tokens_filter_on_collection() {
        let host = host();
        let urls = UrlBuilder::new(&host, "v0", "k");
        let filter = Filter::collection(uuid(ResourceKind::Collection));

        for kind in [ResourceKind::Item, ResourceKind::Token] {
            let url = urls.build(kind, None, None, Some(&filter));
            assert!(url.ends_with(&format!("&collection__uuid={UUID}")), "{url}");
        }
    }

    #[test]
    fn images_filter_on_item() {
        let host = host();
        let urls = UrlBuilder::new(&host, "v0", "k");
        let filter = Filter::item(uuid(ResourceKind::Item));
        let url = urls.build(ResourceKind::Image, None, None, Some(&filter));
        assert!(url.ends_with(&format!("&item__uuid={UUID}")), "{url}");
    }

    #[test]
    fn unmapped_filter_is_dropped() {
        let host = host();
        let urls = UrlBuilder::new(&host, "v0", "k");
        let filter = Filter::collection(uuid(ResourceKind::Collection));
        for kind in [ResourceKind::Collection, ResourceKind::Media, ResourceKind::Bundle] {
            let url = urls.build(kind, None, None, Some(&filter));
            assert!(!url.contains("__uuid"), "{url}");
        }
    }

    #[test]
    fn api_key_is_escaped() {
        let host = host();
        let urls = UrlBuilder::new(&host, "v0", "a&b=c");
        assert_eq!(
            urls.build(ResourceKind::App, None, None, None),
            "https://crs.catchoom.com/api/v0/app/?api_key=a%26b%3Dc"
        );
    }

    #[test]
    fn full_parameter_order() {
        let host = ServiceUrl::new("http://localhost:8000").unwrap();
        let urls = UrlBuilder::new(&host, "v0", "k");
        let page = Pagination::page(NonZeroU32::new(10).unwrap(), 20);
        let filter = Filter::collection(uuid(ResourceKind::Collection));
        assert_eq!(
            urls.build(ResourceKind::Token, None, Some(&page), Some(&filter)),
            format!("http://localhost:8000/api/v0/token/?api_key=k&limit=10&offset=20&collection__uuid={UUID}")
        );
    }
}
