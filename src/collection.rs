//! Paginated collections over Servers.com list endpoints.
//!
//! A [`Collection`] is bound to one resource path. It fetches lazily, keeps
//! the most recent page together with the `Link` relations that came with
//! it, and moves between pages by copying `page`/`per_page` out of those
//! relations.
//!
//! # Example
//!
//! ```no_run
//! use serverscom::{List, ServersComClient, SshKey};
//!
//! # async fn example() -> serverscom::Result<()> {
//! let client = ServersComClient::from_env()?;
//!
//! let mut keys = SshKey::collection(&client);
//! keys.set_per_page(50);
//!
//! let first = keys.list().await?.len();
//! if keys.has_next() {
//!     let second = keys.next_page().await?;
//!     println!("{first} + {} keys", second.len());
//! }
//!
//! // Or everything at once
//! let all = SshKey::collection(&client).collect().await?;
//! println!("{} keys in total", all.len());
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;

use reqwest::header::LINK;
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::client::ServersComClient;
use crate::error::{Result, ServersComError};
use crate::link::{parse_link_header, Relation, Relations};

/// Maximum pages `collect` follows (safety limit).
const MAX_PAGES: usize = 10_000;

const PAGE: &str = "page";
const PER_PAGE: &str = "per_page";

/// A lazily fetched, navigable page of `T` from one list endpoint.
///
/// Every method that performs I/O takes `&mut self`; a collection is meant
/// to be driven by one caller at a time.
pub struct Collection<T> {
    client: ServersComClient,
    path: String,
    params: BTreeMap<String, String>,
    clean: bool,
    relations: Relations,
    elements: Vec<T>,
}

impl<T> std::fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("clean", &self.clean)
            .field("relations", &self.relations)
            .field("elements", &self.elements.len())
            .finish()
    }
}

impl<T> Collection<T> {
    /// Create a clean collection bound to `path`.
    pub fn new(client: ServersComClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            params: BTreeMap::new(),
            clean: true,
            relations: Relations::new(),
            elements: Vec::new(),
        }
    }

    /// The resource path this collection targets.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters sent with the next fetch.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Returns `true` until the first successful fetch.
    pub fn is_clean(&self) -> bool {
        self.clean
    }

    /// Whether the current page links to a next page.
    ///
    /// Always `false` before the first fetch; never fetches by itself.
    pub fn has_next(&self) -> bool {
        self.relations.contains(Relation::Next)
    }

    /// Whether the current page links to a previous page.
    pub fn has_previous(&self) -> bool {
        self.relations.contains(Relation::Prev)
    }

    /// Whether the current page links to the first page.
    pub fn has_first(&self) -> bool {
        self.relations.contains(Relation::First)
    }

    /// Whether the current page links to the last page.
    pub fn has_last(&self) -> bool {
        self.relations.contains(Relation::Last)
    }

    /// Target URL of a relation on the current page.
    pub fn relation(&self, rel: Relation) -> Option<&Url> {
        self.relations.get(rel)
    }

    /// The cached page, without fetching.
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Set the `page` parameter. Values `<= 1` remove it, so the first page
    /// is requested without an explicit `page=1`.
    pub fn set_page(&mut self, page: i64) -> &mut Self {
        let value = if page > 1 { page.to_string() } else { String::new() };
        apply_param(&mut self.params, PAGE, value);
        self
    }

    /// Set the `per_page` parameter. Values `<= 0` remove it.
    pub fn set_per_page(&mut self, per_page: i64) -> &mut Self {
        let value = if per_page > 0 {
            per_page.to_string()
        } else {
            String::new()
        };
        apply_param(&mut self.params, PER_PAGE, value);
        self
    }

    /// Set an arbitrary query parameter. An empty value removes it.
    pub fn set_param(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        apply_param(&mut self.params, name, value.into());
        self
    }

    /// Parameters for following `rel`, computed without touching `self`.
    fn params_for(&self, rel: Relation) -> Result<BTreeMap<String, String>> {
        let target = self
            .relations
            .get(rel)
            .ok_or(ServersComError::Navigation { relation: rel })?;

        let mut params = self.params.clone();
        for key in [PAGE, PER_PAGE] {
            let value = target
                .query_pairs()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.into_owned())
                .unwrap_or_default();
            apply_param(&mut params, key, value);
        }

        Ok(params)
    }
}

impl<T: DeserializeOwned> Collection<T> {
    /// The current page, fetching it first if the collection is clean.
    ///
    /// Once loaded this never fetches again; it returns whatever page was
    /// fetched last (by navigation, [`refresh`](Self::refresh) or
    /// [`collect`](Self::collect)).
    ///
    /// # Errors
    ///
    /// Returns an error if the initial fetch fails.
    pub async fn list(&mut self) -> Result<&[T]> {
        if self.clean {
            self.refresh().await?;
        }
        Ok(&self.elements)
    }

    /// Fetch the page described by the current parameters, replacing the
    /// cached page and relations.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode.
    /// The collection is left unchanged in that case.
    pub async fn refresh(&mut self) -> Result<()> {
        let params = self.params.clone();
        self.fetch_and_commit(params).await
    }

    /// Move to the next page.
    ///
    /// # Errors
    ///
    /// Returns [`ServersComError::Navigation`] without any request if there
    /// is no next page, or the fetch error otherwise.
    pub async fn next_page(&mut self) -> Result<&[T]> {
        self.navigate(Relation::Next).await
    }

    /// Move to the previous page.
    ///
    /// # Errors
    ///
    /// See [`next_page`](Self::next_page).
    pub async fn previous_page(&mut self) -> Result<&[T]> {
        self.navigate(Relation::Prev).await
    }

    /// Move to the first page.
    ///
    /// # Errors
    ///
    /// See [`next_page`](Self::next_page).
    pub async fn first_page(&mut self) -> Result<&[T]> {
        self.navigate(Relation::First).await
    }

    /// Move to the last page.
    ///
    /// # Errors
    ///
    /// See [`next_page`](Self::next_page).
    pub async fn last_page(&mut self) -> Result<&[T]> {
        self.navigate(Relation::Last).await
    }

    async fn navigate(&mut self, rel: Relation) -> Result<&[T]> {
        if self.clean {
            self.refresh().await?;
        }

        let params = self.params_for(rel)?;
        self.fetch_and_commit(params).await?;

        Ok(&self.elements)
    }

    /// Fetch with `params` and, only if both the request and the decode
    /// succeed, adopt the new parameters, page and relations.
    async fn fetch_and_commit(&mut self, params: BTreeMap<String, String>) -> Result<()> {
        let mut url = self.client.build_url(&self.path)?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter());
        }

        let response = self.client.execute(Method::GET, url.clone(), None).await?;
        let elements: Vec<T> = serde_json::from_slice(&response.body)?;
        let relations = response
            .header_joined(LINK.as_str())
            .map(|link| parse_link_header(&link, &url))
            .unwrap_or_default();

        tracing::debug!(
            %url,
            elements = elements.len(),
            relations = ?relations.iter().map(|(rel, _)| rel.as_str()).collect::<Vec<_>>(),
            "page fetched"
        );

        self.params = params;
        self.elements = elements;
        self.relations = relations;
        self.clean = false;

        Ok(())
    }
}

impl<T: DeserializeOwned + Clone> Collection<T> {
    /// Fetch every remaining page and return all elements in fetch order.
    ///
    /// Starts from [`list`](Self::list) and follows `next` links until there
    /// are none. Afterwards the collection holds the last page.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; pages fetched before it are
    /// discarded from the result. A server still advertising `next` after
    /// 10 000 pages yields [`ServersComError::PageLimit`].
    pub async fn collect(&mut self) -> Result<Vec<T>> {
        self.collect_up_to(MAX_PAGES).await
    }

    async fn collect_up_to(&mut self, max_pages: usize) -> Result<Vec<T>> {
        let mut all = self.list().await?.to_vec();
        let mut pages = 1;

        while self.has_next() {
            if pages >= max_pages {
                tracing::warn!("Reached pagination limit of {} pages, stopping", max_pages);
                return Err(ServersComError::PageLimit { limit: max_pages });
            }
            all.extend_from_slice(self.next_page().await?);
            pages += 1;
        }

        Ok(all)
    }
}

fn apply_param(params: &mut BTreeMap<String, String>, name: impl Into<String>, value: String) {
    let name = name.into();
    if value.is_empty() {
        params.remove(&name);
    } else {
        params.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;
    use crate::client::tests::scripted_client;
    use crate::error::TransportError;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Widget {
        id: u32,
    }

    fn widgets(ids: &[u32]) -> Vec<Widget> {
        ids.iter().map(|&id| Widget { id }).collect()
    }

    const NEXT_PAGE_2: &str = r#"<https://x/widgets?page=2&per_page=2>; rel="next""#;

    #[tokio::test]
    async fn test_fresh_collection_is_clean() {
        let (client, transport) = scripted_client();
        let collection: Collection<Widget> = client.collection("/widgets");

        assert!(collection.is_clean());
        assert!(!collection.has_next());
        assert!(!collection.has_previous());
        assert!(!collection.has_first());
        assert!(!collection.has_last());
        assert!(collection.elements().is_empty());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_list_fetches_once() {
        let (client, transport) = scripted_client();
        transport.push(200, None, r#"[{"id":1},{"id":2}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");

        let first = collection.list().await.unwrap().to_vec();
        let second = collection.list().await.unwrap().to_vec();

        assert_eq!(first, widgets(&[1, 2]));
        assert_eq!(first, second);
        assert_eq!(transport.request_count(), 1);
        assert!(!collection.is_clean());
        assert_eq!(
            transport.requests()[0].url.as_str(),
            "https://api.test/v1/widgets"
        );
        assert_eq!(transport.requests()[0].method, Method::GET);
    }

    #[tokio::test]
    async fn test_widgets_scenario() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1},{"id":2}]"#);
        transport.push(200, None, r#"[{"id":3},{"id":4}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");

        assert_eq!(collection.list().await.unwrap(), widgets(&[1, 2]).as_slice());
        assert!(collection.has_next());

        assert_eq!(
            collection.next_page().await.unwrap(),
            widgets(&[3, 4]).as_slice()
        );
        assert!(!collection.has_next());

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[1].url.as_str(),
            "https://api.test/v1/widgets?page=2&per_page=2"
        );
    }

    #[tokio::test]
    async fn test_navigation_on_clean_collection_fetches_first() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1}]"#);
        transport.push(200, None, r#"[{"id":2}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");

        let page = collection.next_page().await.unwrap().to_vec();

        assert_eq!(page, widgets(&[2]));
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_missing_relation_fails_closed() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1},{"id":2}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");
        collection.list().await.unwrap();
        let params_before = collection.params().clone();

        let err = collection.previous_page().await.unwrap_err();

        assert!(matches!(
            err,
            ServersComError::Navigation {
                relation: Relation::Prev
            }
        ));
        assert_eq!(transport.request_count(), 1);
        assert_eq!(collection.elements(), widgets(&[1, 2]).as_slice());
        assert!(collection.has_next());
        assert_eq!(collection.params(), &params_before);
    }

    #[tokio::test]
    async fn test_collect_concatenates_pages_in_order() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1},{"id":2}]"#);
        transport.push(
            200,
            Some(r#"<https://x/widgets?page=3&per_page=2>; rel="next", <https://x/widgets?per_page=2>; rel="prev""#),
            r#"[{"id":3},{"id":4}]"#,
        );
        transport.push(
            200,
            Some(r#"<https://x/widgets?page=2&per_page=2>; rel="prev""#),
            r#"[{"id":5},{"id":6}]"#,
        );
        let mut collection: Collection<Widget> = client.collection("/widgets");

        let all = collection.collect().await.unwrap();

        assert_eq!(all, widgets(&[1, 2, 3, 4, 5, 6]));
        assert!(!collection.has_next());
        assert!(collection.has_previous());
        assert_eq!(transport.request_count(), 3);
        // collection now holds the last page
        assert_eq!(collection.list().await.unwrap(), widgets(&[5, 6]).as_slice());
        assert_eq!(transport.request_count(), 3);
    }

    #[tokio::test]
    async fn test_collect_starts_from_cached_page() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1}]"#);
        transport.push(200, None, r#"[{"id":2}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");
        collection.list().await.unwrap();

        let all = collection.collect().await.unwrap();

        assert_eq!(all, widgets(&[1, 2]));
        assert_eq!(transport.request_count(), 2);
    }

    #[tokio::test]
    async fn test_page_and_per_page_clearing() {
        let (client, transport) = scripted_client();
        transport.push(200, None, "[]");
        transport.push(200, None, "[]");
        transport.push(200, None, "[]");
        let mut collection: Collection<Widget> = client.collection("/widgets");

        collection.set_page(1).set_per_page(0);
        collection.refresh().await.unwrap();

        collection.set_page(2).set_per_page(10);
        collection.refresh().await.unwrap();

        collection.set_page(-3).set_per_page(-1);
        collection.refresh().await.unwrap();

        let urls: Vec<String> = transport
            .requests()
            .iter()
            .map(|r| r.url.to_string())
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://api.test/v1/widgets",
                "https://api.test/v1/widgets?page=2&per_page=10",
                "https://api.test/v1/widgets",
            ]
        );
    }

    #[tokio::test]
    async fn test_set_param_empty_removes_and_values_are_encoded() {
        let (client, transport) = scripted_client();
        transport.push(200, None, "[]");
        let mut collection: Collection<Widget> = client.collection("/widgets");

        collection
            .set_param("search_pattern", "web 01&02")
            .set_param("label_selector", "env=prod")
            .set_param("location_id", "1")
            .set_param("location_id", "");
        collection.refresh().await.unwrap();

        assert_eq!(
            transport.requests()[0].url.query(),
            Some("label_selector=env%3Dprod&search_pattern=web+01%2602")
        );
    }

    #[tokio::test]
    async fn test_empty_body_without_link() {
        let (client, transport) = scripted_client();
        transport.push(200, None, "[]");
        let mut collection: Collection<Widget> = client.collection("/widgets");

        assert!(collection.list().await.unwrap().is_empty());
        assert!(!collection.is_clean());
        assert!(!collection.has_next());
        assert!(!collection.has_previous());
        assert!(!collection.has_first());
        assert!(!collection.has_last());
    }

    #[tokio::test]
    async fn test_navigation_keeps_caller_params() {
        let (client, transport) = scripted_client();
        transport.push(
            200,
            Some(r#"<https://x/widgets?page=4&per_page=5&search_pattern=ignored>; rel="last""#),
            r#"[{"id":1}]"#,
        );
        transport.push(200, None, r#"[{"id":20}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");
        collection.set_param("search_pattern", "web");

        collection.list().await.unwrap();
        collection.last_page().await.unwrap();

        assert_eq!(
            transport.requests()[1].url.query(),
            Some("page=4&per_page=5&search_pattern=web")
        );
        assert_eq!(collection.params().get("page").map(String::as_str), Some("4"));
    }

    #[tokio::test]
    async fn test_first_relation_without_page_clears_page() {
        let (client, transport) = scripted_client();
        transport.push(
            200,
            Some(r#"<https://x/widgets?per_page=2>; rel="first""#),
            r#"[{"id":3}]"#,
        );
        transport.push(200, None, r#"[{"id":1}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");
        collection.set_page(2);

        collection.list().await.unwrap();
        collection.first_page().await.unwrap();

        assert_eq!(
            transport.requests()[1].url.as_str(),
            "https://api.test/v1/widgets?per_page=2"
        );
        assert!(!collection.params().contains_key("page"));
    }

    #[tokio::test]
    async fn test_transport_error_leaves_clean_collection_clean() {
        let (client, transport) = scripted_client();
        transport.push_error(TransportError::Timeout);
        let mut collection: Collection<Widget> = client.collection("/widgets");

        let err = collection.list().await.unwrap_err();

        assert!(matches!(err, ServersComError::Transport(_)));
        assert!(collection.is_clean());
        assert!(collection.elements().is_empty());
    }

    #[tokio::test]
    async fn test_api_error_leaves_state_untouched() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1},{"id":2}]"#);
        transport.push(
            500,
            None,
            r#"{"code":"INTERNAL_SERVER_ERROR","message":"boom"}"#,
        );
        let mut collection: Collection<Widget> = client.collection("/widgets");
        collection.list().await.unwrap();

        let err = collection.next_page().await.unwrap_err();

        assert_eq!(err.status_code(), Some(500));
        assert_eq!(collection.elements(), widgets(&[1, 2]).as_slice());
        assert!(collection.has_next());
        assert!(collection.params().is_empty());
    }

    #[tokio::test]
    async fn test_decode_error_does_not_mark_loaded() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"{"id":1}"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");

        let err = collection.list().await.unwrap_err();

        assert!(matches!(err, ServersComError::ParseError(_)));
        assert!(collection.is_clean());
        assert!(!collection.has_next());
    }

    #[tokio::test]
    async fn test_decode_error_after_load_keeps_previous_page() {
        let (client, transport) = scripted_client();
        transport.push(200, None, r#"[{"id":1}]"#);
        transport.push(
            200,
            Some(r#"<https://x/widgets?page=9>; rel="last""#),
            "not json",
        );
        let mut collection: Collection<Widget> = client.collection("/widgets");
        collection.list().await.unwrap();

        assert!(collection.refresh().await.is_err());

        assert!(!collection.is_clean());
        assert_eq!(collection.elements(), widgets(&[1]).as_slice());
        assert!(!collection.has_last());
    }

    #[tokio::test]
    async fn test_refresh_replaces_relations() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1}]"#);
        transport.push(
            200,
            Some(r#"<https://x/widgets?page=1>; rel="first""#),
            r#"[{"id":1}]"#,
        );
        let mut collection: Collection<Widget> = client.collection("/widgets");

        collection.refresh().await.unwrap();
        assert!(collection.has_next());

        collection.refresh().await.unwrap();
        assert!(!collection.has_next());
        assert!(collection.has_first());
        assert_eq!(
            collection.relation(Relation::First).map(Url::as_str),
            Some("https://x/widgets?page=1")
        );
    }

    #[tokio::test]
    async fn test_collect_follows_relative_next() {
        let (client, transport) = scripted_client();
        transport.push(
            200,
            Some(r#"</v1/widgets?page=2&per_page=2>; rel="next""#),
            r#"[{"id":1},{"id":2}]"#,
        );
        transport.push(200, None, r#"[{"id":3}]"#);
        let mut collection: Collection<Widget> = client.collection("/widgets");

        let all = collection.collect().await.unwrap();

        assert_eq!(all, widgets(&[1, 2, 3]));
        assert_eq!(transport.request_count(), 2);
        let second = &transport.requests()[1];
        assert_eq!(second.url.query(), Some("page=2&per_page=2"));
    }

    #[tokio::test]
    async fn test_collect_past_page_limit_is_an_error() {
        let (client, transport) = scripted_client();
        transport.push(200, Some(NEXT_PAGE_2), r#"[{"id":1}]"#);
        transport.push(
            200,
            Some(r#"<https://x/widgets?page=3&per_page=2>; rel="next""#),
            r#"[{"id":2}]"#,
        );
        let mut collection: Collection<Widget> = client.collection("/widgets");

        let err = collection.collect_up_to(2).await.unwrap_err();

        assert!(matches!(err, ServersComError::PageLimit { limit: 2 }));
        assert_eq!(transport.request_count(), 2);
        assert!(collection.has_next());
    }
}
