//! OpenSea REST API client.
//!
//! Implements the [`Marketplace`] port on top of three endpoints:
//! - `/api/v1/events` - listing events for the watched contract
//! - `/wyvern/v1/orders` - open sell orders for specific tokens
//! - `/api/v1/collection/{slug}/stats` - collection floor price
//!
//! List endpoints are paged by `offset`/`limit` until a short page arrives.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use super::dto::{
    decode_records, AssetEventDto, EventsResponse, OrderDto, OrdersResponse, StatsResponse,
};
use super::settings::OpenSeaConfig;
use crate::domain::{ListingEvent, Order, TokenId};
use crate::error::{Error, Result};
use crate::port::{EventKind, FetchOutcome, Marketplace};

const API_KEY_HEADER: &str = "X-API-KEY";

/// HTTP client for the OpenSea REST API, scoped to one collection.
pub struct OpenSeaClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
    contract_address: String,
    collection_id: String,
    events_page_size: usize,
    orders_page_size: usize,
    max_pages: usize,
}

impl OpenSeaClient {
    /// Create a client for the given contract and collection.
    #[must_use]
    pub fn new(
        config: &OpenSeaConfig,
        api_key: impl Into<String>,
        contract_address: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            contract_address: contract_address.into(),
            collection_id: collection_id.into(),
            events_page_size: config.events_page_size,
            orders_page_size: config.orders_page_size,
            max_pages: config.max_pages,
        }
    }

    fn events_url(&self) -> String {
        format!("{}/api/v1/events", self.base_url)
    }

    fn orders_url(&self) -> String {
        format!("{}/wyvern/v1/orders", self.base_url)
    }

    fn stats_url(&self) -> String {
        format!(
            "{}/api/v1/collection/{}/stats",
            self.base_url, self.collection_id
        )
    }

    fn events_query(
        &self,
        after: DateTime<Utc>,
        kind: EventKind,
        offset: usize,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("asset_contract_address", self.contract_address.clone()),
            ("only_opensea", "false".into()),
            ("event_type", kind.as_str().into()),
            ("offset", offset.to_string()),
            ("limit", self.events_page_size.to_string()),
            ("occurred_after", after.timestamp().to_string()),
        ]
    }

    fn orders_query(&self, token_ids: &[TokenId], offset: usize) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("asset_contract_address", self.contract_address.clone()),
            ("side", "1".into()),
            ("sale_kind", "0".into()),
            ("is_english", "false".into()),
            ("limit", self.orders_page_size.to_string()),
            ("offset", offset.to_string()),
        ];
        query.extend(token_ids.iter().map(|id| ("token_ids", id.to_string())));
        query
    }

    async fn get_json<T>(&self, url: &str, query: &[(&'static str, String)]) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(API_KEY_HEADER, &self.api_key)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch every page of listing events after `after`.
    ///
    /// Malformed events are logged and skipped.
    pub async fn get_events(
        &self,
        after: DateTime<Utc>,
        kind: EventKind,
    ) -> Result<Vec<ListingEvent>> {
        let url = self.events_url();
        let raw = collect_pages(self.events_page_size, self.max_pages, |offset| {
            let query = self.events_query(after, kind, offset);
            let url = url.clone();
            async move {
                let page: EventsResponse = self.get_json(&url, &query).await?;
                Ok(page.asset_events)
            }
        })
        .await?;

        let total = raw.len();
        let events: Vec<ListingEvent> = decode_records::<AssetEventDto, _>(raw, "event");
        debug!(total, kept = events.len(), kind = %kind, "Fetched events");
        Ok(events)
    }

    /// Fetch every page of open sell orders for `token_ids`.
    ///
    /// Malformed orders are logged and skipped.
    pub async fn get_orders(&self, token_ids: &[TokenId]) -> Result<Vec<Order>> {
        let url = self.orders_url();
        let raw = collect_pages(self.orders_page_size, self.max_pages, |offset| {
            let query = self.orders_query(token_ids, offset);
            let url = url.clone();
            async move {
                let page: OrdersResponse = self.get_json(&url, &query).await?;
                Ok(page.orders)
            }
        })
        .await?;

        let total = raw.len();
        let orders: Vec<Order> = decode_records::<OrderDto, _>(raw, "order");
        debug!(total, kept = orders.len(), "Fetched orders");
        Ok(orders)
    }

    /// Fetch the collection floor price in ETH.
    pub async fn get_floor_price(&self) -> Result<Decimal> {
        let response: StatsResponse = self.get_json(&self.stats_url(), &[]).await?;
        let floor = response
            .stats
            .floor_price
            .ok_or_else(|| Error::Response("collection stats have no floor_price".into()))?;
        Decimal::from_f64(floor)
            .map(|d| d.normalize())
            .ok_or_else(|| Error::Response(format!("floor_price {floor} is not a finite number")))
    }
}

/// Fetch pages of `page_size` items until a short page or `max_pages`.
///
/// `fetch_page` receives the offset of the page to fetch.
pub async fn collect_pages<T, F, Fut>(
    page_size: usize,
    max_pages: usize,
    mut fetch_page: F,
) -> Result<Vec<T>>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
{
    let mut items = Vec::new();
    let mut offset = 0;

    for _ in 0..max_pages {
        let page = fetch_page(offset).await?;
        let len = page.len();
        items.extend(page);
        if len < page_size {
            return Ok(items);
        }
        offset += page_size;
    }

    warn!(max_pages, fetched = items.len(), "Stopped paging at page limit");
    Ok(items)
}

#[async_trait]
impl Marketplace for OpenSeaClient {
    async fn fetch_events(
        &self,
        after: DateTime<Utc>,
        kind: EventKind,
    ) -> FetchOutcome<Vec<ListingEvent>> {
        let result = self.get_events(after, kind).await;
        if let Err(ref err) = result {
            error!(error = %err, "Failed to fetch events");
        }
        result.into()
    }

    async fn fetch_orders(&self, token_ids: &[TokenId]) -> FetchOutcome<Vec<Order>> {
        let result = self.get_orders(token_ids).await;
        if let Err(ref err) = result {
            error!(error = %err, "Failed to fetch orders");
        }
        result.into()
    }

    async fn fetch_floor_price(&self) -> FetchOutcome<Decimal> {
        let result = self.get_floor_price().await;
        if let Err(ref err) = result {
            error!(error = %err, collection = %self.collection_id, "Failed to fetch floor price");
        }
        result.into()
    }

    fn marketplace_name(&self) -> &'static str {
        "OpenSea"
    }
}
