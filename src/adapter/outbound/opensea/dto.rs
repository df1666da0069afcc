//! OpenSea REST response types.
//!
//! Only the fields the bot uses are declared. List responses keep their
//! records as raw JSON so each one is decoded on its own: a record with
//! missing or malformed required fields is logged and skipped without
//! failing the rest of the page.
//!
//! Example event:
//! ```json
//! {"asset":{"token_id":"42"},"ending_price":"500000000000000000",
//!  "event_timestamp":"2022-01-19T18:27:34.281361"}
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, DeserializeOwned, Deserializer, Unexpected, Visitor};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::domain::{
    DomainError, ListingEvent, Order, OrderFees, OrderSignature, TokenId, Wei,
};

/// `GET /api/v1/events`
#[derive(Debug, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub asset_events: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct AssetEventDto {
    pub asset: Option<AssetDto>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub ending_price: Option<String>,
    pub event_timestamp: Option<String>,
    pub created_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetDto {
    #[serde(deserialize_with = "string_or_number")]
    pub token_id: String,
}

#[derive(Debug, Deserialize)]
pub struct AccountDto {
    pub address: String,
}

/// `GET /wyvern/v1/orders`
#[derive(Debug, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct OrderDto {
    pub asset: Option<AssetDto>,
    pub exchange: String,
    pub maker: AccountDto,
    pub fee_recipient: AccountDto,
    #[serde(deserialize_with = "string_or_number")]
    pub base_price: String,
    #[serde(deserialize_with = "string_or_number")]
    pub maker_relayer_fee: String,
    #[serde(deserialize_with = "string_or_number")]
    pub taker_relayer_fee: String,
    #[serde(deserialize_with = "string_or_number")]
    pub maker_protocol_fee: String,
    #[serde(deserialize_with = "string_or_number")]
    pub taker_protocol_fee: String,
    #[serde(deserialize_with = "string_or_number")]
    pub extra: String,
    #[serde(deserialize_with = "string_or_number")]
    pub listing_time: String,
    #[serde(deserialize_with = "string_or_number")]
    pub expiration_time: String,
    #[serde(deserialize_with = "string_or_number")]
    pub salt: String,
    pub fee_method: u8,
    pub sale_kind: u8,
    pub how_to_call: u8,
    pub calldata: String,
    pub replacement_pattern: String,
    #[serde(default)]
    pub static_extradata: String,
    pub v: u8,
    pub r: String,
    pub s: String,
}

/// `GET /api/v1/collection/{slug}/stats`
#[derive(Debug, Deserialize)]
pub struct StatsResponse {
    pub stats: CollectionStatsDto,
}

#[derive(Debug, Deserialize)]
pub struct CollectionStatsDto {
    pub floor_price: Option<f64>,
}

impl TryFrom<AssetEventDto> for ListingEvent {
    type Error = DomainError;

    fn try_from(dto: AssetEventDto) -> Result<Self, Self::Error> {
        let token_id = dto
            .asset
            .map(|a| a.token_id)
            .ok_or(DomainError::MissingField("asset.token_id"))?;
        let ending_price: Wei = dto
            .ending_price
            .ok_or(DomainError::MissingField("ending_price"))?
            .parse()?;
        let occurred_at = dto
            .event_timestamp
            .as_deref()
            .or(dto.created_date.as_deref())
            .and_then(parse_timestamp)
            .ok_or(DomainError::MissingField("event_timestamp"))?;

        Ok(ListingEvent::new(token_id, ending_price, occurred_at))
    }
}

impl TryFrom<OrderDto> for Order {
    type Error = DomainError;

    fn try_from(dto: OrderDto) -> Result<Self, Self::Error> {
        let token_id = dto
            .asset
            .map(|a| TokenId::new(a.token_id))
            .ok_or(DomainError::MissingField("asset.token_id"))?;
        let base_price: Wei = dto.base_price.parse()?;

        Ok(Order {
            token_id,
            base_price,
            exchange: dto.exchange,
            maker: dto.maker.address,
            fee_recipient: dto.fee_recipient.address,
            fees: OrderFees {
                maker_relayer: dto.maker_relayer_fee,
                taker_relayer: dto.taker_relayer_fee,
                maker_protocol: dto.maker_protocol_fee,
                taker_protocol: dto.taker_protocol_fee,
            },
            extra: dto.extra,
            listing_time: dto.listing_time,
            expiration_time: dto.expiration_time,
            salt: dto.salt,
            fee_method: dto.fee_method,
            sale_kind: dto.sale_kind,
            how_to_call: dto.how_to_call,
            calldata: dto.calldata,
            replacement_pattern: dto.replacement_pattern,
            static_extradata: dto.static_extradata,
            signature: OrderSignature {
                v: dto.v,
                r: dto.r,
                s: dto.s,
            },
        })
    }
}

/// Decode one raw record through its DTO into a domain value.
pub fn decode_record<D, T>(raw: Value) -> Result<T, DomainError>
where
    D: DeserializeOwned,
    T: TryFrom<D, Error = DomainError>,
{
    let dto: D =
        serde_json::from_value(raw).map_err(|e| DomainError::MalformedRecord(e.to_string()))?;
    T::try_from(dto)
}

/// Decode every record of a page, logging and skipping the malformed ones.
pub fn decode_records<D, T>(raw: Vec<Value>, record: &'static str) -> Vec<T>
where
    D: DeserializeOwned,
    T: TryFrom<D, Error = DomainError>,
{
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| match decode_record::<D, T>(value) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!(error = %err, record, index, "Skipping malformed record");
                None
            }
        })
        .collect()
}

/// Parse OpenSea timestamps, which are UTC without an offset.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Accept JSON strings and integers for numeric fields.
///
/// Integers beyond `u64` arrive from `serde_json` as floats and have already
/// lost precision, so they are rejected; such amounts must be sent as strings.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct StringOrNumber;

    impl Visitor<'_> for StringOrNumber {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or an integer")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Err(E::invalid_value(Unexpected::Float(v), &self))
        }
    }

    deserializer.deserialize_any(StringOrNumber)
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrapper(#[serde(deserialize_with = "string_or_number")] String);

    Option::<Wrapper>::deserialize(deserializer).map(|w| w.map(|Wrapper(s)| s))
}
