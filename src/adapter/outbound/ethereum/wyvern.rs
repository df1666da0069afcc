//! Wyvern exchange call encoding.
//!
//! A purchase is an `atomicMatch_` call pairing the maker's signed sell order
//! with a buy order we construct on the fly. The buy side mirrors the sell
//! side's fees, price and call target; its calldata transfers the token to
//! the buyer and its replacement pattern lets the sell side fill in the
//! `from` address.

use std::str::FromStr;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall};

use crate::domain::Order;
use crate::error::{ExecutionError, Result};

sol! {
    #[sol(rpc)]
    #[derive(Debug)]
    contract WyvernExchange {
        function atomicMatch_(
            address[14] addrs,
            uint256[18] uints,
            uint8[8] feeMethodsSidesKindsHowToCalls,
            bytes calldataBuy,
            bytes calldataSell,
            bytes replacementPatternBuy,
            bytes replacementPatternSell,
            bytes staticExtradataBuy,
            bytes staticExtradataSell,
            uint8[2] vs,
            bytes32[5] rssMetadata
        ) external payable;
    }
}

sol! {
    interface IERC721 {
        function transferFrom(address from, address to, uint256 tokenId) external;
    }
}

/// Salt of the constructed buy order.
const BUY_ORDER_SALT: &str =
    "80924056284120424315533358126190893090476275160099819580315001835632701285303";

/// Side flags in `feeMethodsSidesKindsHowToCalls`.
const SIDE_BUY: u8 = 0;
const SIDE_SELL: u8 = 1;

/// Buyer-specific inputs to the match call.
#[derive(Debug, Clone, Copy)]
pub struct BuyParams {
    /// Wallet receiving the token and paying for it.
    pub buyer: Address,
    /// NFT contract of the token being bought.
    pub nft_contract: Address,
    /// Listing time of the buy order (unix seconds).
    pub listing_time: u64,
}

/// Build the `atomicMatch_` call that fills `order` for `params.buyer`.
///
/// # Errors
///
/// Returns [`ExecutionError::InvalidOrder`] when an order field cannot be
/// parsed into its ABI type.
#[allow(clippy::result_large_err)]
pub fn build_atomic_match(
    order: &Order,
    params: &BuyParams,
) -> Result<WyvernExchange::atomicMatch_Call> {
    let exchange = parse_address("exchange", &order.exchange)?;
    let maker = parse_address("maker", &order.maker)?;
    let fee_recipient = parse_address("fee_recipient", &order.fee_recipient)?;
    let token_id = parse_uint("token_id", order.token_id.as_str())?;

    let maker_relayer_fee = parse_uint("maker_relayer_fee", &order.fees.maker_relayer)?;
    let taker_relayer_fee = parse_uint("taker_relayer_fee", &order.fees.taker_relayer)?;
    let maker_protocol_fee = parse_uint("maker_protocol_fee", &order.fees.maker_protocol)?;
    let taker_protocol_fee = parse_uint("taker_protocol_fee", &order.fees.taker_protocol)?;
    let base_price = U256::from(order.base_price.get());
    let extra = parse_uint("extra", &order.extra)?;

    let addrs = [
        // buy
        exchange,
        params.buyer,
        maker,
        Address::ZERO,
        params.nft_contract,
        Address::ZERO,
        Address::ZERO,
        // sell
        exchange,
        maker,
        Address::ZERO,
        fee_recipient,
        params.nft_contract,
        Address::ZERO,
        Address::ZERO,
    ];

    let uints = [
        // buy
        maker_relayer_fee,
        taker_relayer_fee,
        maker_protocol_fee,
        taker_protocol_fee,
        base_price,
        extra,
        U256::from(params.listing_time),
        U256::ZERO,
        parse_uint("buy_salt", BUY_ORDER_SALT)?,
        // sell
        maker_relayer_fee,
        taker_relayer_fee,
        maker_protocol_fee,
        taker_protocol_fee,
        base_price,
        extra,
        parse_uint("listing_time", &order.listing_time)?,
        parse_uint("expiration_time", &order.expiration_time)?,
        parse_uint("salt", &order.salt)?,
    ];

    let kinds = [
        order.fee_method,
        SIDE_BUY,
        order.sale_kind,
        order.how_to_call,
        order.fee_method,
        SIDE_SELL,
        order.sale_kind,
        order.how_to_call,
    ];

    let static_extradata = parse_bytes("static_extradata", &order.static_extradata)?;
    let r = parse_word("r", &order.signature.r)?;
    let s = parse_word("s", &order.signature.s)?;

    Ok(WyvernExchange::atomicMatch_Call {
        addrs,
        uints,
        feeMethodsSidesKindsHowToCalls: kinds,
        calldataBuy: transfer_calldata(params.buyer, token_id),
        calldataSell: parse_bytes("calldata", &order.calldata)?,
        replacementPatternBuy: buy_replacement_pattern(),
        replacementPatternSell: parse_bytes("replacement_pattern", &order.replacement_pattern)?,
        staticExtradataBuy: static_extradata.clone(),
        staticExtradataSell: static_extradata,
        vs: [order.signature.v, order.signature.v],
        rssMetadata: [r, s, r, s, B256::ZERO],
    })
}

/// `transferFrom(0x0, buyer, token_id)`; the sell side supplies `from`.
#[must_use]
pub fn transfer_calldata(buyer: Address, token_id: U256) -> Bytes {
    IERC721::transferFromCall {
        from: Address::ZERO,
        to: buyer,
        tokenId: token_id,
    }
    .abi_encode()
    .into()
}

/// Pattern allowing the first argument (`from`) of the buy calldata to be
/// replaced by the seller's.
#[must_use]
pub fn buy_replacement_pattern() -> Bytes {
    let mut pattern = vec![0u8; 4 + 32 * 3];
    pattern[4..36].fill(0xff);
    pattern.into()
}

#[allow(clippy::result_large_err)]
fn parse_address(field: &'static str, raw: &str) -> Result<Address> {
    Address::from_str(raw.trim()).map_err(|e| invalid(field, e))
}

#[allow(clippy::result_large_err)]
fn parse_uint(field: &'static str, raw: &str) -> Result<U256> {
    U256::from_str(raw.trim()).map_err(|e| invalid(field, e))
}

#[allow(clippy::result_large_err)]
fn parse_bytes(field: &'static str, raw: &str) -> Result<Bytes> {
    Bytes::from_str(raw.trim()).map_err(|e| invalid(field, e))
}

#[allow(clippy::result_large_err)]
fn parse_word(field: &'static str, raw: &str) -> Result<B256> {
    B256::from_str(raw.trim()).map_err(|e| invalid(field, e))
}

fn invalid(field: &'static str, err: impl std::fmt::Display) -> crate::error::Error {
    ExecutionError::InvalidOrder {
        field,
        reason: err.to_string(),
    }
    .into()
}
