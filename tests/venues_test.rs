use cross_venue_arb_rs::venues::{binance, coinbase, kraken};
use cross_venue_arb_rs::{
    AssetPair, Binance, Coinbase, ExecutionStatus, Kraken, OrderSide, VenueAdapter,
};

fn btc_pair(venue_symbol: &str) -> AssetPair {
    AssetPair {
        base: "BTC".to_string(),
        quote: "USD".to_string(),
        venue_symbol: venue_symbol.to_string(),
        base_precision: 8,
        quote_precision: 2,
    }
}

// ---- Binance ----

#[test]
fn binance_decodes_book_ticker_frame() {
    let payload = r#"{"u":400900217,"s":"BTCUSDT","b":"25.35190000","B":"31.21000000","a":"25.36520000","A":"40.66000000"}"#;
    let quote = Binance::new().decode_quote_message(payload).unwrap();
    assert_eq!(quote.bid_price, 25.3519);
    assert_eq!(quote.bid_qty, 31.21);
    assert_eq!(quote.ask_price, 25.3652);
    assert_eq!(quote.ask_qty, 40.66);
}

#[test]
fn binance_drops_non_ticker_frames() {
    let binance = Binance::new();
    assert!(binance.decode_quote_message(r#"{"result":null,"id":1}"#).is_none());
    assert!(binance.decode_quote_message("not json").is_none());
    // Unparseable price fields are a dropped frame, not a panic.
    assert!(
        binance
            .decode_quote_message(r#"{"b":"oops","B":"1","a":"2","A":"3"}"#)
            .is_none()
    );
}

#[test]
fn binance_stream_url_encodes_the_symbol() {
    let url = Binance::new().quote_stream_url(&btc_pair("BTCUSDT"));
    assert_eq!(url, "wss://stream.binance.com:9443/ws/btcusdt@bookTicker");
    assert!(
        Binance::new()
            .stream_subscribe_payload(&btc_pair("BTCUSDT"))
            .is_none()
    );
}

#[test]
fn binance_order_status_catalog() {
    use binance::order_status_from_response as status;

    let accepted = r#"{"symbol":"BTCUSDT","orderId":28,"status":"FILLED"}"#;
    assert_eq!(status(OrderSide::Buy, accepted), ExecutionStatus::BuySuccessful);
    assert_eq!(status(OrderSide::Sell, accepted), ExecutionStatus::SellSuccessful);

    let rejected = |code: i64| format!(r#"{{"code":{},"msg":"rejected"}}"#, code);
    assert_eq!(status(OrderSide::Buy, &rejected(-1021)), ExecutionStatus::OutOfSync);
    assert_eq!(
        status(OrderSide::Buy, &rejected(-2010)),
        ExecutionStatus::InsufficientFunds
    );
    assert_eq!(
        status(OrderSide::Buy, &rejected(-1121)),
        ExecutionStatus::AssetDoesNotExist
    );
    assert_eq!(
        status(OrderSide::Buy, &rejected(-1013)),
        ExecutionStatus::BuyUnsuccessful
    );
    assert_eq!(
        status(OrderSide::Sell, &rejected(-1013)),
        ExecutionStatus::SellUnsuccessful
    );
    assert_eq!(status(OrderSide::Buy, &rejected(-9999)), ExecutionStatus::UnknownError);
    assert_eq!(status(OrderSide::Buy, "<html>502</html>"), ExecutionStatus::UnknownError);
}

// ---- Coinbase ----

#[test]
fn coinbase_decodes_ticker_frame() {
    let payload = r#"{"type":"ticker","product_id":"BTC-USD","best_bid":"45000.10","best_bid_size":"0.5","best_ask":"45001.20","best_ask_size":"0.3"}"#;
    let quote = Coinbase::new().decode_quote_message(payload).unwrap();
    assert_eq!(quote.bid_price, 45000.10);
    assert_eq!(quote.bid_qty, 0.5);
    assert_eq!(quote.ask_price, 45001.20);
    assert_eq!(quote.ask_qty, 0.3);
}

#[test]
fn coinbase_drops_non_ticker_frames() {
    let coinbase = Coinbase::new();
    // Subscription ack and heartbeat frames do not match the ticker shape.
    assert!(
        coinbase
            .decode_quote_message(r#"{"type":"subscriptions","channels":[]}"#)
            .is_none()
    );
    assert!(
        coinbase
            .decode_quote_message(
                r#"{"type":"heartbeat","best_bid":"1","best_bid_size":"1","best_ask":"2","best_ask_size":"1"}"#
            )
            .is_none()
    );
}

#[test]
fn coinbase_subscribe_payload_targets_the_ticker_channel() {
    let payload = Coinbase::new()
        .stream_subscribe_payload(&btc_pair("BTC-USD"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["type"], "subscribe");
    assert_eq!(value["product_ids"][0], "BTC-USD");
    assert_eq!(value["channels"][0], "ticker");
}

#[test]
fn coinbase_order_status_catalog() {
    use coinbase::order_status_from_response as status;

    let accepted = r#"{"id":"d0c5340b-6d6c-49d9-b2d8-e9f1a3b4c5d6","status":"pending"}"#;
    assert_eq!(status(OrderSide::Buy, accepted), ExecutionStatus::BuySuccessful);

    assert_eq!(
        status(OrderSide::Buy, r#"{"message":"Insufficient funds"}"#),
        ExecutionStatus::InsufficientFunds
    );
    assert_eq!(
        status(OrderSide::Buy, r#"{"message":"request timestamp expired"}"#),
        ExecutionStatus::OutOfSync
    );
    assert_eq!(
        status(OrderSide::Buy, r#"{"message":"Product not found"}"#),
        ExecutionStatus::AssetDoesNotExist
    );
    assert_eq!(
        status(OrderSide::Buy, r#"{"message":"size is too small"}"#),
        ExecutionStatus::UnknownError
    );
    assert_eq!(status(OrderSide::Buy, ""), ExecutionStatus::UnknownError);
}

// ---- Kraken ----

#[test]
fn kraken_decodes_ws_v2_ticker_frame() {
    let payload = r#"{"channel":"ticker","type":"update","data":[{"symbol":"BTC/USD","bid":45000.1,"bid_qty":2.5,"ask":45001.2,"ask_qty":1.1,"last":45000.5}]}"#;
    let quote = Kraken::new().decode_quote_message(payload).unwrap();
    assert_eq!(quote.bid_price, 45000.1);
    assert_eq!(quote.bid_qty, 2.5);
    assert_eq!(quote.ask_price, 45001.2);
    assert_eq!(quote.ask_qty, 1.1);
}

#[test]
fn kraken_drops_status_and_heartbeat_frames() {
    let kraken = Kraken::new();
    assert!(
        kraken
            .decode_quote_message(r#"{"channel":"status","data":[{"system":"online"}]}"#)
            .is_none()
    );
    assert!(
        kraken
            .decode_quote_message(r#"{"channel":"heartbeat"}"#)
            .is_none()
    );
    // Ticker frame with an empty data array.
    assert!(
        kraken
            .decode_quote_message(r#"{"channel":"ticker","data":[]}"#)
            .is_none()
    );
}

#[test]
fn kraken_subscribe_payload_uses_normalized_symbol() {
    // WS v2 wants BASE/QUOTE, not the REST altname.
    let payload = Kraken::new()
        .stream_subscribe_payload(&btc_pair("XBTUSD"))
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(value["method"], "subscribe");
    assert_eq!(value["params"]["channel"], "ticker");
    assert_eq!(value["params"]["symbol"][0], "BTC/USD");
}

#[test]
fn kraken_order_status_catalog() {
    use kraken::order_status_from_response as status;

    let accepted = r#"{"error":[],"result":{"txid":["OUF4EM-FRGI2-MQMWZD"]}}"#;
    assert_eq!(status(OrderSide::Buy, accepted), ExecutionStatus::BuySuccessful);
    assert_eq!(status(OrderSide::Sell, accepted), ExecutionStatus::SellSuccessful);

    let rejected = |error: &str| format!(r#"{{"error":["{}"]}}"#, error);
    assert_eq!(
        status(OrderSide::Buy, &rejected("EAPI:Invalid nonce")),
        ExecutionStatus::OutOfSync
    );
    assert_eq!(
        status(OrderSide::Buy, &rejected("EOrder:Insufficient funds")),
        ExecutionStatus::InsufficientFunds
    );
    assert_eq!(
        status(OrderSide::Buy, &rejected("EQuery:Unknown asset pair")),
        ExecutionStatus::AssetDoesNotExist
    );
    assert_eq!(
        status(OrderSide::Buy, &rejected("EOrder:Order minimum not met")),
        ExecutionStatus::BuyUnsuccessful
    );
    assert_eq!(
        status(OrderSide::Sell, &rejected("EOrder:Order minimum not met")),
        ExecutionStatus::SellUnsuccessful
    );
    assert_eq!(
        status(OrderSide::Buy, &rejected("EGeneral:Internal error")),
        ExecutionStatus::UnknownError
    );
    // No error array at all means the body is not a Kraken response.
    assert_eq!(status(OrderSide::Buy, r#"{"foo":1}"#), ExecutionStatus::UnknownError);
}
