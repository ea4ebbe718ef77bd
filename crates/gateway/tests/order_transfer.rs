//! Integration test: Order screen <-> Confirmation handler
//!
//! Tests the full round-trip:
//! Screen -> draft channel -> Handler -> result reply -> Screen,
//! with the order parked in a snapshot store across a "rotation".

use coinswap_core::{CryptoCurrency, ExchangeOrder};
use coinswap_gateway::{
    ChannelPublisher, ChannelRequester, CodecError, Encoding, OrderResult, Publisher, Requester,
    SnapshotStore, Subjects, Subscriber, TransportConfig, TransportError, decode_order,
    encode_order,
};
use num_bigint::BigInt;
use rust_decimal_macros::dec;
use std::time::Duration;

fn btc_to_eth() -> ExchangeOrder {
    ExchangeOrder::new(
        "ORDER-123",
        CryptoCurrency::Btc,
        CryptoCurrency::Ether,
        dec!(0.5),
        dec!(7.3),
        14.6,
        2000u64,
        dec!(0.0021),
        "0xabc...",
        "1Fz...",
    )
}

/// The reference order survives every encoding bit for bit
#[test]
fn test_reference_order_round_trip() {
    for encoding in [Encoding::Json, Encoding::Binary] {
        let bytes = encode_order(&btc_to_eth(), encoding).unwrap();
        let decoded = decode_order(&bytes, encoding).unwrap();

        assert_eq!(decoded, btc_to_eth());
        assert_eq!(decoded.transaction_fee(), &BigInt::from(2000));
        assert_eq!(decoded.deposit_amount(), dec!(0.5));
        assert_eq!(decoded.network_fee(), dec!(0.0021));
        assert_eq!(decoded.exchange_rate(), 14.6);
    }
}

/// Wei fees beyond u64 and long decimals survive both encodings
#[test]
fn test_large_values_round_trip() {
    let mut order = btc_to_eth();
    order.set_from_currency(CryptoCurrency::Ether);
    order.set_to_currency(CryptoCurrency::Btc);
    order.set_deposit_amount(dec!(12.345678901234567890));
    order.set_transaction_fee(BigInt::from(u64::MAX) * BigInt::from(1_000u32));
    order.set_exchange_rate(0.072_314_159_265_358_97);

    for encoding in [Encoding::Json, Encoding::Binary] {
        let bytes = encode_order(&order, encoding).unwrap();
        assert_eq!(decode_order(&bytes, encoding).unwrap(), order);
    }
}

/// Malformed transfer forms never produce a record
#[test]
fn test_malformed_input_is_rejected() {
    let cases: [&[u8]; 4] = [
        b"{not json",
        br#"{"orderId":"X"}"#,
        br#"[1,2,3]"#,
        b"null",
    ];
    for bytes in cases {
        assert!(matches!(
            decode_order(bytes, Encoding::Json),
            Err(CodecError::Decode(_))
        ));
    }

    let json = String::from_utf8(encode_order(&btc_to_eth(), Encoding::Json).unwrap()).unwrap();
    let bad_currency = json.replace("\"ETH\"", "\"XRP\"");
    assert!(matches!(
        decode_order(bad_currency.as_bytes(), Encoding::Json),
        Err(CodecError::Decode(_))
    ));

    // More digits than a Decimal holds must fail, not round
    let too_precise = json.replace(
        "\"depositAmount\":\"0.5\"",
        "\"depositAmount\":\"0.123456789012345678901234567891234\"",
    );
    assert_ne!(too_precise, json);
    assert!(matches!(
        decode_order(too_precise.as_bytes(), Encoding::Json),
        Err(CodecError::Decode(_))
    ));
}

/// Subscribers see the publisher go away instead of waiting forever
#[tokio::test]
async fn test_draft_feed_closes_with_screen() {
    let (draft_pub, mut drafts) = ChannelPublisher::<ExchangeOrder>::pair(
        Subjects::order_draft("ORDER-123"),
        &TransportConfig::default(),
    );
    draft_pub.publish(&btc_to_eth()).await.unwrap();
    drop(draft_pub);

    assert_eq!(drafts.next().await.unwrap(), btc_to_eth());
    let closed = tokio::time::timeout(Duration::from_secs(2), drafts.next())
        .await
        .expect("Timeout waiting for close");
    assert!(matches!(closed, Err(TransportError::ChannelClosed)));
}

/// Test the full draft -> verdict flow through channels
#[tokio::test]
async fn test_screen_handler_round_trip() {
    let _ = env_logger::try_init();

    let config = TransportConfig::default().with_encoding(Encoding::Binary);

    // === Setup Channels ===
    let order = btc_to_eth();
    let draft_subject = Subjects::order_draft(order.order_id());
    let (draft_pub, _draft_all) = ChannelPublisher::<ExchangeOrder>::pair(&draft_subject, &config);
    let mut handler_drafts = draft_pub.subscribe(Subjects::order_draft_all());
    let (requester, mut responder) =
        ChannelRequester::<ExchangeOrder, OrderResult>::pair(Subjects::ORDER_SUBMIT, &config);

    // === Handler: amend the fee on every submitted order ===
    let handler = tokio::spawn(async move {
        let draft = handler_drafts.next().await.expect("draft");

        let (mut submitted, reply) = responder.next().await.expect("request");
        assert_eq!(submitted, draft);

        submitted.set_network_fee(dec!(0.0025));
        reply
            .send(&OrderResult::amended(submitted))
            .expect("reply");
    });

    // === Screen: show the draft, then submit it ===
    draft_pub.publish(&order).await.unwrap();

    let result = tokio::time::timeout(Duration::from_secs(2), requester.request(&order))
        .await
        .expect("Timeout waiting for result")
        .unwrap();

    match result {
        OrderResult::Amended { order: amended } => {
            assert_eq!(amended.order_id(), "ORDER-123");
            assert_eq!(amended.network_fee(), dec!(0.0025));
            assert_eq!(amended.deposit_amount(), order.deposit_amount());
            assert_eq!(amended.transaction_fee(), order.transaction_fee());
        }
        other => panic!("Unexpected result: {:?}", other),
    }

    handler.await.unwrap();
}

/// A cancelled verdict carries the reason back
#[tokio::test]
async fn test_cancelled_result() {
    let _ = env_logger::try_init();

    let (requester, mut responder) = ChannelRequester::<ExchangeOrder, OrderResult>::pair(
        Subjects::ORDER_SUBMIT,
        &TransportConfig::default(),
    );

    let handler = tokio::spawn(async move {
        let (order, reply) = responder.next().await.expect("request");
        reply
            .send(&OrderResult::cancelled(order.order_id(), "quote expired"))
            .expect("reply");
    });

    let result = requester.request(&btc_to_eth()).await.unwrap();
    assert_eq!(result, OrderResult::cancelled("ORDER-123", "quote expired"));
    assert!(!result.is_confirmed());

    handler.await.unwrap();
}

/// Dropping the handler surfaces a closed channel instead of hanging
#[tokio::test]
async fn test_handler_gone() {
    let (requester, responder) = ChannelRequester::<ExchangeOrder, OrderResult>::pair(
        Subjects::ORDER_SUBMIT,
        &TransportConfig::default(),
    );

    let handler = tokio::spawn(async move {
        let mut responder = responder;
        // Take the request and walk away without replying
        let _request = responder.next().await;
    });

    let result = requester.request(&btc_to_eth()).await;
    assert!(matches!(result, Err(TransportError::ChannelClosed)));

    handler.await.unwrap();
}

/// Save across a lifecycle event and restore an equal, independent order
#[test]
fn test_snapshot_across_rotation() {
    let _ = env_logger::try_init();

    let store = SnapshotStore::new();
    let mut order = btc_to_eth();
    order.set_withdrawal_amount(dec!(7.25));

    store.save("exchange-screen", &order).unwrap();
    drop(order);

    // Screen comes back
    let restored = store.take("exchange-screen").unwrap().expect("snapshot");
    assert_eq!(restored.withdrawal_amount(), dec!(7.25));
    assert_eq!(restored.receive_address(), "0xabc...");
    assert!(store.is_empty());
}
