//! Order lifecycle integration tests.
//!
//! Exercises the status machine through the use cases and the cancel →
//! release flow into the stock engine.

use std::sync::Arc;

use test_case::test_case;

use inventory_engine::{
    ActorId, CancelOrderUseCase, CreateOrderCommand, CreateStockCommand, EngineConfig,
    InMemoryInventoryStore, InMemoryOrderRepository, LocationId, NoOpEventPublisher, Order,
    OrderError, OrderId, OrderLine, OrderRepository, OrderStateMachine, OrderStatus, Quantity,
    ReservationStatus, ReserveStockCommand, SkuId, StockEngine, Timestamp,
    UpdateOrderStatusUseCase,
};

struct Fixture {
    orders: Arc<InMemoryOrderRepository>,
    engine: Arc<StockEngine<InMemoryInventoryStore, NoOpEventPublisher>>,
    update: UpdateOrderStatusUseCase<InMemoryOrderRepository, NoOpEventPublisher>,
    cancel: CancelOrderUseCase<InMemoryOrderRepository, InMemoryInventoryStore, NoOpEventPublisher>,
}

fn fixture() -> Fixture {
    let orders = Arc::new(InMemoryOrderRepository::new());
    let publisher = Arc::new(NoOpEventPublisher);
    let engine = Arc::new(StockEngine::new(
        Arc::new(InMemoryInventoryStore::new()),
        Arc::clone(&publisher),
        EngineConfig::default(),
    ));
    let update = UpdateOrderStatusUseCase::new(Arc::clone(&orders), Arc::clone(&publisher));
    let cancel = CancelOrderUseCase::new(Arc::clone(&orders), Arc::clone(&engine), publisher);
    Fixture {
        orders,
        engine,
        update,
        cancel,
    }
}

fn new_order(f: &Fixture, sku: &str, quantity: i64) -> OrderId {
    let order = Order::new(
        CreateOrderCommand {
            placed_by: ActorId::new("user-1"),
            lines: vec![OrderLine {
                sku_id: SkuId::new(sku),
                quantity: Quantity::new(quantity),
            }],
        },
        Timestamp::now(),
    )
    .unwrap();
    let id = order.id().clone();
    f.orders.add(order);
    id
}

/// The allowed transitions, spelled out for the closure check.
fn allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::{Cancelled, Confirmed, Delivered, Pending, Processing, Refunded, Shipped};
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Cancelled)
            | (Confirmed, Processing)
            | (Confirmed, Cancelled)
            | (Processing, Shipped)
            | (Processing, Cancelled)
            | (Shipped, Delivered)
            | (Delivered, Refunded)
    )
}

// Scenario: the happy path succeeds step by step.
#[tokio::test]
async fn happy_path_to_shipped() {
    let f = fixture();
    let id = new_order(&f, "A", 2);
    let actor = ActorId::new("ops");

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
    ] {
        let order = f
            .update
            .execute(&id, target, actor.clone(), None, None)
            .await
            .unwrap();
        assert_eq!(order.status(), target);
    }

    let stored = f.orders.find_by_id(&id).await.unwrap().unwrap();
    // Initial row plus three transitions.
    assert_eq!(stored.history().len(), 4);
}

// Scenario: skipping Shipped is rejected.
#[tokio::test]
async fn processing_cannot_jump_to_delivered() {
    let f = fixture();
    let id = new_order(&f, "A", 2);
    let actor = ActorId::new("ops");

    f.update
        .execute(&id, OrderStatus::Confirmed, actor.clone(), None, None)
        .await
        .unwrap();
    f.update
        .execute(&id, OrderStatus::Processing, actor.clone(), None, None)
        .await
        .unwrap();

    let err = f
        .update
        .execute(&id, OrderStatus::Delivered, actor, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));
}

// Transition closure: the machine accepts exactly the table over the full
// cross-product of states.
#[test]
fn transition_closure_over_full_cross_product() {
    for from in OrderStatus::ALL {
        for to in OrderStatus::ALL {
            assert_eq!(
                OrderStateMachine::is_valid_transition(from, to),
                allowed(from, to),
                "mismatch for {from} -> {to}"
            );
        }
    }
}

#[test_case(OrderStatus::Pending, OrderStatus::Confirmed, true; "pending to confirmed")]
#[test_case(OrderStatus::Pending, OrderStatus::Cancelled, true; "pending to cancelled")]
#[test_case(OrderStatus::Confirmed, OrderStatus::Processing, true; "confirmed to processing")]
#[test_case(OrderStatus::Processing, OrderStatus::Shipped, true; "processing to shipped")]
#[test_case(OrderStatus::Shipped, OrderStatus::Delivered, true; "shipped to delivered")]
#[test_case(OrderStatus::Delivered, OrderStatus::Refunded, true; "delivered to refunded")]
#[test_case(OrderStatus::Shipped, OrderStatus::Cancelled, false; "shipped cannot cancel via table")]
#[test_case(OrderStatus::Cancelled, OrderStatus::Refunded, false; "cancelled cannot refund")]
#[test_case(OrderStatus::Refunded, OrderStatus::Pending, false; "refunded is terminal")]
#[test_case(OrderStatus::Delivered, OrderStatus::Cancelled, false; "delivered cannot cancel")]
fn transition_table_rows(from: OrderStatus, to: OrderStatus, expected: bool) {
    assert_eq!(OrderStateMachine::is_valid_transition(from, to), expected);
}

// Cancellation releases the order's stock holds.
#[tokio::test]
async fn cancel_order_releases_stock() {
    let f = fixture();
    let id = new_order(&f, "A", 6);

    f.engine
        .create_stock(CreateStockCommand {
            sku_id: SkuId::new("A"),
            location_id: LocationId::new("W1"),
            initial_quantity: Quantity::new(10),
            reorder_point: None,
            max_stock: None,
        })
        .await
        .unwrap();
    f.engine
        .reserve(ReserveStockCommand {
            sku_id: SkuId::new("A"),
            location_id: LocationId::new("W1"),
            order_id: id.clone(),
            quantity: Quantity::new(6),
            reserved_by: ActorId::new("user-1"),
            expiration_minutes: None,
        })
        .await
        .unwrap();

    let outcome = f
        .cancel
        .execute(&id, "payment failed", ActorId::new("system"))
        .await
        .unwrap();

    assert_eq!(outcome.order.status(), OrderStatus::Cancelled);
    assert_eq!(outcome.released, 1);

    let stock = f
        .engine
        .get_stock(&SkuId::new("A"), &LocationId::new("W1"))
        .await
        .unwrap();
    assert_eq!(stock.available(), Quantity::new(10));
    assert_eq!(stock.reserved(), Quantity::ZERO);

    let holds = f.engine.get_reservations_for_order(&id).await.unwrap();
    assert_eq!(holds[0].status(), ReservationStatus::Cancelled);
}

// Cancellation from Confirmed releases holds across several records.
#[tokio::test]
async fn cancel_confirmed_order_with_multiple_holds() {
    let f = fixture();
    let id = new_order(&f, "A", 2);
    let actor = ActorId::new("user-1");

    for sku in ["A", "B"] {
        f.engine
            .create_stock(CreateStockCommand {
                sku_id: SkuId::new(sku),
                location_id: LocationId::new("W1"),
                initial_quantity: Quantity::new(10),
                reorder_point: None,
                max_stock: None,
            })
            .await
            .unwrap();
        f.engine
            .reserve(ReserveStockCommand {
                sku_id: SkuId::new(sku),
                location_id: LocationId::new("W1"),
                order_id: id.clone(),
                quantity: Quantity::new(3),
                reserved_by: actor.clone(),
                expiration_minutes: None,
            })
            .await
            .unwrap();
    }

    f.update
        .execute(&id, OrderStatus::Confirmed, actor.clone(), None, None)
        .await
        .unwrap();

    let outcome = f.cancel.execute(&id, "fraud check", actor).await.unwrap();
    assert_eq!(outcome.released, 2);

    for sku in ["A", "B"] {
        let stock = f
            .engine
            .get_stock(&SkuId::new(sku), &LocationId::new("W1"))
            .await
            .unwrap();
        assert_eq!(stock.available(), Quantity::new(10));
    }
}

#[tokio::test]
async fn cancelled_order_cannot_move_again() {
    let f = fixture();
    let id = new_order(&f, "A", 2);
    let actor = ActorId::new("user-1");

    f.cancel
        .execute(&id, "mind changed", actor.clone())
        .await
        .unwrap();

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Refunded,
    ] {
        let err = f
            .update
            .execute(&id, target, actor.clone(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }
}

#[tokio::test]
async fn refund_only_after_delivery() {
    let f = fixture();
    let id = new_order(&f, "A", 2);
    let actor = ActorId::new("ops");

    let err = f
        .update
        .execute(&id, OrderStatus::Refunded, actor.clone(), None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::InvalidTransition { .. }));

    for target in [
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Refunded,
    ] {
        f.update
            .execute(&id, target, actor.clone(), None, None)
            .await
            .unwrap();
    }

    let stored = f.orders.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(stored.status(), OrderStatus::Refunded);
}

// The status history is a faithful, append-only trail.
#[tokio::test]
async fn history_records_every_transition_with_actor_and_reason() {
    let f = fixture();
    let id = new_order(&f, "A", 2);

    f.update
        .execute(
            &id,
            OrderStatus::Confirmed,
            ActorId::new("payments"),
            Some("card authorized".to_string()),
            Some("auth code 1234".to_string()),
        )
        .await
        .unwrap();

    let stored = f.orders.find_by_id(&id).await.unwrap().unwrap();
    let last = stored.history().last().unwrap();
    assert_eq!(last.from_status, OrderStatus::Pending);
    assert_eq!(last.to_status, OrderStatus::Confirmed);
    assert_eq!(last.changed_by, ActorId::new("payments"));
    assert_eq!(last.reason.as_deref(), Some("card authorized"));
    assert_eq!(last.notes.as_deref(), Some("auth code 1234"));
}
