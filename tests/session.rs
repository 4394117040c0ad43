//! Multi-round session: drive the trader the way the harness does, handing
//! the state blob back on every step.

use prosperity_trader::belief::BeliefState;
use prosperity_trader::core::config::TraderConfig;
use prosperity_trader::{Order, OrderDepth, Symbol, Trader, TradingState};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn depth(bids: &[(i64, i64)], asks: &[(i64, i64)]) -> OrderDepth {
    OrderDepth {
        buy_orders: bids.iter().copied().collect(),
        sell_orders: asks.iter().copied().collect(),
    }
}

fn snapshot(timestamp: u64, kelp_book: OrderDepth, resin_book: OrderDepth, blob: &str) -> TradingState {
    let mut order_depths = std::collections::BTreeMap::new();
    order_depths.insert(Symbol::new("KELP"), kelp_book);
    order_depths.insert(Symbol::new("RAINFOREST_RESIN"), resin_book);
    TradingState {
        timestamp,
        trader_data: blob.to_string(),
        order_depths,
        ..TradingState::default()
    }
}

#[test]
fn long_session_keeps_state_bounded_and_trades_on_dislocations() {
    init_tracing();
    let trader = Trader::new(TraderConfig::default());
    let kelp = Symbol::new("KELP");
    let resin = Symbol::new("RAINFOREST_RESIN");

    let mut blob = String::new();
    let mut kelp_buy_steps = 0;

    for t in 0..80u64 {
        // Kelp sits at mid 2017 except for periodic downward dislocations
        // where the ask drops well below the smoothed fair value.
        let kelp_book = if t > 20 && t % 10 == 0 {
            depth(&[(2007, 6)], &[(2011, -4)])
        } else {
            depth(&[(2015, 6)], &[(2019, -4)])
        };
        // Resin book stays inside the band the whole session.
        let resin_book = depth(&[(10000, 5)], &[(10001, -5)]);

        let state = snapshot(t * 100, kelp_book, resin_book, &blob);
        let output = trader.run(&state);

        assert_eq!(output.conversions, 1);
        assert!(!output.trader_data.is_empty());
        assert!(!output.orders.contains_key(&resin));

        if let Some(orders) = output.orders.get(&kelp) {
            // A dislocated ask at 2011 sits far below the ~2017 EWMA.
            assert_eq!(orders[0], Order::new(kelp.clone(), 2011, 4));
            kelp_buy_steps += 1;
        }

        blob = output.trader_data;
    }

    assert!(kelp_buy_steps >= 5, "expected the EWMA strategy to lift dislocated asks");

    // Window bound law: 80 observations in, at most 50 retained.
    let beliefs = BeliefState::decode(&blob, trader.config()).unwrap();
    let window = beliefs.window(&kelp).unwrap();
    assert_eq!(window.bids.len(), 50);
    assert_eq!(window.asks.len(), 50);
}

#[test]
fn first_step_of_a_session_is_quiet_for_drifting_products() {
    let trader = Trader::new(TraderConfig::default());
    // Kelp is dislocated on the very first step, but there is no history
    // yet, so no fair value and no trade.
    let state = snapshot(
        0,
        depth(&[(2005, 6)], &[(2009, -4)]),
        depth(&[(10000, 5)], &[(10001, -5)]),
        "",
    );

    let output = trader.run(&state);
    assert!(output.orders.is_empty());

    // The same dislocation one step later does trade.
    let state = snapshot(
        100,
        depth(&[(2005, 6)], &[(2009, -4)]),
        depth(&[(10000, 5)], &[(10001, -5)]),
        &output.trader_data,
    );
    let output = trader.run(&state);
    assert!(output.orders.contains_key(&Symbol::new("KELP")));
}

#[test]
fn blob_survives_a_simulated_process_restart() {
    // Two separately constructed traders must agree through the blob alone.
    let first = Trader::new(TraderConfig::default());
    let state = snapshot(
        0,
        depth(&[(2015, 6)], &[(2019, -4)]),
        depth(&[(10000, 5)], &[(10001, -5)]),
        "",
    );
    let blob = first.run(&state).trader_data;
    drop(first);

    let second = Trader::new(TraderConfig::default());
    let beliefs = BeliefState::decode(&blob, second.config()).unwrap();
    let window = beliefs.window(&Symbol::new("KELP")).unwrap();
    assert_eq!(window.bids, [2015]);
    assert_eq!(window.asks, [2019]);
}
