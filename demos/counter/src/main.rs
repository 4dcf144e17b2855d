//! Counter walkthrough: `counter + + +5 - -2`
//!
//! `+` / `-` step by one, `+N` / `-N` step by N. Set `RUST_LOG=debug` to
//! watch the store work.

use anyhow::{Context, bail};
use repose_store::*;

#[derive(Clone, Debug, PartialEq)]
struct Counter {
    value: i64,
}

fn counter_slice() -> Slice<Counter> {
    Slice::new("counter", Counter { value: 0 })
        .case("increment", |s, _| {
            s.value += 1;
            Ok(())
        })
        .case("decrement", |s, _| {
            s.value -= 1;
            Ok(())
        })
        .case("incrementByAmount", |s, a| {
            s.value += *a.require_payload::<i64>()?;
            Ok(())
        })
        .case("decrementByAmount", |s, a| {
            s.value -= *a.require_payload::<i64>()?;
            Ok(())
        })
}

fn parse(op: &str, actions: &ActionCreators) -> anyhow::Result<Action> {
    let amount = |n: &str| -> anyhow::Result<i64> {
        n.parse().with_context(|| format!("bad amount in '{op}'"))
    };
    let action = match op {
        "+" => actions.action("increment"),
        "-" => actions.action("decrement"),
        _ => {
            if let Some(n) = op.strip_prefix('+') {
                actions.action_with("incrementByAmount", amount(n)?)
            } else if let Some(n) = op.strip_prefix('-') {
                actions.action_with("decrementByAmount", amount(n)?)
            } else {
                bail!("unknown operation '{op}' (expected +, -, +N or -N)")
            }
        }
    };
    Ok(action)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let slice = counter_slice();
    let actions = slice.creators();

    let mut registry = ReducerRegistry::new();
    registry.register_slice(slice)?;
    let store = Store::with_config(
        &registry,
        StoreConfig {
            name: "counter-demo".into(),
            ..StoreConfig::default()
        },
    );

    let _printer = store.select(
        |s: &Snapshot| s.get::<Counter>("counter").map_or(0, |c| c.value),
        |value: &i64| println!("Value: {value}"),
    );

    let ops: Vec<String> = std::env::args().skip(1).collect();
    if ops.is_empty() {
        log::info!("no operations given; try `counter + + +5`");
    }
    for op in &ops {
        store.dispatch(parse(op, &actions)?)?;
    }

    for record in store.history() {
        log::info!(
            "{} (changed: {}, {:?})",
            record.kind,
            record.changed,
            record.elapsed
        );
    }
    println!("Final: {:?}", store.get_state());
    Ok(())
}
