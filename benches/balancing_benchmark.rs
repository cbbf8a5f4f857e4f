use criterion::{black_box, criterion_group, criterion_main, Criterion};
use swap_balancer::balancing::balancer::Balancer;
use swap_balancer::core::aggregate::Aggregate;
use swap_balancer::simulation::random_trades::{generate_random_trades, TradeGenConfig};

fn bench_aggregate_100k_trades(c: &mut Criterion) {
    let config = TradeGenConfig {
        trade_count: 100_000,
        seed: Some(1),
        ..Default::default()
    };
    let set = generate_random_trades(&config).unwrap();

    c.bench_function("aggregate_100k_trades", |b| {
        b.iter(|| Aggregate::from_trades(black_box(set.trades())))
    });
}

fn bench_balance_1k_trades(c: &mut Criterion) {
    let config = TradeGenConfig {
        trade_count: 1_000,
        seed: Some(2),
        ..Default::default()
    };
    let set = generate_random_trades(&config).unwrap();
    let balancer = Balancer::default();

    c.bench_function("balance_1k_trades", |b| {
        b.iter(|| balancer.balance(black_box(set.trades())))
    });
}

fn bench_balance_aggregate(c: &mut Criterion) {
    let config = TradeGenConfig {
        trade_count: 1_000,
        seed: Some(3),
        ..Default::default()
    };
    let set = generate_random_trades(&config).unwrap();
    let aggregate = Aggregate::from_trades(set.trades()).unwrap();
    let balancer = Balancer::default();

    c.bench_function("balance_aggregate", |b| {
        b.iter(|| balancer.balance_aggregate(black_box(&aggregate)))
    });
}

criterion_group!(
    benches,
    bench_aggregate_100k_trades,
    bench_balance_1k_trades,
    bench_balance_aggregate
);
criterion_main!(benches);
