use criterion::{black_box, criterion_group, criterion_main, Criterion};
use densecan::cluster::{sweep, Dbscan, PointStore};
use rand::prelude::*;

fn blobs(n: usize, d: usize, rng: &mut StdRng) -> Vec<Vec<f64>> {
    let centers = [0.0, 20.0, 40.0];
    (0..n)
        .map(|i| {
            let c = centers[i % centers.len()];
            (0..d).map(|_| c + rng.random::<f64>() * 4.0).collect()
        })
        .collect()
}

fn bench_dbscan(c: &mut Criterion) {
    let mut group = c.benchmark_group("dbscan");

    let mut rng = StdRng::seed_from_u64(42);
    let store = PointStore::load(blobs(1000, 3, &mut rng)).unwrap();

    group.bench_function("fit_n1000_d3", |b| {
        b.iter(|| {
            let model = Dbscan::new(1.0, 4).with_cluster_dim(3);
            model.fit(black_box(&store)).unwrap();
        })
    });

    group.bench_function("region_query_n1000_d3", |b| {
        let target = [20.0, 20.0, 20.0];
        b.iter(|| store.region_query(black_box(&target), 3, 1.0).unwrap())
    });

    group.bench_function("sweep_4_configs_n1000_d3", |b| {
        let configs: Vec<Dbscan> = [0.5, 1.0, 1.5, 2.0]
            .iter()
            .map(|&eps| Dbscan::new(eps, 4))
            .collect();
        b.iter(|| sweep::fit_all(black_box(&store), &configs))
    });

    group.finish();
}

criterion_group!(benches, bench_dbscan);
criterion_main!(benches);
