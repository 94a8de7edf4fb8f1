use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plain_reference::PlainTable;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use secrecy_mpc::prelude::{
    BShare, BShareTable, PartyID, PartyTestNetwork, Rep3, RelationalProtocol, TestNetwork3p,
};

const NUM_VALUES: usize = 1024;
const NUM_ROWS: usize = 256;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime builds")
}

fn share_values(values: &[u64], rng: &mut SmallRng) -> [Vec<BShare>; 3] {
    let mut res: [Vec<BShare>; 3] = Default::default();
    for v in values {
        let shares = Rep3::<PartyTestNetwork>::share_b(*v, rng);
        for (r, s) in res.iter_mut().zip(shares) {
            r.push(s);
        }
    }
    res
}

fn share_table(plain: &PlainTable, rng: &mut SmallRng) -> [BShareTable; 3] {
    let mut rows: [Vec<Vec<BShare>>; 3] = Default::default();
    for row in plain.rows() {
        for (r, s) in rows.iter_mut().zip(share_values(row, rng)) {
            r.push(s);
        }
    }
    let [r0, r1, r2] = rows;
    [
        BShareTable::from_rows(0, PartyID::ID0, 0, r0).expect("rows have equal width"),
        BShareTable::from_rows(0, PartyID::ID1, 0, r1).expect("rows have equal width"),
        BShareTable::from_rows(0, PartyID::ID2, 0, r2).expect("rows have equal width"),
    ]
}

async fn compare_party(net: PartyTestNetwork, x: Vec<BShare>, y: Vec<BShare>, eq: bool) {
    let mut protocol = Rep3::new(net).expect("three parties");
    protocol.setup_prf().await.expect("prf setup works");
    let res = if eq {
        protocol.eq_many(&x, &y).await
    } else {
        protocol.greater_many(&x, &y).await
    };
    black_box(res.expect("comparison works"));
}

fn bench_compare(c: &mut Criterion) {
    let mut rng = SmallRng::from_entropy();
    let x: Vec<u64> = (0..NUM_VALUES).map(|_| rng.gen()).collect();
    let y: Vec<u64> = (0..NUM_VALUES).map(|_| rng.gen()).collect();
    let [x0, x1, x2] = share_values(&x, &mut rng);
    let [y0, y1, y2] = share_values(&y, &mut rng);
    let rt = runtime();

    for (name, eq) in [("eq", true), ("greater", false)] {
        c.bench_function(&format!("{} {}", name, NUM_VALUES), |b| {
            b.to_async(&rt).iter(|| async {
                let [n0, n1, n2] = TestNetwork3p::new().get_party_networks();
                tokio::join!(
                    compare_party(n0, x0.clone(), y0.clone(), eq),
                    compare_party(n1, x1.clone(), y1.clone(), eq),
                    compare_party(n2, x2.clone(), y2.clone(), eq),
                )
            })
        });
    }
}

async fn sort_party(net: PartyTestNetwork, mut table: BShareTable, group: bool) {
    let mut protocol = RelationalProtocol::new(Rep3::new(net).expect("three parties"));
    protocol.preprocessing().await.expect("prf setup works");
    protocol
        .bitonic_sort(&mut table, &[0], &[true], NUM_ROWS / 2)
        .await
        .expect("sort works");
    if group {
        let counts = protocol
            .group_by_count(&mut table, &[0])
            .await
            .expect("group by works");
        black_box(counts);
    }
    black_box(table);
}

fn bench_sort(c: &mut Criterion) {
    let mut rng = SmallRng::from_entropy();
    let plain = PlainTable::random_rng(&mut rng, NUM_ROWS, 2, 32);
    let [t0, t1, t2] = share_table(&plain, &mut rng);
    let rt = runtime();

    for (name, group) in [("bitonic sort", false), ("sort + group by count", true)] {
        c.bench_function(&format!("{} {}", name, NUM_ROWS), |b| {
            b.to_async(&rt).iter(|| async {
                let [n0, n1, n2] = TestNetwork3p::new().get_party_networks();
                tokio::join!(
                    sort_party(n0, t0.clone(), group),
                    sort_party(n1, t1.clone(), group),
                    sort_party(n2, t2.clone(), group),
                )
            })
        });
    }
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_compare, bench_sort
}
criterion_main!(benches);
