use crate::{
    prelude::{
        AShare, AShareTable, BShare, BShareTable, PartyID, PartyTestNetwork, Rep3, RelationalProtocol,
        TestNetwork3p,
    },
    types::Data,
};
use plain_reference::PlainTable;
use rand::Rng;
use std::future::Future;

pub(crate) const NUM_PARTIES: usize = PartyTestNetwork::NUM_PARTIES;

/// Runs `f` once per party, each on its own thread with a current-thread
/// runtime, and collects the results in rank order.
pub(crate) fn run_parties<I, T, F, Fut>(inputs: [I; NUM_PARTIES], f: F) -> Vec<T>
where
    I: Send + 'static,
    T: Send + 'static,
    F: FnOnce(PartyTestNetwork, I) -> Fut + Copy + Send + 'static,
    Fut: Future<Output = T>,
{
    let network = TestNetwork3p::new();
    let net = network.get_party_networks();

    let mut tasks = Vec::with_capacity(NUM_PARTIES);
    for (n, input) in net.into_iter().zip(inputs) {
        let t = std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("runtime builds");
            rt.block_on(f(n, input))
        });
        tasks.push(t);
    }

    tasks
        .into_iter()
        .map(|t| t.join().expect("Task exited normally"))
        .collect()
}

/// All parties have to agree on every opened value.
pub(crate) fn assert_all_equal<T: PartialEq + std::fmt::Debug + Clone>(results: &[T]) -> T {
    let r0 = &results[0];
    for r in results.iter().skip(1) {
        assert_eq!(r0, r);
    }
    r0.to_owned()
}

pub(crate) async fn engine(net: PartyTestNetwork) -> Rep3<PartyTestNetwork> {
    let mut protocol = Rep3::new(net).unwrap();
    protocol.setup_prf().await.unwrap();
    protocol
}

pub(crate) async fn relational(net: PartyTestNetwork) -> RelationalProtocol<PartyTestNetwork> {
    RelationalProtocol::new(engine(net).await)
}

pub(crate) fn share_b_many<R: Rng>(values: &[Data], rng: &mut R) -> [Vec<BShare>; 3] {
    let mut res: [Vec<BShare>; 3] = Default::default();
    for v in values {
        let shares = Rep3::<PartyTestNetwork>::share_b(*v, rng);
        for (r, s) in res.iter_mut().zip(shares) {
            r.push(s);
        }
    }
    res
}

pub(crate) fn share_a_many<R: Rng>(values: &[Data], rng: &mut R) -> [Vec<AShare>; 3] {
    let mut res: [Vec<AShare>; 3] = Default::default();
    for v in values {
        let shares = Rep3::<PartyTestNetwork>::share_a(*v, rng);
        for (r, s) in res.iter_mut().zip(shares) {
            r.push(s);
        }
    }
    res
}

pub(crate) fn share_bits<R: Rng>(bits: &[bool], rng: &mut R) -> [Vec<BShare>; 3] {
    let values: Vec<Data> = bits.iter().map(|b| Data::from(*b)).collect();
    share_b_many(&values, rng)
}

pub(crate) fn share_table<R: Rng>(plain: &PlainTable, owner: usize, rng: &mut R) -> [BShareTable; 3] {
    let mut rows: [Vec<Vec<BShare>>; 3] = Default::default();
    for row in plain.rows() {
        let [s0, s1, s2] = share_b_many(row, rng);
        rows[0].push(s0);
        rows[1].push(s1);
        rows[2].push(s2);
    }
    let [r0, r1, r2] = rows;
    [
        BShareTable::from_rows(owner, PartyID::ID0, 0, r0).unwrap(),
        BShareTable::from_rows(owner, PartyID::ID1, 0, r1).unwrap(),
        BShareTable::from_rows(owner, PartyID::ID2, 0, r2).unwrap(),
    ]
}

pub(crate) fn share_a_table<R: Rng>(
    plain: &PlainTable,
    owner: usize,
    rng: &mut R,
) -> [AShareTable; 3] {
    let mut rows: [Vec<Vec<AShare>>; 3] = Default::default();
    for row in plain.rows() {
        let [s0, s1, s2] = share_a_many(row, rng);
        rows[0].push(s0);
        rows[1].push(s1);
        rows[2].push(s2);
    }
    let [r0, r1, r2] = rows;
    [
        AShareTable::from_rows(owner, PartyID::ID0, 0, r0).unwrap(),
        AShareTable::from_rows(owner, PartyID::ID1, 0, r1).unwrap(),
        AShareTable::from_rows(owner, PartyID::ID2, 0, r2).unwrap(),
    ]
}

/// Opens a whole table to everybody, row-major.
pub(crate) async fn open_table(
    protocol: &mut RelationalProtocol<PartyTestNetwork>,
    table: &BShareTable,
) -> Vec<Vec<Data>> {
    let width = table.num_cols();
    let open = protocol
        .get_mpc_mut()
        .open_b_many(table.contents().to_vec())
        .await
        .unwrap();
    open.chunks(width).map(<[Data]>::to_vec).collect()
}

pub(crate) fn bools(values: &[Data]) -> Vec<bool> {
    values.iter().map(|v| *v == 1).collect()
}
