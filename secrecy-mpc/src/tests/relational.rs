mod relational_test {
    use crate::{
        error::Error,
        prelude::{
            AShare, AShareTable, ArithPredicate, BShare, BShareTable, JoinOp, PartyTestNetwork,
            Predicate,
        },
        tests::helpers::{
            assert_all_equal, bools, open_table, relational, run_parties, share_a_many,
            share_a_table, share_bits, share_table,
        },
        types::{Data, SENTINEL},
    };
    use plain_reference::PlainTable;
    use rand::{rngs::SmallRng, Rng, SeedableRng};

    const S: Data = SENTINEL;

    fn signed_rows(rng: &mut SmallRng, rows: usize, cols: usize) -> PlainTable {
        PlainTable::from_rows(
            (0..rows)
                .map(|_| (0..cols).map(|_| rng.gen_range(-3i64..4) as Data).collect())
                .collect(),
        )
        .unwrap()
    }

    fn single_column(values: &[Data]) -> PlainTable {
        PlainTable::from_rows(values.iter().map(|v| vec![*v]).collect()).unwrap()
    }

    fn pair<A, B>(a: [A; 3], b: [B; 3]) -> [(A, B); 3] {
        let [a0, a1, a2] = a;
        let [b0, b1, b2] = b;
        [(a0, b0), (a1, b1), (a2, b2)]
    }

    async fn select_party(net: PartyTestNetwork, table: BShareTable) -> Vec<Vec<Data>> {
        let mut protocol = relational(net).await;
        let constant = BShare::constant(1);
        let predicates = [
            Predicate::Equal { left: 0, right: 1 },
            Predicate::Greater { left: 0, right: 1 },
            Predicate::GreaterEqual { left: 0, right: 1 },
            Predicate::GreaterConst { col: 0, constant },
            Predicate::EqualConst { col: 1, constant },
            Predicate::LessThanZero { col: 0 },
        ];
        let mut res = Vec::with_capacity(predicates.len() + 1);
        let mut bits = Vec::with_capacity(predicates.len());
        for p in predicates.iter() {
            bits.push(protocol.select(&table, p).await.unwrap());
        }
        let both = protocol.and_columns(&bits[0], &bits[5]).await.unwrap();
        bits.push(both);
        for b in bits {
            res.push(protocol.get_mpc_mut().open_b_many(b).await.unwrap());
        }
        protocol.finish().await.unwrap();
        res
    }

    #[test]
    fn select_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 32, 2);

        let results = run_parties(share_table(&plain, 0, &mut rng), select_party);
        let res = assert_all_equal(&results);
        for (i, row) in plain.rows().iter().enumerate() {
            let (a, b) = (row[0] as i64, row[1] as i64);
            assert_eq!(res[0][i], Data::from(a == b));
            assert_eq!(res[1][i], Data::from(a > b));
            assert_eq!(res[2][i], Data::from(a >= b));
            assert_eq!(res[3][i], Data::from(a > 1));
            assert_eq!(res[4][i], Data::from(b == 1));
            assert_eq!(res[5][i], Data::from(a < 0));
            assert_eq!(res[6][i], Data::from(a == b && a < 0));
        }
    }

    async fn select_bad_column_party(net: PartyTestNetwork, table: BShareTable) -> bool {
        let mut protocol = relational(net).await;
        let res = protocol
            .select(&table, &Predicate::Equal { left: 0, right: 7 })
            .await;
        matches!(res, Err(Error::InvalidColumn(7)))
    }

    #[test]
    fn select_invalid_column_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 4, 2);

        let results = run_parties(share_table(&plain, 0, &mut rng), select_bad_column_party);
        assert!(results.into_iter().all(|r| r));
    }

    async fn select_a_party(net: PartyTestNetwork, table: AShareTable) -> Vec<Vec<Data>> {
        let mut protocol = relational(net).await;
        let predicates = [
            ArithPredicate::Equal { left: 0, right: 1 },
            ArithPredicate::EqualConst {
                col: 1,
                constant: (-2i64) as Data,
            },
        ];
        let mut res = Vec::with_capacity(predicates.len());
        for p in predicates.iter() {
            let bits = protocol.select_a(&table, p).await.unwrap();
            res.push(protocol.get_mpc_mut().open_b_many(bits).await.unwrap());
        }
        protocol.finish().await.unwrap();
        res
    }

    #[test]
    fn select_a_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 32, 2);

        let results = run_parties(share_a_table(&plain, 0, &mut rng), select_a_party);
        let res = assert_all_equal(&results);
        for (i, row) in plain.rows().iter().enumerate() {
            let (a, b) = (row[0] as i64, row[1] as i64);
            assert_eq!(res[0][i], Data::from(a == b));
            assert_eq!(res[1][i], Data::from(b == -2));
        }
    }

    async fn join_party(
        net: PartyTestNetwork,
        (left, right): (BShareTable, BShareTable),
    ) -> Vec<Vec<Data>> {
        let mut protocol = relational(net).await;
        let mut res = Vec::new();
        for op in [JoinOp::Equal, JoinOp::Greater, JoinOp::GreaterEqual] {
            let bits = protocol
                .join_batch(&left, &right, 1, 0, op, 7)
                .await
                .unwrap();
            res.push(protocol.get_mpc_mut().open_b_many(bits).await.unwrap());
        }
        protocol.finish().await.unwrap();
        res
    }

    #[test]
    fn join_test() {
        let mut rng = SmallRng::from_entropy();
        let left = signed_rows(&mut rng, 6, 2);
        let right = signed_rows(&mut rng, 5, 1);

        let inputs = pair(
            share_table(&left, 0, &mut rng),
            share_table(&right, 1, &mut rng),
        );
        let results = run_parties(inputs, join_party);
        let res = assert_all_equal(&results);

        let l = left.column(1);
        let r = right.column(0);
        let eq = plain_reference::join_eq(&l, &r);
        assert_eq!(bools(&res[0]), eq);
        for (i, a) in l.iter().enumerate() {
            for (j, b) in r.iter().enumerate() {
                let p = i * r.len() + j;
                assert_eq!(res[1][p], Data::from(plain_reference::greater(*a, *b)));
                assert_eq!(res[2][p], Data::from(plain_reference::greater_equal(*a, *b)));
            }
        }
    }

    async fn adjacent_geq_party(net: PartyTestNetwork, table: BShareTable) -> (Vec<Data>, Vec<Data>) {
        let mut protocol = relational(net).await;
        let fwd = protocol.adjacent_geq(&table, 0, 1, 3, false).await.unwrap();
        let bwd = protocol.adjacent_geq(&table, 0, 1, 3, true).await.unwrap();
        let fwd = protocol.get_mpc_mut().open_b_many(fwd).await.unwrap();
        let bwd = protocol.get_mpc_mut().open_b_many(bwd).await.unwrap();
        protocol.finish().await.unwrap();
        (fwd, bwd)
    }

    #[test]
    fn adjacent_geq_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 10, 2);

        let results = run_parties(share_table(&plain, 0, &mut rng), adjacent_geq_party);
        let (fwd, bwd) = assert_all_equal(&results);
        assert_eq!(fwd.len(), 9);
        for k in 0..9 {
            let expect_fwd = plain_reference::greater_equal(plain.get(k, 0), plain.get(k + 1, 1));
            let expect_bwd = plain_reference::greater_equal(plain.get(k + 1, 0), plain.get(k, 1));
            assert_eq!(fwd[k], Data::from(expect_fwd));
            assert_eq!(bwd[k], Data::from(expect_bwd));
        }
    }

    async fn semi_join_party(
        net: PartyTestNetwork,
        (left, right): (BShareTable, BShareTable),
    ) -> Vec<Data> {
        let mut protocol = relational(net).await;
        let bits = protocol.semi_join(&left, &right, 0, 0, 3).await.unwrap();
        let open = protocol.get_mpc_mut().open_b_many(bits).await.unwrap();
        protocol.finish().await.unwrap();
        open
    }

    #[test]
    fn semi_join_test() {
        let mut rng = SmallRng::from_entropy();
        let left = single_column(&[1, 2, 3, 4, 5]);
        let right = single_column(&[1, 3, 5, 7]);

        let inputs = pair(
            share_table(&left, 0, &mut rng),
            share_table(&right, 1, &mut rng),
        );
        let results = run_parties(inputs, semi_join_party);
        assert_eq!(assert_all_equal(&results), vec![1, 0, 1, 0, 1]);
    }

    #[test]
    fn semi_join_duplicates_test() {
        let mut rng = SmallRng::from_entropy();
        let l = [1, 2, 3, 4, 5, 5, 5, 17, 0, 5555];
        let r = [1, 3, 5, 5555];

        let inputs = pair(
            share_table(&single_column(&l), 0, &mut rng),
            share_table(&single_column(&r), 1, &mut rng),
        );
        let results = run_parties(inputs, semi_join_party);
        let res = assert_all_equal(&results);
        assert_eq!(res, vec![1, 0, 1, 0, 1, 1, 1, 0, 0, 1]);
        assert_eq!(bools(&res), plain_reference::semi_join(&l, &r));
    }

    async fn semi_join_selected_party(
        net: PartyTestNetwork,
        ((left, right), sel): ((BShareTable, BShareTable), Vec<BShare>),
    ) -> Vec<Data> {
        let mut protocol = relational(net).await;
        let bits = protocol
            .semi_join_selected(&left, &right, 0, 0, &sel, 2)
            .await
            .unwrap();
        let open = protocol.get_mpc_mut().open_b_many(bits).await.unwrap();
        protocol.finish().await.unwrap();
        open
    }

    #[test]
    fn semi_join_selected_test() {
        let mut rng = SmallRng::from_entropy();
        let left = single_column(&[1, 2, 3, 4, 5]);
        let right = single_column(&[1, 3, 5, 7]);
        let sel = [true, false, true, true];

        let inputs = pair(
            pair(
                share_table(&left, 0, &mut rng),
                share_table(&right, 1, &mut rng),
            ),
            share_bits(&sel, &mut rng),
        );
        let results = run_parties(inputs, semi_join_selected_party);
        assert_eq!(assert_all_equal(&results), vec![1, 0, 0, 0, 1]);
    }

    async fn semi_join_size_party(
        net: PartyTestNetwork,
        (left, right): (BShareTable, BShareTable),
    ) -> bool {
        let mut protocol = relational(net).await;
        let res = protocol.semi_join(&left, &right, 0, 0, 4).await;
        matches!(res, Err(Error::NotPowerOfTwo(3)))
    }

    #[test]
    fn semi_join_not_power_of_two_test() {
        let mut rng = SmallRng::from_entropy();
        let inputs = pair(
            share_table(&single_column(&[1, 2]), 0, &mut rng),
            share_table(&single_column(&[1, 3, 5]), 1, &mut rng),
        );
        let results = run_parties(inputs, semi_join_size_party);
        assert!(results.into_iter().all(|r| r));
    }

    async fn distinct_party(net: PartyTestNetwork, table: BShareTable) -> (Vec<Data>, Vec<Data>) {
        let mut protocol = relational(net).await;
        let all = protocol.distinct(&table, 0).await.unwrap();
        let windowed = protocol.distinct_batch(&table, 0, 2).await.unwrap();
        let all = protocol.get_mpc_mut().open_b_many(all).await.unwrap();
        let windowed = protocol.get_mpc_mut().open_b_many(windowed).await.unwrap();
        protocol.finish().await.unwrap();
        (all, windowed)
    }

    #[test]
    fn distinct_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = single_column(&[1, 1, 2, 2, 2, 3]);

        let results = run_parties(share_table(&plain, 0, &mut rng), distinct_party);
        let (all, windowed) = assert_all_equal(&results);
        assert_eq!(all, vec![1, 0, 1, 0, 0, 1]);
        assert_eq!(windowed, all);
    }

    async fn mask_party(
        net: PartyTestNetwork,
        (mut table, sel): (BShareTable, Vec<BShare>),
    ) -> Vec<Vec<Data>> {
        let mut protocol = relational(net).await;
        protocol.mask(&mut table, &sel, 3).await.unwrap();
        let open = open_table(&mut protocol, &table).await;
        protocol.finish().await.unwrap();
        open
    }

    #[test]
    fn mask_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 8, 3);
        let sel: Vec<bool> = (0..8).map(|_| rng.gen()).collect();

        let inputs = pair(share_table(&plain, 0, &mut rng), share_bits(&sel, &mut rng));
        let results = run_parties(inputs, mask_party);
        let res = assert_all_equal(&results);

        let mut expected = plain.clone();
        expected.mask(&sel);
        assert_eq!(res, expected.rows());
    }

    async fn count_party(net: PartyTestNetwork, mut table: BShareTable) -> (Vec<Vec<Data>>, Vec<Data>) {
        let mut protocol = relational(net).await;
        let counts = protocol.group_by_count(&mut table, &[0]).await.unwrap();
        let rows = open_table(&mut protocol, &table).await;
        let counts = protocol.get_mpc_mut().open_a_many(counts).await.unwrap();
        protocol.finish().await.unwrap();
        (rows, counts)
    }

    #[test]
    fn group_by_count_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = single_column(&[1, 1, 2, 3, 3]);

        let results = run_parties(share_table(&plain, 0, &mut rng), count_party);
        let (rows, counts) = assert_all_equal(&results);
        assert_eq!(counts, vec![S, 2, 1, S, 2]);
        assert_eq!(rows, vec![vec![S], vec![1], vec![2], vec![S], vec![3]]);
    }

    fn group_by_rows() -> (PlainTable, Vec<bool>) {
        let table = PlainTable::from_rows(vec![
            vec![1, 42],
            vec![1, 42],
            vec![2, 42],
            vec![3, 42],
            vec![15, 42],
            vec![15, 43],
            vec![15, 44],
            vec![17, 1],
            vec![18, 1],
            vec![18, 1],
        ])
        .unwrap();
        let sel = [true, false, true, false, true, false, true, true, true, true];
        (table, sel.to_vec())
    }

    async fn count_selected_party(
        net: PartyTestNetwork,
        (mut table, sel): (BShareTable, Vec<BShare>),
    ) -> (Vec<Vec<Data>>, Vec<Data>) {
        let mut protocol = relational(net).await;
        let counts = protocol
            .group_by_count_selected(&mut table, &[0], &sel)
            .await
            .unwrap();
        let rows = open_table(&mut protocol, &table).await;
        let counts = protocol.get_mpc_mut().open_a_many(counts).await.unwrap();
        protocol.finish().await.unwrap();
        (rows, counts)
    }

    #[test]
    fn group_by_count_selected_test() {
        let mut rng = SmallRng::from_entropy();
        let (plain, sel) = group_by_rows();

        let inputs = pair(share_table(&plain, 0, &mut rng), share_bits(&sel, &mut rng));
        let results = run_parties(inputs, count_selected_party);
        let (rows, counts) = assert_all_equal(&results);
        assert_eq!(counts, vec![S, 1, 1, S, S, S, 2, 1, S, 2]);

        let mut expected = plain.clone();
        let expected_counts = plain_reference::group_by_count_selected(&mut expected, &[0], &sel);
        assert_eq!(counts, expected_counts);
        assert_eq!(rows, expected.rows());
        for masked in [0, 3, 4, 5, 8] {
            assert_eq!(rows[masked], vec![S, S]);
        }
    }

    async fn count_selected_messages(
        net: PartyTestNetwork,
        (table, sel): (BShareTable, Vec<BShare>),
    ) -> (usize, usize, Vec<Data>, Vec<Data>) {
        let mut protocol = relational(net).await;

        let mut empty_pool = table.clone();
        let before = protocol.get_mpc_mut().get_network_mut().messages_sent();
        let cold = protocol
            .group_by_count_selected(&mut empty_pool, &[0], &sel)
            .await
            .unwrap();
        let cold_messages = protocol.get_mpc_mut().get_network_mut().messages_sent() - before;

        protocol
            .get_mpc_mut()
            .preprocess_rand_bits(4 * sel.len())
            .await
            .unwrap();
        let mut filled_pool = table;
        let before = protocol.get_mpc_mut().get_network_mut().messages_sent();
        let warm = protocol
            .group_by_count_selected(&mut filled_pool, &[0], &sel)
            .await
            .unwrap();
        let warm_messages = protocol.get_mpc_mut().get_network_mut().messages_sent() - before;

        let cold = protocol.get_mpc_mut().open_a_many(cold).await.unwrap();
        let warm = protocol.get_mpc_mut().open_a_many(warm).await.unwrap();
        protocol.finish().await.unwrap();
        (cold_messages, warm_messages, cold, warm)
    }

    #[test]
    fn group_scan_fills_pool_once_test() {
        let mut rng = SmallRng::from_entropy();
        let mut plain = PlainTable::random_rng(&mut rng, 32, 2, 4);
        plain.sort(&[0], &[true]);
        let sel: Vec<bool> = (0..plain.num_rows()).map(|_| rng.gen()).collect();

        let inputs = pair(share_table(&plain, 0, &mut rng), share_bits(&sel, &mut rng));
        let results = run_parties(inputs, count_selected_messages);
        let (cold_messages, warm_messages, cold, warm) = assert_all_equal(&results);

        // three pool fills (selection, group bits, keep bits), two rounds each
        assert_eq!(cold_messages, warm_messages + 6);
        let mut expected = plain.clone();
        let expected_counts = plain_reference::group_by_count_selected(&mut expected, &[0], &sel);
        assert_eq!(cold, expected_counts);
        assert_eq!(warm, expected_counts);
    }

    async fn sum_selected_party(
        net: PartyTestNetwork,
        ((mut table, sel), values): ((BShareTable, Vec<BShare>), Vec<AShare>),
    ) -> (Vec<Vec<Data>>, Vec<Data>) {
        let mut protocol = relational(net).await;
        let sums = protocol
            .group_by_sum_selected(&mut table, &[0], &sel, &values)
            .await
            .unwrap();
        let rows = open_table(&mut protocol, &table).await;
        let sums = protocol.get_mpc_mut().open_a_many(sums).await.unwrap();
        protocol.finish().await.unwrap();
        (rows, sums)
    }

    #[test]
    fn group_by_sum_selected_test() {
        let mut rng = SmallRng::from_entropy();
        let (plain, sel) = group_by_rows();
        let values = plain.column(1);

        let inputs = pair(
            pair(share_table(&plain, 0, &mut rng), share_bits(&sel, &mut rng)),
            share_a_many(&values, &mut rng),
        );
        let results = run_parties(inputs, sum_selected_party);
        let (rows, sums) = assert_all_equal(&results);
        assert_eq!(sums, vec![S, 42, 42, S, S, S, 86, 1, S, 2]);

        let mut expected = plain.clone();
        let expected_sums =
            plain_reference::group_by_sum_selected(&mut expected, &[0], &sel, &values);
        assert_eq!(sums, expected_sums);
        assert_eq!(rows, expected.rows());
    }

    async fn min_max_party(
        net: PartyTestNetwork,
        (mut table, sel): (BShareTable, Vec<BShare>),
    ) -> Vec<Vec<Data>> {
        let mut protocol = relational(net).await;
        protocol
            .group_by_min_max_selected(&mut table, &[0, 1], &sel, 2, 3)
            .await
            .unwrap();
        let rows = open_table(&mut protocol, &table).await;
        protocol.finish().await.unwrap();
        rows
    }

    #[test]
    fn group_by_min_max_selected_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = PlainTable::from_rows(vec![
            vec![1, 10, 1, 1],
            vec![1, 10, 3, 3],
            vec![1, 10, 6, 6],
            vec![4, 11, 2, 12],
            vec![4, 12, 7, 7],
            vec![6, 12, 11, 11],
            vec![6, 12, 4, 4],
            vec![6, 12, 2, 2],
        ])
        .unwrap();
        let sel = vec![true, true, true, false, true, true, true, false];

        let inputs = pair(share_table(&plain, 0, &mut rng), share_bits(&sel, &mut rng));
        let results = run_parties(inputs, min_max_party);
        let rows = assert_all_equal(&results);

        let masked = vec![S; 4];
        assert_eq!(
            rows,
            vec![
                masked.clone(),
                masked.clone(),
                vec![1, 10, 1, 6],
                masked.clone(),
                vec![4, 12, 7, 7],
                masked.clone(),
                masked,
                vec![6, 12, 4, 11],
            ]
        );

        let mut expected = plain.clone();
        plain_reference::group_by_min_max_selected(&mut expected, &[0, 1], &sel, 2, 3);
        assert_eq!(rows, expected.rows());
    }

    async fn group_by_join_party(
        net: PartyTestNetwork,
        ((mut left, right), values): ((BShareTable, BShareTable), Vec<AShare>),
    ) -> (Vec<Vec<Data>>, Vec<Data>) {
        let mut protocol = relational(net).await;
        let sums = protocol
            .group_by_join(&mut left, &right, 0, 1, 0, &values, 2)
            .await
            .unwrap();
        let rows = open_table(&mut protocol, &left).await;
        let sums = protocol.get_mpc_mut().open_a_many(sums).await.unwrap();
        protocol.finish().await.unwrap();
        (rows, sums)
    }

    #[test]
    fn group_by_join_test() {
        let mut rng = SmallRng::from_entropy();
        let left = PlainTable::from_rows(vec![vec![1, 10], vec![1, 20], vec![2, 10], vec![3, 30]])
            .unwrap();
        let right = PlainTable::from_rows(vec![vec![10, 5], vec![20, 7], vec![10, 1], vec![40, 9]])
            .unwrap();
        let values = right.column(1);

        let inputs = pair(
            pair(
                share_table(&left, 0, &mut rng),
                share_table(&right, 1, &mut rng),
            ),
            share_a_many(&values, &mut rng),
        );
        let results = run_parties(inputs, group_by_join_party);
        let (rows, sums) = assert_all_equal(&results);
        assert_eq!(sums, vec![S, 13, 6, 0]);

        let mut expected = left.clone();
        let expected_sums =
            plain_reference::group_by_join(&mut expected, 0, 1, &right.column(0), &values);
        assert_eq!(sums, expected_sums);
        assert_eq!(rows, expected.rows());
    }

    async fn sort_party(
        net: PartyTestNetwork,
        (mut table, (keys, asc)): (BShareTable, (Vec<usize>, Vec<bool>)),
    ) -> Vec<Vec<Data>> {
        let mut protocol = relational(net).await;
        protocol
            .bitonic_sort(&mut table, &keys, &asc, 2)
            .await
            .unwrap();
        let rows = open_table(&mut protocol, &table).await;
        protocol.finish().await.unwrap();
        rows
    }

    fn sort_inputs(
        plain: &PlainTable,
        keys: &[usize],
        asc: &[bool],
        rng: &mut SmallRng,
    ) -> [(BShareTable, (Vec<usize>, Vec<bool>)); 3] {
        let order = (keys.to_vec(), asc.to_vec());
        pair(
            share_table(plain, 0, rng),
            [order.clone(), order.clone(), order],
        )
    }

    #[test]
    fn bitonic_sort_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = PlainTable::from_rows(vec![vec![2, 43], vec![1, 42], vec![3, 42], vec![15, 42]])
            .unwrap();

        let results = run_parties(sort_inputs(&plain, &[0], &[true], &mut rng), sort_party);
        let rows = assert_all_equal(&results);
        assert_eq!(
            rows,
            vec![vec![1, 42], vec![2, 43], vec![3, 42], vec![15, 42]]
        );
    }

    #[test]
    fn bitonic_sort_multi_key_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 16, 3);
        let keys = [1, 0];
        let asc = [true, false];

        let results = run_parties(sort_inputs(&plain, &keys, &asc, &mut rng), sort_party);
        let rows = assert_all_equal(&results);

        let mut expected = plain.clone();
        expected.sort(&keys, &asc);
        let project = |rows: &[Vec<Data>]| -> Vec<(Data, Data)> {
            rows.iter().map(|r| (r[1], r[0])).collect()
        };
        assert_eq!(project(&rows), project(expected.rows()));

        // same multiset of rows
        let mut got = rows.clone();
        let mut want = plain.rows().to_vec();
        got.sort();
        want.sort();
        assert_eq!(got, want);
    }

    async fn sort_size_party(
        net: PartyTestNetwork,
        (mut table, (keys, asc)): (BShareTable, (Vec<usize>, Vec<bool>)),
    ) -> bool {
        let mut protocol = relational(net).await;
        let res = protocol.bitonic_sort(&mut table, &keys, &asc, 2).await;
        matches!(res, Err(Error::NotPowerOfTwo(6)))
    }

    #[test]
    fn bitonic_sort_not_power_of_two_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 6, 1);

        let results = run_parties(sort_inputs(&plain, &[0], &[true], &mut rng), sort_size_party);
        assert!(results.into_iter().all(|r| r));
    }

    async fn sort_group_party(net: PartyTestNetwork, mut table: BShareTable) -> (Vec<Data>, Vec<Vec<Data>>, Vec<Data>) {
        let mut protocol = relational(net).await;
        protocol
            .bitonic_sort(&mut table, &[0], &[true], 4)
            .await
            .unwrap();
        let distinct = protocol.distinct(&table, 0).await.unwrap();
        let distinct = protocol.get_mpc_mut().open_b_many(distinct).await.unwrap();
        let counts = protocol.group_by_count(&mut table, &[0]).await.unwrap();
        let rows = open_table(&mut protocol, &table).await;
        let counts = protocol.get_mpc_mut().open_a_many(counts).await.unwrap();
        protocol.finish().await.unwrap();
        (distinct, rows, counts)
    }

    #[test]
    fn sort_then_group_test() {
        let mut rng = SmallRng::from_entropy();
        let values: Vec<Data> = (0..32).map(|_| rng.gen_range(0..6)).collect();
        let plain = single_column(&values);

        let results = run_parties(share_table(&plain, 0, &mut rng), sort_group_party);
        let (distinct, rows, counts) = assert_all_equal(&results);

        let mut expected = plain.clone();
        expected.sort(&[0], &[true]);
        assert_eq!(bools(&distinct), plain_reference::distinct(&expected.column(0)));
        let expected_counts = plain_reference::group_by_count(&mut expected, &[0]);
        assert_eq!(counts, expected_counts);
        assert_eq!(rows, expected.rows());
    }

    #[test]
    fn share_table_roundtrip_test() {
        let mut rng = SmallRng::from_entropy();
        let plain = signed_rows(&mut rng, 4, 2);
        let [t0, t1, t2] = share_table(&plain, 0, &mut rng);
        for (i, row) in plain.rows().iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                // party i holds (s_i, s_{i+1})
                let s0 = t0.get(i, j).unwrap().get_a();
                let s1 = t1.get(i, j).unwrap().get_a();
                let s2 = t2.get(i, j).unwrap().get_a();
                assert_eq!(s0 ^ s1 ^ s2, *v);
                assert_eq!(t0.get(i, j).unwrap().get_b(), s1);
            }
        }
    }
}
