//! Property tests: every kernel against a brute-force double loop.

use proptest::prelude::*;
use u_cutscan::cut::{BoxColumns, CutTable};
use u_cutscan::data::Table;
use u_cutscan::scan::{RgsEngine, ScanConfig, ScanStrategy};

const CODES: [&str; 7] = [">", "<", ">|", "<|", "==", "ladder>", "ladder<"];

fn brute(code: &str, v: f64, t: f64) -> bool {
    match code {
        ">" | "ladder>" => v > t,
        "<" | "ladder<" => v < t,
        ">|" => v.abs() > t,
        "<|" => v.abs() < t,
        "==" => v == t,
        other => panic!("unexpected code {other}"),
    }
}

fn small() -> impl Strategy<Value = f64> {
    (-5i32..=5).prop_map(f64::from)
}

fn cut_rows(width: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(small(), width), 1..12)
}

/// Events as (a, b, weight) with small integer weights so sums are exact.
fn events() -> impl Strategy<Value = Vec<(f64, f64, f64)>> {
    prop::collection::vec((small(), small(), (0u8..4).prop_map(f64::from)), 1..40)
}

fn event_table(events: &[(f64, f64, f64)]) -> Table {
    Table::new(
        vec!["b", "w", "a"],
        events.iter().map(|&(a, b, w)| vec![b, w, a]).collect(),
    )
    .unwrap()
}

fn configs() -> Vec<ScanConfig> {
    vec![
        ScanConfig::default(),
        ScanConfig::default().with_parallel(false),
        ScanConfig::reference(),
        ScanConfig::default().with_pruning(false),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counts_match_brute_force(
        cuts in cut_rows(2),
        evts in events(),
        code_a in prop::sample::select(CODES.to_vec()),
        code_b in prop::sample::select(CODES.to_vec()),
    ) {
        let table = Table::new(vec!["a", "b"], cuts.clone()).unwrap();
        let data = event_table(&evts);
        let total: f64 = evts.iter().map(|e| e.2).sum();

        for config in configs() {
            let mut engine = RgsEngine::new(CutTable::new(table.clone()).unwrap()).with_config(config);
            engine.add("d", &data, Some("w")).unwrap();
            let result = engine.run(&["a", "b"], &[code_a, code_b]).unwrap();

            prop_assert_eq!(result.total(0).unwrap(), total);
            for (c, row) in cuts.iter().enumerate() {
                let expected: f64 = evts
                    .iter()
                    .filter(|&&(a, b, _)| brute(code_a, a, row[0]) && brute(code_b, b, row[1]))
                    .map(|e| e.2)
                    .sum();
                let count = result.count(0, c).unwrap();
                prop_assert_eq!(count, expected, "cut-point {} {:?}", c, row);
                prop_assert!(count <= total);
            }
        }
    }

    #[test]
    fn box_matches_brute_force(
        bounds in prop::collection::vec((small(), small(), small()), 1..10),
        evts in events(),
    ) {
        let rows: Vec<Vec<f64>> = bounds
            .iter()
            .map(|&(x, y, t)| vec![x.min(y), t, x.max(y)])
            .collect();
        let table = Table::new(vec!["a_low", "b", "a_high"], rows.clone()).unwrap();
        let data = event_table(&evts);

        for config in configs() {
            let cut_table = CutTable::with_boxes(table.clone(), &[BoxColumns::suffixed("a")]).unwrap();
            let mut engine = RgsEngine::new(cut_table).with_config(config);
            engine.add("d", &data, Some("w")).unwrap();
            let result = engine.run(&["b", "a"], &[">", "<>"]).unwrap();
            for (c, row) in rows.iter().enumerate() {
                let expected: f64 = evts
                    .iter()
                    .filter(|&&(a, b, _)| b > row[1] && row[0] <= a && a <= row[2])
                    .map(|e| e.2)
                    .sum();
                prop_assert_eq!(result.count(0, c).unwrap(), expected);
            }
        }
    }

    #[test]
    fn ladder_counts_are_monotone(
        mut a_cuts in prop::collection::vec(small(), 2..15),
        mut b_cuts in prop::collection::vec((0i32..=5).prop_map(f64::from), 2..15),
        evts in events(),
    ) {
        let n = a_cuts.len().min(b_cuts.len());
        a_cuts.truncate(n);
        b_cuts.truncate(n);
        a_cuts.sort_by(f64::total_cmp);
        b_cuts.sort_by(|x, y| y.total_cmp(x));
        let rows: Vec<Vec<f64>> = a_cuts.iter().zip(&b_cuts).map(|(&a, &b)| vec![a, b]).collect();

        let mut engine = RgsEngine::new(CutTable::new(Table::new(vec!["a", "b"], rows).unwrap()).unwrap());
        engine.add("d", &event_table(&evts), Some("w")).unwrap();
        let result = engine.run(&["a", "b"], &["ladder>", "<|"]).unwrap();

        prop_assert_eq!(result.strategy(0).unwrap(), ScanStrategy::Chain);
        let counts = result.counts(0).unwrap();
        for w in counts.windows(2) {
            prop_assert!(w[1] <= w[0], "{:?}", counts);
        }
    }

    #[test]
    fn reruns_are_identical(
        cuts in cut_rows(2),
        evts in events(),
        code_a in prop::sample::select(CODES.to_vec()),
    ) {
        let mut engine = RgsEngine::new(CutTable::new(Table::new(vec!["a", "b"], cuts).unwrap()).unwrap());
        engine.add("d", &event_table(&evts), Some("w")).unwrap();
        engine.add("unweighted", &event_table(&evts), None).unwrap();
        let first = engine.run(&["a", "b"], &[code_a, ">"]).unwrap().clone();
        let second = engine.run(&["a", "b"], &[code_a, ">"]).unwrap().clone();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn degenerate_box_equals_eq(
        points in prop::collection::vec(small(), 1..10),
        evts in events(),
    ) {
        let data = event_table(&evts);

        let eq_table = Table::new(vec!["a"], points.iter().map(|&p| vec![p]).collect()).unwrap();
        let mut eq_engine = RgsEngine::new(CutTable::new(eq_table).unwrap());
        eq_engine.add("d", &data, Some("w")).unwrap();
        let eq = eq_engine.run(&["a"], &["=="]).unwrap().clone();

        let box_table = Table::new(
            vec!["a_low", "a_high"],
            points.iter().map(|&p| vec![p, p]).collect(),
        )
        .unwrap();
        let mut box_engine =
            RgsEngine::new(CutTable::with_boxes(box_table, &[BoxColumns::suffixed("a")]).unwrap());
        box_engine.add("d", &data, Some("w")).unwrap();
        let boxed = box_engine.run(&["a"], &["<>"]).unwrap();

        prop_assert_eq!(eq.counts(0).unwrap(), boxed.counts(0).unwrap());
        prop_assert_eq!(eq.totals(), boxed.totals());
    }
}

#[test]
fn correlated_event_is_excluded_everywhere() {
    let cuts = Table::new(
        vec!["pt", "eta"],
        vec![vec![15.0, 2.0], vec![15.0, 2.0], vec![20.0, 2.0]],
    )
    .unwrap();
    let events = Table::new(
        vec!["pt", "eta"],
        vec![vec![30.0, 3.0], vec![16.0, 1.0], vec![50.0, -0.5]],
    )
    .unwrap();
    for config in configs() {
        let mut engine = RgsEngine::new(CutTable::new(cuts.clone()).unwrap()).with_config(config);
        engine.add("d", &events, None).unwrap();
        let result = engine.run(&["pt", "eta"], &[">", "<|"]).unwrap();
        assert_eq!(result.counts(0).unwrap(), &[2.0, 2.0, 1.0]);
    }
}
