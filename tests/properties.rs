//! Property-based tests for line balancing invariants.
//!
//! Random acyclic task sets are balanced and every result is checked
//! against the guarantees the balancer makes.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;

use u_linebalance::balancing::{positional_weights, RpwBalancer};
use u_linebalance::config::{LineConfig, TieBreaker};
use u_linebalance::error::BalanceError;
use u_linebalance::models::{ProductionLine, Task};
use u_linebalance::validation::validate_precedence;

fn task_id(i: usize) -> String {
    format!("T{i:02}")
}

/// Generates an acyclic line: edges only run from lower to higher index.
fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
    (1usize..25)
        .prop_flat_map(|n| {
            (
                prop::collection::vec(1u32..=10, n),
                prop::collection::vec(prop::collection::vec(any::<bool>(), n), n),
            )
        })
        .prop_map(|(durations, edges)| {
            durations
                .iter()
                .enumerate()
                .map(|(j, &d)| {
                    let preds = (0..j).filter(|&i| edges[j][i]);
                    Task::new(task_id(j), f64::from(d)).with_predecessors(preds.map(task_id))
                })
                .collect()
        })
}

fn build_line(tasks: Vec<Task>, cycle_time: f64) -> ProductionLine {
    let mut line = ProductionLine::new(LineConfig::new(1.0, cycle_time));
    for task in tasks {
        line.add_task(task).unwrap();
    }
    line
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_task_lands_on_exactly_one_station(
        tasks in arb_tasks(),
        cycle_time in 10u32..30,
    ) {
        let line = build_line(tasks, f64::from(cycle_time));
        let balance = line.balance().unwrap();

        let mut seen = BTreeSet::new();
        for station in &balance.stations {
            prop_assert!(!station.is_empty());
            for id in station.task_ids() {
                prop_assert!(seen.insert(id.to_string()), "{} assigned twice", id);
            }
        }
        let expected: BTreeSet<String> = line.tasks().keys().cloned().collect();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn stations_respect_cycle_time(
        tasks in arb_tasks(),
        cycle_time in 10u32..30,
    ) {
        let ct = f64::from(cycle_time);
        let balance = build_line(tasks, ct).balance().unwrap();

        for (i, station) in balance.stations.iter().enumerate() {
            prop_assert_eq!(station.index, i + 1);
            prop_assert!(station.cumulative_time <= ct + 1e-9);
            let sum: f64 = station.tasks.iter().map(|t| t.duration).sum();
            prop_assert!((sum - station.cumulative_time).abs() < 1e-9);
        }
        prop_assert!(balance.station_count() >= balance.metrics.theoretical_min_stations);
    }

    #[test]
    fn predecessors_never_sit_downstream(
        tasks in arb_tasks(),
        cycle_time in 10u32..30,
    ) {
        let line = build_line(tasks, f64::from(cycle_time));
        let balance = line.balance().unwrap();

        for task in line.tasks().values() {
            let station = balance.station_of(&task.id).unwrap();
            for pred in &task.predecessors {
                let pred_station = balance.station_of(pred).unwrap();
                prop_assert!(pred_station <= station, "{} before {}", pred, task.id);
            }
        }
    }

    #[test]
    fn predecessors_precede_within_station(
        tasks in arb_tasks(),
        cycle_time in 10u32..30,
    ) {
        let line = build_line(tasks, f64::from(cycle_time));
        let balance = line.balance().unwrap();

        for station in &balance.stations {
            let ids = station.task_ids();
            for (pos, id) in ids.iter().enumerate() {
                let task = line.task(id).unwrap();
                for later in &ids[pos + 1..] {
                    prop_assert!(!task.depends_on(later));
                }
            }
        }
    }

    #[test]
    fn balancing_is_deterministic(
        tasks in arb_tasks(),
        cycle_time in 10u32..30,
        fewest in any::<bool>(),
    ) {
        let line = build_line(tasks, f64::from(cycle_time));
        let tie_breaker = if fewest { TieBreaker::FewestPredecessors } else { TieBreaker::ById };
        let balancer = RpwBalancer::new().with_tie_breaker(tie_breaker);

        let first = line.balance_with(&balancer).unwrap();
        let second = line.balance_with(&balancer).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn weights_dominate_successors(tasks in arb_tasks()) {
        let map: BTreeMap<String, Task> = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
        let graph = validate_precedence(&map).unwrap();
        let weights = positional_weights(&map, &graph);

        for task in map.values() {
            let own = weights[&task.id];
            prop_assert!(own >= task.duration - 1e-9);
            if graph.successor_count(&task.id) == 0 {
                prop_assert!((own - task.duration).abs() < 1e-9);
            }
            for pred in &task.predecessors {
                prop_assert!(weights[pred] >= own + map[pred].duration - 1e-9);
            }
        }
    }

    #[test]
    fn back_edge_is_reported_as_cycle(
        tasks in arb_tasks(),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        let mut tasks = tasks;
        let (lo, hi) = {
            let (x, y) = (a.index(tasks.len()), b.index(tasks.len()));
            (x.min(y), x.max(y))
        };
        // lo -> hi and hi -> lo; a self-loop when they coincide
        tasks[hi].predecessors.insert(task_id(lo));
        tasks[lo].predecessors.insert(task_id(hi));

        let map: BTreeMap<String, Task> = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();
        match validate_precedence(&map) {
            Err(BalanceError::CyclicPrecedence { cycle }) => {
                prop_assert!(!cycle.is_empty());
                // each member is a direct predecessor of the next, wrapping around
                for (k, from) in cycle.iter().enumerate() {
                    let to = &cycle[(k + 1) % cycle.len()];
                    prop_assert!(map[to].depends_on(from), "{} -> {} is not an edge", from, to);
                }
            }
            other => prop_assert!(false, "expected a cycle, got {:?}", other),
        }
    }
}
