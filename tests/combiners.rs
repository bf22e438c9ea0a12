use beamwindow::testing::{assert_window_values, sensor_readings};
use beamwindow::*;

fn stamped<V: Clone>(rows: &[(i64, V)]) -> Vec<Timestamped<V>> {
    rows.iter().map(|(t, v)| Timestamped::new(*t, v.clone())).collect()
}

#[test]
fn sum_per_fixed_window() -> anyhow::Result<()> {
    let out = window_unkeyed(
        stamped(&[(1, 10i64), (9, -3), (10, 4), (25, 1)]),
        WindowStrategy::fixed(10)?,
        Sum::<i64>::new(),
    )?;
    assert_window_values(
        out,
        &[(Window::new(0, 10), 7), (Window::new(10, 20), 4), (Window::new(20, 30), 1)],
    );
    Ok(())
}

#[test]
fn min_and_max_per_sensor() -> anyhow::Result<()> {
    let strategy = WindowStrategy::fixed(60_000)?;
    let min = WindowEmitter::group_by_key(window_keyed(sensor_readings(), strategy, Min::<i32>::new())?);
    let max = WindowEmitter::group_by_key(window_keyed(sensor_readings(), strategy, Max::<i32>::new())?);

    assert_eq!(min["sensor-a"], vec![(Window::new(0, 60_000), Some(20))]);
    assert_eq!(max["sensor-a"], vec![(Window::new(0, 60_000), Some(25))]);
    assert_eq!(min["sensor-b"], vec![(Window::new(0, 60_000), Some(28))]);
    assert_eq!(max["sensor-b"], vec![(Window::new(0, 60_000), Some(31))]);
    Ok(())
}

#[test]
fn max_survives_session_merges() -> anyhow::Result<()> {
    // 30 bridges [0,30) and [60,90) once it arrives last
    let out = window_unkeyed(
        stamped(&[(0, 3u32), (60, 9), (30, 1)]),
        WindowStrategy::session(30)?,
        Max::<u32>::new(),
    )?;
    assert_window_values(out, &[(Window::new(0, 90), Some(9))]);
    Ok(())
}

#[test]
fn average_per_session() -> anyhow::Result<()> {
    let out = window_unkeyed(
        stamped(&[(0, 1.0f64), (5, 2.0), (8, 6.0), (100, 10.0)]),
        WindowStrategy::session(10)?,
        AverageF64,
    )?;
    let by_window = WindowEmitter::by_window(out);
    assert_eq!(by_window.len(), 2);
    assert_eq!(by_window[0].0, Window::new(0, 18));
    assert!((by_window[0].1 - 3.0).abs() < 1e-9);
    assert!((by_window[1].1 - 10.0).abs() < 1e-9);
    Ok(())
}

#[test]
fn sliding_sum_counts_each_record_in_every_window() -> anyhow::Result<()> {
    let out = window_unkeyed(
        stamped(&[(0, 1i64), (15, 2), (29, 4)]),
        WindowStrategy::sliding(20, 10)?,
        Sum::<i64>::new(),
    )?;
    // 0 -> [-10,10),[0,20); 15 -> [0,20),[10,30); 29 -> [10,30),[20,40)
    assert_window_values(
        out,
        &[
            (Window::new(-10, 10), 1),
            (Window::new(0, 20), 3),
            (Window::new(10, 30), 6),
            (Window::new(20, 40), 4),
        ],
    );
    Ok(())
}

#[test]
fn to_list_keeps_arrival_order_within_a_window() -> anyhow::Result<()> {
    let out = window_unkeyed(
        stamped(&[(7, "c"), (1, "a"), (4, "b")]),
        WindowStrategy::fixed(10)?,
        ToList::<&str>::new(),
    )?;
    assert_window_values(out, &[(Window::new(0, 10), vec!["c", "a", "b"])]);
    Ok(())
}

#[test]
fn custom_combiner_plugs_into_runner() -> anyhow::Result<()> {
    /// Spread between the largest and smallest value in a window.
    struct Range;

    impl CombineFn<i64, Option<(i64, i64)>, i64> for Range {
        fn create(&self) -> Option<(i64, i64)> {
            None
        }
        fn add_input(&self, acc: &mut Option<(i64, i64)>, v: i64) {
            *acc = Some(match *acc {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            });
        }
        fn merge(&self, acc: &mut Option<(i64, i64)>, other: Option<(i64, i64)>) {
            if let Some((lo, hi)) = other {
                self.add_input(acc, lo);
                self.add_input(acc, hi);
            }
        }
        fn finish(&self, acc: Option<(i64, i64)>) -> i64 {
            acc.map_or(0, |(lo, hi)| hi - lo)
        }
    }

    let out = window_unkeyed(stamped(&[(0, 5), (3, -2), (40, 8), (12, 11)]), WindowStrategy::session(10)?, Range)?;
    assert_window_values(out, &[(Window::new(0, 22), 13), (Window::new(40, 50), 0)]);
    Ok(())
}
