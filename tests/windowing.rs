// tests/windowing.rs
use beamwindow::testing::assert_window_values;
use beamwindow::*;

#[test]
fn fixed_non_keyed_counts() -> anyhow::Result<()> {
    // Events at 0..30 step 5; window size 10 -> windows [0,10), [10,20), [20,30)
    let events: Vec<Timestamped<&'static str>> =
        (0..30).step_by(5).map(|t| Timestamped::new(t, "x")).collect();

    let out = window_unkeyed(events, WindowStrategy::fixed(10)?, Count)?;

    assert_window_values(
        out,
        &[(Window::new(0, 10), 2), (Window::new(10, 20), 2), (Window::new(20, 30), 2)],
    );
    Ok(())
}

#[test]
fn fixed_keyed_counts() -> anyhow::Result<()> {
    let rows: Vec<(String, Timestamped<u8>)> = vec![
        ("a".into(), Timestamped::new(1, 1)),
        ("a".into(), Timestamped::new(3, 2)),
        ("b".into(), Timestamped::new(7, 1)),
        ("a".into(), Timestamped::new(12, 1)),
        ("b".into(), Timestamped::new(14, 1)),
    ];

    let out = WindowEmitter::sorted(window_keyed(rows, WindowStrategy::fixed(10)?, Count)?);

    // window [0,10):  "a" has 2, "b" has 1
    // window [10,20): "a" has 1, "b" has 1
    let w0 = Window::new(0, 10);
    let w1 = Window::new(10, 20);
    let expected = vec![
        WindowedValue::new("a".to_string(), w0, 2u64),
        WindowedValue::new("a".to_string(), w1, 1),
        WindowedValue::new("b".to_string(), w0, 1),
        WindowedValue::new("b".to_string(), w1, 1),
    ];
    assert_eq!(out, expected);
    Ok(())
}

#[test]
fn attach_timestamps_then_window() -> anyhow::Result<()> {
    #[derive(Clone, Debug)]
    struct Row {
        ts: i64,
        val: u32,
    }

    let rows = vec![
        Row { ts: 5, val: 1 },
        Row { ts: 8, val: 2 },
        Row { ts: 11, val: 3 },
        Row { ts: 15, val: 4 },
    ];

    let stamped = with_timestamps(rows, |r| r.ts);
    let vals: Vec<Timestamped<u32>> =
        stamped.into_iter().map(|t| Timestamped::new(t.ts, t.value.val)).collect();
    let out = window_unkeyed(vals, WindowStrategy::fixed(10)?, Sum::<u32>::new())?;

    assert_window_values(out, &[(Window::new(0, 10), 3), (Window::new(10, 20), 7)]);
    Ok(())
}

#[test]
fn fixed_width_30_scenario() -> anyhow::Result<()> {
    let events: Vec<Timestamped<()>> = [5, 35, 40, 65].into_iter().map(|t| Timestamped::new(t, ())).collect();

    let out = window_unkeyed(events, WindowStrategy::fixed(30)?, Count)?;

    assert_window_values(
        out,
        &[(Window::new(0, 30), 1), (Window::new(30, 60), 2), (Window::new(60, 90), 1)],
    );
    Ok(())
}

#[test]
fn sliding_width_90_period_30_boundaries() -> anyhow::Result<()> {
    let s = WindowStrategy::sliding(90, 30)?;
    let windows = s.assign(45)?;

    assert_eq!(
        windows,
        vec![Window::new(-30, 60), Window::new(0, 90), Window::new(30, 120)]
    );
    // [60,150) starts after 45 and must not be included
    assert!(!windows.contains(&Window::new(60, 150)));
    for w in &windows {
        assert!(w.start <= 45 && 45 < w.end);
    }
    Ok(())
}

#[test]
fn sliding_exact_boundary_timestamps() -> anyhow::Result<()> {
    let s = WindowStrategy::sliding(90, 30)?;
    // 60 is the start of [60,150) and the end of [-30,60): included once, excluded once
    assert_eq!(
        s.assign(60)?,
        vec![Window::new(0, 90), Window::new(30, 120), Window::new(60, 150)]
    );
    Ok(())
}

#[test]
fn sliding_counts_per_window() -> anyhow::Result<()> {
    let events: Vec<Timestamped<()>> = [10, 40].into_iter().map(|t| Timestamped::new(t, ())).collect();

    let out = window_unkeyed(events, WindowStrategy::sliding(60, 30)?, Count)?;

    // 10 -> [-30,30), [0,60); 40 -> [0,60), [30,90)
    assert_window_values(
        out,
        &[(Window::new(-30, 30), 1), (Window::new(0, 60), 2), (Window::new(30, 90), 1)],
    );
    Ok(())
}

#[test]
fn global_window_collects_everything() -> anyhow::Result<()> {
    let events: Vec<Timestamped<i64>> =
        [-1_000, 0, 7, 1_000_000].into_iter().map(|t| Timestamped::new(t, t)).collect();

    let out = window_unkeyed(events, WindowStrategy::default(), ToList::<i64>::new())?;

    assert_eq!(out.len(), 1);
    assert!(out[0].window.is_global());
    assert_eq!(out[0].value, vec![-1_000, 0, 7, 1_000_000]);
    Ok(())
}

#[test]
fn empty_input_emits_nothing() -> anyhow::Result<()> {
    let out = window_unkeyed(Vec::<Timestamped<()>>::new(), WindowStrategy::fixed(10)?, Count)?;
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn invalid_strategy_is_rejected_by_runner() {
    let bad = WindowStrategy::Session { gap: 0 };
    let err = window_unkeyed(vec![Timestamped::new(1, ())], bad, Count).unwrap_err();
    assert!(err.is_config());
}
