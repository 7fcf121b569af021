use market_ribbon::indicator::ribbon::{Ribbon, RibbonColor, BEAR_COLOR, BULL_COLOR};

#[test]
fn color_defined_only_when_both_averages_are() {
    let mut ribbon = Ribbon::new(5, 10);
    for i in 0..30 {
        let reading = ribbon.push(100.0 + (i as f64 * 1.3).cos());
        assert_eq!(reading.fast.is_some(), i >= 4, "fast at {}", i);
        assert_eq!(reading.slow.is_some(), i >= 9, "slow at {}", i);
        assert_eq!(
            reading.color.is_some(),
            reading.fast.is_some() && reading.slow.is_some()
        );
    }
}

#[test]
fn bull_iff_fast_strictly_above_slow() {
    let mut ribbon = Ribbon::new(2, 4);
    for p in [10.0, 12.0, 9.0, 15.0, 8.0, 8.0, 20.0, 1.0] {
        let r = ribbon.push(p);
        if let (Some(f), Some(s), Some(c)) = (r.fast, r.slow, r.color) {
            assert_eq!(c == RibbonColor::Bull, f > s);
        }
    }
}

#[test]
fn hex_codes() {
    assert_eq!(RibbonColor::Bull.as_hex(), BULL_COLOR);
    assert_eq!(RibbonColor::Bear.as_hex(), BEAR_COLOR);
    assert_eq!(BULL_COLOR, "#0ebb23");
    assert_eq!(BEAR_COLOR, "#FF0000");
}

#[test]
fn periods_are_exposed() {
    let ribbon = Ribbon::new(3, 7);
    assert_eq!(ribbon.fast_period(), 3);
    assert_eq!(ribbon.slow_period(), 7);
}
