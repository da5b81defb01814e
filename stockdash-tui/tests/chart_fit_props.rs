//! Property tests for fitting a series into the chart's columns.

use proptest::prelude::*;

use stockdash_core::quote::Candle;
use stockdash_tui::panels::candle_chart::fit_to_width;

fn candles() -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec((1.0f64..1000.0, 0.0f64..50.0, 0.0f64..50.0, 0.0f64..1.0), 1..400)
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (base, up, down, t))| {
                    let low = base - down.min(base - 0.5);
                    let high = base + up;
                    Candle {
                        time: i as i64 * 60,
                        open: base,
                        high,
                        low,
                        close: low + (high - low) * t,
                    }
                })
                .collect()
        })
}

proptest! {
    #[test]
    fn every_bar_lands_in_exactly_one_column(bars in candles(), width in 1usize..200) {
        let cols = fit_to_width(&bars, width);
        prop_assert_eq!(cols.len(), bars.len().min(width));
        prop_assert_eq!(cols[0].first, 0);
        prop_assert_eq!(cols[cols.len() - 1].last, bars.len() - 1);
        for pair in cols.windows(2) {
            prop_assert_eq!(pair[0].last + 1, pair[1].first);
        }
    }

    #[test]
    fn columns_keep_bucket_extremes(bars in candles(), width in 1usize..200) {
        for col in fit_to_width(&bars, width) {
            let bucket = &bars[col.first..=col.last];
            prop_assert_eq!(col.open, bucket[0].open);
            prop_assert_eq!(col.close, bucket[bucket.len() - 1].close);
            for bar in bucket {
                prop_assert!(col.high >= bar.high);
                prop_assert!(col.low <= bar.low);
            }
        }
    }
}
