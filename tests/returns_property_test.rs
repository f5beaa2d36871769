mod common;

use proptest::prelude::*;

use common::{date, raw_closes};
use portfolio_returns::domain_types::PortfolioWeight;
use portfolio_returns::returns::{AlignmentPolicy, PortfolioAggregator, ReturnSeriesBuilder, WeightedSeries};

proptest! {
    #[test]
    fn prop_builder_drops_exactly_one_row(closes in prop::collection::vec(1.0f64..10_000.0, 0..60)) {
        let raw = raw_closes(date(2020, 1, 1), &closes);
        let series = ReturnSeriesBuilder::build(&raw);

        prop_assert_eq!(series.len(), closes.len().saturating_sub(1));
        if let Some(first) = raw.first() {
            prop_assert!(series.get(first.date).is_none());
        }
    }

    #[test]
    fn prop_builder_return_matches_close_ratio(closes in prop::collection::vec(1.0f64..10_000.0, 2..60)) {
        let raw = raw_closes(date(2020, 1, 1), &closes);
        let series = ReturnSeriesBuilder::build(&raw);

        for (pair, row) in raw.windows(2).zip(series.iter()) {
            prop_assert_eq!(row.date, pair[1].date);
            prop_assert_eq!(row.return_, pair[1].close / pair[0].close - 1.0);
            prop_assert_eq!(row.close, pair[1].close);
        }
    }

    #[test]
    fn prop_unit_weight_is_identity(closes in prop::collection::vec(1.0f64..10_000.0, 2..40)) {
        let series = ReturnSeriesBuilder::build(&raw_closes(date(2021, 3, 1), &closes));
        let constituents = vec![WeightedSeries::new(PortfolioWeight::new("X", 1.0), series.clone())];

        let portfolio = PortfolioAggregator::new(AlignmentPolicy::Strict).aggregate(&constituents).unwrap();

        prop_assert_eq!(portfolio.series(), &series);
    }

    #[test]
    fn prop_aggregate_is_linear_in_weights(
        closes in prop::collection::vec(1.0f64..1_000.0, 2..30),
        a in -2.0f64..2.0,
        b in -2.0f64..2.0,
    ) {
        let series = ReturnSeriesBuilder::build(&raw_closes(date(2022, 6, 1), &closes));
        let constituents = vec![
            WeightedSeries::new(PortfolioWeight::new("X", a), series.clone()),
            WeightedSeries::new(PortfolioWeight::new("X", b), series.clone()),
        ];

        let portfolio = PortfolioAggregator::new(AlignmentPolicy::Strict).aggregate(&constituents).unwrap();

        for (combined, single) in portfolio.series().iter().zip(series.iter()) {
            let expected = single.return_ * a + single.return_ * b;
            prop_assert!((combined.return_ - expected).abs() < 1e-12);
        }
    }
}
