#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::{
        app::valuate,
        models::{PortfolioSummary, PriceStatus, RecordId},
        test::fakes::{FakePrices, FakeQuote, record},
    };

    #[tokio::test]
    async fn values_mixed_portfolio() {
        let records = vec![
            record(1, "AAA", dec!(10), "asset"),
            record(2, "cash", dec!(500), "cash"),
            record(3, "BBB", dec!(2), "liability"),
        ];
        let prices = FakePrices::new()
            .with("AAA", FakeQuote::Price(dec!(20)))
            .with("BBB", FakeQuote::Price(dec!(300)));

        let summary = valuate(&records, &prices).await;

        let items = summary.items();
        assert_eq!(items.len(), 3);
        assert_eq!(*items[0].total_value(), dec!(200));
        assert_eq!(*items[1].total_value(), dec!(500));
        assert_eq!(*items[2].total_value(), dec!(600));
        assert_eq!(*summary.net_worth(), dec!(100));
    }

    #[tokio::test]
    async fn empty_portfolio_is_worth_zero() {
        let prices = FakePrices::new();

        let summary = valuate(&[], &prices).await;

        assert_eq!(summary, PortfolioSummary::empty());
        assert!(prices.calls().is_empty());
    }

    #[tokio::test]
    async fn cash_is_priced_at_one_without_lookup() {
        let records = vec![record(1, "cash", dec!(1250.5), "cash")];
        let prices = FakePrices::new().with("cash", FakeQuote::Price(dec!(99)));

        let summary = valuate(&records, &prices).await;

        let item = &summary.items()[0];
        assert_eq!(*item.current_price(), dec!(1));
        assert_eq!(*item.total_value(), dec!(1250.5));
        assert_eq!(*item.price_status(), PriceStatus::Fixed);
        assert!(prices.calls().is_empty());
    }

    #[tokio::test]
    async fn liability_keeps_unsigned_value_but_reduces_net_worth() {
        let records = vec![record(1, "LOAN", dec!(2), "liability")];
        let prices = FakePrices::new().with("LOAN", FakeQuote::Price(dec!(300)));

        let summary = valuate(&records, &prices).await;

        assert_eq!(*summary.items()[0].total_value(), dec!(600));
        assert_eq!(*summary.net_worth(), dec!(-600));
    }

    #[tokio::test]
    async fn liability_with_negative_amount_still_subtracts() {
        let records = vec![record(1, "LOAN", dec!(-2), "liability")];
        let prices = FakePrices::new().with("LOAN", FakeQuote::Price(dec!(300)));

        let summary = valuate(&records, &prices).await;

        assert_eq!(*summary.items()[0].total_value(), dec!(-600));
        assert_eq!(*summary.net_worth(), dec!(-600));
    }

    #[tokio::test]
    async fn other_asset_types_add_their_value() {
        let records = vec![
            record(1, "BTC-USD", dec!(0.5), "crypto"),
            record(2, "2330.TW", dec!(1000), "stock"),
        ];
        let prices = FakePrices::new()
            .with("BTC-USD", FakeQuote::Price(dec!(60000)))
            .with("2330.TW", FakeQuote::Price(dec!(1025)));

        let summary = valuate(&records, &prices).await;

        assert_eq!(*summary.net_worth(), dec!(30000) + dec!(1025000));
        assert_eq!(prices.calls(), vec!["BTC-USD", "2330.TW"]);
    }

    #[tokio::test]
    async fn failed_lookup_only_zeroes_its_own_record() {
        let records = vec![
            record(1, "AAA", dec!(10), "stock"),
            record(2, "GONE", dec!(5), "stock"),
            record(3, "BBB", dec!(1), "liability"),
        ];
        let prices = FakePrices::new()
            .with("AAA", FakeQuote::Price(dec!(20)))
            .with("GONE", FakeQuote::Fail)
            .with("BBB", FakeQuote::Price(dec!(50)));

        let summary = valuate(&records, &prices).await;

        let items = summary.items();
        assert_eq!(items.len(), 3);
        assert_eq!(*items[1].current_price(), dec!(0));
        assert_eq!(*items[1].total_value(), dec!(0));
        assert_eq!(*items[1].price_status(), PriceStatus::Unavailable);
        assert_eq!(*items[0].price_status(), PriceStatus::Live);
        assert_eq!(*items[2].price_status(), PriceStatus::Live);
        assert_eq!(*summary.net_worth(), dec!(150));
        assert_eq!(summary.unavailable_count(), 1);
    }

    #[tokio::test]
    async fn zero_quote_is_marked_unavailable() {
        let records = vec![record(1, "ZERO", dec!(3), "stock")];
        let prices = FakePrices::new().with("ZERO", FakeQuote::Price(dec!(0)));

        let summary = valuate(&records, &prices).await;

        assert_eq!(*summary.items()[0].price_status(), PriceStatus::Unavailable);
        assert_eq!(*summary.net_worth(), dec!(0));
    }

    #[tokio::test]
    async fn negative_quote_is_treated_as_missing() {
        let records = vec![record(1, "ODD", dec!(3), "stock")];
        let prices = FakePrices::new().with("ODD", FakeQuote::Price(dec!(-4)));

        let summary = valuate(&records, &prices).await;

        assert_eq!(*summary.items()[0].current_price(), dec!(0));
        assert_eq!(*summary.net_worth(), dec!(0));
    }

    #[tokio::test]
    async fn keeps_input_order_when_quotes_settle_out_of_order() {
        let records = vec![
            record(7, "SLOW", dec!(1), "stock"),
            record(3, "FAST", dec!(1), "stock"),
            record(5, "MID", dec!(1), "stock"),
        ];
        let prices = FakePrices::new()
            .with("SLOW", FakeQuote::Delayed(dec!(1), Duration::from_millis(60)))
            .with("FAST", FakeQuote::Delayed(dec!(2), Duration::from_millis(1)))
            .with("MID", FakeQuote::Delayed(dec!(3), Duration::from_millis(20)));

        let summary = valuate(&records, &prices).await;

        let ids: Vec<RecordId> = summary
            .items()
            .iter()
            .map(|item| item.record().id().clone())
            .collect();
        assert_eq!(ids, vec![RecordId::Int(7), RecordId::Int(3), RecordId::Int(5)]);
        assert_eq!(*summary.items()[0].current_price(), dec!(1));
    }

    #[tokio::test]
    async fn issues_all_lookups_before_waiting() {
        let delay = Duration::from_millis(100);
        let records = vec![
            record(1, "A", dec!(1), "stock"),
            record(2, "B", dec!(1), "stock"),
            record(3, "C", dec!(1), "stock"),
        ];
        let prices = FakePrices::new()
            .with("A", FakeQuote::Delayed(dec!(1), delay))
            .with("B", FakeQuote::Delayed(dec!(1), delay))
            .with("C", FakeQuote::Delayed(dec!(1), delay));

        let started = Instant::now();
        let summary = valuate(&records, &prices).await;

        assert!(started.elapsed() < delay * 2);
        assert_eq!(*summary.net_worth(), dec!(3));
    }

    #[tokio::test]
    async fn repeated_valuation_is_independent() {
        let records = vec![record(1, "AAA", dec!(4), "stock")];
        let prices = FakePrices::new().with("AAA", FakeQuote::Price(dec!(25)));

        let first = valuate(&records, &prices).await;
        let second = valuate(&records, &prices).await;

        assert_eq!(first, second);
        assert_eq!(prices.calls().len(), 2);
    }

    #[tokio::test]
    async fn overflowing_value_degrades_only_that_record() {
        let records = vec![
            record(1, "HUGE", Decimal::MAX, "stock"),
            record(2, "AAA", dec!(10), "stock"),
        ];
        let prices = FakePrices::new()
            .with("HUGE", FakeQuote::Price(dec!(2)))
            .with("AAA", FakeQuote::Price(dec!(20)));

        let summary = valuate(&records, &prices).await;

        let items = summary.items();
        assert_eq!(*items[0].current_price(), dec!(0));
        assert_eq!(*items[0].total_value(), dec!(0));
        assert_eq!(*items[0].price_status(), PriceStatus::Unavailable);
        assert_eq!(*items[1].price_status(), PriceStatus::Live);
        assert_eq!(*summary.net_worth(), dec!(200));
    }

    #[tokio::test]
    async fn net_worth_saturates_instead_of_overflowing() {
        let records = vec![
            record(1, "cash", Decimal::MAX, "cash"),
            record(2, "cash", Decimal::MAX, "cash"),
        ];

        let summary = valuate(&records, &FakePrices::new()).await;

        assert_eq!(summary.len(), 2);
        assert_eq!(*summary.items()[1].total_value(), Decimal::MAX);
        assert_eq!(*summary.net_worth(), Decimal::MAX);
    }
}
