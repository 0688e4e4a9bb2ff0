use proptest::prelude::*;
use shipping_fee::fees::{
    RegionDistanceTable, ShippingFeeCalculator, ShippingFeeRequest, ShippingFeeResult,
};

fn calculator() -> ShippingFeeCalculator {
    ShippingFeeCalculator::reference().expect("reference table")
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

#[test]
fn documented_scenarios_hold() {
    let calculator = calculator();

    let lagos = calculator.calculate_fee(100_000.0, "Lagos", Some(50.0));
    assert_eq!(lagos.fixed_fee, Some(5_000.0));
    assert_eq!(lagos.variable_fee, Some(30_750.0));
    assert_eq!(lagos.total_fee, 35_750.0);

    let rivers = calculator.calculate_fee(100_000.0, "Rivers", Some(20.0));
    assert_eq!(rivers.total_fee, 5_000.0);

    let unknown = calculator.calculate_fee(50_000.0, "Unknown State", None);
    assert_eq!(unknown, ShippingFeeResult::zero());
}

#[test]
fn reference_table_lists_every_region_once() {
    let table = RegionDistanceTable::reference().expect("reference table");
    let mut names: Vec<&str> = table.names().collect();
    assert_eq!(names.len(), 37);
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 37);
}

proptest! {
    #[test]
    fn total_is_fixed_share_plus_distance_charge(
        price in 0.0f64..10_000_000.0,
        rate in 0.01f64..1_000.0,
        index in 0usize..37,
    ) {
        let calculator = calculator();
        let entry = calculator.table().iter().nth(index).expect("entry").clone();

        let result = calculator.calculate_fee(price, &entry.region, Some(rate));
        let expected = price * 0.05 + f64::from(entry.distance_km) * rate;

        prop_assert!(close(result.total_fee, expected));
        prop_assert_eq!(result.distance, Some(entry.distance_km));
        prop_assert_eq!(result.destination.as_deref(), Some(entry.region.as_str()));
    }

    #[test]
    fn origin_ignores_rate(price in 0.0f64..10_000_000.0, rate in 0.01f64..1_000.0) {
        let result = calculator().calculate_fee(price, "Rivers", Some(rate));
        prop_assert!(close(result.total_fee, price * 0.05));
    }

    #[test]
    fn unknown_destinations_are_free(price in 0.0f64..10_000_000.0, name in "[a-z]{3,12} state") {
        let result = calculator().calculate_fee(price, &name, None);
        prop_assert_eq!(result, ShippingFeeResult::zero());
    }

    #[test]
    fn repeated_calls_agree(price in 0.0f64..10_000_000.0, index in 0usize..37) {
        let calculator = calculator();
        let region = calculator.table().iter().nth(index).expect("entry").region.clone();
        prop_assert_eq!(
            calculator.calculate_fee(price, &region, None),
            calculator.calculate_fee(price, &region, None)
        );
    }

    #[test]
    fn omitted_rate_equals_twenty(price in 0.0f64..10_000_000.0, index in 0usize..37) {
        let calculator = calculator();
        let region = calculator.table().iter().nth(index).expect("entry").region.clone();
        prop_assert_eq!(
            calculator.calculate_fee(price, &region, None),
            calculator.calculate_fee(price, &region, Some(20.0))
        );
    }

    #[test]
    fn strict_quote_agrees_with_permissive_path(
        price in 0.0f64..10_000_000.0,
        rate in 0.01f64..1_000.0,
        index in 0usize..37,
    ) {
        let calculator = calculator();
        let region = calculator.table().iter().nth(index).expect("entry").region.clone();
        let request = ShippingFeeRequest::new(price, region.clone(), Some(rate)).expect("valid");
        prop_assert_eq!(
            calculator.quote(&request).expect("known region"),
            calculator.calculate_fee(price, &region, Some(rate))
        );
    }
}
