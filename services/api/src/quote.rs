use crate::infra::load_calculator;
use clap::Args;
use shipping_fee::checkout::format_naira;
use shipping_fee::config::AppConfig;
use shipping_fee::error::AppError;
use shipping_fee::fees::{RegionDistanceTable, ShippingFeeRequest, ShippingFeeResult};

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Order subtotal before shipping
    #[arg(long)]
    pub(crate) price: f64,
    /// Destination region, exactly as listed by `regions`
    #[arg(long)]
    pub(crate) destination: String,
    /// Cost per kilometre (defaults to the configured rate)
    #[arg(long)]
    pub(crate) rate: Option<f64>,
    /// Fail on invalid input or an unknown destination instead of quoting zero
    #[arg(long)]
    pub(crate) strict: bool,
    /// Print the quote as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RegionsArgs {
    /// Print the table as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        price,
        destination,
        rate,
        strict,
        json,
    } = args;

    let config = AppConfig::load()?;
    let calculator = load_calculator(&config)?;

    let result = if strict {
        let request = ShippingFeeRequest::new(price, destination.as_str(), rate)?;
        calculator.quote(&request)?
    } else {
        calculator.calculate_fee(price, &destination, rate)
    };

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?
        );
    } else {
        print!("{}", render_quote(&result, &destination));
    }

    Ok(())
}

pub(crate) fn run_regions(args: RegionsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let calculator = load_calculator(&config)?;

    if args.json {
        let regions: Vec<_> = calculator.table().iter().collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&regions).map_err(std::io::Error::from)?
        );
    } else {
        print!("{}", render_regions(calculator.table()));
    }

    Ok(())
}

fn render_quote(result: &ShippingFeeResult, requested: &str) -> String {
    let breakdown = match (
        &result.destination,
        result.distance,
        result.fixed_fee,
        result.variable_fee,
    ) {
        (Some(destination), Some(distance), Some(fixed_fee), Some(variable_fee)) => format!(
            "Shipping to {destination}:\n\
             Distance: {distance} km\n\
             Fixed fee (5%): {}\n\
             Distance fee: {}\n",
            format_naira(fixed_fee),
            format_naira(variable_fee),
        ),
        _ => format!("No distance on record for '{requested}'\n"),
    };

    format!(
        "{breakdown}Total shipping fee: {}\n",
        format_naira(result.total_fee)
    )
}

fn render_regions(table: &RegionDistanceTable) -> String {
    let width = table.names().map(str::len).max().unwrap_or(0);
    table
        .iter()
        .map(|entry| format!("{:<width$}  {:>5} km\n", entry.region, entry.distance_km))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use shipping_fee::fees::ShippingFeeCalculator;

    #[test]
    fn render_quote_lists_fee_components() {
        let calculator = ShippingFeeCalculator::reference().expect("reference table");
        let result = calculator.calculate_fee(100_000.0, "Lagos", Some(50.0));
        let rendered = render_quote(&result, "Lagos");

        assert!(rendered.contains("Shipping to Lagos:"));
        assert!(rendered.contains("Distance: 615 km"));
        assert!(rendered.contains("Fixed fee (5%): ₦5,000.00"));
        assert!(rendered.contains("Distance fee: ₦30,750.00"));
        assert!(rendered.ends_with("Total shipping fee: ₦35,750.00\n"));
    }

    #[test]
    fn render_quote_prints_one_unindented_line_per_component() {
        let calculator = ShippingFeeCalculator::reference().expect("reference table");
        let result = calculator.calculate_fee(2_000.0, "Abia", None);
        let rendered = render_quote(&result, "Abia");

        assert_eq!(
            rendered.lines().collect::<Vec<_>>(),
            [
                "Shipping to Abia:",
                "Distance: 61 km",
                "Fixed fee (5%): ₦100.00",
                "Distance fee: ₦1,220.00",
                "Total shipping fee: ₦1,320.00",
            ]
        );
    }

    #[test]
    fn render_quote_explains_zero_fee() {
        let rendered = render_quote(&ShippingFeeResult::zero(), "Atlantis");
        assert!(rendered.contains("No distance on record for 'Atlantis'"));
        assert!(rendered.contains("Total shipping fee: ₦0.00"));
    }

    #[test]
    fn render_regions_aligns_columns() {
        let table = RegionDistanceTable::reference().expect("reference table");
        let rendered = render_regions(&table);
        assert_eq!(rendered.lines().count(), 37);
        assert!(rendered
            .lines()
            .any(|line| line.starts_with("Lagos ") && line.ends_with("615 km")));
    }
}
