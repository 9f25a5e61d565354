//! Cálculo de costes y numeración de facturas
//!
//! Funciones puras usadas por los controllers de servicios y facturas.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::models::IssueCostLine;
use crate::utils::errors::{AppError, AppResult};

/// Prefijo de los números de factura
pub const INVOICE_PREFIX: &str = "INV-";

/// Plazo de pago por defecto
pub const DEFAULT_DUE_DAYS: i64 = 15;

/// Precio de un issue: reparación si `is_repair`, pieza nueva en caso contrario
pub fn issue_price(line: &IssueCostLine) -> AppResult<Decimal> {
    let price = if line.is_repair {
        line.repair_price
    } else {
        line.new_price
    };

    price.ok_or(AppError::MissingComponent(line.issue_id))
}

/// Coste total de un servicio. Un conjunto vacío cuesta 0.
pub fn calculate_service_cost(lines: &[IssueCostLine]) -> AppResult<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |total, line| -> AppResult<Decimal> {
            Ok(total + issue_price(line)?)
        })
        .map(|total| total.round_dp(2))
}

/// `INV-0001`, `INV-0002`, ... (más de 4 dígitos si la secuencia los supera)
pub fn format_invoice_number(sequence: i64) -> String {
    format!("{}{:04}", INVOICE_PREFIX, sequence)
}

/// Fecha de vencimiento: fecha de emisión + `due_days`
pub fn default_due_date(issue_date: DateTime<Utc>, due_days: i64) -> NaiveDate {
    issue_date.date_naive() + Duration::days(due_days)
}

/// Inicio (UTC) del día, mes y año de `now`, para el dashboard de ingresos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevenueWindow {
    pub day_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
    pub year_start: DateTime<Utc>,
}

impl RevenueWindow {
    pub fn at(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let start_of = |date: NaiveDate| Utc.from_utc_datetime(&date.and_time(chrono::NaiveTime::MIN));

        Self {
            day_start: start_of(today),
            month_start: start_of(today.with_day(1).unwrap_or(today)),
            year_start: start_of(today.with_ordinal(1).unwrap_or(today)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn line(is_repair: bool, new_price: Decimal, repair_price: Decimal) -> IssueCostLine {
        IssueCostLine {
            issue_id: Uuid::new_v4(),
            is_repair,
            new_price: Some(new_price),
            repair_price: Some(repair_price),
        }
    }

    #[test]
    fn test_service_cost_mixes_repair_and_replace() {
        let lines = vec![
            line(true, dec!(250.00), dec!(80.50)),  // reparación
            line(false, dec!(45.99), dec!(10.00)),  // pieza nueva
            line(true, dec!(1200.00), dec!(399.99)),
        ];

        assert_eq!(calculate_service_cost(&lines).unwrap(), dec!(526.48));
    }

    #[test]
    fn test_service_cost_is_exact_decimal() {
        let lines: Vec<_> = (0..10).map(|_| line(false, dec!(0.10), dec!(0.00))).collect();
        assert_eq!(calculate_service_cost(&lines).unwrap(), dec!(1.00));
    }

    #[test]
    fn test_empty_service_costs_zero() {
        assert_eq!(calculate_service_cost(&[]).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_missing_component_is_domain_error() {
        let orphan = IssueCostLine {
            issue_id: Uuid::new_v4(),
            is_repair: true,
            new_price: None,
            repair_price: None,
        };
        let lines = vec![line(true, dec!(10), dec!(5)), orphan.clone()];

        match calculate_service_cost(&lines) {
            Err(AppError::MissingComponent(id)) => assert_eq!(id, orphan.issue_id),
            other => panic!("expected missing component, got {:?}", other),
        }
    }

    #[test]
    fn test_invoice_numbers_are_zero_padded() {
        assert_eq!(format_invoice_number(1), "INV-0001");
        assert_eq!(format_invoice_number(2), "INV-0002");
        assert_eq!(format_invoice_number(42), "INV-0042");
        assert_eq!(format_invoice_number(9999), "INV-9999");
        assert_eq!(format_invoice_number(10000), "INV-10000");
    }

    #[test]
    fn test_sequential_invoice_numbers_increase() {
        let numbers: Vec<String> = (1..=12).map(format_invoice_number).collect();
        let mut sorted = numbers.clone();
        sorted.sort();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn test_default_due_date_is_fifteen_days_later() {
        let issued = Utc.with_ymd_and_hms(2024, 10, 16, 18, 23, 0).unwrap();
        assert_eq!(
            default_due_date(issued, DEFAULT_DUE_DAYS),
            NaiveDate::from_ymd_opt(2024, 10, 31).unwrap()
        );

        let year_end = Utc.with_ymd_and_hms(2024, 12, 20, 23, 59, 59).unwrap();
        assert_eq!(
            default_due_date(year_end, DEFAULT_DUE_DAYS),
            NaiveDate::from_ymd_opt(2025, 1, 4).unwrap()
        );
    }

    #[test]
    fn test_revenue_window() {
        let now = Utc.with_ymd_and_hms(2024, 10, 17, 14, 30, 0).unwrap();
        let window = RevenueWindow::at(now);

        assert_eq!(window.day_start, Utc.with_ymd_and_hms(2024, 10, 17, 0, 0, 0).unwrap());
        assert_eq!(window.month_start, Utc.with_ymd_and_hms(2024, 10, 1, 0, 0, 0).unwrap());
        assert_eq!(window.year_start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}
