pub const DEFAULT_CURRENCY: &str = "EGP";
pub const CURRENCY_SYMBOL: &str = "💷";
/// Minutes of PC time bought by one currency unit.
pub const MINUTES_PER_UNIT: f64 = 6.0;

pub fn format_currency(amount: f64, currency: &str) -> String {
    format!("{CURRENCY_SYMBOL} {amount} {currency}")
}

pub fn format_egp(amount: f64) -> String {
    format_currency(amount, DEFAULT_CURRENCY)
}

pub fn format_time(minutes: u64) -> String {
    format!("{}h {}m", minutes / 60, minutes % 60)
}

pub fn pc_time_for_cost(cost: f64) -> String {
    let minutes = (cost * MINUTES_PER_UNIT).max(0.0).floor() as u64;
    format_time(minutes)
}
