/// Currency symbol appended to every price.
pub const CURRENCY_SYMBOL: &str = "₽";

/// Whole amount with space-grouped thousands and a trailing currency symbol.
pub fn format_price(amount: u64) -> String {
    format!("{} {}", group_thousands(amount), CURRENCY_SYMBOL)
}

pub fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}
