//! ユーティリティモジュール

pub mod api;
pub mod cache;
pub mod log_trace;
pub mod storage;
pub mod toast;

// 共通ヘルパー

/// 金額表示（pt-BR, 例: "R$ 1.234,56"）
pub fn format_price(value: f64) -> String {
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.abs();
    let digits = (cents / 100).to_string();

    // 3桁ごとにドット区切り
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "R$ 0,00");
        assert_eq!(format_price(139.9), "R$ 139,90");
        assert_eq!(format_price(1234.567), "R$ 1.234,57");
        assert_eq!(format_price(1_000_000.0), "R$ 1.000.000,00");
        assert_eq!(format_price(-5.5), "-R$ 5,50");
    }
}
