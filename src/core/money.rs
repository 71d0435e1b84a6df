//! Fixed display formats for the two currencies on the worksheet.
//!
//! Amounts are plain `f64`; the formats only control rendering. USD renders
//! in the en-US style (`$1,234.50`), IDR in the id-ID style (`Rp 16.100`,
//! no decimals). The IDR format is lossless for integral amounts: `parse`
//! recovers exactly what `format` produced.

/// A currency display format: symbol, separators and fraction digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub symbol: &'static str,
    /// Printed between the symbol and the amount.
    pub symbol_gap: &'static str,
    pub thousands_sep: char,
    pub decimal_sep: char,
    pub decimals: u32,
}

/// US dollars, two fraction digits.
pub const USD: CurrencyFormat = CurrencyFormat {
    symbol: "$",
    symbol_gap: "",
    thousands_sep: ',',
    decimal_sep: '.',
    decimals: 2,
};

/// Indonesian rupiah, whole amounts only.
pub const IDR: CurrencyFormat = CurrencyFormat {
    symbol: "Rp",
    symbol_gap: " ",
    thousands_sep: '.',
    decimal_sep: ',',
    decimals: 0,
};

impl CurrencyFormat {
    /// Formats `value` with the currency symbol, e.g. `Rp 1.610.000`.
    pub fn format(&self, value: f64) -> String {
        let number = self.format_plain(value.abs());
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{sign}{}{}{number}", self.symbol, self.symbol_gap)
    }

    /// Formats `value` without the symbol, honoring `decimals` overridden to
    /// `fraction_digits`. Used for the secondary rendering of a fractional
    /// exchange rate, e.g. `15.623,45`.
    pub fn format_number(&self, value: f64, fraction_digits: u32) -> String {
        let rendered = format!("{:.*}", fraction_digits as usize, value.abs());
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (rendered.as_str(), None),
        };

        let mut grouped = String::with_capacity(rendered.len() + int_part.len() / 3);
        if value < 0.0 {
            grouped.push('-');
        }
        let digits = int_part.len();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (digits - i) % 3 == 0 {
                grouped.push(self.thousands_sep);
            }
            grouped.push(c);
        }
        if let Some(frac) = frac_part {
            grouped.push(self.decimal_sep);
            grouped.push_str(frac);
        }
        grouped
    }

    fn format_plain(&self, value: f64) -> String {
        self.format_number(value, self.decimals)
    }

    /// Parses a string produced by [`format`](Self::format) back into a
    /// number. Accepts the amount with or without the symbol.
    pub fn parse(&self, text: &str) -> Option<f64> {
        let text = text.trim();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let text = text.strip_prefix(self.symbol).unwrap_or(text).trim_start();

        let mut normalized = String::with_capacity(text.len());
        for c in text.chars() {
            if c == self.thousands_sep {
                continue;
            }
            if c == self.decimal_sep {
                normalized.push('.');
            } else {
                normalized.push(c);
            }
        }
        let value: f64 = normalized.parse().ok()?;
        Some(if negative { -value } else { value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_format() {
        assert_eq!(USD.format(110.0), "$110.00");
        assert_eq!(USD.format(1234.5), "$1,234.50");
        assert_eq!(USD.format(1_000_000.0), "$1,000,000.00");
        assert_eq!(USD.format(0.0), "$0.00");
    }

    #[test]
    fn test_idr_format() {
        assert_eq!(IDR.format(16100.0), "Rp 16.100");
        assert_eq!(IDR.format(1_610_000.0), "Rp 1.610.000");
        assert_eq!(IDR.format(500.0), "Rp 500");
        assert_eq!(IDR.format(0.0), "Rp 0");
    }

    #[test]
    fn test_fractional_rate_rendering() {
        assert_eq!(IDR.format_number(15623.45, 2), "15.623,45");
        assert_eq!(IDR.format_number(15623.0, 2), "15.623,00");
    }

    #[test]
    fn test_idr_round_trip_is_lossless_for_integers() {
        for value in [0.0, 500.0, 16100.0, 15623.0, 1_610_000.0, 987_654_321.0] {
            let formatted = IDR.format(value);
            assert_eq!(IDR.parse(&formatted), Some(value), "{formatted}");
        }
    }

    #[test]
    fn test_parse_without_symbol() {
        assert_eq!(IDR.parse("16.100"), Some(16100.0));
        assert_eq!(USD.parse("1,234.50"), Some(1234.5));
        assert_eq!(USD.parse("garbage"), None);
    }
}
