use super::PageView;
use crate::model::ExchangeRate;

pub fn update(view: &mut dyn PageView, rate: &ExchangeRate) {
    view.set_price(&format_price(rate.price));
    view.set_change(&format_change(rate.price_change_24h));
    view.set_direction(rate.price_change_24h >= 0.0);
}

/// Prices under a dollar keep four decimals, everything else two,
/// with thousands grouping from $1000 up.
pub fn format_price(price: f64) -> String {
    if price >= 1000.0 {
        let text = format!("{:.2}", price);
        let (int, frac) = text.split_once('.').unwrap();
        let mut grouped = String::new();
        for (i, c) in int.chars().enumerate() {
            if i > 0 && (int.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        format!("${}.{}", grouped, frac)
    } else if price >= 1.0 {
        format!("${:.2}", price)
    } else {
        format!("${:.4}", price)
    }
}

pub fn format_change(change: f64) -> String {
    if change >= 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

#[cfg(test)]
mod test {
    use super::{format_change, format_price, update, PageView};
    use crate::model::{ExchangeRate, Id};
    use chrono::Utc;

    #[derive(Default)]
    struct HeroView {
        price: Option<String>,
        change: Option<String>,
        direction: Option<bool>,
    }

    impl PageView for HeroView {
        fn set_price(&mut self, text: &str) {
            self.price = Some(text.into());
        }

        fn set_change(&mut self, text: &str) {
            self.change = Some(text.into());
        }

        fn set_direction(&mut self, positive: bool) {
            self.direction = Some(positive);
        }
    }

    #[test]
    fn update_renders_price_change_and_direction() {
        let mut view = HeroView::default();
        update(&mut view, &rate(45000.5, 1.5));
        assert_eq!(Some("$45,000.50".to_string()), view.price);
        assert_eq!(Some("+1.50%".to_string()), view.change);
        assert_eq!(Some(true), view.direction);
    }

    #[test]
    fn update_flags_negative_change() {
        let mut view = HeroView::default();
        update(&mut view, &rate(0.0032, -3.25));
        assert_eq!(Some("$0.0032".to_string()), view.price);
        assert_eq!(Some("-3.25%".to_string()), view.change);
        assert_eq!(Some(false), view.direction);
    }

    fn rate(price: f64, change: f64) -> ExchangeRate {
        ExchangeRate {
            id: Id::new(),
            pair: "BTC-USD".into(),
            price,
            price_change_24h: change,
            volume_24h: 1_000_000.0,
            high_24h: price * 1.02,
            low_24h: price * 0.98,
            market_cap: 10_000_000.0,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn format_price_large() {
        assert_eq!("$45,000.50", format_price(45000.5));
        assert_eq!("$1,000.00", format_price(1000.0));
        assert_eq!("$1,234,567.89", format_price(1234567.891));
    }

    #[test]
    fn format_price_medium() {
        assert_eq!("$3.10", format_price(3.1));
        assert_eq!("$999.99", format_price(999.99));
        assert_eq!("$1.00", format_price(1.0));
    }

    #[test]
    fn format_price_small() {
        assert_eq!("$0.0032", format_price(0.0032));
        assert_eq!("$0.9900", format_price(0.99));
    }

    #[test]
    fn format_change_signed() {
        assert_eq!("+1.50%", format_change(1.5));
        assert_eq!("+0.00%", format_change(0.0));
        assert_eq!("-3.25%", format_change(-3.25));
    }
}
