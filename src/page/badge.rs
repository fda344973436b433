use chrono::NaiveDate;

/// Days left until the next weekly course start, always in 1..=7.
/// The anchor marks a known start date, starts repeat every 7 days.
pub fn days_until_start(today: NaiveDate, anchor: NaiveDate) -> i64 {
    7 - today.signed_duration_since(anchor).num_days().rem_euclid(7)
}

pub fn text(days: i64) -> String {
    let noun = match days {
        1 => "день",
        2..=4 => "дня",
        _ => "дней",
    };
    format!("🔥 Старт потока через {} {}", days, noun)
}
