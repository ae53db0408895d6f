use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

use std::fmt;

/// イベントの一意識別子
/// 1始まりの連番で採番される
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(u32);

impl EventId {
    /// 採番済みの値からEventIdを作成
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// 内部の整数値を取得
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーの一意識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(u32);

impl UserId {
    /// 採番済みの値からUserIdを作成
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// 内部の整数値を取得
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 予約の一意識別子
/// プロセス存続期間を通して単調増加する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookingId(u32);

impl BookingId {
    /// 採番済みの値からBookingIdを作成
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// 内部の整数値を取得
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 金額を表す値オブジェクト
/// 丸め誤差を避けるためセント単位で保持し、表示は常に小数点以下2桁
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
}

impl Money {
    /// セント単位の金額から作成
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// ゼロ金額
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// "100", "100.5", "100.00" 形式の文字列から作成
    /// 負数や小数点以下3桁以上は拒否する
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let trimmed = text.trim();
        let (whole, frac) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (trimmed, ""),
        };

        let whole_valid = !whole.is_empty() && whole.chars().all(|c| c.is_ascii_digit());
        let frac_valid = frac.len() <= 2 && frac.chars().all(|c| c.is_ascii_digit());
        if !whole_valid || !frac_valid {
            return Err(DomainError::InvalidValue(format!(
                "not a valid amount: {}",
                text
            )));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| DomainError::InvalidValue(format!("amount out of range: {}", text)))?;
        let frac_cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        whole
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac_cents))
            .map(Self::from_cents)
            .ok_or_else(|| DomainError::InvalidValue(format!("amount out of range: {}", text)))
    }

    /// セント単位の金額を取得
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// 金額を加算
    pub fn add(&self, other: &Money) -> Money {
        Money {
            cents: self.cents + other.cents,
        }
    }

    /// 金額を乗算（枚数 × 単価の計算に使用）
    pub fn multiply(&self, factor: u32) -> Money {
        Money {
            cents: self.cents * factor as i64,
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

/// イベント開催日を表す値オブジェクト
/// DD-MM-YYYY形式・実在する暦日・2025年以降のみ許容する
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDate {
    day: u32,
    month: u32,
    year: u32,
}

impl EventDate {
    /// 最小許容年
    const MIN_YEAR: u32 = 2025;

    /// DD-MM-YYYY形式の文字列から作成
    /// 拒否理由ごとに異なる診断メッセージを返す
    pub fn parse(text: &str) -> Result<Self, DomainError> {
        let bytes = text.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes[2] == b'-'
            && bytes[5] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 2 || i == 5 || b.is_ascii_digit());
        if !well_formed {
            return Err(DomainError::InvalidDate(
                "must be in DD-MM-YYYY format (e.g., 15-06-2025)".to_string(),
            ));
        }

        // 形式検証済みなので数値変換は失敗しない
        let day: u32 = text[0..2].parse().unwrap_or(0);
        let month: u32 = text[3..5].parse().unwrap_or(0);
        let year: u32 = text[6..10].parse().unwrap_or(0);

        if year < Self::MIN_YEAR {
            return Err(DomainError::InvalidDate(format!(
                "events can only be scheduled for {} or later",
                Self::MIN_YEAR
            )));
        }
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidDate(
                "month must be between 01 and 12".to_string(),
            ));
        }
        if !(1..=31).contains(&day) {
            return Err(DomainError::InvalidDate(
                "day must be between 01 and 31".to_string(),
            ));
        }
        if matches!(month, 4 | 6 | 9 | 11) && day > 30 {
            return Err(DomainError::InvalidDate(
                "this month only has 30 days".to_string(),
            ));
        }
        if month == 2 {
            let leap = year % 400 == 0 || (year % 100 != 0 && year % 4 == 0);
            let feb_days = if leap { 29 } else { 28 };
            if day > feb_days {
                return Err(DomainError::InvalidDate(format!(
                    "February only has {} days in {}",
                    feb_days, year
                )));
            }
        }

        Ok(Self { day, month, year })
    }

    /// 日を取得
    pub fn day(&self) -> u32 {
        self.day
    }

    /// 月を取得
    pub fn month(&self) -> u32 {
        self.month
    }

    /// 年を取得
    pub fn year(&self) -> u32 {
        self.year
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

/// チケットティア
/// 単価と残数を持つイベント内のチケット区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketTier {
    unit_price: Money,
    remaining: u32,
}

impl TicketTier {
    /// 単価と残数からティアを作成
    pub fn new(unit_price: Money, remaining: u32) -> Self {
        Self {
            unit_price,
            remaining,
        }
    }

    /// 単価を取得
    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// 残数を取得
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// 指定枚数の在庫があるかチェック
    pub fn has_available(&self, quantity: u32) -> bool {
        quantity > 0 && quantity <= self.remaining
    }

    /// チケットを確保して残数を減らす
    ///
    /// # Returns
    /// * `Ok(())` - 確保成功
    /// * `Err(DomainError::InsufficientInventory)` - 0枚の要求または在庫不足
    pub fn reserve(&mut self, quantity: u32) -> Result<(), DomainError> {
        if !self.has_available(quantity) {
            return Err(DomainError::InsufficientInventory);
        }
        self.remaining -= quantity;
        Ok(())
    }

    /// チケットを解放して残数を戻す（キャンセル時）
    pub fn release(&mut self, quantity: u32) {
        self.remaining += quantity;
    }
}

/// 予約のステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// 確定済み（作成直後の状態）
    Confirmed,
    /// キャンセル済み（終端状態）
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Cancelled => "Cancelled",
        };
        write!(f, "{}", status_str)
    }
}

impl BookingStatus {
    /// 文字列からBookingStatusを作成
    pub fn from_string(s: &str) -> Result<Self, DomainError> {
        match s {
            "Confirmed" => Ok(BookingStatus::Confirmed),
            "Cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(DomainError::InvalidValue(format!(
                "unknown booking status: {}",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_parse_whole_and_fraction() {
        assert_eq!(Money::parse("100").unwrap().cents(), 10_000);
        assert_eq!(Money::parse("100.5").unwrap().cents(), 10_050);
        assert_eq!(Money::parse("100.00").unwrap().cents(), 10_000);
        assert_eq!(Money::parse("0.99").unwrap().cents(), 99);
    }

    #[test]
    fn test_money_parse_rejects_garbage() {
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("-5").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1.").is_ok()); // "1." は 1.00 と解釈
    }

    #[test]
    fn test_money_display_two_decimals() {
        assert_eq!(Money::from_cents(10_000).to_string(), "100.00");
        assert_eq!(Money::from_cents(105).to_string(), "1.05");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
    }

    #[test]
    fn test_money_multiply() {
        let price = Money::parse("100.00").unwrap();
        assert_eq!(price.multiply(2), Money::from_cents(20_000));
        assert_eq!(price.multiply(0), Money::zero());
    }

    #[test]
    fn test_event_date_accepts_valid_dates() {
        assert!(EventDate::parse("15-06-2025").is_ok());
        assert!(EventDate::parse("31-12-2030").is_ok());
        assert!(EventDate::parse("29-02-2028").is_ok()); // うるう年
        assert!(EventDate::parse("29-02-2400").is_ok()); // 400で割り切れる年
    }

    #[test]
    fn test_event_date_rejects_bad_format() {
        assert!(EventDate::parse("2025-06-15").is_err());
        assert!(EventDate::parse("15/06/2025").is_err());
        assert!(EventDate::parse("1-6-2025").is_err());
        assert!(EventDate::parse("").is_err());
    }

    #[test]
    fn test_event_date_rejects_past_years() {
        // 年の検証は暦の検証より先に行われる
        assert!(EventDate::parse("15-06-2024").is_err());
        assert!(EventDate::parse("29-02-2024").is_err());
    }

    #[test]
    fn test_event_date_rejects_impossible_days() {
        assert!(EventDate::parse("31-04-2025").is_err()); // 4月は30日まで
        assert!(EventDate::parse("31-06-2025").is_err());
        assert!(EventDate::parse("29-02-2027").is_err()); // 平年
        assert!(EventDate::parse("29-02-2100").is_err()); // 100で割り切れるが400では割り切れない
        assert!(EventDate::parse("00-06-2025").is_err());
        assert!(EventDate::parse("15-00-2025").is_err());
    }

    #[test]
    fn test_event_date_display_round_trips() {
        let date = EventDate::parse("05-01-2026").unwrap();
        assert_eq!(date.to_string(), "05-01-2026");
    }

    #[test]
    fn test_tier_reserve_success() {
        let mut tier = TicketTier::new(Money::from_cents(5_000), 10);
        assert!(tier.reserve(4).is_ok());
        assert_eq!(tier.remaining(), 6);
    }

    #[test]
    fn test_tier_reserve_exact_quantity() {
        let mut tier = TicketTier::new(Money::from_cents(5_000), 10);
        assert!(tier.reserve(10).is_ok());
        assert_eq!(tier.remaining(), 0);
    }

    #[test]
    fn test_tier_reserve_insufficient() {
        let mut tier = TicketTier::new(Money::from_cents(5_000), 3);
        let result = tier.reserve(4);
        assert_eq!(result.unwrap_err(), DomainError::InsufficientInventory);
        assert_eq!(tier.remaining(), 3); // 残数は変わらない
    }

    #[test]
    fn test_tier_reserve_zero_fails() {
        let mut tier = TicketTier::new(Money::from_cents(5_000), 3);
        assert!(tier.reserve(0).is_err());
    }

    #[test]
    fn test_tier_release_restores() {
        let mut tier = TicketTier::new(Money::from_cents(5_000), 5);
        tier.reserve(5).unwrap();
        tier.release(5);
        assert_eq!(tier.remaining(), 5);
    }

    #[test]
    fn test_booking_status_round_trip() {
        assert_eq!(
            BookingStatus::from_string("Confirmed").unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(
            BookingStatus::from_string("Cancelled").unwrap(),
            BookingStatus::Cancelled
        );
        assert!(BookingStatus::from_string("Pending").is_err());
    }
}
