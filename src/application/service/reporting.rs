use std::collections::BTreeMap;

use crate::domain::model::{Booking, Money, UserId};

/// 予約コレクションの集計結果
/// 枚数と売上は確定済み予約のみを対象とする
#[derive(Debug, Clone, PartialEq)]
pub struct BookingTotals {
    /// 確定済み予約の合計枚数
    pub confirmed_tickets: u32,
    /// 確定済み予約の合計売上
    pub confirmed_revenue: Money,
    /// 確定済み予約の件数
    pub confirmed_count: usize,
    /// キャンセル済み予約の件数
    pub cancelled_count: usize,
}

impl BookingTotals {
    /// ステータスを問わない予約の総件数
    pub fn total_count(&self) -> usize {
        self.confirmed_count + self.cancelled_count
    }
}

/// 予約の集まりを集計する
pub fn booking_totals<'a, I>(bookings: I) -> BookingTotals
where
    I: IntoIterator<Item = &'a Booking>,
{
    let mut totals = BookingTotals {
        confirmed_tickets: 0,
        confirmed_revenue: Money::zero(),
        confirmed_count: 0,
        cancelled_count: 0,
    };

    for booking in bookings {
        if booking.is_confirmed() {
            totals.confirmed_tickets += booking.tickets();
            totals.confirmed_revenue = totals.confirmed_revenue.add(&booking.total_price());
            totals.confirmed_count += 1;
        } else {
            totals.cancelled_count += 1;
        }
    }

    totals
}

/// 予約をユーザーIDごとにグループ化する
/// グループはユーザーIDの昇順で列挙される
pub fn bookings_by_user(bookings: &[Booking]) -> BTreeMap<UserId, Vec<&Booking>> {
    let mut grouped: BTreeMap<UserId, Vec<&Booking>> = BTreeMap::new();
    for booking in bookings {
        grouped.entry(booking.user_id()).or_default().push(booking);
    }
    grouped
}
