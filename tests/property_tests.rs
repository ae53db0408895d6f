use proptest::prelude::*;

use event_ticket_management::application::service::reporting;
use event_ticket_management::domain::model::{
    Booking, BookingId, BookingStatus, EventDate, EventId, Money, TicketTier, UserId,
};
use event_ticket_management::domain::service::{next_id, IdAllocator};

// Money のプロパティベーステスト
proptest! {
    /// Money の加算は交換法則を満たす (a + b = b + a)
    #[test]
    fn test_money_addition_is_commutative(
        cents1 in 0i64..1_000_000,
        cents2 in 0i64..1_000_000,
    ) {
        let money1 = Money::from_cents(cents1);
        let money2 = Money::from_cents(cents2);

        prop_assert_eq!(money1.add(&money2), money2.add(&money1));
    }

    /// Money の乗算は分配法則を満たす (a * (b + c) = a * b + a * c)
    #[test]
    fn test_money_multiplication_distributive(
        base_cents in 1i64..10_000,
        factor1 in 1u32..100,
        factor2 in 1u32..100,
    ) {
        let money = Money::from_cents(base_cents);

        let left_side = money.multiply(factor1 + factor2);
        let right_side = money.multiply(factor1).add(&money.multiply(factor2));

        prop_assert_eq!(left_side, right_side);
    }

    /// Money の表示は常に小数点以下2桁で、パースすると元に戻る
    #[test]
    fn test_money_display_parse_round_trip(
        cents in 0i64..1_000_000_000,
    ) {
        let money = Money::from_cents(cents);
        let text = money.to_string();

        let decimals = text.split('.').nth(1).map(str::len);
        prop_assert_eq!(decimals, Some(2));
        prop_assert_eq!(Money::parse(&text).unwrap(), money);
    }
}

// ID採番のプロパティベーステスト
proptest! {
    /// next_id は既存のどのIDとも衝突せず、常に最大値より大きい
    #[test]
    fn test_next_id_never_collides(
        ids in prop::collection::vec(1u32..1_000_000, 0..50),
    ) {
        let next = next_id(ids.iter().copied());

        prop_assert!(!ids.contains(&next));
        prop_assert!(ids.iter().all(|&id| id < next));
        if ids.is_empty() {
            prop_assert_eq!(next, 1);
        }
    }

    /// 採番カウンターは常に単調増加で、同じIDを二度払い出さない
    #[test]
    fn test_allocator_is_strictly_monotonic(
        seed_ids in prop::collection::vec(1u32..10_000, 0..20),
        count in 1usize..50,
    ) {
        let mut allocator = IdAllocator::seeded_from(seed_ids.iter().copied());

        let mut allocated = Vec::new();
        for _ in 0..count {
            allocated.push(allocator.allocate());
        }

        for pair in allocated.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        // シード元のIDも再発行されない
        for id in &allocated {
            prop_assert!(!seed_ids.contains(id));
        }
    }
}

// チケットティア在庫のプロパティベーステスト
proptest! {
    /// 予約と解放は可逆的である
    #[test]
    fn test_tier_reserve_release_reversible(
        initial in 1u32..1_000,
        reserve in 1u32..1_000,
    ) {
        prop_assume!(reserve <= initial);
        let mut tier = TicketTier::new(Money::from_cents(1_000), initial);

        tier.reserve(reserve).unwrap();
        prop_assert_eq!(tier.remaining(), initial - reserve);

        tier.release(reserve);
        prop_assert_eq!(tier.remaining(), initial);
    }

    /// どんな予約要求の列に対しても残数の整合性が保たれる
    /// 成功した予約の合計は初期在庫を超えず、失敗した予約は残数を変えない
    #[test]
    fn test_tier_never_oversells(
        initial in 0u32..100,
        requests in prop::collection::vec(0u32..50, 1..30),
    ) {
        let mut tier = TicketTier::new(Money::from_cents(500), initial);
        let mut expected_remaining = initial;

        for request in requests {
            let before = tier.remaining();
            match tier.reserve(request) {
                Ok(()) => {
                    prop_assert!(request >= 1 && request <= before);
                    expected_remaining -= request;
                }
                Err(_) => {
                    prop_assert_eq!(tier.remaining(), before);
                }
            }
            prop_assert_eq!(tier.remaining(), expected_remaining);
        }

        let reserved_total = initial - expected_remaining;
        prop_assert!(reserved_total <= initial);
    }
}

// 日付検証のプロパティベーステスト

/// 月ごとの日数（テスト側の独立した実装）
fn days_in_month(month: u32, year: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            if year % 400 == 0 || (year % 100 != 0 && year % 4 == 0) {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

proptest! {
    /// 実在する暦日（2025年以降）はすべて受理される
    #[test]
    fn test_valid_calendar_dates_accepted(
        year in 2025u32..2400,
        month in 1u32..=12,
        day_seed in 1u32..=31,
    ) {
        let day = day_seed.min(days_in_month(month, year));
        let text = format!("{:02}-{:02}-{:04}", day, month, year);

        let parsed = EventDate::parse(&text).unwrap();
        prop_assert_eq!(parsed.day(), day);
        prop_assert_eq!(parsed.month(), month);
        prop_assert_eq!(parsed.year(), year);
        prop_assert_eq!(parsed.to_string(), text);
    }

    /// 月の日数を超える日付は拒否される（31日未満の月のみが対象）
    #[test]
    fn test_days_beyond_month_length_rejected(
        year in 2025u32..2400,
        month in prop::sample::select(vec![2u32, 4, 6, 9, 11]),
        excess in 1u32..4,
    ) {
        let day = days_in_month(month, year) + excess;
        prop_assume!(day <= 31); // 32日以上は日範囲の検査で別途落ちる
        let text = format!("{:02}-{:02}-{:04}", day, month, year);

        prop_assert!(EventDate::parse(&text).is_err());
    }

    /// 2025年より前の年はすべて拒否される
    #[test]
    fn test_years_before_minimum_rejected(
        year in 1000u32..2025,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let text = format!("{:02}-{:02}-{:04}", day, month, year);
        prop_assert!(EventDate::parse(&text).is_err());
    }
}

// 集計のプロパティベーステスト
proptest! {
    /// システム売上は確定済み予約のtotalPriceの合計と常に一致する
    #[test]
    fn test_revenue_equals_sum_of_confirmed(
        records in prop::collection::vec(
            (1u32..100, 1i64..100_000, any::<bool>()),
            0..30,
        ),
    ) {
        let mut bookings = Vec::new();
        let mut expected_revenue = 0i64;
        let mut expected_tickets = 0u32;

        for (index, (tickets, price_cents, confirmed)) in records.iter().enumerate() {
            let status = if *confirmed {
                expected_revenue += price_cents;
                expected_tickets += tickets;
                BookingStatus::Confirmed
            } else {
                BookingStatus::Cancelled
            };

            bookings.push(
                Booking::reconstruct(
                    BookingId::new(index as u32 + 1),
                    UserId::new(1),
                    EventId::new(1),
                    "Standard".to_string(),
                    *tickets,
                    Money::from_cents(*price_cents),
                    status,
                )
                .unwrap(),
            );
        }

        let totals = reporting::booking_totals(bookings.iter());
        prop_assert_eq!(totals.confirmed_revenue, Money::from_cents(expected_revenue));
        prop_assert_eq!(totals.confirmed_tickets, expected_tickets);
        prop_assert_eq!(totals.total_count(), bookings.len());
    }
}
