// 画面描画ヘルパー
// 表示用の文字列を組み立てるだけで、状態には一切触れない

use std::fmt::Write as _;

use crate::application::service::reporting::{self, BookingTotals};
use crate::domain::model::{Booking, Event, TicketTier, User};

/// 画面クリア用のエスケープシーケンス
pub const CLEAR: &str = "\x1b[2J\x1b[1;1H";

/// セクション見出し
pub fn header(title: &str) -> String {
    format!("\n===== {} =====", title)
}

/// 長すぎるテキストを省略記号付きで切り詰める
fn truncate(text: &str, limit: usize, keep: usize) -> String {
    if text.chars().count() > limit {
        let head: String = text.chars().take(keep).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// イベント一覧テーブル
/// 各イベントの下に先頭2ティアを表示し、それ以上は件数のみ示す
pub fn event_table(events: &[Event]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(102);

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(
        out,
        "{:<6}{:<30}{:<26}{:<17}{:<22}",
        "ID", "EVENT NAME", "LOCATION", "DATE", "TOTAL TICKETS AVAILABLE"
    );
    let _ = writeln!(out, "{}", rule);

    for event in events {
        let _ = write!(
            out,
            "{:<6}{:<30}{:<26}{:<17}{:<22}",
            event.id().to_string(),
            truncate(event.name(), 24, 21),
            truncate(event.location(), 19, 16),
            event.date().to_string(),
            event.total_available()
        );

        let tier_count = event.tiers().len();
        for (tier_name, tier) in event.tiers().iter().take(2) {
            let _ = write!(
                out,
                "\n     - {:<12}${} ({})",
                tier_name,
                tier.unit_price(),
                tier.remaining()
            );
        }
        if tier_count > 2 {
            let _ = write!(out, "\n     + {} more tiers...", tier_count - 2);
        }

        let _ = writeln!(out, "\n{}", "-".repeat(102));
    }

    out
}

/// 単一イベントの詳細表示
pub fn event_details(event: &Event) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n===== Event Details =====");
    let _ = writeln!(out, "Event ID: {}", event.id());
    let _ = writeln!(out, "Event Name: {}", event.name());
    let _ = writeln!(out, "Location: {}", event.location());
    let _ = writeln!(out, "Date: {}", event.date());
    let _ = writeln!(out, "Available Tickets:");
    for (tier_name, tier) in event.tiers() {
        let _ = writeln!(
            out,
            " - {}: ${} ({} available)",
            tier_name,
            tier.unit_price(),
            tier.remaining()
        );
    }
    let _ = writeln!(out, "Total Tickets: {}", event.total_available());
    let _ = write!(out, "======================");
    out
}

/// ユーザー一覧テーブル
pub fn user_table(users: &[User]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(21);

    let _ = writeln!(out, "\n{}", rule);
    let _ = writeln!(out, "{:<10}{:<30}", "USER ID", "USER NAME");
    let _ = writeln!(out, "{}", rule);

    for user in users {
        let _ = writeln!(out, "{:<10}{:<30}", user.id().to_string(), user.name());
        let _ = writeln!(out, "{}", "-".repeat(21));
    }

    let _ = write!(out, "\nTotal Users: {}", users.len());
    out
}

/// 予約一覧で使う予約可能イベントの1行表示
pub fn bookable_event_line(event: &Event) -> String {
    format!(
        "ID: {} | {} ({} at {})",
        event.id(),
        event.name(),
        event.date(),
        event.location()
    )
}

/// ティア選択メニューの1行表示
pub fn tier_option_line(index: usize, tier_name: &str, tier: &TicketTier) -> String {
    format!(
        "{}. {} - ${} ({} available)",
        index,
        tier_name,
        tier.unit_price(),
        tier.remaining()
    )
}

/// 予約確定前のサマリー表示
pub fn booking_summary(event: &Event, tier_name: &str, tier: &TicketTier, quantity: u32) -> String {
    let total = tier.unit_price().multiply(quantity);
    let mut out = String::new();
    let _ = writeln!(out, "\n===== Booking Summary =====");
    let _ = writeln!(out, "Event: {}", event.name());
    let _ = writeln!(out, "Date: {}", event.date());
    let _ = writeln!(out, "Location: {}", event.location());
    let _ = writeln!(out, "Ticket Tier: {}", tier_name);
    let _ = writeln!(out, "Quantity: {}", quantity);
    let _ = writeln!(out, "Price per Ticket: ${}", tier.unit_price());
    let _ = write!(out, "Total Price: ${}", total);
    out
}

/// イベント情報を引いて予約行を整形する内部ヘルパー
fn booking_row(booking: &Booking, events: &[Event]) -> (String, String, String) {
    match events.iter().find(|e| e.id() == booking.event_id()) {
        Some(event) => (
            event.name().to_string(),
            event.date().to_string(),
            event.location().to_string(),
        ),
        None => (
            "Unknown".to_string(),
            "Unknown".to_string(),
            "Unknown".to_string(),
        ),
    }
}

/// ユーザー自身の予約一覧テーブル
pub fn user_bookings_table(bookings: &[&Booking], events: &[Event]) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<12}{:<15}{:<15}{:<12}{:<15}{:<12}{:<8}{:<12}",
        "Booking ID", "Status", "Event", "Date", "Location", "Tier", "Tickets", "Total Price"
    );
    let _ = writeln!(out, "{}", "-".repeat(95));

    for booking in bookings {
        let (event_name, event_date, event_location) = booking_row(booking, events);
        let _ = writeln!(
            out,
            "{:<12}{:<15}{:<15}{:<12}{:<15}{:<12}{:<8}${}",
            booking.id().to_string(),
            booking.status().to_string(),
            truncate(&event_name, 14, 11),
            event_date,
            truncate(&event_location, 14, 11),
            booking.tier_name(),
            booking.tickets(),
            booking.total_price()
        );
    }

    out
}

/// 管理者向けの全予約レポート
/// ユーザーごとにグループ化し、ユーザー別・システム全体の集計を付ける
pub fn admin_bookings_report(bookings: &[Booking], users: &[User], events: &[Event]) -> String {
    let mut out = String::new();
    let grouped = reporting::bookings_by_user(bookings);

    for (user_id, user_bookings) in &grouped {
        let user_name = users
            .iter()
            .find(|u| u.id() == *user_id)
            .map(|u| u.name().to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        let _ = writeln!(out, "\n===== USER: {} (ID: {}) =====", user_name, user_id);
        let _ = writeln!(out, "{}", "-".repeat(95));
        let _ = writeln!(
            out,
            "{:<12}{:<12}{:<20}{:<12}{:<15}{:<8}{:<12}{:<12}",
            "Booking ID",
            "Event ID",
            "Event Name",
            "Date",
            "Ticket Tier",
            "Tickets",
            "Total Price",
            "Status"
        );
        let _ = writeln!(out, "{}", "-".repeat(95));

        for booking in user_bookings {
            let (event_name, event_date, _) = booking_row(booking, events);
            let _ = writeln!(
                out,
                "{:<12}{:<12}{:<20}{:<12}{:<15}{:<8}${:<11}{:<12}",
                booking.id().to_string(),
                booking.event_id().to_string(),
                truncate(&event_name, 19, 16),
                event_date,
                booking.tier_name(),
                booking.tickets(),
                booking.total_price().to_string(),
                booking.status().to_string()
            );
        }

        let user_totals = reporting::booking_totals(user_bookings.iter().copied());
        let _ = writeln!(out, "{}", "-".repeat(95));
        let _ = writeln!(
            out,
            "USER TOTALS: {} tickets | ${}",
            user_totals.confirmed_tickets, user_totals.confirmed_revenue
        );
    }

    let totals = reporting::booking_totals(bookings.iter());
    let _ = write!(out, "\n{}", system_totals_block(&totals));
    out
}

/// システム全体の集計ブロック
pub fn system_totals_block(totals: &BookingTotals) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "===== SYSTEM TOTALS =====");
    let _ = writeln!(
        out,
        "TOTAL BOOKINGS: {} (Confirmed: {}, Cancelled: {})",
        totals.total_count(),
        totals.confirmed_count,
        totals.cancelled_count
    );
    let _ = writeln!(out, "TOTAL CONFIRMED TICKETS: {}", totals.confirmed_tickets);
    let _ = write!(out, "TOTAL REVENUE: ${}", totals.confirmed_revenue);
    out
}
