use std::io;

use crate::adapter::app_config::AppConfig;
use crate::adapter::driver::{prompt, screen};
use crate::application::error::ApplicationError;
use crate::application::service::booking_engine::BookingEngine;
use crate::domain::model::{BookingId, EventId, Money, TicketTier, UserId};

/// コンソールシェル
/// 対話メニューを駆動し、ユーザーの意図を予約エンジンの呼び出しに変換する。
/// 入力の検証エラーはこの層で再入力により回復し、
/// ドメイン・アプリケーションのエラーはメッセージとして表示する
pub struct ConsoleShell {
    engine: BookingEngine,
    admin_username: String,
    admin_password: String,
}

impl ConsoleShell {
    /// エンジンと設定からシェルを作成
    pub fn new(engine: BookingEngine, config: &AppConfig) -> Self {
        Self {
            engine,
            admin_username: config.admin_username.clone(),
            admin_password: config.admin_password.clone(),
        }
    }

    /// メインメニューのループを実行する
    /// 終了時には3コレクションすべてを無条件に永続化する
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            print!("{}", screen::CLEAR);
            println!("{}", screen::header("EVENT TICKETING SYSTEM"));
            println!(
                "1. Register User\n\
                 2. View All Events\n\
                 3. Book Tickets\n\
                 4. Cancel Booking\n\
                 5. View My Bookings\n\
                 6. Admin Login\n\
                 7. Exit"
            );

            match prompt::menu_choice("Enter your choice: ", 1, 7)? {
                1 => self.register_user_flow().await?,
                2 => self.view_events_flow()?,
                3 => self.book_tickets_flow().await?,
                4 => self.cancel_booking_flow().await?,
                5 => self.my_bookings_flow()?,
                6 => {
                    if self.admin_login()? {
                        self.admin_panel().await?;
                    }
                }
                _ => {
                    self.engine.persist_all().await;
                    println!("\nExiting program. Goodbye!");
                    return Ok(());
                }
            }
        }
    }

    /// ユーザー登録フロー
    async fn register_user_flow(&mut self) -> io::Result<()> {
        println!("{}", screen::header("USER REGISTRATION"));
        println!("Your User ID: {}", self.engine.next_user_id());

        let name = prompt::read_line("Enter User Name: ")?;
        match self.engine.register_user(name).await {
            Ok(_) => println!("\nUser registered successfully!"),
            Err(err) => println!("\nRegistration failed: {}", err),
        }

        prompt::wait_for_enter()
    }

    /// イベント一覧表示フロー
    fn view_events_flow(&self) -> io::Result<()> {
        println!("{}", screen::header("AVAILABLE EVENTS"));
        if self.engine.events().is_empty() {
            println!("No events available.");
        } else {
            println!("{}", screen::event_table(self.engine.events()));
        }
        prompt::wait_for_enter()
    }

    /// チケット予約フロー
    /// ティアは名前順の安定した番号付きで提示される（0で戻る）
    async fn book_tickets_flow(&mut self) -> io::Result<()> {
        println!("{}", screen::header("BOOK TICKETS"));

        if self.engine.events().is_empty() {
            println!("No events available for booking.");
            return prompt::wait_for_enter();
        }
        if self.engine.users().is_empty() {
            println!("No users registered. Please register first.");
            return prompt::wait_for_enter();
        }

        let user_id = UserId::new(prompt::read_u32("Enter User ID: ")?);
        if self.engine.user(user_id).is_none() {
            println!("User ID not found.");
            return prompt::wait_for_enter();
        }

        println!("\n===== Available Events =====");
        for event in self.engine.bookable_events() {
            println!("{}", screen::bookable_event_line(event));
        }

        let event_id = EventId::new(prompt::read_u32("\nEnter Event ID to book: ")?);
        let Some(event) = self.engine.event(event_id) else {
            println!("Event ID not found.");
            return prompt::wait_for_enter();
        };

        if event.total_available() == 0 {
            println!("This event is sold out.");
            return prompt::wait_for_enter();
        }

        // 残数のあるティアだけを名前順に番号付けする
        let available_tiers: Vec<(String, TicketTier)> = event
            .tiers()
            .iter()
            .filter(|(_, tier)| tier.remaining() > 0)
            .map(|(name, tier)| (name.clone(), *tier))
            .collect();

        println!("\n===== Available Ticket Tiers =====");
        println!("0. Go back");
        for (index, (tier_name, tier)) in available_tiers.iter().enumerate() {
            println!("{}", screen::tier_option_line(index + 1, tier_name, tier));
        }

        if available_tiers.is_empty() {
            println!("No ticket tiers available.");
            return prompt::wait_for_enter();
        }

        let tier_choice = prompt::menu_choice(
            &format!("\nSelect ticket tier (0-{}): ", available_tiers.len()),
            0,
            available_tiers.len() as u32,
        )?;
        if tier_choice == 0 {
            println!("Returning to menu.");
            return prompt::wait_for_enter();
        }

        let (tier_name, tier) = &available_tiers[(tier_choice - 1) as usize];

        let quantity = loop {
            let quantity = prompt::read_u32("Number of tickets to book: ")?;
            if quantity == 0 {
                println!("Please enter at least 1 ticket.");
            } else if quantity > tier.remaining() {
                println!("Only {} tickets available.", tier.remaining());
            } else {
                break quantity;
            }
        };

        println!("{}", screen::booking_summary(event, tier_name, tier, quantity));

        if !prompt::confirm("\nConfirm booking? (Y/N): ")? {
            println!("Booking cancelled.");
            return prompt::wait_for_enter();
        }

        match self
            .engine
            .book_tickets(user_id, event_id, tier_name, quantity)
            .await
        {
            Ok(confirmation) => {
                println!("\nBooking confirmed!");
                println!("Booking ID: {}", confirmation.booking_id);
            }
            Err(err) => println!("\nBooking failed: {}", err),
        }

        prompt::wait_for_enter()
    }

    /// 予約キャンセルフロー
    async fn cancel_booking_flow(&mut self) -> io::Result<()> {
        println!("{}", screen::header("CANCEL BOOKING"));

        if self.engine.bookings().is_empty() {
            println!("No bookings to cancel.");
            return prompt::wait_for_enter();
        }

        let booking_id = BookingId::new(prompt::read_u32("Enter Booking ID to cancel: ")?);
        match self.engine.cancel_booking(booking_id).await {
            Ok(summary) => {
                println!("\n===== Cancellation Summary =====");
                println!("Booking ID: {} cancelled", summary.booking_id);
                println!("{} tickets released", summary.tickets_released);
            }
            Err(ApplicationError::BookingNotFound(_)) => {
                println!("Booking not found or already cancelled.");
            }
            Err(err) => println!("Cancellation failed: {}", err),
        }

        prompt::wait_for_enter()
    }

    /// 自分の予約一覧フロー
    fn my_bookings_flow(&self) -> io::Result<()> {
        println!("{}", screen::header("MY BOOKINGS"));

        if self.engine.bookings().is_empty() {
            println!("No bookings found.");
            return prompt::wait_for_enter();
        }

        let user_id = UserId::new(prompt::read_u32("Enter your User ID: ")?);
        let user_name = self
            .engine
            .user(user_id)
            .map(|u| u.name().to_string())
            .unwrap_or_else(|| "No user found with this id".to_string());

        println!("\nUser: {} (ID: {})\n", user_name, user_id);

        let bookings = self.engine.bookings_for_user(user_id);
        if bookings.is_empty() {
            println!("No bookings found for User ID: {}", user_id);
        } else {
            println!(
                "{}",
                screen::user_bookings_table(&bookings, self.engine.events())
            );
        }

        prompt::wait_for_enter()
    }

    /// 管理者ログイン
    /// パスワードはエコーなしで入力させる
    fn admin_login(&self) -> io::Result<bool> {
        println!("{}", screen::header("ADMIN LOGIN"));
        let username = prompt::read_line("Username: ")?;
        let password = prompt::read_password("Password: ")?;

        if username != self.admin_username || password != self.admin_password {
            println!("Access denied! Invalid credentials.");
            prompt::wait_for_enter()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// 管理者パネルのループ
    async fn admin_panel(&mut self) -> io::Result<()> {
        loop {
            print!("{}", screen::CLEAR);
            println!("{}", screen::header("ADMIN PANEL"));
            println!(
                "1. Register New Event\n\
                 2. View All Events\n\
                 3. View All Users\n\
                 4. View All Bookings\n\
                 5. Return to Main Menu"
            );

            match prompt::menu_choice("Enter your choice: ", 1, 5)? {
                1 => self.register_event_flow().await?,
                2 => {
                    println!("{}", screen::header("ALL EVENTS"));
                    if self.engine.events().is_empty() {
                        println!("No events registered yet.");
                    } else {
                        println!("{}", screen::event_table(self.engine.events()));
                    }
                    prompt::wait_for_enter()?;
                }
                3 => {
                    println!("{}", screen::header("ALL USERS"));
                    if self.engine.users().is_empty() {
                        println!("No users registered.");
                    } else {
                        println!("{}", screen::user_table(self.engine.users()));
                    }
                    prompt::wait_for_enter()?;
                }
                4 => {
                    println!("{}", screen::header("ALL BOOKINGS - ADMIN VIEW"));
                    if self.engine.bookings().is_empty() {
                        println!("No bookings found.");
                    } else {
                        println!(
                            "{}",
                            screen::admin_bookings_report(
                                self.engine.bookings(),
                                self.engine.users(),
                                self.engine.events()
                            )
                        );
                    }
                    prompt::wait_for_enter()?;
                }
                _ => return Ok(()),
            }
        }
    }

    /// イベント登録フロー
    /// 日付は検証を通るまで再入力を促す。
    /// ティアが1つも入力されなければ既定の"Standard"ティアを合成する
    async fn register_event_flow(&mut self) -> io::Result<()> {
        println!("{}", screen::header("REGISTER NEW EVENT"));
        println!("Event ID: {}", self.engine.next_event_id());

        let name = prompt::read_line("Enter Event Name: ")?;
        let location = prompt::read_line("Enter Event Location: ")?;

        let date = loop {
            let date = prompt::read_line("Enter Event Date (DD-MM-YYYY): ")?;
            match crate::domain::model::EventDate::parse(&date) {
                Ok(_) => break date,
                Err(err) => println!("Error: {}", err),
            }
        };

        let mut tiers: Vec<(String, Money, u32)> = Vec::new();
        loop {
            println!("\nAdd Ticket Category (or 'done' to finish):");
            let tier_name = prompt::read_line("Enter Category Name: ")?;
            if tier_name == "done" {
                break;
            }

            let price = prompt::read_money("Enter price for this category: $")?;
            let quantity = prompt::read_u32("Enter available quantity of tickets: ")?;
            tiers.push((tier_name, price, quantity));
        }

        if tiers.is_empty() {
            println!("\nAdding default ticket category...");
            let price = prompt::read_money("Enter default ticket price: $")?;
            let quantity = prompt::read_u32("Enter available quantity: ")?;
            tiers.push(("Standard".to_string(), price, quantity));
        }

        match self.engine.register_event(name, location, &date, tiers).await {
            Ok(_) => println!("\nEvent registered successfully!"),
            Err(err) => println!("\nEvent registration failed: {}", err),
        }

        prompt::wait_for_enter()
    }
}
