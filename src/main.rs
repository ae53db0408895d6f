use std::sync::Arc;

use event_ticket_management::adapter::driven::{
    ConsoleLogger, FlatFileBookingRepository, FlatFileEventRepository, FlatFileUserRepository,
    InMemoryEventBus,
};
use event_ticket_management::adapter::driver::ConsoleShell;
use event_ticket_management::adapter::{AppConfig, StoreBootstrap};
use event_ticket_management::application::service::BookingEngine;
use event_ticket_management::domain::handler::NotificationHandler;
use event_ticket_management::domain::port::Logger;

// 対話型の単一利用者向けアプリケーションのため、
// ランタイムはシングルスレッドで動かす
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Event Ticketing System ===");
    println!();

    // .envファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;

    // データディレクトリとコレクションファイルを初期化
    StoreBootstrap::new(&config).run().await?;

    let logger: Arc<dyn Logger> = Arc::new(ConsoleLogger::new());

    // フラットファイルリポジトリを作成
    let event_repository = Arc::new(FlatFileEventRepository::new(config.events_path()));
    let user_repository = Arc::new(FlatFileUserRepository::new(config.users_path()));
    let booking_repository = Arc::new(FlatFileBookingRepository::new(config.bookings_path()));

    // イベントバスを作成し、通知ハンドラーを登録
    let event_bus = Arc::new(InMemoryEventBus::new(logger.clone()));
    let notification_handler = NotificationHandler::new(logger.clone());
    event_bus
        .subscribe_booking_confirmed(notification_handler.clone())
        .await?;
    event_bus
        .subscribe_booking_cancelled(notification_handler.clone())
        .await?;
    event_bus
        .subscribe_event_registered(notification_handler.clone())
        .await?;
    event_bus
        .subscribe_user_registered(notification_handler)
        .await?;

    // ストアから状態を読み込んでエンジンを構築
    let engine = BookingEngine::load(
        event_repository,
        user_repository,
        booking_repository,
        event_bus,
        logger,
    )
    .await?;

    let mut shell = ConsoleShell::new(engine, &config);
    shell.run().await?;

    Ok(())
}
