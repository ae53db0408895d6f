use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::adapter::store_error::StoreError;
use crate::domain::model::{Booking, BookingId, BookingStatus, EventId, Money, UserId};
use crate::domain::port::{BookingRepository, RepositoryError};

/// フラットファイル予約リポジトリ
/// 行レイアウト: `id,userId,eventId,ticketCount,totalPrice,status,tierName`
/// ちょうど7フィールドの行のみを受理する。`#`で始まる行はコメント
pub struct FlatFileBookingRepository {
    path: PathBuf,
}

impl FlatFileBookingRepository {
    /// ファイルパスを指定してリポジトリを作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn encode(booking: &Booking) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            booking.id(),
            booking.user_id(),
            booking.event_id(),
            booking.tickets(),
            booking.total_price(),
            booking.status(),
            booking.tier_name()
        )
    }

    /// 壊れた行はNoneを返して読み込み側でスキップされる
    fn decode_line(line: &str) -> Option<Booking> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() != 7 {
            return None;
        }

        let id = tokens[0].parse::<u32>().ok()?;
        let user_id = tokens[1].parse::<u32>().ok()?;
        let event_id = tokens[2].parse::<u32>().ok()?;
        let tickets = tokens[3].parse::<u32>().ok()?;
        let total_price = Money::parse(tokens[4]).ok()?;
        let status = BookingStatus::from_string(tokens[5]).ok()?;

        Booking::reconstruct(
            BookingId::new(id),
            UserId::new(user_id),
            EventId::new(event_id),
            tokens[6].to_string(),
            tickets,
            total_price,
            status,
        )
        .ok()
    }
}

#[async_trait]
impl BookingRepository for FlatFileBookingRepository {
    async fn load_all(&self) -> Result<Vec<Booking>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StoreError::ReadError(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                ))
                .into())
            }
        };

        Ok(content.lines().filter_map(Self::decode_line).collect())
    }

    async fn save_all(&self, bookings: &[Booking]) -> Result<(), RepositoryError> {
        let mut content = String::new();
        for booking in bookings {
            content.push_str(&Self::encode(booking));
            content.push('\n');
        }

        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::WriteError(format!("{}: {}", self.path.display(), e)))
            .map_err(RepositoryError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vip_booking() -> Booking {
        Booking::new(
            BookingId::new(1),
            UserId::new(2),
            EventId::new(3),
            "VIP".to_string(),
            2,
            Money::parse("200.00").unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let line = FlatFileBookingRepository::encode(&vip_booking());
        assert_eq!(line, "1,2,3,2,200.00,Confirmed,VIP");
    }

    #[test]
    fn test_decode_round_trips() {
        let original = vip_booking();
        let line = FlatFileBookingRepository::encode(&original);
        let restored = FlatFileBookingRepository::decode_line(&line).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_decode_cancelled_status() {
        let booking =
            FlatFileBookingRepository::decode_line("4,2,3,1,40.00,Cancelled,Standard").unwrap();
        assert_eq!(booking.status(), BookingStatus::Cancelled);
    }

    #[test]
    fn test_decode_skips_comments_and_blank_lines() {
        assert!(FlatFileBookingRepository::decode_line("# header").is_none());
        assert!(FlatFileBookingRepository::decode_line("   ").is_none());
    }

    #[test]
    fn test_decode_requires_exactly_seven_fields() {
        assert!(FlatFileBookingRepository::decode_line("1,2,3,2,200.00,Confirmed").is_none());
        assert!(
            FlatFileBookingRepository::decode_line("1,2,3,2,200.00,Confirmed,VIP,extra").is_none()
        );
    }

    #[test]
    fn test_decode_skips_invalid_values() {
        assert!(FlatFileBookingRepository::decode_line("x,2,3,2,200.00,Confirmed,VIP").is_none());
        assert!(FlatFileBookingRepository::decode_line("1,2,3,0,0.00,Confirmed,VIP").is_none());
        assert!(FlatFileBookingRepository::decode_line("1,2,3,2,200.00,Pending,VIP").is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let repository = FlatFileBookingRepository::new(temp.path().join("bookings.txt"));

        let bookings = vec![vip_booking()];
        repository.save_all(&bookings).await.unwrap();

        let loaded = repository.load_all().await.unwrap();
        assert_eq!(loaded, bookings);
    }

    #[tokio::test]
    async fn test_load_tolerates_corrupt_lines() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("bookings.txt");
        tokio::fs::write(
            &path,
            "# bookings\n1,2,3,2,200.00,Confirmed,VIP\nbroken line\n",
        )
        .await
        .unwrap();

        let repository = FlatFileBookingRepository::new(path);
        let loaded = repository.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id(), BookingId::new(1));
    }
}
