use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::adapter::store_error::StoreError;
use crate::domain::model::{Event, EventDate, EventId, Money, TicketTier};
use crate::domain::port::{EventRepository, RepositoryError};

/// フラットファイルイベントリポジトリ
/// 1行1イベントのカンマ区切りテキストでイベントを永続化する
///
/// 行レイアウト: `id,name,location,date[,tierName:price:quantity]*`
/// 価格は常に小数点以下2桁で書き出される
pub struct FlatFileEventRepository {
    path: PathBuf,
}

impl FlatFileEventRepository {
    /// ファイルパスを指定してリポジトリを作成
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// イベントを1行のテキストに変換する
    fn encode(event: &Event) -> String {
        let mut line = format!(
            "{},{},{},{}",
            event.id(),
            event.name(),
            event.location(),
            event.date()
        );
        for (tier_name, tier) in event.tiers() {
            line.push_str(&format!(
                ",{}:{}:{}",
                tier_name,
                tier.unit_price(),
                tier.remaining()
            ));
        }
        line
    }

    /// 1行のテキストからイベントを復元する
    /// 壊れた行はNoneを返して読み込み側でスキップされる
    fn decode_line(line: &str) -> Option<Event> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let tokens: Vec<&str> = line.split(',').collect();
        if tokens.len() < 4 {
            return None;
        }

        let id = tokens[0].parse::<u32>().ok()?;
        let date = EventDate::parse(tokens[3]).ok()?;

        let mut tiers = BTreeMap::new();
        for token in &tokens[4..] {
            // 壊れたティアトークンは個別にスキップし、行自体は生かす
            let parts: Vec<&str> = token.split(':').collect();
            if parts.len() != 3 {
                continue;
            }
            let name = parts[0].trim();
            if name.is_empty() {
                continue;
            }
            let Ok(price) = Money::parse(parts[1]) else {
                continue;
            };
            let Ok(quantity) = parts[2].parse::<u32>() else {
                continue;
            };
            tiers.insert(name.to_string(), TicketTier::new(price, quantity));
        }

        Some(Event::reconstruct(
            EventId::new(id),
            tokens[1].to_string(),
            tokens[2].to_string(),
            date,
            tiers,
        ))
    }
}

#[async_trait]
impl EventRepository for FlatFileEventRepository {
    async fn load_all(&self) -> Result<Vec<Event>, RepositoryError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            // ファイルがまだ無ければ空のコレクションとして扱う
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

    async fn save_all(&self, events: &[Event]) -> Result<(), RepositoryError> {
        let mut content = String::new();
        for event in events {
            content.push_str(&Self::encode(event));
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

    fn concert() -> Event {
        let mut event = Event::new(
            EventId::new(1),
            "Summer Concert".to_string(),
            "City Hall".to_string(),
            EventDate::parse("15-06-2025").unwrap(),
        )
        .unwrap();
        event
            .add_tier("VIP", Money::parse("100.00").unwrap(), 2)
            .unwrap();
        event
            .add_tier("Standard", Money::parse("40.50").unwrap(), 10)
            .unwrap();
        event
    }

    #[test]
    fn test_encode_writes_two_decimal_prices_in_name_order() {
        let line = FlatFileEventRepository::encode(&concert());
        assert_eq!(
            line,
            "1,Summer Concert,City Hall,15-06-2025,Standard:40.50:10,VIP:100.00:2"
        );
    }

    #[test]
    fn test_decode_round_trips() {
        let original = concert();
        let line = FlatFileEventRepository::encode(&original);
        let restored = FlatFileEventRepository::decode_line(&line).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn test_decode_event_without_tiers() {
        let event =
            FlatFileEventRepository::decode_line("3,Expo,Convention Center,01-09-2026").unwrap();
        assert_eq!(event.id(), EventId::new(3));
        assert!(event.tiers().is_empty());
    }

    #[test]
    fn test_decode_skips_malformed_lines() {
        assert!(FlatFileEventRepository::decode_line("").is_none());
        assert!(FlatFileEventRepository::decode_line("garbage").is_none());
        assert!(FlatFileEventRepository::decode_line("x,Name,Loc,15-06-2025").is_none());
        assert!(FlatFileEventRepository::decode_line("1,Name,Loc,not-a-date").is_none());
    }

    #[test]
    fn test_decode_skips_malformed_tier_tokens() {
        let event = FlatFileEventRepository::decode_line(
            "1,Expo,Hall,15-06-2025,VIP:100.00:2,broken,Gold:abc:3,Silver:9.99:4",
        )
        .unwrap();
        let names: Vec<&str> = event.tiers().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Silver", "VIP"]);
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_empty() {
        let temp = tempfile::tempdir().unwrap();
        let repository = FlatFileEventRepository::new(temp.path().join("events.txt"));
        assert!(repository.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let temp = tempfile::tempdir().unwrap();
        let repository = FlatFileEventRepository::new(temp.path().join("events.txt"));

        let events = vec![concert()];
        repository.save_all(&events).await.unwrap();

        let loaded = repository.load_all().await.unwrap();
        assert_eq!(loaded, events);
    }

    #[tokio::test]
    async fn test_load_skips_corrupt_lines_but_keeps_rest() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("events.txt");
        tokio::fs::write(
            &path,
            "1,Expo,Hall,15-06-2025,Standard:10.00:5\nnot a record\n2,Fair,Park,16-06-2025\n",
        )
        .await
        .unwrap();

        let repository = FlatFileEventRepository::new(path);
        let loaded = repository.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id(), EventId::new(1));
        assert_eq!(loaded[1].id(), EventId::new(2));
    }
}
